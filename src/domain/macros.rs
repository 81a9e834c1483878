/// Declares a struct with one field per variant of a companion enum, so the
/// struct can be indexed, built and mapped by key.
///
/// The field order is the canonical channel order used for display and
/// serialization.
macro_rules! keyed_struct {
    (
        $(#[$struct_attrs:meta])*
        pub struct $Struct:ident<$T:ident> {
            enum $Enum:ident;
            fields {
                $( pub $field:ident, $Variant:ident; )*
            }
        }
    ) => {
        $(#[$struct_attrs])*
        pub struct $Struct<$T> {
            $( pub $field: $T, )*
        }

        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $Enum {
            $( $Variant, )*
        }

        impl $Enum {
            pub const ALL: &'static [$Enum] = &[ $( $Enum::$Variant, )* ];
            pub const COUNT: usize = $Enum::ALL.len();

            pub fn iter() -> impl Iterator<Item = $Enum> {
                $Enum::ALL.iter().copied()
            }

            /// Canonical name, identical to the variant identifier.
            pub fn name(self) -> &'static str {
                match self {
                    $( $Enum::$Variant => stringify!($Variant), )*
                }
            }

            /// Exact-match lookup of a canonical name.
            pub fn from_name(name: &str) -> Option<$Enum> {
                $(
                    if name == stringify!($Variant) {
                        return Some($Enum::$Variant);
                    }
                )*
                None
            }
        }

        impl std::fmt::Display for $Enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl<$T> $Struct<$T> {
            pub fn from_fn<F: FnMut($Enum) -> $T>(mut f: F) -> $Struct<$T> {
                $Struct {
                    $( $field: f($Enum::$Variant), )*
                }
            }

            pub fn map<U, F: FnMut($Enum, $T) -> U>(self, mut f: F) -> $Struct<U> {
                $Struct {
                    $( $field: f($Enum::$Variant, self.$field), )*
                }
            }

            pub fn iter(&self) -> impl Iterator<Item = ($Enum, &$T)> {
                [ $( ($Enum::$Variant, &self.$field), )* ].into_iter()
            }
        }

        impl<$T: Clone> From<$T> for $Struct<$T> {
            fn from(x: $T) -> $Struct<$T> {
                Self::from_fn(|_| x.clone())
            }
        }

        impl<$T> std::ops::Index<$Enum> for $Struct<$T> {
            type Output = $T;
            fn index(&self, key: $Enum) -> &$T {
                match key {
                    $( $Enum::$Variant => &self.$field, )*
                }
            }
        }

        impl<$T> std::ops::IndexMut<$Enum> for $Struct<$T> {
            fn index_mut(&mut self, key: $Enum) -> &mut $T {
                match key {
                    $( $Enum::$Variant => &mut self.$field, )*
                }
            }
        }

        impl<$T: std::ops::Add<Output = $T>> std::ops::Add for $Struct<$T> {
            type Output = $Struct<$T>;
            fn add(self, other: $Struct<$T>) -> $Struct<$T> {
                $Struct {
                    $( $field: self.$field + other.$field, )*
                }
            }
        }

        impl<$T: std::ops::AddAssign> std::ops::AddAssign for $Struct<$T> {
            fn add_assign(&mut self, other: $Struct<$T>) {
                $( self.$field += other.$field; )*
            }
        }

        impl<$T: std::ops::Mul<Output = $T>> std::ops::Mul for $Struct<$T> {
            type Output = $Struct<$T>;
            fn mul(self, other: $Struct<$T>) -> $Struct<$T> {
                $Struct {
                    $( $field: self.$field * other.$field, )*
                }
            }
        }
    };
}
