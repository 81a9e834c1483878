//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_solver_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::optimizer",
            "crate::adapter",
            "crate::cli",
            "crate::input",
            "good_lp",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn optimizer_depends_on_the_solver_port_only() {
    let hits = find_lines_containing(
        "src/optimizer",
        &["crate::adapter", "good_lp", "crate::cli"],
    );

    assert!(
        hits.is_empty(),
        "optimizer must reach the engine through the Solver port: {hits:#?}"
    );
}

#[test]
fn ports_have_no_adapter_imports() {
    let hits = find_lines_containing("src/ports", &["crate::adapter", "good_lp"]);

    assert!(hits.is_empty(), "found adapter imports in ports: {hits:#?}");
}

#[test]
fn good_lp_is_confined_to_the_solver_adapter() {
    let hits: Vec<_> = find_lines_containing("src", &["use good_lp"])
        .into_iter()
        .filter(|(path, _, _)| !path.starts_with("src/adapter/solver/"))
        .collect();

    assert!(hits.is_empty(), "good_lp used outside the adapter: {hits:#?}");
}
