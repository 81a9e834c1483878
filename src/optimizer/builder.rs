//! Symbolic hero stats over equip decision variables.
//!
//! [`ProblemBuilder`] creates one binary variable per (hero, item) pair and
//! runs the shared aggregation over a symbolic loadout, so every hero ends
//! up with a [`LinearExpr`] per stat channel. Set tiers become bounded
//! integer variables pinned to `floor(pieces / threshold)` by a division
//! constraint.
//!
//! Percent-to-flat conversion is folded into coefficients at build time:
//! each item contributes `x · floor(pct · base / 100)`, each set tier
//! `tier · floor(bonus · base / 100)`, and the hero's own percent stats a
//! constant `floor(pct · base / 100)`. Flooring per term can differ from the
//! numeric aggregation, which floors the total once.

use tracing::debug;

use crate::domain::{
    aggregate, percent_of, Conversion, HeroId, Item, ItemId, Loadout, PerSet, PerStat, Roster,
    SetType,
};
use crate::ports::{Constraint, IntegerProgram, LinearExpr, VarId};

/// Symbolic state of one hero.
#[derive(Debug, Clone)]
pub struct HeroModel {
    pub hero: HeroId,
    pub name: String,
    /// Final stats per channel.
    pub stats: PerStat<LinearExpr>,
    /// Active tier count per set.
    pub tiers: PerSet<LinearExpr>,
    /// Equipped piece count per set.
    pub pieces: PerSet<LinearExpr>,
}

/// The equip variables plus per-hero expressions, ready for constraints.
#[derive(Debug, Clone)]
pub struct Problem {
    program: IntegerProgram,
    /// `equip[hero][item]`
    equip: Vec<Vec<VarId>>,
    heroes: Vec<HeroModel>,
}

impl Problem {
    pub fn program(&self) -> &IntegerProgram {
        &self.program
    }

    pub(crate) fn program_mut(&mut self) -> &mut IntegerProgram {
        &mut self.program
    }

    pub fn equip_var(&self, hero: HeroId, item: ItemId) -> VarId {
        self.equip[hero.index()][item.index()]
    }

    pub fn heroes(&self) -> &[HeroModel] {
        &self.heroes
    }

    pub fn hero(&self, hero: HeroId) -> &HeroModel {
        &self.heroes[hero.index()]
    }

    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    pub fn item_count(&self) -> usize {
        self.equip.first().map_or(0, Vec::len)
    }
}

pub struct ProblemBuilder<'r> {
    roster: &'r Roster,
}

impl<'r> ProblemBuilder<'r> {
    pub fn new(roster: &'r Roster) -> Self {
        Self { roster }
    }

    pub fn build(self) -> Problem {
        let items: Vec<&Item> = self.roster.items().map(|(_, item)| item).collect();
        let mut program = IntegerProgram::new();

        let equip: Vec<Vec<VarId>> = self
            .roster
            .heroes()
            .map(|(_, hero)| {
                items
                    .iter()
                    .map(|item| program.add_binary(format!("{}_{}", hero.name(), item.name())))
                    .collect()
            })
            .collect();

        let mut heroes = Vec::with_capacity(equip.len());
        for ((hero_id, hero), vars) in self.roster.heroes().zip(&equip) {
            let mut loadout = HeroLoadout {
                program: &mut program,
                hero: hero.name(),
                items: &items,
                vars,
                pieces: PerSet::default(),
            };
            let result = aggregate(&mut loadout, hero.base_stats(), hero.base_with_additional());
            heroes.push(HeroModel {
                hero: hero_id,
                name: hero.name().to_string(),
                stats: result.stats,
                tiers: result.tiers,
                pieces: loadout.pieces,
            });
        }

        debug!(
            heroes = heroes.len(),
            items = items.len(),
            variables = program.num_vars(),
            "built symbolic hero stats"
        );

        Problem {
            program,
            equip,
            heroes,
        }
    }
}

/// Symbolic loadout of one hero: every item may or may not be equipped.
struct HeroLoadout<'a> {
    program: &'a mut IntegerProgram,
    hero: &'a str,
    items: &'a [&'a Item],
    vars: &'a [VarId],
    pieces: PerSet<LinearExpr>,
}

impl HeroLoadout<'_> {
    fn candidates(&self) -> impl Iterator<Item = (&Item, VarId)> + '_ {
        self.items.iter().copied().zip(self.vars.iter().copied())
    }
}

impl Loadout for HeroLoadout<'_> {
    type Value = LinearExpr;

    fn item_stats(&mut self) -> PerStat<LinearExpr> {
        PerStat::from_fn(|stat| {
            let mut expr = LinearExpr::zero();
            for (item, var) in self.candidates() {
                expr.add_term(var, item.stats()[stat]);
            }
            expr
        })
    }

    fn set_pieces(&mut self, set: SetType) -> LinearExpr {
        let mut expr = LinearExpr::zero();
        for (item, var) in self.candidates() {
            if item.set() == set {
                expr.add_term(var, 1);
            }
        }
        self.pieces[set] = expr.clone();
        expr
    }

    fn tiers(&mut self, set: SetType, pieces: LinearExpr, threshold: i64) -> LinearExpr {
        let matching = pieces.terms().len() as i64;
        let max_tiers = matching / threshold;
        if max_tiers == 0 {
            return LinearExpr::zero();
        }
        let label = format!("{}_{}_tiers", self.hero, set);
        let tiers = self.program.add_integer(label.clone(), 0, max_tiers);
        self.program
            .add_constraint(Constraint::division(label, tiers, pieces, threshold));
        tiers.into()
    }

    fn percent_bonus(&mut self, c: &Conversion<'_, LinearExpr>) -> LinearExpr {
        let base = c.base[c.flat];
        let mut expr = LinearExpr::constant(percent_of(c.base_with_additional[c.percent], base));
        for (item, var) in self.candidates() {
            expr.add_term(var, percent_of(item.stats()[c.percent], base));
        }
        for set in SetType::iter() {
            if let Some((stat, per_tier)) = set.bonus().boosted {
                if stat == c.percent {
                    expr += c.tiers[set].clone() * percent_of(per_tier, base);
                }
            }
        }
        expr
    }
}
