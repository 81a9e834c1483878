//! End-to-end optimization through HiGHS.

mod support;

use std::collections::HashSet;

use gearopt::adapter::solver::HiGHSSolver;
use gearopt::domain::{HeroConstraints, ItemType, Roster, SetType, Stat, Stats};
use gearopt::optimizer::{optimize, Outcome, OutcomeStatus, Solution};
use gearopt::ports::SolverSettings;

use support::fixtures::{base_stats, hero, item, RosterBuilder};

fn solve(roster: &Roster, constraints: &[HeroConstraints]) -> Outcome {
    let settings = SolverSettings::new(30, 2).expect("valid settings");
    optimize(roster, constraints, &HiGHSSolver::new(), &settings).expect("solve runs")
}

fn solved(outcome: Outcome) -> Solution {
    match outcome {
        Outcome::Optimal(solution) => solution,
        other => panic!("expected an optimal outcome, got {other:?}"),
    }
}

fn simple_base() -> Stats {
    Stats::from_sparse([(Stat::Attack, 1000), (Stat::Health, 5000), (Stat::Speed, 100)])
}

#[test]
fn single_hero_equips_both_items() {
    let roster = RosterBuilder::new()
        .hero("Hero", simple_base())
        .item("Blade", ItemType::Weapon, SetType::Attack, &[(Stat::Attack, 200)])
        .item("Greaves", ItemType::Boots, SetType::Speed, &[(Stat::Speed, 50)])
        .build();

    let solution = solved(solve(&roster, &[HeroConstraints::weighted(Stats::from(1))]));
    let result = &solution.heroes[0];

    assert_eq!(result.stats.attack, 1200);
    assert_eq!(result.stats.speed, 150);
    assert_eq!(result.stats.health, 5000);
    assert!(result.active_set_types().is_empty());

    let equipped = solution.assignment.items_for(hero(&roster, "Hero"));
    assert_eq!(equipped, &[item(&roster, "Blade"), item(&roster, "Greaves")]);
}

#[test]
fn unreachable_minimum_is_infeasible() {
    let roster = RosterBuilder::new()
        .hero("Hero", simple_base())
        .item("Blade", ItemType::Weapon, SetType::Attack, &[(Stat::Attack, 200)])
        .item("Greaves", ItemType::Boots, SetType::Speed, &[(Stat::Speed, 50)])
        .build();
    let constraints = [HeroConstraints::weighted(Stats::from(1))
        .with_min(Stats::from_sparse([(Stat::Attack, 1201)]))];

    let outcome = solve(&roster, &constraints);
    assert_eq!(outcome.status(), OutcomeStatus::Infeasible);
    assert!(outcome.solution().is_none());
}

#[test]
fn four_attack_pieces_convert_to_flat_attack() {
    let slots = [ItemType::Weapon, ItemType::Helmet, ItemType::Armor, ItemType::Boots];
    let mut builder = RosterBuilder::new().hero("Hero", simple_base());
    for slot in slots {
        builder = builder.item(&format!("{slot}"), slot, SetType::Attack, &[]);
    }
    let roster = builder.build();
    let weights = Stats::from_sparse([(Stat::Attack, 1)]);

    let solution = solved(solve(&roster, &[HeroConstraints::weighted(weights)]));
    let result = &solution.heroes[0];
    assert_eq!(result.active_sets.attack, 1);
    assert_eq!(result.stats.attack_percent, 45);
    assert_eq!(result.stats.attack, 1450);
}

#[test]
fn assignments_respect_slots_and_possession() {
    let mut builder = RosterBuilder::new()
        .hero("A", base_stats())
        .hero("B", base_stats())
        .hero("C", base_stats());
    for (i, slot) in ItemType::ALL.iter().copied().cycle().take(15).enumerate() {
        builder = builder.item(
            &format!("item{i}"),
            slot,
            SetType::Health,
            &[(Stat::Health, 100 + i as i64 * 10)],
        );
    }
    let roster = builder.build();
    let weights = Stats::from_sparse([(Stat::Health, 1)]);
    let constraints = vec![HeroConstraints::weighted(weights); 3];

    let solution = solved(solve(&roster, &constraints));

    let mut seen = HashSet::new();
    for (hero_id, items) in solution.assignment.iter() {
        let mut slots = HashSet::new();
        for &item_id in items {
            let slot = roster.item(item_id).unwrap().slot();
            assert!(slots.insert(slot), "{hero_id} wears two items in {slot}");
            assert!(seen.insert(item_id), "{item_id} is worn twice");
        }
    }
    // every item is wanted and fits somewhere
    assert_eq!(seen.len(), 15);
}

#[test]
fn required_set_is_activated() {
    let speed_slots = [ItemType::Weapon, ItemType::Helmet, ItemType::Armor, ItemType::Boots];
    let mut builder = RosterBuilder::new().hero("Hero", simple_base());
    for slot in speed_slots {
        builder = builder
            .item(&format!("speed {slot}"), slot, SetType::Speed, &[(Stat::Attack, 10)])
            .item(&format!("attack {slot}"), slot, SetType::Hit, &[(Stat::Attack, 100)]);
    }
    let roster = builder.build();
    let weights = Stats::from_sparse([(Stat::Attack, 1)]);

    let unconstrained = solved(solve(&roster, &[HeroConstraints::weighted(weights)]));
    assert_eq!(unconstrained.heroes[0].active_sets.speed, 0);

    let constraints = [HeroConstraints::weighted(weights).with_required_set(SetType::Speed)];
    let solution = solved(solve(&roster, &constraints));
    let result = &solution.heroes[0];
    assert_eq!(result.active_sets.speed, 1);
    assert_eq!(result.stats.speed, 125);
    assert_eq!(result.stats.attack, 1040);
}

#[test]
fn maximum_bound_excludes_items() {
    let roster = RosterBuilder::new()
        .hero("Hero", simple_base())
        .item("Blade", ItemType::Weapon, SetType::Attack, &[(Stat::Attack, 200)])
        .item("Greaves", ItemType::Boots, SetType::Speed, &[(Stat::Speed, 50)])
        .build();
    let constraints = [HeroConstraints::weighted(Stats::from(1))
        .with_max(Stats::max_with([(Stat::Speed, 120)]))];

    let solution = solved(solve(&roster, &constraints));
    assert_eq!(solution.heroes[0].stats.speed, 100);
    assert_eq!(solution.assignment.items_for(hero(&roster, "Hero")), &[item(&roster, "Blade")]);
}

#[test]
fn contested_item_goes_to_weighted_hero() {
    let roster = RosterBuilder::new()
        .hero("Idle", simple_base())
        .hero("Carry", simple_base())
        .item("Blade", ItemType::Weapon, SetType::Attack, &[(Stat::Attack, 200)])
        .build();
    let weights = Stats::from_sparse([(Stat::Attack, 1)]);
    let constraints = [
        HeroConstraints::weighted(weights).with_hero_weight(0),
        HeroConstraints::weighted(weights).with_hero_weight(2),
    ];

    let solution = solved(solve(&roster, &constraints));
    assert_eq!(solution.assignment.items_for(hero(&roster, "Carry")), &[item(&roster, "Blade")]);
    assert!(solution.assignment.items_for(hero(&roster, "Idle")).is_empty());
    assert_eq!(solution.objective, 1200 * 2);
}

#[test]
fn solver_stats_match_materialized_roster() {
    // base stats are multiples of 100, so per-item flooring is exact
    let roster = RosterBuilder::new()
        .hero("A", base_stats())
        .hero("B", base_stats())
        .item("w1", ItemType::Weapon, SetType::Speed, &[(Stat::Attack, 100), (Stat::SpeedPercent, 6)])
        .item("h1", ItemType::Helmet, SetType::Speed, &[(Stat::Health, 300)])
        .item("a1", ItemType::Armor, SetType::Speed, &[(Stat::DefensePercent, 8)])
        .item("b1", ItemType::Boots, SetType::Speed, &[(Stat::Speed, 45)])
        .item("n1", ItemType::Necklace, SetType::Crit, &[(Stat::CriticalHitDamagePercent, 40)])
        .item("r1", ItemType::Ring, SetType::Crit, &[(Stat::AttackPercent, 12)])
        .item("w2", ItemType::Weapon, SetType::Health, &[(Stat::Attack, 80)])
        .item("b2", ItemType::Boots, SetType::Health, &[(Stat::HealthPercent, 10)])
        .build();
    let constraints = [
        HeroConstraints::weighted(Stats::from(1).normalised()),
        HeroConstraints::weighted(Stats::from_sparse([(Stat::Health, 1)])),
    ];

    let solution = solved(solve(&roster, &constraints));
    let mut materialized = roster.clone();
    materialized.apply_assignment(&solution.assignment).unwrap();
    assert!(materialized.links_consistent());

    for result in &solution.heroes {
        let hero = materialized.hero(result.hero).unwrap();
        assert_eq!(&result.stats, hero.equipped_stats(), "{}", result.name);
        assert_eq!(&result.active_sets, hero.active_sets(), "{}", result.name);
    }
}
