mod support;

use gearopt::domain::{
    aggregate, AdditionalSource, EquippedItems, HeroId, Item, ItemId, ItemType, Roster, SetType,
    Stat, Stats,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use support::fixtures::{base_stats, hero, item, RosterBuilder};

fn random_roster(rng: &mut StdRng) -> Roster {
    let mut builder = RosterBuilder::new()
        .hero("A", base_stats())
        .hero("B", base_stats())
        .hero("C", base_stats());
    for i in 0..24 {
        let slot = ItemType::ALL[rng.gen_range(0..ItemType::COUNT)];
        let set = SetType::ALL[rng.gen_range(0..SetType::COUNT)];
        let stats: Vec<(Stat, i64)> = (0..3)
            .map(|_| (Stat::ALL[rng.gen_range(0..Stat::COUNT)], rng.gen_range(1..60)))
            .collect();
        builder = builder.item(&format!("item{i}"), slot, set, &stats);
    }
    builder.build()
}

/// Stats a hero would have if recomputed from scratch.
fn fresh_stats(roster: &Roster, hero_id: HeroId) -> Stats {
    let hero = roster.hero(hero_id).unwrap();
    let items = hero.equipped_items().map(|id| roster.item(id).unwrap());
    aggregate(
        &mut EquippedItems::new(items),
        hero.base_stats(),
        hero.base_with_additional(),
    )
    .stats
}

#[test]
fn random_equip_sequences_keep_links_consistent() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut roster = random_roster(&mut rng);

    for _ in 0..500 {
        let hero_id = HeroId::new(rng.gen_range(0..roster.hero_count()));
        let item_id = ItemId::new(rng.gen_range(0..roster.item_count()));
        if rng.gen_bool(0.7) {
            roster.equip(hero_id, item_id).unwrap();
            assert_eq!(roster.item(item_id).unwrap().equipped_to(), Some(hero_id));
        } else {
            roster.unequip(hero_id, item_id).unwrap();
        }

        assert!(roster.links_consistent());
        for (id, hero) in roster.heroes() {
            assert_eq!(hero.equipped_stats(), &fresh_stats(&roster, id));
        }
    }

    roster.unequip_all();
    assert!(roster.links_consistent());
    for (_, hero) in roster.heroes() {
        assert_eq!(hero.equipped_stats(), &base_stats());
        assert!(hero.active_set_types().is_empty());
    }
}

#[test]
fn equip_then_unequip_restores_stats() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut roster = random_roster(&mut rng);
    let hero_id = hero(&roster, "B");
    let before = *roster.hero(hero_id).unwrap().equipped_stats();

    for index in 0..roster.item_count() {
        let item_id = ItemId::new(index);
        roster.equip(hero_id, item_id).unwrap();
        assert!(roster.unequip(hero_id, item_id).unwrap());
        assert_eq!(roster.hero(hero_id).unwrap().equipped_stats(), &before);
    }
}

#[test]
fn assignment_round_trips_through_roster() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut roster = random_roster(&mut rng);
    for _ in 0..60 {
        let hero_id = HeroId::new(rng.gen_range(0..roster.hero_count()));
        let item_id = ItemId::new(rng.gen_range(0..roster.item_count()));
        roster.equip(hero_id, item_id).unwrap();
    }

    let assignment = roster.current_assignment();
    let mut copy = roster.clone();
    copy.unequip_all();
    copy.apply_assignment(&assignment).unwrap();

    assert_eq!(copy.current_assignment(), assignment);
    for (id, hero) in copy.heroes() {
        assert_eq!(hero.equipped_stats(), roster.hero(id).unwrap().equipped_stats());
    }
}

#[test]
fn set_tiers_count_complete_groups() {
    let piece = |n: usize| Item::new(format!("p{n}"), ItemType::Weapon, SetType::Speed, Stats::zero());
    let tiers = |count: usize| {
        let items: Vec<Item> = (0..count).map(piece).collect();
        aggregate(&mut EquippedItems::new(&items), &base_stats(), &base_stats()).tiers
    };

    assert_eq!(tiers(3).speed, 0);
    assert_eq!(tiers(4).speed, 1);
    assert_eq!(tiers(7).speed, 1);
    assert_eq!(tiers(8).speed, 2);
}

#[test]
fn attack_set_converts_against_base_attack() {
    let mut builder = RosterBuilder::new().hero("Hero", base_stats());
    for slot in [ItemType::Weapon, ItemType::Helmet, ItemType::Armor, ItemType::Boots] {
        builder = builder.item(&format!("{slot}"), slot, SetType::Attack, &[]);
    }
    let mut roster = builder.build();
    let hero_id = hero(&roster, "Hero");
    for name in ["Weapon", "Helmet", "Armor", "Boots"] {
        roster.equip(hero_id, item(&roster, name)).unwrap();
    }

    let hero = roster.hero(hero_id).unwrap();
    assert_eq!(hero.active_set_types(), vec![SetType::Attack]);
    assert_eq!(hero.equipped_stats().attack, 1450);
}

#[test]
fn additional_stats_feed_flat_channels_only() {
    let mut roster = RosterBuilder::new()
        .hero("Hero", base_stats())
        .item("Ring", ItemType::Ring, SetType::Immunity, &[(Stat::AttackPercent, 10)])
        .build();
    let hero_id = hero(&roster, "Hero");
    roster
        .set_additional_stats(
            hero_id,
            AdditionalSource::Artifact,
            Stats::from_sparse([(Stat::Attack, 500)]),
        )
        .unwrap();
    roster.equip(hero_id, item(&roster, "Ring")).unwrap();

    // percent bonuses scale the original base attack, not the artifact
    assert_eq!(roster.hero(hero_id).unwrap().equipped_stats().attack, 1000 + 500 + 100);
}

#[test]
fn moving_an_item_strips_the_previous_holder() {
    let mut roster = RosterBuilder::new()
        .hero("A", base_stats())
        .hero("B", base_stats())
        .item("Blade", ItemType::Weapon, SetType::Hit, &[(Stat::Attack, 200)])
        .build();
    let (a, b) = (hero(&roster, "A"), hero(&roster, "B"));
    let blade = item(&roster, "Blade");

    roster.equip(a, blade).unwrap();
    roster.equip(b, blade).unwrap();

    assert_eq!(roster.hero(a).unwrap().equipped_in(ItemType::Weapon), None);
    assert_eq!(roster.hero(a).unwrap().equipped_stats().attack, 1000);
    assert_eq!(roster.hero(b).unwrap().equipped_stats().attack, 1200);
    assert!(roster.links_consistent());
}
