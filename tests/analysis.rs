// tests/analysis.rs
use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use poke_scrape::analysis;
use poke_scrape::records::{BaseStats, MoveRecord, PokemonRecord};

fn mon(id: u32, name: &str, stats: [u32; 6]) -> PokemonRecord {
    let [hp, atk, def, spa, spd, spe] = stats;
    PokemonRecord {
        id,
        name: name.to_string(),
        species: name.to_string(),
        generation: Some(1),
        types: vec!["normal".to_string()],
        base_stats: BaseStats::new(hp, atk, def, spa, spd, spe),
        stage: None,
        is_fully_evolved: None,
        is_legendary: Some(false),
        is_mythical: Some(false),
        dex_entry: None,
    }
}

fn mv(id: u32, kind: &str, power: Option<u32>) -> MoveRecord {
    MoveRecord {
        id,
        name: format!("move-{id}"),
        kind: kind.to_string(),
        power,
        damage_class: if power.is_some() { "physical" } else { "status" }.to_string(),
        accuracy: Some(100),
        pp: Some(10),
        priority: Some(0),
        effect_chance: None,
        target: None,
        generation: Some(1),
        effect: None,
        learned_by: Vec::new(),
    }
}

#[test]
fn ranks_by_total_not_by_single_stat() {
    let records = vec![
        mon(1, "even-low", [50; 6]),
        mon(2, "even-high", [100; 6]),
        mon(3, "spiky", [10, 200, 10, 10, 10, 10]),
    ];
    let order: Vec<u32> = analysis::rank_by_bst(&records).iter().map(|p| p.id).collect();
    assert_eq!(order, vec![2, 3, 1]);
}

#[test]
fn ties_keep_input_order() {
    let records = vec![mon(9, "b", [50; 6]), mon(4, "a", [50; 6]), mon(7, "c", [60; 6])];
    let order: Vec<u32> = analysis::rank_by_bst(&records).iter().map(|p| p.id).collect();
    assert_eq!(order, vec![7, 9, 4]);
}

#[test]
fn strongest_non_legendary_uses_flags_and_extras() {
    let mut records = vec![
        mon(150, "mewtwo", [106, 110, 90, 154, 90, 130]),
        mon(149, "dragonite", [91, 134, 95, 100, 100, 80]),
        mon(248, "tyranitar", [100, 134, 110, 95, 100, 61]),
        mon(143, "snorlax", [160, 110, 65, 65, 110, 30]),
    ];
    records[0].is_legendary = Some(true);

    let flags_only = analysis::legendary_exclusions(&records, &[]);
    assert_eq!(flags_only, BTreeSet::from(["mewtwo".to_string()]));
    let top = analysis::strongest_non_legendary(&records, &flags_only).unwrap();
    assert_eq!(top.name, "dragonite");

    // Pseudo-legendaries excluded by name through configuration.
    let extra = vec!["Dragonite".to_string(), "tyranitar".to_string()];
    let with_extra = analysis::legendary_exclusions(&records, &extra);
    let top = analysis::strongest_non_legendary(&records, &with_extra).unwrap();
    assert_eq!(top.name, "snorlax");
}

#[test]
fn unknown_legendary_flag_is_not_treated_as_legendary() {
    let mut records = vec![mon(1, "mystery", [90; 6])];
    records[0].is_legendary = None;
    records[0].is_mythical = None;
    let exclusions = analysis::legendary_exclusions(&records, &[]);
    assert!(exclusions.is_empty());
    assert_eq!(analysis::strongest_non_legendary(&records, &exclusions).unwrap().id, 1);
}

#[test]
fn max_power_ignores_moves_without_power() {
    let moves = vec![
        mv(1, "normal", Some(40)),
        mv(2, "normal", Some(150)),
        mv(3, "normal", None),
        mv(4, "fairy", None),
        mv(5, "fire", Some(90)),
    ];
    let max = analysis::max_power_by_type(&moves);
    assert_eq!(max.get("normal"), Some(&150));
    assert_eq!(max.get("fire"), Some(&90));
    assert_eq!(max.get("fairy"), None);
}

#[test]
fn counts_and_averages_by_type_and_generation() {
    let mut records = vec![
        mon(1, "a", [50; 6]),
        mon(2, "b", [100; 6]),
        mon(3, "c", [80; 6]),
    ];
    records[1].types = vec!["normal".to_string(), "flying".to_string()];
    records[1].is_fully_evolved = Some(true);
    records[2].generation = Some(2);

    let by_type = analysis::count_by_type(&records);
    assert_eq!(by_type.get("normal"), Some(&3));
    assert_eq!(by_type.get("flying"), Some(&1));

    let by_gen = analysis::count_by_generation(&records);
    assert_eq!(by_gen.get(&1), Some(&2));
    assert_eq!(by_gen.get(&2), Some(&1));

    let avg = analysis::average_bst_by_type(&records, false);
    assert_eq!(avg.get("normal"), Some(&460.0));
    let avg_fe = analysis::average_bst_by_type(&records, true);
    assert_eq!(avg_fe.get("normal"), Some(&600.0));
    assert_eq!(avg_fe.len(), 2);

    let avg_gen = analysis::average_bst_by_generation(&records, false);
    assert_eq!(avg_gen.get(&1), Some(&450.0));
}
