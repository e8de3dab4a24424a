// src/analysis.rs
//
// Aggregates over loaded datasets. Everything here is pure: records in,
// ordered maps or ranked slices out. Maps are `BTreeMap` so printed reports
// come out in a stable order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::records::{MoveRecord, PokemonRecord, TypeRecord};

/// All Pokémon ordered by descending base stat total. Ties keep input order.
pub fn rank_by_bst(records: &[PokemonRecord]) -> Vec<&PokemonRecord> {
    let mut ranked: Vec<&PokemonRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.bst().cmp(&a.bst()));
    ranked
}

/// Names (both Pokémon and species) flagged legendary or mythical, plus `extra`.
pub fn legendary_exclusions(records: &[PokemonRecord], extra: &[String]) -> BTreeSet<String> {
    let mut set: BTreeSet<String> = extra.iter().map(|n| n.trim().to_ascii_lowercase()).collect();
    for r in records {
        if r.is_legendary == Some(true) || r.is_mythical == Some(true) {
            set.insert(r.name.clone());
            set.insert(r.species.clone());
        }
    }
    set
}

fn is_excluded(r: &PokemonRecord, exclusions: &BTreeSet<String>) -> bool {
    exclusions.contains(&r.name) || exclusions.contains(&r.species)
}

/// Highest-BST Pokémon whose name and species are both outside `exclusions`.
pub fn strongest_non_legendary<'a>(
    records: &'a [PokemonRecord],
    exclusions: &BTreeSet<String>,
) -> Option<&'a PokemonRecord> {
    rank_by_bst(records).into_iter().find(|r| !is_excluded(r, exclusions))
}

/// Pokémon per type. A dual-typed Pokémon counts once for each of its types.
pub fn count_by_type(records: &[PokemonRecord]) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for r in records {
        for t in &r.types {
            *out.entry(t.clone()).or_insert(0) += 1;
        }
    }
    out
}

/// Pokémon per generation. Records without a generation are not counted.
pub fn count_by_generation(records: &[PokemonRecord]) -> BTreeMap<u8, usize> {
    let mut out = BTreeMap::new();
    for g in records.iter().filter_map(|r| r.generation) {
        *out.entry(g).or_insert(0) += 1;
    }
    out
}

#[derive(Default)]
struct Mean {
    sum: u64,
    n: u64,
}

impl Mean {
    fn push(&mut self, v: u32) {
        self.sum += u64::from(v);
        self.n += 1;
    }
    fn value(&self) -> f64 {
        self.sum as f64 / self.n as f64
    }
}

fn finish<K: Ord>(acc: BTreeMap<K, Mean>) -> BTreeMap<K, f64> {
    acc.into_iter().map(|(k, m)| (k, m.value())).collect()
}

/// Mean BST per type. With `fully_evolved_only`, only records known to be
/// fully evolved are considered.
pub fn average_bst_by_type(records: &[PokemonRecord], fully_evolved_only: bool) -> BTreeMap<String, f64> {
    let mut acc: BTreeMap<String, Mean> = BTreeMap::new();
    for r in records {
        if fully_evolved_only && r.is_fully_evolved != Some(true) {
            continue;
        }
        for t in &r.types {
            acc.entry(t.clone()).or_default().push(r.bst());
        }
    }
    finish(acc)
}

pub fn average_bst_by_generation(records: &[PokemonRecord], fully_evolved_only: bool) -> BTreeMap<u8, f64> {
    let mut acc: BTreeMap<u8, Mean> = BTreeMap::new();
    for r in records {
        if fully_evolved_only && r.is_fully_evolved != Some(true) {
            continue;
        }
        if let Some(g) = r.generation {
            acc.entry(g).or_default().push(r.bst());
        }
    }
    finish(acc)
}

/// Strongest base power per move type. Moves without a power (status moves,
/// variable-power moves) are ignored, so a type with only those is absent.
pub fn max_power_by_type(moves: &[MoveRecord]) -> BTreeMap<String, u32> {
    let mut out: BTreeMap<String, u32> = BTreeMap::new();
    for m in moves {
        let Some(power) = m.power else { continue };
        out.entry(m.kind.clone())
            .and_modify(|best| *best = (*best).max(power))
            .or_insert(power);
    }
    out
}

/// Types ordered by how many attacking types hit them super-effectively,
/// most first, then by name.
pub fn weakness_count(types: &[TypeRecord]) -> Vec<(&str, usize)> {
    let mut out: Vec<(&str, usize)> = types.iter().map(|t| (t.name.as_str(), t.weaknesses.len())).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    out
}

/// Damage multiplier of every attacking type against `pokemon`, joined by
/// type name. Only attacking types with a multiplier above 1 are returned,
/// strongest first. Pokémon types missing from `types` are ignored.
pub fn pokemon_weaknesses(pokemon: &PokemonRecord, types: &[TypeRecord]) -> Vec<(String, f32)> {
    let by_name: HashMap<&str, &TypeRecord> = types.iter().map(|t| (t.name.as_str(), t)).collect();

    let defending: Vec<&TypeRecord> = pokemon
        .types
        .iter()
        .filter_map(|t| {
            let found = by_name.get(t.as_str()).copied();
            if found.is_none() {
                log::debug!("{}: type {t} not in types dataset", pokemon.name);
            }
            found
        })
        .collect();

    let mut out: Vec<(String, f32)> = types
        .iter()
        .map(|attacker| {
            let mult = defending.iter().fold(1.0f32, |acc, d| {
                if d.immunities.contains(&attacker.name) {
                    0.0
                } else if d.weaknesses.contains(&attacker.name) {
                    acc * 2.0
                } else if d.resistances.contains(&attacker.name) {
                    acc * 0.5
                } else {
                    acc
                }
            });
            (attacker.name.clone(), mult)
        })
        .filter(|(_, m)| *m > 1.0)
        .collect();

    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Top `n` Pokémon by BST within each generation.
pub fn stat_leaders_by_generation(records: &[PokemonRecord], n: usize) -> BTreeMap<u8, Vec<&PokemonRecord>> {
    let mut out: BTreeMap<u8, Vec<&PokemonRecord>> = BTreeMap::new();
    for r in rank_by_bst(records) {
        if let Some(g) = r.generation {
            let bucket = out.entry(g).or_default();
            if bucket.len() < n {
                bucket.push(r);
            }
        }
    }
    out
}
