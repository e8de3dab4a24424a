// src/records.rs
//
// Flat, independent dataset rows. Records refer to each other by name only
// (a Pokémon's types, a move's type); none owns another.
//
// Every record knows its own tabular shape (`Record`), so the writer and the
// loader stay generic over the three datasets.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::options::DatasetKind;

/// Separator for multi-valued cells (type sets, learned-by lists).
pub const LIST_SEP: char = '|';

pub trait Record: Sized {
    const KIND: DatasetKind;
    const HEADERS: &'static [&'static str];

    /// Stable sort key for output.
    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn to_row(&self) -> Vec<String>;
    fn from_row(row: &[String]) -> Result<Self, String>;

    fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }
}

/* ---------------- Pokémon ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_atk: u32,
    pub sp_def: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn new(hp: u32, attack: u32, defense: u32, sp_atk: u32, sp_def: u32, speed: u32) -> Self {
        Self { hp, attack, defense, sp_atk, sp_def, speed }
    }

    /// Base stat total.
    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }

    pub fn as_array(&self) -> [u32; 6] {
        [self.hp, self.attack, self.defense, self.sp_atk, self.sp_def, self.speed]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    /// Name of the default variety (`/pokemon/{name}`), e.g. "deoxys-normal".
    pub name: String,
    pub species: String,
    pub generation: Option<u8>,
    /// Slot order, no duplicates, one or two entries.
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub stage: Option<u8>,
    pub is_fully_evolved: Option<bool>,
    pub is_legendary: Option<bool>,
    pub is_mythical: Option<bool>,
    pub dex_entry: Option<String>,
}

impl PokemonRecord {
    pub fn bst(&self) -> u32 {
        self.base_stats.total()
    }

    pub fn has_type(&self, t: &str) -> bool {
        self.types.iter().any(|x| x == t)
    }
}

impl Record for PokemonRecord {
    const KIND: DatasetKind = DatasetKind::Pokemon;
    const HEADERS: &'static [&'static str] = &[
        "id", "name", "species", "generation", "type1", "type2",
        "hp", "attack", "defense", "special_attack", "special_defense", "speed", "bst",
        "stage", "is_fully_evolved", "is_legendary", "is_mythical", "dex_entry",
    ];

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }

    fn to_row(&self) -> Vec<String> {
        let s = &self.base_stats;
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.species.clone(),
            opt_cell(self.generation),
            self.types.first().cloned().unwrap_or_default(),
            self.types.get(1).cloned().unwrap_or_default(),
            s.hp.to_string(),
            s.attack.to_string(),
            s.defense.to_string(),
            s.sp_atk.to_string(),
            s.sp_def.to_string(),
            s.speed.to_string(),
            self.bst().to_string(),
            opt_cell(self.stage),
            opt_cell(self.is_fully_evolved),
            opt_cell(self.is_legendary),
            opt_cell(self.is_mythical),
            self.dex_entry.clone().unwrap_or_default(),
        ]
    }

    fn from_row(row: &[String]) -> Result<Self, String> {
        let row = Cells::new(row, Self::HEADERS)?;
        let types = [row.get(4), row.get(5)]
            .into_iter()
            .filter(|t| !t.is_empty())
            .map(|t| s!(t))
            .collect();
        let base_stats = BaseStats::new(
            row.req(6)?, row.req(7)?, row.req(8)?, row.req(9)?, row.req(10)?, row.req(11)?,
        );
        let bst: u32 = row.req(12)?;
        if bst != base_stats.total() {
            return Err(format!("bst {bst} does not match stat sum {}", base_stats.total()));
        }
        Ok(Self {
            id: row.req(0)?,
            name: s!(row.get(1)),
            species: s!(row.get(2)),
            generation: row.opt(3)?,
            types,
            base_stats,
            stage: row.opt(13)?,
            is_fully_evolved: row.opt(14)?,
            is_legendary: row.opt(15)?,
            is_mythical: row.opt(16)?,
            dex_entry: Some(row.get(17)).filter(|s| !s.is_empty()).map(|s| s!(s)),
        })
    }
}

/* ---------------- Moves ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `None` for status moves. Never zero-filled.
    pub power: Option<u32>,
    pub damage_class: String,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    pub priority: Option<i32>,
    pub effect_chance: Option<u32>,
    pub target: Option<String>,
    pub generation: Option<u8>,
    pub effect: Option<String>,
    pub learned_by: Vec<String>,
}

impl Record for MoveRecord {
    const KIND: DatasetKind = DatasetKind::Moves;
    const HEADERS: &'static [&'static str] = &[
        "id", "name", "type", "power", "damage_class", "accuracy", "pp", "priority",
        "effect_chance", "target", "generation", "effect", "learned_by",
    ];

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.kind.clone(),
            opt_cell(self.power),
            self.damage_class.clone(),
            opt_cell(self.accuracy),
            opt_cell(self.pp),
            opt_cell(self.priority),
            opt_cell(self.effect_chance),
            self.target.clone().unwrap_or_default(),
            opt_cell(self.generation),
            self.effect.clone().unwrap_or_default(),
            list_cell(&self.learned_by),
        ]
    }

    fn from_row(row: &[String]) -> Result<Self, String> {
        let row = Cells::new(row, Self::HEADERS)?;
        Ok(Self {
            id: row.req(0)?,
            name: s!(row.get(1)),
            kind: s!(row.get(2)),
            power: row.opt(3)?,
            damage_class: s!(row.get(4)),
            accuracy: row.opt(5)?,
            pp: row.opt(6)?,
            priority: row.opt(7)?,
            effect_chance: row.opt(8)?,
            target: row.opt_str(9),
            generation: row.opt(10)?,
            effect: row.opt_str(11),
            learned_by: parse_list(row.get(12)),
        })
    }
}

/* ---------------- Types ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub id: u32,
    pub name: String,
    /// Takes double damage from.
    pub weaknesses: BTreeSet<String>,
    /// Takes half damage from.
    pub resistances: BTreeSet<String>,
    /// Takes no damage from.
    pub immunities: BTreeSet<String>,
    pub super_effective_against: BTreeSet<String>,
    pub not_very_effective_against: BTreeSet<String>,
    pub no_effect_against: BTreeSet<String>,
}

impl Record for TypeRecord {
    const KIND: DatasetKind = DatasetKind::Types;
    const HEADERS: &'static [&'static str] = &[
        "id", "name", "weaknesses", "resistances", "immunities",
        "super_effective_against", "not_very_effective_against", "no_effect_against",
    ];

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            set_cell(&self.weaknesses),
            set_cell(&self.resistances),
            set_cell(&self.immunities),
            set_cell(&self.super_effective_against),
            set_cell(&self.not_very_effective_against),
            set_cell(&self.no_effect_against),
        ]
    }

    fn from_row(row: &[String]) -> Result<Self, String> {
        let row = Cells::new(row, Self::HEADERS)?;
        let set = |i: usize| parse_list(row.get(i)).into_iter().collect::<BTreeSet<_>>();
        Ok(Self {
            id: row.req(0)?,
            name: s!(row.get(1)),
            weaknesses: set(2),
            resistances: set(3),
            immunities: set(4),
            super_effective_against: set(5),
            not_very_effective_against: set(6),
            no_effect_against: set(7),
        })
    }
}

/* ---------------- Cell helpers ---------------- */

fn opt_cell<T: Display>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn list_cell(items: &[String]) -> String {
    items.join(&LIST_SEP.to_string())
}

fn set_cell(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(&LIST_SEP.to_string())
}

fn parse_list(cell: &str) -> Vec<String> {
    cell.split(LIST_SEP).filter(|s| !s.is_empty()).map(|s| s!(s)).collect()
}

/// Row accessor with column names in error messages.
struct Cells<'a> {
    row: &'a [String],
    headers: &'static [&'static str],
}

impl<'a> Cells<'a> {
    fn new(row: &'a [String], headers: &'static [&'static str]) -> Result<Self, String> {
        if row.len() != headers.len() {
            return Err(format!("expected {} columns, found {}", headers.len(), row.len()));
        }
        Ok(Self { row, headers })
    }

    fn get(&self, i: usize) -> &'a str {
        self.row[i].as_str()
    }

    fn req<T: FromStr>(&self, i: usize) -> Result<T, String> {
        let cell = self.get(i);
        cell.parse()
            .map_err(|_| format!("column `{}`: cannot parse {cell:?}", self.headers[i]))
    }

    fn opt<T: FromStr>(&self, i: usize) -> Result<Option<T>, String> {
        if self.get(i).is_empty() { Ok(None) } else { self.req(i).map(Some) }
    }

    fn opt_str(&self, i: usize) -> Option<String> {
        Some(self.get(i)).filter(|s| !s.is_empty()).map(|s| s!(s))
    }
}
