// src/schema/moves.rs
use serde::Deserialize;

use super::list::NamedResource;

/// `/move/{id}`. Status moves carry `"power": null`.
#[derive(Clone, Debug, Deserialize)]
pub struct MoveDoc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
    #[serde(rename = "type", default)]
    pub kind: Option<NamedResource>,
    #[serde(default)]
    pub effect_chance: Option<u32>,
    #[serde(default)]
    pub target: Option<NamedResource>,
    #[serde(default)]
    pub generation: Option<NamedResource>,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub learned_by_pokemon: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub short_effect: Option<String>,
    pub language: NamedResource,
}
