// src/schema/types.rs
use serde::Deserialize;

use super::list::NamedResource;

/// `/type/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct TypeDoc {
    pub id: u32,
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DamageRelations {
    pub double_damage_from: Vec<NamedResource>,
    pub half_damage_from: Vec<NamedResource>,
    pub no_damage_from: Vec<NamedResource>,
    pub double_damage_to: Vec<NamedResource>,
    pub half_damage_to: Vec<NamedResource>,
    pub no_damage_to: Vec<NamedResource>,
}
