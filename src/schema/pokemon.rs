// src/schema/pokemon.rs
use serde::Deserialize;

use super::list::{ApiResource, NamedResource};

/// `/pokemon-species/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct SpeciesDoc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub generation: Option<NamedResource>,
    #[serde(default)]
    pub is_legendary: Option<bool>,
    #[serde(default)]
    pub is_mythical: Option<bool>,
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub varieties: Vec<Variety>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Variety {
    pub is_default: bool,
    pub pokemon: NamedResource,
}

impl SpeciesDoc {
    /// The default form's `/pokemon/{id}` reference.
    pub fn default_variety(&self) -> Option<&NamedResource> {
        self.varieties
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.varieties.first())
            .map(|v| &v.pokemon)
    }
}

/// `/pokemon/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct PokemonDoc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// `/evolution-chain/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct EvolutionChainDoc {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    /// 1-based stage of `species` within this chain and whether nothing
    /// evolves from it.
    pub fn stage_of(&self, species: &str) -> Option<(u8, bool)> {
        self.stage_at(species, 1)
    }

    fn stage_at(&self, species: &str, depth: u8) -> Option<(u8, bool)> {
        if self.species.name == species {
            return Some((depth, self.evolves_to.is_empty()));
        }
        self.evolves_to
            .iter()
            .find_map(|next| next.stage_at(species, depth.saturating_add(1)))
    }
}
