// src/scrape/resolve.rs
//
// Detail resolvers: one catalog reference in, one typed record out.
//
// Fetching and extraction are split: the `*_record` functions are pure and
// work on already-decoded documents, so they can be tested offline against
// captured JSON. The resolvers add the network (and retry) around them.

use std::collections::{BTreeSet, HashMap};

use crate::core::net::Requester;
use crate::core::sanitize::{clean_flavor_text, generation_number};
use crate::error::ResolveError;
use crate::records::{BaseStats, MoveRecord, PokemonRecord, Record, TypeRecord};
use crate::schema::NamedResource;
use crate::schema::moves::MoveDoc;
use crate::schema::pokemon::{ChainLink, EvolutionChainDoc, PokemonDoc, SpeciesDoc};
use crate::schema::types::TypeDoc;

use super::catalog::CatalogReference;

const LANG: &str = "en";

pub trait Resolve {
    type Output: Record;
    fn resolve(&mut self, reference: &CatalogReference) -> Result<Self::Output, ResolveError>;
}

fn fetch<T: serde::de::DeserializeOwned>(
    requester: &Requester<'_>,
    name: &str,
    url: &str,
) -> Result<T, ResolveError> {
    requester.get_json(url).map_err(|ex| ResolveError::Fetch {
        name: s!(name),
        url: s!(url),
        attempts: ex.attempts,
        source: ex.error,
    })
}

/* ---------------- Pokémon ---------------- */

/// Resolves `pokemon-species` references. Evolution chains are shared by
/// every member of a family, so they are cached per chain URL for the run.
pub struct PokemonResolver<'r> {
    requester: &'r Requester<'r>,
    chains: HashMap<String, ChainLink>,
}

impl<'r> PokemonResolver<'r> {
    pub fn new(requester: &'r Requester<'r>) -> Self {
        Self { requester, chains: HashMap::new() }
    }

    fn chain(&mut self, name: &str, url: &str) -> Result<&ChainLink, ResolveError> {
        if !self.chains.contains_key(url) {
            let doc: EvolutionChainDoc = fetch(self.requester, name, url)?;
            self.chains.insert(s!(url), doc.chain);
        }
        self.chains.get(url).ok_or_else(|| ResolveError::Invalid {
            name: s!(name),
            msg: format!("evolution chain {url} vanished from cache"),
        })
    }
}

impl Resolve for PokemonResolver<'_> {
    type Output = PokemonRecord;

    fn resolve(&mut self, reference: &CatalogReference) -> Result<PokemonRecord, ResolveError> {
        let name = reference.name.as_str();
        let species: SpeciesDoc = fetch(self.requester, name, &reference.detail_url)?;

        let variety = species
            .default_variety()
            .ok_or(ResolveError::Missing { name: s!(name), field: "varieties" })?;
        let pokemon: PokemonDoc = fetch(self.requester, name, &variety.url)?;

        let chain = match species.evolution_chain.as_ref().map(|c| c.url.clone()) {
            Some(url) => match self.chain(name, &url) {
                Ok(chain) => Some(chain),
                Err(e) => {
                    log::warn!("{name}: keeping record without evolution data: {e}");
                    None
                }
            },
            None => {
                log::debug!("{name}: species has no evolution chain");
                None
            }
        };

        pokemon_record(&species, &pokemon, chain)
    }
}

/// Build a Pokémon record from its species, default-variety and chain documents.
pub fn pokemon_record(
    species: &SpeciesDoc,
    pokemon: &PokemonDoc,
    chain: Option<&ChainLink>,
) -> Result<PokemonRecord, ResolveError> {
    let name = pokemon.name.as_str();

    let base_stats = base_stats(name, &pokemon.stats)?;

    let mut slots: Vec<_> = pokemon.types.iter().collect();
    slots.sort_by_key(|t| t.slot);
    let mut types: Vec<String> = Vec::with_capacity(2);
    for slot in slots {
        if !types.contains(&slot.kind.name) {
            types.push(slot.kind.name.clone());
        }
    }
    if types.is_empty() {
        return Err(ResolveError::Missing { name: s!(name), field: "types" });
    }
    if types.len() > 2 {
        return Err(ResolveError::Invalid {
            name: s!(name),
            msg: format!("{} types, at most two are supported: {}", types.len(), types.join(", ")),
        });
    }

    let generation = species.generation.as_ref().and_then(|g| {
        let n = generation_number(&g.name);
        if n.is_none() {
            log::warn!("{name}: unrecognised generation name {:?}", g.name);
        }
        n
    });

    let (stage, is_fully_evolved) = match chain.map(|c| c.stage_of(&species.name)) {
        Some(Some((stage, last))) => (Some(stage), Some(last)),
        Some(None) => {
            log::warn!("{name}: species {} not found in its evolution chain", species.name);
            (None, None)
        }
        None => (None, None),
    };

    Ok(PokemonRecord {
        id: species.id,
        name: s!(name),
        species: species.name.clone(),
        generation,
        types,
        base_stats,
        stage,
        is_fully_evolved,
        is_legendary: species.is_legendary,
        is_mythical: species.is_mythical,
        dex_entry: dex_entry(species),
    })
}

fn base_stats(name: &str, stats: &[crate::schema::pokemon::StatEntry]) -> Result<BaseStats, ResolveError> {
    let get = |stat: &'static str| {
        stats
            .iter()
            .find(|s| s.stat.name == stat)
            .map(|s| s.base_stat)
            .ok_or(ResolveError::Missing { name: s!(name), field: stat })
    };
    Ok(BaseStats::new(
        get("hp")?,
        get("attack")?,
        get("defense")?,
        get("special-attack")?,
        get("special-defense")?,
        get("speed")?,
    ))
}

/// First English flavor text; falls back to the first entry in any language.
fn dex_entry(species: &SpeciesDoc) -> Option<String> {
    let entries = &species.flavor_text_entries;
    let pick = entries.iter().find(|e| e.language.name == LANG).or_else(|| {
        let first = entries.first();
        if let Some(e) = first {
            log::debug!("{}: no English dex entry, using {}", species.name, e.language.name);
        }
        first
    })?;
    Some(clean_flavor_text(&pick.flavor_text)).filter(|s| !s.is_empty())
}

/* ---------------- Moves ---------------- */

pub struct MoveResolver<'r> {
    requester: &'r Requester<'r>,
}

impl<'r> MoveResolver<'r> {
    pub fn new(requester: &'r Requester<'r>) -> Self {
        Self { requester }
    }
}

impl Resolve for MoveResolver<'_> {
    type Output = MoveRecord;

    fn resolve(&mut self, reference: &CatalogReference) -> Result<MoveRecord, ResolveError> {
        let doc: MoveDoc = fetch(self.requester, &reference.name, &reference.detail_url)?;
        move_record(&doc)
    }
}

pub fn move_record(doc: &MoveDoc) -> Result<MoveRecord, ResolveError> {
    let name = doc.name.as_str();
    let kind = doc
        .kind
        .as_ref()
        .ok_or(ResolveError::Missing { name: s!(name), field: "type" })?;
    let damage_class = doc
        .damage_class
        .as_ref()
        .ok_or(ResolveError::Missing { name: s!(name), field: "damage_class" })?;

    Ok(MoveRecord {
        id: doc.id,
        name: s!(name),
        kind: kind.name.clone(),
        power: doc.power,
        damage_class: damage_class.name.clone(),
        accuracy: doc.accuracy,
        pp: doc.pp,
        priority: doc.priority,
        effect_chance: doc.effect_chance,
        target: doc.target.as_ref().map(|t| t.name.clone()),
        generation: doc.generation.as_ref().and_then(|g| generation_number(&g.name)),
        effect: move_effect(doc),
        learned_by: doc.learned_by_pokemon.iter().map(|p| p.name.clone()).collect(),
    })
}

/// English short effect, then long effect, then the first entry of any language.
/// `$effect_chance` is filled in when the chance is known.
fn move_effect(doc: &MoveDoc) -> Option<String> {
    let text_of = |e: &crate::schema::moves::EffectEntry| {
        e.short_effect
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| e.effect.clone().filter(|s| !s.trim().is_empty()))
    };
    let text = doc
        .effect_entries
        .iter()
        .filter(|e| e.language.name == LANG)
        .find_map(text_of)
        .or_else(|| doc.effect_entries.iter().find_map(text_of))?;

    let text = match doc.effect_chance {
        Some(chance) => text.replace("$effect_chance", &chance.to_string()),
        None => text,
    };
    Some(clean_flavor_text(&text))
}

/* ---------------- Types ---------------- */

pub struct TypeResolver<'r> {
    requester: &'r Requester<'r>,
}

impl<'r> TypeResolver<'r> {
    pub fn new(requester: &'r Requester<'r>) -> Self {
        Self { requester }
    }
}

impl Resolve for TypeResolver<'_> {
    type Output = TypeRecord;

    fn resolve(&mut self, reference: &CatalogReference) -> Result<TypeRecord, ResolveError> {
        let doc: TypeDoc = fetch(self.requester, &reference.name, &reference.detail_url)?;
        Ok(type_record(&doc))
    }
}

pub fn type_record(doc: &TypeDoc) -> TypeRecord {
    fn names(list: &[NamedResource]) -> BTreeSet<String> {
        list.iter().map(|r| r.name.clone()).collect()
    }
    let rel = &doc.damage_relations;
    TypeRecord {
        id: doc.id,
        name: doc.name.clone(),
        weaknesses: names(&rel.double_damage_from),
        resistances: names(&rel.half_damage_from),
        immunities: names(&rel.no_damage_from),
        super_effective_against: names(&rel.double_damage_to),
        not_very_effective_against: names(&rel.half_damage_to),
        no_effect_against: names(&rel.no_damage_to),
    }
}
