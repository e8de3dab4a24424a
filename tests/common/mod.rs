// tests/common/mod.rs
//
// In-memory stand-in for the remote catalog. Serves paged list endpoints and
// detail documents from maps, and can be told to fail specific URLs.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::{json, Value};

use poke_scrape::config::options::AppOptions;
use poke_scrape::core::{NetError, Transport};
use poke_scrape::core::retry::RetryPolicy;

pub const BASE: &str = "http://mock.test/api/v2/";

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

#[derive(Default)]
pub struct MockApi {
    /// resource -> entries in catalog order
    lists: BTreeMap<String, Vec<(String, String)>>,
    docs: HashMap<String, String>,
    broken: HashSet<String>,
    flaky: RefCell<HashMap<String, u32>>,
    pub requests: RefCell<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a detail document and list it under `resource`.
    pub fn add(&mut self, resource: &str, name: &str, id: u32, doc: Value) -> String {
        let detail = url(&format!("{resource}/{id}/"));
        self.lists
            .entry(resource.to_string())
            .or_default()
            .push((name.to_string(), detail.clone()));
        self.docs.insert(detail.clone(), doc.to_string());
        detail
    }

    /// A document reachable by URL but not listed anywhere.
    pub fn add_doc(&mut self, path: &str, doc: Value) {
        self.docs.insert(url(path), doc.to_string());
    }

    /// Every request to `url` answers HTTP 500.
    pub fn break_url(&mut self, url: impl Into<String>) {
        self.broken.insert(url.into());
    }

    /// The next `times` requests to `url` answer HTTP 503.
    pub fn flake_url(&mut self, url: impl Into<String>, times: u32) {
        self.flaky.borrow_mut().insert(url.into(), times);
    }

    pub fn list_page_url(resource: &str, offset: usize, limit: usize) -> String {
        url(&format!("{resource}/?offset={offset}&limit={limit}"))
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }

    fn list_page(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(BASE)?;
        let (resource, query) = rest.split_once("/?")?;
        let entries = self.lists.get(resource)?;

        let mut offset = 0usize;
        let mut limit = 20usize;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("offset", v)) => offset = v.parse().ok()?,
                Some(("limit", v)) => limit = v.parse().ok()?,
                _ => {}
            }
        }

        let end = (offset + limit).min(entries.len());
        let results: Vec<Value> = entries
            .get(offset.min(entries.len())..end)
            .unwrap_or_default()
            .iter()
            .map(|(name, u)| json!({ "name": name, "url": u }))
            .collect();
        let next = if end < entries.len() {
            Value::String(Self::list_page_url(resource, end, limit))
        } else {
            Value::Null
        };
        Some(json!({ "count": entries.len(), "next": next, "previous": null, "results": results }).to_string())
    }
}

impl Transport for MockApi {
    fn get_text(&self, url: &str) -> Result<String, NetError> {
        self.requests.borrow_mut().push(url.to_string());

        if self.broken.contains(url) {
            return Err(NetError::Status { url: url.to_string(), status: 500 });
        }
        if let Some(left) = self.flaky.borrow_mut().get_mut(url) {
            if *left > 0 {
                *left -= 1;
                return Err(NetError::Status { url: url.to_string(), status: 503 });
            }
        }
        if let Some(doc) = self.docs.get(url) {
            return Ok(doc.clone());
        }
        self.list_page(url)
            .ok_or_else(|| NetError::Status { url: url.to_string(), status: 404 })
    }
}

/* ---------------- document builders ---------------- */

pub fn species_doc(id: u32, name: &str, generation: &str, legendary: bool, chain_id: Option<u32>) -> Value {
    json!({
        "id": id,
        "name": name,
        "generation": { "name": generation, "url": url("generation/1/") },
        "is_legendary": legendary,
        "is_mythical": false,
        "evolution_chain": chain_id.map(|c| json!({ "url": url(&format!("evolution-chain/{c}/")) })),
        "flavor_text_entries": [
            { "flavor_text": format!("A {name}\nin the wild."), "language": { "name": "en", "url": url("language/9/") } }
        ],
        "varieties": [
            { "is_default": true, "pokemon": { "name": name, "url": url(&format!("pokemon/{id}/")) } }
        ]
    })
}

pub fn pokemon_doc(id: u32, name: &str, types: &[&str], stats: [u32; 6]) -> Value {
    let stat_names = ["hp", "attack", "defense", "special-attack", "special-defense", "speed"];
    json!({
        "id": id,
        "name": name,
        "types": types.iter().enumerate().map(|(i, t)| json!({
            "slot": i + 1,
            "type": { "name": t, "url": url(&format!("type/{t}/")) }
        })).collect::<Vec<_>>(),
        "stats": stat_names.iter().zip(stats).map(|(n, v)| json!({
            "base_stat": v, "effort": 0, "stat": { "name": n, "url": url("stat/1/") }
        })).collect::<Vec<_>>()
    })
}

/// A linear chain: `names[0]` evolves into `names[1]`, and so on.
pub fn chain_doc(id: u32, names: &[&str]) -> Value {
    let mut link = Value::Null;
    for name in names.iter().rev() {
        let evolves_to = if link.is_null() { vec![] } else { vec![link] };
        link = json!({ "species": { "name": name, "url": url("pokemon-species/0/") }, "evolves_to": evolves_to });
    }
    json!({ "id": id, "chain": link })
}

pub fn move_doc(id: u32, name: &str, kind: &str, power: Option<u32>, class: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "accuracy": 100,
        "pp": 35,
        "priority": 0,
        "power": power,
        "damage_class": { "name": class, "url": url("move-damage-class/2/") },
        "type": { "name": kind, "url": url(&format!("type/{kind}/")) },
        "effect_chance": null,
        "target": { "name": "selected-pokemon", "url": url("move-target/10/") },
        "generation": { "name": "generation-i", "url": url("generation/1/") },
        "effect_entries": [
            { "effect": "Inflicts regular damage.", "short_effect": "Inflicts regular damage with no additional effect.", "language": { "name": "en", "url": url("language/9/") } }
        ],
        "learned_by_pokemon": []
    })
}

pub fn type_doc(id: u32, name: &str, weak_to: &[&str], resists: &[&str], immune_to: &[&str]) -> Value {
    let refs = |names: &[&str]| names.iter().map(|n| json!({ "name": n, "url": url("type/0/") })).collect::<Vec<_>>();
    json!({
        "id": id,
        "name": name,
        "damage_relations": {
            "double_damage_from": refs(weak_to),
            "half_damage_from": refs(resists),
            "no_damage_from": refs(immune_to),
            "double_damage_to": [],
            "half_damage_to": [],
            "no_damage_to": []
        }
    })
}

/// Species + pokemon doc for a single-stage Pokémon with its own chain.
pub fn add_mon(api: &mut MockApi, id: u32, name: &str, types: &[&str], stats: [u32; 6]) -> String {
    api.add_doc(&format!("pokemon/{id}/"), pokemon_doc(id, name, types, stats));
    api.add_doc(&format!("evolution-chain/{id}/"), chain_doc(id, &[name]));
    api.add("pokemon-species", name, id, species_doc(id, name, "generation-i", false, Some(id)))
}

/// A small catalog with all three resources populated.
pub fn sample_api() -> MockApi {
    let mut api = MockApi::new();

    api.add_doc("evolution-chain/1/", chain_doc(1, &["bulbasaur", "ivysaur", "venusaur"]));
    for (id, name, stats) in [
        (1, "bulbasaur", [45, 49, 49, 65, 65, 45]),
        (2, "ivysaur", [60, 62, 63, 80, 80, 60]),
        (3, "venusaur", [80, 82, 83, 100, 100, 80]),
    ] {
        api.add_doc(&format!("pokemon/{id}/"), pokemon_doc(id, name, &["grass", "poison"], stats));
        api.add("pokemon-species", name, id, species_doc(id, name, "generation-i", false, Some(1)));
    }
    api.add_doc("pokemon/150/", pokemon_doc(150, "mewtwo", &["psychic"], [106, 110, 90, 154, 90, 130]));
    api.add_doc("evolution-chain/76/", chain_doc(76, &["mewtwo"]));
    api.add("pokemon-species", "mewtwo", 150, species_doc(150, "mewtwo", "generation-i", true, Some(76)));

    api.add("move", "pound", 1, move_doc(1, "pound", "normal", Some(40), "physical"));
    api.add("move", "ember", 52, move_doc(52, "ember", "fire", Some(40), "special"));
    api.add("move", "growl", 45, move_doc(45, "growl", "normal", None, "status"));
    api.add("move", "tackle", 33, move_doc(33, "tackle", "normal", Some(40), "physical"));

    api.add("type", "normal", 1, type_doc(1, "normal", &["fighting"], &[], &["ghost"]));
    api.add("type", "fire", 10, type_doc(10, "fire", &["water", "ground", "rock"], &["fire", "grass"], &[]));
    api.add("type", "grass", 12, type_doc(12, "grass", &["fire", "ice", "poison", "flying", "bug"], &["water", "grass"], &[]));

    api
}

/// Options pointed at the mock, writing into `out_dir`, with no waiting.
pub fn mock_options(out_dir: &std::path::Path, page_size: usize) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.fetch.base_url = BASE.to_string();
    opts.fetch.page_size = page_size;
    opts.fetch.pause_ms = 0;
    opts.fetch.retry.max_attempts = 3;
    opts.fetch.retry.base_delay_ms = 0;
    opts.fetch.retry.max_delay_ms = 0;
    opts.export.out_dir = out_dir.to_path_buf();
    opts
}

pub fn no_wait(attempts: u32) -> RetryPolicy {
    RetryPolicy::immediate(attempts)
}
