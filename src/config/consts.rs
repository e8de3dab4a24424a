// src/config/consts.rs

// Net config
pub const API_BASE_URL: &str = "https://pokeapi.co/api/v2/";
pub const USER_AGENT: &str = concat!("poke_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Paging
pub const PAGE_SIZE: usize = 100;

// Retry
pub const MAX_ATTEMPTS: u32 = 5;
pub const RETRY_BASE_DELAY_MS: u64 = 500;
pub const RETRY_MAX_DELAY_MS: u64 = 10_000;

// Sequential pacing
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Local cache / logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_FILE: &str = "poke_scrape.json";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

// Remote resource names (path segment under the API base)
pub const POKEMON_RESOURCE: &str = "pokemon-species";
pub const MOVES_RESOURCE: &str = "move";
pub const TYPES_RESOURCE: &str = "type";
