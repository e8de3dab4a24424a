// src/error.rs
//
// Error taxonomy for the acquisition pipeline.
//
// - FetchError:   a list page could not be retrieved. Fatal for the run.
// - ResolveError: one detail record could not be built. Skipped and logged.
// - WriteError:   output I/O failed before the final rename. Fatal.
// - LoadError:    consumer side; the published dataset failed validation.

use std::io;
use std::path::PathBuf;

use crate::core::net::NetError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("max attempts must be at least 1")]
    ZeroAttempts,
    #[error("base URL must start with http:// or https:// (got {0:?})")]
    BadBaseUrl(String),
    #[error("could not read config file {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("invalid config file {path}: {source}")]
    Parse { path: PathBuf, #[source] source: serde_json::Error },
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("catalog page {url} failed after {attempts} attempt(s): {source}")]
    Page {
        url: String,
        attempts: u32,
        #[source]
        source: NetError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{name}: fetching {url} failed after {attempts} attempt(s): {source}")]
    Fetch {
        name: String,
        url: String,
        attempts: u32,
        #[source]
        source: NetError,
    },
    #[error("{name}: required field `{field}` missing from detail document")]
    Missing { name: String, field: &'static str },
    #[error("{name}: {msg}")]
    Invalid { name: String, msg: String },
}

impl ResolveError {
    /// Name of the record that failed, for the skip log and the manifest.
    pub fn record_name(&self) -> &str {
        match self {
            ResolveError::Fetch { name, .. }
            | ResolveError::Missing { name, .. }
            | ResolveError::Invalid { name, .. } => name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error writing {path}: {source}")]
    Io { path: PathBuf, #[source] source: io::Error },
    #[error("could not move finished file into place at {path}: {source}")]
    Persist { path: PathBuf, #[source] source: io::Error },
    #[error("could not serialize {what}: {source}")]
    Serialize { what: &'static str, #[source] source: serde_json::Error },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    Io { path: PathBuf, #[source] source: io::Error },
    #[error("no manifest next to {path}; dataset was never published or is incomplete")]
    MissingManifest { path: PathBuf },
    #[error("manifest {path} is invalid: {source}")]
    Manifest { path: PathBuf, #[source] source: serde_json::Error },
    #[error("{path} does not match its manifest checksum")]
    Digest { path: PathBuf },
    #[error("{path} has {found} rows, manifest says {expected}")]
    RowCount { path: PathBuf, expected: usize, found: usize },
    #[error("{path}: unexpected header row {found:?}")]
    Header { path: PathBuf, found: Vec<String> },
    #[error("{path} row {row}: {msg}")]
    Row { path: PathBuf, row: usize, msg: String },
    #[error("{path}: invalid JSON dataset: {source}")]
    Json { path: PathBuf, #[source] source: serde_json::Error },
}

/// Fatal errors that end a pipeline run with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
