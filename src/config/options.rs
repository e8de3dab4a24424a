// src/config/options.rs
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::core::retry::RetryPolicy;
use crate::error::ConfigError;

/// Everything a run needs, built once and passed down explicitly.
/// Layering: defaults -> JSON config file -> CLI flags / env.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub export: ExportOptions,
    pub analysis: AnalysisOptions,
}

impl AppOptions {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// An explicit path must exist; otherwise pick up `poke_scrape.json` from
    /// the working directory when present, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(p) => Self::load(p),
            None => {
                let implicit = Path::new(CONFIG_FILE);
                if implicit.is_file() {
                    log::info!("Using config file {}", implicit.display());
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fetch.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Pokemon,
    Moves,
    Types,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [DatasetKind::Pokemon, DatasetKind::Moves, DatasetKind::Types];

    /// File stem of the published dataset.
    pub fn stem(&self) -> &'static str {
        match self {
            DatasetKind::Pokemon => "pokemon",
            DatasetKind::Moves => "moves",
            DatasetKind::Types => "types",
        }
    }

    /// List endpoint the catalog is paged from.
    pub fn resource(&self) -> &'static str {
        match self {
            DatasetKind::Pokemon => POKEMON_RESOURCE,
            DatasetKind::Moves => MOVES_RESOURCE,
            DatasetKind::Types => TYPES_RESOURCE,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub base_url: String,
    pub page_size: usize,
    /// Stop after this many catalog entries (trial runs).
    pub limit: Option<usize>,
    pub timeout_secs: u64,
    pub pause_ms: u64,
    pub retry: RetryOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(API_BASE_URL),
            page_size: PAGE_SIZE,
            limit: None,
            timeout_secs: REQUEST_TIMEOUT_SECS,
            pause_ms: REQUEST_PAUSE_MS,
            retry: RetryOptions::default(),
        }
    }
}

impl FetchOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::BadBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// `base_url` with exactly one trailing slash.
    pub fn base(&self) -> String {
        join!(self.base_url.trim_end_matches('/'), "/")
    }

    /// Root of a resource list: `<base><resource>/`.
    pub fn list_url(&self, kind: DatasetKind) -> String {
        join!(&self.base(), kind.resource(), "/")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryOptions {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: RETRY_MAX_DELAY_MS,
        }
    }
}

impl RetryOptions {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub format: ExportFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR), format: ExportFormat::Csv }
    }
}

impl ExportOptions {
    /// Fixed location of a dataset: `<out_dir>/<stem>.<ext>`.
    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        self.out_dir.join(join!(kind.stem(), ".", self.format.ext()))
    }

    pub fn manifest_path(&self, kind: DatasetKind) -> PathBuf {
        manifest_path_for(&self.dataset_path(kind))
    }
}

/// `<file>.manifest.json` next to the dataset file.
pub fn manifest_path_for(data: &Path) -> PathBuf {
    let mut name = data.file_name().unwrap_or_default().to_os_string();
    name.push(MANIFEST_SUFFIX);
    data.with_file_name(name)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Names excluded from "non-legendary" rankings on top of the species flags.
    pub extra_legendaries: Vec<String>,
    pub top_n: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { extra_legendaries: Vec::new(), top_n: 10 }
    }
}
