// src/store.rs
//
// Consumer side of the dataset contract: load a published dataset, refuse it
// if it does not match its manifest, and parse the rows back into records.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::options::{manifest_path_for, ExportFormat, ExportOptions};
use crate::csv::parse_rows;
use crate::error::LoadError;
use crate::file::{sha256_hex, DatasetStatus, Manifest};
use crate::records::Record;

/// Headers + rows as stored on disk.
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

pub struct Loaded<R> {
    pub records: Vec<R>,
    pub manifest: Manifest,
}

pub fn load_manifest(data_path: &Path) -> Result<Manifest, LoadError> {
    let path = manifest_path_for(data_path);
    if !path.is_file() {
        return Err(LoadError::MissingManifest { path: data_path.to_path_buf() });
    }
    let text = fs::read_to_string(&path)
        .map_err(|source| LoadError::Io { path: path.clone(), source })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Manifest { path, source })
}

/// Read the raw bytes of a dataset and check them against the manifest.
fn read_verified(data_path: &Path) -> Result<(Vec<u8>, Manifest), LoadError> {
    let manifest = load_manifest(data_path)?;
    let bytes = fs::read(data_path)
        .map_err(|source| LoadError::Io { path: data_path.to_path_buf(), source })?;
    if sha256_hex(&bytes) != manifest.sha256 {
        return Err(LoadError::Digest { path: data_path.to_path_buf() });
    }
    if manifest.status == DatasetStatus::Partial {
        log::warn!(
            "{} is partial: {} record(s) were skipped during download ({})",
            data_path.display(),
            manifest.skipped.len(),
            manifest.skipped.join(", ")
        );
    }
    Ok((bytes, manifest))
}

/// Load a delimited dataset as a raw table.
pub fn load_table(data_path: &Path, sep: char) -> Result<(DataSet, Manifest), LoadError> {
    let (bytes, manifest) = read_verified(data_path)?;
    let text = String::from_utf8_lossy(&bytes);
    let mut rows = parse_rows(&text, sep);
    let headers = if rows.is_empty() { None } else { Some(rows.remove(0)) };
    if rows.len() != manifest.rows {
        return Err(LoadError::RowCount {
            path: data_path.to_path_buf(),
            expected: manifest.rows,
            found: rows.len(),
        });
    }
    Ok((DataSet { headers, rows }, manifest))
}

/// Load and parse a dataset of `R` from its fixed location.
pub fn load_records<R>(export: &ExportOptions) -> Result<Loaded<R>, LoadError>
where
    R: Record + DeserializeOwned,
{
    let path = export.dataset_path(R::KIND);
    load_records_from(&path, export.format)
}

pub fn load_records_from<R>(path: &Path, format: ExportFormat) -> Result<Loaded<R>, LoadError>
where
    R: Record + DeserializeOwned,
{
    match format.delim() {
        Some(sep) => {
            let (ds, manifest) = load_table(path, sep)?;
            let expected = R::headers();
            match ds.headers {
                Some(h) if h == expected => {}
                other => {
                    return Err(LoadError::Header {
                        path: path.to_path_buf(),
                        found: other.unwrap_or_default(),
                    });
                }
            }
            let records = ds
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    R::from_row(row).map_err(|msg| LoadError::Row {
                        path: path.to_path_buf(),
                        row: i + 1,
                        msg,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Loaded { records, manifest })
        }
        None => {
            let (bytes, manifest) = read_verified(path)?;
            let records: Vec<R> = serde_json::from_slice(&bytes)
                .map_err(|source| LoadError::Json { path: path.to_path_buf(), source })?;
            if records.len() != manifest.rows {
                return Err(LoadError::RowCount {
                    path: path.to_path_buf(),
                    expected: manifest.rows,
                    found: records.len(),
                });
            }
            Ok(Loaded { records, manifest })
        }
    }
}
