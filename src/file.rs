// src/file.rs
//
// Dataset writer. A dataset is published in two atomic steps:
//   1. `<out>/<stem>.<ext>`                (rows, sorted by id)
//   2. `<out>/<stem>.<ext>.manifest.json`  (row count, sha256, status)
// Each file is written to a temp file in the same directory and renamed over
// the final path, so a reader never sees a half-written file. A reader that
// catches the window between the two renames sees a checksum mismatch. If the
// manifest rename fails, the previous data file is put back.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::config::options::{manifest_path_for, DatasetKind, ExportFormat, ExportOptions};
use crate::csv::write_table;
use crate::error::WriteError;
use crate::records::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    /// Every catalog entry resolved.
    Complete,
    /// The catalog was fully enumerated but some records were skipped.
    Partial,
}

/// Sidecar describing a published dataset. Contains nothing run-specific
/// (no timestamps) so reruns stay byte-identical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub dataset: DatasetKind,
    pub format: ExportFormat,
    pub rows: usize,
    pub sha256: String,
    pub status: DatasetStatus,
    pub skipped: Vec<String>,
}

/// What a successful publish produced.
#[derive(Clone, Debug)]
pub struct WrittenDataset {
    pub kind: DatasetKind,
    pub path: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

/// Serialize `records` (sorted by id) in the configured format.
pub fn render<R>(records: &[R], format: ExportFormat) -> Result<Vec<u8>, WriteError>
where
    R: Record + Serialize,
{
    let mut sorted: Vec<&R> = records.iter().collect();
    sorted.sort_by_key(|r| r.id());

    match format.delim() {
        Some(sep) => {
            let rows: Vec<Vec<String>> = sorted.iter().map(|r| r.to_row()).collect();
            let mut buf = Vec::new();
            write_table(&mut buf, &R::headers(), &rows, sep)
                .map_err(|source| WriteError::Io { path: PathBuf::from("<memory>"), source })?;
            Ok(buf)
        }
        None => {
            let mut buf = serde_json::to_vec_pretty(&sorted)
                .map_err(|source| WriteError::Serialize { what: "dataset", source })?;
            buf.push(b'\n');
            Ok(buf)
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Publish one dataset: data file first, manifest second.
/// `skipped` lists records that could not be resolved; non-empty marks the
/// dataset `partial`.
pub fn write_dataset<R>(
    export: &ExportOptions,
    records: &[R],
    skipped: &[String],
) -> Result<WrittenDataset, WriteError>
where
    R: Record + Serialize,
{
    let kind = R::KIND;
    let path = export.dataset_path(kind);
    let manifest_path = manifest_path_for(&path);

    let bytes = render(records, export.format)?;
    let manifest = Manifest {
        dataset: kind,
        format: export.format,
        rows: records.len(),
        sha256: sha256_hex(&bytes),
        status: if skipped.is_empty() { DatasetStatus::Complete } else { DatasetStatus::Partial },
        skipped: skipped.to_vec(),
    };
    let mut manifest_bytes = serde_json::to_vec_pretty(&manifest)
        .map_err(|source| WriteError::Serialize { what: "manifest", source })?;
    manifest_bytes.push(b'\n');

    publish_pair(&path, &bytes, &manifest_path, &manifest_bytes)?;

    log::info!(
        "Wrote {} {} row(s) to {} ({:?})",
        manifest.rows, kind, path.display(), manifest.status
    );

    Ok(WrittenDataset { kind, path, manifest_path, manifest })
}

/// Stage both files, then swap them in. If the manifest cannot be moved into
/// place, the previous data file is put back so the old pair still matches.
fn publish_pair(
    path: &Path,
    bytes: &[u8],
    manifest_path: &Path,
    manifest_bytes: &[u8],
) -> Result<(), WriteError> {
    let data = stage(path, |w| w.write_all(bytes))?;
    let meta = stage(manifest_path, |w| w.write_all(manifest_bytes))?;

    let backup = if path.is_file() {
        let b = temp_beside(path)?;
        fs::copy(path, b.path())
            .map_err(|source| WriteError::Io { path: path.to_path_buf(), source })?;
        Some(b)
    } else {
        None
    };

    data.persist(path)
        .map_err(|e| WriteError::Persist { path: path.to_path_buf(), source: e.error })?;

    if let Err(e) = meta.persist(manifest_path) {
        match backup {
            Some(b) => {
                if let Err(re) = b.persist(path) {
                    log::error!("could not restore {}: {}", path.display(), re.error);
                }
            }
            None => {
                if let Err(re) = fs::remove_file(path) {
                    log::error!("could not remove {}: {re}", path.display());
                }
            }
        }
        return Err(WriteError::Persist { path: manifest_path.to_path_buf(), source: e.error });
    }
    Ok(())
}

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    write_atomic_with(path, |w| w.write_all(bytes))
}

/// Stream into a temp file next to `path`, then rename it into place.
/// If `fill` fails, the temp file is removed and `path` is left untouched.
pub fn write_atomic_with<F>(path: &Path, fill: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    stage(path, fill)?
        .persist(path)
        .map_err(|e| WriteError::Persist { path: path.to_path_buf(), source: e.error })?;
    Ok(())
}

fn temp_beside(path: &Path) -> Result<NamedTempFile, WriteError> {
    let io_err = |source| WriteError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_directory(dir).map_err(io_err)?;

    tempfile::Builder::new()
        .prefix(".poke_scrape-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err)
}

/// Fully written and synced temp file, not yet visible at `path`.
fn stage<F>(path: &Path, fill: F) -> Result<NamedTempFile, WriteError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let io_err = |source| WriteError::Io { path: path.to_path_buf(), source };
    let tmp = temp_beside(path)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        fill(&mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    Ok(tmp)
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
