// src/runner.rs
use serde::Serialize;

use crate::{
    config::options::{AppOptions, DatasetKind},
    core::{Requester, Transport},
    error::PipelineError,
    file::{self, WrittenDataset},
    progress::Progress,
    records::Record,
    scrape::{self, Collected},
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<WrittenDataset>,
}

impl RunSummary {
    pub fn skipped_total(&self) -> usize {
        self.written.iter().map(|w| w.manifest.skipped.len()).sum()
    }
}

/// Download and publish each dataset in `kinds`, in order.
///
/// Datasets are independent: one that was already written stays written if a
/// later one fails, but the failing one never touches its output file.
pub fn run(
    opts: &AppOptions,
    kinds: &[DatasetKind],
    transport: &dyn Transport,
    progress: &mut dyn Progress,
) -> Result<RunSummary, PipelineError> {
    opts.validate()?;
    let requester = Requester::new(transport, opts.fetch.retry.policy());

    let mut summary = RunSummary::default();
    for &kind in kinds {
        progress.log(&format!("Downloading {kind}…"));
        let written = run_kind(opts, kind, &requester, progress)?;
        summary.written.push(written);
    }
    Ok(summary)
}

pub fn run_kind(
    opts: &AppOptions,
    kind: DatasetKind,
    requester: &Requester<'_>,
    progress: &mut dyn Progress,
) -> Result<WrittenDataset, PipelineError> {
    match kind {
        DatasetKind::Pokemon => {
            publish(opts, scrape::collect_pokemon(requester, &opts.fetch, progress)?)
        }
        DatasetKind::Moves => {
            publish(opts, scrape::collect_moves(requester, &opts.fetch, progress)?)
        }
        DatasetKind::Types => {
            publish(opts, scrape::collect_types(requester, &opts.fetch, progress)?)
        }
    }
}

fn publish<R: Record + Serialize>(
    opts: &AppOptions,
    collected: Collected<R>,
) -> Result<WrittenDataset, PipelineError> {
    if !collected.is_complete() {
        log::warn!(
            "{}: {} record(s) skipped: {}",
            R::KIND,
            collected.skipped.len(),
            collected.skipped.join(", ")
        );
    }
    Ok(file::write_dataset(&opts.export, &collected.records, &collected.skipped)?)
}
