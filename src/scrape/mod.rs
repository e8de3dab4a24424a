// src/scrape/mod.rs
pub mod catalog;
pub mod resolve;

use std::collections::HashSet;

use crate::{
    config::options::{DatasetKind, FetchOptions},
    core::net::Requester,
    error::{ConfigError, FetchError},
    progress::Progress,
    records::{MoveRecord, PokemonRecord, TypeRecord},
};

pub use catalog::{Catalog, CatalogReference, Page, Pages};
pub use resolve::{MoveResolver, PokemonResolver, Resolve, TypeResolver};

/// Records resolved from one catalog, plus the names that had to be skipped.
#[derive(Debug)]
pub struct Collected<T> {
    pub records: Vec<T>,
    pub skipped: Vec<String>,
}

impl<T> Collected<T> {
    pub fn is_complete(&self) -> bool { self.skipped.is_empty() }
}

/// Walk every page of `catalog` and resolve each distinct reference.
///
/// A page failure aborts the whole collection (nothing is returned, so nothing
/// gets written). A record failure is logged, reported to `progress`, and
/// remembered in `skipped`.
pub fn collect<R: Resolve>(
    catalog: &Catalog<'_>,
    resolver: &mut R,
    progress: &mut dyn Progress,
) -> Result<Collected<R::Output>, FetchError> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut started = false;

    for page in catalog.pages() {
        let page = match page {
            Ok(p) => p,
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        };

        if !started {
            let total = page.total.map_or(page.references.len(), |t| t as usize);
            progress.begin(total);
            started = true;
        }

        for reference in page.references {
            if !seen.insert(reference.detail_url.clone()) {
                log::warn!(
                    "{}: duplicate catalog entry {} ignored",
                    reference.name, reference.detail_url
                );
                continue;
            }

            match resolver.resolve(&reference) {
                Ok(rec) => {
                    progress.item_done(&reference.name);
                    records.push(rec);
                }
                Err(e) => {
                    log::error!("Skipping {}: {e}", e.record_name());
                    progress.item_failed(&reference.name, &e.to_string());
                    skipped.push(reference.name);
                }
            }
        }
    }

    if !started {
        progress.begin(0);
    }
    progress.finish();
    Ok(Collected { records, skipped })
}

fn catalog_for<'r>(
    requester: &'r Requester<'r>,
    opts: &FetchOptions,
    kind: DatasetKind,
) -> Result<Catalog<'r>, ConfigError> {
    Catalog::new(requester, &opts.list_url(kind), opts.page_size, opts.limit)
}

pub fn collect_pokemon(
    requester: &Requester<'_>,
    opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<Collected<PokemonRecord>, crate::error::PipelineError> {
    let catalog = catalog_for(requester, opts, DatasetKind::Pokemon)?;
    let mut resolver = PokemonResolver::new(requester);
    Ok(collect(&catalog, &mut resolver, progress)?)
}

pub fn collect_moves(
    requester: &Requester<'_>,
    opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<Collected<MoveRecord>, crate::error::PipelineError> {
    let catalog = catalog_for(requester, opts, DatasetKind::Moves)?;
    let mut resolver = MoveResolver::new(requester);
    Ok(collect(&catalog, &mut resolver, progress)?)
}

pub fn collect_types(
    requester: &Requester<'_>,
    opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<Collected<TypeRecord>, crate::error::PipelineError> {
    let catalog = catalog_for(requester, opts, DatasetKind::Types)?;
    let mut resolver = TypeResolver::new(requester);
    Ok(collect(&catalog, &mut resolver, progress)?)
}
