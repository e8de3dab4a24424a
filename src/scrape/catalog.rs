// src/scrape/catalog.rs
//
// Paginated fetcher. Walks a list endpoint page by page, following the
// server's `next` link, and yields the references on each page.

use crate::core::net::Requester;
use crate::error::{ConfigError, FetchError};
use crate::schema::ResourceList;

/// A discovered resource: what to call it and where its detail document lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CatalogReference {
    pub name: String,
    pub detail_url: String,
}

/// One successfully fetched list page.
#[derive(Clone, Debug)]
pub struct Page {
    pub references: Vec<CatalogReference>,
    /// Catalog size as reported by the server, if any.
    pub total: Option<u64>,
}

/// A list endpoint plus paging parameters. Calling `pages()` again restarts
/// from the first page.
pub struct Catalog<'r> {
    requester: &'r Requester<'r>,
    first_page: String,
    limit: Option<usize>,
}

impl<'r> Catalog<'r> {
    /// `list_url` is the resource root, e.g. `.../move/`; the first page is
    /// requested with `offset=0&limit=<page_size>`. `page_size` must be > 0.
    pub fn new(
        requester: &'r Requester<'r>,
        list_url: &str,
        page_size: usize,
        limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        let first_page = format!("{list_url}?offset=0&limit={page_size}");
        Ok(Self { requester, first_page, limit })
    }

    pub fn first_page(&self) -> &str { &self.first_page }

    pub fn pages(&self) -> Pages<'_, 'r> {
        Pages {
            catalog: self,
            next: Some(self.first_page.clone()),
            emitted: 0,
        }
    }
}

/// Lazy page iterator. Ends after the last page, after the item cap, or
/// after the first error.
pub struct Pages<'c, 'r> {
    catalog: &'c Catalog<'r>,
    next: Option<String>,
    emitted: usize,
}

impl Iterator for Pages<'_, '_> {
    type Item = Result<Page, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(limit) = self.catalog.limit {
            if self.emitted >= limit {
                self.next = None;
            }
        }
        let url = self.next.take()?;

        let list: ResourceList = match self.catalog.requester.get_json(&url) {
            Ok(list) => list,
            Err(ex) => {
                return Some(Err(FetchError::Page { url, attempts: ex.attempts, source: ex.error }));
            }
        };

        let mut references: Vec<CatalogReference> = list
            .results
            .into_iter()
            .map(|r| CatalogReference { name: r.name, detail_url: r.url })
            .collect();

        if let Some(limit) = self.catalog.limit {
            references.truncate(limit.saturating_sub(self.emitted));
        }
        self.emitted += references.len();

        // An empty page with a `next` link would loop forever on a broken server.
        self.next = match list.next {
            Some(n) if !references.is_empty() && n != url => Some(n),
            _ => None,
        };

        let total = match (list.count, self.catalog.limit) {
            (Some(c), Some(l)) => Some(c.min(l as u64)),
            (c, _) => c,
        };

        log::debug!("{url}: {} reference(s), next={:?}", references.len(), self.next);
        Some(Ok(Page { references, total }))
    }
}
