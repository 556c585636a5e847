use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::dedup::unique_slugs;
use crate::traits::{HistoryProvider, SubmissionPager};

/// Rows requested per history page.
pub const PAGE_SIZE: u32 = 20;

/// Upper bound on pages fetched from one provider, in case upstream never
/// stops reporting `hasNext`.
pub const MAX_PAGES: u32 = 500;

/// Walk a pager until it reports no further pages, returns an empty page, or
/// [`MAX_PAGES`] is reached, collecting accepted slugs.
///
/// An error on any page aborts the walk; partial results are discarded so the
/// caller falls through to the next provider.
pub async fn collect_accepted<P>(pager: &P, username: &str) -> Result<BTreeSet<String>>
where
    P: SubmissionPager + ?Sized,
{
    let mut slugs = BTreeSet::new();
    let mut offset = 0;
    let mut pages = 0;
    let mut finished = false;

    while pages < MAX_PAGES {
        let page = pager.page(username, offset, PAGE_SIZE).await?;
        pages += 1;

        if page.submissions.is_empty() {
            finished = true;
            break;
        }
        slugs.extend(unique_slugs(page.accepted_slugs()));
        debug!(username, pages, offset, accepted = slugs.len(), "Fetched history page");

        if !page.has_next {
            finished = true;
            break;
        }
        offset += PAGE_SIZE;
    }

    if !finished {
        warn!(username, pages, "History pagination hit page cap");
    }

    Ok(slugs)
}

/// A [`HistoryProvider`] backed by a paginated source.
pub struct PaginatedHistory<P> {
    name: &'static str,
    pager: P,
}

impl<P> PaginatedHistory<P> {
    pub fn new(name: &'static str, pager: P) -> Self {
        Self { name, pager }
    }
}

#[async_trait]
impl<P: SubmissionPager> HistoryProvider for PaginatedHistory<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, username: &str) -> Result<BTreeSet<String>> {
        collect_accepted(&self.pager, username).await
    }
}

/// Try each provider in order and return the first non-empty slug set along
/// with the provider's name. Failures are logged and skipped.
pub async fn first_available(
    providers: &[Arc<dyn HistoryProvider>],
    username: &str,
) -> Option<(&'static str, BTreeSet<String>)> {
    for provider in providers {
        match provider.fetch(username).await {
            Ok(slugs) if !slugs.is_empty() => {
                info!(username, provider = provider.name(), count = slugs.len(), "History provider succeeded");
                return Some((provider.name(), slugs));
            }
            Ok(_) => {
                info!(username, provider = provider.name(), "History provider returned nothing");
            }
            Err(e) => {
                warn!(username, provider = provider.name(), error = %e, "History provider failed");
            }
        }
    }
    None
}
