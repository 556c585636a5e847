// Test mocks for the aggregation pipeline.
//
// Three mocks matching the three trait boundaries:
// - MockRecentSource (RecentSource) — fixed list or failure
// - MockHistoryProvider (HistoryProvider) — fixed slug set or failure, counts calls
// - ScriptedPager (SubmissionPager) — pages served in order, records offsets

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use leetcode_client::{PageSubmission, SubmissionPage};

use crate::traits::{HistoryProvider, RecentSource, SubmissionPager};
use crate::types::Submission;

/// Shorthand for a [`Submission`] whose title is derived from the slug.
pub fn submission(slug: &str, timestamp: i64) -> Submission {
    Submission {
        title: slug.replace('-', " "),
        title_slug: slug.to_string(),
        timestamp,
    }
}

/// Build a history page from `(slug, status)` rows.
pub fn page(rows: &[(&str, &str)], has_next: bool) -> SubmissionPage {
    SubmissionPage {
        submissions: rows
            .iter()
            .map(|(slug, status)| PageSubmission {
                title_slug: slug.to_string(),
                status_display: status.to_string(),
            })
            .collect(),
        has_next,
    }
}

// ---------------------------------------------------------------------------
// MockRecentSource
// ---------------------------------------------------------------------------

pub struct MockRecentSource {
    submissions: Option<Vec<Submission>>,
    calls: AtomicUsize,
}

impl MockRecentSource {
    pub fn returning(submissions: Vec<Submission>) -> Self {
        Self {
            submissions: Some(submissions),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            submissions: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecentSource for MockRecentSource {
    async fn recent_accepted(&self, username: &str) -> Result<Vec<Submission>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.submissions {
            Some(subs) => Ok(subs.clone()),
            None => bail!("MockRecentSource: upstream unavailable for {username}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockHistoryProvider
// ---------------------------------------------------------------------------

pub struct MockHistoryProvider {
    name: &'static str,
    slugs: Option<BTreeSet<String>>,
    calls: AtomicUsize,
}

impl MockHistoryProvider {
    pub fn returning(name: &'static str, slugs: &[&str]) -> Self {
        Self {
            name,
            slugs: Some(slugs.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            slugs: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryProvider for MockHistoryProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, username: &str) -> Result<BTreeSet<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.slugs {
            Some(slugs) => Ok(slugs.clone()),
            None => bail!("MockHistoryProvider({}): failed for {username}", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedPager
// ---------------------------------------------------------------------------

/// Serves pages in order. Running past the script is an error unless the
/// pager was built with [`ScriptedPager::endless`].
pub struct ScriptedPager {
    pages: Vec<SubmissionPage>,
    repeat: Option<SubmissionPage>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedPager {
    pub fn new(pages: Vec<SubmissionPage>) -> Self {
        Self {
            pages,
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the same page forever.
    pub fn endless(page: SubmissionPage) -> Self {
        Self {
            pages: Vec::new(),
            repeat: Some(page),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn offsets(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(o, _)| *o).collect()
    }

    pub fn limits(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(_, l)| *l).collect()
    }
}

#[async_trait]
impl SubmissionPager for ScriptedPager {
    async fn page(&self, _username: &str, offset: u32, limit: u32) -> Result<SubmissionPage> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((offset, limit));
            requests.len() - 1
        };

        if let Some(page) = self.pages.get(index) {
            return Ok(page.clone());
        }
        match &self.repeat {
            Some(page) => Ok(page.clone()),
            None => bail!("ScriptedPager: no page scripted for request {index}"),
        }
    }
}
