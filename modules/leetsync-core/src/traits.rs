// Trait seams for the upstream sources.
//
// RecentSource is the mandatory recent-activity fetch.
// HistoryProvider is one link of the full-history fallback chain.
// SubmissionPager is a single page of history, driven by the pagination loop.
//
// The LeetCode-backed implementations live alongside the traits; mocks live in
// `testing`.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use leetcode_client::{LeetCodeClient, SubmissionPage};

use crate::types::Submission;

// ---------------------------------------------------------------------------
// RecentSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RecentSource: Send + Sync {
    /// Raw recent accepted submissions. May contain duplicates.
    async fn recent_accepted(&self, username: &str) -> Result<Vec<Submission>>;
}

/// `recentAcSubmissionList` over GraphQL.
pub struct LeetCodeRecent {
    client: Arc<LeetCodeClient>,
    limit: u32,
}

impl LeetCodeRecent {
    pub fn new(client: Arc<LeetCodeClient>, limit: u32) -> Self {
        Self { client, limit }
    }
}

#[async_trait]
impl RecentSource for LeetCodeRecent {
    async fn recent_accepted(&self, username: &str) -> Result<Vec<Submission>> {
        let list = self.client.recent_accepted(username, self.limit).await?;
        Ok(list.into_iter().map(Submission::from).collect())
    }
}

// ---------------------------------------------------------------------------
// HistoryProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Every accepted slug in the user's history. An empty set means the
    /// provider had nothing to offer and the next one should be tried.
    async fn fetch(&self, username: &str) -> Result<BTreeSet<String>>;
}

// ---------------------------------------------------------------------------
// SubmissionPager
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SubmissionPager: Send + Sync {
    async fn page(&self, username: &str, offset: u32, limit: u32) -> Result<SubmissionPage>;
}

/// GraphQL `submissionList` pages.
pub struct GraphQlPager(pub Arc<LeetCodeClient>);

#[async_trait]
impl SubmissionPager for GraphQlPager {
    async fn page(&self, username: &str, offset: u32, limit: u32) -> Result<SubmissionPage> {
        Ok(self.0.graphql_submission_page(username, offset, limit).await?)
    }
}

/// Public `/api/submissions/{username}/` pages.
pub struct RestPager(pub Arc<LeetCodeClient>);

#[async_trait]
impl SubmissionPager for RestPager {
    async fn page(&self, username: &str, offset: u32, limit: u32) -> Result<SubmissionPage> {
        Ok(self.0.rest_submission_page(username, offset, limit).await?)
    }
}
