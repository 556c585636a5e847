use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use leetcode_client::LeetCodeClient;

use crate::dedup::{latest_per_slug, unique_slugs};
use crate::history::{first_available, PaginatedHistory};
use crate::traits::{GraphQlPager, HistoryProvider, LeetCodeRecent, RecentSource, RestPager};
use crate::types::{AggregatedResult, ResponseFormat, SolvedResponse, Source, Submission};

/// Combines the mandatory recent fetch with the full-history fallback chain.
pub struct Aggregator {
    recent: Arc<dyn RecentSource>,
    history: Vec<Arc<dyn HistoryProvider>>,
}

impl Aggregator {
    pub fn new(recent: Arc<dyn RecentSource>, history: Vec<Arc<dyn HistoryProvider>>) -> Self {
        Self { recent, history }
    }

    /// The LeetCode chain: recent via GraphQL, then history from the GraphQL
    /// submission list, then the public REST endpoint.
    pub fn leetcode(client: Arc<LeetCodeClient>, recent_limit: u32) -> Self {
        let recent = Arc::new(LeetCodeRecent::new(client.clone(), recent_limit));
        let history: Vec<Arc<dyn HistoryProvider>> = vec![
            Arc::new(PaginatedHistory::new("graphql-history", GraphQlPager(client.clone()))),
            Arc::new(PaginatedHistory::new("rest-history", RestPager(client))),
        ];
        Self::new(recent, history)
    }

    /// Recent accepted submissions, one per slug, newest first.
    pub async fn recent_solved(&self, username: &str) -> Result<Vec<Submission>> {
        let raw = self
            .recent
            .recent_accepted(username)
            .await
            .context("failed to fetch recent accepted submissions")?;
        Ok(latest_per_slug(raw))
    }

    /// Attach the best available full history to an already-fetched recent list.
    /// Falls back to the recent slugs when every provider fails or comes back empty.
    pub async fn with_history(&self, username: &str, recent_solved: Vec<Submission>) -> AggregatedResult {
        let (source, all_solved_slugs) = match first_available(&self.history, username).await {
            Some((_, slugs)) => (Source::Full, slugs),
            None => (
                Source::Recent,
                unique_slugs(recent_solved.iter().map(|s| s.title_slug.as_str())),
            ),
        };

        AggregatedResult::new(source, recent_solved, all_solved_slugs)
    }

    /// Run the full policy for one request.
    pub async fn solved(&self, username: &str, format: ResponseFormat) -> Result<SolvedResponse> {
        let recent_solved = self.recent_solved(username).await?;

        if format == ResponseFormat::Legacy {
            info!(username, count = recent_solved.len(), "Serving legacy recent list");
            return Ok(SolvedResponse::Legacy(recent_solved));
        }

        let result = self.with_history(username, recent_solved).await;
        info!(
            username,
            source = %result.source,
            recent = result.counts.recent_solved,
            all = result.counts.all_solved,
            "Aggregated solved problems"
        );
        Ok(SolvedResponse::V2(result))
    }
}
