use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use leetcode_client::RecentAcSubmission;

/// An accepted submission, keyed by `title_slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub title: String,
    pub title_slug: String,
    /// Epoch seconds.
    pub timestamp: i64,
}

impl From<RecentAcSubmission> for Submission {
    fn from(sub: RecentAcSubmission) -> Self {
        Self {
            title: sub.title,
            title_slug: sub.title_slug,
            timestamp: sub.timestamp,
        }
    }
}

/// Which strategy produced `all_solved_slugs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Derived from the recent-activity list only.
    Recent,
    /// Complete paginated history from one of the history providers.
    Full,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Recent => write!(f, "recent"),
            Source::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub recent_solved: usize,
    pub all_solved: usize,
}

/// The v2 response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub source: Source,
    pub recent_solved: Vec<Submission>,
    pub all_solved_slugs: BTreeSet<String>,
    pub counts: Counts,
}

impl AggregatedResult {
    /// Build a result, deriving `counts` from the collections so they can't drift.
    pub fn new(source: Source, recent_solved: Vec<Submission>, all_solved_slugs: BTreeSet<String>) -> Self {
        let counts = Counts {
            recent_solved: recent_solved.len(),
            all_solved: all_solved_slugs.len(),
        };
        Self {
            source,
            recent_solved,
            all_solved_slugs,
            counts,
        }
    }
}

/// Requested response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Bare array of recent submissions, kept for older clients.
    #[default]
    Legacy,
    /// Full [`AggregatedResult`] object.
    V2,
}

/// What the endpoint returns, shaped by [`ResponseFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SolvedResponse {
    Legacy(Vec<Submission>),
    V2(AggregatedResult),
}
