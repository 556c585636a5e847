use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Judge status string LeetCode reports for a passing submission.
pub const ACCEPTED: &str = "Accepted";

// --- GraphQL wire types ---

/// Body of a GraphQL POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// Standard GraphQL response envelope. `data` is kept untyped so missing or
/// null fields degrade to empty results instead of failing the whole call.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlEnvelope {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(default)]
    pub message: String,
}

// --- Recent accepted submissions ---

/// One entry of `recentAcSubmissionList`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAcSubmission {
    #[serde(default)]
    pub title: String,
    pub title_slug: String,
    /// Epoch seconds. The GraphQL API sends these as strings.
    #[serde(default, deserialize_with = "epoch_seconds")]
    pub timestamp: i64,
}

impl RecentAcSubmission {
    /// Extract the list from a `data` object. Anything other than an array
    /// yields an empty list; entries that don't carry a slug are skipped.
    pub fn list_from_data(data: &Value) -> Vec<Self> {
        let Some(items) = data.get("recentAcSubmissionList").and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match Self::deserialize(item) {
                Ok(sub) => Some(sub),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed recent submission entry");
                    None
                }
            })
            .collect()
    }
}

// --- Paginated submission history ---

/// A single row of a submission history page, normalized across the GraphQL
/// (`titleSlug`/`statusDisplay`) and REST (`title_slug`/`status_display`) shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageSubmission {
    #[serde(alias = "titleSlug", default)]
    pub title_slug: String,
    #[serde(alias = "statusDisplay", default)]
    pub status_display: String,
}

impl PageSubmission {
    pub fn is_accepted(&self) -> bool {
        self.status_display == ACCEPTED
    }
}

/// One page of submission history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPage {
    pub submissions: Vec<PageSubmission>,
    pub has_next: bool,
}

impl SubmissionPage {
    /// Slugs of the accepted rows on this page.
    pub fn accepted_slugs(&self) -> impl Iterator<Item = &str> {
        self.submissions
            .iter()
            .filter(|s| s.is_accepted())
            .map(|s| s.title_slug.as_str())
    }

    /// Extract a page from the `data` object of a `submissionList` query.
    pub fn from_graphql_data(data: &Value) -> Self {
        let Some(list) = data.get("submissionList").filter(|v| v.is_object()) else {
            return Self::default();
        };
        Self {
            submissions: page_rows(list.get("submissions")),
            has_next: list.get("hasNext").and_then(Value::as_bool).unwrap_or(false),
        }
    }

    /// Parse a page from the public REST endpoint body.
    pub fn from_rest_body(body: &Value) -> Self {
        Self {
            submissions: page_rows(body.get("submissions_dump")),
            has_next: body.get("has_next").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

fn page_rows(rows: Option<&Value>) -> Vec<PageSubmission> {
    rows.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| PageSubmission::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Accepts epoch seconds as either a JSON number or a numeric string.
/// Unparseable values become 0 so they sort last.
fn epoch_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}
