pub mod error;
pub mod types;

pub use error::{LeetCodeError, Result};
pub use types::{PageSubmission, RecentAcSubmission, SubmissionPage, ACCEPTED};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use serde_json::{json, Value};
use types::{GraphQlEnvelope, GraphQlRequest};

pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";

/// Desktop browser UA. LeetCode rejects requests that look automated.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const RECENT_AC_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
  }
}
"#;

const SUBMISSION_LIST_QUERY: &str = r#"
query submissionList($offset: Int!, $limit: Int!, $username: String!) {
  submissionList(offset: $offset, limit: $limit, username: $username) {
    hasNext
    submissions {
      title
      titleSlug
      statusDisplay
      timestamp
    }
  }
}
"#;

/// Connection settings for [`LeetCodeClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct LeetCodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = options.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        let referer = HeaderValue::from_str(&format!("{base_url}/"))
            .map_err(|e| LeetCodeError::Network(format!("invalid base URL: {e}")))?;
        headers.insert(REFERER, referer);

        let client = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Recent accepted submissions for a user, as reported by `recentAcSubmissionList`.
    pub async fn recent_accepted(&self, username: &str, limit: u32) -> Result<Vec<RecentAcSubmission>> {
        let data = self
            .graphql(RECENT_AC_QUERY, json!({ "username": username, "limit": limit }))
            .await?;
        let list = RecentAcSubmission::list_from_data(&data);
        tracing::debug!(username, count = list.len(), "Fetched recent accepted submissions");
        Ok(list)
    }

    /// One page of the user's submission history via the GraphQL `submissionList` query.
    pub async fn graphql_submission_page(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SubmissionPage> {
        let data = self
            .graphql(
                SUBMISSION_LIST_QUERY,
                json!({ "username": username, "offset": offset, "limit": limit }),
            )
            .await?;
        Ok(SubmissionPage::from_graphql_data(&data))
    }

    /// One page of the user's submission history via the public REST endpoint.
    pub async fn rest_submission_page(
        &self,
        username: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SubmissionPage> {
        let url = self.rest_url(username)?;
        let resp = self
            .client
            .get(url)
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LeetCodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = resp.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(SubmissionPage::from_rest_body(&body))
    }

    /// `{base}/api/submissions/{username}/` with the username percent-encoded.
    fn rest_url(&self, username: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LeetCodeError::Network(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| LeetCodeError::Network(format!("base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "submissions", username, ""]);
        Ok(url)
    }

    /// POST a GraphQL query and return its `data` object.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let url = format!("{}/graphql", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LeetCodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = resp.text().await?;
        parse_graphql(&text)
    }
}

/// Decode a GraphQL response body. A non-JSON body or a non-empty `errors`
/// array is a failure.
pub fn parse_graphql(body: &str) -> Result<Value> {
    let envelope: GraphQlEnvelope = serde_json::from_str(body)?;
    match envelope.errors {
        Some(errors) if !errors.is_empty() => Err(LeetCodeError::GraphQl(
            errors.into_iter().map(|e| e.message).collect(),
        )),
        _ => Ok(envelope.data),
    }
}
