//! Reddit search client (client-credentials OAuth).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use kwr_core::{AppConfig, ForumSource, Platform, Post};

use crate::error::SourceError;

const AUTH_BASE: &str = "https://www.reddit.com";
const API_BASE: &str = "https://oauth.reddit.com";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: SubmissionData,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
}

/// Reddit API client holding a valid access token.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: String,
    limit: u32,
}

impl RedditClient {
    /// Create a `RedditClient` by exchanging client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Reddit`] if the token exchange fails, or
    /// [`SourceError::Http`] on network failure.
    pub async fn new(config: &AppConfig) -> Result<Self, SourceError> {
        Self::with_base_urls(config, AUTH_BASE, API_BASE).await
    }

    /// Create a client with custom auth/API base URLs (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`RedditClient::new`].
    pub async fn with_base_urls(
        config: &AppConfig,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let token = Self::fetch_token(
            &client,
            auth_base,
            &config.reddit_client_id,
            &config.reddit_client_secret,
            &config.reddit_user_agent,
        )
        .await?;

        Ok(Self {
            client,
            token,
            user_agent: config.reddit_user_agent.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
            limit: config.reddit_limit,
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        auth_base: &str,
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
    ) -> Result<String, SourceError> {
        let response = client
            .post(format!(
                "{}/api/v1/access_token",
                auth_base.trim_end_matches('/')
            ))
            .header("User-Agent", user_agent)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Reddit(format!("token parse error: {e}")))?;

        Ok(token.access_token)
    }

    /// Search all of Reddit for recent posts mentioning a keyword.
    ///
    /// Queries `/r/all/search` sorted by relevance over the past week — the
    /// upstream recency filter is fixed to a week regardless of the
    /// configured days-back window. Results are kept only when the keyword
    /// appears literally (case-insensitively) in the title or body, since
    /// Reddit's search matches more loosely than that.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Reddit`] on a non-success status or an
    /// unparseable body, [`SourceError::Http`] on network failure.
    pub async fn search_posts(&self, keyword: &str) -> Result<Vec<Post>, SourceError> {
        let limit = self.limit.to_string();
        let params = [
            ("q", keyword),
            ("restrict_sr", "true"),
            ("sort", "relevance"),
            ("t", "week"),
            ("limit", &limit),
        ];

        let response = self
            .client
            .get(format!("{}/r/all/search", self.api_base))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Reddit(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| SourceError::Reddit(format!("search response parse error: {e}")))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .filter(|child| mentions_keyword(&child.data, keyword))
            .map(|child| to_post(child.data))
            .collect())
    }
}

#[async_trait]
impl ForumSource for RedditClient {
    async fn fetch_posts(&self, keyword: &str) -> Vec<Post> {
        match self.search_posts(keyword).await {
            Ok(posts) => {
                tracing::debug!(keyword, count = posts.len(), "reddit search ok");
                posts
            }
            Err(e) => {
                tracing::warn!(keyword, error = %e, "reddit search failed; continuing with no posts");
                Vec::new()
            }
        }
    }
}

fn mentions_keyword(submission: &SubmissionData, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    submission.title.to_lowercase().contains(&needle)
        || submission.selftext.to_lowercase().contains(&needle)
}

fn to_post(submission: SubmissionData) -> Post {
    let url = if submission.url.is_empty() {
        format!("https://reddit.com{}", submission.permalink)
    } else {
        submission.url.clone()
    };

    let text = if submission.selftext.is_empty() {
        submission.title
    } else {
        format!("{} {}", submission.title, submission.selftext)
    };

    Post {
        text,
        url,
        engagement: submission.score,
        platform: Platform::Reddit,
    }
}
