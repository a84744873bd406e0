//! Twitter/X post fetcher via an external search tool.
//!
//! Invokes `{bin} --jsonl --max-results {n} twitter-search "{query}"` as a
//! subprocess and parses one JSON record per stdout line. The query embeds
//! `since:`/`until:` date bounds and excludes retweets and non-English posts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use kwr_core::{Platform, Post, ReportWindow, SocialSource};

use crate::error::SourceError;

/// One tweet record as emitted by the search tool. Unknown fields are
/// ignored; optional ones default so partial records still parse.
#[derive(Debug, Deserialize)]
struct TweetRecord {
    #[serde(default, alias = "rawContent")]
    content: String,
    #[serde(default)]
    url: String,
    #[serde(default, rename = "likeCount")]
    like_count: i64,
}

/// Subprocess-backed Twitter search client.
///
/// Fetch failures are retried a fixed number of times with a fixed delay
/// (no backoff, no jitter), then degrade to an empty result. Queries that
/// exhaust their retries with at least one hard failure are appended to the
/// failure log for later inspection.
pub struct TwitterSearchClient {
    bin: String,
    max_results: u32,
    max_attempts: u32,
    retry_delay: Duration,
    failure_log_path: PathBuf,
}

impl TwitterSearchClient {
    #[must_use]
    pub fn new(
        bin: impl Into<String>,
        max_results: u32,
        max_attempts: u32,
        retry_delay_secs: u64,
        failure_log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bin: bin.into(),
            max_results,
            // At least one attempt, whatever the config says.
            max_attempts: max_attempts.max(1),
            retry_delay: Duration::from_secs(retry_delay_secs),
            failure_log_path: failure_log_path.into(),
        }
    }

    /// Search query for one keyword over the report window.
    pub(crate) fn build_query(keyword: &str, window: &ReportWindow) -> String {
        format!(
            "\"{keyword}\" -filter:retweets lang:en since:{} until:{}",
            window.since(),
            window.until()
        )
    }

    async fn search_once(&self, query: &str) -> Result<Vec<Post>, SourceError> {
        let output = tokio::process::Command::new(&self.bin)
            .args([
                "--jsonl",
                "--max-results",
                &self.max_results.to_string(),
                "twitter-search",
                query,
            ])
            .output()
            .await
            .map_err(|e| {
                SourceError::Subprocess(format!("failed to spawn {}: {e}", self.bin))
            })?;

        if !output.status.success() {
            return Err(SourceError::Subprocess(format!(
                "{} exited with {}",
                self.bin, output.status
            )));
        }

        parse_jsonl(&String::from_utf8_lossy(&output.stdout))
    }

    fn record_failed_query(&self, query: &str) {
        let line = format!("{}: {query}\n", Utc::now().to_rfc3339());
        if let Err(e) = append_line(&self.failure_log_path, &line) {
            tracing::warn!(
                path = %self.failure_log_path.display(),
                error = %e,
                "could not append to failure log"
            );
        }
    }
}

#[async_trait]
impl SocialSource for TwitterSearchClient {
    async fn fetch_posts(&self, keyword: &str, window: &ReportWindow) -> Vec<Post> {
        let query = Self::build_query(keyword, window);
        let mut saw_error = false;

        for attempt in 1..=self.max_attempts {
            match self.search_once(&query).await {
                Ok(posts) if !posts.is_empty() => {
                    tracing::debug!(keyword, attempt, count = posts.len(), "twitter search ok");
                    return posts;
                }
                Ok(_) => {
                    tracing::debug!(keyword, attempt, "twitter search returned no posts");
                }
                Err(e) => {
                    saw_error = true;
                    tracing::warn!(keyword, attempt, error = %e, "twitter search attempt failed");
                }
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        // Empty searches are a legitimate outcome; only log queries whose
        // retries were burned on hard failures.
        if saw_error {
            self.record_failed_query(&query);
        }
        Vec::new()
    }
}

fn parse_jsonl(stdout: &str) -> Result<Vec<Post>, SourceError> {
    let mut posts = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let record: TweetRecord =
            serde_json::from_str(line).map_err(|e| SourceError::Parse {
                context: "tweet record".to_string(),
                source: e,
            })?;
        posts.push(Post {
            text: record.content,
            url: record.url,
            engagement: record.like_count,
            platform: Platform::Twitter,
        });
    }
    Ok(posts)
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())
}
