//! Contracts between the report pipeline and its collaborators.
//!
//! Each fetcher backend sits behind one of these traits so it can be swapped
//! (hosted API vs. external tool) without touching the pipeline, and so the
//! pipeline is testable with in-memory doubles.

use async_trait::async_trait;

use crate::types::{Post, ReportWindow, Sentiment};

/// A social-platform search backend.
///
/// Implementations degrade internally: retry exhaustion or tool failure
/// yields an empty `Vec`, never an error, so one platform's outage cannot
/// abort the run.
#[async_trait]
pub trait SocialSource: Send + Sync {
    async fn fetch_posts(&self, keyword: &str, window: &ReportWindow) -> Vec<Post>;
}

/// A forum-style search backend.
///
/// Same degradation contract as [`SocialSource`]: failures are logged by the
/// implementation and surface as an empty result.
#[async_trait]
pub trait ForumSource: Send + Sync {
    async fn fetch_posts(&self, keyword: &str) -> Vec<Post>;
}

/// Produces a prose summary and a coarse sentiment label for a set of posts.
///
/// Callers must skip fully empty post lists; implementations embed call
/// failures in the summary text and return [`Sentiment::Unknown`] rather
/// than erroring.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, posts: &[Post], keyword: &str) -> (String, Sentiment);
}
