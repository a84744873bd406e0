//! Per-keyword report orchestration.
//!
//! Keywords share no state, so each one's fetch → rank → summarize chain
//! runs as an independent task on a bounded pool. Results are reassembled
//! in keyword-file order whatever the completion order.

use futures::stream::{self, StreamExt};

use kwr_core::{
    ForumSource, KeywordReport, PlatformSection, Post, ReportWindow, SocialSource, Summarize,
};

use crate::rank::rank_top;

/// Number of top-post links kept per platform section.
const TOP_LINKS: usize = 3;

/// Build the full report for all keywords.
///
/// Per-keyword work is dispatched to at most `max_concurrent` concurrent
/// tasks (clamped to at least 1). One keyword's empty fetches or failed
/// summaries never block another's section.
pub async fn build_report(
    keywords: &[String],
    window: &ReportWindow,
    social: &dyn SocialSource,
    forum: &dyn ForumSource,
    summarizer: &dyn Summarize,
    max_concurrent: usize,
) -> Vec<KeywordReport> {
    let mut indexed: Vec<(usize, KeywordReport)> = stream::iter(keywords.iter().enumerate())
        .map(|(index, keyword)| async move {
            let report = build_keyword_report(keyword, window, social, forum, summarizer).await;
            (index, report)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    // Completion order is arbitrary; the report keeps keyword-file order.
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, report)| report).collect()
}

/// Assemble one keyword's report: fetch from both platforms, rank and
/// summarize each platform's posts independently.
pub async fn build_keyword_report(
    keyword: &str,
    window: &ReportWindow,
    social: &dyn SocialSource,
    forum: &dyn ForumSource,
    summarizer: &dyn Summarize,
) -> KeywordReport {
    let twitter_posts = social.fetch_posts(keyword, window).await;
    let reddit_posts = forum.fetch_posts(keyword).await;
    tracing::info!(
        keyword,
        twitter = twitter_posts.len(),
        reddit = reddit_posts.len(),
        "collected posts"
    );

    let twitter = build_section(&twitter_posts, keyword, summarizer).await;
    let reddit = build_section(&reddit_posts, keyword, summarizer).await;

    KeywordReport {
        keyword: keyword.to_string(),
        twitter,
        reddit,
    }
}

/// One platform's section. An empty post list short-circuits without
/// invoking the summarizer.
async fn build_section(
    posts: &[Post],
    keyword: &str,
    summarizer: &dyn Summarize,
) -> PlatformSection {
    if posts.is_empty() {
        return PlatformSection::empty();
    }

    let (summary, sentiment) = summarizer.summarize(posts, keyword).await;
    let top_links = rank_top(posts, TOP_LINKS)
        .into_iter()
        .map(|post| (post.url, post.text))
        .collect();

    PlatformSection {
        post_count: posts.len(),
        summary: Some(summary),
        sentiment,
        top_links,
    }
}
