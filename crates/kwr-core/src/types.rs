use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The platform a post was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Twitter,
    Reddit,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Twitter => write!(f, "Twitter"),
            Platform::Reddit => write!(f, "Reddit"),
        }
    }
}

/// A post normalized down to what ranking and rendering need.
///
/// Fetchers map richer platform records (timestamps, authors, titles) onto
/// this shape; absent engagement counts become `0`, absent text or links
/// become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub url: String,
    /// Likes for Twitter, score for Reddit. Used only for ranking.
    pub engagement: i64,
    pub platform: Platform,
}

/// Coarse sentiment label derived from the model's free-text summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One platform's slice of a keyword's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSection {
    pub post_count: usize,
    /// `None` when the platform returned no posts (the summarizer is never
    /// invoked for an empty post list).
    pub summary: Option<String>,
    pub sentiment: Sentiment,
    /// Up to three `(url, label)` pairs, highest engagement first.
    pub top_links: Vec<(String, String)>,
}

impl PlatformSection {
    /// Section for a platform that produced no posts.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            post_count: 0,
            summary: None,
            sentiment: Sentiment::Unknown,
            top_links: Vec::new(),
        }
    }
}

/// Everything the renderer needs for one keyword. Built once per keyword,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordReport {
    pub keyword: String,
    pub twitter: PlatformSection,
    pub reddit: PlatformSection,
}

impl KeywordReport {
    /// The sentiment displayed for the whole keyword: Twitter's label when
    /// determined, otherwise Reddit's (first-non-Unknown wins).
    #[must_use]
    pub fn overall_sentiment(&self) -> Sentiment {
        if self.twitter.sentiment == Sentiment::Unknown {
            self.reddit.sentiment
        } else {
            self.twitter.sentiment
        }
    }
}

/// UTC analysis window covering the configured days-back range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Window ending now and starting `days_back` days earlier.
    #[must_use]
    pub fn ending_now(days_back: u32) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(i64::from(days_back)),
            end,
        }
    }

    /// Human-readable range for the report header, e.g. "1 August to 7 August".
    #[must_use]
    pub fn display_range(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%-d %B"),
            self.end.format("%-d %B")
        )
    }

    /// Lower date bound in `YYYY-MM-DD` form for search queries.
    #[must_use]
    pub fn since(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Upper date bound in `YYYY-MM-DD` form for search queries.
    #[must_use]
    pub fn until(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
