//! Shared types and configuration for the keyword watch report pipeline.
//!
//! Everything downstream crates agree on lives here: the normalized [`Post`]
//! shape, per-keyword report structures, the analysis window, configuration
//! loading (environment + `config.json` + `keywords.txt`), and the trait
//! contracts the report pipeline is generic over.

mod app_config;
mod config;
mod error;
mod keywords;
mod report_config;
mod source;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use keywords::{load_keywords, parse_keywords};
pub use report_config::{load_report_config, ReportConfig};
pub use source::{ForumSource, SocialSource, Summarize};
pub use types::{KeywordReport, Platform, PlatformSection, Post, ReportWindow, Sentiment};
