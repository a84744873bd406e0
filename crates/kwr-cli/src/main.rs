//! One report cycle per invocation: load configuration, build the keyword
//! report, render it, attempt delivery, exit. Scheduling is external (cron).
//!
//! Exit codes: 0 on success, 1 for startup/configuration errors, 2 when the
//! report was built but delivery failed — distinguishable so a scheduler can
//! alert on each.

use std::path::PathBuf;
use std::process::ExitCode;

use async_trait::async_trait;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kwr_core::{
    load_app_config, load_keywords, load_report_config, AppConfig, ForumSource, Post,
    ReportWindow,
};
use kwr_mailer::send_html_email;
use kwr_report::{build_report, render_html};
use kwr_sources::{RedditClient, TwitterSearchClient};
use kwr_summarizer::LlmClient;

#[derive(Debug, Parser)]
#[command(name = "kwr")]
#[command(about = "Keyword watch report: social-listening digest over email")]
struct Cli {
    /// Report config file (overrides KWR_CONFIG_PATH).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keyword list file (overrides KWR_KEYWORDS_PATH).
    #[arg(long)]
    keywords: Option<PathBuf>,
}

enum RunError {
    Startup(anyhow::Error),
    Delivery(kwr_mailer::MailError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.config {
        config.config_path = path;
    }
    if let Some(path) = cli.keywords {
        config.keywords_path = path;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Startup(e)) => {
            tracing::error!(error = %e, "startup failed");
            ExitCode::FAILURE
        }
        Err(RunError::Delivery(e)) => {
            tracing::error!(error = %e, "report delivery failed");
            ExitCode::from(2)
        }
    }
}

async fn run(config: &AppConfig) -> Result<(), RunError> {
    let report_config =
        load_report_config(&config.config_path).map_err(|e| RunError::Startup(e.into()))?;
    let keywords =
        load_keywords(&config.keywords_path).map_err(|e| RunError::Startup(e.into()))?;

    tracing::info!(
        keywords = keywords.len(),
        days_back = report_config.days_back,
        timezone = %report_config.timezone,
        "starting report cycle"
    );

    let window = ReportWindow::ending_now(report_config.days_back);

    let twitter = TwitterSearchClient::new(
        config.social_search_bin.clone(),
        config.social_max_results,
        config.social_max_attempts,
        config.social_retry_delay_secs,
        config.failure_log_path.clone(),
    );

    // A failed token exchange is a data-source outage, not a startup error:
    // the report still goes out with empty Reddit sections.
    let forum: Box<dyn ForumSource> = match RedditClient::new(config).await {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "reddit client unavailable; reddit sections will be empty");
            Box::new(OfflineForum)
        }
    };

    let summarizer = LlmClient::new(
        &config.openai_api_key,
        &config.llm_model,
        config.llm_timeout_secs,
    )
    .map_err(|e| RunError::Startup(e.into()))?;

    let reports = build_report(
        &keywords,
        &window,
        &twitter,
        forum.as_ref(),
        &summarizer,
        config.max_concurrent_keywords,
    )
    .await;

    let html = render_html(&reports, &window);
    tracing::info!(sections = reports.len(), bytes = html.len(), "report rendered");

    send_html_email(
        &report_config.email_subject,
        &html,
        &report_config.sender_email,
        &report_config.receiver_emails,
        &config.email_app_password,
    )
    .await
    .map_err(RunError::Delivery)
}

/// Stand-in forum source for runs where the Reddit client could not
/// authenticate; every keyword degrades to an empty Reddit section.
struct OfflineForum;

#[async_trait]
impl ForumSource for OfflineForum {
    async fn fetch_posts(&self, _keyword: &str) -> Vec<Post> {
        Vec::new()
    }
}
