use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a required env var is missing or a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a required env var is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let openai_api_key = require("OPENAI_API_KEY")?;
    let reddit_client_id = require("REDDIT_CLIENT_ID")?;
    let reddit_client_secret = require("REDDIT_CLIENT_SECRET")?;
    let email_app_password = require("EMAIL_APP_PASSWORD")?;

    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "kwr/0.1 (keyword-tracking)");
    let config_path = PathBuf::from(or_default("KWR_CONFIG_PATH", "./config/config.json"));
    let keywords_path = PathBuf::from(or_default("KWR_KEYWORDS_PATH", "./config/keywords.txt"));
    let failure_log_path = PathBuf::from(or_default(
        "KWR_FAILURE_LOG_PATH",
        "./failed_queries.log",
    ));

    let social_search_bin = or_default("KWR_SOCIAL_SEARCH_BIN", "snscrape");
    let social_max_results = parse_u32("KWR_SOCIAL_MAX_RESULTS", "100")?;
    let social_max_attempts = parse_u32("KWR_SOCIAL_MAX_ATTEMPTS", "3")?;
    let social_retry_delay_secs = parse_u64("KWR_SOCIAL_RETRY_DELAY_SECS", "5")?;
    let reddit_limit = parse_u32("KWR_REDDIT_LIMIT", "20")?;

    let llm_model = or_default("KWR_LLM_MODEL", "gpt-3.5-turbo");
    let llm_timeout_secs = parse_u64("KWR_LLM_TIMEOUT_SECS", "60")?;
    let request_timeout_secs = parse_u64("KWR_REQUEST_TIMEOUT_SECS", "30")?;
    let max_concurrent_keywords = parse_usize("KWR_MAX_CONCURRENT_KEYWORDS", "4")?;
    let log_level = or_default("KWR_LOG_LEVEL", "info");

    Ok(AppConfig {
        openai_api_key,
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        email_app_password,
        config_path,
        keywords_path,
        failure_log_path,
        social_search_bin,
        social_max_results,
        social_max_attempts,
        social_retry_delay_secs,
        reddit_limit,
        llm_model,
        llm_timeout_secs,
        request_timeout_secs,
        max_concurrent_keywords,
        log_level,
    })
}
