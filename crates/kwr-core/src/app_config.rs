use std::path::PathBuf;

/// Process-wide settings loaded once at startup from the environment and
/// passed by reference to every component. Credentials never come from the
/// config file.
#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub email_app_password: String,
    pub config_path: PathBuf,
    pub keywords_path: PathBuf,
    pub failure_log_path: PathBuf,
    pub social_search_bin: String,
    pub social_max_results: u32,
    pub social_max_attempts: u32,
    pub social_retry_delay_secs: u64,
    pub reddit_limit: u32,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_concurrent_keywords: usize,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"[redacted]")
            .field("reddit_client_id", &self.reddit_client_id)
            .field("reddit_client_secret", &"[redacted]")
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("email_app_password", &"[redacted]")
            .field("config_path", &self.config_path)
            .field("keywords_path", &self.keywords_path)
            .field("failure_log_path", &self.failure_log_path)
            .field("social_search_bin", &self.social_search_bin)
            .field("social_max_results", &self.social_max_results)
            .field("social_max_attempts", &self.social_max_attempts)
            .field("social_retry_delay_secs", &self.social_retry_delay_secs)
            .field("reddit_limit", &self.reddit_limit)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_keywords", &self.max_concurrent_keywords)
            .field("log_level", &self.log_level)
            .finish()
    }
}
