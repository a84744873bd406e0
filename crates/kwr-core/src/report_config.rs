use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Per-run report settings read from `config.json`. Credentials are never
/// accepted here; they come from the environment (see [`crate::AppConfig`]).
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub sender_email: String,
    pub receiver_emails: Vec<String>,
    #[serde(default = "default_subject")]
    pub email_subject: String,
    #[serde(default = "default_days_back")]
    pub days_back: u32,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_subject() -> String {
    "Weekly Keyword Summary".to_string()
}

fn default_days_back() -> u32 {
    7
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Load and validate the report configuration from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty sender, empty recipient list).
pub fn load_report_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ReportConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.sender_email.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sender_email must be non-empty".to_string(),
        ));
    }
    if config.receiver_emails.is_empty() {
        return Err(ConfigError::Validation(
            "receiver_emails must contain at least one address".to_string(),
        ));
    }
    if config
        .receiver_emails
        .iter()
        .any(|addr| addr.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "receiver_emails must not contain blank addresses".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(json.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let file = write_config(
            r#"{"sender_email": "bot@example.com", "receiver_emails": ["team@example.com"]}"#,
        );
        let config = load_report_config(file.path()).expect("config should load");
        assert_eq!(config.email_subject, "Weekly Keyword Summary");
        assert_eq!(config.days_back, 7);
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.receiver_emails, vec!["team@example.com"]);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let file = write_config(
            r#"{
                "sender_email": "bot@example.com",
                "receiver_emails": ["a@example.com", "b@example.com"],
                "email_subject": "Daily Brand Pulse",
                "days_back": 3,
                "timezone": "Europe/London"
            }"#,
        );
        let config = load_report_config(file.path()).expect("config should load");
        assert_eq!(config.email_subject, "Daily Brand Pulse");
        assert_eq!(config.days_back, 3);
        assert_eq!(config.timezone, "Europe/London");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_config("{not json");
        let result = load_report_config(file.path());
        assert!(
            matches!(result, Err(ConfigError::Parse { .. })),
            "expected Parse error, got: {result:?}"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_report_config(Path::new("/nonexistent/config.json"));
        assert!(
            matches!(result, Err(ConfigError::FileIo { .. })),
            "expected FileIo error, got: {result:?}"
        );
    }

    #[test]
    fn empty_recipient_list_is_rejected() {
        let file =
            write_config(r#"{"sender_email": "bot@example.com", "receiver_emails": []}"#);
        let result = load_report_config(file.path());
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn load_report_config_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("config.json");
        assert!(
            path.exists(),
            "config.json missing at {path:?} — required for this test"
        );
        let config = load_report_config(&path).expect("repo config.json should load");
        assert!(!config.receiver_emails.is_empty());
    }

    #[test]
    fn blank_sender_is_rejected() {
        let file = write_config(r#"{"sender_email": " ", "receiver_emails": ["a@b.c"]}"#);
        let result = load_report_config(file.path());
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }
}
