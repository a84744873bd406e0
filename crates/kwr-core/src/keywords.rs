use std::path::Path;

use crate::ConfigError;

/// Load the keyword list from a newline-delimited file.
///
/// Blank lines and surrounding whitespace are ignored; order is preserved.
///
/// # Errors
///
/// Returns `ConfigError::FileIo` if the file cannot be read, or
/// `ConfigError::Validation` if it contains no keywords.
pub fn load_keywords(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let keywords = parse_keywords(&content);
    if keywords.is_empty() {
        return Err(ConfigError::Validation(format!(
            "keyword file {} contains no keywords",
            path.display()
        )));
    }

    Ok(keywords)
}

/// Parse newline-delimited keyword text: trim each line, drop blanks.
#[must_use]
pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
