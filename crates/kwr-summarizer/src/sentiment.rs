use kwr_core::Sentiment;

/// Derive a coarse sentiment label from the model's free-text summary.
///
/// Scans the lowercased text for the literal substring "positive", then
/// "negative"; first match wins; neither yields Neutral. This exact rule is
/// what defines the report's sentiment labels.
#[must_use]
pub fn sentiment_of(summary: &str) -> Sentiment {
    let lower = summary.to_lowercase();
    if lower.contains("positive") {
        Sentiment::Positive
    } else if lower.contains("negative") {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_wins_even_when_negative_also_appears() {
        let summary = "Overall sentiment is very positive, though some negative remarks exist";
        assert_eq!(sentiment_of(summary), Sentiment::Positive);
    }

    #[test]
    fn negative_when_only_negative_appears() {
        assert_eq!(
            sentiment_of("Reception has been broadly Negative this week."),
            Sentiment::Negative
        );
    }

    #[test]
    fn neutral_when_neither_substring_appears() {
        assert_eq!(
            sentiment_of("Discussion centred on pricing and availability."),
            Sentiment::Neutral
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(sentiment_of("POSITIVE buzz all around"), Sentiment::Positive);
    }

    #[test]
    fn empty_summary_is_neutral() {
        assert_eq!(sentiment_of(""), Sentiment::Neutral);
    }
}
