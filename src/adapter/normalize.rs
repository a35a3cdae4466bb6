const JSON_FENCE: &str = "```json";
const CLOSING_FENCE: &str = "```";

/// Strips a markdown JSON code fence wrapped around the model's answer.
///
/// Only text that begins with the opening fence is touched. The content is
/// otherwise returned as free text, even when it looks like JSON.
pub fn normalize_output(raw: &str) -> String {
    let Some(rest) = raw.strip_prefix(JSON_FENCE) else {
        return raw.to_string();
    };

    let body = rest.trim_start();
    match body.trim_end().strip_suffix(CLOSING_FENCE) {
        Some(inner) => inner.trim_end().to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("```json\n{\"answer\": \"two\"}\n```", "{\"answer\": \"two\"}")]
    #[case("```json   \n\n  Two dogs.\nSentiment: joyful \t\n```", "Two dogs.\nSentiment: joyful")]
    #[case("```json{\"a\":1}```", "{\"a\":1}")]
    #[case("```json\nno closing fence\n", "no closing fence\n")]
    #[case("```json\n```\n\n", "")]
    fn test_fenced_output_is_stripped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_output(raw), expected);
    }

    #[rstest]
    #[case("Two dogs.\nSentiment: joyful")]
    #[case("  ```json\n{}\n```")]
    #[case("```\nplain fence\n```")]
    #[case("```JSON\n{}\n```")]
    #[case("")]
    fn test_unfenced_output_is_unchanged(#[case] raw: &str) {
        assert_eq!(normalize_output(raw), raw);
    }

    #[rstest]
    #[case("```json\n{\"answer\": 3}\n```")]
    #[case("A red car.\nSentiment: neutral")]
    #[case("```json  trailing spaces   ```   ")]
    fn test_normalization_is_idempotent(#[case] raw: &str) {
        let once = normalize_output(raw);
        assert_eq!(normalize_output(&once), once);
    }
}
