use std::sync::LazyLock;

use regex::Regex;

static OPTION_DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--- OPTION \d+ ---").unwrap());

/// Split a plain-text response into its `--- OPTION n ---` sections.
///
/// Text without delimiters is a single option. Blank sections are dropped.
pub fn split_options(text: &str) -> Vec<String> {
    OPTION_DELIMITER_RE
        .split(text)
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_numbered_delimiters() {
        let text = "--- OPTION 1 ---\nFirst idea\n\n--- OPTION 2 ---\nSecond\nidea\n--- OPTION 10 ---\nThird";
        assert_eq!(
            split_options(text),
            vec!["First idea", "Second\nidea", "Third"]
        );
    }

    #[test]
    fn undelimited_text_is_one_option() {
        assert_eq!(
            split_options("1. Plan\n2. Execute\n"),
            vec!["1. Plan\n2. Execute"]
        );
    }

    #[test]
    fn blank_input_has_no_options() {
        assert!(split_options("").is_empty());
        assert!(split_options("--- OPTION 1 ---\n   \n--- OPTION 2 ---").is_empty());
    }

    #[test]
    fn delimiter_needs_a_number() {
        assert_eq!(split_options("--- OPTION x ---"), vec!["--- OPTION x ---"]);
    }
}
