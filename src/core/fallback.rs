//! Local fallbacks for summarization and translation
//!
//! Used when the host provides no native capability. Both are deterministic
//! and never fail.

/// Language that needs no translation
pub const DEFAULT_LANGUAGE: &str = "en";

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const SUMMARY_SENTENCES: usize = 2;

/// Keep the first two sentences of `text`.
///
/// Sentences are split on `.`, `!` and `?`; blank segments are dropped and the
/// kept ones are joined with ". " and terminated with a period.
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(SUMMARY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    format!("{}.", sentences.join(". "))
}

/// Placeholder translation.
///
/// Identity for the default language, otherwise the text tagged with the
/// target code. This is not a translation.
pub fn translate(text: &str, target_language: &str) -> String {
    if target_language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
        return text.to_string();
    }
    format!("[Translated to {}]: {}", target_language, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_keeps_first_two_sentences() {
        assert_eq!(
            summarize("Hello. This is a test. Extra sentence."),
            "Hello. This is a test."
        );
    }

    #[test]
    fn test_summarize_mixed_terminators() {
        assert_eq!(summarize("Wait! Really? Yes."), "Wait. Really.");
    }

    #[test]
    fn test_summarize_single_sentence_still_terminated() {
        assert_eq!(summarize("no terminator here"), "no terminator here.");
        assert_eq!(summarize("Only one."), "Only one.");
    }

    #[test]
    fn test_summarize_skips_blank_segments() {
        assert_eq!(summarize("...First.  . !Second?? Third."), "First. Second.");
    }

    #[test]
    fn test_summarize_blank_input() {
        assert_eq!(summarize(""), "");
        assert_eq!(summarize(" . ! ? "), "");
    }

    #[test]
    fn test_summarize_at_most_two_sentences_and_period() {
        let inputs = [
            "One. Two. Three. Four.",
            "A long sentence without end",
            "Question? Exclamation! Statement.",
            "x.y.z",
        ];
        for input in inputs {
            let out = summarize(input);
            assert!(out.ends_with('.'), "{:?}", out);
            let count = out.split('.').filter(|s| !s.trim().is_empty()).count();
            assert!(count <= 2, "{:?}", out);
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let once = summarize("Alpha beta. Gamma delta! Epsilon? Zeta.");
        assert_eq!(summarize(&once), once);
        assert_eq!(summarize(&summarize("Hi. There.")), "Hi. There.");
    }

    #[test]
    fn test_translate_identity_for_english() {
        assert_eq!(translate("Bonjour le monde", "en"), "Bonjour le monde");
        assert_eq!(translate("Hola", "EN"), "Hola");
        assert_eq!(translate("", "en"), "");
    }

    #[test]
    fn test_translate_tags_other_targets() {
        let out = translate("Bonjour", "es");
        assert!(out.contains("es"));
        assert!(out.contains("Bonjour"));

        let empty = translate("", "fr");
        assert!(!empty.is_empty());
        assert!(empty.contains("fr"));
    }
}
