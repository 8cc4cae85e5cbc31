use isolang::Language;

/// Maps a language code to a human-readable name
pub trait LocaleNames: Send + Sync {
    fn display_name(&self, code: &str) -> String;
}

/// ISO 639 backed resolver.
///
/// Accepts full tags ("pt-BR") by resolving the primary subtag. Unknown codes
/// resolve to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoLocaleNames;

impl IsoLocaleNames {
    pub fn resolve(code: &str) -> Option<Language> {
        let primary = code.split(['-', '_']).next()?.trim().to_ascii_lowercase();
        Language::from_639_1(&primary).or_else(|| Language::from_639_3(&primary))
    }
}

impl LocaleNames for IsoLocaleNames {
    fn display_name(&self, code: &str) -> String {
        Self::resolve(code)
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_letter_codes() {
        assert_eq!(IsoLocaleNames.display_name("en"), "English");
        assert_eq!(IsoLocaleNames.display_name("fr"), "French");
        assert_eq!(IsoLocaleNames.display_name("ES"), "Spanish");
    }

    #[test]
    fn test_regional_tag_uses_primary_subtag() {
        assert_eq!(IsoLocaleNames.display_name("pt-BR"), "Portuguese");
    }

    #[test]
    fn test_three_letter_code() {
        assert_eq!(IsoLocaleNames.display_name("deu"), "German");
    }

    #[test]
    fn test_unknown_code_is_returned_as_is() {
        assert_eq!(IsoLocaleNames.display_name("zz"), "zz");
        assert_eq!(IsoLocaleNames.display_name(""), "");
    }
}
