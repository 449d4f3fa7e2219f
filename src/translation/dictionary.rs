// File: src/translation/dictionary.rs

/// (source, target, word, translation)
const PHRASES: &[(&str, &str, &str, &str)] = &[
    ("en", "pt", "hello", "olá"),
    ("en", "pt", "world", "mundo"),
    ("en", "pt", "dog", "cachorro"),
    ("en", "pt", "cat", "gato"),
    ("en", "pt", "house", "casa"),
    ("pt", "en", "olá", "hello"),
    ("pt", "en", "mundo", "world"),
    ("pt", "en", "cachorro", "dog"),
    ("pt", "en", "gato", "cat"),
    ("pt", "en", "casa", "house"),
    ("es", "en", "hola", "hello"),
    ("fr", "en", "bonjour", "hello"),
];

const SUPPORTED_PAIRS: &[(&str, &str)] = &[("en", "pt"), ("pt", "en"), ("es", "en"), ("fr", "en")];

/// Stand-in for a real translation backend: a handful of single words per
/// language pair, matched case-insensitively, with a bracketed echo otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseDictionary;

impl PhraseDictionary {
    pub fn new() -> Self {
        Self
    }

    pub fn lookup(&self, text: &str, source_lang: &str, target_lang: &str) -> Option<&'static str> {
        let needle = text.to_lowercase();
        PHRASES
            .iter()
            .find(|(src, tgt, word, _)| *src == source_lang && *tgt == target_lang && *word == needle)
            .map(|(_, _, _, translation)| *translation)
    }

    pub fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        if let Some(hit) = self.lookup(text, source_lang, target_lang) {
            return hit.to_string();
        }
        let supported = SUPPORTED_PAIRS
            .iter()
            .any(|&(src, tgt)| src == source_lang && tgt == target_lang);
        if supported {
            format!("[Translated to {}: {}]", target_lang.to_uppercase(), text)
        } else {
            format!("[No translation for {}-{}: {}]", source_lang, target_lang, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_words_any_case() {
        let dict = PhraseDictionary::new();
        assert_eq!(dict.translate("Hello", "en", "pt"), "olá");
        assert_eq!(dict.translate("OLÁ", "pt", "en"), "hello");
        assert_eq!(dict.translate("hola", "es", "en"), "hello");
        assert_eq!(dict.translate("Bonjour", "fr", "en"), "hello");
    }

    #[test]
    fn test_fallbacks() {
        let dict = PhraseDictionary::new();
        assert_eq!(dict.translate("good morning", "en", "pt"), "[Translated to PT: good morning]");
        assert_eq!(dict.translate("bom dia", "pt", "en"), "[Translated to EN: bom dia]");
        assert_eq!(dict.translate("hallo", "de", "en"), "[No translation for de-en: hallo]");
        // direction matters
        assert_eq!(dict.lookup("hello", "pt", "en"), None);
    }

    #[test]
    fn test_whitespace_is_part_of_the_text() {
        let dict = PhraseDictionary::new();
        assert_eq!(dict.lookup(" hello", "en", "pt"), None);
        assert_eq!(dict.translate(" hello", "en", "pt"), "[Translated to PT:  hello]");
    }
}
