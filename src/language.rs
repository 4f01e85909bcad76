//! Language classification heuristics
//!
//! A crude script/alphabet-range classifier used to tag recognized text
//! fragments when the backend provides no language information of its own.
//! Probes run in a fixed order and the first matching script wins, so
//! mixed-script fragments resolve to the earliest probed script.

/// Pluggable per-fragment language classifier
pub trait LanguageClassifier: Send + Sync {
    /// Guess the language of a text fragment, or `None` if no script matched.
    fn classify(&self, text: &str) -> Option<&'static str>;
}

/// Character-range classifier covering the scripts the platform engines
/// most commonly emit
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptRangeClassifier;

impl LanguageClassifier for ScriptRangeClassifier {
    fn classify(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();

        if contains_in_range(&lowered, '\u{0430}', '\u{044f}') {
            return Some("ru"); // Cyrillic
        }
        if contains_any(&lowered, "ñ¡¿") {
            return Some("es");
        }
        if contains_any(&lowered, "àâæçèêëîïôœùûÿ") {
            return Some("fr");
        }
        if contains_any(&lowered, "äöüß") {
            return Some("de");
        }
        // Accented vowels shared between Spanish and French resolve to
        // Spanish, matching the probe order of the original heuristic.
        if contains_any(&lowered, "áéíóú") {
            return Some("es");
        }
        if contains_in_range(&lowered, '\u{3040}', '\u{30ff}') {
            return Some("ja"); // Hiragana + Katakana
        }
        if contains_in_range(&lowered, '\u{4e00}', '\u{9fff}') {
            return Some("zh"); // CJK unified ideographs
        }
        if contains_in_range(&lowered, '\u{0627}', '\u{064a}') {
            return Some("ar");
        }
        if lowered.chars().any(|c| c.is_ascii_alphabetic()) {
            return Some("en");
        }

        None
    }
}

fn contains_in_range(text: &str, start: char, end: char) -> bool {
    text.chars().any(|c| (start..=end).contains(&c))
}

fn contains_any(text: &str, alphabet: &str) -> bool {
    text.chars().any(|c| alphabet.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Option<&'static str> {
        ScriptRangeClassifier.classify(text)
    }

    #[test]
    fn test_plain_latin_is_english() {
        assert_eq!(classify("Hello world"), Some("en"));
    }

    #[test]
    fn test_cyrillic_is_russian() {
        assert_eq!(classify("Привет"), Some("ru"));
    }

    #[test]
    fn test_spanish_and_german_marks() {
        assert_eq!(classify("mañana"), Some("es"));
        assert_eq!(classify("Straße"), Some("de"));
    }

    #[test]
    fn test_french_marks() {
        assert_eq!(classify("forêt"), Some("fr"));
    }

    #[test]
    fn test_cjk_scripts() {
        assert_eq!(classify("こんにちは"), Some("ja"));
        assert_eq!(classify("你好"), Some("zh"));
    }

    #[test]
    fn test_arabic() {
        assert_eq!(classify("مرحبا"), Some("ar"));
    }

    #[test]
    fn test_digits_and_punctuation_classify_as_nothing() {
        assert_eq!(classify("1234 !?"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_mixed_script_resolves_to_first_probe() {
        // Cyrillic is probed before the Latin fallback.
        assert_eq!(classify("Привет hello"), Some("ru"));
    }

    #[test]
    fn test_uppercase_input_is_lowercased_first() {
        assert_eq!(classify("ПРИВЕТ"), Some("ru"));
    }
}
