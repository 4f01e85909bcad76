//! Recognition Configuration
//!
//! Backend-agnostic request configuration. Callers send a loose JSON map;
//! [`RecognitionConfig::from_map`] normalizes it once at the boundary into
//! an immutable struct. Unknown keys are ignored and type-mismatched values
//! fall back to the field default, so a malformed config never fails a call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speed/accuracy trade-off selector for the recognition backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Fastest recognition pass the backend offers
    Fast,
    /// Most accurate recognition pass (default)
    #[default]
    Accurate,
}

impl QualityTier {
    /// Parse a wire string; anything outside the recognized set falls back
    /// to `Accurate`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "fast" => QualityTier::Fast,
            _ => QualityTier::Accurate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Fast => "fast",
            QualityTier::Accurate => "accurate",
        }
    }
}

/// Normalized recognition request configuration
///
/// Immutable once constructed. Backends map these generic fields onto
/// whatever request parameters their engine understands and ignore the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionConfig {
    /// Recognition quality tier
    pub quality_tier: QualityTier,
    /// Whether the backend should apply language-model correction
    pub use_language_correction: bool,
    /// Ordered language hints for the backend (BCP-47 style tags)
    pub preferred_languages: Option<Vec<String>>,
    /// Minimum text height as a fraction of image height
    pub minimum_text_height: Option<f64>,
    /// Whether the backend should auto-detect the language
    pub auto_detect_language: bool,
    /// Backend engine/model revision to request, if the backend supports it
    pub backend_revision: Option<i64>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            quality_tier: QualityTier::Accurate,
            use_language_correction: true,
            preferred_languages: None,
            minimum_text_height: None,
            auto_detect_language: true,
            backend_revision: None,
        }
    }
}

impl RecognitionConfig {
    /// Normalize a loose configuration map into a typed config.
    ///
    /// A missing or non-object value yields the defaults. Each field is
    /// read independently: a wrong-typed value falls back to that field's
    /// default rather than failing the whole call.
    pub fn from_map(map: Option<&Value>) -> Self {
        let defaults = Self::default();
        let Some(map) = map.and_then(Value::as_object) else {
            return defaults;
        };

        let quality_tier = map
            .get("recognitionLevel")
            .and_then(Value::as_str)
            .map(QualityTier::from_wire)
            .unwrap_or(defaults.quality_tier);

        let use_language_correction = map
            .get("usesLanguageCorrection")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.use_language_correction);

        // Only string entries count; an empty list is the same as no hint.
        let preferred_languages = map
            .get("preferredLanguages")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|langs| !langs.is_empty());

        let minimum_text_height = map.get("minimumTextHeight").and_then(Value::as_f64);

        let auto_detect_language = map
            .get("automaticallyDetectsLanguage")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.auto_detect_language);

        let backend_revision = map.get("revision").and_then(Value::as_i64);

        Self {
            quality_tier,
            use_language_correction,
            preferred_languages,
            minimum_text_height,
            auto_detect_language,
            backend_revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = RecognitionConfig::default();
        assert_eq!(config.quality_tier, QualityTier::Accurate);
        assert!(config.use_language_correction);
        assert!(config.preferred_languages.is_none());
        assert!(config.minimum_text_height.is_none());
        assert!(config.auto_detect_language);
        assert!(config.backend_revision.is_none());
    }

    #[test]
    fn test_missing_map_yields_defaults() {
        assert_eq!(RecognitionConfig::from_map(None), RecognitionConfig::default());
    }

    #[test]
    fn test_non_object_map_yields_defaults() {
        let value = json!("not a map");
        assert_eq!(RecognitionConfig::from_map(Some(&value)), RecognitionConfig::default());
    }

    #[test]
    fn test_full_map() {
        let value = json!({
            "recognitionLevel": "fast",
            "usesLanguageCorrection": false,
            "preferredLanguages": ["en-US", "de-DE"],
            "minimumTextHeight": 0.05,
            "automaticallyDetectsLanguage": false,
            "revision": 3
        });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(config.quality_tier, QualityTier::Fast);
        assert!(!config.use_language_correction);
        assert_eq!(
            config.preferred_languages,
            Some(vec!["en-US".to_string(), "de-DE".to_string()])
        );
        assert_eq!(config.minimum_text_height, Some(0.05));
        assert!(!config.auto_detect_language);
        assert_eq!(config.backend_revision, Some(3));
    }

    #[test]
    fn test_unknown_quality_tier_falls_back_to_accurate() {
        let value = json!({ "recognitionLevel": "turbo" });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(config.quality_tier, QualityTier::Accurate);
    }

    #[test]
    fn test_type_mismatches_fall_back_per_field() {
        let value = json!({
            "recognitionLevel": 42,
            "usesLanguageCorrection": "yes",
            "preferredLanguages": "en",
            "minimumTextHeight": "tall",
            "automaticallyDetectsLanguage": 1,
            "revision": "latest"
        });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(config, RecognitionConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let value = json!({
            "recognitionLevel": "fast",
            "futureOption": { "nested": true }
        });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(config.quality_tier, QualityTier::Fast);
    }

    #[test]
    fn test_empty_language_list_is_no_hint() {
        let value = json!({ "preferredLanguages": [] });
        let config = RecognitionConfig::from_map(Some(&value));
        assert!(config.preferred_languages.is_none());
    }

    #[test]
    fn test_non_string_language_entries_are_skipped() {
        let value = json!({ "preferredLanguages": ["en", 7, null, "fr"] });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(
            config.preferred_languages,
            Some(vec!["en".to_string(), "fr".to_string()])
        );
    }

    #[test]
    fn test_integer_text_height_is_accepted() {
        let value = json!({ "minimumTextHeight": 1 });
        let config = RecognitionConfig::from_map(Some(&value));
        assert_eq!(config.minimum_text_height, Some(1.0));
    }
}
