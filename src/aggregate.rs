//! Result aggregation
//!
//! Folds the normalized per-fragment observations of one request into the
//! final [`RecognitionResult`]: concatenated full text, mean confidence,
//! detected language, and the block-count metadata the wire contract
//! promises. Pure transformation; every call builds a fresh result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::BoundingBox;

/// One recognized text fragment after coordinate normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub text: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Bounding box in the canonical frame
    pub bounds: BoundingBox,
    /// Language tag for this fragment, if any classifier produced one
    pub language_hint: Option<String>,
}

/// One text block in the response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    /// Open-ended per-block metadata (e.g. `detectedLanguage`)
    pub metadata: Map<String, Value>,
}

/// Response-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    /// Always equals `text_blocks.len()` of the enclosing result
    pub total_blocks: usize,
    /// Label of the platform/engine that produced the result
    pub platform: String,
    /// All distinct per-block language tags, first-seen order
    pub detected_languages: Vec<String>,
    /// Backend-specific extras
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Final recognition response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    /// Block texts joined with single spaces, trimmed
    pub full_text: String,
    /// Blocks in backend emission order (not guaranteed reading order)
    pub text_blocks: Vec<TextBlock>,
    /// Arithmetic mean of block confidences; 0.0 when there are no blocks
    pub confidence: f64,
    pub processing_time_ms: u64,
    /// First distinct per-block language tag, if any
    pub detected_language: Option<String>,
    pub metadata: ResultMetadata,
}

/// Fold observations into a [`RecognitionResult`].
pub fn aggregate(
    observations: Vec<Observation>,
    processing_time_ms: u64,
    platform: &str,
) -> RecognitionResult {
    let mut text_blocks = Vec::with_capacity(observations.len());
    let mut full_text = String::new();
    let mut confidence_sum = 0.0;
    let mut detected_languages: Vec<String> = Vec::new();

    for observation in observations {
        if !full_text.is_empty() {
            full_text.push(' ');
        }
        full_text.push_str(&observation.text);
        confidence_sum += observation.confidence;

        let mut metadata = Map::new();
        if let Some(language) = &observation.language_hint {
            metadata.insert("detectedLanguage".into(), Value::String(language.clone()));
            if !detected_languages.iter().any(|l| l == language) {
                detected_languages.push(language.clone());
            }
        }

        text_blocks.push(TextBlock {
            text: observation.text,
            confidence: observation.confidence,
            bounding_box: observation.bounds,
            metadata,
        });
    }

    let confidence = if text_blocks.is_empty() {
        0.0
    } else {
        confidence_sum / text_blocks.len() as f64
    };

    RecognitionResult {
        full_text: full_text.trim().to_string(),
        confidence,
        detected_language: detected_languages.first().cloned(),
        processing_time_ms,
        metadata: ResultMetadata {
            total_blocks: text_blocks.len(),
            platform: platform.to_string(),
            detected_languages,
            extra: Map::new(),
        },
        text_blocks,
    }
}
