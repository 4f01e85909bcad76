//! Dispatch façade
//!
//! The complete caller-facing surface: five named operations routed to the
//! recognition pipeline and capability queries, with every failure
//! converted into the structured error envelope. Each invocation is
//! stateless; decode → configure → recognize → normalize → aggregate runs
//! strictly in order within one request.

use std::sync::Arc;
use std::time::Instant;

use base64::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::aggregate::{aggregate, Observation, RecognitionResult};
use crate::backend::{platform_backend, PlatformInfo, RecognitionBackend};
use crate::config::RecognitionConfig;
use crate::decode::decode_image;
use crate::error::{ErrorEnvelope, RecognitionError};
use crate::geometry::{clamp_unit, normalize};
use crate::language::{LanguageClassifier, ScriptRangeClassifier};

/// Stateless text-recognition façade over one backend
pub struct TextRecognizer {
    backend: Arc<dyn RecognitionBackend>,
    classifier: Arc<dyn LanguageClassifier>,
}

impl TextRecognizer {
    /// Façade over the native backend for the running platform.
    pub fn new() -> Self {
        Self::with_backend(platform_backend())
    }

    /// Façade over an explicit backend.
    pub fn with_backend(backend: Arc<dyn RecognitionBackend>) -> Self {
        Self {
            backend,
            classifier: Arc::new(ScriptRangeClassifier),
        }
    }

    /// Replace the per-fragment language classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn LanguageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run the full recognition pipeline on encoded image bytes.
    pub async fn recognize(
        &self,
        image_bytes: &[u8],
        config_map: Option<&Value>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let started = Instant::now();
        let config = RecognitionConfig::from_map(config_map);
        debug!("recognize: tier={}, bytes={}", config.quality_tier.as_str(), image_bytes.len());

        let raster = decode_image(image_bytes)?;
        let raw = self.backend.recognize(&raster, &config).await?;

        let frame = self.backend.coordinate_frame();
        let observations: Vec<Observation> = raw
            .into_iter()
            .map(|fragment| {
                let language_hint = fragment
                    .language_hint
                    .or_else(|| self.classifier.classify(&fragment.text).map(str::to_string));
                Observation {
                    bounds: normalize(fragment.bounds, frame, raster.width, raster.height),
                    confidence: clamp_unit(fragment.confidence),
                    text: fragment.text,
                    language_hint,
                }
            })
            .collect();

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = aggregate(observations, elapsed_ms, &self.backend.info().label());
        info!(
            "recognized {} blocks in {}ms (confidence {:.2})",
            result.metadata.total_blocks, result.processing_time_ms, result.confidence
        );
        Ok(result)
    }

    /// Static descriptor of the selected backend.
    pub fn platform_info(&self) -> PlatformInfo {
        self.backend.info()
    }

    /// Whether recognition can run here at all.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Language tags the selected backend can recognize.
    pub fn supported_languages(&self) -> Vec<String> {
        self.backend.supported_languages()
    }

    /// Route a named operation to its handler.
    ///
    /// The wire surface: success is a JSON value shaped per operation,
    /// failure is always an [`ErrorEnvelope`]. Unrecognized operations get
    /// a `NOT_IMPLEMENTED` envelope rather than an error path of their own.
    pub async fn handle(&self, operation: &str, args: &Value) -> Result<Value, ErrorEnvelope> {
        debug!("dispatch: {operation}");
        self.dispatch(operation, args).await.map_err(ErrorEnvelope::from)
    }

    async fn dispatch(&self, operation: &str, args: &Value) -> Result<Value, RecognitionError> {
        match operation {
            "recognizeText" => {
                let bytes = image_bytes_arg(args)?;
                let result = self.recognize(&bytes, None).await?;
                to_wire(&result)
            }
            "recognizeTextWithConfig" => {
                let bytes = image_bytes_arg(args)?;
                let config = args
                    .get("config")
                    .filter(|v| v.is_object())
                    .ok_or_else(|| {
                        RecognitionError::InvalidArgument("config not provided".into())
                    })?;
                let result = self.recognize(&bytes, Some(config)).await?;
                to_wire(&result)
            }
            "getPlatformInfo" => to_wire(&self.platform_info()),
            "isAvailable" => Ok(Value::Bool(self.is_available())),
            "getSupportedLanguages" => to_wire(&self.supported_languages()),
            other => Err(RecognitionError::NotImplemented(other.to_string())),
        }
    }
}

impl Default for TextRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_wire<T: serde::Serialize>(value: &T) -> Result<Value, RecognitionError> {
    serde_json::to_value(value).map_err(|e| RecognitionError::Processing(e.to_string()))
}

/// Extract `imageBytes` from the argument map.
///
/// Accepts either a base64 string or a JSON array of byte values; anything
/// else is an argument error reported before any backend work starts.
fn image_bytes_arg(args: &Value) -> Result<Vec<u8>, RecognitionError> {
    let value = args
        .get("imageBytes")
        .ok_or_else(|| RecognitionError::InvalidArgument("image bytes not provided".into()))?;

    match value {
        Value::String(encoded) => BASE64_STANDARD.decode(encoded).map_err(|e| {
            RecognitionError::InvalidArgument(format!("imageBytes is not valid base64: {e}"))
        }),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .filter(|b| *b <= 255)
                    .map(|b| b as u8)
                    .ok_or_else(|| {
                        RecognitionError::InvalidArgument(
                            "imageBytes array must contain byte values".into(),
                        )
                    })
            })
            .collect(),
        _ => Err(RecognitionError::InvalidArgument(
            "imageBytes must be a base64 string or byte array".into(),
        )),
    }
}
