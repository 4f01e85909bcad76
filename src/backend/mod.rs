//! Recognition backends
//!
//! The recognition engine is an external capability: detect text in a
//! raster, return fragments with positions and confidence. Everything
//! engine-specific lives behind [`RecognitionBackend`]; the pipeline only
//! picks which implementation to call and never branches on its identity.
//!
//! Shipped adapters:
//! - Windows.Media.Ocr (Windows builds)
//! - an explicit "unsupported" backend for every other target

pub mod unsupported;
#[cfg(target_os = "windows")]
pub mod windows;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RecognitionConfig;
use crate::decode::Raster;
use crate::error::RecognitionError;
use crate::geometry::{BoundingBox, CoordinateFrame};

/// Static descriptor of a backend's engine and capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    /// Operating system / platform label
    pub platform: String,
    /// OS version, when the backend can report one
    pub platform_version: Option<String>,
    /// Recognition engine name
    pub engine: String,
    pub engine_version: String,
    /// Capability tags (e.g. `text_recognition`, `bounding_boxes`)
    pub capabilities: Vec<String>,
    pub supports_language_correction: bool,
    pub supports_confidence_scores: bool,
    pub supports_bounding_boxes: bool,
    pub supports_language_detection: bool,
    /// Quality tiers the engine understands
    pub supported_recognition_levels: Vec<String>,
}

impl PlatformInfo {
    /// Label used in result metadata, e.g. "windows Windows.Media.Ocr".
    pub fn label(&self) -> String {
        format!("{} {}", self.platform, self.engine)
    }
}

/// One backend-reported text fragment, prior to normalization
///
/// `bounds` is expressed in the backend's own [`CoordinateFrame`].
/// Fragments with no usable candidate text are skipped by the backend and
/// never emitted.
#[derive(Debug, Clone)]
pub struct RawObservation {
    pub text: String,
    pub confidence: f64,
    pub bounds: BoundingBox,
    /// Language tag when the engine reports one per fragment
    pub language_hint: Option<String>,
}

/// The external text-recognition capability
///
/// One `recognize` call resolves exactly once, on either the success or
/// failure path; implementations hold no per-request state.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Static engine/capability descriptor
    fn info(&self) -> PlatformInfo;

    /// Whether recognition can run on this platform/version
    fn is_available(&self) -> bool;

    /// Language tags the engine can recognize
    fn supported_languages(&self) -> Vec<String>;

    /// The coordinate convention this backend emits boxes in
    fn coordinate_frame(&self) -> CoordinateFrame;

    /// Detect text in a decoded raster.
    async fn recognize(
        &self,
        raster: &Raster,
        config: &RecognitionConfig,
    ) -> Result<Vec<RawObservation>, RecognitionError>;
}

/// Select the recognition backend for the running target.
///
/// Falls back to [`unsupported::UnsupportedBackend`] when no native engine
/// can be initialized, so `isAvailable` stays answerable everywhere.
pub fn platform_backend() -> Arc<dyn RecognitionBackend> {
    #[cfg(target_os = "windows")]
    {
        match windows::WindowsBackend::new_default() {
            Ok(backend) => return Arc::new(backend),
            Err(e) => tracing::warn!("Windows OCR engine unavailable: {e}"),
        }
    }

    Arc::new(unsupported::UnsupportedBackend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_info_label() {
        let info = unsupported::UnsupportedBackend.info();
        assert!(info.label().contains(&info.platform));
        assert!(info.label().contains(&info.engine));
    }

    #[test]
    fn test_platform_info_wire_shape() {
        let info = unsupported::UnsupportedBackend.info();
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("supportsBoundingBoxes").is_some());
        assert!(json.get("supportedRecognitionLevels").is_some());
        assert!(json.get("capabilities").is_some());
    }

    #[test]
    fn test_platform_backend_always_selects_something() {
        let backend = platform_backend();
        // On targets without a native engine this is the unsupported
        // backend, which still answers availability queries.
        let _ = backend.is_available();
    }
}
