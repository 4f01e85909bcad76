//! Fallback backend for platforms without a native recognition engine
//!
//! Keeps the full operation surface answerable everywhere: availability
//! and capability queries succeed, recognition fails with
//! `UNSUPPORTED_PLATFORM`.

use async_trait::async_trait;

use crate::config::RecognitionConfig;
use crate::decode::Raster;
use crate::error::RecognitionError;
use crate::geometry::CoordinateFrame;

use super::{PlatformInfo, RawObservation, RecognitionBackend};

/// Backend for targets with no native OCR engine
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

#[async_trait]
impl RecognitionBackend for UnsupportedBackend {
    fn info(&self) -> PlatformInfo {
        PlatformInfo {
            platform: std::env::consts::OS.to_string(),
            platform_version: None,
            engine: "none".to_string(),
            engine_version: String::new(),
            capabilities: Vec::new(),
            supports_language_correction: false,
            supports_confidence_scores: false,
            supports_bounding_boxes: false,
            supports_language_detection: false,
            supported_recognition_levels: Vec::new(),
        }
    }

    fn is_available(&self) -> bool {
        false
    }

    fn supported_languages(&self) -> Vec<String> {
        Vec::new()
    }

    fn coordinate_frame(&self) -> CoordinateFrame {
        CoordinateFrame::CANONICAL
    }

    async fn recognize(
        &self,
        _raster: &Raster,
        _config: &RecognitionConfig,
    ) -> Result<Vec<RawObservation>, RecognitionError> {
        Err(RecognitionError::UnsupportedPlatform)
    }
}
