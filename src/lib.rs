//! vision-text-bridge — uniform request/response bridge to native OCR
//!
//! Exposes each operating system's built-in text-recognition engine
//! through one contract: a backend-agnostic configuration map in, a
//! normalized [`aggregate::RecognitionResult`] out. The bridge decodes the
//! image, configures the engine, normalizes every bounding box into a
//! top-left-origin unit frame, and aggregates fragments into full text
//! with a mean confidence. The recognition algorithm itself always belongs
//! to the platform engine behind [`backend::RecognitionBackend`].
//!
//! ```no_run
//! use vision_text_bridge::TextRecognizer;
//!
//! # async fn demo(png: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = TextRecognizer::new();
//! let result = recognizer.recognize(&png, None).await?;
//! println!("{} ({} blocks)", result.full_text, result.metadata.total_blocks);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod backend;
pub mod config;
pub mod decode;
pub mod error;
pub mod facade;
pub mod geometry;
pub mod language;

pub use aggregate::{Observation, RecognitionResult, ResultMetadata, TextBlock};
pub use backend::{PlatformInfo, RawObservation, RecognitionBackend};
pub use config::{QualityTier, RecognitionConfig};
pub use decode::Raster;
pub use error::{ErrorEnvelope, RecognitionError};
pub use facade::TextRecognizer;
pub use geometry::{BoundingBox, CoordinateFrame, Origin, Units};
pub use language::{LanguageClassifier, ScriptRangeClassifier};
