//! Windows.Media.Ocr backend
//!
//! Adapter over the built-in Windows OCR engine. The engine works on
//! BGRA software bitmaps and reports word boxes in absolute pixels with a
//! top-left origin; it exposes no per-word confidence, so a constant is
//! reported and `supports_confidence_scores` is false in the descriptor.

use async_trait::async_trait;
use tracing::{debug, warn};
use windows::{
    core::HSTRING,
    Foundation::IAsyncOperation,
    Globalization::Language,
    Graphics::Imaging::{BitmapPixelFormat, SoftwareBitmap},
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrResult as WinOcrResult},
};

use crate::config::RecognitionConfig;
use crate::decode::Raster;
use crate::error::RecognitionError;
use crate::geometry::{BoundingBox, CoordinateFrame, Origin, Units};

use super::{PlatformInfo, RawObservation, RecognitionBackend};

/// Windows.Media.Ocr reports no confidence; emitted fragments carry this.
const WORD_CONFIDENCE: f64 = 1.0;

/// Windows built-in OCR backend
pub struct WindowsBackend {
    engine: WinOcrEngine,
    language: String,
}

impl WindowsBackend {
    /// Create a backend for the given BCP-47 language tag.
    ///
    /// Falls back to the user-profile languages when the requested tag is
    /// not installed.
    pub fn new(language_tag: &str) -> Result<Self, RecognitionError> {
        match engine_for_language(language_tag)? {
            Some(engine) => Ok(Self {
                engine,
                language: language_tag.to_string(),
            }),
            None => {
                warn!("OCR language '{language_tag}' not installed, using user profile languages");
                let engine = WinOcrEngine::TryCreateFromUserProfileLanguages().map_err(win_err)?;
                let language = engine
                    .RecognizerLanguage()
                    .and_then(|l| l.LanguageTag())
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                Ok(Self { engine, language })
            }
        }
    }

    /// Create a backend with the user's profile languages.
    pub fn new_default() -> Result<Self, RecognitionError> {
        let engine = WinOcrEngine::TryCreateFromUserProfileLanguages().map_err(win_err)?;
        let language = engine
            .RecognizerLanguage()
            .and_then(|l| l.LanguageTag())
            .map(|t| t.to_string())
            .unwrap_or_default();
        Ok(Self { engine, language })
    }

    /// The engine honoring the request's preferred language, if it differs
    /// from the one this backend was built with.
    fn engine_for_request(&self, config: &RecognitionConfig) -> WinOcrEngine {
        let preferred = config
            .preferred_languages
            .as_ref()
            .and_then(|langs| langs.first());
        match preferred {
            Some(tag) if *tag != self.language => match engine_for_language(tag) {
                Ok(Some(engine)) => engine,
                _ => {
                    warn!("preferred OCR language '{tag}' unavailable, keeping '{}'", self.language);
                    self.engine.clone()
                }
            },
            _ => self.engine.clone(),
        }
    }
}

#[async_trait]
impl RecognitionBackend for WindowsBackend {
    fn info(&self) -> PlatformInfo {
        PlatformInfo {
            platform: "windows".to_string(),
            platform_version: None,
            engine: "Windows.Media.Ocr".to_string(),
            engine_version: "WinRT".to_string(),
            capabilities: vec![
                "text_recognition".to_string(),
                "bounding_boxes".to_string(),
            ],
            supports_language_correction: false,
            supports_confidence_scores: false,
            supports_bounding_boxes: true,
            supports_language_detection: false,
            supported_recognition_levels: vec!["standard".to_string()],
        }
    }

    fn is_available(&self) -> bool {
        true
    }

    fn supported_languages(&self) -> Vec<String> {
        available_languages().unwrap_or_default()
    }

    fn coordinate_frame(&self) -> CoordinateFrame {
        CoordinateFrame {
            origin: Origin::TopLeft,
            units: Units::Pixels,
        }
    }

    async fn recognize(
        &self,
        raster: &Raster,
        config: &RecognitionConfig,
    ) -> Result<Vec<RawObservation>, RecognitionError> {
        debug!("Windows OCR on {}x{} raster", raster.width, raster.height);

        let bitmap = software_bitmap_from_raster(raster)?;
        let engine = self.engine_for_request(config);

        // Media.Ocr has no speed/accuracy or correction knobs; the quality
        // tier and correction toggle are accepted but inert here.
        let async_op: IAsyncOperation<WinOcrResult> =
            engine.RecognizeAsync(&bitmap).map_err(win_err)?;
        let result = async_op.get().map_err(win_err)?;

        let mut observations = Vec::new();
        let lines = result.Lines().map_err(win_err)?;
        for i in 0..lines.Size().map_err(win_err)? {
            let line = lines.GetAt(i).map_err(win_err)?;
            let words = line.Words().map_err(win_err)?;
            for j in 0..words.Size().map_err(win_err)? {
                let word = words.GetAt(j).map_err(win_err)?;
                let text = word.Text().map_err(win_err)?.to_string();
                if text.trim().is_empty() {
                    continue;
                }
                let rect = word.BoundingRect().map_err(win_err)?;
                observations.push(RawObservation {
                    text,
                    confidence: WORD_CONFIDENCE,
                    bounds: BoundingBox::new(
                        f64::from(rect.X),
                        f64::from(rect.Y),
                        f64::from(rect.Width),
                        f64::from(rect.Height),
                    ),
                    language_hint: None,
                });
            }
        }

        debug!("Windows OCR produced {} fragments", observations.len());
        Ok(observations)
    }
}

fn win_err(e: windows::core::Error) -> RecognitionError {
    RecognitionError::Backend(e.message().to_string())
}

/// Engine for a specific installed language, `None` if not installed.
fn engine_for_language(tag: &str) -> Result<Option<WinOcrEngine>, RecognitionError> {
    let language = Language::CreateLanguage(&HSTRING::from(tag)).map_err(win_err)?;
    if !WinOcrEngine::IsLanguageSupported(&language).map_err(win_err)? {
        return Ok(None);
    }
    WinOcrEngine::TryCreateFromLanguage(&language)
        .map(Some)
        .map_err(win_err)
}

/// Installed recognizer language tags.
fn available_languages() -> Result<Vec<String>, RecognitionError> {
    let languages = WinOcrEngine::AvailableRecognizerLanguages().map_err(win_err)?;
    let mut tags = Vec::new();
    for i in 0..languages.Size().map_err(win_err)? {
        let language = languages.GetAt(i).map_err(win_err)?;
        tags.push(language.LanguageTag().map_err(win_err)?.to_string());
    }
    Ok(tags)
}

/// Build a BGRA SoftwareBitmap from an RGBA raster.
fn software_bitmap_from_raster(raster: &Raster) -> Result<SoftwareBitmap, RecognitionError> {
    use windows::Storage::Streams::{DataReader, DataWriter, InMemoryRandomAccessStream};

    // The engine expects BGRA.
    let mut bgra = raster.pixels.clone();
    for chunk in bgra.chunks_exact_mut(4) {
        chunk.swap(0, 2);
    }

    let stream = InMemoryRandomAccessStream::new().map_err(win_err)?;
    let writer = DataWriter::CreateDataWriter(&stream).map_err(win_err)?;
    writer.WriteBytes(&bgra).map_err(win_err)?;
    writer.StoreAsync().map_err(win_err)?.get().map_err(win_err)?;
    writer.FlushAsync().map_err(win_err)?.get().map_err(win_err)?;
    stream.Seek(0).map_err(win_err)?;

    let bitmap = SoftwareBitmap::Create(
        BitmapPixelFormat::Bgra8,
        raster.width as i32,
        raster.height as i32,
    )
    .map_err(win_err)?;

    let input = stream.GetInputStreamAt(0).map_err(win_err)?;
    let reader = DataReader::CreateDataReader(&input).map_err(win_err)?;
    reader
        .LoadAsync(bgra.len() as u32)
        .map_err(win_err)?
        .get()
        .map_err(win_err)?;
    let buffer = reader.ReadBuffer(bgra.len() as u32).map_err(win_err)?;
    bitmap.CopyFromBuffer(&buffer).map_err(win_err)?;

    Ok(bitmap)
}
