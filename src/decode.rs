//! Image decoding
//!
//! Turns the raw encoded bytes from a request into an RGBA raster the
//! recognition backends can consume. Decoding failures surface as
//! `INVALID_IMAGE`; nothing else in the pipeline touches encoded bytes.

use tracing::debug;

use crate::error::RecognitionError;

/// Decoded image, RGBA8, row-major
#[derive(Debug, Clone)]
pub struct Raster {
    /// Pixel data, 4 bytes per pixel
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA raster.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, RecognitionError> {
    if bytes.is_empty() {
        return Err(RecognitionError::InvalidImage("image bytes are empty".into()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| RecognitionError::InvalidImage(e.to_string()))?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("Decoded {}x{} image ({} bytes in)", width, height, bytes.len());

    Ok(Raster {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}
