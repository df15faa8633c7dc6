//! PNG encoding
//!
//! Cards are always written as 8-bit RGBA so transparent template areas
//! survive the round trip.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use placard_core::error::{ExportError, Result};

/// The eight bytes every PNG file starts with
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a canvas as PNG
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let (width, height) = canvas.dimensions();
    encode_rgba(canvas.as_raw(), width, height)
}

/// Encode raw, row-major RGBA bytes as PNG
///
/// Fails when `data` holds fewer than `width * height * 4` bytes.
pub fn encode_rgba(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = (width as usize) * (height as usize) * 4;
    if data.len() < expected {
        return Err(ExportError::BufferTooSmall {
            expected,
            actual: data.len(),
        }
        .into());
    }

    let mut png_data = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png_data, CompressionType::Default, FilterType::Sub);
    encoder
        .write_image(&data[..expected], width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}
