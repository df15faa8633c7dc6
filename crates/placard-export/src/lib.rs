//! The last step of every card: shrink, bound, encode
//!
//! [`compress`] resamples the canvas to the size computed by
//! [`placard_core::compress::compressed_size`]; [`export`] does that and
//! then encodes PNG bytes.

pub mod png;

pub use png::{encode_png, encode_rgba, PNG_SIGNATURE};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use placard_core::compress::{compressed_size, CompressOptions};
use placard_core::Result;

/// Resample `canvas` to its bounded size with a Lanczos3 filter
pub fn compress(canvas: &RgbaImage, options: &CompressOptions) -> RgbaImage {
    let (width, height) = canvas.dimensions();
    let (new_width, new_height) = compressed_size(width, height, options);
    log::debug!(
        "compress {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );
    imageops::resize(canvas, new_width, new_height, FilterType::Lanczos3)
}

/// Compress and encode a finished canvas
pub fn export(canvas: &RgbaImage, options: &CompressOptions) -> Result<Vec<u8>> {
    encode_png(&compress(canvas, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_compress_applies_ratio_then_width_clamp() {
        let canvas = RgbaImage::from_pixel(2560, 834, Rgba([10, 20, 30, 255]));
        let out = compress(&canvas, &CompressOptions::default());
        assert_eq!(out.dimensions(), (1200, 390));
    }

    #[test]
    fn test_small_canvas_only_shrinks_by_ratio() {
        let canvas = RgbaImage::from_pixel(100, 50, Rgba([0, 0, 0, 255]));
        let out = compress(&canvas, &CompressOptions::default());
        assert_eq!(out.dimensions(), (70, 35));
    }
}
