//! Pixel operations on the card canvas
//!
//! The canvas is a straight-alpha `RgbaImage`. Everything here mutates it in
//! place; callers own a private copy for the duration of one render.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use placard_core::error::{RenderError, Result};
use placard_core::types::Placement;
use placard_core::Color;

use crate::glyph::GlyphMask;

/// Where the portrait lands on a background when building base images
pub const DEFAULT_PORTRAIT_OFFSET: (i32, i32) = (0, 134);

/// Open an image file as RGBA
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| RenderError::ImageDecode(format!("{}: {}", path.display(), e)))?;
    Ok(image.to_rgba8())
}

/// Decode an in-memory PNG, JPEG, ... as RGBA
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let image =
        image::load_from_memory(bytes).map_err(|e| RenderError::ImageDecode(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Resize `content` to the placement size and composite it at the placement origin
///
/// The content's alpha channel acts as the mask; opaque pixels replace the canvas.
pub fn paste(canvas: &mut RgbaImage, content: &RgbaImage, placement: &Placement) {
    let resized;
    let scaled = if content.dimensions() == (placement.width, placement.height) {
        content
    } else {
        resized = imageops::resize(
            content,
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        );
        &resized
    };
    imageops::overlay(
        canvas,
        scaled,
        i64::from(placement.x),
        i64::from(placement.y),
    );
}

/// Composite a full-canvas decoration at the top-left corner
pub fn overlay_at_origin(canvas: &mut RgbaImage, overlay: &RgbaImage) {
    imageops::overlay(canvas, overlay, 0, 0);
}

/// Put a character portrait onto a background, leaving the background untouched
pub fn compose_base(background: &RgbaImage, portrait: &RgbaImage, offset: (i32, i32)) -> RgbaImage {
    let mut base = background.clone();
    imageops::overlay(&mut base, portrait, i64::from(offset.0), i64::from(offset.1));
    base
}

/// Source-over one coverage mask onto the canvas with its top-left at `(x, y)`
///
/// Pixels that fall outside the canvas are clipped.
pub fn blend_mask(canvas: &mut RgbaImage, mask: &GlyphMask, x: i32, y: i32, color: Color) {
    if mask.is_empty() || color.a == 0 {
        return;
    }
    let (canvas_w, canvas_h) = canvas.dimensions();

    for gy in 0..mask.height {
        let canvas_y = i64::from(y) + i64::from(gy);
        if canvas_y < 0 || canvas_y >= i64::from(canvas_h) {
            continue;
        }
        for gx in 0..mask.width {
            let canvas_x = i64::from(x) + i64::from(gx);
            if canvas_x < 0 || canvas_x >= i64::from(canvas_w) {
                continue;
            }

            let coverage = u32::from(mask.coverage[(gy * mask.width + gx) as usize]);
            if coverage == 0 {
                continue;
            }

            let pixel = canvas.get_pixel_mut(canvas_x as u32, canvas_y as u32);
            blend_pixel(&mut pixel.0, color, coverage);
        }
    }
}

fn blend_pixel(dst: &mut [u8; 4], color: Color, coverage: u32) {
    let src_a = coverage * u32::from(color.a) / 255;
    if src_a == 0 {
        return;
    }
    let dst_a = u32::from(dst[3]);
    let inv_a = 255 - src_a;

    // Straight alpha: weight the destination by its own alpha before mixing
    let out_a = src_a + dst_a * inv_a / 255;
    if out_a == 0 {
        return;
    }
    let src = [color.r, color.g, color.b];
    for (channel, &src_c) in dst.iter_mut().take(3).zip(src.iter()) {
        let mixed = u32::from(src_c) * src_a + u32::from(*channel) * dst_a * inv_a / 255;
        *channel = (mixed / out_a).min(255) as u8;
    }
    dst[3] = out_a.min(255) as u8;
}
