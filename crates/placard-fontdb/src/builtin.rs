//! The last link of the fallback chain: a bitmap font compiled into the binary
//!
//! Glyphs come from embedded-graphics' 10x20 ASCII font and are scaled with
//! nearest-neighbour sampling, so any size renders, if blockily. Characters
//! outside ASCII draw as `?`.

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use placard_core::{LineMetrics, TextMeasure};

const CELL_WIDTH: u32 = 10;
const CELL_HEIGHT: u32 = 20;

/// A scaled 8-bit coverage mask for one builtin glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major, 0 or 255
    pub coverage: Vec<u8>,
}

/// Collects the lit pixels of one character cell
struct CellCapture {
    lit: [bool; (CELL_WIDTH * CELL_HEIGHT) as usize],
}

impl OriginDimensions for CellCapture {
    fn size(&self) -> Size {
        Size::new(CELL_WIDTH, CELL_HEIGHT)
    }
}

impl DrawTarget for CellCapture {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if color.is_on() && x < CELL_WIDTH && y < CELL_HEIGHT {
                self.lit[(y * CELL_WIDTH + x) as usize] = true;
            }
        }
        Ok(())
    }
}

/// The builtin monospace bitmap font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinFont;

impl BuiltinFont {
    /// Advance of one character at `size` pixels
    pub fn advance(size: u32) -> u32 {
        (size * CELL_WIDTH / CELL_HEIGHT).max(1)
    }

    fn cell(ch: char) -> CellCapture {
        let mut capture = CellCapture {
            lit: [false; (CELL_WIDTH * CELL_HEIGHT) as usize],
        };
        let mut utf8 = [0u8; 4];
        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        Text::with_baseline(ch.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
            .draw(&mut capture)
            .unwrap_or_else(|never| match never {});
        capture
    }

    /// Rasterize `ch` into a `advance(size)` x `size` mask
    pub fn rasterize(&self, ch: char, size: u32) -> BitmapGlyph {
        let size = size.max(1);
        let width = Self::advance(size);
        let cell = Self::cell(ch);

        let mut coverage = Vec::with_capacity((width * size) as usize);
        for y in 0..size {
            let src_y = (y * CELL_HEIGHT / size).min(CELL_HEIGHT - 1);
            for x in 0..width {
                let src_x = (x * CELL_WIDTH / width).min(CELL_WIDTH - 1);
                let lit = cell.lit[(src_y * CELL_WIDTH + src_x) as usize];
                coverage.push(if lit { 255 } else { 0 });
            }
        }

        BitmapGlyph {
            width,
            height: size,
            coverage,
        }
    }
}

impl TextMeasure for BuiltinFont {
    fn name(&self) -> &'static str {
        "builtin-bitmap"
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        count.saturating_mul(Self::advance(size))
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        LineMetrics::new(size as f32 * 0.8, size as f32 * 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_as_half_em_monospace() {
        assert_eq!(BuiltinFont.text_width("abcd", 20), 40);
        assert_eq!(BuiltinFont.text_width("你好", 40), 40);
        assert_eq!(BuiltinFont.text_width("", 40), 0);
        assert_eq!(BuiltinFont.line_metrics(20).height(), 20.0);
    }

    #[test]
    fn rasterized_glyph_has_ink() {
        let glyph = BuiltinFont.rasterize('A', 40);
        assert_eq!((glyph.width, glyph.height), (20, 40));
        assert_eq!(glyph.coverage.len(), 800);
        assert!(glyph.coverage.iter().any(|&c| c == 255));
    }

    #[test]
    fn space_is_blank() {
        let glyph = BuiltinFont.rasterize(' ', 20);
        assert!(glyph.coverage.iter().all(|&c| c == 0));
    }

    #[test]
    fn tiny_sizes_still_produce_a_pixel() {
        let glyph = BuiltinFont.rasterize('x', 1);
        assert_eq!((glyph.width, glyph.height), (1, 1));
    }
}
