//! The contract between layout and fonts
//!
//! Layout never asks a font anything directly. It asks a [`TextMeasure`],
//! which keeps wrapping and fitting pure and lets tests swap in a fake font.

use crate::types::LineMetrics;
use std::sync::Arc;

/// Answers "how wide" and "how tall" for text at a pixel size
///
/// Implementations decide how text is measured: plain glyph advances,
/// emoji-aware clusters, a bitmap font. Layout code must not care which.
///
/// ```ignore
/// struct FixedAdvance;
///
/// impl TextMeasure for FixedAdvance {
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
///
///     fn text_width(&self, text: &str, size: u32) -> u32 {
///         text.chars().count() as u32 * size
///     }
///
///     fn line_metrics(&self, size: u32) -> LineMetrics {
///         LineMetrics::new(size as f32, 0.0)
///     }
/// }
/// ```
pub trait TextMeasure: Send + Sync {
    /// Used in logs
    fn name(&self) -> &'static str;

    /// Rendered width of `text` at `size` pixels, truncated to whole pixels
    fn text_width(&self, text: &str, size: u32) -> u32;

    /// Ascent and descent at `size` pixels
    fn line_metrics(&self, size: u32) -> LineMetrics;
}

impl<T: TextMeasure + ?Sized> TextMeasure for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        (**self).text_width(text, size)
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        (**self).line_metrics(size)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        (**self).text_width(text, size)
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        (**self).line_metrics(size)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Half-width ASCII, full-width everything else; 80/20 ascent split
    pub struct CellMeasure;

    impl TextMeasure for CellMeasure {
        fn name(&self) -> &'static str {
            "cell"
        }

        fn text_width(&self, text: &str, size: u32) -> u32 {
            let halves: u32 = text
                .chars()
                .map(|ch| if ch.is_ascii() { 1 } else { 2 })
                .sum();
            halves * size / 2
        }

        fn line_metrics(&self, size: u32) -> LineMetrics {
            LineMetrics::new(size as f32 * 0.8, size as f32 * 0.2)
        }
    }
}
