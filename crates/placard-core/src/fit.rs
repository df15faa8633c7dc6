//! Font-size search
//!
//! The search assumes a larger font never yields a smaller wrapped block.
//! That holds for plain advance-width fonts but is not verified for fonts with
//! heavy kerning, where a size step can change how words break. No correction
//! is attempted; the occasional slightly-too-small result is accepted.

use crate::traits::TextMeasure;
use crate::types::{LayoutResult, LineMetrics, Rect};
use crate::wrap::wrap;

/// Extra leading between lines, as a fraction of ascent plus descent
pub const DEFAULT_LINE_SPACING: f32 = 0.15;

/// Pixel distance between consecutive baselines
pub fn line_height(metrics: LineMetrics, line_spacing: f32) -> u32 {
    (metrics.height() * (1.0 + line_spacing)).round() as u32
}

/// Wrap `text` at `size` and measure the block it produces
pub fn layout_at<M: TextMeasure + ?Sized>(
    text: &str,
    size: u32,
    max_width: u32,
    line_spacing: f32,
    measure: &M,
) -> LayoutResult {
    let lines = wrap(text, measure, size, max_width);
    let line_height = line_height(measure.line_metrics(size), line_spacing);
    let block_width = lines
        .iter()
        .map(|line| measure.text_width(line, size))
        .max()
        .unwrap_or(0);
    let line_count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let block_height = line_height.saturating_mul(line_count).max(1);

    LayoutResult {
        font_size: size,
        lines,
        line_height,
        block_width,
        block_height,
    }
}

/// Find the largest font size whose wrapped block fits inside `region`
///
/// The upper bound is the region height, lowered to `max_height_cap` when one
/// is given (a cap of zero counts as no cap). When nothing fits, even at one
/// pixel, the size-1 layout is returned anyway and overflows the region.
pub fn fit<M: TextMeasure + ?Sized>(
    text: &str,
    region: &Rect,
    max_height_cap: Option<u32>,
    line_spacing: f32,
    measure: &M,
) -> LayoutResult {
    let region_w = region.width();
    let region_h = region.height();

    let mut lo = 1u32;
    let mut hi = max_height_cap
        .filter(|&cap| cap > 0)
        .map_or(region_h, |cap| cap.min(region_h));
    let mut best: Option<LayoutResult> = None;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let candidate = layout_at(text, mid, region_w, line_spacing, measure);
        let fits = candidate.block_width <= region_w && candidate.block_height <= region_h;
        log::trace!(
            "fit: size {} -> {}x{} ({})",
            mid,
            candidate.block_width,
            candidate.block_height,
            if fits { "fits" } else { "overflows" }
        );
        if fits {
            best = Some(candidate);
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    match best {
        Some(layout) => {
            log::debug!(
                "fit: chose {}px, {} line(s), block {}x{} in {}x{}",
                layout.font_size,
                layout.lines.len(),
                layout.block_width,
                layout.block_height,
                region_w,
                region_h
            );
            layout
        }
        None => {
            log::debug!(
                "fit: nothing fits {}x{} via {}, falling back to 1px",
                region_w,
                region_h,
                measure.name()
            );
            layout_at(text, 1, region_w, line_spacing, measure)
        }
    }
}
