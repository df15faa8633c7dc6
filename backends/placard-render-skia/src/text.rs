//! Drawing laid-out text onto the canvas
//!
//! A [`TextPainter`] pairs one resolved font face with the glyph cache. It
//! measures with the same rules it draws with, so a line that fit during the
//! font-size search lands exactly where layout expected.

use std::sync::Arc;

use image::RgbaImage;
use placard_core::highlight::{segment, HighlightState};
use placard_core::types::{Align, LayoutResult, NameLabel, Rect, VAlign};
use placard_core::{Color, LineMetrics, TextMeasure};
use placard_fontdb::{BuiltinFont, FontFace};
#[cfg(feature = "emoji")]
use placard_unicode::{EmojiAware, SegmentKind};

use crate::canvas::blend_mask;
use crate::glyph::GlyphCache;

/// Shadow offset under body text
pub const TEXT_SHADOW_OFFSET: (i32, i32) = (4, 4);

/// Shadow offset under name labels
pub const LABEL_SHADOW_OFFSET: (i32, i32) = (2, 2);

/// Colors and alignment for a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub highlight: Color,
    pub shadow: Color,
    pub align: Align,
    pub valign: VAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::white(),
            highlight: Color::highlight_blue(),
            shadow: Color::black(),
            align: Align::Left,
            valign: VAlign::Top,
        }
    }
}

enum Metrics {
    Plain(Arc<FontFace>),
    #[cfg(feature = "emoji")]
    Emoji(EmojiAware<Arc<FontFace>>),
}

/// A run of text that is drawn one way
enum Piece<'a> {
    Glyphs(&'a str),
    #[cfg_attr(not(feature = "emoji"), allow(dead_code))]
    Emoji(&'a str),
}

pub struct TextPainter {
    face: Arc<FontFace>,
    metrics: Metrics,
    glyphs: Arc<GlyphCache>,
}

impl TextPainter {
    /// A painter for `face`; `emoji` sizes emoji clusters as one-em squares
    pub fn new(face: Arc<FontFace>, glyphs: Arc<GlyphCache>, emoji: bool) -> Self {
        let metrics = Self::metrics_for(face.clone(), emoji);
        Self {
            face,
            metrics,
            glyphs,
        }
    }

    #[cfg(feature = "emoji")]
    fn metrics_for(face: Arc<FontFace>, emoji: bool) -> Metrics {
        if emoji {
            Metrics::Emoji(EmojiAware::new(face))
        } else {
            Metrics::Plain(face)
        }
    }

    #[cfg(not(feature = "emoji"))]
    fn metrics_for(face: Arc<FontFace>, emoji: bool) -> Metrics {
        if emoji {
            log::debug!("emoji measurement unavailable in this build; using glyph advances");
        }
        Metrics::Plain(face)
    }

    pub fn face(&self) -> &Arc<FontFace> {
        &self.face
    }

    fn pieces<'a>(&self, text: &'a str) -> Vec<Piece<'a>> {
        match &self.metrics {
            Metrics::Plain(_) => vec![Piece::Glyphs(text)],
            #[cfg(feature = "emoji")]
            Metrics::Emoji(aware) => aware
                .segmenter()
                .segments(text)
                .into_iter()
                .map(|segment| match segment.kind {
                    SegmentKind::Text => Piece::Glyphs(segment.text),
                    SegmentKind::Emoji => Piece::Emoji(segment.text),
                })
                .collect(),
        }
    }

    /// Draw `text` with its ascender line at `top`; returns the measured width
    pub fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        top: i32,
        size: u32,
        color: Color,
    ) -> u32 {
        let baseline = top + self.face.line_metrics(size).ascent.round() as i32;
        let mut start = x;
        for piece in self.pieces(text) {
            match piece {
                Piece::Glyphs(run) => {
                    self.draw_glyphs(canvas, run, start, baseline, size, color);
                    start += self.face.text_width(run, size) as i32;
                }
                Piece::Emoji(cluster) => {
                    self.draw_emoji(canvas, cluster, start, baseline, size, color);
                    start += size as i32;
                }
            }
        }
        start.abs_diff(x)
    }

    fn draw_glyphs(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        baseline: i32,
        size: u32,
        color: Color,
    ) {
        let mut pen = x as f32;
        match self.face.as_ref() {
            FontFace::Outline(font) => {
                let scale = size as f32 / f32::from(font.units_per_em());
                for glyph_id in font.glyph_ids(text) {
                    let mask = self.glyphs.outline_glyph(font, glyph_id, size);
                    let left = pen.floor() as i32 + mask.bearing_x;
                    blend_mask(canvas, &mask, left, baseline - mask.bearing_y, color);
                    pen += f32::from(font.advance_units(glyph_id)) * scale;
                }
            }
            FontFace::Builtin(_) => {
                let advance = BuiltinFont::advance(size) as f32;
                for ch in text.chars() {
                    let mask = self.glyphs.glyph(&self.face, ch, size);
                    let left = pen as i32 + mask.bearing_x;
                    blend_mask(canvas, &mask, left, baseline - mask.bearing_y, color);
                    pen += advance;
                }
            }
        }
    }

    /// Emoji the font happens to cover are centered in their square; the rest leave a gap
    fn draw_emoji(
        &self,
        canvas: &mut RgbaImage,
        cluster: &str,
        x: i32,
        baseline: i32,
        size: u32,
        color: Color,
    ) {
        let (Some(ch), FontFace::Outline(font)) = (cluster.chars().next(), self.face.as_ref())
        else {
            return;
        };
        let Some(glyph_id) = font.glyph_id(ch) else {
            log::trace!("no glyph for emoji U+{:04X}", u32::from(ch));
            return;
        };
        let mask = self.glyphs.outline_glyph(font, glyph_id, size);
        let inset = (size.saturating_sub(mask.width) / 2) as i32;
        blend_mask(canvas, &mask, x + inset, baseline - mask.bearing_y, color);
    }

    /// Draw `text` over a copy of itself in `shadow`, shifted by `offset`
    #[allow(clippy::too_many_arguments)]
    pub fn draw_shadowed(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        (x, top): (i32, i32),
        size: u32,
        color: Color,
        shadow: Color,
        offset: (i32, i32),
    ) -> u32 {
        self.draw_text(canvas, text, x + offset.0, top + offset.1, size, shadow);
        self.draw_text(canvas, text, x, top, size, color)
    }

    /// Draw a fitted block inside `rect`, highlighting bracketed spans
    pub fn draw_layout(
        &self,
        canvas: &mut RgbaImage,
        layout: &LayoutResult,
        rect: &Rect,
        style: &TextStyle,
    ) {
        let size = layout.font_size;
        let mut y = style.valign.origin(rect.y1(), rect.y2(), layout.block_height);
        let mut state = HighlightState::Plain;

        for line in &layout.lines {
            let line_width = self.text_width(line, size);
            let mut x = style.align.origin(rect.x1(), rect.x2(), line_width);

            let (runs, next) = segment(line, state, style.color, style.highlight);
            state = next;
            for run in runs {
                self.draw_shadowed(
                    canvas,
                    &run.text,
                    (x, y),
                    size,
                    run.color,
                    style.shadow,
                    TEXT_SHADOW_OFFSET,
                );
                x += self.text_width(&run.text, size) as i32;
            }
            y += layout.line_height as i32;
        }

        log::debug!(
            "drew {} lines at {}px with {}",
            layout.lines.len(),
            size,
            self.face.id()
        );
    }

    /// Draw each label at its fixed position and size
    pub fn draw_name_labels(&self, canvas: &mut RgbaImage, labels: &[NameLabel]) {
        for label in labels.iter().filter(|label| !label.text.is_empty()) {
            self.draw_shadowed(
                canvas,
                &label.text,
                label.position,
                label.size,
                label.color,
                Color::black(),
                LABEL_SHADOW_OFFSET,
            );
        }
    }
}

impl TextMeasure for TextPainter {
    fn name(&self) -> &'static str {
        match &self.metrics {
            Metrics::Plain(face) => face.name(),
            #[cfg(feature = "emoji")]
            Metrics::Emoji(aware) => aware.name(),
        }
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        match &self.metrics {
            Metrics::Plain(face) => face.text_width(text, size),
            #[cfg(feature = "emoji")]
            Metrics::Emoji(aware) => aware.text_width(text, size),
        }
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        self.face.line_metrics(size)
    }
}
