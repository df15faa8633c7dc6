//! Placard: turn a photo or a line of text into a finished card
//!
//! A card template is a base picture with one empty rectangle. Placard either
//! pastes an image into that rectangle, scaled to fit, or finds the largest
//! font size at which the text wraps into it, then draws the text with a drop
//! shadow and bracket highlighting. Optional name labels and a decoration
//! overlay go on top, and the result is shrunk and encoded as PNG.
//!
//! ```rust,no_run
//! use placard::{Compositor, TextJob};
//! use placard_core::types::Rect;
//!
//! let compositor = Compositor::new();
//! let rect = Rect::new(728, 355, 2339, 800)?;
//! let job = TextJob::new("ema (1).jpg", rect, "今天也要[加油]!");
//! let png = compositor.composite_text(&job)?;
//! std::fs::write("card.png", png)?;
//! # Ok::<(), placard_core::PlacardError>(())
//! ```
//!
//! ## Fonts
//!
//! A missing or broken font file never fails a render. The compositor falls
//! back to a system font and finally to a builtin bitmap font, logging a
//! warning at each step. Fonts and rasterized glyphs are cached inside the
//! [`Compositor`], so reuse one instance across renders.

pub mod bases;
mod job;
pub mod profile;

pub use job::{
    CanvasSource, Decorations, ImageJob, TextJob, DEFAULT_IMAGE_PADDING, DEFAULT_MAX_FONT_HEIGHT,
};
pub use placard_core::{error, types, Color, PlacardError, Result};

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use placard_core::cache::CacheStats;
use placard_core::compress::CompressOptions;
use placard_core::fit::fit;
use placard_core::place;
use placard_fontdb::FontResolver;
use placard_render_skia::{overlay_at_origin, paste, GlyphCache, TextPainter, TextStyle};

/// Renders cards; holds the font and glyph caches between calls
pub struct Compositor {
    fonts: FontResolver,
    glyphs: Arc<GlyphCache>,
    compress: CompressOptions,
    emoji: bool,
}

impl Compositor {
    /// System font fallback, emoji-aware measurement, default output bounds
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CompositorBuilder {
        CompositorBuilder::new()
    }

    /// A painter for the given font, falling back as needed
    pub fn painter(&self, font: Option<&Path>) -> TextPainter {
        let face = self.fonts.resolve(font);
        TextPainter::new(face, self.glyphs.clone(), self.emoji)
    }

    /// The pasted card before compression
    pub fn render_image(&self, job: &ImageJob) -> Result<RgbaImage> {
        let mut canvas = job.base.load()?;
        let content = job.content.load()?;

        let placement = place(
            content.dimensions(),
            &job.rect,
            job.align,
            job.valign,
            job.padding,
            &job.policy,
        )?;
        paste(&mut canvas, &content, &placement);

        self.decorate(&mut canvas, &job.decorations)?;
        Ok(canvas)
    }

    /// The text card before compression
    pub fn render_text(&self, job: &TextJob) -> Result<RgbaImage> {
        let mut canvas = job.base.load()?;
        let painter = self.painter(job.decorations.font.as_deref());

        let layout = fit(
            &job.text,
            &job.rect,
            job.max_font_height,
            job.line_spacing,
            &painter,
        );
        log::debug!(
            "text fits at {}px in {} lines",
            layout.font_size,
            layout.lines.len()
        );

        let style = TextStyle {
            color: job.color,
            highlight: job.highlight,
            align: job.align,
            valign: job.valign,
            ..TextStyle::default()
        };
        painter.draw_layout(&mut canvas, &layout, &job.rect, &style);

        self.decorate(&mut canvas, &job.decorations)?;
        Ok(canvas)
    }

    /// Paste `job.content` into the template and return PNG bytes
    pub fn composite_image(&self, job: &ImageJob) -> Result<Vec<u8>> {
        placard_export::export(&self.render_image(job)?, &self.compress)
    }

    /// Fit and draw `job.text` into the template and return PNG bytes
    pub fn composite_text(&self, job: &TextJob) -> Result<Vec<u8>> {
        placard_export::export(&self.render_text(job)?, &self.compress)
    }

    fn decorate(&self, canvas: &mut RgbaImage, decorations: &Decorations) -> Result<()> {
        if let Some(source) = &decorations.overlay {
            if let Some(overlay) = source.load_optional()? {
                overlay_at_origin(canvas, &overlay);
            }
        }
        if let Some(labels) = decorations.labels() {
            self.painter(decorations.font.as_deref())
                .draw_name_labels(canvas, labels);
        }
        Ok(())
    }

    pub fn compress_options(&self) -> &CompressOptions {
        &self.compress
    }

    pub fn font_cache_stats(&self) -> CacheStats {
        self.fonts.stats()
    }

    pub fn glyph_cache_stats(&self) -> CacheStats {
        self.glyphs.stats()
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures a [`Compositor`]
pub struct CompositorBuilder {
    fonts: Option<FontResolver>,
    glyph_capacity: usize,
    compress: CompressOptions,
    emoji: bool,
}

impl CompositorBuilder {
    pub fn new() -> Self {
        Self {
            fonts: None,
            glyph_capacity: 4096,
            compress: CompressOptions::default(),
            emoji: true,
        }
    }

    /// Use a preconfigured resolver
    pub fn font_resolver(mut self, fonts: FontResolver) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Never scan system fonts; missing font files go straight to the bitmap font
    pub fn builtin_fonts_only(self) -> Self {
        self.font_resolver(FontResolver::builtin_only())
    }

    /// System families tried before generic sans-serif
    pub fn fallback_families<I, S>(self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_resolver(FontResolver::new().with_fallback_families(families))
    }

    pub fn glyph_cache_capacity(mut self, capacity: usize) -> Self {
        self.glyph_capacity = capacity;
        self
    }

    pub fn compress(mut self, options: CompressOptions) -> Self {
        self.compress = options;
        self
    }

    /// Measure emoji clusters as one-em squares (needs the `emoji` feature)
    pub fn emoji(mut self, enabled: bool) -> Self {
        self.emoji = enabled;
        self
    }

    pub fn build(self) -> Compositor {
        Compositor {
            fonts: self.fonts.unwrap_or_default(),
            glyphs: Arc::new(GlyphCache::new(self.glyph_capacity)),
            compress: self.compress,
            emoji: self.emoji,
        }
    }
}

impl Default for CompositorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
