//! Outline and bitmap glyphs as coverage masks, with a shared cache

use std::sync::Arc;

use kurbo::{BezPath, PathEl, Shape};
use placard_core::cache::{CacheStats, GlyphCacheKey, SharedCache};
use placard_core::error::{RenderError, Result};
use placard_core::TextMeasure;
use placard_fontdb::{BuiltinFont, Font, FontFace};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::MetadataProvider;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// An 8-bit coverage mask positioned relative to the pen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    /// Pen x to the mask's left edge
    pub bearing_x: i32,
    /// Baseline up to the mask's top edge
    pub bearing_y: i32,
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Converts an outline glyph into an anti-aliased coverage mask
///
/// The outline is traced with skrifa into a kurbo path, rebuilt as a
/// tiny-skia path and filled with the winding rule. Glyphs without ink
/// (spaces) come back as an empty mask.
pub fn rasterize_outline(font: &Font, glyph_id: u32, size: u32) -> Result<GlyphMask> {
    let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
        .map_err(|_| RenderError::BackendError(format!("cannot parse {}", font.id())))?;

    let glyph = font_ref
        .outline_glyphs()
        .get(skrifa::GlyphId::new(glyph_id))
        .ok_or(RenderError::GlyphNotFound(glyph_id))?;

    let mut path = BezPath::new();
    let settings = DrawSettings::unhinted(Size::new(size as f32), LocationRef::default());
    glyph
        .draw(settings, &mut PathPen { path: &mut path })
        .map_err(|_| RenderError::OutlineExtractionFailed)?;

    let bbox = path.bounding_box();
    if path.elements().is_empty() || bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return Ok(GlyphMask::default());
    }
    if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
    {
        return Err(RenderError::PathBuildingFailed.into());
    }

    // Snap the mask to whole pixels so the bearings are exact
    let left = bbox.x0.floor();
    let top = bbox.y1.ceil();
    let width = ((bbox.x1.ceil() - left) as u32).max(1);
    let height = ((top - bbox.y0.floor()) as u32).max(1);

    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            }
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    let skia_path = builder.finish().ok_or(RenderError::PathBuildingFailed)?;

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed)?;
    let paint = Paint {
        anti_alias: true,
        ..Default::default()
    };

    // Fonts are y-up, pixmaps y-down
    let transform = Transform::from_scale(1.0, -1.0).post_translate(-left as f32, top as f32);
    pixmap.fill_path(&skia_path, &paint, FillRule::Winding, transform, None);

    let coverage = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();

    log::trace!(
        "glyph {} of {} at {}px: {}x{} mask",
        glyph_id,
        font.id(),
        size,
        width,
        height
    );

    Ok(GlyphMask {
        width,
        height,
        coverage,
        bearing_x: left as i32,
        bearing_y: top as i32,
    })
}

/// Builtin bitmap glyphs sit on the baseline with their cell top at the ascent
fn rasterize_builtin(font: &BuiltinFont, ch: char, size: u32) -> GlyphMask {
    let bitmap = font.rasterize(ch, size);
    let ascent = font.line_metrics(size).ascent.round() as i32;
    GlyphMask {
        width: bitmap.width,
        height: bitmap.height,
        coverage: bitmap.coverage,
        bearing_x: 0,
        bearing_y: ascent,
    }
}

/// Rasterized masks keyed by font, glyph and size
pub struct GlyphCache {
    masks: SharedCache<GlyphCacheKey, Arc<GlyphMask>>,
}

impl GlyphCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            masks: SharedCache::new(capacity),
        }
    }

    /// The mask for `ch`; a glyph that fails to rasterize draws as nothing
    pub fn glyph(&self, face: &FontFace, ch: char, size: u32) -> Arc<GlyphMask> {
        match face {
            FontFace::Outline(font) => {
                let glyph_id = font.glyph_id(ch).unwrap_or(0);
                self.outline_glyph(font, glyph_id, size)
            }
            FontFace::Builtin(font) => {
                let key = GlyphCacheKey {
                    font_id: face.id().to_string(),
                    glyph_id: u32::from(ch),
                    size,
                };
                self.mask_or_blank(key, || Ok(rasterize_builtin(font, ch, size)))
            }
        }
    }

    /// The mask for a glyph id of an outline font
    pub fn outline_glyph(&self, font: &Font, glyph_id: u32, size: u32) -> Arc<GlyphMask> {
        let key = GlyphCacheKey {
            font_id: font.id().to_string(),
            glyph_id,
            size,
        };
        self.mask_or_blank(key, || rasterize_outline(font, glyph_id, size))
    }

    /// Failures are stored as blank masks, so each one is warned about once
    fn mask_or_blank(
        &self,
        key: GlyphCacheKey,
        rasterize: impl FnOnce() -> Result<GlyphMask>,
    ) -> Arc<GlyphMask> {
        if let Some(mask) = self.masks.get(&key) {
            return mask;
        }
        let mask = rasterize().unwrap_or_else(|e| {
            log::warn!(
                "glyph {} of {} at {}px: {}; drawing nothing",
                key.glyph_id,
                key.font_id,
                key.size,
                e
            );
            GlyphMask::default()
        });
        let mask = Arc::new(mask);
        self.masks.insert(key, mask.clone());
        mask
    }

    pub fn stats(&self) -> CacheStats {
        self.masks.stats()
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new(4096)
    }
}

/// Bridge between skrifa's outline commands and kurbo's path format
struct PathPen<'a> {
    path: &'a mut BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((f64::from(cx0), f64::from(cy0)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(cx1), f64::from(cy1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
