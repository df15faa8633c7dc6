//! Placard's pixel side: glyph rasterization and canvas compositing
//!
//! Outline glyphs go skrifa → kurbo → tiny-skia and come out as coverage
//! masks; builtin bitmap glyphs skip straight to the mask. Masks are cached
//! per `(font, glyph, size)` and blended into a straight-alpha `RgbaImage`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use image::RgbaImage;
//! use placard_core::{fit::fit, types::Rect};
//! use placard_fontdb::FontResolver;
//! use placard_render_skia::{GlyphCache, TextPainter, TextStyle};
//!
//! let face = FontResolver::new().resolve(None);
//! let painter = TextPainter::new(face, Arc::new(GlyphCache::default()), true);
//! let rect = Rect::new(40, 40, 600, 200)?;
//! let layout = fit("Hello [there]", &rect, None, 0.15, &painter);
//!
//! let mut canvas = RgbaImage::new(640, 240);
//! painter.draw_layout(&mut canvas, &layout, &rect, &TextStyle::default());
//! # Ok::<(), placard_core::PlacardError>(())
//! ```

pub mod canvas;
pub mod glyph;
pub mod text;

pub use canvas::{blend_mask, compose_base, load_image, overlay_at_origin, paste};
pub use glyph::{GlyphCache, GlyphMask};
pub use text::{TextPainter, TextStyle};
