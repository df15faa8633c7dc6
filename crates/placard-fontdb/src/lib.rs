//! Fonts for Placard: loading, measuring and the fallback chain
//!
//! A render asks for a font file by path. When that file is missing or
//! broken, the [`FontResolver`] walks down a chain instead of failing:
//!
//! 1. the requested file
//! 2. a system font by family name (default `Arial`, then any sans-serif)
//! 3. the [`BuiltinFont`] bitmap font compiled into the binary
//!
//! Each step down is logged as a warning and only costs rendering quality.
//!
//! ## Memory Management
//!
//! Fonts keep their raw bytes and parse tables on demand with read-fonts,
//! which keeps a [`Font`] `Send + Sync` and cheap to share behind an `Arc`.

mod builtin;

pub use builtin::{BitmapGlyph, BuiltinFont};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use fontdb::{Database, Family, Query};
use read_fonts::{types::GlyphId, FontRef as ReadFontRef, TableProvider};

use placard_core::{
    cache::{CacheStats, SharedCache},
    error::{FontLoadError, Result},
    LineMetrics, TextMeasure,
};

static NEXT_MEMORY_ID: AtomicU64 = AtomicU64::new(0);

/// An outline font held in memory
///
/// Stores the raw font data and creates a `FontRef` on demand for parsing.
/// For TTC collections, `face_index` picks the face.
pub struct Font {
    id: String,
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("id", &self.id)
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish_non_exhaustive()
    }
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        let mut font = Self::from_data_index(data, 0)?;
        font.id = path.display().to_string();
        Ok(font)
    }

    /// Turns raw font bytes into a font
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000)
            .max(1);

        // Without hhea, fall back to an 80/20 split of the em
        let (ascender, descender) = font_ref
            .hhea()
            .map(|hhea| (hhea.ascender().to_i16(), hhea.descender().to_i16()))
            .unwrap_or_else(|_| {
                let em = i32::from(units_per_em);
                let clamp = |v: i32| v.min(i32::from(i16::MAX)) as i16;
                (clamp(em * 4 / 5), -clamp(em / 5))
            });

        let id = format!("memory#{}", NEXT_MEMORY_ID.fetch_add(1, Ordering::Relaxed));

        Ok(Font {
            id,
            data,
            face_index,
            units_per_em,
            ascender,
            descender,
        })
    }

    /// Stable identity used in cache keys
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Glyph ids for every character, with `.notdef` (0) for unmapped ones
    pub fn glyph_ids(&self, text: &str) -> Vec<u32> {
        let Some(cmap) = self.font_ref().and_then(|font| font.cmap().ok()) else {
            return vec![0; text.chars().count()];
        };
        text.chars()
            .map(|ch| cmap.map_codepoint(ch).map_or(0, |gid| gid.to_u32()))
            .collect()
    }

    /// Advance of a glyph in font units
    pub fn advance_units(&self, glyph_id: u32) -> u16 {
        self.font_ref()
            .and_then(|font| font.hmtx().ok()?.advance(GlyphId::new(glyph_id)))
            .unwrap_or(self.units_per_em / 2)
    }

    /// Pixel advance of `text` at `size`, before truncation
    pub fn advance_px(&self, text: &str, size: u32) -> f32 {
        let Some(hmtx) = self.font_ref().and_then(|font| font.hmtx().ok()) else {
            return text.chars().count() as f32 * size as f32 / 2.0;
        };
        let units: u64 = self
            .glyph_ids(text)
            .into_iter()
            .map(|gid| {
                u64::from(
                    hmtx.advance(GlyphId::new(gid))
                        .unwrap_or(self.units_per_em / 2),
                )
            })
            .sum();
        units as f32 * self.scale(size)
    }

    fn scale(&self, size: u32) -> f32 {
        size as f32 / f32::from(self.units_per_em)
    }
}

impl TextMeasure for Font {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        self.advance_px(text, size) as u32
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        let scale = self.scale(size);
        LineMetrics::new(
            f32::from(self.ascender) * scale,
            -f32::from(self.descender) * scale,
        )
    }
}

/// Whatever the fallback chain ended up with
#[derive(Debug, Clone)]
pub enum FontFace {
    Outline(Arc<Font>),
    Builtin(BuiltinFont),
}

impl FontFace {
    pub fn id(&self) -> &str {
        match self {
            FontFace::Outline(font) => font.id(),
            FontFace::Builtin(_) => "builtin",
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Builtin(_))
    }
}

impl TextMeasure for FontFace {
    fn name(&self) -> &'static str {
        match self {
            FontFace::Outline(font) => font.name(),
            FontFace::Builtin(font) => font.name(),
        }
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        match self {
            FontFace::Outline(font) => font.text_width(text, size),
            FontFace::Builtin(font) => font.text_width(text, size),
        }
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        match self {
            FontFace::Outline(font) => font.line_metrics(size),
            FontFace::Builtin(font) => font.line_metrics(size),
        }
    }
}

/// Where a cached face came from
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum FontSource {
    File(PathBuf),
    System(Vec<String>),
}

/// Walks the font fallback chain and caches what it loads
///
/// Faces are cached by source, so every size of a font shares one load.
pub struct FontResolver {
    cache: SharedCache<FontSource, Arc<FontFace>>,
    fallback_families: Vec<String>,
    use_system_fonts: bool,
    system: OnceLock<Database>,
}

/// Family tried when the requested font cannot be loaded
pub const DEFAULT_FALLBACK_FAMILY: &str = "Arial";

impl FontResolver {
    /// A resolver that falls back to `Arial`, any sans-serif, then the builtin font
    pub fn new() -> Self {
        Self {
            cache: SharedCache::new(64),
            fallback_families: vec![DEFAULT_FALLBACK_FAMILY.to_string()],
            use_system_fonts: true,
            system: OnceLock::new(),
        }
    }

    /// A resolver that never scans system fonts
    ///
    /// Output then depends only on the font files handed to it.
    pub fn builtin_only() -> Self {
        Self {
            use_system_fonts: false,
            ..Self::new()
        }
    }

    /// Replace the fallback family list (tried in order before generic sans-serif)
    pub fn with_fallback_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_families = families.into_iter().map(Into::into).collect();
        self
    }

    /// Load a font file through the cache, surfacing any failure
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Arc<FontFace>> {
        let path = path.as_ref();
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.cache.get_or_try_insert_with(FontSource::File(key), || {
            let font = Font::from_file(path)?;
            log::debug!("loaded font {}", font.id());
            Ok(Arc::new(FontFace::Outline(Arc::new(font))))
        })
    }

    /// Find a system font from the fallback families, then any sans-serif
    pub fn load_system(&self) -> Result<Arc<FontFace>> {
        let key = FontSource::System(self.fallback_families.clone());
        self.cache.get_or_try_insert_with(key, || {
            let db = self.system_database();
            let mut families: Vec<Family<'_>> = self
                .fallback_families
                .iter()
                .map(|name| Family::Name(name.as_str()))
                .collect();
            families.push(Family::SansSerif);

            let wanted = self.fallback_families.join(", ");
            let id = db
                .query(&Query {
                    families: &families,
                    ..Query::default()
                })
                .ok_or_else(|| FontLoadError::SystemFontNotFound(wanted.clone()))?;

            let font = db
                .with_face_data(id, |data, index| Font::from_data_index(data.to_vec(), index))
                .ok_or_else(|| FontLoadError::SystemFontNotFound(wanted.clone()))??;
            log::debug!("using system font for [{}]", wanted);
            Ok(Arc::new(FontFace::Outline(Arc::new(font))))
        })
    }

    fn system_database(&self) -> &Database {
        self.system.get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            log::debug!("scanned {} system font faces", db.len());
            db
        })
    }

    /// The best face available for `requested`; never fails
    pub fn resolve(&self, requested: Option<&Path>) -> Arc<FontFace> {
        if let Some(path) = requested {
            match self.load_file(path) {
                Ok(face) => return face,
                Err(e) => log::warn!("font {}: {}; falling back", path.display(), e),
            }
        }

        if self.use_system_fonts {
            match self.load_system() {
                Ok(face) => return face,
                Err(e) => log::warn!("{}; using builtin bitmap font", e),
            }
        }

        Arc::new(FontFace::Builtin(BuiltinFont))
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}
