//! What a caller asks for: the two kinds of card and their inputs

use std::path::{Path, PathBuf};

use image::RgbaImage;
use placard_core::fit::DEFAULT_LINE_SPACING;
use placard_core::types::{Align, NameLabel, NameLabelTable, Rect, ScalePolicy, VAlign};
use placard_core::{Color, Result};
use placard_render_skia::load_image;

/// Tallest font a text card may use unless told otherwise
pub const DEFAULT_MAX_FONT_HEIGHT: u32 = 145;

/// Padding around pasted images unless told otherwise
pub const DEFAULT_IMAGE_PADDING: u32 = 12;

/// An image given either as a file or already decoded
#[derive(Debug, Clone)]
pub enum CanvasSource {
    Path(PathBuf),
    Image(RgbaImage),
}

impl CanvasSource {
    /// A private RGBA copy; the source itself is never modified
    pub fn load(&self) -> Result<RgbaImage> {
        match self {
            CanvasSource::Path(path) => load_image(path),
            CanvasSource::Image(image) => Ok(image.clone()),
        }
    }

    /// Like [`load`](Self::load), but a path that is not a readable file yields `None`
    pub(crate) fn load_optional(&self) -> Result<Option<RgbaImage>> {
        if let CanvasSource::Path(path) = self {
            if !path.is_file() {
                log::warn!("overlay {} is not a readable file; skipping", path.display());
                return Ok(None);
            }
        }
        self.load().map(Some)
    }
}

impl From<PathBuf> for CanvasSource {
    fn from(path: PathBuf) -> Self {
        CanvasSource::Path(path)
    }
}

impl From<&Path> for CanvasSource {
    fn from(path: &Path) -> Self {
        CanvasSource::Path(path.to_path_buf())
    }
}

impl From<&str> for CanvasSource {
    fn from(path: &str) -> Self {
        CanvasSource::Path(PathBuf::from(path))
    }
}

impl From<RgbaImage> for CanvasSource {
    fn from(image: RgbaImage) -> Self {
        CanvasSource::Image(image)
    }
}

/// Everything drawn after the main content, shared by both card kinds
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    /// Composited over the whole canvas at the origin
    pub overlay: Option<CanvasSource>,
    /// Looked up in `name_labels`
    pub character: Option<String>,
    pub name_labels: Option<NameLabelTable>,
    /// Font for text and name labels; the fallback chain covers a missing file
    pub font: Option<PathBuf>,
}

impl Decorations {
    /// The labels to draw, if the table has an entry for the character
    pub fn labels(&self) -> Option<&[NameLabel]> {
        let character = self.character.as_deref()?;
        self.name_labels
            .as_ref()?
            .get(character)
            .map(Vec::as_slice)
    }
}

/// Paste a picture into the template rectangle
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub base: CanvasSource,
    pub rect: Rect,
    pub content: CanvasSource,
    pub align: Align,
    pub valign: VAlign,
    pub padding: u32,
    pub policy: ScalePolicy,
    pub decorations: Decorations,
}

impl ImageJob {
    /// Centered, padded by 12 px, upscaling allowed
    pub fn new(base: impl Into<CanvasSource>, rect: Rect, content: impl Into<CanvasSource>) -> Self {
        Self {
            base: base.into(),
            rect,
            content: content.into(),
            align: Align::Center,
            valign: VAlign::Middle,
            padding: DEFAULT_IMAGE_PADDING,
            policy: ScalePolicy {
                allow_upscale: true,
                ..ScalePolicy::default()
            },
            decorations: Decorations::default(),
        }
    }

    pub fn align(mut self, align: Align, valign: VAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn policy(mut self, policy: ScalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }
}

/// Fit and draw text into the template rectangle
#[derive(Debug, Clone)]
pub struct TextJob {
    pub base: CanvasSource,
    pub rect: Rect,
    pub text: String,
    pub color: Color,
    pub highlight: Color,
    /// Upper bound for the font-size search; `None` lets the rect height decide
    pub max_font_height: Option<u32>,
    pub align: Align,
    pub valign: VAlign,
    pub line_spacing: f32,
    pub decorations: Decorations,
}

impl TextJob {
    /// White text, top-left aligned, at most 145 px tall
    pub fn new(base: impl Into<CanvasSource>, rect: Rect, text: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rect,
            text: text.into(),
            color: Color::white(),
            highlight: Color::highlight_blue(),
            max_font_height: Some(DEFAULT_MAX_FONT_HEIGHT),
            align: Align::Left,
            valign: VAlign::Top,
            line_spacing: DEFAULT_LINE_SPACING,
            decorations: Decorations::default(),
        }
    }

    pub fn colors(mut self, color: Color, highlight: Color) -> Self {
        self.color = color;
        self.highlight = highlight;
        self
    }

    pub fn max_font_height(mut self, max: Option<u32>) -> Self {
        self.max_font_height = max;
        self
    }

    pub fn align(mut self, align: Align, valign: VAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }

    pub fn line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }
}
