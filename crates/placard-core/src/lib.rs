//! Placard Core: the math between a template and a finished card
//!
//! A card starts as a base picture with one empty rectangle in it. Something
//! has to go into that rectangle: either a pasted image or a block of text.
//! This crate decides where and how big, without touching a single pixel.
//!
//! ## The Layout Path
//!
//! Text follows a fixed route to the canvas:
//!
//! 1. **Fit** - [`fit::fit`] binary-searches the largest font size that fits
//! 2. **Wrap** - [`wrap::wrap`] breaks each paragraph into width-bounded lines
//! 3. **Highlight** - [`highlight::segment`] splits every line into colored runs
//! 4. **Place** - [`place`] aligns the block (or an image) inside the region
//! 5. **Compress** - [`compress`] bounds the final canvas size
//!
//! Every width goes through a [`TextMeasure`], so the whole path runs against
//! a mock font in tests and against real outlines in production.
//!
//! ```rust
//! use placard_core::{fit::fit, types::Rect, LineMetrics, TextMeasure};
//!
//! struct Mono;
//!
//! impl TextMeasure for Mono {
//!     fn name(&self) -> &'static str { "mono" }
//!     fn text_width(&self, text: &str, size: u32) -> u32 {
//!         text.chars().count() as u32 * size / 2
//!     }
//!     fn line_metrics(&self, size: u32) -> LineMetrics {
//!         LineMetrics::new(size as f32 * 0.8, size as f32 * 0.2)
//!     }
//! }
//!
//! let region = Rect::new(0, 0, 400, 120)?;
//! let layout = fit("Hello, card!", &region, None, 0.15, &Mono);
//! assert!(layout.block_height <= 120);
//! # Ok::<(), placard_core::PlacardError>(())
//! ```

pub mod cache;
pub mod compress;
pub mod error;
pub mod fit;
pub mod highlight;
pub mod place;
pub mod traits;
pub mod wrap;

#[cfg(test)]
mod proptests;

pub use error::{PlacardError, Result};
pub use highlight::HighlightState;
pub use place::place;
pub use traits::TextMeasure;
pub use types::LineMetrics;

/// The data structures that travel between layout stages
pub mod types {
    use crate::error::{PlacardError, Result};
    use crate::Color;
    use std::collections::HashMap;
    use std::str::FromStr;

    /// An axis-aligned pixel rectangle with a guaranteed positive area
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    }

    impl Rect {
        /// Build a rectangle from its corners; empty or inverted ones are rejected
        pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self> {
            if x2 <= x1 || y2 <= y1 {
                return Err(PlacardError::InvalidRegion(format!(
                    "({x1},{y1})-({x2},{y2}) has no area"
                )));
            }
            Ok(Self { x1, y1, x2, y2 })
        }

        pub fn x1(&self) -> i32 {
            self.x1
        }

        pub fn y1(&self) -> i32 {
            self.y1
        }

        pub fn x2(&self) -> i32 {
            self.x2
        }

        pub fn y2(&self) -> i32 {
            self.y2
        }

        pub fn width(&self) -> u32 {
            self.x2.abs_diff(self.x1)
        }

        pub fn height(&self) -> u32 {
            self.y2.abs_diff(self.y1)
        }

        /// Pull every side inward by `padding`
        ///
        /// Fails with `InvalidRegion` when nothing is left inside.
        pub fn shrink(&self, padding: u32) -> Result<Rect> {
            let p = i32::try_from(padding).map_err(|_| {
                PlacardError::InvalidRegion(format!("padding {padding} is out of range"))
            })?;
            Rect::new(
                self.x1.saturating_add(p),
                self.y1.saturating_add(p),
                self.x2.saturating_sub(p),
                self.y2.saturating_sub(p),
            )
            .map_err(|_| {
                PlacardError::InvalidRegion(format!(
                    "padding {padding} collapses {}x{} region",
                    self.width(),
                    self.height()
                ))
            })
        }
    }

    /// Parses `x1,y1,x2,y2`
    impl FromStr for Rect {
        type Err = PlacardError;

        fn from_str(s: &str) -> Result<Self> {
            let parts: Vec<i32> = s
                .split(',')
                .map(|part| part.trim().parse::<i32>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| PlacardError::Config(format!("bad rectangle '{s}': {e}")))?;
            match parts.as_slice() {
                [x1, y1, x2, y2] => Rect::new(*x1, *y1, *x2, *y2),
                _ => Err(PlacardError::Config(format!(
                    "rectangle '{s}' needs four comma-separated numbers"
                ))),
            }
        }
    }

    /// Horizontal alignment inside a region
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Align {
        Left,
        #[default]
        Center,
        Right,
    }

    /// Vertical alignment inside a region
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum VAlign {
        Top,
        #[default]
        Middle,
        Bottom,
    }

    impl FromStr for Align {
        type Err = PlacardError;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "left" => Ok(Align::Left),
                "center" | "centre" => Ok(Align::Center),
                "right" => Ok(Align::Right),
                other => Err(PlacardError::Config(format!("unknown alignment '{other}'"))),
            }
        }
    }

    impl FromStr for VAlign {
        type Err = PlacardError;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "top" => Ok(VAlign::Top),
                "middle" | "center" => Ok(VAlign::Middle),
                "bottom" => Ok(VAlign::Bottom),
                other => Err(PlacardError::Config(format!(
                    "unknown vertical alignment '{other}'"
                ))),
            }
        }
    }

    /// How far a pasted image may be scaled
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScalePolicy {
        /// Allow growing content beyond its natural size
        pub allow_upscale: bool,
        /// Hard ceiling on the scaled width, honored even when upscaling
        pub max_width: Option<u32>,
        /// Hard ceiling on the scaled height, honored even when upscaling
        pub max_height: Option<u32>,
    }

    /// Where scaled content lands and how large it ends up
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Placement {
        pub scale: f64,
        pub width: u32,
        pub height: u32,
        pub x: i32,
        pub y: i32,
    }

    /// Vertical font metrics at one size, in pixels
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LineMetrics {
        /// Distance from the ascender line down to the baseline
        pub ascent: f32,
        /// Distance from the baseline down to the descender line (positive)
        pub descent: f32,
    }

    impl LineMetrics {
        pub const fn new(ascent: f32, descent: f32) -> Self {
            Self { ascent, descent }
        }

        pub fn height(&self) -> f32 {
            self.ascent + self.descent
        }
    }

    /// A stretch of text drawn in a single color
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GlyphRun {
        pub text: String,
        pub color: Color,
    }

    impl GlyphRun {
        pub fn new(text: impl Into<String>, color: Color) -> Self {
            Self {
                text: text.into(),
                color,
            }
        }
    }

    /// The accepted answer of the font-size search
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LayoutResult {
        pub font_size: u32,
        pub lines: Vec<String>,
        pub line_height: u32,
        pub block_width: u32,
        pub block_height: u32,
    }

    /// One pre-sized piece of a character's name, drawn at a fixed spot
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize))]
    pub struct NameLabel {
        pub text: String,
        pub position: (i32, i32),
        #[cfg_attr(feature = "serde", serde(alias = "font_color"))]
        pub color: Color,
        #[cfg_attr(feature = "serde", serde(alias = "font_size"))]
        pub size: u32,
    }

    /// Name labels keyed by character identifier
    pub type NameLabelTable = HashMap<String, Vec<NameLabel>>;
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ColorSpec"))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// The blue used for bracketed text unless a profile says otherwise
    pub const fn highlight_blue() -> Self {
        Self::rgb(137, 177, 251)
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| PlacardError::Config(format!("bad color '{hex}'")))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(PlacardError::Config(format!(
                "color '{hex}' must be RRGGBB or RRGGBBAA"
            ))),
        }
    }
}

/// Colors arrive in config as `[r, g, b]`, `[r, g, b, a]` or a hex string
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
    Hex(String),
}

#[cfg(feature = "serde")]
impl TryFrom<ColorSpec> for Color {
    type Error = PlacardError;

    fn try_from(spec: ColorSpec) -> Result<Self> {
        match spec {
            ColorSpec::Rgb([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorSpec::Rgba([r, g, b, a]) => Ok(Color::rgba(r, g, b, a)),
            ColorSpec::Hex(hex) => Color::from_hex(&hex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use super::*;

    #[test]
    fn rect_rejects_inverted_corners() {
        assert!(matches!(
            Rect::new(10, 10, 5, 20),
            Err(PlacardError::InvalidRegion(_))
        ));
        assert!(Rect::new(0, 0, 0, 10).is_err());
    }

    #[test]
    fn rect_shrink_collapses_to_error() {
        let rect = Rect::new(0, 0, 20, 100).unwrap();
        let inner = rect.shrink(5).unwrap();
        assert_eq!((inner.width(), inner.height()), (10, 90));
        assert!(rect.shrink(10).is_err());
    }

    #[test]
    fn rect_parses_from_cli_form() {
        let rect: Rect = "728, 355,2339,800".parse().unwrap();
        assert_eq!(rect, Rect::new(728, 355, 2339, 800).unwrap());
        assert!("1,2,3".parse::<Rect>().is_err());
    }

    #[test]
    fn alignment_parses_case_insensitively() {
        assert_eq!("LEFT".parse::<Align>().unwrap(), Align::Left);
        assert_eq!("middle".parse::<VAlign>().unwrap(), VAlign::Middle);
        assert!("sideways".parse::<Align>().is_err());
    }

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#89B1FB").unwrap(), Color::highlight_blue());
        assert_eq!(
            Color::from_hex("00000080").unwrap(),
            Color::rgba(0, 0, 0, 128)
        );
        assert!(Color::from_hex("12345").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn name_label_reads_config_field_names() {
        let label: NameLabel = serde_json::from_str(
            r#"{"text":"樱","position":[759,73],"font_color":[253,145,175],"font_size":186}"#,
        )
        .unwrap();
        assert_eq!(label.position, (759, 73));
        assert_eq!(label.color, Color::rgb(253, 145, 175));
        assert_eq!(label.size, 186);

        let hex: Color = serde_json::from_str(r##""#89b1fb""##).unwrap();
        assert_eq!(hex, Color::highlight_blue());
        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn compress_options_fill_missing_fields() {
        let options: compress::CompressOptions =
            serde_json::from_str(r#"{"max_width": 1000}"#).unwrap();
        assert_eq!(options.max_width, 1000);
        assert_eq!(options.max_height, 800);
    }
}
