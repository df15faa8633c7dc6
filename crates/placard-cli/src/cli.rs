//! Argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use placard_core::types::{Align, Rect, VAlign};
use placard_core::Color;

/// Placard - composite photos and fitted text onto card templates
#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit text into the template rectangle
    #[command(alias = "t")]
    Text(TextArgs),

    /// Paste a picture into the template rectangle
    #[command(alias = "i")]
    Image(ImageArgs),

    /// Put one portrait onto one background
    Base(BaseArgs),

    /// Generate every base image of a character from a resource folder
    Bases(BasesArgs),

    /// List the characters of a profile document
    Info(InfoArgs),
}

/// Options shared by text and image cards
#[derive(Args, Debug)]
pub struct CardArgs {
    /// Base image the card is drawn on
    #[arg(short = 'b', long = "base", required_unless_present = "bases_dir")]
    pub base: Option<PathBuf>,

    /// Pick a random base of the character from this directory instead
    #[arg(long = "bases-dir", conflicts_with = "base", requires = "character")]
    pub bases_dir: Option<PathBuf>,

    /// Expression (1-based) the random base must show
    #[arg(short = 'e', long = "expression", requires = "bases_dir")]
    pub expression: Option<u32>,

    /// Number of the previous base; the random base avoids its expression
    #[arg(long = "after", requires = "bases_dir")]
    pub after: Option<u32>,

    /// Target rectangle as x1,y1,x2,y2 (default: the profile template)
    #[arg(short = 'r', long = "rect")]
    pub rect: Option<Rect>,

    /// Profile document (JSON)
    #[arg(short = 'p', long = "profiles")]
    pub profiles: Option<PathBuf>,

    /// Character id; selects font, highlight color and name labels
    #[arg(short = 'c', long = "character", requires = "profiles")]
    pub character: Option<String>,

    /// Font file (overrides the character's font)
    #[arg(short = 'f', long = "font")]
    pub font: Option<PathBuf>,

    /// Directory holding the profile font files
    #[arg(long = "font-dir", default_value = ".")]
    pub font_dir: PathBuf,

    /// Decoration drawn over the whole card
    #[arg(long = "overlay")]
    pub overlay: Option<PathBuf>,

    /// Skip the name labels even when the profile has some
    #[arg(long = "no-labels")]
    pub no_labels: bool,

    /// Output PNG path
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Text to draw (reads from stdin if omitted)
    pub text: Option<String>,

    #[command(flatten)]
    pub card: CardArgs,

    /// Text color (RRGGBB or RRGGBBAA)
    #[arg(long = "color", default_value = "FFFFFF", value_parser = parse_color)]
    pub color: Color,

    /// Color of bracketed spans (default: the character's, else 89B1FB)
    #[arg(long = "highlight", value_parser = parse_color)]
    pub highlight: Option<Color>,

    /// Largest font size to try; 0 lets the rectangle decide
    #[arg(long = "max-font-height", default_value = "145")]
    pub max_font_height: u32,

    /// left, center or right
    #[arg(long = "align", default_value = "left")]
    pub align: Align,

    /// top, middle or bottom
    #[arg(long = "valign", default_value = "top")]
    pub valign: VAlign,

    /// Extra leading as a fraction of the font height
    #[arg(long = "line-spacing", default_value = "0.15")]
    pub line_spacing: f32,

    /// Measure emoji with the font instead of as squares
    #[arg(long = "no-emoji")]
    pub no_emoji: bool,
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Picture to paste
    pub content: PathBuf,

    #[command(flatten)]
    pub card: CardArgs,

    /// Space kept free inside the rectangle on every side
    #[arg(long = "padding", default_value = "12")]
    pub padding: u32,

    /// Never enlarge the picture beyond its natural size
    #[arg(long = "no-upscale")]
    pub no_upscale: bool,

    /// Cap on the pasted width
    #[arg(long = "max-width")]
    pub max_width: Option<u32>,

    /// Cap on the pasted height
    #[arg(long = "max-height")]
    pub max_height: Option<u32>,

    #[arg(long = "align", default_value = "center")]
    pub align: Align,

    #[arg(long = "valign", default_value = "middle")]
    pub valign: VAlign,
}

#[derive(Args, Debug)]
pub struct BaseArgs {
    #[arg(long = "background")]
    pub background: PathBuf,

    #[arg(long = "portrait")]
    pub portrait: PathBuf,

    /// Portrait position as x,y
    #[arg(long = "offset", default_value = "0,134", value_parser = parse_offset)]
    pub offset: (i32, i32),

    /// Output image (format from the extension)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct BasesArgs {
    #[arg(short = 'p', long = "profiles")]
    pub profiles: PathBuf,

    #[arg(short = 'c', long = "character")]
    pub character: String,

    /// Folder with background/ and one folder of portraits per character
    #[arg(long = "resources")]
    pub resources: PathBuf,

    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[arg(short = 'p', long = "profiles")]
    pub profiles: PathBuf,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value).map_err(|e| e.to_string())
}

fn parse_offset(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("offset '{value}' must look like x,y"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad offset '{value}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}
