//! Error types for Placard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacardError>;

/// Main error type for Placard
#[derive(Debug, Error)]
pub enum PlacardError {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid content size: {width}x{height}")]
    InvalidContent { width: u32, height: u32 },

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    RenderFailure(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
///
/// The render path never surfaces these; it walks the fallback chain instead.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("System font not found: {0}")]
    SystemFontNotFound(String),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decoding failed: {0}")]
    ImageDecode(String),

    #[error("Glyph {0} not found")]
    GlyphNotFound(u32),

    #[error("Outline extraction failed")]
    OutlineExtractionFailed,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Pixmap creation failed")]
    PixmapCreationFailed,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}
