//! Output size bounding
//!
//! The canvas is first shrunk by a fixed ratio, then clamped to a maximum
//! width, then, as a separate second step, to a maximum height. The two
//! clamps run in that order and each sees the result of the previous one;
//! they are not a joint fit. Changing this changes the size of every card.

/// Limits for the final canvas
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompressOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// Applied to both axes before either clamp
    pub resize_ratio: f64,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 800,
            resize_ratio: 0.7,
        }
    }
}

fn truncate(value: f64) -> u32 {
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (value as u32).max(1)
    }
}

/// The width clamp followed by the height clamp, without the ratio
pub fn clamp_size(width: u32, height: u32, options: &CompressOptions) -> (u32, u32) {
    let (mut w, mut h) = (width.max(1), height.max(1));

    if w > options.max_width && options.max_width > 0 {
        let ratio = f64::from(options.max_width) / f64::from(w);
        h = truncate(f64::from(h) * ratio);
        w = options.max_width;
    }

    if h > options.max_height && options.max_height > 0 {
        let ratio = f64::from(options.max_height) / f64::from(h);
        w = truncate(f64::from(w) * ratio);
        h = options.max_height;
    }

    (w, h)
}

/// Final output dimensions for a `width` x `height` canvas
pub fn compressed_size(width: u32, height: u32, options: &CompressOptions) -> (u32, u32) {
    let ratio = options.resize_ratio;
    let w = truncate(f64::from(width) * ratio);
    let h = truncate(f64::from(height) * ratio);
    clamp_size(w, h, options)
}
