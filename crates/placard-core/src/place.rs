//! Scale-to-fit placement inside a padded region
//!
//! Both pasted images and rendered text lines use the alignment rules here,
//! so a centered line of text and a centered photo agree to the pixel.

use crate::error::{PlacardError, Result};
use crate::types::{Align, Placement, Rect, ScalePolicy, VAlign};

impl Align {
    /// Left edge of an item `size` pixels wide between `start` and `end`
    pub fn origin(self, start: i32, end: i32, size: u32) -> i32 {
        axis_origin(start, end, size, self.into())
    }
}

impl VAlign {
    /// Top edge of an item `size` pixels tall between `start` and `end`
    pub fn origin(self, start: i32, end: i32, size: u32) -> i32 {
        axis_origin(start, end, size, self.into())
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    Middle,
    End,
}

impl From<Align> for Edge {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Edge::Start,
            Align::Center => Edge::Middle,
            Align::Right => Edge::End,
        }
    }
}

impl From<VAlign> for Edge {
    fn from(valign: VAlign) -> Self {
        match valign {
            VAlign::Top => Edge::Start,
            VAlign::Middle => Edge::Middle,
            VAlign::Bottom => Edge::End,
        }
    }
}

fn axis_origin(start: i32, end: i32, size: u32, edge: Edge) -> i32 {
    let size = i64::from(size);
    let origin = match edge {
        Edge::Start => i64::from(start),
        Edge::End => i64::from(end) - size,
        // Floor division: an oversized item hangs off both sides, one pixel more on the start side
        Edge::Middle => i64::from(start) + (i64::from(end) - i64::from(start) - size).div_euclid(2),
    };
    origin.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Work out how large `content` becomes inside `target` and where it lands
///
/// The target is padded on all four sides first. The fit scale is the smaller
/// of the two axis ratios, then capped at 1.0 unless upscaling is allowed,
/// then capped again by the policy's absolute size limits. Explicit limits
/// always win, even when upscaling is on.
pub fn place(
    content: (u32, u32),
    target: &Rect,
    align: Align,
    valign: VAlign,
    padding: u32,
    policy: &ScalePolicy,
) -> Result<Placement> {
    let (content_w, content_h) = content;
    if content_w == 0 || content_h == 0 {
        return Err(PlacardError::InvalidContent {
            width: content_w,
            height: content_h,
        });
    }

    let region = target.shrink(padding)?;
    let cw = f64::from(content_w);
    let ch = f64::from(content_h);

    let mut scale = (f64::from(region.width()) / cw).min(f64::from(region.height()) / ch);
    if !policy.allow_upscale {
        scale = scale.min(1.0);
    }
    if let Some(max_width) = policy.max_width {
        scale = scale.min(f64::from(max_width) / cw);
    }
    if let Some(max_height) = policy.max_height {
        scale = scale.min(f64::from(max_height) / ch);
    }

    let width = scaled_dimension(cw, scale);
    let height = scaled_dimension(ch, scale);

    let placement = Placement {
        scale,
        width,
        height,
        x: align.origin(region.x1(), region.x2(), width),
        y: valign.origin(region.y1(), region.y2(), height),
    };

    log::debug!(
        "place: {}x{} -> {}x{} at ({}, {}), scale {:.4}",
        content_w,
        content_h,
        placement.width,
        placement.height,
        placement.x,
        placement.y,
        placement.scale
    );

    Ok(placement)
}

fn scaled_dimension(extent: f64, scale: f64) -> u32 {
    let scaled = (extent * scale).round();
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (scaled as u32).max(1)
    }
}
