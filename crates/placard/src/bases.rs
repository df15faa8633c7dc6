//! Pre-generating base canvases: every expression on every background
//!
//! Resources are laid out as
//!
//! ```text
//! <resources>/background/c1.png .. c{background_count}.png
//! <resources>/<character>/<character> (1).png .. (<emotion_count>).png
//! ```
//!
//! and each pairing is written to `<out_dir>/<character> (<number>).jpg`.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use placard_core::error::{ExportError, Result};
use placard_render_skia::{compose_base, load_image};

use crate::profile::{base_image_name, ProfileSet};

/// What a generation run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseReport {
    pub written: u32,
    /// Already present in the output directory
    pub existing: u32,
    /// A background or portrait was missing
    pub missing: u32,
}

pub fn background_path(resources: &Path, background: u32) -> PathBuf {
    resources
        .join("background")
        .join(format!("c{}.png", background + 1))
}

pub fn portrait_path(resources: &Path, character: &str, emotion: u32) -> PathBuf {
    resources
        .join(character)
        .join(format!("{character} ({}).png", emotion + 1))
}

/// Write every missing base image for `character`
///
/// Missing inputs are logged and counted, not treated as errors.
pub fn generate_bases(
    profiles: &ProfileSet,
    character: &str,
    resources: &Path,
    out_dir: &Path,
) -> Result<BaseReport> {
    let profile = profiles.character(character)?;
    let template = &profiles.template;
    std::fs::create_dir_all(out_dir)?;

    let mut report = BaseReport::default();
    for background in 0..template.background_count {
        let background_file = background_path(resources, background);
        if !background_file.is_file() {
            log::warn!("background not found: {}", background_file.display());
            report.missing += profile.emotion_count;
            continue;
        }
        let background_image = load_image(&background_file)?;

        for emotion in 0..profile.emotion_count {
            let number = profiles.base_image_number(emotion, background);
            let target = out_dir.join(base_image_name(character, number));
            if target.exists() {
                report.existing += 1;
                continue;
            }

            let portrait_file = portrait_path(resources, character, emotion);
            if !portrait_file.is_file() {
                log::warn!("portrait not found: {}", portrait_file.display());
                report.missing += 1;
                continue;
            }

            let portrait = load_image(&portrait_file)?;
            let base = compose_base(&background_image, &portrait, template.portrait_offset);
            DynamicImage::ImageRgba8(base)
                .to_rgb8()
                .save(&target)
                .map_err(|e| ExportError::EncodingFailed(format!("{}: {e}", target.display())))?;
            report.written += 1;
        }
    }

    log::info!(
        "{}: {} base images written, {} already present, {} missing inputs",
        character,
        report.written,
        report.existing,
        report.missing
    );
    Ok(report)
}
