//! `placard base` and `placard bases`

use placard::bases::generate_bases;
use placard::error::ExportError;
use placard::profile::ProfileSet;
use placard::Result;
use placard_render_skia::{compose_base, load_image};

use crate::cli::{BaseArgs, BasesArgs};

pub fn run(args: &BaseArgs, quiet: bool) -> Result<()> {
    let background = load_image(&args.background)?;
    let portrait = load_image(&args.portrait)?;
    let base = compose_base(&background, &portrait, args.offset);

    let is_jpeg = args
        .output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let saved = if is_jpeg {
        image::DynamicImage::ImageRgba8(base).to_rgb8().save(&args.output)
    } else {
        base.save(&args.output)
    };
    saved.map_err(|e| ExportError::EncodingFailed(format!("{}: {e}", args.output.display())))?;

    if !quiet {
        eprintln!("✓ wrote {}", args.output.display());
    }
    Ok(())
}

pub fn run_all(args: &BasesArgs, quiet: bool) -> Result<()> {
    let profiles = ProfileSet::from_path(&args.profiles)?;
    let report = generate_bases(&profiles, &args.character, &args.resources, &args.output)?;
    if !quiet {
        eprintln!(
            "✓ {}: {} written, {} already present, {} missing inputs",
            args.character, report.written, report.existing, report.missing
        );
    }
    Ok(())
}
