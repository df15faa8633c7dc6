//! `placard image`

use placard::types::ScalePolicy;
use placard::{CanvasSource, Compositor, ImageJob, Result};

use super::{write_output, CardSetup};
use crate::cli::ImageArgs;

pub fn run(args: &ImageArgs, quiet: bool) -> Result<()> {
    let setup = CardSetup::from_args(&args.card)?;
    let policy = ScalePolicy {
        allow_upscale: !args.no_upscale,
        max_width: args.max_width,
        max_height: args.max_height,
    };

    let job = ImageJob::new(setup.base, setup.rect, CanvasSource::Path(args.content.clone()))
        .align(args.align, args.valign)
        .padding(args.padding)
        .policy(policy)
        .decorations(setup.decorations);

    let png = Compositor::new().composite_image(&job)?;
    write_output(&args.card.output, &png, quiet)
}
