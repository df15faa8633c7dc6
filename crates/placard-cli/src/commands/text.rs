//! `placard text`

use std::io::{self, Read};

use placard::{Color, Compositor, Result, TextJob};

use super::{write_output, CardSetup};
use crate::cli::TextArgs;

pub fn run(args: &TextArgs, quiet: bool) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            // A trailing newline from `echo` is not an extra empty line
            text.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let setup = CardSetup::from_args(&args.card)?;
    let highlight = args.highlight.unwrap_or_else(|| {
        match (&setup.profiles, &args.card.character) {
            (Some(profiles), Some(character)) => profiles.highlight_color(character),
            _ => Color::highlight_blue(),
        }
    });

    let job = TextJob::new(setup.base, setup.rect, text)
        .colors(args.color, highlight)
        .max_font_height(Some(args.max_font_height).filter(|&max| max > 0))
        .align(args.align, args.valign)
        .line_spacing(args.line_spacing)
        .decorations(setup.decorations);

    let compositor = Compositor::builder().emoji(!args.no_emoji).build();
    let png = compositor.composite_text(&job)?;
    write_output(&args.card.output, &png, quiet)
}
