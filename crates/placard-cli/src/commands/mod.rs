//! One module per subcommand, plus what text and image cards share

pub mod base;
pub mod image;
pub mod info;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use placard::profile::{base_image_name, ProfileSet};
use placard::{CanvasSource, Decorations, PlacardError, Result};
use placard_core::types::Rect;

use crate::cli::CardArgs;

/// Text rectangle of the stock card template
const DEFAULT_RECT: (i32, i32, i32, i32) = (728, 355, 2339, 800);

/// Card inputs after profiles have been consulted
pub struct CardSetup {
    pub base: CanvasSource,
    pub rect: Rect,
    pub profiles: Option<ProfileSet>,
    pub decorations: Decorations,
}

impl CardSetup {
    pub fn from_args(args: &CardArgs) -> Result<Self> {
        let profiles = args
            .profiles
            .as_deref()
            .map(ProfileSet::from_path)
            .transpose()?;

        let rect = match (args.rect, &profiles) {
            (Some(rect), _) => rect,
            (None, Some(profiles)) => profiles.template.text_rect,
            (None, None) => {
                let (x1, y1, x2, y2) = DEFAULT_RECT;
                Rect::new(x1, y1, x2, y2)?
            }
        };

        let font = match (&args.font, &profiles, &args.character) {
            (Some(font), _, _) => Some(font.clone()),
            (None, Some(profiles), Some(character)) => {
                Some(profiles.font_path(character, &args.font_dir)?)
            }
            _ => None,
        };

        // Fail early on a typo rather than silently dropping the labels
        if let (Some(profiles), Some(character)) = (&profiles, &args.character) {
            profiles.character(character)?;
        }

        let base = match (&args.base, &args.bases_dir) {
            (Some(base), _) => base.clone(),
            (None, Some(dir)) => random_base(args, profiles.as_ref(), dir)?,
            (None, None) => {
                return Err(PlacardError::Config(
                    "either --base or --bases-dir is needed".into(),
                ))
            }
        };

        let name_labels = match &profiles {
            Some(profiles) if !args.no_labels => Some(profiles.name_labels.clone()),
            _ => None,
        };

        Ok(Self {
            base: CanvasSource::Path(base),
            rect,
            decorations: Decorations {
                overlay: args.overlay.clone().map(CanvasSource::Path),
                character: args.character.clone(),
                name_labels,
                font,
            },
            profiles,
        })
    }
}

fn random_base(args: &CardArgs, profiles: Option<&ProfileSet>, dir: &Path) -> Result<PathBuf> {
    let (Some(profiles), Some(character)) = (profiles, &args.character) else {
        return Err(PlacardError::Config(
            "--bases-dir needs --profiles and --character".into(),
        ));
    };
    let number = profiles.pick_base_image(
        character,
        args.expression,
        args.after,
        &mut rand::thread_rng(),
    )?;
    let path = dir.join(base_image_name(character, number));
    log::info!("using base {}", path.display());
    Ok(path)
}

pub fn write_output(path: &Path, png: &[u8], quiet: bool) -> Result<()> {
    fs::write(path, png)?;
    if !quiet {
        eprintln!("✓ wrote {} ({} bytes)", path.display(), png.len());
    }
    Ok(())
}
