//! Character profiles: which font, how many expressions, which name labels
//!
//! A profile document is JSON:
//!
//! ```json
//! {
//!   "template": { "text_rect": [728, 355, 2339, 800], "portrait_offset": [0, 134], "background_count": 16 },
//!   "characters": { "ema": { "emotion_count": 8, "font": "font3.ttf" } },
//!   "name_labels": { "ema": [ { "text": "樱", "position": [759, 73], "font_color": [253, 145, 175], "font_size": 186 } ] }
//! }
//! ```
//!
//! Base images are numbered per character: every expression is paired with
//! every background, and expression `k` (1-based) owns numbers
//! `(k-1)*background_count + 1 ..= k*background_count`.
//! [`ProfileSet::pick_base_image`] draws one of those numbers at random.

use std::collections::BTreeMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use placard_core::types::{NameLabel, NameLabelTable, Rect};
use placard_core::{Color, PlacardError, Result};
use rand::Rng;
use serde::Deserialize;

/// Draws allowed before a repeated expression is accepted anyway
const MAX_PICK_ATTEMPTS: u32 = 100;

/// Where things sit on the template artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TemplateSpec")]
pub struct Template {
    pub text_rect: Rect,
    pub portrait_offset: (i32, i32),
    pub background_count: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateSpec {
    text_rect: [i32; 4],
    #[serde(default = "default_portrait_offset")]
    portrait_offset: (i32, i32),
    #[serde(default = "default_background_count")]
    background_count: u32,
}

fn default_portrait_offset() -> (i32, i32) {
    placard_render_skia::canvas::DEFAULT_PORTRAIT_OFFSET
}

fn default_background_count() -> u32 {
    16
}

impl TryFrom<TemplateSpec> for Template {
    type Error = PlacardError;

    fn try_from(spec: TemplateSpec) -> Result<Self> {
        let [x1, y1, x2, y2] = spec.text_rect;
        if spec.background_count == 0 {
            return Err(PlacardError::Config(
                "background_count must be at least 1".into(),
            ));
        }
        Ok(Self {
            text_rect: Rect::new(x1, y1, x2, y2)?,
            portrait_offset: spec.portrait_offset,
            background_count: spec.background_count,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterProfile {
    pub emotion_count: u32,
    /// Relative to the font directory handed to [`ProfileSet::font_path`]
    #[serde(rename = "font")]
    pub font_file: PathBuf,
    /// Bracket color; the default blue when absent
    #[serde(default)]
    pub highlight_color: Option<Color>,
}

/// A whole profile document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileSet {
    pub template: Template,
    pub characters: BTreeMap<String, CharacterProfile>,
    #[serde(default)]
    pub name_labels: NameLabelTable,
}

impl ProfileSet {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PlacardError::Config(format!("invalid profile document: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let profiles = Self::from_json_str(&json)
            .map_err(|e| PlacardError::Config(format!("{}: {e}", path.display())))?;
        log::debug!(
            "loaded {} character profiles from {}",
            profiles.characters.len(),
            path.display()
        );
        Ok(profiles)
    }

    pub fn character(&self, id: &str) -> Result<&CharacterProfile> {
        self.characters
            .get(id)
            .ok_or_else(|| PlacardError::Config(format!("unknown character '{id}'")))
    }

    /// The character's font file inside `font_dir`
    pub fn font_path(&self, character: &str, font_dir: impl AsRef<Path>) -> Result<PathBuf> {
        Ok(font_dir.as_ref().join(&self.character(character)?.font_file))
    }

    pub fn highlight_color(&self, character: &str) -> Color {
        self.characters
            .get(character)
            .and_then(|profile| profile.highlight_color)
            .unwrap_or_else(Color::highlight_blue)
    }

    pub fn name_labels(&self, character: &str) -> Option<&[NameLabel]> {
        self.name_labels.get(character).map(Vec::as_slice)
    }

    /// Number of the base image pairing `emotion` with `background`, both 0-based
    pub fn base_image_number(&self, emotion: u32, background: u32) -> u32 {
        emotion * self.template.background_count + background + 1
    }

    /// Base image numbers that show expression `emotion` (1-based)
    ///
    /// Fails for expressions the character does not have.
    pub fn emotion_range(&self, character: &str, emotion: u32) -> Result<RangeInclusive<u32>> {
        let profile = self.character(character)?;
        if emotion == 0 || emotion > profile.emotion_count {
            return Err(PlacardError::Config(format!(
                "'{character}' has expressions 1..={}, not {emotion}",
                profile.emotion_count
            )));
        }
        let count = self.template.background_count;
        Ok((emotion - 1) * count + 1..=emotion * count)
    }

    /// Total base images for a character
    pub fn base_image_count(&self, character: &str) -> Result<u32> {
        Ok(self.character(character)?.emotion_count * self.template.background_count)
    }

    /// Draw a random base image number for `character`
    ///
    /// With an `expression` (1-based) the number comes from that expression's
    /// block. Without one, any base qualifies except those showing the same
    /// expression as `last`; after 100 draws the latest one is taken as is.
    pub fn pick_base_image<R: Rng + ?Sized>(
        &self,
        character: &str,
        expression: Option<u32>,
        last: Option<u32>,
        rng: &mut R,
    ) -> Result<u32> {
        if let Some(expression) = expression {
            let range = self.emotion_range(character, expression)?;
            return Ok(rng.gen_range(range));
        }

        let total = self.base_image_count(character)?;
        if total == 0 {
            return Err(PlacardError::Config(format!(
                "'{character}' has no expressions"
            )));
        }
        let count = self.template.background_count;
        let emotion_of = |number: u32| (number - 1) / count;
        let last_emotion = last.filter(|&number| number > 0).map(emotion_of);

        let mut number = rng.gen_range(1..=total);
        for _ in 1..MAX_PICK_ATTEMPTS {
            if Some(emotion_of(number)) != last_emotion {
                break;
            }
            number = rng.gen_range(1..=total);
        }
        log::debug!("picked base {number} of {total} for '{character}'");
        Ok(number)
    }
}

/// File name of a generated base image
pub fn base_image_name(character: &str, number: u32) -> String {
    format!("{character} ({number}).jpg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DOC: &str = r##"{
        "template": { "text_rect": [728, 355, 2339, 800] },
        "characters": {
            "ema": { "emotion_count": 8, "font": "font3.ttf" },
            "anan": { "emotion_count": 9, "font": "font3.ttf", "highlight_color": [159, 145, 251] }
        },
        "name_labels": {
            "ema": [
                { "text": "樱", "position": [759, 73], "font_color": [253, 145, 175], "font_size": 186 },
                { "text": "", "position": [0, 0], "font_color": "#ffffff", "font_size": 1 }
            ]
        }
    }"##;

    #[test]
    fn parses_document_with_defaults() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        assert_eq!(profiles.template.portrait_offset, (0, 134));
        assert_eq!(profiles.template.background_count, 16);
        assert_eq!(profiles.template.text_rect.width(), 1611);
        assert_eq!(profiles.characters.len(), 2);

        let labels = profiles.name_labels("ema").unwrap();
        assert_eq!(labels[0].color, Color::rgb(253, 145, 175));
        assert_eq!(labels[0].size, 186);
        assert_eq!(labels[1].color, Color::white());
        assert!(profiles.name_labels("anan").is_none());
    }

    #[test]
    fn highlight_falls_back_to_blue() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        assert_eq!(profiles.highlight_color("anan"), Color::rgb(159, 145, 251));
        assert_eq!(profiles.highlight_color("ema"), Color::highlight_blue());
        assert_eq!(profiles.highlight_color("nobody"), Color::highlight_blue());
    }

    #[test]
    fn font_path_joins_font_dir() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        assert_eq!(
            profiles.font_path("ema", "/assets/fonts").unwrap(),
            PathBuf::from("/assets/fonts/font3.ttf")
        );
        assert!(profiles.font_path("nobody", "/assets").is_err());
    }

    #[test]
    fn base_numbers_follow_expression_blocks() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        assert_eq!(profiles.base_image_number(0, 0), 1);
        assert_eq!(profiles.base_image_number(2, 5), 38);
        assert_eq!(profiles.emotion_range("ema", 3).unwrap(), 33..=48);
        assert!(profiles.emotion_range("ema", 9).is_err());
        assert!(profiles.emotion_range("ema", 0).is_err());
        assert_eq!(profiles.base_image_count("anan").unwrap(), 144);
        assert_eq!(base_image_name("ema", 38), "ema (38).jpg");
    }

    proptest::proptest! {
        #[test]
        fn prop_every_pairing_lands_in_its_expression_range(
            emotion in 1u32..=8,
            background in 0u32..16,
        ) {
            let profiles = ProfileSet::from_json_str(DOC).unwrap();
            let number = profiles.base_image_number(emotion - 1, background);
            let range = profiles.emotion_range("ema", emotion).unwrap();
            proptest::prop_assert!(range.contains(&number));
        }
    }

    #[test]
    fn picked_base_stays_in_requested_expression() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let number = profiles
                .pick_base_image("ema", Some(3), Some(40), &mut rng)
                .unwrap();
            assert!((33..=48).contains(&number), "{number}");
        }
        assert!(profiles
            .pick_base_image("ema", Some(9), None, &mut rng)
            .is_err());
    }

    #[test]
    fn picked_base_changes_expression() {
        let profiles = ProfileSet::from_json_str(DOC).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut last = None;
        for _ in 0..200 {
            let number = profiles
                .pick_base_image("ema", None, last, &mut rng)
                .unwrap();
            assert!((1..=128).contains(&number));
            if let Some(previous) = last {
                assert_ne!((number - 1) / 16, (previous - 1) / 16);
            }
            last = Some(number);
        }
    }

    #[test]
    fn single_expression_character_still_gets_a_base() {
        let doc = r#"{
            "template": { "text_rect": [0, 0, 10, 10], "background_count": 4 },
            "characters": { "solo": { "emotion_count": 1, "font": "f.ttf" } }
        }"#;
        let profiles = ProfileSet::from_json_str(doc).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let number = profiles
            .pick_base_image("solo", None, Some(2), &mut rng)
            .unwrap();
        assert!((1..=4).contains(&number));
        assert!(profiles.pick_base_image("nobody", None, None, &mut rng).is_err());
    }

    #[test]
    fn degenerate_template_is_rejected() {
        let doc = r#"{ "template": { "text_rect": [10, 10, 5, 5] }, "characters": {} }"#;
        assert!(ProfileSet::from_json_str(doc).is_err());
        let doc = r#"{ "template": { "text_rect": [0, 0, 5, 5], "background_count": 0 }, "characters": {} }"#;
        assert!(ProfileSet::from_json_str(doc).is_err());
    }

    #[test]
    fn bundled_profiles_parse() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/profiles.json");
        let profiles = ProfileSet::from_path(path).unwrap();
        assert_eq!(profiles.characters.len(), 14);
        assert_eq!(profiles.characters["yuki"].emotion_count, 18);
        assert_eq!(profiles.name_labels.len(), 14);
        assert_eq!(
            profiles.template.text_rect,
            Rect::new(728, 355, 2339, 800).unwrap()
        );
    }
}
