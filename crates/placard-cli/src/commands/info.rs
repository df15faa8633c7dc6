//! `placard info`

use placard::profile::ProfileSet;
use placard::Result;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let profiles = ProfileSet::from_path(&args.profiles)?;
    let template = &profiles.template;
    let rect = template.text_rect;

    println!(
        "Template: text rect ({},{})-({},{}), portrait at ({},{}), {} backgrounds",
        rect.x1(),
        rect.y1(),
        rect.x2(),
        rect.y2(),
        template.portrait_offset.0,
        template.portrait_offset.1,
        template.background_count
    );
    println!();
    println!("Characters:");
    for (id, character) in &profiles.characters {
        let labels = profiles
            .name_labels(id)
            .map(|labels| labels.iter().filter(|label| !label.text.is_empty()).count())
            .unwrap_or(0);
        println!(
            "  {:<10} {:>2} expressions  {:>3} bases  font {}  {} name labels",
            id,
            character.emotion_count,
            character.emotion_count * template.background_count,
            character.font_file.display(),
            labels
        );
    }
    Ok(())
}
