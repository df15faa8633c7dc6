use crate::compress::{clamp_size, CompressOptions};
use crate::fit::fit;
use crate::highlight::{segment, HighlightState};
use crate::traits::testing::CellMeasure;
use crate::types::{Align, Rect, ScalePolicy, VAlign};
use crate::wrap::wrap;
use crate::{place, Color};
use proptest::prelude::*;

fn any_align() -> impl Strategy<Value = Align> {
    prop_oneof![Just(Align::Left), Just(Align::Center), Just(Align::Right)]
}

fn any_valign() -> impl Strategy<Value = VAlign> {
    prop_oneof![Just(VAlign::Top), Just(VAlign::Middle), Just(VAlign::Bottom)]
}

fn any_policy() -> impl Strategy<Value = ScalePolicy> {
    (
        any::<bool>(),
        proptest::option::of(1u32..4000),
        proptest::option::of(1u32..4000),
    )
        .prop_map(|(allow_upscale, max_width, max_height)| ScalePolicy {
            allow_upscale,
            max_width,
            max_height,
        })
}

// Property: placed content never spills out of the padded region
proptest! {
    #[test]
    fn prop_place_stays_inside_region(
        content in (1u32..5000, 1u32..5000),
        origin in (-2000i32..2000, -2000i32..2000),
        size in (1u32..3000, 1u32..3000),
        padding in 0u32..100,
        align in any_align(),
        valign in any_valign(),
        policy in any_policy(),
    ) {
        let rect = Rect::new(
            origin.0,
            origin.1,
            origin.0 + size.0 as i32,
            origin.1 + size.1 as i32,
        ).unwrap();
        let Ok(region) = rect.shrink(padding) else {
            return Ok(());
        };

        let placed = place(content, &rect, align, valign, padding, &policy).unwrap();

        prop_assert!(placed.width <= region.width() + 1);
        prop_assert!(placed.height <= region.height() + 1);
        if !policy.allow_upscale {
            prop_assert!(placed.scale <= 1.0);
        }
        prop_assert!(placed.x >= region.x1() - 1);
        prop_assert!(placed.y >= region.y1() - 1);
    }
}

// Property: a bigger region never gets a smaller font
proptest! {
    #[test]
    fn prop_fit_monotonic_in_region(
        text in "[a-z你好世界高兴]{0,24}",
        base in (1u32..300, 1u32..300),
        grow in (0u32..200, 0u32..200),
    ) {
        let small = Rect::new(0, 0, base.0 as i32, base.1 as i32).unwrap();
        let large = Rect::new(0, 0, (base.0 + grow.0) as i32, (base.1 + grow.1) as i32).unwrap();

        let small_fit = fit(&text, &small, None, 0.15, &CellMeasure);
        let large_fit = fit(&text, &large, None, 0.15, &CellMeasure);

        prop_assert!(large_fit.font_size >= small_fit.font_size);
    }
}

// Property: wrapping a wrapped line again leaves it alone
proptest! {
    #[test]
    fn prop_wrap_idempotent(
        words in proptest::collection::vec("[a-z]{1,12}|[你好世界高兴]{1,6}", 0..12),
        dense in any::<bool>(),
        max_width in 10u32..200,
    ) {
        let text = if dense { words.concat() } else { words.join(" ") };
        let lines = wrap(&text, &CellMeasure, 10, max_width);
        for line in &lines {
            let rewrapped = wrap(line, &CellMeasure, 10, max_width);
            prop_assert_eq!(&rewrapped, &vec![line.clone()]);
        }
    }
}

// Property: runs reassemble into the input text
proptest! {
    #[test]
    fn prop_segment_round_trip(text in "[a-z \\[\\]【】你好\n]{0,64}") {
        let mut state = HighlightState::Plain;
        let mut rebuilt = Vec::new();
        for line in text.split('\n') {
            let (runs, next) = segment(line, state, Color::white(), Color::highlight_blue());
            prop_assert!(runs.iter().all(|run| !run.text.is_empty()));
            rebuilt.push(runs.into_iter().map(|run| run.text).collect::<String>());
            state = next;
        }
        prop_assert_eq!(rebuilt.join("\n"), text);
    }
}

// Property: the two-step clamp is a fixed point after one pass
proptest! {
    #[test]
    fn prop_clamp_idempotent(width in 1u32..20_000, height in 1u32..20_000) {
        let options = CompressOptions::default();
        let once = clamp_size(width, height, &options);
        prop_assert!(once.0 <= options.max_width);
        prop_assert!(once.1 <= options.max_height);
        prop_assert_eq!(clamp_size(once.0, once.1, &options), once);
    }
}
