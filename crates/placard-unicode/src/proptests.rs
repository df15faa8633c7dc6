use super::*;
use proptest::prelude::*;

// Property: segments always reassemble into the input
proptest! {
    #[test]
    fn prop_segments_round_trip(s in "\\PC*") {
        let segmenter = EmojiSegmenter::new();
        let rebuilt: String = segmenter.segments(&s).iter().map(|seg| seg.text).collect();
        prop_assert_eq!(rebuilt, s);
    }
}

// Property: no empty segments, and text runs are never adjacent
proptest! {
    #[test]
    fn prop_segments_are_maximal(s in "[a-z你好😀🎉 ]{0,32}") {
        let segments = EmojiSegmenter::new().segments(&s);
        prop_assert!(segments.iter().all(|seg| !seg.text.is_empty()));
        for pair in segments.windows(2) {
            prop_assert!(
                !(pair[0].kind == SegmentKind::Text && pair[1].kind == SegmentKind::Text)
            );
        }
    }
}
