//! Emoji-aware segmentation for measuring and drawing card text
//!
//! Card fonts rarely carry emoji, so an emoji drawn with the text font would
//! measure as a narrow `.notdef` box. Instead every emoji grapheme cluster is
//! treated as a square one em wide, and everything around it is measured with
//! the font as usual. [`EmojiAware`] wraps any [`TextMeasure`] with that rule.

use icu_properties::{props::ExtendedPictographic, CodePointSetData, CodePointSetDataBorrowed};
use icu_segmenter::GraphemeClusterSegmenter;
use placard_core::{LineMetrics, TextMeasure};

#[cfg(test)]
mod proptests;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';
const REGIONAL_INDICATORS: std::ops::RangeInclusive<char> = '\u{1F1E6}'..='\u{1F1FF}';

/// What a segment of text is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Ordinary text, drawn and measured with the font
    Text,
    /// One emoji cluster, drawn and measured as a square
    Emoji,
}

/// A slice of the input that is either plain text or a single emoji
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

/// Splits text into plain runs and individual emoji clusters
pub struct EmojiSegmenter {
    pictographic: CodePointSetDataBorrowed<'static>,
}

impl EmojiSegmenter {
    /// Create a segmenter with ICU data baked in
    pub fn new() -> Self {
        Self {
            pictographic: CodePointSetData::new::<ExtendedPictographic>(),
        }
    }

    /// Whether a grapheme cluster renders as an emoji
    ///
    /// A cluster counts when it holds an `Extended_Pictographic` character
    /// (text-presentation symbols such as U+2764 included), asks for emoji
    /// presentation with VS16 (keycaps), or is a flag.
    pub fn is_emoji(&self, cluster: &str) -> bool {
        cluster.chars().any(|ch| {
            ch == VARIATION_SELECTOR_16
                || REGIONAL_INDICATORS.contains(&ch)
                || self.pictographic.contains(ch)
        })
    }

    /// Split `text` into maximal text runs and single-cluster emoji segments
    ///
    /// Concatenating the returned slices gives back `text` exactly.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        if text.is_empty() {
            return segments;
        }

        // Pure ASCII never contains emoji; skip the segmenter
        if text.is_ascii() {
            log::trace!("segments: {} ASCII bytes, no cluster pass", text.len());
            segments.push(Segment {
                text,
                kind: SegmentKind::Text,
            });
            return segments;
        }

        let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
        let mut run_start = 0;
        for pair in boundaries.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let cluster = &text[start..end];
            if !self.is_emoji(cluster) {
                continue;
            }
            if run_start < start {
                segments.push(Segment {
                    text: &text[run_start..start],
                    kind: SegmentKind::Text,
                });
            }
            segments.push(Segment {
                text: cluster,
                kind: SegmentKind::Emoji,
            });
            run_start = end;
        }
        if run_start < text.len() {
            segments.push(Segment {
                text: &text[run_start..],
                kind: SegmentKind::Text,
            });
        }

        log::trace!(
            "segments: {} cluster(s) -> {} segment(s)",
            boundaries.len().saturating_sub(1),
            segments.len()
        );
        segments
    }
}

impl Default for EmojiSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`TextMeasure`] that sizes emoji clusters as `size` x `size` squares
pub struct EmojiAware<M> {
    inner: M,
    segmenter: EmojiSegmenter,
}

impl<M: TextMeasure> EmojiAware<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            segmenter: EmojiSegmenter::new(),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn segmenter(&self) -> &EmojiSegmenter {
        &self.segmenter
    }
}

impl<M: TextMeasure> TextMeasure for EmojiAware<M> {
    fn name(&self) -> &'static str {
        "emoji-aware"
    }

    fn text_width(&self, text: &str, size: u32) -> u32 {
        self.segmenter
            .segments(text)
            .iter()
            .map(|segment| match segment.kind {
                SegmentKind::Text => self.inner.text_width(segment.text, size),
                SegmentKind::Emoji => size,
            })
            .fold(0u32, u32::saturating_add)
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        self.inner.line_metrics(size)
    }
}
