//! Bracket highlighting
//!
//! `[` and `]` (and their fullwidth forms `【` `】`) switch the text between
//! the default and the highlight color. The state survives line breaks: an
//! unclosed bracket keeps coloring the following lines until it is closed.

use crate::types::GlyphRun;
use crate::Color;

/// Whether the scanner is inside a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightState {
    #[default]
    Plain,
    Bracketed,
}

impl HighlightState {
    fn color(self, default: Color, highlight: Color) -> Color {
        match self {
            HighlightState::Plain => default,
            HighlightState::Bracketed => highlight,
        }
    }
}

fn is_open(ch: char) -> bool {
    matches!(ch, '[' | '【')
}

fn is_close(ch: char) -> bool {
    matches!(ch, ']' | '】')
}

fn flush(buffer: &mut String, color: Color, runs: &mut Vec<GlyphRun>) {
    if !buffer.is_empty() {
        runs.push(GlyphRun::new(std::mem::take(buffer), color));
    }
}

/// Split one line into colored runs, starting from `state`
///
/// Returns the runs and the state to hand to the next line. Delimiters are
/// kept as their own highlight-colored runs so the rendered text is unchanged.
pub fn segment(
    line: &str,
    state: HighlightState,
    default: Color,
    highlight: Color,
) -> (Vec<GlyphRun>, HighlightState) {
    let mut runs = Vec::new();
    let mut buffer = String::new();
    let mut state = state;

    for ch in line.chars() {
        if is_open(ch) {
            flush(&mut buffer, state.color(default, highlight), &mut runs);
            runs.push(GlyphRun::new(ch, highlight));
            state = HighlightState::Bracketed;
        } else if is_close(ch) {
            flush(&mut buffer, highlight, &mut runs);
            runs.push(GlyphRun::new(ch, highlight));
            state = HighlightState::Plain;
        } else {
            buffer.push(ch);
        }
    }
    flush(&mut buffer, state.color(default, highlight), &mut runs);

    (runs, state)
}

/// Segment a whole block, threading the state from line to line
pub fn segment_lines<S: AsRef<str>>(
    lines: &[S],
    default: Color,
    highlight: Color,
) -> Vec<Vec<GlyphRun>> {
    let mut state = HighlightState::Plain;
    lines
        .iter()
        .map(|line| {
            let (runs, next) = segment(line.as_ref(), state, default, highlight);
            state = next;
            runs
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::white();
    const BLUE: Color = Color::highlight_blue();

    #[test]
    fn bracketed_greeting() {
        let (runs, state) = segment("[高兴]你好世界", HighlightState::Plain, WHITE, BLUE);
        assert_eq!(
            runs,
            vec![
                GlyphRun::new("[", BLUE),
                GlyphRun::new("高兴", BLUE),
                GlyphRun::new("]", BLUE),
                GlyphRun::new("你好世界", WHITE),
            ]
        );
        assert_eq!(state, HighlightState::Plain);
    }

    #[test]
    fn fullwidth_brackets_work_the_same() {
        let (runs, state) = segment("说【重点", HighlightState::Plain, WHITE, BLUE);
        assert_eq!(
            runs,
            vec![
                GlyphRun::new("说", WHITE),
                GlyphRun::new("【", BLUE),
                GlyphRun::new("重点", BLUE),
            ]
        );
        assert_eq!(state, HighlightState::Bracketed);
    }

    #[test]
    fn open_bracket_carries_across_lines() {
        let block = segment_lines(&["a [b", "c d", "e] f"], WHITE, BLUE);
        assert_eq!(block[1], vec![GlyphRun::new("c d", BLUE)]);
        assert_eq!(
            block[2],
            vec![
                GlyphRun::new("e", BLUE),
                GlyphRun::new("]", BLUE),
                GlyphRun::new(" f", WHITE),
            ]
        );
    }

    #[test]
    fn stray_close_resets_to_plain() {
        let (runs, state) = segment("x]y", HighlightState::Plain, WHITE, BLUE);
        assert_eq!(
            runs,
            vec![
                GlyphRun::new("x", BLUE),
                GlyphRun::new("]", BLUE),
                GlyphRun::new("y", WHITE),
            ]
        );
        assert_eq!(state, HighlightState::Plain);
    }

    #[test]
    fn empty_line_keeps_state() {
        let (runs, state) = segment("", HighlightState::Bracketed, WHITE, BLUE);
        assert!(runs.is_empty());
        assert_eq!(state, HighlightState::Bracketed);
    }
}
