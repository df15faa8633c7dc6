//! Greedy line wrapping
//!
//! Paragraphs are wrapped one at a time. A paragraph that contains a space is
//! wrapped word by word; one without spaces (CJK and other dense scripts) is
//! wrapped character by character. The choice is made once per paragraph, so
//! a mixed paragraph with a single space is treated entirely as words. That
//! is coarse, but it is what existing cards were laid out with.

use crate::traits::TextMeasure;

/// Break `text` into lines no wider than `max_width` pixels at `size`
///
/// Every paragraph contributes at least one line, so blank lines survive and
/// empty input yields a single empty line. A lone character wider than
/// `max_width` is emitted on its own line rather than dropped.
pub fn wrap<M: TextMeasure + ?Sized>(
    text: &str,
    measure: &M,
    size: u32,
    max_width: u32,
) -> Vec<String> {
    let mut wrapper = Wrapper {
        measure,
        size,
        max_width,
        lines: Vec::new(),
    };

    if text.is_empty() {
        wrapper.lines.push(String::new());
        return wrapper.lines;
    }

    for paragraph in text.lines() {
        let before = wrapper.lines.len();
        if paragraph.contains(' ') {
            wrapper.wrap_words(paragraph);
        } else {
            wrapper.wrap_dense(paragraph);
        }
        if wrapper.lines.len() == before {
            wrapper.lines.push(String::new());
        }
    }

    log::trace!(
        "wrap: {} line(s) at {}px within {}px via {}",
        wrapper.lines.len(),
        size,
        max_width,
        measure.name()
    );
    wrapper.lines
}

struct Wrapper<'m, M: ?Sized> {
    measure: &'m M,
    size: u32,
    max_width: u32,
    lines: Vec<String>,
}

impl<M: TextMeasure + ?Sized> Wrapper<'_, M> {
    fn fits(&self, candidate: &str) -> bool {
        self.measure.text_width(candidate, self.size) <= self.max_width
    }

    fn flush(&mut self, buffer: &mut String) {
        if !buffer.is_empty() {
            self.lines.push(std::mem::take(buffer));
        }
    }

    fn wrap_words(&mut self, paragraph: &str) {
        let mut buffer = String::new();
        for word in paragraph.split(' ') {
            let trial = if buffer.is_empty() {
                word.to_owned()
            } else {
                format!("{buffer} {word}")
            };
            if self.fits(&trial) {
                buffer = trial;
                continue;
            }

            self.flush(&mut buffer);
            if word.chars().nth(1).is_some() {
                // Too long for any line: break it like dense text, keep the tail
                buffer = self.split_chars(word);
            } else {
                self.start_with(word, &mut buffer);
            }
        }
        self.flush(&mut buffer);
    }

    fn wrap_dense(&mut self, paragraph: &str) {
        let mut buffer = String::new();
        let mut unit = [0u8; 4];
        for ch in paragraph.chars() {
            let ch_str: &str = ch.encode_utf8(&mut unit);
            let mut trial = buffer.clone();
            trial.push(ch);
            if self.fits(&trial) {
                buffer = trial;
                continue;
            }
            self.flush(&mut buffer);
            self.start_with(ch_str, &mut buffer);
        }
        self.flush(&mut buffer);
    }

    /// Start a fresh line with `unit`, or emit it alone when even that overflows
    fn start_with(&mut self, unit: &str, buffer: &mut String) {
        if self.fits(unit) {
            *buffer = unit.to_owned();
        } else {
            self.lines.push(unit.to_owned());
            buffer.clear();
        }
    }

    /// Greedy per-character split of one oversized word; returns the unfinished tail
    fn split_chars(&mut self, word: &str) -> String {
        let mut piece = String::new();
        for ch in word.chars() {
            let mut trial = piece.clone();
            trial.push(ch);
            if self.fits(&trial) {
                piece = trial;
            } else {
                self.flush(&mut piece);
                piece.push(ch);
            }
        }
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::testing::CellMeasure;

    // CellMeasure at size 10: ASCII is 5px, CJK is 10px
    fn wrap10(text: &str, max_width: u32) -> Vec<String> {
        wrap(text, &CellMeasure, 10, max_width)
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap10("", 100), vec![String::new()]);
    }

    #[test]
    fn blank_paragraphs_are_kept() {
        assert_eq!(wrap10("ab\n\n\ncd", 100), vec!["ab", "", "", "cd"]);
        assert_eq!(wrap10("ab\r\ncd", 100), vec!["ab", "cd"]);
    }

    #[test]
    fn words_fill_greedily() {
        // "hello world" = 55px, "hello" = 25px
        assert_eq!(wrap10("hello world foo", 55), vec!["hello world", "foo"]);
        assert_eq!(wrap10("hello world foo", 50), vec!["hello", "world foo"]);
    }

    #[test]
    fn dense_text_breaks_per_character() {
        assert_eq!(wrap10("你好世界再见", 30), vec!["你好世", "界再见"]);
    }

    #[test]
    fn any_space_forces_word_mode() {
        // The CJK run is one token and has to be split as an oversized word
        assert_eq!(wrap10("你好世界 hi", 25), vec!["你好", "世界", "hi"]);
    }

    #[test]
    fn oversized_word_is_split_and_tail_continues() {
        // "abcdefgh" is 40px against a 20px line; tail "efgh" then meets "x"
        assert_eq!(wrap10("abcdefgh x", 20), vec!["abcd", "efgh", "x"]);
        assert_eq!(wrap10("a abcdefg", 20), vec!["a", "abcd", "efg"]);
    }

    #[test]
    fn lone_wide_character_gets_its_own_line() {
        assert_eq!(wrap10("ab你cd", 8), vec!["a", "b", "你", "c", "d"]);
    }

    #[test]
    fn whitespace_only_paragraph_keeps_its_line() {
        assert_eq!(wrap10("a\n  \nb", 100), vec!["a", "", "b"]);
    }
}
