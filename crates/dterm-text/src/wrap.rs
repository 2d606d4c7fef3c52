//! Greedy word wrapping against an injected width function.
//!
//! Words are the pieces between single spaces. A line keeps growing while the
//! candidate `line + " " + word` measures strictly less than `max_width`; the
//! first word that does not fit starts a new line. Words are never split, so a
//! word wider than `max_width` occupies a line by itself.
//!
//! Embedded line breaks separate paragraphs, and each paragraph wraps on its
//! own. An empty paragraph still produces one (empty) line.
//!
//! # Example
//! ```
//! use dterm_text::wrap;
//!
//! let width = |s: &str| s.chars().count() as f32;
//! assert_eq!(wrap("one two three", width, 8.0), vec!["one two", "three"]);
//! assert_eq!(wrap("a\n\nb", width, 8.0), vec!["a", "", "b"]);
//! ```

/// Split text into paragraphs on `\n`, dropping carriage returns.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|p| p.strip_suffix('\r').unwrap_or(p))
}

/// Wrap one paragraph. The paragraph must not contain line breaks.
#[must_use]
pub fn wrap_paragraph<F>(paragraph: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut words = paragraph.split(' ');
    let mut lines = Vec::new();
    let mut current = words.next().unwrap_or_default().to_owned();
    for word in words {
        let mut candidate = String::with_capacity(current.len() + 1 + word.len());
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);
        if measure(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    lines.push(current);
    lines
}

/// Wrap text that may contain embedded line breaks.
#[must_use]
pub fn wrap<F>(text: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in paragraphs(text) {
        lines.extend(wrap_paragraph(paragraph, &measure, max_width));
    }
    tracing::trace!(
        target: "dterm.text",
        input_len = text.len(),
        lines = lines.len(),
        max_width,
        "wrapped"
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", chars, 10.0), vec![String::new()]);
    }

    #[test]
    fn fits_strictly_less_than_width() {
        // "ab cd" is 5 wide: equal to the limit does not fit.
        assert_eq!(wrap("ab cd", chars, 5.0), vec!["ab", "cd"]);
        assert_eq!(wrap("ab cd", chars, 5.1), vec!["ab cd"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic b", chars, 6.0),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn first_word_is_never_dropped() {
        assert_eq!(wrap("enormous", chars, 1.0), vec!["enormous"]);
    }

    #[test]
    fn paragraphs_wrap_independently() {
        assert_eq!(
            wrap("one two\r\nthree four", chars, 100.0),
            vec!["one two", "three four"]
        );
        assert_eq!(wrap("x\n", chars, 100.0), vec!["x", ""]);
    }

    #[test]
    fn repeated_spaces_are_preserved_as_empty_words() {
        assert_eq!(wrap("a  b", chars, 100.0), vec!["a  b"]);
        assert_eq!(wrap("a  b", chars, 3.0), vec!["a ", "b"]);
    }

    #[test]
    fn zero_width_breaks_every_word() {
        assert_eq!(wrap("a b c", chars, 0.0), vec!["a", "b", "c"]);
    }

    #[tracing_test::traced_test]
    #[test]
    fn wrap_traces_line_count() {
        let _ = wrap("alpha beta", chars, 6.0);
        assert!(logs_contain("wrapped"));
        assert!(logs_contain("lines=2"));
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        fn chars(s: &str) -> f32 {
            s.chars().count() as f32
        }

        proptest! {
            #[test]
            fn rejoining_reproduces_paragraph(p in "[a-z ]{0,80}", width in 1.0f32..40.0) {
                let lines = wrap_paragraph(&p, chars, width);
                prop_assert_eq!(lines.join(" "), p);
            }

            #[test]
            fn multi_word_lines_fit(p in "[a-z]{1,8}( [a-z]{1,8}){0,12}", width in 1.0f32..40.0) {
                for line in wrap_paragraph(&p, chars, width) {
                    if line.contains(' ') {
                        prop_assert!(chars(&line) < width, "{:?} overflows {}", line, width);
                    }
                }
            }

            #[test]
            fn words_survive_in_order(p in "[a-z]{1,8}( [a-z]{1,8}){0,12}", width in 9.0f32..40.0) {
                let lines = wrap(&p, chars, width);
                let words: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
                let original: Vec<&str> = p.split(' ').collect();
                prop_assert_eq!(words, original);
            }
        }
    }
}
