use crate::str_utils;

/// An additive summary of a span of text: how many chars, bytes, UTF-16
/// surrogate pairs, and line breaks it contains, plus the two flags
/// needed to detect a CRLF pair straddling a concatenation seam.
///
/// `TextInfo` is a monoid under [`concat`](TextInfo::concat), with the
/// all-zero value as identity. It deliberately does not implement
/// `std::ops::Add`: every site that combines two `TextInfo`s must go
/// through `concat` so the CRLF correction is never forgotten.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub(crate) struct TextInfo {
    pub bytes: usize,
    pub chars: usize,
    pub utf16_surrogates: usize,
    pub line_breaks: usize,
    pub starts_with_lf: bool,
    pub ends_with_cr: bool,
}

impl TextInfo {
    pub fn new() -> TextInfo {
        TextInfo::default()
    }

    /// Computes the `TextInfo` of a standalone chunk of text.
    pub fn from_str(text: &str) -> TextInfo {
        let char_count = str_utils::count_chars(text);
        let utf16_surrogates = {
            // Each char outside the BMP contributes one extra utf16 code
            // unit beyond its single char count.
            let utf16_len = str_utils::char_to_utf16_cu_idx(text, char_count);
            utf16_len - char_count
        };

        TextInfo {
            bytes: text.len(),
            chars: char_count,
            utf16_surrogates,
            line_breaks: str_utils::count_line_breaks(text),
            starts_with_lf: str_utils::starts_with_lf(text),
            ends_with_cr: str_utils::ends_with_cr(text),
        }
    }

    /// The number of UTF-16 code units this span would occupy.
    #[inline]
    pub fn utf16_len(&self) -> usize {
        self.chars + self.utf16_surrogates
    }

    /// Combines the info of two adjacent spans `self` (left) and `other`
    /// (right), applying the CRLF correction if `self` ends in a CR and
    /// `other` begins with an LF — in that case the pair is one line
    /// break, not two.
    pub fn concat(&self, other: &TextInfo) -> TextInfo {
        let crlf_seam = self.ends_with_cr && other.starts_with_lf;

        TextInfo {
            bytes: self.bytes + other.bytes,
            chars: self.chars + other.chars,
            utf16_surrogates: self.utf16_surrogates + other.utf16_surrogates,
            line_breaks: self.line_breaks + other.line_breaks - (crlf_seam as usize),
            starts_with_lf: if self.bytes == 0 {
                other.starts_with_lf
            } else {
                self.starts_with_lf
            },
            ends_with_cr: if other.bytes == 0 {
                self.ends_with_cr
            } else {
                other.ends_with_cr
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_basic() {
        let info = TextInfo::from_str("Hello\nworld!");
        assert_eq!(12, info.bytes);
        assert_eq!(12, info.chars);
        assert_eq!(0, info.utf16_surrogates);
        assert_eq!(1, info.line_breaks);
        assert!(!info.starts_with_lf);
        assert!(!info.ends_with_cr);
    }

    #[test]
    fn from_str_astral() {
        let info = TextInfo::from_str("a\u{1F600}b");
        assert_eq!(3, info.chars);
        assert_eq!(1, info.utf16_surrogates);
        assert_eq!(4, info.utf16_len());
    }

    #[test]
    fn concat_no_seam() {
        let a = TextInfo::from_str("foo\n");
        let b = TextInfo::from_str("bar\n");
        let c = a.concat(&b);
        assert_eq!(2, c.line_breaks);
        assert_eq!(8, c.chars);
    }

    #[test]
    fn concat_crlf_seam_corrected() {
        let a = TextInfo::from_str("foo\r");
        let b = TextInfo::from_str("\nbar");
        let c = a.concat(&b);
        // Without the correction this would be 2 (one from each side).
        assert_eq!(1, c.line_breaks);
    }

    #[test]
    fn concat_crlf_non_seam_not_corrected() {
        let a = TextInfo::from_str("foo\r");
        let b = TextInfo::from_str("bar");
        let c = a.concat(&b);
        assert_eq!(1, c.line_breaks);
    }

    #[test]
    fn concat_empty_identity() {
        let a = TextInfo::from_str("hello\r\n");
        let empty = TextInfo::new();
        assert_eq!(a, a.concat(&empty));
        assert_eq!(a, empty.concat(&a));
    }
}
