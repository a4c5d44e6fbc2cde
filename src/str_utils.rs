//! Standalone coordinate-conversion utilities over raw `&str` values.
//!
//! These mirror the coordinate systems exposed by [`Rope`](crate::Rope),
//! but operate on a plain string with no tree involved. They're the
//! building blocks the tree leans on, and are also useful on their own
//! when a caller only has a chunk of text in hand.

use str_indices::{chars, utf16};

/// Counts the Unicode scalar values in `text`.
///
/// Uses bit-fiddling magic to count utf8 chars really quickly. We
/// actually count the number of non-starting utf8 bytes, since they
/// have a consistent starting two-bit pattern, then subtract from the
/// byte length of the text to get the final count.
pub fn count_chars(text: &str) -> usize {
    #[allow(overflowing_literals)]
    const ONEMASK: usize = 0x0101_0101_0101_0101_0101_0101_0101_0101;

    let tsize: usize = std::mem::size_of::<usize>();

    let len = text.len();
    let mut ptr = text.as_ptr();
    let end_ptr = unsafe { ptr.add(len) };
    let mut inv_count = 0;

    let end_pre_ptr = {
        let aligned = ptr as usize + (tsize - (ptr as usize & (tsize - 1)));
        (end_ptr as usize).min(aligned) as *const u8
    };
    while ptr < end_pre_ptr {
        let byte = unsafe { *ptr };
        let a = (byte >> 7) & (!byte >> 6);
        inv_count += a as usize;
        ptr = unsafe { ptr.add(1) };
    }

    let mut ptr = ptr as *const usize;
    let end_mid_ptr = (end_ptr as usize - (end_ptr as usize & (tsize - 1))) as *const usize;
    while ptr < end_mid_ptr {
        let n = unsafe { *ptr };
        let masked = ((n & (ONEMASK.wrapping_mul(0x80))) >> 7) & (!n >> 6);
        inv_count += (masked.wrapping_mul(ONEMASK)) >> ((tsize - 1) * 8);
        ptr = unsafe { ptr.add(1) };
    }

    let mut ptr = ptr as *const u8;
    while ptr < end_ptr {
        let byte = unsafe { *ptr };
        let a = (byte >> 7) & (!byte >> 6);
        inv_count += a as usize;
        ptr = unsafe { ptr.add(1) };
    }

    len - inv_count
}

/// Counts the line breaks in `text`.
///
/// A line break is an LF, a CR, or a CRLF pair (counted once).
pub fn count_line_breaks(text: &str) -> usize {
    LineBreakIter::new(text).count()
}

/// True if `text` begins with an LF.
#[inline]
pub fn starts_with_lf(text: &str) -> bool {
    text.as_bytes().first() == Some(&0x0A)
}

/// True if `text` ends with a CR.
#[inline]
pub fn ends_with_cr(text: &str) -> bool {
    text.as_bytes().last() == Some(&0x0D)
}

/// Converts a char index into a byte index.
#[inline]
pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    chars::to_byte_idx(text, char_idx)
}

/// Converts a byte index into a char index.
#[inline]
pub fn byte_to_char_idx(text: &str, byte_idx: usize) -> usize {
    chars::from_byte_idx(text, byte_idx)
}

/// Converts a char index into a UTF-16 code unit index.
pub fn char_to_utf16_cu_idx(text: &str, char_idx: usize) -> usize {
    let byte_idx = char_to_byte_idx(text, char_idx);
    utf16::from_byte_idx(text, byte_idx)
}

/// Converts a UTF-16 code unit index into a char index.
///
/// # Panics
///
/// Panics if `utf16_idx` falls between the two halves of a surrogate
/// pair, since there is no char index that corresponds to it.
pub fn utf16_cu_to_char_idx(text: &str, utf16_idx: usize) -> usize {
    let byte_idx = utf16::to_byte_idx(text, utf16_idx);
    assert!(
        text.is_char_boundary(byte_idx),
        "utf16 index {} splits a surrogate pair",
        utf16_idx
    );
    byte_to_char_idx(text, byte_idx)
}

/// Converts a char index into a line index (0-based).
pub fn char_to_line_idx(text: &str, char_idx: usize) -> usize {
    let byte_idx = char_to_byte_idx(text, char_idx);
    byte_to_line_idx(text, byte_idx)
}

/// Converts a line index (0-based) into a char index.
pub fn line_to_char_idx(text: &str, line_idx: usize) -> usize {
    let byte_idx = line_to_byte_idx(text, line_idx);
    byte_to_char_idx(text, byte_idx)
}

pub(crate) fn byte_to_line_idx(text: &str, byte_idx: usize) -> usize {
    let mut line = 0;
    for offset in LineBreakIter::new(text) {
        if byte_idx < offset {
            break;
        }
        line += 1;
    }
    line
}

pub(crate) fn line_to_byte_idx(text: &str, line_idx: usize) -> usize {
    if line_idx == 0 {
        0
    } else {
        LineBreakIter::new(text)
            .nth(line_idx - 1)
            .unwrap_or_else(|| text.len())
    }
}

/// Iterates over the byte offsets immediately following each line break
/// in `text`.
///
/// Recognizes LF, CR, and CRLF (as a single break) only — this is the
/// conservative ASCII-oriented line-break set, not the full Unicode
/// line-break property.
pub(crate) struct LineBreakIter<'a> {
    byte_itr: std::str::Bytes<'a>,
    byte_idx: usize,
}

impl<'a> LineBreakIter<'a> {
    pub fn new(text: &'a str) -> LineBreakIter<'a> {
        LineBreakIter {
            byte_itr: text.bytes(),
            byte_idx: 0,
        }
    }
}

impl<'a> Iterator for LineBreakIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(byte) = self.byte_itr.next() {
            self.byte_idx += 1;
            if byte == 0x0A {
                return Some(self.byte_idx);
            }
            if byte == 0x0D {
                if let Some(0x0A) = self.byte_itr.clone().next() {
                    self.byte_itr.next();
                    self.byte_idx += 1;
                }
                return Some(self.byte_idx);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_chars_01() {
        let text = "Hello world!";
        assert_eq!(12, count_chars(text));
    }

    #[test]
    fn count_chars_02() {
        let text = "Hello 日本語 world!";
        assert_eq!(15, count_chars(text));
    }

    #[test]
    fn count_chars_empty() {
        assert_eq!(0, count_chars(""));
    }

    #[test]
    fn count_line_breaks_01() {
        let text = "Hello\nworld\r\n!\rfoo";
        assert_eq!(3, count_line_breaks(text));
    }

    #[test]
    fn count_line_breaks_no_double_count_crlf() {
        assert_eq!(1, count_line_breaks("\r\n"));
    }

    #[test]
    fn char_to_utf16_cu_idx_01() {
        // "a" + U+1F600 (grinning face, astral, 2 utf16 units) + "b"
        let text = "a\u{1F600}b";
        assert_eq!(0, char_to_utf16_cu_idx(text, 0));
        assert_eq!(1, char_to_utf16_cu_idx(text, 1));
        assert_eq!(3, char_to_utf16_cu_idx(text, 2));
    }

    #[test]
    fn utf16_cu_to_char_idx_01() {
        let text = "a\u{1F600}b";
        assert_eq!(0, utf16_cu_to_char_idx(text, 0));
        assert_eq!(1, utf16_cu_to_char_idx(text, 1));
        assert_eq!(2, utf16_cu_to_char_idx(text, 3));
    }

    #[test]
    #[should_panic]
    fn utf16_cu_to_char_idx_splits_surrogate() {
        let text = "a\u{1F600}b";
        utf16_cu_to_char_idx(text, 2);
    }

    #[test]
    fn char_to_line_idx_01() {
        let text = "one\ntwo\nthree";
        assert_eq!(0, char_to_line_idx(text, 0));
        assert_eq!(0, char_to_line_idx(text, 3));
        assert_eq!(1, char_to_line_idx(text, 4));
        assert_eq!(2, char_to_line_idx(text, 8));
    }

    #[test]
    fn line_to_char_idx_01() {
        let text = "one\ntwo\nthree";
        assert_eq!(0, line_to_char_idx(text, 0));
        assert_eq!(4, line_to_char_idx(text, 1));
        assert_eq!(8, line_to_char_idx(text, 2));
    }
}
