//! Utilities for avoiding splits that separate a CR from its following LF.
//!
//! A leaf boundary, or a split point chosen during rebalancing, must never
//! land between the two bytes of a CRLF pair — doing so would make the CR
//! and LF look like two separate line breaks instead of one once the text
//! is read back out of two different leaves.

#[inline]
pub fn is_break(byte_idx: usize, text: &str) -> bool {
    debug_assert!(byte_idx <= text.len());

    let bytes = text.as_bytes();
    (bytes[byte_idx - 1] != 0x0D) | (bytes[byte_idx] != 0x0A)
}

#[inline]
pub fn seam_is_break(left: &str, right: &str) -> bool {
    (left.as_bytes()[left.len() - 1] != 0x0D) | (right.as_bytes()[0] != 0x0A)
}

/// Makes sure that special cases are handled correctly.
#[inline]
pub fn is_break_checked(byte_idx: usize, text: &str) -> bool {
    if !text.is_char_boundary(byte_idx) {
        false
    } else if byte_idx == 0 || byte_idx == text.len() {
        true
    } else {
        is_break(byte_idx, text)
    }
}

/// Makes sure that special cases are handled correctly.
#[inline]
pub fn seam_is_break_checked(left: &str, right: &str) -> bool {
    debug_assert!(!left.is_empty() && !right.is_empty());
    seam_is_break(left, right)
}

/// Returns the nearest byte boundary to `byte_idx` that does not split a
/// CRLF pair, preferring whichever of the two nearest valid boundaries is
/// closer, with a tie going to the right.
///
/// There is only one circumstance where the left or right edge of the
/// text will be returned: if the entire text is a single CRLF pair, in
/// which case the right edge is returned.
#[inline]
pub fn nearest_internal_break(byte_idx: usize, text: &str) -> usize {
    debug_assert!(byte_idx <= text.len());

    let mut boundary_idx = byte_idx;
    while !text.is_char_boundary(boundary_idx) {
        boundary_idx -= 1;
    }

    let left = if is_break_checked(boundary_idx, text) && boundary_idx != text.len() {
        boundary_idx
    } else {
        prev_break(boundary_idx, text)
    };
    let right = next_break(boundary_idx, text);

    if left == 0 || (right != text.len() && (byte_idx - left) >= (right - byte_idx)) {
        right
    } else {
        left
    }
}

/// Returns the nearest valid break at or before `byte_idx`.
///
/// Returns `byte_idx` itself if the string starts there.
#[inline]
pub fn prev_break(byte_idx: usize, text: &str) -> usize {
    debug_assert!(byte_idx <= text.len());

    let mut boundary_idx = byte_idx;
    while boundary_idx > 0 {
        boundary_idx -= 1;
        while !text.is_char_boundary(boundary_idx) {
            boundary_idx -= 1;
        }
        if is_break_checked(boundary_idx, text) {
            break;
        }
    }

    boundary_idx
}

/// Returns the nearest valid break at or after `byte_idx`.
///
/// Returns `byte_idx` itself if it's at the end of the string.
#[inline]
pub fn next_break(byte_idx: usize, text: &str) -> usize {
    debug_assert!(byte_idx <= text.len());

    let mut boundary_idx = byte_idx;
    while boundary_idx < text.len() {
        boundary_idx += 1;
        while !text.is_char_boundary(boundary_idx) {
            boundary_idx += 1;
        }
        if is_break_checked(boundary_idx, text) {
            break;
        }
    }

    boundary_idx
}

//===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_segmenter_01() {
        let text = "Hello world!\r\nHow's it going?";

        assert!(is_break_checked(0, ""));
        assert!(is_break_checked(0, text));
        assert!(is_break_checked(12, text));
        assert!(!is_break_checked(13, text));
        assert!(is_break_checked(14, text));
        assert!(is_break_checked(19, text));
    }

    #[test]
    fn crlf_segmenter_02() {
        let l = "Hello world!\r";
        let r = "\nHow's it going?";

        assert!(!seam_is_break_checked(l, r));
        assert!(!seam_is_break_checked(l, "\n"));
        assert!(!seam_is_break_checked("\r", r));
        assert!(!seam_is_break_checked("\r", "\n"));
        assert!(seam_is_break_checked(r, l));
        assert!(seam_is_break_checked("\n", "\r"));
    }

    #[test]
    fn nearest_internal_break_01() {
        let text = "Hello world!";
        assert_eq!(1, nearest_internal_break(0, text));
        assert_eq!(6, nearest_internal_break(6, text));
        assert_eq!(11, nearest_internal_break(12, text));
    }

    #[test]
    fn nearest_internal_break_02() {
        let text = "Hello\r\n world!";
        assert_eq!(5, nearest_internal_break(5, text));
        assert_eq!(7, nearest_internal_break(6, text));
        assert_eq!(7, nearest_internal_break(7, text));
    }

    #[test]
    fn nearest_internal_break_03() {
        let text = "\r\nHello world!\r\n";
        assert_eq!(2, nearest_internal_break(0, text));
        assert_eq!(2, nearest_internal_break(1, text));
        assert_eq!(2, nearest_internal_break(2, text));
        assert_eq!(14, nearest_internal_break(14, text));
        assert_eq!(14, nearest_internal_break(15, text));
        assert_eq!(14, nearest_internal_break(16, text));
    }

    #[test]
    fn nearest_internal_break_04() {
        let text = "\r\n";
        assert_eq!(2, nearest_internal_break(0, text));
        assert_eq!(2, nearest_internal_break(1, text));
        assert_eq!(2, nearest_internal_break(2, text));
    }

    #[test]
    fn is_break_01() {
        let text = "\r\n\r\n\r\n\r\n\r\n\r\n\r";

        assert!(is_break_checked(0, text));
        assert!(is_break_checked(12, text));
        assert!(is_break_checked(3, text));
        assert!(!is_break_checked(6, text));
    }

    #[test]
    fn seam_is_break_01() {
        let text1 = "\r\n\r\n\r\n";
        let text2 = "\r\n\r\n";

        assert!(seam_is_break(text1, text2));
    }

    #[test]
    fn seam_is_break_02() {
        let text1 = "\r\n\r\n\r";
        let text2 = "\n\r\n\r\n";

        assert!(!seam_is_break(text1, text2));
    }
}
