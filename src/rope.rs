use std::fmt;
use std::sync::Arc;

use crate::error::{check_bound, check_bound_exclusive, Error, IndexKind};
use crate::iter::{Chars, Chunks, Lines};
use crate::rope_builder::{build_balanced, RopeBuilder};
use crate::tree::{build_from_fragments, join, Node};

/// A persistent (immutable-facing) UTF-8 text rope.
///
/// Every mutating method returns a new `Rope`; the receiver is left
/// unchanged and any other `Rope` sharing its structure observes no
/// change either. Structural sharing between versions is automatic:
/// an edit only path-copies the nodes on the route from the root to
/// the edited span, and clones the `Arc` of everything else.
///
/// Three coordinate systems index into the same text: character index
/// (Unicode scalar values), UTF-16 code unit index, and line index.
/// All three stay mutually consistent under every operation.
#[derive(Clone)]
pub struct Rope {
    root: Arc<Node>,
}

impl Rope {
    //-----------------------------------------------------------------
    // Construction.

    /// Creates an empty `Rope`.
    pub fn new() -> Rope {
        Rope { root: Arc::new(Node::new()) }
    }

    pub(crate) fn from_root(root: Arc<Node>) -> Rope {
        Rope { root }
    }

    /// Builds a `Rope` from a `&str`, dividing it up front into
    /// evenly sized, CRLF-safe leaves rather than flushing fixed-size
    /// chunks as [`RopeBuilder`] does — since the whole input is known
    /// in advance, no leaf ends up undersized.
    pub fn from_str(text: &str) -> Rope {
        Rope::from_root(build_balanced(text))
    }

    //-----------------------------------------------------------------
    // Length/emptiness.

    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    pub fn len_chars(&self) -> usize {
        self.root.text_info().chars
    }

    pub fn len_utf16_cu(&self) -> usize {
        self.root.text_info().utf16_len()
    }

    pub fn len_lines(&self) -> usize {
        self.root.text_info().line_breaks + 1
    }

    //-----------------------------------------------------------------
    // Point reads.

    /// Returns the character at `char_idx`.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx >= len_chars()`.
    pub fn char_at(&self, char_idx: usize) -> char {
        self.try_char_at(char_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_char_at(&self, char_idx: usize) -> Result<char, Error> {
        check_bound_exclusive(char_idx, self.len_chars(), IndexKind::Char)?;
        Ok(self.root.char_at(char_idx))
    }

    /// Converts a character index into a UTF-16 code unit index.
    ///
    /// `char_idx == len_chars()` is permitted, and returns
    /// `len_utf16_cu()`.
    pub fn char_to_utf16_cu(&self, char_idx: usize) -> usize {
        self.try_char_to_utf16_cu(char_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_char_to_utf16_cu(&self, char_idx: usize) -> Result<usize, Error> {
        check_bound(char_idx, self.len_chars(), IndexKind::Char)?;
        Ok(self.root.char_to_utf16_cu(char_idx))
    }

    /// Converts a UTF-16 code unit index into a character index.
    ///
    /// # Panics
    ///
    /// Panics if `utf16_idx > len_utf16_cu()`, or if it falls between
    /// the two halves of a surrogate pair.
    pub fn utf16_cu_to_char(&self, utf16_idx: usize) -> usize {
        self.try_utf16_cu_to_char(utf16_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_utf16_cu_to_char(&self, utf16_idx: usize) -> Result<usize, Error> {
        check_bound(utf16_idx, self.len_utf16_cu(), IndexKind::Utf16)?;
        Ok(self.root.utf16_cu_to_char(utf16_idx))
    }

    /// The 0-based line containing character `char_idx`.
    ///
    /// `char_idx == len_chars()` is permitted, and returns the index
    /// of the last line.
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.try_char_to_line(char_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_char_to_line(&self, char_idx: usize) -> Result<usize, Error> {
        check_bound(char_idx, self.len_chars(), IndexKind::Char)?;
        Ok(self.root.char_to_line(char_idx))
    }

    /// The character index of the start of line `line_idx`.
    ///
    /// `line_idx == len_lines()` is permitted, and returns
    /// `len_chars()`.
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        self.try_line_to_char(line_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_line_to_char(&self, line_idx: usize) -> Result<usize, Error> {
        check_bound(line_idx, self.len_lines(), IndexKind::Line)?;
        Ok(self.root.line_to_char(line_idx))
    }

    //-----------------------------------------------------------------
    // Structural edits.

    /// Inserts `text` at character index `char_idx`, returning the
    /// resulting rope. An empty `text` is a no-op that simply clones
    /// the receiver.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    pub fn insert(&self, char_idx: usize, text: &str) -> Rope {
        self.try_insert(char_idx, text)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_insert(&self, char_idx: usize, text: &str) -> Result<Rope, Error> {
        check_bound(char_idx, self.len_chars(), IndexKind::Char)?;

        if text.is_empty() {
            return Ok(self.clone());
        }

        let mut new_root = Arc::clone(&self.root);
        let overflow = Arc::make_mut(&mut new_root).insert(char_idx, text);
        // A large `text` can overflow into more than one same-depth
        // sibling; `join` already knows how to graft one node of
        // unequal height onto another, so folding it over however many
        // overflow nodes came back absorbs all of them in order.
        let new_root = overflow
            .into_iter()
            .fold(new_root, |root, overflow_node| join(root, overflow_node));

        Ok(Rope::from_root(new_root))
    }

    /// Splits the rope at `char_idx`, returning two ropes whose
    /// concatenation equals the receiver.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    pub fn split_at(&self, char_idx: usize) -> (Rope, Rope) {
        self.try_split_at(char_idx)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_split_at(&self, char_idx: usize) -> Result<(Rope, Rope), Error> {
        check_bound(char_idx, self.len_chars(), IndexKind::Char)?;

        let mut left = Vec::new();
        let mut right = Vec::new();
        self.root.collect_split(char_idx, &mut left, &mut right);

        Ok((
            Rope::from_root(build_from_fragments(left)),
            Rope::from_root(build_from_fragments(right)),
        ))
    }

    /// Concatenates `self` followed by `other`, returning the result.
    /// Either side being empty returns a clone of the other.
    pub fn append(&self, other: &Rope) -> Rope {
        Rope::from_root(join(Arc::clone(&self.root), Arc::clone(&other.root)))
    }

    /// Removes the characters in `[start, end)`, returning the
    /// resulting rope.
    ///
    /// Implemented in terms of [`split_at`](Rope::split_at) and
    /// [`append`](Rope::append): split at each end of the range, then
    /// join the two surviving outer fragments. This keeps CRLF
    /// handling at the seam in one place, shared with `append`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len_chars()`.
    pub fn remove(&self, start: usize, end: usize) -> Rope {
        self.try_remove(start, end)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_remove(&self, start: usize, end: usize) -> Result<Rope, Error> {
        assert!(start <= end, "remove: start {} > end {}", start, end);
        check_bound(end, self.len_chars(), IndexKind::Char)?;

        let (left, rest) = self.split_at(start);
        let (_, right) = rest.split_at(end - start);
        Ok(left.append(&right))
    }

    /// Returns a new rope containing exactly the characters in
    /// `[start, end)`.
    ///
    /// Implemented via two `split_at` calls, sharing subtrees with
    /// the receiver rather than copying text.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len_chars()`.
    pub fn slice(&self, start: usize, end: usize) -> Rope {
        self.try_slice(start, end)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_slice(&self, start: usize, end: usize) -> Result<Rope, Error> {
        assert!(start <= end, "slice: start {} > end {}", start, end);
        check_bound(end, self.len_chars(), IndexKind::Char)?;

        let (_, rest) = self.split_at(start);
        let (middle, _) = rest.split_at(end - start);
        Ok(middle)
    }

    /// Returns the `line_idx`-th line as its own rope: the half-open
    /// character range `[line_to_char(line_idx), line_to_char(line_idx + 1))`.
    /// The final line naturally has no terminator, since there is no
    /// following line break.
    ///
    /// # Panics
    ///
    /// Panics if `line_idx >= len_lines()`.
    pub fn line(&self, line_idx: usize) -> Rope {
        self.try_line(line_idx).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_line(&self, line_idx: usize) -> Result<Rope, Error> {
        check_bound_exclusive(line_idx, self.len_lines(), IndexKind::Line)?;
        let start = self.root.line_to_char(line_idx);
        let end = self.root.line_to_char(line_idx + 1);
        self.try_slice(start, end)
    }

    //-----------------------------------------------------------------
    // Iteration.

    /// Iterates over the rope's text one contiguous leaf chunk at a
    /// time.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.root)
    }

    /// Iterates over the rope's characters.
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.root)
    }

    /// Iterates over the rope's lines, each as its own `Rope`.
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(self)
    }

    //-----------------------------------------------------------------
    // Debug/testing support.

    /// Panics if any of the structural invariants documented on the
    /// tree types are violated: leaf sizes, child counts, uniform leaf
    /// depth, and cached `TextInfo` consistency.
    ///
    /// Exposed as a regular (not `cfg(test)`) method because it's used
    /// from integration tests, which compile this crate as an ordinary
    /// dependency rather than with `cfg(test)`.
    pub fn assert_invariants(&self) {
        self.root.assert_invariants(true);
    }
}

impl Default for Rope {
    fn default() -> Self {
        Rope::new()
    }
}

impl<'a> From<&'a str> for Rope {
    fn from(text: &'a str) -> Rope {
        Rope::from_str(text)
    }
}

impl From<RopeBuilder> for Rope {
    fn from(builder: RopeBuilder) -> Rope {
        builder.finish()
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chunks()).finish()
    }
}

impl ToString for Rope {
    fn to_string(&self) -> String {
        let mut s = String::with_capacity(self.root.text_info().bytes);
        for chunk in self.chunks() {
            s.push_str(chunk);
        }
        s
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Rope) -> bool {
        let a = self.root.text_info();
        let b = other.root.text_info();
        if a.chars != b.chars || a.bytes != b.bytes {
            return false;
        }
        self.chars().eq(other.chars())
    }
}

impl Eq for Rope {}

impl PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<Rope> for str {
    fn eq(&self, other: &Rope) -> bool {
        other == self
    }
}

impl<'a> PartialEq<&'a str> for Rope {
    fn eq(&self, other: &&'a str) -> bool {
        self == *other
    }
}

impl<'a> PartialEq<Rope> for &'a str {
    fn eq(&self, other: &Rope) -> bool {
        other == self
    }
}

impl PartialEq<String> for Rope {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<Rope> for String {
    fn eq(&self, other: &Rope) -> bool {
        other == self.as_str()
    }
}

//-------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let rope = Rope::new();
        assert!(rope.is_empty());
        assert_eq!(0, rope.len_chars());
        assert_eq!(1, rope.len_lines());
    }

    #[test]
    fn from_str_round_trips() {
        let text = "Hello world!\nHow's it going?\n".repeat(50);
        let rope = Rope::from_str(&text);
        assert_eq!(text, rope.to_string());
        rope.assert_invariants();
    }

    #[test]
    fn insert_mid_string() {
        let rope = Rope::from_str("Hello !");
        let rope = rope.insert(6, "world");
        assert_eq!("Hello world!", rope.to_string());
        rope.assert_invariants();
    }

    #[test]
    fn insert_is_persistent() {
        let base = Rope::from_str("Hello world!");
        let edited = base.insert(5, ",");
        assert_eq!("Hello world!", base.to_string());
        assert_eq!("Hello, world!", edited.to_string());
    }

    #[test]
    fn insert_grows_many_leaves() {
        let mut rope = Rope::new();
        for i in 0..500 {
            let text = format!("{} ", i);
            let idx = rope.len_chars();
            rope = rope.insert(idx, &text);
        }
        rope.assert_invariants();
        let expected: String = (0..500).map(|i| format!("{} ", i)).collect();
        assert_eq!(expected, rope.to_string());
    }

    #[test]
    fn remove_middle() {
        let rope = Rope::from_str("Hello world!");
        let rope = rope.remove(5, 11);
        assert_eq!("Hello!", rope.to_string());
        rope.assert_invariants();
    }

    #[test]
    fn slice_returns_subrange() {
        let rope = Rope::from_str("Hello world!");
        let slice = rope.slice(6, 11);
        assert_eq!("world", slice.to_string());
    }

    #[test]
    fn split_at_and_rejoin_round_trips() {
        let text = "abcdefgh ".repeat(200);
        let rope = Rope::from_str(&text);
        let (left, right) = rope.split_at(400);
        assert_eq!(400, left.len_chars());
        let rejoined = left.append(&right);
        assert_eq!(text, rejoined.to_string());
        rejoined.assert_invariants();
    }

    #[test]
    fn append_empty_is_identity() {
        let rope = Rope::from_str("Hello world!");
        let empty = Rope::new();
        assert_eq!(rope.to_string(), rope.append(&empty).to_string());
        assert_eq!(rope.to_string(), empty.append(&rope).to_string());
    }

    #[test]
    fn char_to_line_and_back() {
        let rope = Rope::from_str("one\ntwo\nthree");
        assert_eq!(0, rope.char_to_line(0));
        assert_eq!(1, rope.char_to_line(4));
        assert_eq!(2, rope.char_to_line(8));
        assert_eq!(0, rope.line_to_char(0));
        assert_eq!(4, rope.line_to_char(1));
        assert_eq!(8, rope.line_to_char(2));
    }

    #[test]
    fn line_iteration() {
        let rope = Rope::from_str("one\ntwo\nthree");
        let lines: Vec<String> = rope.lines().map(|l| l.to_string()).collect();
        assert_eq!(vec!["one\n", "two\n", "three"], lines);
    }

    #[test]
    fn crlf_stays_one_line_break_across_edits() {
        let rope = Rope::from_str("foo\r");
        let rope = rope.insert(4, "\nbar");
        assert_eq!(2, rope.len_lines());
        rope.assert_invariants();
    }

    #[test]
    fn utf16_round_trip_with_astral_chars() {
        let rope = Rope::from_str("a\u{1F600}b");
        assert_eq!(4, rope.len_utf16_cu());
        assert_eq!(1, rope.char_to_utf16_cu(1));
        assert_eq!(3, rope.char_to_utf16_cu(2));
        assert_eq!(1, rope.utf16_cu_to_char(1));
        assert_eq!(2, rope.utf16_cu_to_char(3));
    }

    #[test]
    fn utf16_cu_to_char_rejects_surrogate_split() {
        let rope = Rope::from_str("a\u{1F600}b");
        assert!(rope.try_utf16_cu_to_char(2).is_err());
    }

    #[test]
    fn try_char_at_out_of_bounds() {
        let rope = Rope::from_str("abc");
        assert!(rope.try_char_at(3).is_err());
        assert!(rope.try_char_at(2).is_ok());
    }

    #[test]
    fn equality_ignores_leaf_chunking() {
        let mut builder = RopeBuilder::new();
        builder.append("Hel");
        builder.append("lo");
        let a: Rope = builder.into();
        let b = Rope::from_str("Hello");
        assert_eq!(a, b);
        assert_eq!(a, "Hello");
        assert_eq!("Hello", b);
    }
}
