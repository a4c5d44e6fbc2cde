use crate::crlf;
use crate::str_utils;
use crate::text_info::TextInfo;
use crate::tree::MAX_LEAF;

/// A leaf node of the rope, holding a contiguous run of UTF-8 text.
///
/// Leaves stay within `[MIN_LEAF, MAX_LEAF]` bytes, except when the leaf
/// is itself the whole rope.
#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Leaf {
    text: String,
}

impl Leaf {
    pub fn new() -> Self {
        Leaf { text: String::new() }
    }

    /// Creates a new `Leaf` with the same contents as the given `&str`.
    pub fn from_str(string: &str) -> Self {
        Leaf {
            text: string.to_string(),
        }
    }

    /// Returns the total length of the contained text in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn text_info(&self) -> TextInfo {
        TextInfo::from_str(&self.text)
    }

    /// Inserts the given text at the given byte index.
    ///
    /// Panics if the byte index isn't on a char boundary.
    pub fn insert(&mut self, byte_idx: usize, text: &str) {
        assert!(self.text.is_char_boundary(byte_idx));
        self.text.insert_str(byte_idx, text);
    }

    /// Inserts `text` at char index `char_idx`, splitting off and
    /// returning as many residual leaves as needed to bring `self` and
    /// every returned leaf back within `MAX_LEAF` bytes — `text` itself
    /// may be many leaves' worth, so a single halving split isn't
    /// enough. Mirrors the flush loop in `RopeBuilder::append`. Each
    /// split point is chosen to avoid separating a CR from its
    /// following LF.
    pub fn insert_and_split(&mut self, char_idx: usize, text: &str) -> Vec<Leaf> {
        let byte_idx = str_utils::char_to_byte_idx(&self.text, char_idx);
        self.insert(byte_idx, text);

        if self.text.len() <= MAX_LEAF {
            return Vec::new();
        }

        // `self` keeps the first chunk; everything after it is returned
        // in order for the caller to splice in as new right siblings.
        let mut remaining = std::mem::take(&mut self.text);
        let target = MAX_LEAF / 2;

        let split_byte = crlf::nearest_internal_break(target, &remaining).clamp(1, remaining.len() - 1);
        let mut rest = remaining.split_off(split_byte);
        self.text = remaining;

        let mut overflow = Vec::new();
        while rest.len() > MAX_LEAF {
            let split_byte = crlf::nearest_internal_break(target, &rest).clamp(1, rest.len() - 1);
            let tail = rest.split_off(split_byte);
            overflow.push(Leaf { text: rest });
            rest = tail;
        }
        overflow.push(Leaf { text: rest });

        overflow
    }

    /// Removes the text in the given right-exclusive byte range.
    pub fn remove(&mut self, byte_idx_range: [usize; 2]) {
        assert!(byte_idx_range[0] <= byte_idx_range[1]);
        assert!(byte_idx_range[1] <= self.len());
        self.text.replace_range(byte_idx_range[0]..byte_idx_range[1], "");
    }

    /// Splits the leaf at the given byte index, leaving the left part
    /// in `self` and returning the right part as a new leaf.
    ///
    /// Panics if the byte index isn't on a char boundary.
    pub fn split(&mut self, byte_idx: usize) -> Self {
        assert!(self.text.is_char_boundary(byte_idx));
        Leaf {
            text: self.text.split_off(byte_idx),
        }
    }

    /// Like [`split`](Leaf::split), but takes `&self` and clones
    /// instead of mutating in place — used when splitting a leaf that
    /// may still be shared via an `Arc` (e.g. during `split_at`, which
    /// only reads the tree).
    pub fn split_at_byte(&self, byte_idx: usize) -> (Self, Self) {
        assert!(self.text.is_char_boundary(byte_idx));
        let (l, r) = self.text.split_at(byte_idx);
        (Leaf::from_str(l), Leaf::from_str(r))
    }

    /// Splits the leaf into two leaves, with roughly half the text in
    /// each, choosing a split point that doesn't separate a CR from
    /// its following LF.
    pub fn split_balanced(&mut self) -> Self {
        let split_idx = crlf::nearest_internal_break(self.text.len() / 2, &self.text);
        self.split(split_idx)
    }

    /// Appends the contents of another leaf to the end of this one.
    pub fn append(&mut self, other: &Self) {
        self.text.push_str(&other.text);
    }
}

impl Default for Leaf {
    fn default() -> Self {
        Leaf::new()
    }
}

impl std::cmp::PartialEq<str> for Leaf {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl std::cmp::PartialEq<&str> for Leaf {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl std::cmp::PartialEq<Leaf> for str {
    #[inline]
    fn eq(&self, other: &Leaf) -> bool {
        other == self
    }
}

impl std::cmp::PartialEq<Leaf> for &str {
    #[inline]
    fn eq(&self, other: &Leaf) -> bool {
        other == self
    }
}

impl std::fmt::Debug for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Leaf").field(&self.text).finish()
    }
}

//-------------------------------------------------------------
