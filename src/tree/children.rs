use std::sync::Arc;

use crate::text_info::TextInfo;
use crate::tree::Node;

/// The child list of an internal node: an ordered array of child links,
/// each paired with the child's own `TextInfo`.
///
/// Kept as two parallel `Vec`s rather than a `Vec` of pairs so that
/// [`combined_info`](Children::combined_info) and the metric searches
/// can walk the info array without touching the (much larger) node
/// pointers.
#[derive(Debug, Clone)]
pub(crate) struct Children {
    nodes: Vec<Arc<Node>>,
    info: Vec<TextInfo>,
}

impl Children {
    pub fn new() -> Self {
        Children {
            nodes: Vec::new(),
            info: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    #[inline(always)]
    pub fn nodes_mut(&mut self) -> &mut [Arc<Node>] {
        &mut self.nodes
    }

    #[inline(always)]
    pub fn info(&self) -> &[TextInfo] {
        &self.info
    }

    #[inline(always)]
    pub fn info_mut(&mut self) -> &mut [TextInfo] {
        &mut self.info
    }

    /// The `TextInfo` of this node's whole subtree: the CRLF-corrected
    /// fold of all children's info, in order.
    pub fn combined_info(&self) -> TextInfo {
        self.info
            .iter()
            .fold(TextInfo::new(), |acc, info| acc.concat(info))
    }

    pub fn push(&mut self, child: (Arc<Node>, TextInfo)) {
        self.nodes.push(child.0);
        self.info.push(child.1);
    }

    pub fn insert(&mut self, idx: usize, child: (Arc<Node>, TextInfo)) {
        self.nodes.insert(idx, child.0);
        self.info.insert(idx, child.1);
    }

    pub fn remove(&mut self, idx: usize) -> (Arc<Node>, TextInfo) {
        (self.nodes.remove(idx), self.info.remove(idx))
    }

    /// Moves all of `other`'s children onto the end of `self`, in order.
    pub fn extend(&mut self, other: Children) {
        self.nodes.extend(other.nodes);
        self.info.extend(other.info);
    }

    /// Splits off everything from `idx` onward into a new `Children`,
    /// analogous to `Vec::split_off`.
    pub fn split_off(&mut self, idx: usize) -> Children {
        Children {
            nodes: self.nodes.split_off(idx),
            info: self.info.split_off(idx),
        }
    }

    /// Finds the child that contains `target` under the given metric
    /// (chars / utf16 code units / line breaks), returning its index
    /// and the combined `TextInfo` of every child strictly before it.
    ///
    /// Folding the running sum through [`TextInfo::concat`] (rather
    /// than plain addition) means the CRLF correction at each child
    /// boundary is applied automatically while searching — see
    /// `TextInfo::concat`'s doc comment.
    pub fn locate<F>(&self, target: usize, metric: F) -> (usize, TextInfo)
    where
        F: Fn(&TextInfo) -> usize,
    {
        debug_assert!(!self.is_empty());

        let mut acc = TextInfo::new();
        let last = self.len() - 1;
        for i in 0..self.len() {
            let next = acc.concat(&self.info[i]);
            if i == last || target < metric(&next) {
                return (i, acc);
            }
            acc = next;
        }
        unreachable!()
    }

    pub fn locate_char(&self, char_idx: usize) -> (usize, TextInfo) {
        self.locate(char_idx, |info| info.chars)
    }

    pub fn locate_utf16(&self, utf16_idx: usize) -> (usize, TextInfo) {
        self.locate(utf16_idx, |info| info.utf16_len())
    }

    pub fn locate_line(&self, line_idx: usize) -> (usize, TextInfo) {
        self.locate(line_idx, |info| info.line_breaks)
    }
}

impl Default for Children {
    fn default() -> Self {
        Children::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Leaf;

    fn leaf_child(s: &str) -> (Arc<Node>, TextInfo) {
        let leaf = Leaf::from_str(s);
        let info = leaf.text_info();
        (Arc::new(Node::Leaf(leaf)), info)
    }

    #[test]
    fn combined_info_sums_children() {
        let mut children = Children::new();
        children.push(leaf_child("Hello "));
        children.push(leaf_child("world!"));
        let info = children.combined_info();
        assert_eq!(12, info.chars);
    }

    #[test]
    fn combined_info_applies_crlf_correction() {
        let mut children = Children::new();
        children.push(leaf_child("foo\r"));
        children.push(leaf_child("\nbar"));
        let info = children.combined_info();
        assert_eq!(1, info.line_breaks);
    }

    #[test]
    fn locate_char_finds_right_child() {
        let mut children = Children::new();
        children.push(leaf_child("Hello "));
        children.push(leaf_child("world!"));
        let (idx, acc) = children.locate_char(8);
        assert_eq!(1, idx);
        assert_eq!(6, acc.chars);
    }

    #[test]
    fn locate_char_last_child_catches_overflow() {
        let mut children = Children::new();
        children.push(leaf_child("Hello "));
        children.push(leaf_child("world!"));
        let (idx, acc) = children.locate_char(12);
        assert_eq!(1, idx);
        assert_eq!(6, acc.chars);
    }
}
