#![doc(hidden)]

use std::sync::Arc;

use crate::crlf;
use crate::text_info::TextInfo;
use crate::tree::{build_from_fragments, Children, Leaf, Node, MAX_CHILDREN, MAX_LEAF, MIN_CHILDREN};

/// Incrementally builds a [`Rope`](crate::Rope) from a sequence of
/// `&str` chunks of arbitrary size.
///
/// This amortizes leaf/node construction in time linear in the total
/// input, unlike repeatedly calling [`Rope::insert`](crate::Rope::insert)
/// at the end of a growing rope, which pays an O(log N) descent per
/// call. Useful for building a rope from a stream of chunks whose
/// total length isn't known up front — e.g. chunks read incrementally
/// from some external source.
///
/// Because the total length isn't known in advance, the very last
/// chunk flushed by [`finish`](RopeBuilder::finish) may end up shorter
/// than `MIN_LEAF` — unavoidable without buffering the entire input.
/// [`Rope::from_str`](crate::Rope::from_str), which does see the whole
/// input up front, divides it evenly instead and doesn't have this
/// limitation.
#[derive(Debug, Clone)]
pub struct RopeBuilder {
    leaves: Vec<(Arc<Node>, TextInfo)>,
    buffer: String,
}

impl RopeBuilder {
    pub fn new() -> Self {
        RopeBuilder {
            leaves: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Appends a chunk of text to the end of the rope under construction.
    pub fn append(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
        while self.buffer.len() > MAX_LEAF {
            let target = MAX_LEAF / 2;
            let split = crlf::nearest_internal_break(target, &self.buffer).clamp(1, self.buffer.len());
            let rest = self.buffer.split_off(split);
            let flushed = std::mem::replace(&mut self.buffer, rest);
            self.push_leaf(&flushed);
        }
    }

    fn push_leaf(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.leaves.push(leaf_pair(text));
    }

    /// Finishes construction, consuming the builder and returning the
    /// rope built up so far.
    pub fn finish(mut self) -> crate::Rope {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.push_leaf(&text);
        }
        crate::Rope::from_root(build_balanced_from_leaves(self.leaves))
    }
}

impl Default for RopeBuilder {
    fn default() -> Self {
        RopeBuilder::new()
    }
}

fn leaf_pair(s: &str) -> (Arc<Node>, TextInfo) {
    let leaf = Leaf::from_str(s);
    let info = leaf.text_info();
    (Arc::new(Node::Leaf(leaf)), info)
}

/// Builds a tree bottom-up from a flat list of leaf-level
/// `(node, info)` pairs by repeatedly grouping into internal nodes
/// until a single root remains.
pub(crate) fn build_balanced_from_leaves(leaves: Vec<(Arc<Node>, TextInfo)>) -> Arc<Node> {
    if leaves.is_empty() {
        return Arc::new(Node::new());
    }
    let mut level = leaves;
    while level.len() > 1 {
        level = group_level(level);
    }
    level.pop().unwrap().0
}

fn group_level(level: Vec<(Arc<Node>, TextInfo)>) -> Vec<(Arc<Node>, TextInfo)> {
    let mut groups: Vec<Vec<(Arc<Node>, TextInfo)>> = Vec::new();
    let mut iter = level.into_iter().peekable();
    while iter.peek().is_some() {
        let mut group = Vec::with_capacity(MAX_CHILDREN);
        for _ in 0..MAX_CHILDREN {
            match iter.next() {
                Some(item) => group.push(item),
                None => break,
            }
        }
        groups.push(group);
    }

    // A trailing undersized group gets folded into its predecessor
    // (re-splitting if that overflows) rather than left standing as
    // an internal node with fewer than MIN_CHILDREN children.
    if groups.len() > 1 && groups.last().unwrap().len() < MIN_CHILDREN {
        let last = groups.pop().unwrap();
        groups.last_mut().unwrap().extend(last);
        if groups.last().unwrap().len() > MAX_CHILDREN {
            let split_at = groups.last().unwrap().len() / 2;
            let overflow = groups.last_mut().unwrap().split_off(split_at);
            groups.push(overflow);
        }
    }

    groups
        .into_iter()
        .map(|group| {
            let mut children = Children::new();
            for item in group {
                children.push(item);
            }
            let info = children.combined_info();
            (Arc::new(Node::Internal(children)), info)
        })
        .collect()
}

/// Builds a balanced tree from a single `&str` in one shot, dividing
/// it evenly into leaf-sized chunks rather than flushing fixed-size
/// chunks as `RopeBuilder::append` does — since the whole input is
/// known up front, every leaf (not just the interior ones) can be
/// kept within `[MIN_LEAF, MAX_LEAF]`.
pub(crate) fn build_balanced(text: &str) -> Arc<Node> {
    if text.is_empty() {
        return Arc::new(Node::new());
    }

    let target = MAX_LEAF / 2;
    let mut remaining_n = ((text.len() + target - 1) / target).max(1);
    let mut leaves = Vec::with_capacity(remaining_n);
    let mut rest = text;

    while !rest.is_empty() {
        if remaining_n <= 1 {
            leaves.push(leaf_pair(rest));
            break;
        }
        let target_len = (rest.len() / remaining_n).max(1);
        let split = crlf::nearest_internal_break(target_len, rest).clamp(1, rest.len());
        let (chunk, remainder) = rest.split_at(split);
        leaves.push(leaf_pair(chunk));
        rest = remainder;
        remaining_n -= 1;
    }

    build_balanced_from_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_append_and_finish() {
        let mut builder = RopeBuilder::new();
        builder.append("Hello ");
        builder.append("world!");
        let rope = builder.finish();
        assert_eq!("Hello world!", rope.to_string());
    }

    #[test]
    fn build_balanced_matches_input() {
        let text = "abcdefgh ".repeat(500);
        let root = build_balanced(&text);
        assert_eq!(text.chars().count(), root.text_info().chars);
    }

    #[test]
    fn build_balanced_empty() {
        let root = build_balanced("");
        assert_eq!(0, root.text_info().chars);
    }
}
