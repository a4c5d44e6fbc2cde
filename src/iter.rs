//! Iterators over a [`Rope`](crate::Rope)'s contents.

use crate::tree::Node;
use crate::Rope;

/// Iterates over a rope's text one contiguous leaf chunk at a time.
pub struct Chunks<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Node) -> Chunks<'a> {
        Chunks { stack: vec![root] }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let node = self.stack.pop()?;
            match node {
                Node::Leaf(leaf) => return Some(leaf.as_str()),
                Node::Internal(children) => {
                    for child in children.nodes().iter().rev() {
                        self.stack.push(child.as_ref());
                    }
                }
            }
        }
    }
}

/// Iterates over a rope's characters.
pub struct Chars<'a> {
    chunks: Chunks<'a>,
    current: std::str::Chars<'a>,
}

impl<'a> Chars<'a> {
    pub(crate) fn new(root: &'a Node) -> Chars<'a> {
        Chars {
            chunks: Chunks::new(root),
            current: "".chars(),
        }
    }
}

impl<'a> Iterator for Chars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.current.next() {
                return Some(c);
            }
            self.current = self.chunks.next()?.chars();
        }
    }
}

/// Iterates over a rope's lines, each yielded as its own `Rope`.
///
/// Built directly on [`Rope::line`](crate::Rope::line) rather than
/// walking the tree itself, since lines are already cheap (structural
/// sharing, no copying) to carve out on demand.
pub struct Lines<'a> {
    rope: &'a Rope,
    line_idx: usize,
    len_lines: usize,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(rope: &'a Rope) -> Lines<'a> {
        Lines {
            rope,
            line_idx: 0,
            len_lines: rope.len_lines(),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Rope;

    fn next(&mut self) -> Option<Rope> {
        if self.line_idx >= self.len_lines {
            return None;
        }
        let line = self.rope.line(self.line_idx);
        self.line_idx += 1;
        Some(line)
    }
}

//-------------------------------------------------------------
