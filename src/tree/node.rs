use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::str_utils;
use crate::text_info::TextInfo;
use crate::tree::{Children, Leaf, MAX_CHILDREN, MAX_LEAF, MIN_CHILDREN, MIN_LEAF};

/// A node of the rope tree: either a leaf holding text, or an internal
/// node holding children.
///
/// `Node` is never mutated in a way that's visible to an existing
/// `Arc<Node>` holder: every structural change goes through
/// `Arc::make_mut`, which clones the node first if it's shared (i.e.
/// if some other `Rope` still points at it) and mutates in place
/// otherwise. Either way, old `Rope` values observe no change — this
/// is what makes path-copying cheap without sacrificing persistence.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Leaf(Leaf),
    Internal(Children),
}

/// Up to two same-depth nodes, each paired with its own `TextInfo`.
///
/// This is the return type threaded through the join/graft machinery
/// below: a structural change to one node either leaves it as a single
/// node, or — on overflow — splits it into two siblings that the
/// caller must splice into its own parent.
pub(crate) type NodeResult = SmallVec<[(Arc<Node>, TextInfo); 2]>;

/// Zero or more same-depth sibling nodes produced by `Node::insert`
/// overflowing a leaf or a child list. The caller splices each into its
/// own parent immediately after the node that produced it; if that
/// parent overflows in turn the cascade continues one level up,
/// terminating at `Rope::try_insert` by folding `join` over whatever's
/// left once it reaches the root.
pub(crate) type InsertOverflow = SmallVec<[Arc<Node>; 2]>;

fn pair(node: Node) -> (Arc<Node>, TextInfo) {
    let info = node.text_info();
    (Arc::new(node), info)
}

impl Node {
    pub fn new() -> Node {
        Node::Leaf(Leaf::new())
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    pub fn is_empty_leaf(&self) -> bool {
        matches!(self, Node::Leaf(leaf) if leaf.is_empty())
    }

    /// This node's `TextInfo`. For a leaf this is computed directly
    /// from its text; for an internal node it's the CRLF-corrected
    /// fold of its children's (already-cached) info, which is O(number
    /// of children) rather than a full subtree walk.
    pub fn text_info(&self) -> TextInfo {
        match self {
            Node::Leaf(leaf) => leaf.text_info(),
            Node::Internal(children) => children.combined_info(),
        }
    }

    /// Height of this node's subtree: 0 for a leaf, 1 + a child's
    /// depth for an internal node (all children share a depth, so any
    /// child will do).
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(children) => 1 + children.nodes()[0].depth(),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(children) => children.len(),
        }
    }

    // -----------------------------------------------------------------
    // Point reads.

    pub fn char_at(&self, char_idx: usize) -> char {
        match self {
            Node::Leaf(leaf) => {
                let byte_idx = str_utils::char_to_byte_idx(leaf.as_str(), char_idx);
                leaf.as_str()[byte_idx..]
                    .chars()
                    .next()
                    .expect("char index out of bounds")
            }
            Node::Internal(children) => {
                let (idx, acc) = children.locate_char(char_idx);
                children.nodes()[idx].char_at(char_idx - acc.chars)
            }
        }
    }

    /// The `TextInfo` of this node's content in `[0, char_idx)`.
    ///
    /// Threading coordinate conversions through this rather than
    /// bespoke per-metric descents means the CRLF correction (and any
    /// other cross-metric bookkeeping `TextInfo::concat` does) is
    /// applied uniformly: `prefix_info(i).utf16_len()` is
    /// `char_to_utf16_cu(i)`, and `prefix_info(i).line_breaks` is
    /// `char_to_line(i)`.
    pub fn prefix_info(&self, char_idx: usize) -> TextInfo {
        match self {
            Node::Leaf(leaf) => {
                let byte_idx = str_utils::char_to_byte_idx(leaf.as_str(), char_idx);
                TextInfo::from_str(&leaf.as_str()[..byte_idx])
            }
            Node::Internal(children) => {
                let (idx, acc) = children.locate_char(char_idx);
                let local = char_idx - acc.chars;
                acc.concat(&children.nodes()[idx].prefix_info(local))
            }
        }
    }

    pub fn char_to_utf16_cu(&self, char_idx: usize) -> usize {
        self.prefix_info(char_idx).utf16_len()
    }

    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.prefix_info(char_idx).line_breaks
    }

    pub fn utf16_cu_to_char(&self, utf16_idx: usize) -> usize {
        match self {
            Node::Leaf(leaf) => str_utils::utf16_cu_to_char_idx(leaf.as_str(), utf16_idx),
            Node::Internal(children) => {
                let (idx, acc) = children.locate_utf16(utf16_idx);
                acc.chars + children.nodes()[idx].utf16_cu_to_char(utf16_idx - acc.utf16_len())
            }
        }
    }

    pub fn line_to_char(&self, line_idx: usize) -> usize {
        match self {
            Node::Leaf(leaf) => str_utils::line_to_char_idx(leaf.as_str(), line_idx),
            Node::Internal(children) => {
                let (idx, acc) = children.locate_line(line_idx);
                acc.chars + children.nodes()[idx].line_to_char(line_idx - acc.line_breaks)
            }
        }
    }

    // -----------------------------------------------------------------
    // Insertion.

    /// Inserts `text` at `char_idx` within this node's subtree.
    ///
    /// On overflow, returns the right-hand residual node(s) that the
    /// caller must splice in as this node's new right siblings (at the
    /// same depth), propagating further if that overflows the parent
    /// in turn. A single call can overflow into more than one sibling
    /// when `text` is large enough to span several leaves' worth of
    /// content. Assumes `text` is non-empty.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> InsertOverflow {
        match self {
            Node::Leaf(leaf) => leaf
                .insert_and_split(char_idx, text)
                .into_iter()
                .map(|overflow| Arc::new(Node::Leaf(overflow)))
                .collect(),
            Node::Internal(children) => {
                let (child_i, start) = children.locate_char(char_idx);
                let local_idx = char_idx - start.chars;

                let overflow_children = Arc::make_mut(&mut children.nodes_mut()[child_i])
                    .insert(local_idx, text);
                children.info_mut()[child_i] = children.nodes()[child_i].text_info();

                let mut insert_at = child_i + 1;
                for node in overflow_children {
                    let info = node.text_info();
                    children.insert(insert_at, (node, info));
                    insert_at += 1;
                }

                if children.len() <= MAX_CHILDREN {
                    InsertOverflow::new()
                } else {
                    let mut groups = split_overflowing(std::mem::take(children));
                    *children = groups.remove(0);
                    groups.into_iter().map(|g| Arc::new(Node::Internal(g))).collect()
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Split.

    /// Splits this node's subtree at `char_idx`, appending whole
    /// untouched subtrees (cheap `Arc` clones) to `left`/`right` in
    /// order, and recursing only along the single boundary-crossing
    /// path. The caller rebuilds each side into a tree by folding
    /// [`join`] over the collected fragments.
    pub fn collect_split(&self, char_idx: usize, left: &mut Vec<Arc<Node>>, right: &mut Vec<Arc<Node>>) {
        match self {
            Node::Leaf(leaf) => {
                let byte_idx = str_utils::char_to_byte_idx(leaf.as_str(), char_idx);
                let (l, r) = leaf.split_at_byte(byte_idx);
                left.push(Arc::new(Node::Leaf(l)));
                right.push(Arc::new(Node::Leaf(r)));
            }
            Node::Internal(children) => {
                let (child_i, _) = children.locate_char(char_idx);
                let start = children.info()[..child_i]
                    .iter()
                    .fold(TextInfo::new(), |acc, info| acc.concat(info));

                for node in &children.nodes()[..child_i] {
                    left.push(node.clone());
                }
                children.nodes()[child_i].collect_split(char_idx - start.chars, left, right);
                for node in &children.nodes()[child_i + 1..] {
                    right.push(node.clone());
                }
            }
        }
    }

    /// Checks this subtree's structural invariants, panicking with a
    /// descriptive message if any are violated. Returns this subtree's
    /// depth, so a caller checking an internal node can confirm all of
    /// its children agree on depth.
    ///
    /// `is_root` relaxes the leaf-size and child-count bounds, which
    /// apply everywhere except a leaf/node that is the entire rope.
    pub fn assert_invariants(&self, is_root: bool) -> usize {
        match self {
            Node::Leaf(leaf) => {
                assert!(
                    is_root || leaf.len() >= MIN_LEAF,
                    "undersized leaf: {} bytes",
                    leaf.len()
                );
                assert!(
                    leaf.len() <= MAX_LEAF,
                    "oversized leaf: {} bytes",
                    leaf.len()
                );
                0
            }
            Node::Internal(children) => {
                assert!(
                    is_root || children.len() >= MIN_CHILDREN,
                    "undersized internal node: {} children",
                    children.len()
                );
                assert!(!is_root || children.len() >= 2, "root internal node with < 2 children");
                assert!(
                    children.len() <= MAX_CHILDREN,
                    "oversized internal node: {} children",
                    children.len()
                );

                let mut depth = None;
                for (i, child) in children.nodes().iter().enumerate() {
                    assert_eq!(
                        child.text_info(),
                        children.info()[i],
                        "child {} has stale cached TextInfo",
                        i
                    );
                    let child_depth = child.assert_invariants(false);
                    if let Some(expected) = depth {
                        assert_eq!(expected, child_depth, "children at mismatched depths");
                    }
                    depth = Some(child_depth);
                }
                depth.unwrap_or(0) + 1
            }
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new()
    }
}

/// Splits an overfull `Children` list into the fewest evenly sized
/// groups (each within `[MIN_CHILDREN, MAX_CHILDREN]`) that fit, in
/// order. A single halving split only ever absorbs one overflowing
/// child; a large `insert` can splice in many at once, so `Node::insert`
/// uses this instead to divide the whole list in one pass.
fn split_overflowing(children: Children) -> SmallVec<[Children; 2]> {
    let total = children.len();
    if total <= MAX_CHILDREN {
        return smallvec![children];
    }

    let num_groups = (total + MAX_CHILDREN - 1) / MAX_CHILDREN;
    let mut groups = SmallVec::new();
    let mut remaining_groups = num_groups;
    let mut rest = children;
    while remaining_groups > 1 {
        let take = (rest.len() + remaining_groups - 1) / remaining_groups;
        let tail = rest.split_off(take);
        groups.push(rest);
        rest = tail;
        remaining_groups -= 1;
    }
    groups.push(rest);
    groups
}

// ===========================================================================
// Joining two trees (used by `Rope::append` directly, and by
// `Rope::split_at`'s rebuild step via `build_from_fragments`).

/// True for the canonical "absence of a side" placeholder: a leaf with
/// no text. `join` treats this as the identity element so that folding
/// it over a list of fragments (some of which may be empty at the
/// ends of a split) drops the empties for free.
fn is_identity(node: &Node) -> bool {
    node.is_empty_leaf()
}

/// Joins two node subtrees into one, preserving order (`left` then
/// `right`) and rebalancing so that every internal node keeps
/// MIN_CHILDREN..=MAX_CHILDREN children and all leaves stay at the
/// same depth. Height grows by at most 1.
pub(crate) fn join(left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
    if is_identity(&left) {
        return right;
    }
    if is_identity(&right) {
        return left;
    }

    let result = if left.depth() >= right.depth() {
        graft_right(left, right)
    } else {
        graft_left(right, left)
    };
    wrap(result)
}

fn wrap(mut result: NodeResult) -> Arc<Node> {
    if result.len() == 1 {
        result.pop().unwrap().0
    } else {
        let (b_node, b_info) = result.pop().unwrap();
        let (a_node, a_info) = result.pop().unwrap();
        let mut children = Children::new();
        children.push((a_node, a_info));
        children.push((b_node, b_info));
        Arc::new(Node::Internal(children))
    }
}

/// Combines two nodes known to be at the same depth, without growing
/// the depth: leaves merge into one leaf (or split into two
/// same-depth leaves if the combination overflows `MAX_LEAF`);
/// internal nodes merge their child lists (or split into two
/// same-depth internal nodes if the combination overflows
/// `MAX_CHILDREN`).
fn merge_same_depth(left: Arc<Node>, right: Arc<Node>) -> NodeResult {
    match (Arc::try_unwrap(left), Arc::try_unwrap(right)) {
        (Ok(Node::Leaf(mut l)), Ok(Node::Leaf(r))) => {
            if l.is_empty() {
                smallvec![pair(Node::Leaf(r))]
            } else if r.is_empty() {
                smallvec![pair(Node::Leaf(l))]
            } else if l.len() + r.len() <= crate::tree::MAX_LEAF {
                l.append(&r);
                smallvec![pair(Node::Leaf(l))]
            } else {
                l.append(&r);
                let right = l.split_balanced();
                smallvec![pair(Node::Leaf(l)), pair(Node::Leaf(right))]
            }
        }
        (Ok(Node::Internal(mut l)), Ok(Node::Internal(r))) => {
            l.extend(r);
            if l.len() <= MAX_CHILDREN {
                smallvec![pair(Node::Internal(l))]
            } else {
                let split_at = l.len() / 2;
                let right = l.split_off(split_at);
                smallvec![pair(Node::Internal(l)), pair(Node::Internal(right))]
            }
        }
        (l, r) => {
            // One or both were shared (`Arc::try_unwrap` failed): fall
            // back to cloning instead of consuming in place.
            let l = l.unwrap_or_else(|arc| (*arc).clone());
            let r = r.unwrap_or_else(|arc| (*arc).clone());
            merge_same_depth(Arc::new(l), Arc::new(r))
        }
    }
}

/// Grafts `other` onto the rightmost edge of `node`'s subtree. `other`
/// must not be deeper than `node`.
fn graft_right(node: Arc<Node>, other: Arc<Node>) -> NodeResult {
    if node.depth() == other.depth() {
        return merge_same_depth(node, other);
    }

    let mut children = match &*node {
        Node::Internal(children) => children.clone(),
        Node::Leaf(_) => unreachable!("a leaf can't be deeper than another node"),
    };
    let last = children.len() - 1;
    let last_child = children.nodes()[last].clone();
    let replacement = graft_right(last_child, other);
    splice(&mut children, last, replacement)
}

/// Grafts `other` onto the leftmost edge of `node`'s subtree. `other`
/// must not be deeper than `node`.
fn graft_left(node: Arc<Node>, other: Arc<Node>) -> NodeResult {
    if node.depth() == other.depth() {
        return merge_same_depth(other, node);
    }

    let mut children = match &*node {
        Node::Internal(children) => children.clone(),
        Node::Leaf(_) => unreachable!("a leaf can't be deeper than another node"),
    };
    let first_child = children.nodes()[0].clone();
    let replacement = graft_left(first_child, other);
    splice(&mut children, 0, replacement)
}

/// Replaces `children[idx]` with the 1 or 2 nodes in `replacement`,
/// splitting `children` into two siblings if that overflows
/// `MAX_CHILDREN`.
fn splice(children: &mut Children, idx: usize, replacement: NodeResult) -> NodeResult {
    children.remove(idx);
    for (offset, child) in replacement.into_iter().enumerate() {
        children.insert(idx + offset, child);
    }

    if children.len() <= MAX_CHILDREN {
        smallvec![pair(Node::Internal(children.clone()))]
    } else {
        let split_at = children.len() / 2;
        let right = children.split_off(split_at);
        smallvec![
            pair(Node::Internal(children.clone())),
            pair(Node::Internal(right)),
        ]
    }
}

/// Rebuilds a balanced tree from an ordered list of same-or-mixed-depth
/// fragments (as collected by [`Node::collect_split`]) by folding
/// [`join`] over them left to right. Any undersized fragment at a
/// split boundary gets absorbed into its neighbor by the same
/// mechanism `join` uses for unequal-height concatenation, which is
/// exactly the "merge with a neighboring fragment" rebuild step the
/// rebalancing policy calls for.
pub(crate) fn build_from_fragments(fragments: Vec<Arc<Node>>) -> Arc<Node> {
    let mut iter = fragments.into_iter();
    let first = iter.next().unwrap_or_else(|| Arc::new(Node::new()));
    iter.fold(first, |acc, frag| join(acc, frag))
}
