mod children;
mod leaf;
mod node;

#[cfg(not(test))]
mod constants {
    pub(crate) const MAX_CHILDREN: usize = 16;
    pub(crate) const MIN_CHILDREN: usize = MAX_CHILDREN / 2;
    pub(crate) const MAX_LEAF: usize = 1024;
    pub(crate) const MIN_LEAF: usize = MAX_LEAF / 2;
}
pub(crate) use constants::{MAX_CHILDREN, MAX_LEAF, MIN_CHILDREN, MIN_LEAF};

pub(crate) use children::Children;
pub(crate) use leaf::Leaf;
pub(crate) use node::{build_from_fragments, join, Node};
