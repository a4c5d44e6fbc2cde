//! A persistent, balanced-tree Unicode text rope.
//!
//! Text is stored internally as UTF-8 (Rust's native `str`/`String`),
//! with character, UTF-16 code unit, and line-number coordinate
//! systems all derived from the same tree. Every mutating operation on
//! [`Rope`] returns a new value via structural sharing rather than
//! mutating in place, so existing `Rope`s are never invalidated by an
//! edit to another.

#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::inline_always)]
#![allow(clippy::needless_return)]
#![allow(clippy::redundant_field_names)]
#![allow(clippy::type_complexity)]

mod crlf;
pub mod error;
pub mod iter;
mod rope;
mod rope_builder;
pub mod str_utils;
mod text_info;
mod tree;

pub use crate::error::{Error, IndexKind};
pub use crate::rope::Rope;
pub use crate::rope_builder::RopeBuilder;
