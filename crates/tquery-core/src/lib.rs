#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for tquery.
//!
//! Three layers:
//! - **Tree**: the read-only [`TreeNode`] view queries run against, plus an
//!   owned [`Node`] implementation that round-trips through JSON
//! - **Selection model**: [`Axis`], [`Predicate`] and the recursive
//!   [`Selection`] AST handed over by a query front end
//! - **Support**: string interning and terminal colors shared by the
//!   compiler, rule dumps and tracers

mod colors;
mod interner;
mod selection;
mod tree;

#[cfg(test)]
mod selection_tests;
#[cfg(test)]
mod tree_tests;

pub use colors::Colors;
pub use interner::{Interner, Symbol};
pub use selection::{Axis, Predicate, Segment, Selection};
pub use tree::{Node, TreeNode};

/// Capture name used when a query does not name any of its segments.
pub const DEFAULT_CAPTURE: &str = "_";
