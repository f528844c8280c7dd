//! tquery: single-pass structural selection over labeled trees.
//!
//! A [`Selection`] (for instance `//dir/file[\\dir[@name]]`) is compiled once
//! into a set of rules; running the compiled query walks a tree top-down a
//! single time and yields captured nodes lazily, in traversal order.
//!
//! # Example
//!
//! ```
//! use tquery::{Node, Predicate, Selection};
//!
//! let tree = Node::new("dir")
//!     .with_attribute("name", "tlang")
//!     .with_child(Node::new("file").with_attribute("name", "main.py"));
//! let selection = Selection::descendants(Predicate::name("dir"))
//!     .then(Selection::children(Predicate::name("file")));
//!
//! let query = tquery::compile(&selection).expect("valid selection");
//! let files: Vec<String> = query.run(&tree).map(|c| c.node.to_string()).collect();
//! assert_eq!(files, [r#"file(name="main.py")"#]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod query;

#[cfg(test)]
mod query_tests;

pub use query::{CompiledQuery, QueryBuilder, compile};
pub use tquery_compiler::CompileError;
pub use tquery_core::{
    Axis, Colors, DEFAULT_CAPTURE, Node, Predicate, Selection, TreeNode,
};
pub use tquery_rules::RuleSet;
pub use tquery_vm::{
    Capture, Matches, RootSeeding, RunOptions, TraversalOrder, Verbosity,
};

/// Errors that can occur while preparing a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("selection does not compile: {0}")]
    Compile(#[from] CompileError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;
