//! Rule construction for selections.
//!
//! Every selection segment becomes one composite rule that conjoins:
//! - the terminal for its predicate (shared between equal predicates)
//! - its anchor (the root rule, or the preceding segment) moved along the
//!   segment's axis
//! - each filter moved back along the inverse of the filter's axis
//!
//! # Module Organization
//!
//! - `compiler`: compiler state and the recursive segment walk
//! - `error`: compile errors
//! - `verify`: structural checks on the finished rule set

mod compiler;
mod error;
mod verify;

#[cfg(test)]
mod verify_tests;

pub use compiler::{CompileCtx, Compiler};
pub use error::{CompileError, CompileResult};
pub use verify::verify;
