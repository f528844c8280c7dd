//! Runtime for executing compiled tquery rule sets.
//!
//! This crate walks a tree once, top-down, and evaluates the compiled rules
//! at every step, yielding captured nodes as soon as their rules fire.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;
pub mod traversal;


// Re-export commonly used items at crate root
pub use engine::{
    Capture, Matches, NoopTracer, PrintTracer, RunOptions, Tracer, Verbosity, execute, execute_with,
};
pub use traversal::{DownBreadth, DownDepth, RootSeeding, Traversal, TraversalOrder, TraversalStep};
