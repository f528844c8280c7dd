//! Query interpreter for compiled rule sets.
//!
//! The interpreter walks the tree once and, at every step, evaluates the
//! rules woken up by that step, producing captures lazily.

mod interpreter;
mod options;
mod state;
mod trace;


pub use interpreter::{Capture, Matches, execute, execute_with};
pub use options::RunOptions;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
