use tquery_core::Axis;
use tquery_rules::TransposeError;

/// Errors raised while turning a selection into rules.
///
/// All of them are detected before any traversal starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The axis cannot be resolved while walking the tree once, forward.
    #[error("unsupported axis `{axis}` in `{selection}`: {source}")]
    UnsupportedAxis {
        axis: Axis,
        selection: String,
        source: TransposeError,
    },

    /// A segment ended up with nothing to check.
    #[error("`{selection}` places no constraint on the selected node")]
    EmptyRule { selection: String },

    #[error("malformed selection `{selection}`: {reason}")]
    Malformed {
        selection: String,
        reason: &'static str,
    },

    /// The dependency graph loops back on a rule.
    #[error("rule {rule} depends on itself")]
    Cycle { rule: String },
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
