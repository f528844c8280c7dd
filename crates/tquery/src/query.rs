//! Compiling selections and running them over trees.

use tquery_compiler::Compiler;
use tquery_core::{Colors, DEFAULT_CAPTURE, Selection, TreeNode};
use tquery_rules::RuleSet;
use tquery_vm::{Matches, PrintTracer, RunOptions, Verbosity, execute, execute_with};

/// Compile `selection` with default settings.
pub fn compile(selection: &Selection) -> crate::Result<CompiledQuery> {
    QueryBuilder::new(selection).compile()
}

/// Builder for [`CompiledQuery`].
pub struct QueryBuilder<'q> {
    pub selection: &'q Selection,
    default_capture: String,
}

impl<'q> QueryBuilder<'q> {
    pub fn new(selection: &'q Selection) -> Self {
        Self {
            selection,
            default_capture: DEFAULT_CAPTURE.to_string(),
        }
    }

    /// Name bound to the selected nodes when no segment captures.
    pub fn with_default_capture(mut self, name: impl Into<String>) -> Self {
        self.default_capture = name.into();
        self
    }

    pub fn compile(self) -> crate::Result<CompiledQuery> {
        let rules = Compiler::new(&self.default_capture).build(self.selection)?;
        Ok(CompiledQuery {
            source: self.selection.to_string(),
            rules,
        })
    }
}

/// A selection compiled to rules, reusable across trees and runs.
///
/// Runs share nothing but the immutable rules: every run starts from a fresh
/// match state, so the same query can run over several trees at once.
#[derive(Clone, Debug)]
pub struct CompiledQuery {
    source: String,
    rules: RuleSet,
}

impl CompiledQuery {
    /// Query text of the selection this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Human-readable listing of the compiled rules.
    pub fn dump(&self, colors: Colors) -> String {
        tquery_rules::dump(&self.rules, colors)
    }

    /// Depth-first run with `tree` as the only child of the document root.
    pub fn run<'q, 't, N: TreeNode>(&'q self, tree: &'t N) -> Matches<'q, 't, N> {
        self.run_with(tree, RunOptions::default())
    }

    pub fn run_with<'q, 't, N: TreeNode>(
        &'q self,
        tree: &'t N,
        options: RunOptions,
    ) -> Matches<'q, 't, N> {
        execute(&self.rules, tree, options)
    }

    /// Run to completion and return the trace of every step.
    pub fn trace<N: TreeNode>(
        &self,
        tree: &N,
        options: RunOptions,
        verbosity: Verbosity,
        colors: Colors,
    ) -> String {
        let mut tracer = PrintTracer::new(&self.rules, verbosity, colors);
        for _ in execute_with(&self.rules, tree, options, &mut tracer) {}
        tracer.output()
    }
}
