//! Tracing infrastructure for debugging rule evaluation.
//!
//! The interpreter is generic over its tracer. `NoopTracer` methods are
//! empty and inlined, so an untraced run carries no tracing cost. All state
//! needed for display lives in the tracer, never in the interpreter.

use std::fmt::Write as _;

use tquery_core::{Colors, TreeNode};
use tquery_rules::{Position, Rule, RuleId, RuleSet};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Steps, matches and captures.
    #[default]
    Default,
    /// Also rules that were evaluated and did not hold.
    Verbose,
}

/// Tracer trait for interpreter instrumentation.
///
/// Each method is called at a specific point of a run:
/// - `trace_step` - when the traversal emits a node
/// - `trace_match` - after a rule holds and is recorded
/// - `trace_miss` - after a rule is evaluated and does not hold
/// - `trace_capture` - when a capture is queued for output
/// - `trace_finish` - once, after the traversal is exhausted
pub trait Tracer {
    fn trace_step<N: TreeNode>(&mut self, at: &Position, node: &N);

    fn trace_match(&mut self, rule: RuleId, at: &Position);

    fn trace_miss(&mut self, rule: RuleId);

    fn trace_capture(&mut self, name: &str);

    fn trace_finish(&mut self);
}

impl<T: Tracer> Tracer for &mut T {
    #[inline(always)]
    fn trace_step<N: TreeNode>(&mut self, at: &Position, node: &N) {
        (**self).trace_step(at, node);
    }

    #[inline(always)]
    fn trace_match(&mut self, rule: RuleId, at: &Position) {
        (**self).trace_match(rule, at);
    }

    #[inline(always)]
    fn trace_miss(&mut self, rule: RuleId) {
        (**self).trace_miss(rule);
    }

    #[inline(always)]
    fn trace_capture(&mut self, name: &str) {
        (**self).trace_capture(name);
    }

    #[inline(always)]
    fn trace_finish(&mut self) {
        (**self).trace_finish();
    }
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_step<N: TreeNode>(&mut self, _at: &Position, _node: &N) {}

    #[inline(always)]
    fn trace_match(&mut self, _rule: RuleId, _at: &Position) {}

    #[inline(always)]
    fn trace_miss(&mut self, _rule: RuleId) {}

    #[inline(always)]
    fn trace_capture(&mut self, _name: &str) {}

    #[inline(always)]
    fn trace_finish(&mut self) {}
}

/// One row of the closing match table.
struct StepRow {
    index: u32,
    name: String,
    fired: Vec<RuleId>,
}

/// Tracer that collects a readable log of a run.
///
/// Every step prints the node, indented by depth, followed by the rules that
/// fired on it. When the run finishes a table lists, per step, every rule
/// that matched there.
pub struct PrintTracer<'r> {
    rules: &'r RuleSet,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    rows: Vec<StepRow>,
}

impl<'r> PrintTracer<'r> {
    pub fn new(rules: &'r RuleSet, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            rules,
            verbosity,
            colors,
            lines: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn describe(&self, rule: RuleId) -> String {
        let label = self.rules.label(rule);
        match self.rules.rule(rule) {
            Rule::Root => format!("{label} root"),
            Rule::Terminal(predicate) => format!("{label} {predicate}"),
            Rule::Composite(composite) => format!("{label} {}", composite.segment),
        }
    }

    fn push_table(&mut self) {
        let width = self
            .rows
            .iter()
            .map(|row| row.name.len())
            .max()
            .unwrap_or(0)
            .max("node".len());

        self.lines.push(String::new());
        self.lines.push(format!("{:<3} {:<width$} fired", "#", "node"));
        for row in &self.rows {
            let fired: Vec<String> = row
                .fired
                .iter()
                .map(|&id| self.rules.label(id).to_string())
                .collect();
            let line = format!("{:<3} {:<width$} {}", row.index, row.name, fired.join(" "));
            self.lines.push(line.trim_end().to_string());
        }
    }

    /// Collected lines joined into one string.
    pub fn output(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            writeln!(out, "{line}").unwrap();
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_step<N: TreeNode>(&mut self, at: &Position, node: &N) {
        let c = self.colors;
        let indent = 2 * at.depth.saturating_sub(1) as usize;
        self.lines.push(format!(
            "{}{:<3}{} {:indent$}{}",
            c.dim,
            at.index,
            c.reset,
            "",
            node.name()
        ));
        self.rows.push(StepRow {
            index: at.index,
            name: node.name().to_string(),
            fired: Vec::new(),
        });
    }

    fn trace_match(&mut self, rule: RuleId, _at: &Position) {
        let c = self.colors;
        let line = format!("      {}+ {}{}", c.green, self.describe(rule), c.reset);
        self.lines.push(line);
        if let Some(row) = self.rows.last_mut() {
            row.fired.push(rule);
        }
    }

    fn trace_miss(&mut self, rule: RuleId) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let line = format!("      {}- {}{}", c.dim, self.describe(rule), c.reset);
        self.lines.push(line);
    }

    fn trace_capture(&mut self, name: &str) {
        let c = self.colors;
        self.lines
            .push(format!("      {}=> {}{}", c.green, name, c.reset));
    }

    fn trace_finish(&mut self) {
        self.push_table();
    }
}
