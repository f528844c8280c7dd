//! The single-pass interpreter.

use std::collections::VecDeque;
use std::fmt;

use tquery_core::TreeNode;
use tquery_rules::{Position, Rule, RuleId, RuleSet};

use super::options::RunOptions;
use super::state::MatchState;
use super::trace::{NoopTracer, Tracer};
use crate::traversal::{Traversal, TraversalStep};

/// A node bound to a capture name.
pub struct Capture<'r, 't, N> {
    pub name: &'r str,
    pub node: &'t N,
}

impl<N> Clone for Capture<'_, '_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Capture<'_, '_, N> {}

impl<N: fmt::Debug> fmt::Debug for Capture<'_, '_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("name", &self.name)
            .field("node", &self.node)
            .finish()
    }
}

/// Run `rules` over `root`.
///
/// Uses `NoopTracer`, which is optimized away.
pub fn execute<'r, 't, N: TreeNode>(
    rules: &'r RuleSet,
    root: &'t N,
    options: RunOptions,
) -> Matches<'r, 't, N> {
    execute_with(rules, root, options, NoopTracer)
}

/// Run `rules` over `root`, reporting every step to `tracer`.
///
/// Pass `&mut tracer` to inspect the tracer after the run.
pub fn execute_with<'r, 't, N: TreeNode, T: Tracer>(
    rules: &'r RuleSet,
    root: &'t N,
    options: RunOptions,
    tracer: T,
) -> Matches<'r, 't, N, T> {
    Matches {
        rules,
        traversal: Traversal::new(root, options.order, options.seeding),
        state: MatchState::new(rules.len()),
        pending: VecDeque::new(),
        tracer,
        finished: false,
    }
}

/// Lazy stream of captures, in the order their rules fire.
///
/// The tree is walked only as far as needed to produce the captures
/// consumed so far.
pub struct Matches<'r, 't, N, T: Tracer = NoopTracer> {
    rules: &'r RuleSet,
    traversal: Traversal<'t, N>,
    state: MatchState,
    pending: VecDeque<Capture<'r, 't, N>>,
    tracer: T,
    finished: bool,
}

impl<'r, 't, N: TreeNode, T: Tracer> Matches<'r, 't, N, T> {
    fn advance(&mut self, step: TraversalStep<'t, N>) {
        let rules = self.rules;
        let at = step.position();
        self.state.enter(&at);
        self.tracer.trace_step(&at, step.node);
        self.state.queue.extend(rules.seeds());

        while let Some(id) = self.state.queue.pop_front() {
            if self.state.has_fired(id, at.index) {
                continue;
            }
            if !self.evaluate(id, &at, step.node) {
                self.tracer.trace_miss(id);
                continue;
            }

            self.state.record(id, at);
            self.tracer.trace_match(id, &at);

            if let Rule::Composite(composite) = rules.rule(id)
                && let Some(sym) = composite.capture
            {
                let name = rules.capture_name(sym);
                self.tracer.trace_capture(name);
                self.pending.push_back(Capture {
                    name,
                    node: step.node,
                });
            }

            for &user in rules.used_by(id) {
                if !self.state.has_fired(user, at.index) {
                    self.state.queue.push_back(user);
                }
            }
        }
    }

    fn evaluate(&self, id: RuleId, at: &Position, node: &N) -> bool {
        match self.rules.rule(id) {
            Rule::Root => false,
            Rule::Terminal(predicate) => predicate.matches(node),
            Rule::Composite(composite) => composite.dependencies.iter().all(|dep| {
                dep.is_satisfied(at, self.state.history(dep.target), &self.state)
            }),
        }
    }

    /// The tracer, for inspection once the stream is drained.
    pub fn tracer(&self) -> &T {
        &self.tracer
    }
}

impl<'r, 't, N: TreeNode, T: Tracer> Iterator for Matches<'r, 't, N, T> {
    type Item = Capture<'r, 't, N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(capture) = self.pending.pop_front() {
                return Some(capture);
            }
            if self.finished {
                return None;
            }
            match self.traversal.next() {
                Some(step) => self.advance(step),
                None => {
                    self.finished = true;
                    self.tracer.trace_finish();
                }
            }
        }
    }
}

impl<N: TreeNode, T: Tracer> std::iter::FusedIterator for Matches<'_, '_, N, T> {}
