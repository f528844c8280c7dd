//! Per-run matching state.

use std::collections::VecDeque;

use tquery_rules::{Lineage, Position, RuleId};

/// Everything a run accumulates; dropped with the run.
pub(crate) struct MatchState {
    /// Recorded matches per rule, most recent first, pruned to the ones a
    /// later step can still relate to.
    history: Vec<VecDeque<Position>>,
    /// Parent step index per step index; the anchor has none.
    parents: Vec<Option<u32>>,
    /// Step index at which each rule last fired; 0 is the anchor step.
    fired: Vec<Option<u32>>,
    /// Rules waiting to be evaluated at the current step.
    pub(crate) queue: VecDeque<RuleId>,
}

impl MatchState {
    pub(crate) fn new(rule_count: usize) -> Self {
        let mut history = vec![VecDeque::new(); rule_count];
        history[RuleId::ROOT.index()].push_front(Position::ROOT);
        let mut fired = vec![None; rule_count];
        fired[RuleId::ROOT.index()] = Some(Position::ROOT.index);
        Self {
            history,
            parents: vec![None],
            fired,
            queue: VecDeque::new(),
        }
    }

    /// Register a step before any rule is evaluated on it.
    ///
    /// Matches deeper than `at` belong to subtrees the walk has left; none of
    /// them is an ancestor or sibling of `at` or of any later step. Each
    /// history keeps non-increasing depths from the front, so they are all
    /// at its front.
    pub(crate) fn enter(&mut self, at: &Position) {
        debug_assert_eq!(at.index as usize, self.parents.len());
        self.parents.push(at.parent);
        self.queue.clear();
        for history in &mut self.history {
            while history.front().is_some_and(|recorded| recorded.depth > at.depth) {
                history.pop_front();
            }
        }
    }

    pub(crate) fn has_fired(&self, rule: RuleId, step: u32) -> bool {
        self.fired[rule.index()] == Some(step)
    }

    pub(crate) fn record(&mut self, rule: RuleId, at: Position) {
        self.fired[rule.index()] = Some(at.index);
        self.history[rule.index()].push_front(at);
    }

    pub(crate) fn history(&self, rule: RuleId) -> impl Iterator<Item = &Position> {
        self.history[rule.index()].iter()
    }
}

impl Lineage for MatchState {
    fn parent_of(&self, index: u32) -> Option<u32> {
        self.parents.get(index as usize).copied().flatten()
    }
}
