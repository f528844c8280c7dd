//! Core compiler state and entry points.

use indexmap::IndexMap;
use tquery_core::{Axis, DEFAULT_CAPTURE, Interner, Predicate, Selection, Symbol};
use tquery_rules::{RuleDependency, RuleId, RuleLabel, RuleSet};

use super::error::{CompileError, CompileResult};
use super::verify::verify;

/// Label counters for one compilation.
#[derive(Clone, Debug, Default)]
pub struct CompileCtx {
    terminals: u32,
    composites: u32,
}

impl CompileCtx {
    pub fn next_terminal(&mut self) -> RuleLabel {
        let label = RuleLabel::Terminal(self.terminals);
        self.terminals += 1;
        label
    }

    pub fn next_composite(&mut self) -> RuleLabel {
        let label = RuleLabel::Composite(self.composites);
        self.composites += 1;
        label
    }
}

/// Compiler state for building a rule set from one selection.
pub struct Compiler<'a> {
    ctx: CompileCtx,
    rules: RuleSet,
    /// Canonical predicate keys.
    keys: Interner,
    /// One terminal per distinct predicate key.
    terminals: IndexMap<Symbol, RuleId>,
    default_capture: &'a str,
}

impl Default for Compiler<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE)
    }
}

impl<'a> Compiler<'a> {
    /// `default_capture` names the chain tail when no segment captures.
    pub fn new(default_capture: &'a str) -> Self {
        Self {
            ctx: CompileCtx::default(),
            rules: RuleSet::new(),
            keys: Interner::new(),
            terminals: IndexMap::new(),
            default_capture,
        }
    }

    /// Compile with the default capture name.
    pub fn compile(selection: &Selection) -> CompileResult<RuleSet> {
        Compiler::default().build(selection)
    }

    /// Compile, link and verify. No partial rule set escapes on error.
    pub fn build(mut self, selection: &Selection) -> CompileResult<RuleSet> {
        let tail = self.compile_chain(selection, RuleId::ROOT)?;
        if selection.chain().all(|s| s.capture.is_none()) {
            self.rules.set_capture(tail, self.default_capture);
        }
        self.rules.link();
        verify(&self.rules)?;
        Ok(self.rules)
    }

    /// Compile `selection` and its continuations, each anchored on the
    /// previous one. Returns the composite of the last segment.
    fn compile_chain(&mut self, selection: &Selection, anchor: RuleId) -> CompileResult<RuleId> {
        let mut anchor = anchor;
        for segment in selection.chain() {
            anchor = self.compile_segment(segment, Some(anchor))?;
        }
        Ok(anchor)
    }

    /// Filters are free-standing: they are tied to the selected node by the
    /// dependency the caller adds, not by an anchor of their own. A filter
    /// with nothing to test is anchored on the root instead.
    fn compile_filter(&mut self, filter: &Selection) -> CompileResult<RuleId> {
        if filter.then.is_some() {
            return Err(CompileError::Malformed {
                selection: filter.to_string(),
                reason: "a filter cannot continue into another path",
            });
        }
        self.compile_segment(filter, None)
    }

    fn compile_segment(
        &mut self,
        selection: &Selection,
        anchor: Option<RuleId>,
    ) -> CompileResult<RuleId> {
        let text = selection.segment().to_string();
        let terminal = selection.predicate.as_ref().map(|p| self.terminal(p));

        let label = self.ctx.next_composite();
        let id = self
            .rules
            .push_composite(label, text.clone(), selection.capture.as_deref());

        if let Some(terminal) = terminal {
            self.rules.add_dependency(id, RuleDependency::at(terminal));
        }

        match anchor {
            Some(anchor) => {
                let dep = transpose(anchor, selection.axis, selection.axis, &text)?;
                self.rules.add_dependency(id, dep);
            }
            // A bare `*` filter holds on every emitted step.
            None if terminal.is_none() && selection.filters.is_empty() => {
                let dep = transpose(RuleId::ROOT, Axis::Descendants, selection.axis, &text)?;
                self.rules.add_dependency(id, dep);
            }
            None => {}
        }

        for filter in &selection.filters {
            let target = self.compile_filter(filter)?;
            let dep = transpose(target, filter.axis.inverse(), filter.axis, &text)?;
            self.rules.add_dependency(id, dep);
        }

        Ok(id)
    }

    fn terminal(&mut self, predicate: &Predicate) -> RuleId {
        let key = self.keys.intern_owned(predicate.key());
        if let Some(&id) = self.terminals.get(&key) {
            return id;
        }
        let label = self.ctx.next_terminal();
        let id = self.rules.push_terminal(label, predicate.clone());
        self.terminals.insert(key, id);
        id
    }
}

/// `at(target)` moved along `along`; errors report the axis as written.
fn transpose(
    target: RuleId,
    along: Axis,
    written: Axis,
    selection: &str,
) -> CompileResult<RuleDependency> {
    RuleDependency::at(target)
        .transpose(along)
        .map_err(|source| CompileError::UnsupportedAxis {
            axis: written,
            selection: selection.to_owned(),
            source,
        })
}
