//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Composite, Rule, RuleId, RuleNode, RuleSet};

impl RuleSet {
    pub(crate) fn ensure_node(&self, id: RuleId) -> &RuleNode {
        self.nodes.get(id.index()).unwrap_or_else(|| {
            panic!(
                "RuleSet: rule {} not found (set holds {} rules)",
                id.as_u32(),
                self.len()
            )
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: RuleId) -> &mut RuleNode {
        let len = self.len();
        self.nodes.get_mut(id.index()).unwrap_or_else(|| {
            panic!(
                "RuleSet: rule {} not found (set holds {len} rules)",
                id.as_u32()
            )
        })
    }

    pub(crate) fn ensure_composite_mut(&mut self, id: RuleId) -> &mut Composite {
        let node = self.ensure_node_mut(id);
        let label = node.label;
        match &mut node.rule {
            Rule::Composite(composite) => composite,
            _ => panic!("RuleSet: {label} is not a composite rule"),
        }
    }
}
