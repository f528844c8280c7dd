//! The rule arena.
//!
//! Rules reference each other by [`RuleId`] in both directions: composites
//! list their dependencies, and every rule lists the composites that depend
//! on it (`used_by`). Index-based links keep the back-references free of
//! ownership cycles.

use std::fmt;

use tquery_core::{Interner, Predicate, Symbol};

use crate::RuleDependency;

/// Index of a rule inside its [`RuleSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

impl RuleId {
    /// The synthetic root rule every rule set starts with.
    pub const ROOT: RuleId = RuleId(0);

    pub const fn new(raw: u32) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Display name of a rule: `RR`, `T<n>` or `R<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleLabel {
    Root,
    Terminal(u32),
    Composite(u32),
}

impl fmt::Display for RuleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLabel::Root => f.write_str("RR"),
            RuleLabel::Terminal(n) => write!(f, "T{n}"),
            RuleLabel::Composite(n) => write!(f, "R{n}"),
        }
    }
}

/// Composite rule: holds when every dependency holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
    /// Query text of the selection segment this rule was compiled from.
    pub segment: String,
    pub dependencies: Vec<RuleDependency>,
    pub capture: Option<Symbol>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Matches the traversal root only; seeded into history, never tested.
    Root,
    /// Tests a predicate against the current node.
    Terminal(Predicate),
    Composite(Composite),
}

#[derive(Clone, Debug)]
pub struct RuleNode {
    pub label: RuleLabel,
    pub rule: Rule,
    used_by: Vec<RuleId>,
}

impl RuleNode {
    /// Composites that depend on this rule.
    pub fn used_by(&self) -> &[RuleId] {
        &self.used_by
    }
}

/// Arena of compiled rules.
///
/// Built by pushing rules and dependencies, then [`link`](Self::link)ed once
/// to derive the back-references and the per-step seed list. Immutable while
/// queries run.
#[derive(Clone, Debug)]
pub struct RuleSet {
    pub(crate) nodes: Vec<RuleNode>,
    strings: Interner,
    seeds: Vec<RuleId>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// A rule set holding only the root rule.
    pub fn new() -> Self {
        Self {
            nodes: vec![RuleNode {
                label: RuleLabel::Root,
                rule: Rule::Root,
                used_by: Vec::new(),
            }],
            strings: Interner::new(),
            seeds: Vec::new(),
        }
    }

    pub fn push_terminal(&mut self, label: RuleLabel, predicate: Predicate) -> RuleId {
        self.push(label, Rule::Terminal(predicate))
    }

    pub fn push_composite(
        &mut self,
        label: RuleLabel,
        segment: String,
        capture: Option<&str>,
    ) -> RuleId {
        let capture = capture.map(|name| self.strings.intern(name));
        self.push(
            label,
            Rule::Composite(Composite {
                segment,
                dependencies: Vec::new(),
                capture,
            }),
        )
    }

    fn push(&mut self, label: RuleLabel, rule: Rule) -> RuleId {
        let id = RuleId(self.nodes.len() as u32);
        self.nodes.push(RuleNode {
            label,
            rule,
            used_by: Vec::new(),
        });
        id
    }

    /// Append a dependency to a composite rule.
    ///
    /// # Panics
    /// Panics if `rule` is not a composite of this set.
    pub fn add_dependency(&mut self, rule: RuleId, dependency: RuleDependency) {
        self.ensure_composite_mut(rule).dependencies.push(dependency);
    }

    /// Set the capture name of a composite rule.
    pub fn set_capture(&mut self, rule: RuleId, name: &str) {
        let sym = self.strings.intern(name);
        self.ensure_composite_mut(rule).capture = Some(sym);
    }

    /// Second pass: derive `used_by` from the dependencies and compute seeds.
    ///
    /// Seeds are the rules tested at every step before any propagation: all
    /// terminals, plus composites with no step-local dependency, since
    /// nothing that fires during a step would ever wake those up.
    pub fn link(&mut self) {
        for node in &mut self.nodes {
            node.used_by.clear();
        }
        for index in 0..self.nodes.len() {
            let Rule::Composite(composite) = &self.nodes[index].rule else {
                continue;
            };
            let dependent = RuleId(index as u32);
            let targets: Vec<RuleId> = composite.dependencies.iter().map(|d| d.target).collect();
            for target in targets {
                let used_by = &mut self.ensure_node_mut(target).used_by;
                if !used_by.contains(&dependent) {
                    used_by.push(dependent);
                }
            }
        }

        let terminals = self.terminals().map(|(id, _)| id);
        let free = self
            .composites()
            .filter(|(_, c)| !c.dependencies.iter().any(RuleDependency::is_step_local))
            .map(|(id, _)| id);
        self.seeds = terminals.chain(free).collect();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root rule is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: RuleId) -> &RuleNode {
        self.ensure_node(id)
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.ensure_node(id).rule
    }

    pub fn label(&self, id: RuleId) -> RuleLabel {
        self.ensure_node(id).label
    }

    pub fn used_by(&self, id: RuleId) -> &[RuleId] {
        &self.ensure_node(id).used_by
    }

    /// Rules tested at the start of every step, in test order.
    pub fn seeds(&self) -> &[RuleId] {
        &self.seeds
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &RuleNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (RuleId(i as u32), node))
    }

    pub fn terminals(&self) -> impl Iterator<Item = (RuleId, &Predicate)> {
        self.iter().filter_map(|(id, node)| match &node.rule {
            Rule::Terminal(predicate) => Some((id, predicate)),
            _ => None,
        })
    }

    pub fn composites(&self) -> impl Iterator<Item = (RuleId, &Composite)> {
        self.iter().filter_map(|(id, node)| match &node.rule {
            Rule::Composite(composite) => Some((id, composite)),
            _ => None,
        })
    }

    pub fn capture_name(&self, sym: Symbol) -> &str {
        self.strings.resolve(sym)
    }

    /// Every capture name used by the set, in first-use order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|(_, name)| name)
    }
}
