#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled rule format and runtime matching types for tquery.
//!
//! This crate contains:
//! - The rule arena ([`RuleSet`]) produced by the compiler and read by the VM
//! - Dependency edges with distance windows and axis transposition
//! - Step coordinates ([`Position`]) recorded in match history
//! - A human-readable [`dump`] of a rule set

mod dependency;
mod dump;
mod invariants;
mod rule;

#[cfg(test)]
mod dump_tests;

pub use dependency::{Comparator, Lineage, Position, RuleDependency, TransposeError};
pub use dump::dump;
pub use rule::{Composite, Rule, RuleId, RuleLabel, RuleNode, RuleSet};
