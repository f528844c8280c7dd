//! Structural checks on a linked rule set.
//!
//! Run after every compilation. A rule set handed to the interpreter has
//! dependency targets inside the arena, no composite without dependencies,
//! and no dependency cycle other than a composite waiting on its own earlier
//! match further up the tree.

use tquery_core::Axis;
use tquery_rules::{Rule, RuleId, RuleSet};

use super::error::{CompileError, CompileResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

pub fn verify(rules: &RuleSet) -> CompileResult<()> {
    for (id, composite) in rules.composites() {
        if composite.dependencies.is_empty() {
            return Err(CompileError::EmptyRule {
                selection: composite.segment.clone(),
            });
        }
        for dep in &composite.dependencies {
            assert!(
                dep.target.index() < rules.len(),
                "rule {} depends on rule {} outside the set ({} rules)",
                rules.label(id),
                dep.target.as_u32(),
                rules.len(),
            );
        }
    }

    let mut marks = vec![Mark::Unvisited; rules.len()];
    for (id, _) in rules.iter() {
        visit(rules, id, &mut marks)?;
    }
    Ok(())
}

fn visit(rules: &RuleSet, id: RuleId, marks: &mut [Mark]) -> CompileResult<()> {
    match marks[id.index()] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            return Err(CompileError::Cycle {
                rule: rules.label(id).to_string(),
            });
        }
        Mark::Unvisited => {}
    }

    marks[id.index()] = Mark::InProgress;
    if let Rule::Composite(composite) = rules.rule(id) {
        for dep in &composite.dependencies {
            // Recursive descent: the rule's own match on an ancestor.
            if dep.target == id && dep.axis == Axis::Descendants {
                continue;
            }
            visit(rules, dep.target, marks)?;
        }
    }
    marks[id.index()] = Mark::Done;
    Ok(())
}
