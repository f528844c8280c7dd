use tquery_core::{Axis, Predicate, Selection};
use tquery_rules::{RuleDependency, RuleId, RuleLabel, RuleSet};

use super::{CompileError, Compiler, verify};

fn terminal_and_composite() -> (RuleSet, RuleId) {
    let mut rules = RuleSet::new();
    let dir = rules.push_terminal(RuleLabel::Terminal(0), Predicate::name("dir"));
    let nested = rules.push_composite(RuleLabel::Composite(0), "//dir".into(), Some("_"));
    rules.add_dependency(nested, RuleDependency::at(dir));
    (rules, nested)
}

#[test]
fn compiled_rules_verify() {
    let selection = Selection::descendants(Predicate::name("dir"))
        .then(Selection::children(Predicate::name("file")).filter(Selection::ancestors(Predicate::name("dir"))));
    let rules = Compiler::compile(&selection).unwrap();
    assert_eq!(verify(&rules), Ok(()));
}

#[test]
fn descendant_self_loop_is_allowed() {
    let (mut rules, nested) = terminal_and_composite();
    let self_loop = RuleDependency::at(nested).transpose(Axis::Descendants).unwrap();
    rules.add_dependency(nested, self_loop);
    rules.link();
    assert_eq!(verify(&rules), Ok(()));
    assert_eq!(rules.used_by(nested), &[nested]);
}

#[test]
fn child_self_loop_is_a_cycle() {
    let (mut rules, nested) = terminal_and_composite();
    let self_loop = RuleDependency::at(nested).transpose(Axis::Children).unwrap();
    rules.add_dependency(nested, self_loop);
    rules.link();
    assert_eq!(
        verify(&rules),
        Err(CompileError::Cycle { rule: "R0".into() })
    );
}

#[test]
fn mutual_dependency_is_a_cycle() {
    let (mut rules, first) = terminal_and_composite();
    let second = rules.push_composite(RuleLabel::Composite(1), "/*".into(), None);
    rules.add_dependency(second, RuleDependency::at(first).transpose(Axis::Children).unwrap());
    rules.add_dependency(first, RuleDependency::at(second).transpose(Axis::Descendants).unwrap());
    rules.link();
    let err = verify(&rules).unwrap_err();
    assert!(matches!(err, CompileError::Cycle { .. }));
    assert_eq!(err.to_string(), "rule R0 depends on itself");
}

#[test]
fn composite_without_dependencies_is_rejected() {
    let mut rules = RuleSet::new();
    rules.push_composite(RuleLabel::Composite(0), "*".into(), None);
    rules.link();
    assert_eq!(
        verify(&rules),
        Err(CompileError::EmptyRule {
            selection: "*".into()
        })
    );
}

#[test]
#[should_panic(expected = "outside the set")]
fn dangling_target_panics() {
    let (mut rules, nested) = terminal_and_composite();
    rules.add_dependency(nested, RuleDependency::at(RuleId::new(42)));
    let _ = verify(&rules);
}
