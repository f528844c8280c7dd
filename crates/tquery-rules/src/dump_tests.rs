//! Tests for rule set dumps.

use tquery_core::{Axis, Colors, Predicate};

use crate::rule_tests::dir_file;
use crate::{RuleDependency, RuleId, RuleLabel, RuleSet, dump};

#[test]
fn dump_root_only() {
    insta::assert_snapshot!(dump(&RuleSet::new(), Colors::OFF), @"RR root");
}

#[test]
fn dump_chain() {
    insta::assert_snapshot!(dump(&dir_file(), Colors::OFF), @r"
    RR root <- R0
    T0 dir <- R0
    R0 //dir <- R1
       T0 .  EQ 0..0
       RR // LT 1
    T1 file <- R1
    R1 /file -> _
       T1 .  EQ 0..0
       R0 /  EQ 1..1
    ");
}

#[test]
fn dump_pads_labels() {
    let mut rules = RuleSet::new();
    let mut last = RuleId::ROOT;
    for n in 0..11 {
        let any = rules.push_composite(RuleLabel::Composite(n), "/*".into(), None);
        rules.add_dependency(any, RuleDependency::at(last).transpose(Axis::Children).unwrap());
        last = any;
    }
    let attr = rules.push_terminal(RuleLabel::Terminal(0), Predicate::attribute("x"));
    let tail = rules.push_composite(RuleLabel::Composite(11), ".@x".into(), Some("tail"));
    rules.add_dependency(tail, RuleDependency::at(attr));
    rules.add_dependency(tail, RuleDependency::at(last));
    rules.link();

    let out = dump(&rules, Colors::OFF);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "RR  root <- R0");
    assert_eq!(lines[1], "R0  /* <- R1");
    assert_eq!(lines[2], "    RR  /  EQ 1..1");
    assert_eq!(lines.last().copied(), Some("    R10 .  EQ 0..0"));
}

#[test]
fn dump_with_colors() {
    let out = dump(&dir_file(), Colors::ON);
    assert!(out.contains("\x1b[34mR1\x1b[0m /file \x1b[32m-> _\x1b[0m"));
    assert!(out.contains("\x1b[2m<- R0\x1b[0m"));
}
