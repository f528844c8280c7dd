//! Human-readable rule set dump for debugging and snapshot tests.
//!
//! One header line per rule in arena order, followed by one indented line per
//! dependency of a composite:
//!
//! ```text
//! RR root <- R0
//! T0 dir <- R0
//! R0 //dir <- R1
//!    T0 .  EQ 0..0
//!    RR // LT 1
//! ```

use std::fmt::Write as _;

use tquery_core::Colors;

use crate::{Rule, RuleId, RuleSet};

/// Generate a human-readable dump of the rule set.
pub fn dump(rules: &RuleSet, colors: Colors) -> String {
    let mut out = String::new();
    let labels: Vec<String> = rules.iter().map(|(_, node)| node.label.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);
    let label = |id: RuleId| labels[id.index()].as_str();

    let Colors {
        blue,
        green,
        dim,
        reset,
    } = colors;

    for (id, node) in rules.iter() {
        write!(out, "{blue}{:<width$}{reset} ", label(id)).unwrap();
        match &node.rule {
            Rule::Root => out.push_str("root"),
            Rule::Terminal(predicate) => write!(out, "{predicate}").unwrap(),
            Rule::Composite(composite) => {
                out.push_str(&composite.segment);
                if let Some(capture) = composite.capture {
                    write!(out, " {green}-> {}{reset}", rules.capture_name(capture)).unwrap();
                }
            }
        }
        if !node.used_by().is_empty() {
            let users: Vec<&str> = node.used_by().iter().map(|&u| label(u)).collect();
            write!(out, " {dim}<- {}{reset}", users.join(", ")).unwrap();
        }
        out.push('\n');

        let Rule::Composite(composite) = &node.rule else {
            continue;
        };
        for dep in &composite.dependencies {
            writeln!(
                out,
                "{:indent$}{blue}{:<width$}{reset} {dim}{dep}{reset}",
                "",
                label(dep.target),
                indent = width + 1,
            )
            .unwrap();
        }
    }

    out
}
