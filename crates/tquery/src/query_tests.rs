//! End-to-end tests through the public API.

use indoc::indoc;

use crate::{
    Colors, CompileError, Error, Node, Predicate, QueryBuilder, RunOptions, Selection, TreeNode,
    Verbosity, compile,
};

const PROJECT: &str = r#"{
    "name": "dir",
    "attributes": { "name": "tlang" },
    "children": [
        {
            "name": "dir",
            "attributes": { "name": "research" },
            "children": [
                { "name": "file", "attributes": { "name": "compiler-query.py" } },
                { "name": "file", "attributes": { "name": "interpreter.py" } },
                { "name": "file", "attributes": { "name": "interpreter-stream.py" } }
            ]
        }
    ]
}"#;

fn project() -> Node {
    serde_json::from_str(PROJECT).unwrap()
}

fn name(n: &str) -> Predicate {
    Predicate::name(n)
}

fn select(selection: &Selection) -> Vec<String> {
    let tree = project();
    let query = compile(selection).unwrap();
    query.run(&tree).map(|c| c.node.to_string()).collect()
}

const FILES: [&str; 3] = [
    r#"file(name="compiler-query.py")"#,
    r#"file(name="interpreter.py")"#,
    r#"file(name="interpreter-stream.py")"#,
];

#[test]
fn no_file_under_the_root() {
    assert!(select(&Selection::children(name("file"))).is_empty());
}

#[test]
fn every_file() {
    assert_eq!(select(&Selection::descendants(name("file"))), FILES);
}

#[test]
fn every_dir() {
    assert_eq!(
        select(&Selection::descendants(name("dir"))),
        [r#"dir(name="tlang")"#, r#"dir(name="research")"#]
    );
}

#[test]
fn files_in_dirs() {
    let selection = Selection::descendants(name("dir")).then(Selection::children(name("file")));
    assert_eq!(select(&selection), FILES);
}

#[test]
fn files_below_named_dirs() {
    let named_dir =
        Selection::ancestors(name("dir")).filter(Selection::itself(Predicate::attribute("name")));
    let selection = Selection::descendants(name("dir"))
        .then(Selection::children(name("file")).filter(named_dir));
    assert_eq!(selection.to_string(), r"//dir/file[\\dir[@name]]");
    assert_eq!(select(&selection), FILES);
}

#[test]
fn selection_from_json() {
    let selection: Selection = serde_json::from_str(
        r#"{
            "axis": "descendants",
            "predicate": { "node_name": "dir" },
            "then": { "axis": "children", "predicate": { "node_name": "file" }, "capture": "f" }
        }"#,
    )
    .unwrap();
    let tree = project();
    let query = compile(&selection).unwrap();
    let names: Vec<&str> = query.run(&tree).map(|c| c.name).collect();
    assert_eq!(names, ["f", "f", "f"]);
}

#[test]
fn repeated_runs_agree() {
    let tree = project();
    let query = compile(&Selection::descendants(Predicate::attribute("name"))).unwrap();
    let first: Vec<String> = query.run(&tree).map(|c| c.node.to_string()).collect();
    let second: Vec<String> = query.run(&tree).map(|c| c.node.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn interleaved_runs_are_independent() {
    let tree = project();
    let query = compile(&Selection::descendants(name("file"))).unwrap();
    let mut a = query.run(&tree);
    let mut b = query.run(&tree);
    let first_a = a.next().map(|c| c.node.to_string());
    let first_b = b.next().map(|c| c.node.to_string());
    assert_eq!(first_a, first_b);
    assert_eq!(a.count(), 2);
    assert_eq!(b.count(), 2);
}

#[test]
fn first_match_only_walks_a_prefix() {
    struct Watched<'c> {
        name: &'static str,
        children: Vec<Watched<'c>>,
        visits: &'c std::cell::Cell<u32>,
    }

    impl TreeNode for Watched<'_> {
        fn name(&self) -> &str {
            self.name
        }

        fn has_attribute(&self, _name: &str) -> bool {
            false
        }

        fn children(&self) -> &[Self] {
            self.visits.set(self.visits.get() + 1);
            &self.children
        }
    }

    let visits = std::cell::Cell::new(0);
    let node = |name, children| Watched {
        name,
        children,
        visits: &visits,
    };
    let tree = node(
        "dir",
        vec![
            node("file", vec![]),
            node("dir", (0..50).map(|_| node("file", vec![])).collect()),
        ],
    );

    let query = compile(&Selection::descendants(name("file"))).unwrap();
    let first = query.run(&tree).next().unwrap();
    assert_eq!(first.node.name(), "file");
    assert_eq!(visits.get(), 2);
}

#[test]
fn custom_default_capture() {
    let selection = Selection::descendants(name("dir"));
    let query = QueryBuilder::new(&selection)
        .with_default_capture("hit")
        .compile()
        .unwrap();
    let tree = project();
    assert!(query.run(&tree).all(|c| c.name == "hit"));
}

#[test]
fn breadth_first_run() {
    let tree = Node::new("top").with_children([
        Node::new("a").with_child(Node::new("leaf").with_attribute("n", 1)),
        Node::new("b").with_child(Node::new("leaf").with_attribute("n", 2)),
    ]);
    let query = compile(&Selection::descendants(name("leaf"))).unwrap();
    let options = RunOptions::new().order(crate::TraversalOrder::BreadthFirst);
    let leaves: Vec<String> = query
        .run_with(&tree, options)
        .map(|c| c.node.to_string())
        .collect();
    assert_eq!(leaves, ["leaf(n=1)", "leaf(n=2)"]);
}

#[test]
fn run_options_from_json() {
    let options: RunOptions =
        serde_json::from_str(r#"{ "order": "breadth_first", "seeding": "children" }"#).unwrap();
    assert_eq!(
        options,
        RunOptions::new()
            .order(crate::TraversalOrder::BreadthFirst)
            .seeding(crate::RootSeeding::Children)
    );
    let defaults: RunOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, RunOptions::default());
}

#[test]
fn dump_compiled_query() {
    let selection = Selection::descendants(name("dir")).then(Selection::children(name("file")));
    let query = compile(&selection).unwrap();
    assert_eq!(query.source(), "//dir/file");
    insta::assert_snapshot!(query.dump(Colors::OFF), @r"
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
fn trace_compiled_query() {
    let selection = Selection::descendants(name("dir")).then(Selection::children(name("file")));
    let query = compile(&selection).unwrap();
    let tree = project();
    let trace = query.trace(&tree, RunOptions::new(), Verbosity::Default, Colors::OFF);
    assert!(trace.ends_with(indoc! {"
        #   node fired
        1   dir  T0 R0
        2   dir  T0 R0
        3   file T1 R1
        4   file T1 R1
        5   file T1 R1
    "}));
}

#[test]
fn compile_errors_are_wrapped() {
    let selection = Selection::descendants(name("dir")).then(Selection::parent(name("file")));
    let err = compile(&selection).unwrap_err();
    assert!(matches!(
        err,
        Error::Compile(CompileError::UnsupportedAxis { .. })
    ));
    insta::assert_snapshot!(err, @r"selection does not compile: unsupported axis `\` in `\file`: axis `\` points backwards and cannot extend a single forward pass");
}
