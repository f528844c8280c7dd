use crate::{Axis, Node, Predicate, Selection};

fn files_under_named_dirs() -> Selection {
    Selection::descendants(Predicate::name("dir")).then(
        Selection::children(Predicate::name("file")).filter(
            Selection::ancestors(Predicate::name("dir"))
                .filter(Selection::itself(Predicate::attribute("name"))),
        ),
    )
}

#[test]
fn renders_query_text() {
    let query = files_under_named_dirs();

    assert_eq!(query.to_string(), r"//dir/file[\\dir[@name]]");
}

#[test]
fn renders_captures_and_wildcards() {
    let query = Selection::any(Axis::Descendants)
        .capture("all")
        .then(Selection::next_sibling(Predicate::name("b")));

    assert_eq!(query.to_string(), "{all: //*}>b");
}

#[test]
fn segment_omits_continuation() {
    let query = files_under_named_dirs();

    assert_eq!(query.segment().to_string(), "//dir");
}

#[test]
fn then_appends_to_tail() {
    let query = Selection::children(Predicate::name("a"))
        .then(Selection::children(Predicate::name("b")))
        .then(Selection::descendants(Predicate::name("c")));

    assert_eq!(query.to_string(), "/a/b//c");
    assert_eq!(query.chain().count(), 3);
    assert_eq!(query.tail().to_string(), "//c");
}

#[test]
fn predicate_keys_are_structural() {
    let a = Predicate::name("dir");
    let b = Predicate::NodeName("dir".to_string());

    assert_eq!(a, b);
    assert_eq!(a.key(), b.key());
    assert_eq!(Predicate::attribute("name").key(), "@name");
    assert_ne!(Predicate::name("name").key(), Predicate::attribute("name").key());
}

#[test]
fn predicates_match_nodes() {
    let node = Node::new("file").with_attribute("name", "a.py");

    assert!(Predicate::name("file").matches(&node));
    assert!(!Predicate::name("dir").matches(&node));
    assert!(Predicate::attribute("name").matches(&node));
    assert!(!Predicate::attribute("size").matches(&node));
}

#[test]
fn axis_inverse_is_involution() {
    for axis in Axis::ALL {
        assert_eq!(axis.inverse().inverse(), axis);
        assert_eq!(axis.is_vertical(), axis.inverse().is_vertical());
        assert!(!(axis.is_vertical() && axis.is_horizontal()));
    }
    assert_eq!(Axis::Ancestors.inverse(), Axis::Descendants);
    assert_eq!(Axis::Before.inverse(), Axis::After);
    assert!(!Axis::Itself.is_vertical() && !Axis::Itself.is_horizontal());
}

#[test]
fn deserializes_from_json() {
    let json = r#"{
        "axis": "descendants",
        "predicate": { "node_name": "dir" },
        "then": {
            "axis": "children",
            "predicate": { "node_name": "file" },
            "filters": [
                { "axis": "self", "predicate": { "has_attribute": "name" } }
            ],
            "capture": "f"
        }
    }"#;

    let query: Selection = serde_json::from_str(json).unwrap();

    assert_eq!(query.to_string(), "//dir{f: /file[@name]}");
}
