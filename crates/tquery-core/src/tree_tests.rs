use indoc::indoc;

use crate::{Node, TreeNode};

fn sample() -> Node {
    Node::new("dir").with_attribute("name", "tlang").with_child(
        Node::new("dir")
            .with_attribute("name", "research")
            .with_children([
                Node::new("file").with_attribute("name", "compiler-query.py"),
                Node::new("file").with_attribute("name", "interpreter.py"),
            ]),
    )
}

#[test]
fn tree_node_view() {
    let tree = sample();

    assert_eq!(tree.name(), "dir");
    assert!(tree.has_attribute("name"));
    assert!(!tree.has_attribute("path"));
    assert_eq!(TreeNode::children(&tree).len(), 1);
    assert_eq!(tree.subtree_size(), 4);
}

#[test]
fn display_is_one_line() {
    let tree = sample();
    let leaf = Node::new("file");
    let multi = Node::new("file")
        .with_attribute("name", "a.py")
        .with_attribute("size", 12);

    assert_eq!(tree.to_string(), r#"dir(name="tlang")"#);
    assert_eq!(leaf.to_string(), "file");
    assert_eq!(multi.to_string(), r#"file(name="a.py", size=12)"#);
}

#[test]
fn attributes_keep_insertion_order() {
    let node = Node::new("file")
        .with_attribute("z", 1)
        .with_attribute("a", 2)
        .with_attribute("z", 3);

    let keys: Vec<_> = node.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a"]);
    assert_eq!(node.attribute("z"), Some(&serde_json::json!(3)));
}

#[test]
fn deserializes_from_json() {
    let json = indoc! {r#"
        {
          "name": "dir",
          "attributes": { "name": "tlang" },
          "children": [
            { "name": "file", "attributes": { "name": "interpreter.py" } },
            { "name": "file" }
          ]
        }
    "#};

    let tree: Node = serde_json::from_str(json).unwrap();

    assert_eq!(tree.to_string(), r#"dir(name="tlang")"#);
    assert_eq!(tree.children.len(), 2);
    assert!(tree.children[0].has_attribute("name"));
    assert!(!tree.children[1].has_attribute("name"));
}

#[test]
fn serializes_without_empty_fields() {
    let node = Node::new("file").with_attribute("name", "a.py");

    let json = serde_json::to_string(&node).unwrap();

    insta::assert_snapshot!(json, @r#"{"name":"file","attributes":{"name":"a.py"}}"#);
}
