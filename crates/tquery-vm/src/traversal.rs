//! Lazy top-down walks over a [`TreeNode`].
//!
//! Both walks number steps sequentially from 1 and report, for every node,
//! its depth, its index among its parent's children and the step index of its
//! parent. The anchor the walk starts from sits at depth 0 / index 0 and is
//! never emitted.

use std::collections::VecDeque;

use tquery_core::TreeNode;
use tquery_rules::Position;

/// Order in which nodes are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// Pre-order, children in document order.
    #[default]
    DepthFirst,
    /// Level by level, children in document order.
    BreadthFirst,
}

/// Where the walk's anchor is placed relative to the given node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootSeeding {
    /// The node is the only child of a synthetic document root and is itself
    /// visited at depth 1.
    #[default]
    Document,
    /// The node is the anchor; its children are visited at depth 1.
    Children,
}

/// One visited node with its coordinates.
#[derive(Debug)]
pub struct TraversalStep<'t, N> {
    pub node: &'t N,
    pub depth: u32,
    /// Index among the parent's children.
    pub breadth: u32,
    /// Sequential step index, starting at 1.
    pub index: u32,
    /// Step index of the parent; 0 for the anchor.
    pub parent: u32,
}

impl<N> TraversalStep<'_, N> {
    pub fn position(&self) -> Position {
        Position {
            depth: self.depth,
            breadth: self.breadth,
            index: self.index,
            parent: Some(self.parent),
        }
    }
}

impl<N> Clone for TraversalStep<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for TraversalStep<'_, N> {}

/// A node waiting to be visited; its step index is assigned on emission.
struct Pending<'t, N> {
    node: &'t N,
    depth: u32,
    breadth: u32,
    parent: u32,
}

fn seed<'t, N: TreeNode>(root: &'t N, seeding: RootSeeding) -> Vec<Pending<'t, N>> {
    match seeding {
        RootSeeding::Document => vec![Pending {
            node: root,
            depth: 1,
            breadth: 0,
            parent: 0,
        }],
        RootSeeding::Children => children_of(root, 1, 0).collect(),
    }
}

fn children_of<'t, N: TreeNode>(
    node: &'t N,
    depth: u32,
    parent: u32,
) -> impl DoubleEndedIterator<Item = Pending<'t, N>> {
    node.children()
        .iter()
        .enumerate()
        .map(move |(breadth, child)| Pending {
            node: child,
            depth,
            breadth: narrow(breadth, "children"),
            parent,
        })
}

/// Step indices and sibling positions are `u32`; larger trees are rejected.
pub(crate) fn narrow(count: usize, what: &str) -> u32 {
    u32::try_from(count).unwrap_or_else(|_| panic!("Traversal: more than {} {what}", u32::MAX))
}

/// Hand out the next step index.
pub(crate) fn take_index(next: &mut u32) -> u32 {
    let index = *next;
    *next = index
        .checked_add(1)
        .unwrap_or_else(|| panic!("Traversal: step index overflow"));
    index
}

/// Depth-first pre-order walk.
///
/// A node's children are fetched only once the node itself is emitted, so
/// stopping early leaves the rest of the tree untouched.
pub struct DownDepth<'t, N> {
    stack: Vec<Pending<'t, N>>,
    next_index: u32,
}

impl<'t, N: TreeNode> DownDepth<'t, N> {
    pub fn new(root: &'t N, seeding: RootSeeding) -> Self {
        let mut stack = seed(root, seeding);
        stack.reverse();
        Self {
            stack,
            next_index: 1,
        }
    }
}

impl<'t, N: TreeNode> Iterator for DownDepth<'t, N> {
    type Item = TraversalStep<'t, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.stack.pop()?;
        let index = take_index(&mut self.next_index);
        self.stack
            .extend(children_of(pending.node, pending.depth + 1, index).rev());
        Some(TraversalStep {
            node: pending.node,
            depth: pending.depth,
            breadth: pending.breadth,
            index,
            parent: pending.parent,
        })
    }
}

/// Breadth-first walk.
pub struct DownBreadth<'t, N> {
    queue: VecDeque<Pending<'t, N>>,
    next_index: u32,
}

impl<'t, N: TreeNode> DownBreadth<'t, N> {
    pub fn new(root: &'t N, seeding: RootSeeding) -> Self {
        Self {
            queue: seed(root, seeding).into(),
            next_index: 1,
        }
    }
}

impl<'t, N: TreeNode> Iterator for DownBreadth<'t, N> {
    type Item = TraversalStep<'t, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.queue.pop_front()?;
        let index = take_index(&mut self.next_index);
        self.queue
            .extend(children_of(pending.node, pending.depth + 1, index));
        Some(TraversalStep {
            node: pending.node,
            depth: pending.depth,
            breadth: pending.breadth,
            index,
            parent: pending.parent,
        })
    }
}

/// Either walk, picked at run time.
pub enum Traversal<'t, N> {
    DepthFirst(DownDepth<'t, N>),
    BreadthFirst(DownBreadth<'t, N>),
}

impl<'t, N: TreeNode> Traversal<'t, N> {
    pub fn new(root: &'t N, order: TraversalOrder, seeding: RootSeeding) -> Self {
        match order {
            TraversalOrder::DepthFirst => Traversal::DepthFirst(DownDepth::new(root, seeding)),
            TraversalOrder::BreadthFirst => {
                Traversal::BreadthFirst(DownBreadth::new(root, seeding))
            }
        }
    }
}

impl<'t, N: TreeNode> Iterator for Traversal<'t, N> {
    type Item = TraversalStep<'t, N>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::DepthFirst(walk) => walk.next(),
            Traversal::BreadthFirst(walk) => walk.next(),
        }
    }
}
