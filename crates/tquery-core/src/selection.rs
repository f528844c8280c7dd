//! Selection AST: axes, node predicates and chained selections.
//!
//! A [`Selection`] is produced by a query front end (for instance from the
//! text `//dir/file[\\dir[@name]]`) and consumed read-only by the compiler.

use std::fmt;

use crate::TreeNode;

/// Structural direction a selection step moves relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// The anchor itself (`.`). Spelled `Itself` because `Self` is reserved.
    #[serde(rename = "self")]
    Itself,
    Parent,
    Ancestors,
    Children,
    Descendants,
    NextSibling,
    PrevSibling,
    /// Any preceding sibling.
    Before,
    /// Any following sibling.
    After,
}

impl Axis {
    pub const ALL: [Axis; 9] = [
        Axis::Itself,
        Axis::Parent,
        Axis::Ancestors,
        Axis::Children,
        Axis::Descendants,
        Axis::NextSibling,
        Axis::PrevSibling,
        Axis::Before,
        Axis::After,
    ];

    /// Query-text spelling of the axis.
    pub fn symbol(self) -> &'static str {
        match self {
            Axis::Itself => ".",
            Axis::Parent => "\\",
            Axis::Ancestors => "\\\\",
            Axis::Children => "/",
            Axis::Descendants => "//",
            Axis::NextSibling => ">",
            Axis::PrevSibling => "<",
            Axis::Before => "<<",
            Axis::After => ">>",
        }
    }

    /// The axis that leads back: if `b` is on axis `a` of `x`, then `x` is on
    /// `a.inverse()` of `b`.
    pub fn inverse(self) -> Axis {
        match self {
            Axis::Itself => Axis::Itself,
            Axis::Parent => Axis::Children,
            Axis::Children => Axis::Parent,
            Axis::Ancestors => Axis::Descendants,
            Axis::Descendants => Axis::Ancestors,
            Axis::NextSibling => Axis::PrevSibling,
            Axis::PrevSibling => Axis::NextSibling,
            Axis::Before => Axis::After,
            Axis::After => Axis::Before,
        }
    }

    /// Moves between depths.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            Axis::Parent | Axis::Ancestors | Axis::Children | Axis::Descendants
        )
    }

    /// Moves between siblings of the same parent.
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Axis::NextSibling | Axis::PrevSibling | Axis::Before | Axis::After
        )
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Stateless test against a single node.
///
/// Equality is structural: two predicates with the same [`key`](Self::key)
/// are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Node label equals the given name.
    NodeName(String),
    /// Node carries the given attribute.
    HasAttribute(String),
}

impl Predicate {
    pub fn name(name: impl Into<String>) -> Self {
        Predicate::NodeName(name.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Predicate::HasAttribute(name.into())
    }

    pub fn matches<N: TreeNode + ?Sized>(&self, node: &N) -> bool {
        match self {
            Predicate::NodeName(name) => node.name() == name,
            Predicate::HasAttribute(name) => node.has_attribute(name),
        }
    }

    /// Canonical signature used to deduplicate predicates.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::NodeName(name) => f.write_str(name),
            Predicate::HasAttribute(name) => write!(f, "@{name}"),
        }
    }
}

/// One step of a query: an axis, an optional node test, filters that must
/// all hold on the selected node, and an optional continuation.
///
/// `filters` are the `[...]` clauses of the query text. Each filter's axis is
/// read from the selected node: `[\\dir]` asks for an ancestor `dir`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    pub axis: Axis,
    /// `None` selects any node on the axis.
    #[serde(default)]
    pub predicate: Option<Predicate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Box<Selection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<String>,
}

impl Selection {
    pub fn new(axis: Axis, predicate: Option<Predicate>) -> Self {
        Self {
            axis,
            predicate,
            filters: Vec::new(),
            then: None,
            capture: None,
        }
    }

    pub fn itself(predicate: Predicate) -> Self {
        Self::new(Axis::Itself, Some(predicate))
    }

    pub fn parent(predicate: Predicate) -> Self {
        Self::new(Axis::Parent, Some(predicate))
    }

    pub fn ancestors(predicate: Predicate) -> Self {
        Self::new(Axis::Ancestors, Some(predicate))
    }

    pub fn children(predicate: Predicate) -> Self {
        Self::new(Axis::Children, Some(predicate))
    }

    pub fn descendants(predicate: Predicate) -> Self {
        Self::new(Axis::Descendants, Some(predicate))
    }

    pub fn next_sibling(predicate: Predicate) -> Self {
        Self::new(Axis::NextSibling, Some(predicate))
    }

    pub fn prev_sibling(predicate: Predicate) -> Self {
        Self::new(Axis::PrevSibling, Some(predicate))
    }

    pub fn before(predicate: Predicate) -> Self {
        Self::new(Axis::Before, Some(predicate))
    }

    pub fn after(predicate: Predicate) -> Self {
        Self::new(Axis::After, Some(predicate))
    }

    /// Any node on the given axis (`//*`).
    pub fn any(axis: Axis) -> Self {
        Self::new(axis, None)
    }

    /// Restrict this segment with a filter clause.
    pub fn filter(mut self, selection: Selection) -> Self {
        self.filters.push(selection);
        self
    }

    /// Continue the path from the nodes this chain selects.
    ///
    /// The continuation is attached to the tail of the chain, so
    /// `a.then(b).then(c)` reads as `a/b/c`, never as a fork.
    pub fn then(mut self, selection: Selection) -> Self {
        let tail = match self.then.take() {
            Some(next) => (*next).then(selection),
            None => selection,
        };
        self.then = Some(Box::new(tail));
        self
    }

    /// Name the output binding for nodes matched by this segment.
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// This segment followed by every continuation.
    pub fn chain(&self) -> impl Iterator<Item = &Selection> {
        std::iter::successors(Some(self), |s| s.then.as_deref())
    }

    /// Last segment of the chain; its nodes are what the whole path selects.
    pub fn tail(&self) -> &Selection {
        self.chain().last().unwrap_or(self)
    }

    /// Display adapter for this segment without its continuation.
    pub fn segment(&self) -> Segment<'_> {
        Segment(self)
    }
}

/// Renders a single selection segment: axis, predicate and filters.
///
/// The capture name and the continuation are left out.
pub struct Segment<'a>(&'a Selection);

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sel = self.0;
        if sel.axis != Axis::Itself {
            f.write_str(sel.axis.symbol())?;
        }
        match &sel.predicate {
            Some(predicate) => write!(f, "{predicate}")?,
            None => f.write_str("*")?,
        }
        for filter in &sel.filters {
            write!(f, "[{filter}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sel in self.chain() {
            match &sel.capture {
                Some(name) => write!(f, "{{{name}: {}}}", sel.segment())?,
                None => write!(f, "{}", sel.segment())?,
            }
        }
        Ok(())
    }
}
