//! Dependency edges between rules and their distance windows.
//!
//! A dependency reads "the target rule has a recorded match at a position
//! related to the current step along `axis`, at a distance accepted by
//! `comparator` over `[min, max]`". Distances are measured from the target
//! towards the current step: for vertical axes `current.depth - target.depth`,
//! for horizontal axes `current.breadth - target.breadth`. A positive
//! distance means the target was visited first.

use std::fmt;

use tquery_core::Axis;

use crate::RuleId;

/// Coordinates of one traversal step.
///
/// The traversal root sits at [`Position::ROOT`] and is never emitted as a
/// step; its index is 0 and real steps are numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub depth: u32,
    /// Index among the parent's children.
    pub breadth: u32,
    /// Sequential index in traversal order.
    pub index: u32,
    /// Sequential index of the parent step.
    pub parent: Option<u32>,
}

impl Position {
    pub const ROOT: Position = Position {
        depth: 0,
        breadth: 0,
        index: 0,
        parent: None,
    };
}

/// Parent links of the steps visited so far.
pub trait Lineage {
    fn parent_of(&self, index: u32) -> Option<u32>;
}

/// How a measured distance is compared against a dependency's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// No positional constraint.
    None,
    /// Target strictly before the current position, at least `min` away.
    Lt,
    /// Target before or at the current position, at least `min` away.
    Lte,
    /// `min <= distance <= max`.
    Eq,
    /// Target strictly after the current position, at least `min` away.
    Gt,
    /// Target after or at the current position, at least `min` away.
    Gte,
}

impl Comparator {
    pub fn holds(self, distance: i32, min: i32, max: i32) -> bool {
        match self {
            Comparator::None => true,
            Comparator::Lt => distance >= min.max(1),
            Comparator::Lte => distance >= min,
            Comparator::Eq => min <= distance && distance <= max,
            Comparator::Gt => -distance >= min.max(1),
            Comparator::Gte => -distance >= min,
        }
    }

    /// Bounded on one side only.
    pub fn is_one_sided(self) -> bool {
        matches!(
            self,
            Comparator::Lt | Comparator::Lte | Comparator::Gt | Comparator::Gte
        )
    }

    fn name(self) -> &'static str {
        match self {
            Comparator::None => "NONE",
            Comparator::Lt => "LT",
            Comparator::Lte => "LTE",
            Comparator::Eq => "EQ",
            Comparator::Gt => "GT",
            Comparator::Gte => "GTE",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised when a dependency cannot be moved along an axis.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransposeError {
    /// The axis leads to nodes visited after the anchor's descendants are done.
    #[error("axis `{0}` points backwards and cannot extend a single forward pass")]
    Backward(Axis),

    /// Vertical and horizontal distances do not compose.
    #[error("cannot move a `{from}` dependency along `{to}`")]
    MixedDimensions { from: Axis, to: Axis },

    /// Forward constraints only ever come from hand-built rule sets.
    #[error("`{0}` constraints cannot be transposed")]
    Forward(Comparator),
}

/// Conjunctive edge from a composite rule to one of its requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleDependency {
    pub target: RuleId,
    pub axis: Axis,
    pub comparator: Comparator,
    pub min: i32,
    pub max: i32,
}

impl RuleDependency {
    /// The target must match the very node being tested.
    pub fn at(target: RuleId) -> Self {
        Self {
            target,
            axis: Axis::Itself,
            comparator: Comparator::Eq,
            min: 0,
            max: 0,
        }
    }

    /// Only a match at the current step can satisfy this dependency.
    pub fn is_step_local(&self) -> bool {
        self.comparator == Comparator::Eq && self.min == 0 && self.max == 0
    }

    /// Re-express this dependency relative to an anchor one `axis` step
    /// further out.
    ///
    /// `Children` and `NextSibling` shift the window by one; `Descendants` and
    /// `After` relax it to "strictly before, at least one further". `Itself`
    /// leaves the dependency unchanged.
    pub fn transpose(&self, axis: Axis) -> Result<Self, TransposeError> {
        let unbounded = match axis {
            Axis::Itself => return Ok(*self),
            Axis::Children | Axis::NextSibling => false,
            Axis::Descendants | Axis::After => true,
            Axis::Parent | Axis::Ancestors | Axis::PrevSibling | Axis::Before => {
                return Err(TransposeError::Backward(axis));
            }
        };
        if self.axis != Axis::Itself && self.axis.is_horizontal() != axis.is_horizontal() {
            return Err(TransposeError::MixedDimensions {
                from: self.axis,
                to: axis,
            });
        }

        let comparator = match self.comparator {
            Comparator::None => Comparator::None,
            Comparator::Eq if unbounded => Comparator::Lt,
            Comparator::Lte if !unbounded => Comparator::Lte,
            Comparator::Eq => Comparator::Eq,
            Comparator::Lt | Comparator::Lte => Comparator::Lt,
            c @ (Comparator::Gt | Comparator::Gte) => return Err(TransposeError::Forward(c)),
        };
        let (min, max) = if comparator.is_one_sided() {
            (self.min + 1, i32::MAX)
        } else {
            (self.min + 1, self.max.saturating_add(1))
        };

        Ok(Self {
            target: self.target,
            axis: axis_for(axis.is_horizontal(), comparator, axis),
            comparator,
            min,
            max,
        })
    }

    /// Whether `history` (most recent first) holds a match of the target that
    /// satisfies this dependency for a step at `at`.
    ///
    /// Recorded matches that are not related to the current step along this
    /// dependency's dimension are skipped: left-over matches from a finished
    /// sibling subtree share depths with real ancestors but are not ones.
    /// The first related match inside the window wins, so the closest
    /// qualifying match is the one found.
    pub fn is_satisfied<'h, L: Lineage>(
        &self,
        at: &Position,
        history: impl IntoIterator<Item = &'h Position>,
        lineage: &L,
    ) -> bool {
        if self.axis.is_horizontal() {
            return history.into_iter().any(|recorded| {
                recorded.parent.is_some()
                    && recorded.parent == at.parent
                    && self.holds(at.breadth as i32 - recorded.breadth as i32)
            });
        }
        let mut path = AncestorPath::new(at, lineage);
        history.into_iter().any(|recorded| {
            at.depth.checked_sub(recorded.depth).is_some_and(|distance| {
                self.holds(distance as i32) && path.index_at(recorded.depth) == Some(recorded.index)
            })
        })
    }

    fn holds(&self, distance: i32) -> bool {
        self.comparator.holds(distance, self.min, self.max)
    }
}

/// Upward walk from one step along its parent links.
///
/// History arrives with non-increasing depths, so the walk usually only moves
/// up; a deeper request restarts it from the step.
struct AncestorPath<'l, L> {
    lineage: &'l L,
    origin: Position,
    depth: u32,
    index: Option<u32>,
}

impl<'l, L: Lineage> AncestorPath<'l, L> {
    fn new(at: &Position, lineage: &'l L) -> Self {
        Self {
            lineage,
            origin: *at,
            depth: at.depth,
            index: Some(at.index),
        }
    }

    /// Index of the ancestor-or-self at `depth`.
    fn index_at(&mut self, depth: u32) -> Option<u32> {
        if depth > self.depth {
            self.depth = self.origin.depth;
            self.index = Some(self.origin.index);
        }
        while self.depth > depth {
            self.index = self.lineage.parent_of(self.index?);
            self.depth -= 1;
        }
        self.index
    }
}

/// Name the axis a transposed dependency now spans.
fn axis_for(horizontal: bool, comparator: Comparator, requested: Axis) -> Axis {
    match (horizontal, comparator) {
        (_, Comparator::None) => requested,
        (false, Comparator::Eq) => Axis::Children,
        (false, _) => Axis::Descendants,
        (true, Comparator::Eq) => Axis::NextSibling,
        (true, _) => Axis::After,
    }
}

impl fmt::Display for RuleDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparator {
            Comparator::None => write!(f, "{:<2} NONE", self.axis.symbol()),
            Comparator::Eq => write!(
                f,
                "{:<2} EQ {}..{}",
                self.axis.symbol(),
                self.min,
                self.max
            ),
            c => write!(f, "{:<2} {c} {}", self.axis.symbol(), self.min),
        }
    }
}
