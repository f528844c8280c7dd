use crate::traversal::{RootSeeding, TraversalOrder};

/// Per-run configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub(crate) order: TraversalOrder,
    pub(crate) seeding: RootSeeding,
}

impl RunOptions {
    /// Create new run options with defaults: depth-first over a document root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the traversal order.
    pub fn order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Set where the traversal anchor sits.
    pub fn seeding(mut self, seeding: RootSeeding) -> Self {
        self.seeding = seeding;
        self
    }

    pub fn get_order(&self) -> TraversalOrder {
        self.order
    }

    pub fn get_seeding(&self) -> RootSeeding {
        self.seeding
    }
}
