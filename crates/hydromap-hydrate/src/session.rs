//! Per-query hydration options.

use hydromap_core::Value;

/// Options threaded through one hydration pass.
///
/// Replaces ambient hint maps with the two options this hydrator
/// recognizes: refreshing an already-managed entity in place, and
/// internal iteration over very large result sets.
#[derive(Debug, Clone, Default)]
pub struct HydrationHints {
    /// Identifier of a managed entity to refresh in place with each row's
    /// field data, instead of materializing new instances.
    pub refresh_entity: Option<Vec<Value>>,
    /// Flush deferred eager loads after every row so the caller can consume
    /// results without buffering the whole set.
    pub internal_iteration: bool,
}

impl HydrationHints {
    /// Default hints: materialize every row, batch mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the managed entity with the given identifier in place.
    #[must_use]
    pub fn refresh_entity(mut self, id: Vec<Value>) -> Self {
        self.refresh_entity = Some(id);
        self
    }

    /// Enable per-row deferred-load flushing (streaming consumption).
    #[must_use]
    pub fn internal_iteration(mut self, enabled: bool) -> Self {
        self.internal_iteration = enabled;
        self
    }
}
