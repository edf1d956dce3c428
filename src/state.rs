//! Per-run translation state.
//!
//! Carries the nesting depth and the set of required capabilities from one
//! line to the next. Every [`Translator`](crate::translate::Translator) owns
//! its own state, so independent runs never interact.

use std::collections::BTreeSet;

use crate::python::Capability;

/// Mutable state threaded through a translation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EngineState {
    indent_level: usize,
    capabilities: BTreeSet<Capability>,
}

impl EngineState {
    /// Fresh state: indent 0, no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    #[inline]
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Depth for `elif`/`else`: one level out from the current body.
    #[inline]
    #[must_use]
    pub fn sibling_level(&self) -> usize {
        self.indent_level.saturating_sub(1)
    }

    /// Enter a block. Returns the level the block header is written at.
    pub fn open_block(&mut self) -> usize {
        let header = self.indent_level;
        self.indent_level += 1;
        header
    }

    /// Leave a block.
    ///
    /// Returns `false` if there was no open block; the level stays at 0.
    pub fn close_block(&mut self) -> bool {
        match self.indent_level.checked_sub(1) {
            Some(level) => {
                self.indent_level = level;
                true
            }
            None => false,
        }
    }

    /// Record that emitted code needs `cap`.
    pub fn require(&mut self, cap: Capability) {
        self.capabilities.insert(cap);
    }

    /// Capabilities recorded so far, in module-name order.
    #[must_use]
    pub fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    /// Consume the state, keeping only the capability set.
    #[must_use]
    pub fn into_capabilities(self) -> BTreeSet<Capability> {
        self.capabilities
    }
}
