//! Identity allocation for glyph instances.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Allocates unique, deterministic identifiers for glyph instances.
///
/// Holds one monotonic counter per glyph class. Clones share the same
/// counters, so a single context threads through an arbitrarily nested
/// composition. Construction is single-threaded; a fresh context (or
/// [`reset`](GlyphContext::reset)) makes an identifier sequence
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct GlyphContext {
    counters: Rc<RefCell<HashMap<String, u64>>>,
}

impl GlyphContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for a glyph class, e.g. `Ring-0`.
    pub fn allocate(&self, class_name: &str) -> String {
        let mut counters = self.counters.borrow_mut();
        let counter = counters.entry(class_name.to_string()).or_insert(0);
        let id = format!("{class_name}-{counter}");
        *counter += 1;
        id
    }

    /// Clear all counters. Repeating a construction sequence after a reset
    /// reproduces identical identifiers.
    pub fn reset(&self) {
        self.counters.borrow_mut().clear();
    }
}
