//! Undo/redo history.
//!
//! Provides immutable undo and redo buffers built on persistent stacks.
//! Every operation returns a new history; recording an entry costs one node,
//! and old histories stay valid because nothing is ever mutated.

use super::stack::Stack;
use serde::{Deserialize, Serialize};

/// Undo and redo buffers, most recent entry on top of each.
///
/// `History` knows nothing about what it stores. The caller supplies the
/// current value on every undo/redo so the buffers can swap it in and out.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::History;
///
/// let history = History::new().record("a").record("b");
///
/// // Current value is "c"; undo hands back "b" and remembers "c" for redo.
/// let (previous, history) = history.undo("c").unwrap();
/// assert_eq!(previous, "b");
/// assert!(history.can_redo());
///
/// let (next, history) = history.redo(previous).unwrap();
/// assert_eq!(next, "c");
/// assert!(!history.can_redo());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct History<S> {
    undo: Stack<S>,
    redo: Stack<S>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> History<S> {
    /// Create a history with both buffers empty.
    pub const fn new() -> Self {
        Self {
            undo: Stack::new(),
            redo: Stack::new(),
        }
    }

    /// Rebuild a history from existing buffers.
    pub fn from_buffers(undo: Stack<S>, redo: Stack<S>) -> Self {
        Self { undo, redo }
    }

    /// Record `before` as the newest undo entry.
    ///
    /// Recording starts a new timeline, so the redo buffer is discarded.
    ///
    /// ```rust
    /// use rpn_core::core::History;
    ///
    /// let history = History::new().record(1);
    /// let (_, history) = history.undo(2).unwrap();
    /// assert!(history.can_redo());
    ///
    /// let history = history.record(3);
    /// assert!(!history.can_redo());
    /// assert_eq!(history.undo_depth(), 1);
    /// ```
    #[must_use]
    pub fn record(&self, before: S) -> Self {
        Self {
            undo: self.undo.push(before),
            redo: Stack::new(),
        }
    }

    pub fn undo_buffer(&self) -> &Stack<S> {
        &self.undo
    }

    pub fn redo_buffer(&self) -> &Stack<S> {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl<S: Clone> History<S> {
    /// Step back: pop the newest undo entry and park `current` on the redo
    /// buffer. Returns `None` when there is nothing to undo.
    pub fn undo(&self, current: S) -> Option<(S, Self)> {
        let (previous, undo) = self.undo.pop()?;
        let history = Self {
            undo,
            redo: self.redo.push(current),
        };
        Some((previous.clone(), history))
    }

    /// Step forward: pop the newest redo entry and park `current` on the
    /// undo buffer. Returns `None` when there is nothing to redo.
    pub fn redo(&self, current: S) -> Option<(S, Self)> {
        let (next, redo) = self.redo.pop()?;
        let history = Self {
            undo: self.undo.push(current),
            redo,
        };
        Some((next.clone(), history))
    }
}
