//! Persistent (structurally shared) linked stack.
//!
//! A [`Stack`] is an immutable singly-linked list. Pushing allocates one new
//! head node that points at the existing stack, so old and new versions share
//! their entire tail. This is what makes snapshots and undo entries cheap:
//! keeping an old version alive costs nothing beyond the nodes it already had.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

struct Node<T> {
    value: T,
    tail: Stack<T>,
    len: usize,
}

/// Immutable stack with O(1) push, pop and length.
///
/// The empty stack carries no allocation, so every empty `Stack<T>` is the
/// same canonical value. Nodes are reference counted and never mutated after
/// creation; they are reclaimed once no stack refers to them.
///
/// # Example
///
/// ```rust
/// use rpn_core::core::Stack;
///
/// let base = Stack::new().push(1.0).push(2.0);
/// let branch = base.push(3.0);
///
/// // Pushing never changes the original.
/// assert_eq!(base.len(), 2);
/// assert_eq!(branch.len(), 3);
/// assert_eq!(branch.to_vec(), vec![1.0, 2.0, 3.0]);
///
/// let (top, rest) = branch.pop().unwrap();
/// assert_eq!(*top, 3.0);
/// assert!(rest.ptr_eq(&base));
/// ```
pub struct Stack<T> {
    head: Option<Arc<Node<T>>>,
}

impl<T> Stack<T> {
    /// The canonical empty stack.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Return a new stack with `value` on top. `self` is left untouched.
    #[must_use]
    pub fn push(&self, value: T) -> Self {
        let len = self.len() + 1;
        Self {
            head: Some(Arc::new(Node {
                value,
                tail: self.clone(),
                len,
            })),
        }
    }

    /// Split off the top value.
    ///
    /// Returns `None` for the empty stack; callers decide what an empty pop
    /// means for them.
    pub fn pop(&self) -> Option<(&T, Stack<T>)> {
        self.head
            .as_deref()
            .map(|node| (&node.value, node.tail.clone()))
    }

    /// The top value, if any.
    pub fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Number of values. Cached per node, so this is O(1).
    pub fn len(&self) -> usize {
        self.head.as_deref().map_or(0, |node| node.len)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// True when both stacks are the very same version (same head node).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Iterate from the top of the stack down to the bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<T: Clone> Stack<T> {
    /// Materialise the stack bottom-to-top.
    pub fn to_vec(&self) -> Vec<T> {
        let mut values: Vec<T> = self.iter().cloned().collect();
        values.reverse();
        values
    }
}

impl<T> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink uniquely owned nodes one at a time; the derived recursive drop
// would overflow the call stack on long histories.
impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Arc::try_unwrap(node) {
                Ok(mut node) => head = node.tail.head.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<&T> = self.iter().collect();
        values.reverse();
        f.debug_list().entries(values).finish()
    }
}

/// Builds a stack from values given bottom-to-top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Stack::new(), |stack, value| stack.push(value))
    }
}

/// Top-to-bottom iterator over a [`Stack`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.tail.head.as_deref();
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map_or(0, |node| node.len);
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialized as a bottom-to-top sequence.
impl<T: Serialize> Serialize for Stack<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut values: Vec<&T> = self.iter().collect();
        values.reverse();
        serializer.collect_seq(values)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Stack<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
