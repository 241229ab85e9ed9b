//! Ordered node container: a doubly-linked sequence stored in an arena.
//!
//! Nodes live in a `Vec` of slots and link to their neighbours by slot index.
//! Callers hold [`NodeHandle`]s, which carry the slot's generation; removing a
//! node bumps that generation, so a handle that outlived its node is rejected
//! by every accessor instead of observing whatever reuses the slot.
//!
//! The node count is a counter updated inside every structural mutation.

use log::{trace, warn};

use crate::error::ListError;

/// A stable, validity-checked reference to a node in a [`NodeList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// Generic doubly-linked list with O(1) length, head/tail access and O(1)
/// removal by handle.
#[derive(Debug)]
pub struct NodeList<T> {
    slots: Vec<Slot<T>>,
    /// Vacant slot indices, reused before the arena grows.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes in the list. Reads the maintained counter.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(|i| self.handle(i))
    }

    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|i| self.handle(i))
    }

    /// Return true if `handle` still refers to a node in this list.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some()
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.node(handle).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_mut())
            .map(|n| &mut n.value)
    }

    /// The node after `handle`, or `None` at the tail or for a stale handle.
    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle)
            .and_then(|n| n.next)
            .map(|i| self.handle(i))
    }

    /// The node before `handle`, or `None` at the head or for a stale handle.
    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle)
            .and_then(|n| n.prev)
            .map(|i| self.handle(i))
    }

    /// 1-based position of `handle`, found by walking from the head.
    pub fn position_of(&self, handle: NodeHandle) -> Option<usize> {
        if !self.contains(handle) {
            return None;
        }
        self.iter().position(|(h, _)| h == handle).map(|p| p + 1)
    }

    /// Iterate `(handle, value)` pairs from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Insert `value` before the current head.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let index = self.allocate(value);
        match self.head {
            None => {
                self.head = Some(index);
                self.tail = Some(index);
            }
            Some(old_head) => {
                self.set_next(index, Some(old_head));
                self.set_prev(old_head, Some(index));
                self.head = Some(index);
            }
        }
        self.len += 1;
        trace!("push_front: slot {index}, len {}", self.len);
        debug_assert!(self.verify_links());
        self.handle(index)
    }

    /// Insert `value` after the current tail.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let index = self.allocate(value);
        match self.tail {
            None => {
                self.head = Some(index);
                self.tail = Some(index);
            }
            Some(old_tail) => {
                self.set_prev(index, Some(old_tail));
                self.set_next(old_tail, Some(index));
                self.tail = Some(index);
            }
        }
        self.len += 1;
        trace!("push_back: slot {index}, len {}", self.len);
        debug_assert!(self.verify_links());
        self.handle(index)
    }

    /// Return true if `position` is accepted by [`insert_at`](Self::insert_at).
    pub fn is_valid_insert_position(&self, position: usize) -> bool {
        (1..=self.len + 1).contains(&position)
    }

    /// Insert `value` so that it ends up at 1-based `position`.
    ///
    /// Accepts `1..=len + 1`; the boundaries behave exactly like
    /// [`push_front`](Self::push_front) and [`push_back`](Self::push_back).
    /// Any other position leaves the list untouched.
    pub fn insert_at(&mut self, position: usize, value: T) -> Result<NodeHandle, ListError> {
        if !self.is_valid_insert_position(position) {
            warn!(
                "rejected insert at position {position} (valid range 1..={})",
                self.len + 1
            );
            return Err(ListError::InvalidPosition {
                position,
                len: self.len,
            });
        }
        if position == 1 {
            return Ok(self.push_front(value));
        }
        if position == self.len + 1 {
            return Ok(self.push_back(value));
        }

        let pred = self.index_at(position - 1).ok_or(ListError::InvalidPosition {
            position,
            len: self.len,
        })?;
        let succ = self.next_index(pred);

        let index = self.allocate(value);
        self.set_prev(index, Some(pred));
        self.set_next(index, succ);
        self.set_next(pred, Some(index));
        if let Some(succ) = succ {
            self.set_prev(succ, Some(index));
        }
        self.len += 1;
        trace!("insert_at {position}: slot {index}, len {}", self.len);
        debug_assert!(self.verify_links());
        Ok(self.handle(index))
    }

    /// Remove and return the head value, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        let index = self.head?;
        self.unlink(index)
    }

    /// Remove and return the tail value, if any.
    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.tail?;
        self.unlink(index)
    }

    /// Unlink the node behind `handle` in O(1) and return its value.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T, ListError> {
        if !self.contains(handle) {
            warn!("rejected removal through a stale handle");
            return Err(ListError::StaleHandle);
        }
        self.unlink(handle.index).ok_or(ListError::StaleHandle)
    }

    /// Remove the node at 1-based `position` (`1..=len`).
    pub fn remove_at(&mut self, position: usize) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        if !(1..=self.len).contains(&position) {
            warn!(
                "rejected removal at position {position} (valid range 1..={})",
                self.len
            );
            return Err(ListError::InvalidPosition {
                position,
                len: self.len,
            });
        }
        let index = self.index_at(position).ok_or(ListError::InvalidPosition {
            position,
            len: self.len,
        })?;
        self.unlink(index).ok_or(ListError::StaleHandle)
    }

    /// Drop every value and return to the empty state.
    ///
    /// Slots are kept for reuse, but all of them change generation, so no
    /// handle issued before the call is accepted afterwards.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
        trace!("clear: {} slots vacant", self.free.len());
    }

    fn handle(&self, index: usize) -> NodeHandle {
        NodeHandle {
            index,
            generation: self.slots.get(index).map_or(0, |s| s.generation),
        }
    }

    fn node(&self, handle: NodeHandle) -> Option<&Node<T>> {
        self.slots
            .get(handle.index)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn next_index(&self, index: usize) -> Option<usize> {
        self.slots
            .get(index)
            .and_then(|s| s.node.as_ref())
            .and_then(|n| n.next)
    }

    fn prev_index(&self, index: usize) -> Option<usize> {
        self.slots
            .get(index)
            .and_then(|s| s.node.as_ref())
            .and_then(|n| n.prev)
    }

    /// Slot index of the node at 1-based `position`, walking from the head.
    fn index_at(&self, position: usize) -> Option<usize> {
        let mut cursor = self.head;
        for _ in 1..position {
            cursor = cursor.and_then(|i| self.next_index(i));
        }
        cursor
    }

    fn set_next(&mut self, index: usize, next: Option<usize>) {
        if let Some(node) = self.slots.get_mut(index).and_then(|s| s.node.as_mut()) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, index: usize, prev: Option<usize>) {
        if let Some(node) = self.slots.get_mut(index).and_then(|s| s.node.as_mut()) {
            node.prev = prev;
        }
    }

    fn allocate(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Detach the node in slot `index`, relink its neighbours and vacate the slot.
    fn unlink(&mut self, index: usize) -> Option<T> {
        let slot = self.slots.get_mut(index)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);

        match node.prev {
            Some(prev) => self.set_next(prev, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.set_prev(next, node.prev),
            None => self.tail = node.prev,
        }
        self.len -= 1;
        trace!("unlink: slot {index}, len {}", self.len);
        debug_assert!(self.verify_links());
        Some(node.value)
    }

    /// Walk the whole chain and check every structural invariant. Slow; meant
    /// for `debug_assert!` and tests.
    pub(crate) fn verify_links(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() || self.head.is_none() != (self.len == 0) {
            return false;
        }
        if self.head.is_some_and(|h| self.prev_index(h).is_some()) {
            return false;
        }
        if self.tail.is_some_and(|t| self.next_index(t).is_some()) {
            return false;
        }

        let mut reachable = 0usize;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if reachable > self.slots.len() {
                // cycle
                return false;
            }
            let Some(node) = self.slots.get(index).and_then(|s| s.node.as_ref()) else {
                return false;
            };
            if node.prev != prev {
                return false;
            }
            reachable += 1;
            prev = Some(index);
            cursor = node.next;
        }

        let occupied = self.slots.iter().filter(|s| s.node.is_some()).count();
        prev == self.tail && reachable == self.len && occupied == self.len
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for NodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = (NodeHandle, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over a [`NodeList`], see [`NodeList::iter`].
pub struct Iter<'a, T> {
    list: &'a NodeList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = self.list.slots.get(index)?;
        let node = slot.node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((
            NodeHandle {
                index,
                generation: slot.generation,
            },
            &node.value,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests;
