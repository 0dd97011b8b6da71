//! Bounded FIFO of job-table indices.
//!
//! The queue owns no process data; it only orders handles into the
//! engine's job table. Capacity is a hard bound: enqueueing into a full
//! queue is an error, never a silent drop.

use std::collections::VecDeque;

use crate::error::{QueueKind, Result, SimError};

/// Bounded FIFO of job indices with non-destructive iteration.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    items: VecDeque<usize>,
    capacity: usize,
}

impl ReadyQueue {
    /// Creates an empty queue holding at most `capacity` indices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends an index at the rear.
    pub fn enqueue(&mut self, idx: usize) -> Result<()> {
        self.ensure_room()?;
        self.items.push_back(idx);
        Ok(())
    }

    /// Inserts an index at `position` (clamped to the length).
    pub fn insert(&mut self, position: usize, idx: usize) -> Result<()> {
        self.ensure_room()?;
        let position = position.min(self.items.len());
        self.items.insert(position, idx);
        Ok(())
    }

    /// Removes and returns the front index.
    pub fn dequeue(&mut self) -> Option<usize> {
        self.items.pop_front()
    }

    /// Returns the front index without removing it.
    pub fn peek(&self) -> Option<usize> {
        self.items.front().copied()
    }

    /// Walks front to rear without mutation.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }

    /// Number of residents.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue has no residents.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of residents.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the queue holds `idx`.
    pub fn contains(&self, idx: usize) -> bool {
        self.items.contains(&idx)
    }

    /// Residents as one contiguous slice, front first.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        self.items.make_contiguous()
    }

    fn ensure_room(&self) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(SimError::CapacityExceeded {
                table: QueueKind::Ready,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
