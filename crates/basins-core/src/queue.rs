//! Fixed-capacity FIFO of cell addresses used by the upstream fill.
//!
//! The buffer is allocated once and reused for every catchment; `clear` only
//! resets the cursors since slots outside `[head, head + len)` are never read.
use crate::error::{BasinError, Result};
use crate::grid::Point;

pub struct BoundedQueue {
    buf: Vec<Point>,
    head: usize,
    len: usize,
    inserted: u64,
    removed: u64,
}

impl BoundedQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![Point::default(); capacity],
            head: 0,
            len: 0,
            inserted: 0,
            removed: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Append at the tail. A full queue means the capacity estimate was wrong.
    #[inline]
    pub fn insert(&mut self, p: Point) -> Result<()> {
        if self.is_full() {
            return Err(BasinError::QueueOverflow {
                capacity: self.capacity(),
            });
        }
        let tail = (self.head + self.len) % self.buf.len();
        self.buf[tail] = p;
        self.len += 1;
        self.inserted += 1;
        Ok(())
    }

    /// Pop from the head; `None` when empty.
    #[inline]
    pub fn remove(&mut self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let p = self.buf[self.head];
        self.head = (self.head + 1) % self.buf.len();
        self.len -= 1;
        self.removed += 1;
        Some(p)
    }

    /// Drop pending entries in O(1).
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Total inserts since construction (not reset by `clear`).
    pub fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Total removals since construction (not reset by `clear`).
    pub fn removed(&self) -> u64 {
        self.removed
    }
}
