//! Binary max-heap over `(priority, payload)` pairs.
//!
//! Backed by a `Vec` laid out as an implicit complete binary tree: the
//! children of index `i` live at `2i + 1` and `2i + 2`. Order among equal
//! priorities is unspecified.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct MaxHeap<P, T> {
    entries: Vec<(P, T)>,
}

impl<P: Ord, T> MaxHeap<P, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, priority: P, payload: T) {
        self.entries.push((priority, payload));
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the highest-priority entry.
    pub fn pop(&mut self) -> Result<(P, T)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyHeap);
        }
        // swap_remove moves the last leaf into the root slot.
        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    pub fn peek(&self) -> Option<(&P, &T)> {
        self.entries.first().map(|(p, t)| (p, t))
    }

    /// Drain into a vector ordered by descending priority.
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut out = Vec::with_capacity(self.entries.len());
        while let Ok(entry) = self.pop() {
            out.push(entry);
        }
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].0 >= self.entries[idx].0 {
                break;
            }
            self.entries.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut largest = idx;

            if left < len && self.entries[left].0 > self.entries[largest].0 {
                largest = left;
            }
            if right < len && self.entries[right].0 > self.entries[largest].0 {
                largest = right;
            }
            if largest == idx {
                break;
            }
            self.entries.swap(idx, largest);
            idx = largest;
        }
    }
}

impl<P: Ord, T> Default for MaxHeap<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord, T> FromIterator<(P, T)> for MaxHeap<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);
        for (priority, payload) in iter {
            heap.push(priority, payload);
        }
        heap
    }
}
