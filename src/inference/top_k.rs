//! Bounded top-K selection over a score vector.

use crate::error::Result;
use crate::inference::Vocabulary;
use serde::Serialize;
use std::cmp::Ordering;

/// A label picked by the selector together with its smoothed confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// Identity tag assigned at generation time (the label's vocabulary index).
    pub id: usize,
    /// Label text.
    pub label: String,
    /// Smoothed confidence, not clamped.
    pub confidence: f32,
}

impl std::fmt::Display for Recognition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.prec$}",
            self.label,
            self.confidence,
            prec = crate::constants::CONFIDENCE_DECIMAL_PLACES
        )
    }
}

/// Min-ordered binary heap that never holds more than `capacity` items.
///
/// Pushing past capacity evicts the current minimum, so after any sequence of
/// pushes the heap holds the largest items seen.
#[derive(Debug, Clone)]
pub struct BoundedMinHeap<T: Ord> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Ord> BoundedMinHeap<T> {
    /// Create an empty heap. A capacity of zero discards every push.
    ///
    /// Nothing is reserved up front; storage grows with the pushes.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest retained item.
    pub fn peek_min(&self) -> Option<&T> {
        self.items.first()
    }

    /// Insert an item, returning whatever was evicted to stay within capacity.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
        if self.items.len() > self.capacity {
            self.pop_min()
        } else {
            None
        }
    }

    /// Remove and return the smallest item.
    pub fn pop_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        self.sift_down(0);
        min
    }

    /// Drain the heap, smallest first.
    pub fn into_sorted_ascending(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Some(item) = self.pop_min() {
            out.push(item);
        }
        out
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.items[child] >= self.items[parent] {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            let mut smallest = parent;
            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == parent {
                break;
            }
            self.items.swap(parent, smallest);
            parent = smallest;
        }
    }
}

/// Heap entry ordered by confidence, then by vocabulary index.
///
/// Among equal confidences the lower index (inserted first) ranks lower and is
/// evicted first. Confidences use IEEE total order, so NaN ranks above numbers.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    confidence: f32,
    index: usize,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.confidence
            .total_cmp(&other.confidence)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Pick the `k` highest-confidence labels from `scores`.
///
/// Returns `min(k, N)` recognitions in ascending confidence order. Every
/// returned confidence is at least every excluded one.
pub fn select_top_k(vocabulary: &Vocabulary, scores: &[f32], k: usize) -> Result<Vec<Recognition>> {
    vocabulary.check_len(scores)?;

    let mut heap = BoundedMinHeap::new(k.min(scores.len()));
    for (index, &confidence) in scores.iter().enumerate() {
        heap.push(Ranked { confidence, index });
    }

    Ok(heap
        .into_sorted_ascending()
        .into_iter()
        .map(|ranked| Recognition {
            id: ranked.index,
            label: vocabulary.labels()[ranked.index].clone(),
            confidence: ranked.confidence,
        })
        .collect())
}
