//! Windowed arithmetic mean.

use std::collections::VecDeque;

/// Mean over the most recent `capacity` samples.
///
/// Pushing beyond capacity evicts the oldest sample. An empty window
/// reports a mean of zero.
#[derive(Clone, Debug)]
pub struct RollingMean {
    samples: VecDeque<f64>,
    capacity: usize,
    sum: f64,
}

impl RollingMean {
    /// Create a window holding up to `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Append a sample, evicting the oldest when the window is full.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
        self.samples.push_back(sample);
        self.sum += sample;
    }

    /// Mean of the retained samples, or zero when empty.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    /// Number of retained samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample has been pushed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of retained samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
    }

    /// Resize the window. Discards all retained samples.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.clear();
    }
}
