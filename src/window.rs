//! Fixed-capacity reading history
//!
//! Readings are kept newest first in an array sized for the largest allowed
//! window, so nothing is ever allocated. Only the first `len` slots are
//! meaningful.

use crate::config::BUFFER_MAX;

/// Newest-first sliding window of readings
#[derive(Clone, Debug)]
pub struct Window {
    /// Slot 0 holds the newest reading
    slots: [u16; BUFFER_MAX],
    /// Number of valid slots
    len: usize,
    /// Window length, at most `BUFFER_MAX`
    capacity: usize,
}

impl Window {
    /// Create an empty window
    ///
    /// `capacity` is clamped into `1..=BUFFER_MAX`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: [0; BUFFER_MAX],
            len: 0,
            capacity: capacity.clamp(1, BUFFER_MAX),
        }
    }

    /// Forget all readings
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Insert a reading at the front, evicting the oldest one when full
    pub fn push(&mut self, value: u16) {
        let keep = self.len.min(self.capacity - 1);
        self.slots.copy_within(0..keep, 1);
        self.slots[0] = value;
        self.len = (self.len + 1).min(self.capacity);
    }

    /// Overwrite the newest reading
    ///
    /// Returns `false` on an empty window.
    pub fn set_front(&mut self, value: u16) -> bool {
        if self.len == 0 {
            return false;
        }
        self.slots[0] = value;
        true
    }

    /// Newest reading
    pub fn front(&self) -> Option<u16> {
        self.as_slice().first().copied()
    }

    /// Valid readings, newest first
    pub fn as_slice(&self) -> &[u16] {
        &self.slots[..self.len]
    }

    /// Number of valid readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Window length
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sum of all valid readings
    pub fn sum(&self) -> u32 {
        self.as_slice().iter().map(|&v| u32::from(v)).sum()
    }

    /// Mean of all valid readings, rounded up
    pub fn mean_ceil(&self) -> Option<u16> {
        if self.len == 0 {
            return None;
        }
        let n = self.len as u32;
        // Never exceeds the largest reading, so it fits
        Some(((self.sum() + n - 1) / n) as u16)
    }

    /// Smallest valid reading
    pub fn min(&self) -> Option<u16> {
        self.as_slice().iter().copied().min()
    }

    /// Largest valid reading
    pub fn max(&self) -> Option<u16> {
        self.as_slice().iter().copied().max()
    }

    /// Lower median of the valid readings
    ///
    /// The readings are copied into `scratch` and sorted there; the window
    /// itself keeps its insertion order.
    pub fn lower_median(&self, scratch: &mut [u16; BUFFER_MAX]) -> Option<u16> {
        if self.len == 0 {
            return None;
        }
        let sorted = &mut scratch[..self.len];
        sorted.copy_from_slice(self.as_slice());
        insertion_sort(sorted);
        Some(sorted[(self.len - 1) / 2])
    }
}

/// Ascending insertion sort, fine for at most [`BUFFER_MAX`] items
fn insertion_sort(values: &mut [u16]) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] > key {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}
