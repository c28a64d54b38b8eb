//! Core traits for running statistics
//!
//! Every engine implements [`RunningSketch`], which is the minimal contract a
//! sampling loop needs: feed a reading, get the fresh statistic back, reset.

/// Error returned when a reading is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectError {
    /// Reading lies outside the configured valid range
    OutOfRange {
        value: u16,
        min: u16,
        max: u16,
    },
}

impl core::fmt::Display for RejectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RejectError::OutOfRange { value, min, max } => {
                write!(f, "reading {} outside valid range [{}, {}]", value, min, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RejectError {}

/// Core trait for all running statistics
pub trait RunningSketch {
    /// The type of reading (and statistic) this sketch processes
    type Value: Copy;

    /// Register a reading and return the recomputed statistic
    ///
    /// A rejected reading leaves the sketch untouched.
    fn update(&mut self, value: Self::Value) -> Result<Self::Value, RejectError>;

    /// Discard all history, keeping the configuration
    fn clear(&mut self);

    /// Number of readings currently retained
    fn readings(&self) -> usize;

    /// Maximum number of readings retained
    fn capacity(&self) -> usize;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Check if no reading is retained
    fn is_empty(&self) -> bool {
        self.readings() == 0
    }

    /// Check if the window is saturated
    fn is_full(&self) -> bool {
        self.readings() == self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_reject_error_display() {
        let err = RejectError::OutOfRange {
            value: 900,
            min: 10,
            max: 500,
        };

        assert_eq!(err.to_string(), "reading 900 outside valid range [10, 500]");
    }

    #[test]
    fn test_default_methods() {
        struct Fixed(usize);

        impl RunningSketch for Fixed {
            type Value = u16;

            fn update(&mut self, value: u16) -> Result<u16, RejectError> {
                self.0 = (self.0 + 1).min(3);
                Ok(value)
            }

            fn clear(&mut self) {
                self.0 = 0;
            }

            fn readings(&self) -> usize {
                self.0
            }

            fn capacity(&self) -> usize {
                3
            }

            fn size_bytes(&self) -> usize {
                core::mem::size_of::<Self>()
            }
        }

        let mut sketch = Fixed(0);
        assert!(sketch.is_empty());
        assert!(!sketch.is_full());

        for v in 0..5 {
            sketch.update(v).unwrap();
        }
        assert!(sketch.is_full());

        sketch.clear();
        assert!(sketch.is_empty());
    }
}
