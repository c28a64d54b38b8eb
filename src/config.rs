//! Engine configuration and sanitizing rules
//!
//! Construction never fails. Whatever the caller asks for is corrected into
//! the nearest usable setting by the pure functions in this module, and the
//! effective result is what the engine reports through its accessors.
//!
//! # Example
//!
//! ```
//! use runstats::config::{Config, StatisticKind};
//!
//! let engine = Config::new(StatisticKind::Median)
//!     .capacity(4)
//!     .range(1000, 20)
//!     .build();
//!
//! assert_eq!(engine.capacity(), 5);
//! assert_eq!(engine.value_min(), 20);
//! assert_eq!(engine.value_max(), 1000);
//! ```

use crate::engine::RunningStatistic;

/// Undefined reading, returned instead of a statistic on rejection
pub const NAN: u16 = 65535;
/// Minimal valid reading
pub const VALUE_MIN: u16 = 0;
/// Maximal valid reading
pub const VALUE_MAX: u16 = 65535;
/// Minimal window length
pub const BUFFER_MIN: usize = 3;
/// Maximal window length
pub const BUFFER_MAX: usize = 11;
/// Window length used when none is requested
pub const BUFFER_DEFAULT: usize = 5;

/// Statistic computed by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatisticKind {
    Median,
    #[default]
    Average,
    Minimum,
    Maximum,
}

impl StatisticKind {
    /// Decode a legacy bit-flag code, falling back to [`StatisticKind::Average`]
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => StatisticKind::Median,
            2 => StatisticKind::Average,
            4 => StatisticKind::Minimum,
            8 => StatisticKind::Maximum,
            _ => {
                debug!("unknown statistic code {}, using average", code);
                StatisticKind::Average
            }
        }
    }

    /// Legacy bit-flag code
    pub fn code(self) -> u8 {
        match self {
            StatisticKind::Median => 1,
            StatisticKind::Average => 2,
            StatisticKind::Minimum => 4,
            StatisticKind::Maximum => 8,
        }
    }

    /// Whether this kind tracks an extreme value
    pub fn is_extreme(self) -> bool {
        matches!(self, StatisticKind::Minimum | StatisticKind::Maximum)
    }
}

/// How minimum and maximum treat old readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtremePolicy {
    /// Fold over the whole window; an extreme expires once it is evicted
    #[default]
    Windowed,
    /// Keep only the best value seen since the last reset
    Unbounded,
}

/// What lands in the front slot of the history after each reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorePolicy {
    /// The raw reading
    #[default]
    Raw,
    /// The freshly computed statistic, so later results build on it
    Cascade,
}

/// Inclusive range of acceptable readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueRange {
    min: u16,
    max: u16,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::full()
    }
}

impl ValueRange {
    /// Create a range, swapping bounds given in reverse order
    pub fn new(min: u16, max: u16) -> Self {
        if min > max {
            debug!("valid range [{}, {}] reversed, swapping", min, max);
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Range accepting every reading
    pub const fn full() -> Self {
        Self {
            min: VALUE_MIN,
            max: VALUE_MAX,
        }
    }

    /// Lower bound
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Check if a reading is acceptable
    pub fn contains(&self, value: u16) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ValueRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct RangeData {
            min: u16,
            max: u16,
        }

        let data = RangeData::deserialize(deserializer)?;
        Ok(ValueRange::new(data.min, data.max))
    }
}

/// Effective window length for a requested one
///
/// Median windows are made odd before clamping into
/// [`BUFFER_MIN`]..=[`BUFFER_MAX`], so they stay odd after it. An unbounded
/// minimum or maximum needs a single slot.
pub fn sanitize_capacity(kind: StatisticKind, extreme: ExtremePolicy, requested: usize) -> usize {
    let capacity = match kind {
        StatisticKind::Median => (requested | 1).clamp(BUFFER_MIN, BUFFER_MAX),
        k if k.is_extreme() && extreme == ExtremePolicy::Unbounded => 1,
        _ => requested.clamp(BUFFER_MIN, BUFFER_MAX),
    };
    if capacity != requested {
        debug!(
            "{:?} window length {} adjusted to {}",
            kind, requested, capacity
        );
    }
    capacity
}

/// Engine settings, corrected on [`Config::build`]
///
/// Fields hold what was requested; [`RunningStatistic::config`] returns the
/// effective values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub kind: StatisticKind,
    pub capacity: usize,
    pub range: ValueRange,
    pub extreme: ExtremePolicy,
    pub store: StorePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(StatisticKind::default())
    }
}

impl Config {
    /// Start a configuration for the given statistic with default settings
    pub fn new(kind: StatisticKind) -> Self {
        Self {
            kind,
            capacity: BUFFER_DEFAULT,
            range: ValueRange::full(),
            extreme: ExtremePolicy::default(),
            store: StorePolicy::default(),
        }
    }

    /// Start a configuration from a legacy statistic code
    pub fn from_code(code: u8) -> Self {
        Self::new(StatisticKind::from_code(code))
    }

    /// Requested window length
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Valid reading range; reversed bounds are swapped
    pub fn range(mut self, min: u16, max: u16) -> Self {
        self.range = ValueRange::new(min, max);
        self
    }

    /// Minimum/maximum policy
    pub fn extreme_policy(mut self, extreme: ExtremePolicy) -> Self {
        self.extreme = extreme;
        self
    }

    /// History store policy
    pub fn store_policy(mut self, store: StorePolicy) -> Self {
        self.store = store;
        self
    }

    /// Apply all corrections
    ///
    /// Fields are public, so the range is normalized here as well.
    pub fn sanitized(self) -> Self {
        Self {
            capacity: sanitize_capacity(self.kind, self.extreme, self.capacity),
            range: ValueRange::new(self.range.min, self.range.max),
            ..self
        }
    }

    /// Build an engine from this configuration
    pub fn build(self) -> RunningStatistic {
        RunningStatistic::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        for kind in [
            StatisticKind::Median,
            StatisticKind::Average,
            StatisticKind::Minimum,
            StatisticKind::Maximum,
        ] {
            assert_eq!(StatisticKind::from_code(kind.code()), kind);
        }
    }

    #[test]
    fn test_unknown_code_falls_back_to_average() {
        assert_eq!(StatisticKind::from_code(0), StatisticKind::Average);
        assert_eq!(StatisticKind::from_code(3), StatisticKind::Average);
        assert_eq!(StatisticKind::from_code(255), StatisticKind::Average);
    }

    #[test]
    fn test_median_capacity_is_odd() {
        for requested in 0..20 {
            let cap = sanitize_capacity(StatisticKind::Median, ExtremePolicy::Windowed, requested);
            assert_eq!(cap % 2, 1, "requested {} gave {}", requested, cap);
            assert!((BUFFER_MIN..=BUFFER_MAX).contains(&cap));
        }
        assert_eq!(sanitize_capacity(StatisticKind::Median, ExtremePolicy::Windowed, 4), 5);
        assert_eq!(sanitize_capacity(StatisticKind::Median, ExtremePolicy::Windowed, 12), 11);
    }

    #[test]
    fn test_capacity_clamped() {
        let w = ExtremePolicy::Windowed;
        assert_eq!(sanitize_capacity(StatisticKind::Average, w, 0), 3);
        assert_eq!(sanitize_capacity(StatisticKind::Average, w, 2), 3);
        assert_eq!(sanitize_capacity(StatisticKind::Average, w, 4), 4);
        assert_eq!(sanitize_capacity(StatisticKind::Minimum, w, 50), 11);
        assert_eq!(sanitize_capacity(StatisticKind::Maximum, w, usize::MAX), 11);
    }

    #[test]
    fn test_unbounded_extreme_single_slot() {
        let u = ExtremePolicy::Unbounded;
        assert_eq!(sanitize_capacity(StatisticKind::Minimum, u, 7), 1);
        assert_eq!(sanitize_capacity(StatisticKind::Maximum, u, 7), 1);
        // Not an extreme, policy ignored
        assert_eq!(sanitize_capacity(StatisticKind::Average, u, 7), 7);
        assert_eq!(sanitize_capacity(StatisticKind::Median, u, 7), 7);
    }

    #[test]
    fn test_range_swap() {
        let range = ValueRange::new(900, 100);
        assert_eq!(range.min(), 100);
        assert_eq!(range.max(), 900);

        assert!(range.contains(100));
        assert!(range.contains(900));
        assert!(!range.contains(99));
        assert!(!range.contains(901));
    }

    #[test]
    fn test_full_range() {
        let range = ValueRange::default();
        assert!(range.contains(VALUE_MIN));
        assert!(range.contains(VALUE_MAX));
    }

    #[test]
    fn test_builder() {
        let cfg = Config::from_code(8)
            .capacity(20)
            .range(50, 10)
            .store_policy(StorePolicy::Cascade)
            .sanitized();

        assert_eq!(cfg.kind, StatisticKind::Maximum);
        assert_eq!(cfg.capacity, BUFFER_MAX);
        assert_eq!(cfg.range, ValueRange::new(10, 50));
        assert_eq!(cfg.extreme, ExtremePolicy::Windowed);
        assert_eq!(cfg.store, StorePolicy::Cascade);
    }

    #[test]
    fn test_sanitized_is_stable() {
        let cfg = Config::new(StatisticKind::Median).capacity(6).sanitized();
        assert_eq!(cfg, cfg.sanitized());
    }
}
