//! Running statistic engine
//!
//! Keeps a short history of readings from one sensor and recomputes one
//! statistic over it on every new reading.

use crate::config::{
    Config, ExtremePolicy, StatisticKind, StorePolicy, ValueRange, BUFFER_MAX, NAN, VALUE_MAX,
    VALUE_MIN,
};
use crate::traits::{RejectError, RunningSketch};
use crate::window::Window;

/// Running median, average, minimum or maximum of recent readings
///
/// One instance serves one statistic of one data stream. Requested settings
/// are corrected rather than refused, so construction always succeeds; the
/// getters report what is actually in effect.
///
/// # Example
///
/// ```
/// use runstats::{RunningStatistic, StatisticKind};
///
/// let mut median = RunningStatistic::new(StatisticKind::Median, 3);
///
/// assert_eq!(median.get_statistic(5), 5);
/// assert_eq!(median.get_statistic(1), 1);
/// assert_eq!(median.get_statistic(3), 3);
/// assert_eq!(median.readings(), 3);
/// ```
///
/// # Rejected readings
///
/// ```
/// use runstats::{RunningStatistic, StatisticKind, NAN};
///
/// let mut avg = RunningStatistic::with_range(StatisticKind::Average, 5, 100, 900);
///
/// assert_eq!(avg.get_statistic(50), NAN);
/// assert_eq!(avg.readings(), 0);
/// assert!(avg.try_statistic(1000).is_err());
/// assert_eq!(avg.try_statistic(300), Ok(300));
/// ```
#[derive(Clone, Debug)]
pub struct RunningStatistic {
    /// Effective configuration
    config: Config,
    /// Recent readings, newest first
    window: Window,
    /// Sorting area for the median
    scratch: [u16; BUFFER_MAX],
}

impl Default for RunningStatistic {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl RunningStatistic {
    /// Create an engine accepting the full reading domain
    pub fn new(kind: StatisticKind, capacity: usize) -> Self {
        Config::new(kind).capacity(capacity).build()
    }

    /// Create an engine accepting only readings within `[value_min, value_max]`
    ///
    /// Reversed bounds are swapped.
    pub fn with_range(kind: StatisticKind, capacity: usize, value_min: u16, value_max: u16) -> Self {
        Config::new(kind)
            .capacity(capacity)
            .range(value_min, value_max)
            .build()
    }

    /// Create an engine from a legacy statistic code
    ///
    /// Unknown codes give an average.
    pub fn from_code(code: u8, capacity: usize) -> Self {
        Config::from_code(code).capacity(capacity).build()
    }

    /// Create an engine from a configuration, correcting it as needed
    pub fn from_config(config: Config) -> Self {
        let config = config.sanitized();
        let mut engine = Self {
            config,
            window: Window::new(config.capacity),
            scratch: [0; BUFFER_MAX],
        };
        engine.init();
        engine
    }

    /// Forget all readings, keeping the configuration
    pub fn init(&mut self) {
        self.window.clear();
        debug!(
            "{:?} engine reset, window {}",
            self.config.kind, self.config.capacity
        );
    }

    /// Register a reading and return the new statistic
    ///
    /// Returns [`NAN`] and leaves the history untouched if the reading is
    /// outside the valid range. Since [`NAN`] is itself a legal reading,
    /// use [`try_statistic`](Self::try_statistic) when the range includes it.
    pub fn get_statistic(&mut self, value: u16) -> u16 {
        self.try_statistic(value).unwrap_or(NAN)
    }

    /// Register a reading and return the new statistic, or why it was refused
    pub fn try_statistic(&mut self, value: u16) -> Result<u16, RejectError> {
        let range = self.config.range;
        if !range.contains(value) {
            trace!(
                "reading {} rejected, valid range [{}, {}]",
                value,
                range.min(),
                range.max()
            );
            return Err(RejectError::OutOfRange {
                value,
                min: range.min(),
                max: range.max(),
            });
        }

        let statistic = if self.is_unbounded_extreme() {
            self.fold_extreme(value)
        } else {
            self.window.push(value);
            self.compute()
        };

        if self.config.store == StorePolicy::Cascade {
            self.window.set_front(statistic);
        }
        Ok(statistic)
    }

    /// Statistic over the current window
    fn compute(&mut self) -> u16 {
        let statistic = match self.config.kind {
            StatisticKind::Median => self.window.lower_median(&mut self.scratch),
            StatisticKind::Average => self.window.mean_ceil(),
            StatisticKind::Minimum => self.window.min(),
            StatisticKind::Maximum => self.window.max(),
        };
        // Only called right after a push
        statistic.unwrap_or(NAN)
    }

    /// Combine a reading with the best value so far in the single slot
    fn fold_extreme(&mut self, value: u16) -> u16 {
        let best = match self.window.front() {
            None => value,
            Some(prev) if self.config.kind == StatisticKind::Minimum => prev.min(value),
            Some(prev) => prev.max(value),
        };
        self.window.push(best);
        best
    }

    fn is_unbounded_extreme(&self) -> bool {
        self.config.kind.is_extreme() && self.config.extreme == ExtremePolicy::Unbounded
    }

    /// Front slot of the history: the latest reading, or the latest
    /// statistic when it is stored back
    pub fn current(&self) -> Option<u16> {
        self.window.front()
    }

    /// Valid history entries, newest first
    pub fn history(&self) -> &[u16] {
        self.window.as_slice()
    }

    /// Effective window length
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of readings in the window
    pub fn readings(&self) -> usize {
        self.window.len()
    }

    /// Check if no reading is retained
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Check if the window is saturated
    pub fn is_full(&self) -> bool {
        self.window.len() == self.config.capacity
    }

    /// Effective statistic
    pub fn kind(&self) -> StatisticKind {
        self.config.kind
    }

    /// Lower bound of valid readings
    pub fn value_min(&self) -> u16 {
        self.config.range.min()
    }

    /// Upper bound of valid readings
    pub fn value_max(&self) -> u16 {
        self.config.range.max()
    }

    /// Valid reading range
    pub fn range(&self) -> ValueRange {
        self.config.range
    }

    /// Minimum/maximum policy
    pub fn extreme_policy(&self) -> ExtremePolicy {
        self.config.extreme
    }

    /// History store policy
    pub fn store_policy(&self) -> StorePolicy {
        self.config.store
    }

    /// Effective configuration
    pub fn config(&self) -> Config {
        self.config
    }

    /// Whether every reading is accepted
    pub fn accepts_all(&self) -> bool {
        self.value_min() == VALUE_MIN && self.value_max() == VALUE_MAX
    }
}

impl RunningSketch for RunningStatistic {
    type Value = u16;

    fn update(&mut self, value: u16) -> Result<u16, RejectError> {
        self.try_statistic(value)
    }

    fn clear(&mut self) {
        self.init();
    }

    fn readings(&self) -> usize {
        self.window.len()
    }

    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}
