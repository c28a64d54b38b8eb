//! # Runstats
//!
//! Running statistics over a short window of sensor readings, for small
//! devices that sample the same sensor again and again.
//!
//! An engine keeps the most recent readings (3 to 11 of them) in a fixed
//! array and recomputes one statistic on every new reading. Nothing is
//! allocated and every operation is bounded by the window length.
//!
//! ## Features
//!
//! - **Median**: lower median of the window, robust against spikes
//! - **Average**: arithmetic mean rounded up
//! - **Minimum / Maximum**: over the window, or since the last reset
//! - **Valid range**: readings outside it are refused without touching state
//! - **Forgiving construction**: bad settings are corrected, never refused
//!
//! ## Quick Start
//!
//! ```rust
//! use runstats::prelude::*;
//!
//! let mut median = RunningStatistic::new(StatisticKind::Median, 5);
//! for reading in [512, 515, 1023, 514, 513] {
//!     let smoothed = median.get_statistic(reading);
//!     println!("reading {} -> {}", reading, smoothed);
//! }
//! assert_eq!(median.get_statistic(516), 515);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use runstats::config::{Config, ExtremePolicy, StatisticKind};
//!
//! let mut peak = Config::new(StatisticKind::Maximum)
//!     .range(0, 4095)
//!     .extreme_policy(ExtremePolicy::Unbounded)
//!     .build();
//!
//! peak.get_statistic(1200);
//! peak.get_statistic(300);
//! assert_eq!(peak.current(), Some(1200));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): `std::error::Error` for error types; without it the
//!   crate is `no_std`
//! - `serde`: serialization of configuration types
//! - `log`: diagnostic messages through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    }};
}

// Core traits always available
pub mod traits;

pub mod config;
pub mod engine;
pub mod window;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::config::{Config, ExtremePolicy, StatisticKind, StorePolicy, ValueRange, NAN};
    pub use crate::engine::RunningStatistic;
}

pub use config::{Config, ExtremePolicy, StatisticKind, StorePolicy, ValueRange, NAN};
pub use engine::RunningStatistic;
pub use traits::{RejectError, RunningSketch};
