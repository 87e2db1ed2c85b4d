//! # My Plants Testing
//!
//! Test helpers shared by the workspace:
//! - [`FixedClock`] / [`test_clock`] for deterministic timestamps
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - [`assertions`] over returned effects


pub use reducer_test::{assertions, ReducerTest};

use chrono::{DateTime, TimeZone, Utc};
use my_plants_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, TimeZone, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use my_plants_testing::mocks::FixedClock;
    /// use my_plants_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Fixed clock at 2025-01-01 08:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

pub use mocks::{test_clock, FixedClock};
