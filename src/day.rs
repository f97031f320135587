//! Calendar days and the clock that decides which one is "today"

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::{fmt, str::FromStr};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// One tracking period, rendered canonically as `YYYY-MM-DD`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    #[cfg(test)]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = anyhow::Error;

    /// Only the canonical zero-padded form is accepted, so two spellings never alias one day.
    fn from_str(s: &str) -> Result<Self> {
        let day = NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|e| anyhow!("Invalid day key `{}`: {}", s, e))?;
        if day.to_string() != s {
            return Err(anyhow!("Day key `{}` is not written as `{}`", s, day));
        }
        Ok(day)
    }
}

/// Source of the current day.  Injected so that tests can pin "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> DayKey;
}

/// The host process's local calendar date
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> DayKey {
        DayKey(chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
pub use fixed::FixedClock;

#[cfg(test)]
mod fixed {
    use super::*;
    use std::sync::Mutex;

    /// Clock stuck on a given day until told otherwise
    pub struct FixedClock(Mutex<DayKey>);

    impl FixedClock {
        pub fn new(day: &str) -> Self {
            Self(Mutex::new(day.parse().unwrap()))
        }

        pub fn set(&self, day: &str) {
            *self.0.lock().unwrap() = day.parse().unwrap();
        }
    }

    impl Clock for FixedClock {
        fn today(&self) -> DayKey {
            *self.0.lock().unwrap()
        }
    }
}
