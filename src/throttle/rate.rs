//! Throttle rate value object.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors produced when parsing a throttle rate string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateParseError {
    /// Rate string has no '/' separating count from period
    #[error("Rate '{0}' is missing a '/' separator")]
    MissingSeparator(String),

    /// The request count is not a valid number
    #[error("Invalid request count in rate '{0}'")]
    InvalidCount(String),

    /// The period is empty or starts with an unrecognized letter
    #[error("Unknown period in rate '{0}' (expected s, m, h, or d)")]
    UnknownPeriod(String),
}

/// A parsed throttle rate: how many requests are allowed per window.
///
/// Rates are written as `"<count>/<period>"`, where only the first
/// letter of the period matters: `s`econd, `m`inute, `h`our, or `d`ay.
/// `"100/min"`, `"100/minute"`, and `"100/m"` all mean the same thing.
///
/// # Example
///
/// ```
/// use openlearn_testkit::throttle::ThrottleRate;
/// use std::time::Duration;
///
/// let rate = ThrottleRate::parse("100/min").unwrap();
/// assert_eq!(rate.num_requests, 100);
/// assert_eq!(rate.window, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRate {
    /// Maximum number of requests allowed inside one window
    pub num_requests: u32,

    /// Length of the sliding window
    pub window: Duration,
}

impl ThrottleRate {
    /// Create a rate directly from a count and window.
    pub fn new(num_requests: u32, window: Duration) -> Self {
        Self {
            num_requests,
            window,
        }
    }

    /// Parse a `"<count>/<period>"` rate string.
    ///
    /// # Errors
    ///
    /// Returns a [`RateParseError`] when the separator is missing, the
    /// count is not a number, or the period does not start with one of
    /// `s`, `m`, `h`, `d`.
    pub fn parse(rate: &str) -> Result<Self, RateParseError> {
        let (count, period) = rate
            .split_once('/')
            .ok_or_else(|| RateParseError::MissingSeparator(rate.to_string()))?;

        let num_requests: u32 = count
            .trim()
            .parse()
            .map_err(|_| RateParseError::InvalidCount(rate.to_string()))?;

        let window_secs = match period.trim().chars().next() {
            Some('s') => 1,
            Some('m') => 60,
            Some('h') => 3_600,
            Some('d') => 86_400,
            _ => return Err(RateParseError::UnknownPeriod(rate.to_string())),
        };

        Ok(Self {
            num_requests,
            window: Duration::from_secs(window_secs),
        })
    }
}

impl FromStr for ThrottleRate {
    type Err = RateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ThrottleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}s", self.num_requests, self.window.as_secs())
    }
}
