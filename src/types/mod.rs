//! Core data types for the countdown clock.
//!
//! This module defines the data structures used for:
//! - `MM:SS` durations and their parsing
//! - The clock phase (counting down or counting up)
//! - Interval/delay configuration with validation against the cue length

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FormatError
// ============================================================================

/// Errors raised while parsing an `MM:SS` duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The text does not contain exactly two fields separated by `:`.
    #[error("'{0}' is not in MM:SS form")]
    FieldCount(String),

    /// One of the fields is not a non-negative integer.
    #[error("'{field}' in '{input}' is not a valid non-negative number")]
    InvalidNumber {
        /// The full input text
        input: String,
        /// The offending field
        field: String,
    },
}

// ============================================================================
// TimeDuration
// ============================================================================

/// A span of time expressed as minutes and seconds.
///
/// `seconds` is not forced into `0..60`; a parsed value such as `01:75` keeps
/// its 75 seconds until [`TimeDuration::normalized`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeDuration {
    minutes: u32,
    seconds: u32,
}

impl TimeDuration {
    /// Creates a duration from explicit fields.
    #[must_use]
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Creates a duration from a total number of seconds.
    #[must_use]
    pub const fn from_total_seconds(total: u32) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    /// Parses an `MM:SS` string.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the text is not exactly two non-negative
    /// integers separated by a colon.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let tokens: Vec<&str> = text.split(':').collect();
        let [minutes, seconds] = tokens.as_slice() else {
            return Err(FormatError::FieldCount(text.to_string()));
        };

        Ok(Self {
            minutes: parse_field(text, minutes)?,
            seconds: parse_field(text, seconds)?,
        })
    }

    /// Returns the minutes field.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the seconds field.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Returns `60 * minutes + seconds`.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        60 * self.minutes as u64 + self.seconds as u64
    }

    /// Resets an out-of-range seconds field (60 or more) to zero.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.seconds >= 60 {
            Self {
                minutes: self.minutes,
                seconds: 0,
            }
        } else {
            self
        }
    }
}

fn parse_field(input: &str, field: &str) -> Result<u32, FormatError> {
    let invalid = || FormatError::InvalidNumber {
        input: input.to_string(),
        field: field.to_string(),
    };

    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    field.parse().map_err(|_| invalid())
}

impl fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for TimeDuration {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeDuration {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeDuration> for String {
    fn from(value: TimeDuration) -> Self {
        value.to_string()
    }
}

// ============================================================================
// ClockPhase
// ============================================================================

/// Direction in which the clock is currently displaying time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Counting down towards the end of the delay
    #[default]
    CountingDown,
    /// Counting up since the delay elapsed
    CountingUp,
}

impl ClockPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockPhase::CountingDown => "counting_down",
            ClockPhase::CountingUp => "counting_up",
        }
    }
}

impl fmt::Display for ClockPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ClockConfig
// ============================================================================

/// Names the configuration field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Interval,
    Delay,
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationField::Interval => f.write_str("Interval"),
            DurationField::Delay => f.write_str("Delay"),
        }
    }
}

/// Errors raised while validating a [`ClockConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A duration is shorter than the audio cue.
    #[error("{field} must be at least {minimum_seconds} seconds!")]
    TooShort {
        field: DurationField,
        minimum_seconds: u64,
    },
}

/// Returns the shortest interval/delay allowed for a cue of the given length.
///
/// The cue length is rounded down to whole seconds and one second is added,
/// so a 1000 ms cue requires at least 2 seconds.
#[must_use]
pub const fn minimum_seconds_for_cue(cue_duration_ms: u64) -> u64 {
    cue_duration_ms / 1000 + 1
}

/// Interval and delay for one clock run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Time between two audio cues
    pub interval: TimeDuration,
    /// Time counted down before the first cue completes
    pub delay: TimeDuration,
}

impl ClockConfig {
    /// Creates a new configuration.
    pub fn new(interval: TimeDuration, delay: TimeDuration) -> Self {
        Self { interval, delay }
    }

    /// Creates the configuration pre-filled for a cue: both fields set to
    /// the minimum allowed duration.
    pub fn for_cue(cue_duration_ms: u64) -> Self {
        let minimum = u32::try_from(minimum_seconds_for_cue(cue_duration_ms)).unwrap_or(u32::MAX);
        let duration = TimeDuration::from_total_seconds(minimum);
        Self::new(duration, duration)
    }

    /// Validates both durations against the cue length.
    ///
    /// Only a zero minutes field is checked, matching the settings form:
    /// any duration of a minute or more is long enough for the cue.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooShort`] naming the first offending field.
    pub fn validate(&self, cue_duration_ms: u64) -> Result<(), ConfigError> {
        let minimum_seconds = minimum_seconds_for_cue(cue_duration_ms);

        for (field, duration) in [
            (DurationField::Interval, self.interval),
            (DurationField::Delay, self.delay),
        ] {
            if duration.minutes() == 0 && u64::from(duration.seconds()) < minimum_seconds {
                return Err(ConfigError::TooShort {
                    field,
                    minimum_seconds,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimeDuration Tests
    // ------------------------------------------------------------------------

    mod time_duration_tests {
        use super::*;

        #[test]
        fn test_parse_total_seconds() {
            assert_eq!(TimeDuration::parse("00:05").unwrap().total_seconds(), 5);
            assert_eq!(TimeDuration::parse("02:30").unwrap().total_seconds(), 150);
            assert_eq!(TimeDuration::parse("10:00").unwrap().total_seconds(), 600);
        }

        #[test]
        fn test_parse_keeps_fields() {
            let duration = TimeDuration::parse("03:07").unwrap();
            assert_eq!(duration.minutes(), 3);
            assert_eq!(duration.seconds(), 7);
        }

        #[test]
        fn test_parse_seconds_above_59_not_normalized() {
            let duration = TimeDuration::parse("01:75").unwrap();
            assert_eq!(duration.seconds(), 75);
            assert_eq!(duration.total_seconds(), 135);
        }

        #[test]
        fn test_parse_missing_separator() {
            let err = TimeDuration::parse("0005").unwrap_err();
            assert_eq!(err, FormatError::FieldCount("0005".to_string()));
        }

        #[test]
        fn test_parse_too_many_fields() {
            assert!(matches!(
                TimeDuration::parse("00:05:00"),
                Err(FormatError::FieldCount(_))
            ));
        }

        #[test]
        fn test_parse_rejects_non_numeric() {
            for input in ["ab:05", "00:x5", ":05", "00:", "-1:05", "+1:05", " 1:05"] {
                assert!(
                    matches!(
                        TimeDuration::parse(input),
                        Err(FormatError::InvalidNumber { .. })
                    ),
                    "expected InvalidNumber for {:?}",
                    input
                );
            }
        }

        #[test]
        fn test_parse_rejects_overflow() {
            let err = TimeDuration::parse("99999999999:00").unwrap_err();
            assert!(err.to_string().contains("99999999999"));
        }

        #[test]
        fn test_from_str() {
            let duration: TimeDuration = "12:34".parse().unwrap();
            assert_eq!(duration, TimeDuration::new(12, 34));
        }

        #[test]
        fn test_display_zero_padded() {
            assert_eq!(TimeDuration::new(0, 5).to_string(), "00:05");
            assert_eq!(TimeDuration::new(12, 0).to_string(), "12:00");
            assert_eq!(TimeDuration::new(120, 9).to_string(), "120:09");
        }

        #[test]
        fn test_from_total_seconds() {
            assert_eq!(TimeDuration::from_total_seconds(150), TimeDuration::new(2, 30));
            assert_eq!(TimeDuration::from_total_seconds(2), TimeDuration::new(0, 2));
        }

        #[test]
        fn test_normalized() {
            assert_eq!(TimeDuration::new(4, 60).normalized(), TimeDuration::new(4, 0));
            assert_eq!(TimeDuration::new(4, 99).normalized(), TimeDuration::new(4, 0));
            assert_eq!(TimeDuration::new(4, 59).normalized(), TimeDuration::new(4, 59));
        }

        #[test]
        fn test_serde_as_string() {
            let json = serde_json::to_string(&TimeDuration::new(1, 5)).unwrap();
            assert_eq!(json, "\"01:05\"");

            let parsed: TimeDuration = serde_json::from_str("\"02:30\"").unwrap();
            assert_eq!(parsed.total_seconds(), 150);

            assert!(serde_json::from_str::<TimeDuration>("\"2m30s\"").is_err());
        }
    }

    // ------------------------------------------------------------------------
    // ClockPhase Tests
    // ------------------------------------------------------------------------

    mod clock_phase_tests {
        use super::*;

        #[test]
        fn test_default_is_counting_down() {
            assert_eq!(ClockPhase::default(), ClockPhase::CountingDown);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(ClockPhase::CountingDown.as_str(), "counting_down");
            assert_eq!(ClockPhase::CountingUp.to_string(), "counting_up");
        }
    }

    // ------------------------------------------------------------------------
    // ClockConfig Tests
    // ------------------------------------------------------------------------

    mod clock_config_tests {
        use super::*;

        #[test]
        fn test_minimum_seconds_for_cue() {
            assert_eq!(minimum_seconds_for_cue(0), 1);
            assert_eq!(minimum_seconds_for_cue(999), 1);
            assert_eq!(minimum_seconds_for_cue(1000), 2);
            assert_eq!(minimum_seconds_for_cue(2500), 3);
        }

        #[test]
        fn test_for_cue_prefills_minimum() {
            let config = ClockConfig::for_cue(1000);
            assert_eq!(config.interval.to_string(), "00:02");
            assert_eq!(config.delay.to_string(), "00:02");
            assert!(config.validate(1000).is_ok());
        }

        #[test]
        fn test_validate_interval_too_short() {
            let config = ClockConfig::new(TimeDuration::new(0, 1), TimeDuration::new(0, 5));
            let err = config.validate(1000).unwrap_err();
            assert_eq!(
                err,
                ConfigError::TooShort {
                    field: DurationField::Interval,
                    minimum_seconds: 2
                }
            );
            assert_eq!(err.to_string(), "Interval must be at least 2 seconds!");
        }

        #[test]
        fn test_validate_delay_too_short() {
            let config = ClockConfig::new(TimeDuration::new(0, 10), TimeDuration::new(0, 0));
            let err = config.validate(1000).unwrap_err();
            assert_eq!(err.to_string(), "Delay must be at least 2 seconds!");
        }

        #[test]
        fn test_validate_interval_reported_first() {
            let config = ClockConfig::new(TimeDuration::new(0, 0), TimeDuration::new(0, 0));
            assert!(matches!(
                config.validate(1000),
                Err(ConfigError::TooShort {
                    field: DurationField::Interval,
                    ..
                })
            ));
        }

        #[test]
        fn test_validate_ignores_seconds_when_minutes_set() {
            let config = ClockConfig::new(TimeDuration::new(1, 0), TimeDuration::new(1, 0));
            assert!(config.validate(5000).is_ok());
        }

        #[test]
        fn test_config_serialization() {
            let config = ClockConfig::new(TimeDuration::new(0, 10), TimeDuration::new(0, 5));
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(json, r#"{"interval":"00:10","delay":"00:05"}"#);
            let back: ClockConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(back, config);
        }
    }
}
