//! Control numbers pairing headers with their trailers.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::limits::{CONTROL_NUMBER_WIDTH, MAX_CONTROL_NUMBER};

/// A numeric control number of at most nine digits.
///
/// `Display` renders the zero-filled nine-digit form used by ISA13, IEA02
/// and GS06. Uniqueness across interchanges is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ControlNumber(u32);

impl ControlNumber {
    /// Creates a control number, rejecting values wider than nine digits.
    pub fn new(value: u32) -> Result<Self, ValueError> {
        if value > MAX_CONTROL_NUMBER {
            return Err(ValueError::InvalidControlNumber {
                value: value.to_string(),
                reason: "exceeds nine digits",
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the zero-filled nine-digit form.
    pub fn padded(self) -> String {
        format!("{:0width$}", self.0, width = CONTROL_NUMBER_WIDTH)
    }

    /// Returns the minimal numeric form, without leading zeros.
    pub fn minimal(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ControlNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = CONTROL_NUMBER_WIDTH)
    }
}

impl FromStr for ControlNumber {
    type Err = ValueError;

    /// Parses one to nine ASCII digits. Leading zeros are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ValueError::InvalidControlNumber {
            value: s.to_string(),
            reason,
        };
        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.len() > CONTROL_NUMBER_WIDTH {
            return Err(invalid("exceeds nine digits"));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("not numeric"));
        }
        // At most nine digits always fits in u32.
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| invalid("not numeric"))
    }
}

impl TryFrom<u32> for ControlNumber {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
