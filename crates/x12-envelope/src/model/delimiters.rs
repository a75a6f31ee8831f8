//! Delimiter set declared by an interchange.

use crate::error::ValueError;

/// The four delimiters an ISA header declares.
///
/// X12 lets every interchange choose its own delimiters; the decoder reads
/// them from the ISA segment rather than assuming the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Delimiters {
    /// Separates elements within a segment.
    pub element: char,
    /// Terminates each segment.
    pub segment: char,
    /// Separates components of a composite element (ISA16).
    pub component: char,
    /// Separates repeated elements (ISA11).
    pub repetition: char,
}

impl Delimiters {
    /// The conventional `*`, `~`, `:` and `^` delimiters.
    pub const X12_DEFAULT: Delimiters = Delimiters {
        element: '*',
        segment: '~',
        component: ':',
        repetition: '^',
    };

    /// Creates a validated delimiter set.
    pub fn new(
        element: char,
        segment: char,
        component: char,
        repetition: char,
    ) -> Result<Self, ValueError> {
        let delimiters = Self {
            element,
            segment,
            component,
            repetition,
        };
        delimiters.validate()?;
        Ok(delimiters)
    }

    /// Checks that every delimiter is printable punctuation and that no two
    /// roles share a character.
    pub fn validate(&self) -> Result<(), ValueError> {
        let roles = self.roles();
        for (role, ch) in roles {
            if !ch.is_ascii_graphic() || ch.is_ascii_alphanumeric() {
                return Err(ValueError::InvalidDelimiter { role, ch });
            }
        }
        for (i, (_, a)) in roles.iter().enumerate() {
            if roles[i + 1..].iter().any(|(_, b)| a == b) {
                return Err(ValueError::DuplicateDelimiter { ch: *a });
            }
        }
        Ok(())
    }

    /// Returns true if `ch` is one of the four delimiters.
    pub fn contains(&self, ch: char) -> bool {
        ch == self.element || ch == self.segment || ch == self.component || ch == self.repetition
    }

    fn roles(&self) -> [(&'static str, char); 4] {
        [
            ("element", self.element),
            ("segment", self.segment),
            ("component", self.component),
            ("repetition", self.repetition),
        ]
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::X12_DEFAULT
    }
}
