//! Error types for X12 envelope encoding, decoding and validation.

use thiserror::Error;

use crate::model::ControlNumber;

/// Error categories shared by the encoder and the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// E001: Missing, misplaced or truncated segments
    Structural,
    /// E002: Trailer count or control number disagrees with its header
    InvariantViolation,
    /// E003: A caller-supplied value does not fit its field
    Value,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "E001",
            ErrorKind::InvariantViolation => "E002",
            ErrorKind::Value => "E003",
        }
    }
}

/// A value that cannot be placed in its envelope field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("[E003] invalid control number {value:?}: {reason}")]
    InvalidControlNumber { value: String, reason: &'static str },

    #[error("[E003] {field} length {len} exceeds maximum {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E003] {field} length {len} is below minimum {min}")]
    FieldTooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("[E003] {field} contains invalid character {ch:?}")]
    InvalidCharacter { field: &'static str, ch: char },

    #[error("[E003] {field} contains delimiter {ch:?}")]
    ContainsDelimiter { field: &'static str, ch: char },

    #[error("[E003] {role} delimiter {ch:?} must be printable, non-alphanumeric ASCII")]
    InvalidDelimiter { role: &'static str, ch: char },

    #[error("[E003] delimiter {ch:?} is used for more than one role")]
    DuplicateDelimiter { ch: char },

    #[error("[E003] {field} year {year} cannot be represented (supported range {min}..={max})")]
    DateOutOfRange {
        field: &'static str,
        year: i32,
        min: i32,
        max: i32,
    },

    #[error("[E003] {field} is required")]
    MissingField { field: &'static str },

    #[error("[E003] invalid {field} value {value:?}")]
    InvalidFieldValue { field: &'static str, value: String },
}

/// Error while building an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[E001] segment sequence contains no transaction set trailer (SE)")]
    NoTransactionSets,

    #[error("[E001] {count} segment(s) after the last SE trailer do not form a complete transaction set")]
    IncompleteTransactionSet { count: usize },

    #[error("[E001] malformed segment at index {index}: {reason}")]
    MalformedSegment { index: usize, reason: &'static str },

    #[error("[E001] envelope segment {tag} at index {index} cannot appear inside a transaction set")]
    ReservedSegment { index: usize, tag: String },

    #[error("[E001] functional group text is empty")]
    EmptyFunctionalGroup,

    #[error("[E001] {field} count {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl EncodeError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Value(_) => ErrorKind::Value,
            _ => ErrorKind::Structural,
        }
    }
}

/// Error while parsing an interchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001: Malformed envelope ===
    #[error("[E001] malformed envelope: {reason}")]
    MalformedEnvelope { reason: &'static str },

    #[error("[E001] malformed {segment}{position:02} value {value:?}: {reason}")]
    MalformedField {
        segment: &'static str,
        position: usize,
        value: String,
        reason: &'static str,
    },

    #[error("[E001] malformed segment at index {index}: {reason}")]
    MalformedSegment { index: usize, reason: &'static str },

    #[error("[E001] expected {expected} segment at index {index}, found {found}")]
    UnexpectedSegment {
        expected: &'static str,
        found: String,
        index: usize,
    },

    #[error("[E001] {count} segment(s) before GE do not end with an SE trailer")]
    IncompleteTransactionSet { count: usize },

    #[error("[E001] functional group contains no transaction sets")]
    EmptyFunctionalGroup,

    #[error("[E001] interchange contains more than one functional group")]
    MultipleFunctionalGroups,

    #[error("[E001] {count} segment(s) after the IEA trailer")]
    TrailingData { count: usize },

    #[error("[E001] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    // === E001: Truncated document ===
    #[error("[E001] unexpected end of input while reading {context}")]
    UnexpectedEnd { context: &'static str },

    // === E002: Invariant violations ===
    #[error("[E002] {segment} declares {declared} but the envelope contains {actual}")]
    CountMismatch {
        segment: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("[E002] {segment} control number {trailer} does not match header control number {header}")]
    ControlNumberMismatch {
        segment: &'static str,
        header: ControlNumber,
        trailer: ControlNumber,
    },
}

impl DecodeError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::CountMismatch { .. } | DecodeError::ControlNumberMismatch { .. } => {
                ErrorKind::InvariantViolation
            }
            _ => ErrorKind::Structural,
        }
    }

    /// Returns true if the document ended before the envelope was closed.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEnd { .. })
    }
}

/// Error during transaction set validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transaction set {set} does not start with an ST segment (found {found})")]
    MissingHeader { set: usize, found: String },

    #[error("transaction set {set}: {segment} is missing element {position}")]
    MissingElement {
        set: usize,
        segment: &'static str,
        position: usize,
    },

    #[error("transaction set {set}: SE01 declares {declared} segments but the set has {actual}")]
    SegmentCountMismatch {
        set: usize,
        declared: String,
        actual: usize,
    },

    #[error("transaction set {set}: SE02 {trailer:?} does not match ST02 {header:?}")]
    ControlNumberMismatch {
        set: usize,
        header: String,
        trailer: String,
    },

    #[error("transaction set {set}: ST01 {transaction_set_id} belongs in a {expected} group, not {found}")]
    FunctionalIdMismatch {
        set: usize,
        transaction_set_id: String,
        expected: &'static str,
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(EncodeError::NoTransactionSets.kind(), ErrorKind::Structural);
        assert_eq!(
            EncodeError::from(ValueError::MissingField { field: "sender_id" }).kind(),
            ErrorKind::Value
        );
        let mismatch = DecodeError::CountMismatch {
            segment: "GE",
            declared: 2,
            actual: 1,
        };
        assert_eq!(mismatch.kind(), ErrorKind::InvariantViolation);
        assert_eq!(mismatch.kind().code(), "E002");
        assert!(DecodeError::UnexpectedEnd { context: "GE" }.is_truncated());
        assert!(!mismatch.is_truncated());
    }

    #[test]
    fn test_messages_carry_codes() {
        let err = EncodeError::from(ValueError::FieldTooLong {
            field: "ISA06",
            len: 16,
            max: 15,
        });
        assert_eq!(err.to_string(), "[E003] ISA06 length 16 exceeds maximum 15");

        let err = DecodeError::MalformedField {
            segment: "ISA",
            position: 9,
            value: "2401".to_string(),
            reason: "expected YYMMDD",
        };
        assert!(err.to_string().starts_with("[E001] malformed ISA09"));
    }
}
