//! Data model types for X12 envelopes.
//!
//! This module contains the value types the codec produces and consumes:
//! - Delimiters and segments
//! - Control numbers
//! - Transaction sets, functional groups and interchanges
//! - Field width and padding rules
//! - Builders (envelope configuration)

pub mod builder;
pub mod control;
pub mod delimiters;
pub mod envelope;
pub mod field;
pub mod segment;

pub use builder::{EnvelopeBuilder, EnvelopeConfig, GroupParams, InterchangeParams};
pub use control::ControlNumber;
pub use delimiters::Delimiters;
pub use envelope::{
    FunctionalGroup, GroupHeader, Interchange, InterchangeHeader, TransactionSet, UsageIndicator,
};
pub use segment::Segment;
