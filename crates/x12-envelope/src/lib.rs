//! X12 envelope codec: ISA/GS/ST framing for 837-style claim messages.
//!
//! This crate turns a flat sequence of X12 segment lines into a transmittable
//! interchange, and parses interchanges back into their parts.
//!
//! # Overview
//!
//! Encoding happens in three layers:
//! - **Chunking**: segment lines are split into transaction sets, each closed
//!   by its SE trailer
//! - **Functional group**: the sets are wrapped in a GS/GE pair
//! - **Interchange**: the group is wrapped in a fixed-width ISA header and an
//!   IEA trailer
//!
//! Trailer counts are always derived from the enclosed content, and header
//! dates and times come from an injected [`Clock`].
//!
//! # Quick Start
//!
//! ```rust
//! use x12_envelope::{
//!     decode_interchange, wrap_segments, ControlNumber, EncodeOptions, EnvelopeBuilder,
//!     FixedClock,
//! };
//!
//! let config = EnvelopeBuilder::new("ABC", "XYZ")
//!     .control_number(ControlNumber::new(1).unwrap())
//!     .functional_id_code("HC")
//!     .version("005010X", "222", "A1")
//!     .build()
//!     .unwrap();
//! let clock = FixedClock::at(2024, 1, 15, 9, 30).unwrap();
//!
//! let lines = ["ST*837*0001*005010X222A1~", "BHT*0019*00*1*20240115*0930*CH~", "SE*3*0001~"];
//! let text = wrap_segments(lines, &config, &clock, EncodeOptions::new()).unwrap();
//! assert!(text.ends_with("GE*1*1~\nIEA*1*000000001~\n"));
//!
//! let interchange = decode_interchange(&text).unwrap();
//! assert_eq!(interchange.header.sender_id, "ABC");
//! assert_eq!(interchange.transaction_sets().len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Envelope types (Segment, TransactionSet, FunctionalGroup, Interchange)
//! - [`codec`]: Chunking, encoding and decoding
//! - [`validate`]: Opt-in ST/SE content checks
//! - [`util`]: Clocks and date formats
//! - [`error`]: Error types
//! - [`limits`]: Field widths and decoder limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Document size, segment count and segment length are bounded
//! - Fixed-width ISA fields are checked before any delimiter is trusted
//! - Trailer counts and control numbers are verified against their headers
//!
//! The encoder applies the same size and segment bounds to its output, so
//! anything it writes can be decoded again.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    chunk_transaction_sets, decode_functional_group, decode_interchange, encode_functional_group,
    encode_interchange, encode_interchange_with_options, wrap_in_functional_group,
    wrap_in_interchange, wrap_segments, EncodeOptions, Layout,
};
pub use error::{DecodeError, EncodeError, ErrorKind, ValidationError, ValueError};
pub use model::{
    ControlNumber, Delimiters, EnvelopeBuilder, EnvelopeConfig, FunctionalGroup, GroupHeader,
    GroupParams, Interchange, InterchangeHeader, InterchangeParams, Segment, TransactionSet,
    UsageIndicator,
};
pub use util::{Clock, FixedClock, SystemClock, UtcClock};
pub use validate::{functional_id_for, validate_interchange, validate_transaction_set};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
