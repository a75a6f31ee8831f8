//! Field widths, fixed envelope values and security limits.
//!
//! The decoder enforces the size limits before allocating for untrusted input.

/// Total length of an ISA segment including its terminator.
pub const ISA_LENGTH: usize = 106;

/// Offset of the element separator inside the ISA segment.
pub const ISA_ELEMENT_OFFSET: usize = 3;

/// Offset of the component separator (ISA16) inside the ISA segment.
pub const ISA_COMPONENT_OFFSET: usize = 104;

/// Offset of the segment terminator inside the ISA segment.
pub const ISA_TERMINATOR_OFFSET: usize = 105;

/// Width of ISA06/ISA08 interchange ids.
pub const ID_WIDTH: usize = 15;

/// Width of ISA02/ISA04 authorization and security information.
pub const AUTHORIZATION_WIDTH: usize = 10;

/// Width of a zero-filled control number.
pub const CONTROL_NUMBER_WIDTH: usize = 9;

/// Largest control number that fits [`CONTROL_NUMBER_WIDTH`] digits.
pub const MAX_CONTROL_NUMBER: u32 = 999_999_999;

/// Minimum length of GS02/GS03 application ids.
pub const MIN_APPLICATION_ID_LEN: usize = 2;

/// Maximum length of GS02/GS03 application ids.
pub const MAX_APPLICATION_ID_LEN: usize = 15;

/// Maximum length of the GS08 version/release/industry identifier.
pub const MAX_GROUP_VERSION_LEN: usize = 12;

/// ISA12 interchange control version implemented by this crate.
pub const ISA_VERSION: &str = "00501";

/// GS07 responsible agency code (Accredited Standards Committee X12).
pub const RESPONSIBLE_AGENCY: &str = "X";

/// ISA05/ISA07 mutually defined id qualifier.
pub const MUTUALLY_DEFINED_QUALIFIER: &str = "ZZ";

/// ISA01/ISA03 "no information present" qualifier.
pub const NO_INFORMATION_QUALIFIER: &str = "00";

/// Earliest year an ISA09 two-digit year maps to.
pub const MIN_ISA_YEAR: i32 = 1969;

/// Latest year an ISA09 two-digit year maps to.
pub const MAX_ISA_YEAR: i32 = 2068;

/// Maximum document size, enforced on encoded output and decoder input (64 MiB).
pub const MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Maximum number of segments in one document, envelope segments included.
pub const MAX_SEGMENTS: usize = 1_000_000;

/// Segments an interchange adds around its content: ISA, GS, GE and IEA.
pub const ENVELOPE_SEGMENTS: usize = 4;

/// Maximum length of a single segment in bytes.
pub const MAX_SEGMENT_LEN: usize = 8192;

/// Maximum transaction sets per functional group (GE01 is at most six digits).
///
/// Only reachable when encoding a hand-built group; a document within
/// [`MAX_SEGMENTS`] cannot hold more sets.
pub const MAX_TRANSACTION_SETS: usize = 999_999;
