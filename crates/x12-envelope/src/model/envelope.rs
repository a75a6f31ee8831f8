//! Transaction sets, functional groups and interchanges.
//!
//! Each envelope level is a typed record. Trailers are never stored: GE and
//! IEA are derived from the enclosed content and the header when encoding,
//! and checked against them when decoding.

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValueError;
use crate::limits::{
    AUTHORIZATION_WIDTH, ID_WIDTH, MAX_APPLICATION_ID_LEN, MAX_GROUP_VERSION_LEN,
    MIN_APPLICATION_ID_LEN,
};
use crate::model::field::{check_code, check_id, check_text};
use crate::model::{ControlNumber, Delimiters, Segment};

// =============================================================================
// TRANSACTION SET
// =============================================================================

/// One document unit (e.g. one claim), closed by its SE trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransactionSet {
    segments: Vec<Segment>,
}

impl TransactionSet {
    /// Creates a transaction set.
    ///
    /// The set must be non-empty, contain exactly one SE segment as its last
    /// segment, and contain no GE or IEA segments.
    pub fn new(segments: Vec<Segment>) -> Result<Self, &'static str> {
        let Some(last) = segments.last() else {
            return Err("transaction set is empty");
        };
        if !last.is("SE") {
            return Err("transaction set does not end with SE");
        }
        if segments[..segments.len() - 1].iter().any(|s| s.is("SE")) {
            return Err("transaction set contains more than one SE");
        }
        if segments.iter().any(|s| is_reserved_tag(s.tag())) {
            return Err("transaction set contains a GE or IEA segment");
        }
        Ok(Self { segments })
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments, SE included.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a transaction set holds at least its SE trailer.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the ST01 transaction set identifier (e.g. `"837"`), if the
    /// set opens with an ST segment.
    pub fn transaction_set_id(&self, element: char) -> Option<&str> {
        self.segments
            .first()
            .filter(|s| s.is("ST"))
            .and_then(|s| s.element(element, 1))
    }

    /// Renders the set as newline-joined segments with terminators.
    pub fn to_text(&self, delimiters: &Delimiters) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.write_to(&mut out, delimiters);
            out.push('\n');
        }
        out
    }
}

/// Trailers that end a group or interchange and would make decoding ambiguous
/// if they appeared inside a transaction set.
pub(crate) fn is_reserved_tag(tag: &str) -> bool {
    tag == "GE" || tag == "IEA"
}

// =============================================================================
// FUNCTIONAL GROUP
// =============================================================================

/// GS header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupHeader {
    /// GS01 functional identifier code, e.g. `HC` for health care claims.
    pub functional_id_code: String,
    /// GS02 application sender's code.
    pub sender_id: String,
    /// GS03 application receiver's code.
    pub receiver_id: String,
    /// GS04 group date.
    pub date: NaiveDate,
    /// GS05 group time (minute precision when encoded).
    pub time: NaiveTime,
    /// GS06 group control number.
    pub control_number: ControlNumber,
    /// GS07 responsible agency code.
    pub responsible_agency: String,
    /// GS08 version, release and industry identifier, e.g. `005010X222A1`.
    pub version: String,
}

impl GroupHeader {
    /// Checks every field against its GS width and character rules.
    pub fn validate(&self, delimiters: &Delimiters) -> Result<(), ValueError> {
        check_code("GS01", &self.functional_id_code, 2)?;
        check_id(
            "GS02",
            &self.sender_id,
            MIN_APPLICATION_ID_LEN,
            MAX_APPLICATION_ID_LEN,
            delimiters,
        )?;
        check_id(
            "GS03",
            &self.receiver_id,
            MIN_APPLICATION_ID_LEN,
            MAX_APPLICATION_ID_LEN,
            delimiters,
        )?;
        check_id("GS07", &self.responsible_agency, 1, 2, delimiters)?;
        check_id("GS08", &self.version, 1, MAX_GROUP_VERSION_LEN, delimiters)?;
        Ok(())
    }
}

/// A batch of transaction sets sharing one GS/GE pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionalGroup {
    /// GS header.
    pub header: GroupHeader,
    /// Enclosed transaction sets, in order.
    pub transaction_sets: Vec<TransactionSet>,
}

impl FunctionalGroup {
    /// The GE01 count: always the number of enclosed sets.
    pub fn trailer_count(&self) -> usize {
        self.transaction_sets.len()
    }
}

// =============================================================================
// INTERCHANGE
// =============================================================================

/// ISA15 usage indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UsageIndicator {
    /// `T`: test data.
    #[default]
    Test,
    /// `P`: production data.
    Production,
    /// `I`: information.
    Information,
}

impl UsageIndicator {
    /// Returns the single-character ISA15 code.
    pub fn code(self) -> char {
        match self {
            UsageIndicator::Test => 'T',
            UsageIndicator::Production => 'P',
            UsageIndicator::Information => 'I',
        }
    }

    /// Parses an ISA15 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T" => Some(UsageIndicator::Test),
            "P" => Some(UsageIndicator::Production),
            "I" => Some(UsageIndicator::Information),
            _ => None,
        }
    }
}

/// ISA header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterchangeHeader {
    /// ISA01 authorization information qualifier.
    pub authorization_qualifier: String,
    /// ISA02 authorization information, without padding.
    pub authorization: String,
    /// ISA03 security information qualifier.
    pub security_qualifier: String,
    /// ISA04 security information, without padding.
    pub security: String,
    /// ISA05 sender id qualifier.
    pub sender_qualifier: String,
    /// ISA06 sender id, without padding.
    pub sender_id: String,
    /// ISA07 receiver id qualifier.
    pub receiver_qualifier: String,
    /// ISA08 receiver id, without padding.
    pub receiver_id: String,
    /// ISA09 interchange date.
    pub date: NaiveDate,
    /// ISA10 interchange time (minute precision).
    pub time: NaiveTime,
    /// ISA12 interchange control version number.
    pub version: String,
    /// ISA13 interchange control number.
    pub control_number: ControlNumber,
    /// ISA14 acknowledgment requested.
    pub acknowledgment_requested: bool,
    /// ISA15 usage indicator.
    pub usage: UsageIndicator,
}

impl InterchangeHeader {
    /// Checks every field against its fixed ISA width and character rules.
    ///
    /// Ids longer than 15 characters are rejected, never truncated.
    pub fn validate(&self, delimiters: &Delimiters) -> Result<(), ValueError> {
        check_code("ISA01", &self.authorization_qualifier, 2)?;
        check_text("ISA02", &self.authorization, 0, AUTHORIZATION_WIDTH, delimiters)?;
        check_code("ISA03", &self.security_qualifier, 2)?;
        check_text("ISA04", &self.security, 0, AUTHORIZATION_WIDTH, delimiters)?;
        check_code("ISA05", &self.sender_qualifier, 2)?;
        check_id("ISA06", &self.sender_id, 1, ID_WIDTH, delimiters)?;
        check_code("ISA07", &self.receiver_qualifier, 2)?;
        check_id("ISA08", &self.receiver_id, 1, ID_WIDTH, delimiters)?;
        check_code("ISA12", &self.version, 5)?;
        // Trailing spaces in ISA02/ISA04 are indistinguishable from padding.
        if self.authorization.ends_with(' ') {
            return Err(ValueError::InvalidCharacter {
                field: "ISA02",
                ch: ' ',
            });
        }
        if self.security.ends_with(' ') {
            return Err(ValueError::InvalidCharacter {
                field: "ISA04",
                ch: ' ',
            });
        }
        Ok(())
    }
}

/// The outermost transport unit: one ISA/IEA pair around one functional group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interchange {
    /// Delimiters declared by the ISA header.
    pub delimiters: Delimiters,
    /// ISA header.
    pub header: InterchangeHeader,
    /// The single enclosed functional group.
    pub group: FunctionalGroup,
}

impl Interchange {
    /// The IEA01 count: one functional group per interchange.
    pub fn trailer_group_count(&self) -> usize {
        1
    }

    /// Returns the enclosed transaction sets.
    pub fn transaction_sets(&self) -> &[TransactionSet] {
        &self.group.transaction_sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> Segment {
        Segment::new(text, &Delimiters::default()).unwrap()
    }

    #[test]
    fn test_transaction_set_rules() {
        assert!(TransactionSet::new(vec![seg("ST*837*0001"), seg("SE*2*0001")]).is_ok());
        assert_eq!(TransactionSet::new(vec![]), Err("transaction set is empty"));
        assert_eq!(
            TransactionSet::new(vec![seg("ST*837*0001")]),
            Err("transaction set does not end with SE")
        );
        assert_eq!(
            TransactionSet::new(vec![seg("SE*1*0001"), seg("SE*2*0001")]),
            Err("transaction set contains more than one SE")
        );
        assert_eq!(
            TransactionSet::new(vec![seg("GE*1*1"), seg("SE*2*0001")]),
            Err("transaction set contains a GE or IEA segment")
        );
    }

    #[test]
    fn test_transaction_set_text() {
        let set = TransactionSet::new(vec![seg("ST*837*0001~"), seg("SE*2*0001~")]).unwrap();
        assert_eq!(set.to_text(&Delimiters::default()), "ST*837*0001~\nSE*2*0001~\n");
        assert_eq!(set.transaction_set_id('*'), Some("837"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_usage_codes() {
        for usage in [
            UsageIndicator::Test,
            UsageIndicator::Production,
            UsageIndicator::Information,
        ] {
            assert_eq!(UsageIndicator::from_code(&usage.code().to_string()), Some(usage));
        }
        assert_eq!(UsageIndicator::from_code("X"), None);
    }
}
