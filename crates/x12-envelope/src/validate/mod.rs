//! Content validation for transaction sets.
//!
//! The codec treats transaction set content as opaque: only the SE tag is
//! interpreted. These checks look inside the ST/SE pair and are opt-in,
//! since a sender may legitimately forward sets it did not build.

use crate::error::ValidationError;
use crate::model::{Delimiters, Interchange, TransactionSet};

/// Returns the GS01 functional identifier code a transaction set type
/// belongs under, if known.
pub fn functional_id_for(transaction_set_id: &str) -> Option<&'static str> {
    match transaction_set_id {
        "837" => Some("HC"),
        "835" => Some("HP"),
        "834" => Some("BE"),
        "270" => Some("HS"),
        "271" => Some("HB"),
        "276" => Some("HR"),
        "277" => Some("HN"),
        "278" => Some("HI"),
        "820" => Some("RA"),
        "997" | "999" => Some("FA"),
        _ => None,
    }
}

/// Validates the ST/SE pair of a single transaction set.
///
/// - The first segment is ST with a non-empty ST02
/// - SE01 equals the number of segments, ST and SE included
/// - SE02 equals ST02
pub fn validate_transaction_set(
    set: &TransactionSet,
    delimiters: &Delimiters,
) -> Result<(), ValidationError> {
    check_set(0, set, delimiters)
}

/// Validates every transaction set in an interchange, and checks that each
/// known ST01 matches the group's GS01 code.
///
/// Returns the first failure.
pub fn validate_interchange(interchange: &Interchange) -> Result<(), ValidationError> {
    let delimiters = &interchange.delimiters;
    let group_code = interchange.group.header.functional_id_code.as_str();
    for (index, set) in interchange.transaction_sets().iter().enumerate() {
        check_set(index, set, delimiters)?;
        let Some(id) = set.transaction_set_id(delimiters.element) else {
            continue;
        };
        if let Some(expected) = functional_id_for(id) {
            if expected != group_code {
                return Err(ValidationError::FunctionalIdMismatch {
                    set: index,
                    transaction_set_id: id.to_string(),
                    expected,
                    found: group_code.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_set(index: usize, set: &TransactionSet, delimiters: &Delimiters) -> Result<(), ValidationError> {
    let segments = set.segments();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Err(ValidationError::MissingHeader {
            set: index,
            found: String::new(),
        });
    };
    if !first.is("ST") {
        return Err(ValidationError::MissingHeader {
            set: index,
            found: first.tag().to_string(),
        });
    }
    let header_control = non_empty(first.element(delimiters.element, 2)).ok_or(
        ValidationError::MissingElement {
            set: index,
            segment: "ST",
            position: 2,
        },
    )?;

    let declared = non_empty(last.element(delimiters.element, 1)).ok_or(
        ValidationError::MissingElement {
            set: index,
            segment: "SE",
            position: 1,
        },
    )?;
    if declared.parse::<usize>().ok() != Some(segments.len()) {
        return Err(ValidationError::SegmentCountMismatch {
            set: index,
            declared: declared.to_string(),
            actual: segments.len(),
        });
    }

    let trailer_control = non_empty(last.element(delimiters.element, 2)).ok_or(
        ValidationError::MissingElement {
            set: index,
            segment: "SE",
            position: 2,
        },
    )?;
    if trailer_control != header_control {
        return Err(ValidationError::ControlNumberMismatch {
            set: index,
            header: header_control.to_string(),
            trailer: trailer_control.to_string(),
        });
    }
    Ok(())
}

fn non_empty(element: Option<&str>) -> Option<&str> {
    element.filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{chunk_transaction_sets, decode_interchange, wrap_segments, EncodeOptions};
    use crate::model::{ControlNumber, EnvelopeBuilder};
    use crate::util::FixedClock;

    fn sets(lines: &[&str]) -> Vec<TransactionSet> {
        chunk_transaction_sets(lines, &Delimiters::default()).unwrap()
    }

    #[test]
    fn test_valid_set() {
        let s = sets(&["ST*837*0001*005010X222A1~", "BHT*0019~", "SE*3*0001~"]);
        assert_eq!(validate_transaction_set(&s[0], &Delimiters::default()), Ok(()));
    }

    #[test]
    fn test_missing_header() {
        let s = sets(&["BHT*0019~", "SE*2*0001~"]);
        assert_eq!(
            validate_transaction_set(&s[0], &Delimiters::default()),
            Err(ValidationError::MissingHeader {
                set: 0,
                found: "BHT".to_string()
            })
        );

        let s = sets(&["ST*837~", "SE*2*0001~"]);
        assert_eq!(
            validate_transaction_set(&s[0], &Delimiters::default()),
            Err(ValidationError::MissingElement {
                set: 0,
                segment: "ST",
                position: 2
            })
        );
    }

    #[test]
    fn test_segment_count() {
        let s = sets(&["ST*837*0001~", "BHT*0019~", "SE*2*0001~"]);
        assert_eq!(
            validate_transaction_set(&s[0], &Delimiters::default()),
            Err(ValidationError::SegmentCountMismatch {
                set: 0,
                declared: "2".to_string(),
                actual: 3
            })
        );

        let s = sets(&["ST*837*0001~", "SE*X*0001~"]);
        assert!(matches!(
            validate_transaction_set(&s[0], &Delimiters::default()),
            Err(ValidationError::SegmentCountMismatch { .. })
        ));
    }

    #[test]
    fn test_control_number() {
        let s = sets(&["ST*837*0001~", "SE*2*0002~"]);
        assert_eq!(
            validate_transaction_set(&s[0], &Delimiters::default()),
            Err(ValidationError::ControlNumberMismatch {
                set: 0,
                header: "0001".to_string(),
                trailer: "0002".to_string()
            })
        );
    }

    #[test]
    fn test_functional_id_codes() {
        assert_eq!(functional_id_for("837"), Some("HC"));
        assert_eq!(functional_id_for("999"), Some("FA"));
        assert_eq!(functional_id_for("850"), None);
    }

    #[test]
    fn test_validate_interchange() {
        let clock = FixedClock::at(2024, 1, 15, 9, 30).unwrap();
        let config = EnvelopeBuilder::new("ABC", "XYZ")
            .control_number(ControlNumber::new(1).unwrap())
            .functional_id_code("HP")
            .version("005010X", "221", "A1")
            .build()
            .unwrap();
        let lines = [
            "ST*835*0001~",
            "SE*2*0001~",
            "ST*837*0002~",
            "SE*2*0002~",
        ];
        let text = wrap_segments(lines, &config, &clock, EncodeOptions::new()).unwrap();
        let interchange = decode_interchange(&text).unwrap();
        assert_eq!(
            validate_interchange(&interchange),
            Err(ValidationError::FunctionalIdMismatch {
                set: 1,
                transaction_set_id: "837".to_string(),
                expected: "HC",
                found: "HP".to_string()
            })
        );

        let text = wrap_segments(&lines[..2], &config, &clock, EncodeOptions::new()).unwrap();
        assert_eq!(validate_interchange(&decode_interchange(&text).unwrap()), Ok(()));
    }
}
