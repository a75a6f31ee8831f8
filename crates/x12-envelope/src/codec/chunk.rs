//! Splitting a flat segment stream into transaction sets.

use crate::error::EncodeError;
use crate::limits::{ENVELOPE_SEGMENTS, MAX_SEGMENTS};
use crate::model::envelope::is_reserved_tag;
use crate::model::{Delimiters, Segment, TransactionSet};

/// Buckets segment lines into transaction sets, each closed by its SE trailer.
///
/// Lines may hold one segment each or several terminator-separated segments
/// (a single-line wire file). Blank lines are skipped; every other piece must
/// be a well-formed segment.
///
/// Fails with [`EncodeError::NoTransactionSets`] if no SE is found and with
/// [`EncodeError::IncompleteTransactionSet`] if segments follow the last SE.
/// The segment count leaves room for the four envelope segments, so any
/// accepted input can be enveloped and decoded again.
pub fn chunk_transaction_sets<I, S>(
    lines: I,
    delimiters: &Delimiters,
) -> Result<Vec<TransactionSet>, EncodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let max_segments = MAX_SEGMENTS - ENVELOPE_SEGMENTS;
    let mut sets = Vec::new();
    let mut current = Vec::new();
    let mut index = 0usize;

    for line in lines {
        for piece in line.as_ref().split(delimiters.segment) {
            if piece.trim().is_empty() {
                continue;
            }
            if index >= max_segments {
                return Err(EncodeError::LengthExceedsLimit {
                    field: "segments",
                    len: index + 1,
                    max: max_segments,
                });
            }
            let segment = Segment::new(piece, delimiters)
                .map_err(|reason| EncodeError::MalformedSegment { index, reason })?;
            if is_reserved_tag(segment.tag()) {
                return Err(EncodeError::ReservedSegment {
                    index,
                    tag: segment.tag().to_string(),
                });
            }
            index += 1;

            let closes = segment.is("SE");
            current.push(segment);
            if closes {
                let set = TransactionSet::new(std::mem::take(&mut current))
                    .map_err(|reason| EncodeError::MalformedSegment { index: index - 1, reason })?;
                sets.push(set);
            }
        }
    }

    if !current.is_empty() {
        return Err(EncodeError::IncompleteTransactionSet {
            count: current.len(),
        });
    }
    if sets.is_empty() {
        return Err(EncodeError::NoTransactionSets);
    }
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    fn claim(control: &str) -> Vec<String> {
        vec![
            format!("ST*837*{control}*005010X222A1~"),
            "BHT*0019*00*244579*20061015*1023*CH~".to_string(),
            "NM1*41*2*PREMIER BILLING SERVICE*****46*TGJ23~".to_string(),
            format!("SE*4*{control}~"),
        ]
    }

    #[test]
    fn test_chunks_on_se() {
        let mut lines = claim("0001");
        lines.push(String::new());
        lines.extend(claim("0002"));

        let sets = chunk_transaction_sets(&lines, &d()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 4);
        assert_eq!(sets[0].segments()[0].as_str(), "ST*837*0001*005010X222A1");
        assert_eq!(sets[1].segments()[3].as_str(), "SE*4*0002");
    }

    #[test]
    fn test_text_preserves_order_and_terminators() {
        let sets = chunk_transaction_sets(claim("0001"), &d()).unwrap();
        assert_eq!(
            sets[0].to_text(&d()),
            "ST*837*0001*005010X222A1~\n\
             BHT*0019*00*244579*20061015*1023*CH~\n\
             NM1*41*2*PREMIER BILLING SERVICE*****46*TGJ23~\n\
             SE*4*0001~\n"
        );
    }

    #[test]
    fn test_single_line_input() {
        let wire = "ST*837*0001~BHT*0019~SE*3*0001~ST*837*0002~SE*2*0002~";
        let sets = chunk_transaction_sets([wire], &d()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 3);
        assert_eq!(sets[1].len(), 2);
    }

    #[test]
    fn test_lines_with_line_endings() {
        let lines = ["ST*837*0001~\r\n", "\r\n", "SE*2*0001~\n"];
        let sets = chunk_transaction_sets(lines, &d()).unwrap();
        assert_eq!(sets[0].segments()[1].as_str(), "SE*2*0001");
    }

    #[test]
    fn test_rechunking_is_idempotent() {
        let sets = chunk_transaction_sets(claim("0001"), &d()).unwrap();
        let text = sets[0].to_text(&d());
        let again = chunk_transaction_sets(text.lines(), &d()).unwrap();
        assert_eq!(again, sets);
    }

    #[test]
    fn test_no_trailer_is_an_error() {
        let lines = ["ST*837*0001~", "BHT*0019~"];
        assert_eq!(
            chunk_transaction_sets(lines, &d()),
            Err(EncodeError::IncompleteTransactionSet { count: 2 })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            chunk_transaction_sets(empty, &d()),
            Err(EncodeError::NoTransactionSets)
        );
        assert_eq!(
            chunk_transaction_sets(["", "  ", "\n"], &d()),
            Err(EncodeError::NoTransactionSets)
        );
    }

    #[test]
    fn test_trailing_segments_are_an_error() {
        let mut lines = claim("0001");
        lines.push("ST*837*0002~".to_string());
        assert_eq!(
            chunk_transaction_sets(&lines, &d()),
            Err(EncodeError::IncompleteTransactionSet { count: 1 })
        );
    }

    #[test]
    fn test_se_tag_needs_separator() {
        // "SEX" is a different tag, not a transaction set trailer.
        let lines = ["ST*837*0001~", "SEX*1~"];
        assert_eq!(
            chunk_transaction_sets(lines, &d()),
            Err(EncodeError::IncompleteTransactionSet { count: 2 })
        );
    }

    #[test]
    fn test_rejects_malformed_and_reserved_segments() {
        let lines = ["ST*837*0001~", "bad segment~", "SE*3*0001~"];
        assert!(matches!(
            chunk_transaction_sets(lines, &d()),
            Err(EncodeError::MalformedSegment { index: 1, .. })
        ));

        let lines = ["ST*837*0001~", "GE*1*1~", "SE*3*0001~"];
        assert_eq!(
            chunk_transaction_sets(lines, &d()),
            Err(EncodeError::ReservedSegment {
                index: 1,
                tag: "GE".to_string()
            })
        );
    }

    #[test]
    fn test_leading_whitespace_before_tag() {
        let lines = ["  ST*837*0001~", "\tSE*2*0001~ "];
        let sets = chunk_transaction_sets(lines, &d()).unwrap();
        assert_eq!(sets[0].segments()[0].as_str(), "ST*837*0001");
        assert_eq!(sets[0].segments()[1].as_str(), "SE*2*0001");
    }

    #[test]
    fn test_segment_limit_leaves_room_for_envelope() {
        let max = MAX_SEGMENTS - ENVELOPE_SEGMENTS;
        let body = || std::iter::repeat_n("LX*1~", max - 2);

        let lines = std::iter::once("ST*837*0001~")
            .chain(body())
            .chain(std::iter::once("SE*1*0001~"));
        let sets = chunk_transaction_sets(lines, &d()).unwrap();
        assert_eq!(sets[0].len(), max);

        let lines = std::iter::once("ST*837*0001~")
            .chain(body())
            .chain(["LX*1~", "SE*1*0001~"]);
        assert_eq!(
            chunk_transaction_sets(lines, &d()),
            Err(EncodeError::LengthExceedsLimit {
                field: "segments",
                len: max + 1,
                max
            })
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let delims = Delimiters::new('|', '\'', '>', '!').unwrap();
        let sets = chunk_transaction_sets(["ST|837|0001'SE|2|0001'"], &delims).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(sets[0].segments()[1].is("SE"));
    }
}
