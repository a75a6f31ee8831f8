//! GS/GE functional group encoding and decoding.

use tracing::debug;

use crate::codec::primitives::{EncodeOptions, SegmentReader, SegmentWriter};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    MAX_APPLICATION_ID_LEN, MAX_DOCUMENT_SIZE, MAX_GROUP_VERSION_LEN, MAX_TRANSACTION_SETS,
    MIN_APPLICATION_ID_LEN,
};
use crate::model::field::{check_code, check_id};
use crate::model::{
    ControlNumber, Delimiters, EnvelopeConfig, FunctionalGroup, GroupHeader, Segment,
    TransactionSet,
};
use crate::util::Clock;
use crate::util::datetime::{format_date_ccyymmdd, format_time_hhmm, parse_date_ccyymmdd, parse_time};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a functional group as `GS`, its transaction sets, and `GE`.
///
/// The GE01 count is taken from the enclosed sets. GS06 is written as nine
/// digits; GE02 is written in its minimal numeric form.
pub fn encode_functional_group(
    group: &FunctionalGroup,
    delimiters: &Delimiters,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    delimiters.validate()?;
    let mut writer = SegmentWriter::with_capacity(*delimiters, options.layout, estimate_size(group));
    write_functional_group(&mut writer, group)?;
    writer.finish()
}

/// Wraps transaction sets in a GS/GE pair built from `config`, stamped with
/// `clock.now()`.
pub fn wrap_in_functional_group(
    transaction_sets: Vec<TransactionSet>,
    config: &EnvelopeConfig,
    clock: &dyn Clock,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    let group = FunctionalGroup {
        header: config.group_header(clock.now()),
        transaction_sets,
    };
    let text = encode_functional_group(&group, &config.delimiters, options)?;
    debug!(
        transaction_sets = group.transaction_sets.len(),
        control_number = %group.header.control_number,
        "wrapped transaction sets in functional group"
    );
    Ok(text)
}

pub(crate) fn write_functional_group(
    writer: &mut SegmentWriter,
    group: &FunctionalGroup,
) -> Result<(), EncodeError> {
    let delimiters = *writer.delimiters();
    if group.transaction_sets.is_empty() {
        return Err(EncodeError::NoTransactionSets);
    }
    if group.transaction_sets.len() > MAX_TRANSACTION_SETS {
        return Err(EncodeError::LengthExceedsLimit {
            field: "transaction_sets",
            len: group.transaction_sets.len(),
            max: MAX_TRANSACTION_SETS,
        });
    }
    group.header.validate(&delimiters)?;

    write_group_header(writer, &group.header)?;

    let mut index = 0;
    for set in &group.transaction_sets {
        for segment in set.segments() {
            check_segment(segment, &delimiters)
                .map_err(|reason| EncodeError::MalformedSegment { index, reason })?;
            writer.write_raw(segment);
            index += 1;
        }
    }

    let count = group.trailer_count().to_string();
    let control = group.header.control_number.minimal();
    writer.write_segment("GE", &[&count, &control]);
    Ok(())
}

/// Segments are opaque text; one built under other delimiters would be
/// written with a different tag (or an extra terminator) than it was
/// chunked with.
fn check_segment(segment: &Segment, delimiters: &Delimiters) -> Result<(), &'static str> {
    let reparsed = Segment::new(segment.as_str(), delimiters)?;
    if reparsed != *segment {
        return Err("segment was built with different delimiters");
    }
    Ok(())
}

fn write_group_header(writer: &mut SegmentWriter, header: &GroupHeader) -> Result<(), EncodeError> {
    let date = format_date_ccyymmdd("GS04", header.date)?;
    let time = format_time_hhmm(header.time);
    let control = header.control_number.padded();
    writer.write_segment(
        "GS",
        &[
            &header.functional_id_code,
            &header.sender_id,
            &header.receiver_id,
            &date,
            &time,
            &control,
            &header.responsible_agency,
            &header.version,
        ],
    );
    Ok(())
}

fn estimate_size(group: &FunctionalGroup) -> usize {
    let content: usize = group
        .transaction_sets
        .iter()
        .flat_map(|set| set.segments())
        .map(|segment| segment.as_str().len() + 2)
        .sum();
    content + 128
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a standalone functional group (`GS` through `GE`) written with
/// `delimiters`.
pub fn decode_functional_group(
    text: &str,
    delimiters: &Delimiters,
) -> Result<FunctionalGroup, DecodeError> {
    if text.len() > MAX_DOCUMENT_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "document",
            len: text.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }
    if delimiters.validate().is_err() {
        return Err(DecodeError::MalformedEnvelope {
            reason: "invalid delimiters",
        });
    }
    let mut reader = SegmentReader::new(text, *delimiters, 0)?;
    let group = read_functional_group(&mut reader)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingData {
            count: reader.remaining_len(),
        });
    }
    Ok(group)
}

pub(crate) fn read_functional_group(
    reader: &mut SegmentReader<'_>,
) -> Result<FunctionalGroup, DecodeError> {
    let delimiters = *reader.delimiters();
    let (index, elements) = reader.expect_segment("GS")?;
    if elements.len() != 9 {
        return Err(DecodeError::MalformedSegment {
            index,
            reason: "GS must have 8 elements",
        });
    }
    let header = parse_group_header(&elements, &delimiters)?;

    let mut transaction_sets: Vec<TransactionSet> = Vec::new();
    let mut current = Vec::new();
    loop {
        match reader.peek_tag() {
            None => return Err(DecodeError::UnexpectedEnd { context: "GE" }),
            Some("GE") => break,
            Some("IEA") => {
                return Err(DecodeError::UnexpectedSegment {
                    expected: "GE",
                    found: "IEA".to_string(),
                    index: reader.position(),
                });
            }
            Some(_) => {
                let index = reader.position();
                let segment = reader.read_segment("transaction set")?;
                let closes = segment.is("SE");
                current.push(segment);
                if closes {
                    let set = TransactionSet::new(std::mem::take(&mut current))
                        .map_err(|reason| DecodeError::MalformedSegment { index, reason })?;
                    transaction_sets.push(set);
                }
            }
        }
    }
    if !current.is_empty() {
        return Err(DecodeError::IncompleteTransactionSet {
            count: current.len(),
        });
    }

    let (index, elements) = reader.expect_segment("GE")?;
    if elements.len() != 3 {
        return Err(DecodeError::MalformedSegment {
            index,
            reason: "GE must have 2 elements",
        });
    }
    let declared = parse_count("GE", 1, elements[1])?;
    let trailer = parse_control_number("GE", 2, elements[2])?;

    if declared != transaction_sets.len() {
        return Err(DecodeError::CountMismatch {
            segment: "GE",
            declared,
            actual: transaction_sets.len(),
        });
    }
    if transaction_sets.is_empty() {
        return Err(DecodeError::EmptyFunctionalGroup);
    }
    if trailer != header.control_number {
        return Err(DecodeError::ControlNumberMismatch {
            segment: "GE",
            header: header.control_number,
            trailer,
        });
    }

    Ok(FunctionalGroup {
        header,
        transaction_sets,
    })
}

fn parse_group_header(elements: &[&str], delimiters: &Delimiters) -> Result<GroupHeader, DecodeError> {
    let code = elements[1];
    check_code("GS01", code, 2).map_err(|_| malformed("GS", 1, code, "expected a two-character code"))?;
    for position in [2, 3] {
        let id = elements[position];
        check_id("GS", id, MIN_APPLICATION_ID_LEN, MAX_APPLICATION_ID_LEN, delimiters)
            .map_err(|_| malformed("GS", position, id, "expected 2 to 15 characters"))?;
    }
    let date = parse_date_ccyymmdd(elements[4]).map_err(|reason| malformed("GS", 4, elements[4], reason))?;
    let time = parse_time(elements[5]).map_err(|reason| malformed("GS", 5, elements[5], reason))?;
    let control_number = parse_control_number("GS", 6, elements[6])?;
    let agency = elements[7];
    check_id("GS07", agency, 1, 2, delimiters)
        .map_err(|_| malformed("GS", 7, agency, "expected 1 or 2 characters"))?;
    let version = elements[8];
    check_id("GS08", version, 1, MAX_GROUP_VERSION_LEN, delimiters)
        .map_err(|_| malformed("GS", 8, version, "expected 1 to 12 characters"))?;

    Ok(GroupHeader {
        functional_id_code: code.to_string(),
        sender_id: elements[2].to_string(),
        receiver_id: elements[3].to_string(),
        date,
        time,
        control_number,
        responsible_agency: agency.to_string(),
        version: version.to_string(),
    })
}

pub(crate) fn parse_control_number(
    segment: &'static str,
    position: usize,
    value: &str,
) -> Result<ControlNumber, DecodeError> {
    value
        .parse::<ControlNumber>()
        .map_err(|_| malformed(segment, position, value, "expected 1 to 9 digits"))
}

pub(crate) fn parse_count(
    segment: &'static str,
    position: usize,
    value: &str,
) -> Result<usize, DecodeError> {
    if value.is_empty() || value.len() > 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(segment, position, value, "expected 1 to 6 digits"));
    }
    value
        .parse()
        .map_err(|_| malformed(segment, position, value, "expected 1 to 6 digits"))
}

pub(crate) fn malformed(
    segment: &'static str,
    position: usize,
    value: &str,
    reason: &'static str,
) -> DecodeError {
    DecodeError::MalformedField {
        segment,
        position,
        value: value.to_string(),
        reason,
    }
}
