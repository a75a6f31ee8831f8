//! ISA/IEA interchange encoding and decoding.
//!
//! The ISA segment is fixed width: every element is padded to its declared
//! length so that the delimiters sit at known offsets and a reader can
//! discover them before parsing anything else.

use tracing::debug;

use crate::codec::chunk::chunk_transaction_sets;
use crate::codec::group::{malformed, parse_control_number, parse_count, read_functional_group, write_functional_group};
use crate::codec::primitives::{EncodeOptions, SegmentReader, SegmentWriter};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    AUTHORIZATION_WIDTH, ID_WIDTH, ISA_COMPONENT_OFFSET, ISA_ELEMENT_OFFSET, ISA_LENGTH,
    ISA_TERMINATOR_OFFSET, MAX_DOCUMENT_SIZE,
};
use crate::model::field::{check_code, pad_right};
use crate::model::{Delimiters, EnvelopeConfig, Interchange, InterchangeHeader, UsageIndicator};
use crate::util::Clock;
use crate::util::datetime::{format_date_yymmdd, format_time_hhmm, parse_date_yymmdd, parse_time};

/// Widths of the ISA tag and ISA01 through ISA16.
const ISA_WIDTHS: [usize; 17] = [3, 2, 10, 2, 10, 2, 15, 2, 15, 6, 4, 1, 5, 9, 1, 1, 1];

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an interchange with default (readable) options.
pub fn encode_interchange(interchange: &Interchange) -> Result<String, EncodeError> {
    encode_interchange_with_options(interchange, EncodeOptions::default())
}

/// Encodes an interchange: `ISA`, the functional group, and `IEA`.
///
/// Header fields are validated against their widths before anything is
/// written; ids are padded, never truncated.
pub fn encode_interchange_with_options(
    interchange: &Interchange,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    let delimiters = interchange.delimiters;
    delimiters.validate()?;
    interchange.header.validate(&delimiters)?;

    let content: usize = interchange
        .transaction_sets()
        .iter()
        .flat_map(|set| set.segments())
        .map(|segment| segment.as_str().len() + 2)
        .sum();
    let mut writer = SegmentWriter::with_capacity(delimiters, options.layout, content + 256);

    write_interchange_header(&mut writer, &interchange.header)?;
    write_functional_group(&mut writer, &interchange.group)?;
    write_interchange_trailer(&mut writer, interchange.trailer_group_count(), &interchange.header);
    writer.finish()
}

/// Wraps an already-encoded functional group in an ISA/IEA envelope.
///
/// `group_text` is written verbatim as one group, so it must use
/// `config.delimiters`. Fails with [`EncodeError::EmptyFunctionalGroup`] if
/// it is blank.
pub fn wrap_in_interchange(
    group_text: &str,
    config: &EnvelopeConfig,
    clock: &dyn Clock,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    if group_text.trim().is_empty() {
        return Err(EncodeError::EmptyFunctionalGroup);
    }
    let delimiters = config.delimiters;
    delimiters.validate()?;
    let header = config.interchange_header(clock.now());
    header.validate(&delimiters)?;

    let mut writer = SegmentWriter::with_capacity(delimiters, options.layout, group_text.len() + 256);
    write_interchange_header(&mut writer, &header)?;
    let segments = group_text
        .split(delimiters.segment)
        .filter(|piece| !piece.trim().is_empty())
        .count();
    writer.write_block(group_text, segments);
    write_interchange_trailer(&mut writer, 1, &header);
    let text = writer.finish()?;

    debug!(
        control_number = %header.control_number,
        bytes = text.len(),
        "wrapped functional group in interchange"
    );
    Ok(text)
}

/// Chunks segment lines into transaction sets and envelopes them in one
/// functional group and one interchange, both stamped with `clock.now()`.
pub fn wrap_segments<I, S>(
    lines: I,
    config: &EnvelopeConfig,
    clock: &dyn Clock,
    options: EncodeOptions,
) -> Result<String, EncodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sets = chunk_transaction_sets(lines, &config.delimiters)?;
    let count = sets.len();
    let interchange = config.envelope(sets, clock.now());
    let text = encode_interchange_with_options(&interchange, options)?;
    debug!(
        transaction_sets = count,
        control_number = %interchange.header.control_number,
        "wrapped segments in interchange"
    );
    Ok(text)
}

fn write_interchange_header(
    writer: &mut SegmentWriter,
    header: &InterchangeHeader,
) -> Result<(), EncodeError> {
    let delimiters = *writer.delimiters();
    let authorization = pad_right("ISA02", &header.authorization, AUTHORIZATION_WIDTH)?;
    let security = pad_right("ISA04", &header.security, AUTHORIZATION_WIDTH)?;
    let sender = pad_right("ISA06", &header.sender_id, ID_WIDTH)?;
    let receiver = pad_right("ISA08", &header.receiver_id, ID_WIDTH)?;
    let date = format_date_yymmdd("ISA09", header.date)?;
    let time = format_time_hhmm(header.time);
    let repetition = delimiters.repetition.to_string();
    let control = header.control_number.padded();
    let acknowledgment = if header.acknowledgment_requested { "1" } else { "0" };
    let usage = header.usage.code().to_string();
    let component = delimiters.component.to_string();

    writer.write_segment(
        "ISA",
        &[
            &header.authorization_qualifier,
            &authorization,
            &header.security_qualifier,
            &security,
            &header.sender_qualifier,
            &sender,
            &header.receiver_qualifier,
            &receiver,
            &date,
            &time,
            &repetition,
            &header.version,
            &control,
            acknowledgment,
            &usage,
            &component,
        ],
    );
    Ok(())
}

fn write_interchange_trailer(writer: &mut SegmentWriter, groups: usize, header: &InterchangeHeader) {
    writer.write_segment("IEA", &[&groups.to_string(), &header.control_number.padded()]);
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an interchange, reading its delimiters from the ISA header.
///
/// Leading whitespace and a byte order mark are skipped. Trailer counts and
/// control numbers are checked against their headers.
pub fn decode_interchange(text: &str) -> Result<Interchange, DecodeError> {
    if text.len() > MAX_DOCUMENT_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "document",
            len: text.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim_start();
    if text.is_empty() {
        return Err(DecodeError::UnexpectedEnd { context: "ISA" });
    }
    if !text.starts_with("ISA") {
        return Err(DecodeError::MalformedEnvelope {
            reason: "document does not start with ISA",
        });
    }
    if text.len() < ISA_LENGTH {
        return Err(DecodeError::UnexpectedEnd { context: "ISA" });
    }
    let isa = text
        .get(..ISA_LENGTH)
        .filter(|isa| isa.is_ascii())
        .ok_or(DecodeError::MalformedEnvelope {
            reason: "ISA segment is not ASCII",
        })?;

    let (delimiters, header) = parse_interchange_header(isa)?;

    let mut reader = SegmentReader::new(&text[ISA_LENGTH..], delimiters, 1)?;
    let group = read_functional_group(&mut reader)?;

    if reader.peek_tag() == Some("GS") {
        return Err(DecodeError::MultipleFunctionalGroups);
    }
    let (index, elements) = reader.expect_segment("IEA")?;
    if elements.len() != 3 {
        return Err(DecodeError::MalformedSegment {
            index,
            reason: "IEA must have 2 elements",
        });
    }
    let declared = parse_count("IEA", 1, elements[1])?;
    let trailer = parse_control_number("IEA", 2, elements[2])?;
    let interchange = Interchange {
        delimiters,
        header,
        group,
    };
    if declared != interchange.trailer_group_count() {
        return Err(DecodeError::CountMismatch {
            segment: "IEA",
            declared,
            actual: interchange.trailer_group_count(),
        });
    }
    if trailer != interchange.header.control_number {
        return Err(DecodeError::ControlNumberMismatch {
            segment: "IEA",
            header: interchange.header.control_number,
            trailer,
        });
    }
    if !reader.is_empty() {
        return Err(DecodeError::TrailingData {
            count: reader.remaining_len(),
        });
    }

    debug!(
        sender = %interchange.header.sender_id,
        receiver = %interchange.header.receiver_id,
        control_number = %interchange.header.control_number,
        transaction_sets = interchange.transaction_sets().len(),
        "decoded interchange"
    );
    Ok(interchange)
}

/// Parses the 106-character ISA segment, terminator included.
fn parse_interchange_header(isa: &str) -> Result<(Delimiters, InterchangeHeader), DecodeError> {
    let bytes = isa.as_bytes();
    let element = bytes[ISA_ELEMENT_OFFSET] as char;
    let component = bytes[ISA_COMPONENT_OFFSET] as char;
    let terminator = bytes[ISA_TERMINATOR_OFFSET] as char;

    let elements: Vec<&str> = isa[..ISA_TERMINATOR_OFFSET].split(element).collect();
    if elements.len() != ISA_WIDTHS.len() {
        return Err(DecodeError::MalformedEnvelope {
            reason: "ISA must have 16 fixed-width elements",
        });
    }
    for (position, (value, width)) in elements.iter().zip(ISA_WIDTHS).enumerate() {
        if value.len() != width {
            return Err(malformed("ISA", position, value, "wrong fixed width"));
        }
    }

    let repetition = elements[11].chars().next().unwrap_or(element);
    let delimiters = Delimiters::new(element, terminator, component, repetition).map_err(|_| {
        DecodeError::MalformedEnvelope {
            reason: "ISA declares invalid delimiters",
        }
    })?;

    for position in [1, 3, 5, 7] {
        check_code("ISA", elements[position], 2)
            .map_err(|_| malformed("ISA", position, elements[position], "expected a two-character code"))?;
    }
    let sender_id = unpad_id(elements[6], 6)?;
    let receiver_id = unpad_id(elements[8], 8)?;
    let date = parse_date_yymmdd(elements[9]).map_err(|reason| malformed("ISA", 9, elements[9], reason))?;
    let time = parse_time(elements[10]).map_err(|reason| malformed("ISA", 10, elements[10], reason))?;
    check_code("ISA", elements[12], 5)
        .map_err(|_| malformed("ISA", 12, elements[12], "expected a five-digit version"))?;
    let control_number = parse_control_number("ISA", 13, elements[13])?;
    let acknowledgment_requested = match elements[14] {
        "0" => false,
        "1" => true,
        other => return Err(malformed("ISA", 14, other, "expected 0 or 1")),
    };
    let usage = UsageIndicator::from_code(elements[15])
        .ok_or_else(|| malformed("ISA", 15, elements[15], "expected T, P or I"))?;

    let header = InterchangeHeader {
        authorization_qualifier: elements[1].to_string(),
        authorization: elements[2].trim_end_matches(' ').to_string(),
        security_qualifier: elements[3].to_string(),
        security: elements[4].trim_end_matches(' ').to_string(),
        sender_qualifier: elements[5].to_string(),
        sender_id,
        receiver_qualifier: elements[7].to_string(),
        receiver_id,
        date,
        time,
        version: elements[12].to_string(),
        control_number,
        acknowledgment_requested,
        usage,
    };
    Ok((delimiters, header))
}

fn unpad_id(value: &str, position: usize) -> Result<String, DecodeError> {
    let id = value.trim_end_matches(' ');
    if id.is_empty() || id.starts_with(' ') {
        return Err(malformed("ISA", position, value, "expected a left-aligned id"));
    }
    Ok(id.to_string())
}
