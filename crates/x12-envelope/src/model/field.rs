//! Width, padding and character rules for envelope header fields.
//!
//! Every header element goes through these helpers so that header and
//! trailer encodings share one definition of each field.

use crate::error::ValueError;
use crate::model::Delimiters;

/// Checks a free-text header field: length bounds, printable ASCII, and no
/// delimiter characters.
pub fn check_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    delimiters: &Delimiters,
) -> Result<(), ValueError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValueError::FieldTooLong { field, len, max });
    }
    if len < min {
        return Err(ValueError::FieldTooShort { field, len, min });
    }
    for ch in value.chars() {
        if delimiters.contains(ch) {
            return Err(ValueError::ContainsDelimiter { field, ch });
        }
        if !(ch.is_ascii_graphic() || ch == ' ') {
            return Err(ValueError::InvalidCharacter { field, ch });
        }
    }
    Ok(())
}

/// Checks an identifier: like [`check_text`], and additionally rejects
/// leading or trailing spaces, which padding would make ambiguous.
pub fn check_id(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    delimiters: &Delimiters,
) -> Result<(), ValueError> {
    check_text(field, value, min, max, delimiters)?;
    if value.starts_with(' ') || value.ends_with(' ') {
        return Err(ValueError::InvalidCharacter { field, ch: ' ' });
    }
    Ok(())
}

/// Checks a code value: exactly `len` uppercase letters or digits.
pub fn check_code(field: &'static str, value: &str, len: usize) -> Result<(), ValueError> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err(ValueError::InvalidFieldValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Pads `value` with trailing spaces to exactly `width` characters.
///
/// Never truncates: a longer value is an error.
pub fn pad_right(field: &'static str, value: &str, width: usize) -> Result<String, ValueError> {
    let len = value.chars().count();
    if len > width {
        return Err(ValueError::FieldTooLong {
            field,
            len,
            max: width,
        });
    }
    let mut padded = String::with_capacity(width);
    padded.push_str(value);
    padded.extend(std::iter::repeat_n(' ', width - len));
    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ISA06", "ABC", 15).unwrap(), "ABC            ");
        assert_eq!(pad_right("ISA06", "", 10).unwrap(), "          ");
        assert_eq!(pad_right("ISA06", "123456789012345", 15).unwrap().len(), 15);
        assert_eq!(
            pad_right("ISA06", "1234567890123456", 15),
            Err(ValueError::FieldTooLong {
                field: "ISA06",
                len: 16,
                max: 15
            })
        );
    }

    #[test]
    fn test_check_text() {
        let d = Delimiters::default();
        assert!(check_text("GS02", "SENDER", 2, 15, &d).is_ok());
        assert!(matches!(
            check_text("GS02", "S", 2, 15, &d),
            Err(ValueError::FieldTooShort { .. })
        ));
        assert_eq!(
            check_text("GS02", "SEND*ER", 2, 15, &d),
            Err(ValueError::ContainsDelimiter {
                field: "GS02",
                ch: '*'
            })
        );
        assert!(matches!(
            check_text("GS02", "SEND\tER", 2, 15, &d),
            Err(ValueError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_check_id_rejects_edge_spaces() {
        let d = Delimiters::default();
        assert!(check_id("ISA06", "MY CLINIC", 1, 15, &d).is_ok());
        assert!(check_id("ISA06", "ABC ", 1, 15, &d).is_err());
        assert!(check_id("ISA06", " ABC", 1, 15, &d).is_err());
    }
}
