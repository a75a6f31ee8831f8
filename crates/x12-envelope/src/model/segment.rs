//! Segments: one tagged, element-delimited unit of X12 data.

use crate::limits::MAX_SEGMENT_LEN;
use crate::model::Delimiters;

/// One segment, stored without its terminator.
///
/// Element content is opaque; only the tag (the text before the first
/// element separator) is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    text: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    tag_len: usize,
}

impl Segment {
    /// Creates a segment from raw text.
    ///
    /// Whitespace before the tag, trailing `\r`/`\n` and one trailing
    /// segment terminator are stripped. Fails if the result is blank, is too long, still contains a
    /// terminator, or does not start with a valid tag.
    pub fn new(raw: &str, delimiters: &Delimiters) -> Result<Self, &'static str> {
        let text = raw
            .trim_start_matches(|c: char| c.is_ascii_whitespace())
            .trim_end_matches(['\r', '\n']);
        let text = text.strip_suffix(delimiters.segment).unwrap_or(text);
        if text.trim().is_empty() {
            return Err("segment is blank");
        }
        if text.len() > MAX_SEGMENT_LEN {
            return Err("segment exceeds maximum length");
        }
        if text.contains(delimiters.segment) {
            return Err("segment contains an embedded terminator");
        }
        let tag_len = text.find(delimiters.element).unwrap_or(text.len());
        validate_tag(&text[..tag_len])?;
        Ok(Self {
            text: text.to_string(),
            tag_len,
        })
    }

    /// Returns the segment tag, e.g. `"ST"` or `"NM1"`.
    pub fn tag(&self) -> &str {
        &self.text[..self.tag_len]
    }

    /// Returns true if this segment's tag equals `tag`.
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == tag
    }

    /// Returns the segment text without its terminator.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Splits the segment into elements; index 0 is the tag.
    pub fn elements(&self, element: char) -> Vec<&str> {
        self.text.split(element).collect()
    }

    /// Returns the element at `position` (1-based, as in `NM103`).
    pub fn element(&self, element: char, position: usize) -> Option<&str> {
        self.text.split(element).nth(position)
    }

    /// Writes the segment with its terminator into `out`.
    pub fn write_to(&self, out: &mut String, delimiters: &Delimiters) {
        out.push_str(&self.text);
        out.push(delimiters.segment);
    }
}

/// Segment tags are two or three uppercase alphanumerics starting with a letter.
fn validate_tag(tag: &str) -> Result<(), &'static str> {
    if tag.len() < 2 || tag.len() > 3 {
        return Err("segment tag must be 2 or 3 characters");
    }
    let mut bytes = tag.bytes();
    if !bytes.next().is_some_and(|b| b.is_ascii_uppercase()) {
        return Err("segment tag must start with an uppercase letter");
    }
    if !bytes.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err("segment tag must be uppercase alphanumeric");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn test_strips_terminator_and_newline() {
        let seg = Segment::new("NM1*85*2*CLINIC~\r\n", &d()).unwrap();
        assert_eq!(seg.as_str(), "NM1*85*2*CLINIC");
        assert_eq!(seg.tag(), "NM1");
        assert!(seg.is("NM1"));
    }

    #[test]
    fn test_strips_leading_whitespace() {
        let seg = Segment::new(" \n\tREF*EA*12345~", &d()).unwrap();
        assert_eq!(seg.as_str(), "REF*EA*12345");
        assert_eq!(seg.tag(), "REF");
    }

    #[test]
    fn test_without_terminator() {
        let seg = Segment::new("SE*2*0001", &d()).unwrap();
        assert_eq!(seg.tag(), "SE");
        assert_eq!(seg.element('*', 1), Some("2"));
        assert_eq!(seg.element('*', 2), Some("0001"));
        assert_eq!(seg.element('*', 3), None);
    }

    #[test]
    fn test_tag_only_segment() {
        let seg = Segment::new("LX~", &d()).unwrap();
        assert_eq!(seg.tag(), "LX");
        assert_eq!(seg.elements('*'), vec!["LX"]);
    }

    #[test]
    fn test_rejects_blank_and_bad_tags() {
        assert_eq!(Segment::new("  \n", &d()), Err("segment is blank"));
        assert_eq!(Segment::new("~", &d()), Err("segment is blank"));
        assert!(Segment::new("st*837", &d()).is_err());
        assert!(Segment::new("S*1", &d()).is_err());
        assert!(Segment::new("ABCD*1", &d()).is_err());
        assert!(Segment::new("1AB*1", &d()).is_err());
        assert!(Segment::new("...", &d()).is_err());
    }

    #[test]
    fn test_rejects_embedded_terminator() {
        assert_eq!(
            Segment::new("ST*837~BHT*0019~", &d()),
            Err("segment contains an embedded terminator")
        );
    }

    #[test]
    fn test_write_to() {
        let seg = Segment::new("ST*837*0001", &d()).unwrap();
        let mut out = String::new();
        seg.write_to(&mut out, &d());
        assert_eq!(out, "ST*837*0001~");
    }
}
