//! Segment-level reading and writing for X12 text.
//!
//! The reader splits a document on its segment terminator and hands out
//! segments with bounds checking; the writer joins elements with the element
//! separator and applies the output layout.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_DOCUMENT_SIZE, MAX_SEGMENT_LEN, MAX_SEGMENTS};
use crate::model::{Delimiters, Segment};

// =============================================================================
// OPTIONS
// =============================================================================

/// Whitespace placed between encoded segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// A newline after every segment terminator. The newline is cosmetic and
    /// not part of the X12 wire format; decoders ignore it.
    #[default]
    Readable,
    /// Segments back to back, as transmitted on the wire.
    Wire,
}

/// Options for encoding envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Output layout.
    pub layout: Layout,
}

impl EncodeOptions {
    /// Creates default (readable) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for strict wire output without newlines.
    pub fn wire() -> Self {
        Self {
            layout: Layout::Wire,
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader over the segments of an X12 document.
#[derive(Debug, Clone)]
pub struct SegmentReader<'a> {
    segments: Vec<&'a str>,
    pos: usize,
    base: usize,
    delimiters: Delimiters,
}

impl<'a> SegmentReader<'a> {
    /// Splits `text` on the segment terminator.
    ///
    /// Whitespace before a segment tag and `\r`/`\n` after the segment are
    /// ignored, as are blank pieces. `base` is the document index of the
    /// first segment, used in error reports.
    pub fn new(text: &'a str, delimiters: Delimiters, base: usize) -> Result<Self, DecodeError> {
        let mut segments = Vec::new();
        for piece in text.split(delimiters.segment) {
            let piece = piece
                .trim_start_matches(|c: char| c.is_ascii_whitespace())
                .trim_end_matches(['\r', '\n']);
            if piece.is_empty() {
                continue;
            }
            if base + segments.len() >= MAX_SEGMENTS {
                return Err(DecodeError::LengthExceedsLimit {
                    field: "segments",
                    len: base + segments.len() + 1,
                    max: MAX_SEGMENTS,
                });
            }
            segments.push(piece);
        }
        Ok(Self {
            segments,
            pos: 0,
            base,
            delimiters,
        })
    }

    /// Returns the delimiters this reader splits on.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Returns the document index of the next segment.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Returns the number of unread segments.
    pub fn remaining_len(&self) -> usize {
        self.segments.len() - self.pos
    }

    /// Returns true if all segments have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.segments.len()
    }

    /// Returns the tag of the next segment without consuming it.
    pub fn peek_tag(&self) -> Option<&'a str> {
        let raw: &'a str = *self.segments.get(self.pos)?;
        Some(raw.split(self.delimiters.element).next().unwrap_or(raw))
    }

    /// Reads the next segment as opaque content.
    pub fn read_segment(&mut self, context: &'static str) -> Result<Segment, DecodeError> {
        let index = self.position();
        let raw = self.next_raw(context)?;
        Segment::new(raw, &self.delimiters)
            .map_err(|reason| DecodeError::MalformedSegment { index, reason })
    }

    /// Reads the next segment, requiring its tag to be `tag`, and returns its
    /// document index and elements (index 0 is the tag).
    pub fn expect_segment(&mut self, tag: &'static str) -> Result<(usize, Vec<&'a str>), DecodeError> {
        let index = self.position();
        let raw = self.next_raw(tag)?;
        let elements: Vec<&'a str> = raw.split(self.delimiters.element).collect();
        if elements[0] != tag {
            return Err(DecodeError::UnexpectedSegment {
                expected: tag,
                found: elements[0].to_string(),
                index,
            });
        }
        Ok((index, elements))
    }

    fn next_raw(&mut self, context: &'static str) -> Result<&'a str, DecodeError> {
        let index = self.position();
        let raw = *self
            .segments
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEnd { context })?;
        if raw.len() > MAX_SEGMENT_LEN {
            return Err(DecodeError::MalformedSegment {
                index,
                reason: "segment exceeds maximum length",
            });
        }
        self.pos += 1;
        Ok(raw)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding segments.
#[derive(Debug, Clone)]
pub struct SegmentWriter {
    buf: String,
    delimiters: Delimiters,
    layout: Layout,
    segments: usize,
}

impl SegmentWriter {
    /// Creates a new writer.
    pub fn new(delimiters: Delimiters, layout: Layout) -> Self {
        Self::with_capacity(delimiters, layout, 0)
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(delimiters: Delimiters, layout: Layout, capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            delimiters,
            layout,
            segments: 0,
        }
    }

    /// Returns the delimiters segments are written with.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Returns the written text.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Returns a reference to the written text.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns the number of segments written.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Returns the written text, checked against the limits the decoder
    /// enforces on its input.
    pub fn finish(self) -> Result<String, EncodeError> {
        if self.segments > MAX_SEGMENTS {
            return Err(EncodeError::LengthExceedsLimit {
                field: "segments",
                len: self.segments,
                max: MAX_SEGMENTS,
            });
        }
        if self.buf.len() > MAX_DOCUMENT_SIZE {
            return Err(EncodeError::LengthExceedsLimit {
                field: "document",
                len: self.buf.len(),
                max: MAX_DOCUMENT_SIZE,
            });
        }
        Ok(self.buf)
    }

    /// Writes a segment from its tag and elements.
    pub fn write_segment(&mut self, tag: &str, elements: &[&str]) {
        self.buf.push_str(tag);
        for element in elements {
            self.buf.push(self.delimiters.element);
            self.buf.push_str(element);
        }
        self.end_segment();
    }

    /// Writes an opaque segment verbatim.
    pub fn write_raw(&mut self, segment: &Segment) {
        self.buf.push_str(segment.as_str());
        self.end_segment();
    }

    /// Writes an already-encoded block of segments verbatim.
    ///
    /// In the readable layout a missing final newline is added so the next
    /// segment starts on its own line.
    pub fn write_block(&mut self, text: &str, segments: usize) {
        self.buf.push_str(text);
        if self.layout == Layout::Readable && !text.ends_with('\n') {
            self.buf.push('\n');
        }
        self.segments += segments;
    }

    #[inline]
    fn end_segment(&mut self) {
        self.buf.push(self.delimiters.segment);
        if self.layout == Layout::Readable {
            self.buf.push('\n');
        }
        self.segments += 1;
    }
}
