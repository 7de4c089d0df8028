//! HTTP Range header parsing (RFC 7233)
//!
//! Only a single `bytes=<start>-<end?>` range is accepted. Suffix ranges
//! (`bytes=-500`), other units and multi-range requests are reported as
//! malformed. Parsing is split in two steps: [`RangeSpec::parse`] checks the
//! syntax, [`RangeSpec::resolve`] checks the numbers against a file size and
//! yields a [`ByteRange`] that is always within bounds.

use thiserror::Error;

/// Range parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Header does not match `bytes=<start>-<end?>`
    #[error("malformed range header: {0}")]
    Malformed(String),
    /// Range lies outside the file
    #[error("range not satisfiable for size {size}")]
    NotSatisfiable { size: u64 },
}

/// Syntactically valid range, not yet checked against a file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: u64,
    pub end: Option<u64>,
}

/// Inclusive byte interval within a file of `size` bytes
///
/// Invariant: `start <= end < size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
    size: u64,
}

impl RangeSpec {
    /// Parse a raw `Range` header value
    ///
    /// # Examples
    /// ```
    /// use fileserver::range::RangeSpec;
    /// let spec = RangeSpec::parse("bytes=500-").unwrap();
    /// assert_eq!((spec.start, spec.end), (500, None));
    /// ```
    pub fn parse(header: &str) -> Result<Self, RangeError> {
        let (unit, set) = header
            .trim()
            .split_once('=')
            .ok_or_else(|| RangeError::Malformed("missing '='".to_string()))?;

        if !unit.trim().eq_ignore_ascii_case("bytes") {
            return Err(RangeError::Malformed(format!("unsupported unit '{}'", unit.trim())));
        }

        if set.contains(',') {
            return Err(RangeError::Malformed(
                "multiple ranges are not supported".to_string(),
            ));
        }

        let (start, end) = set
            .split_once('-')
            .ok_or_else(|| RangeError::Malformed("missing '-'".to_string()))?;

        let start = parse_position(start.trim())
            .ok_or_else(|| RangeError::Malformed("invalid range start".to_string()))?;

        let end = match end.trim() {
            "" => None,
            end => Some(
                parse_position(end)
                    .ok_or_else(|| RangeError::Malformed("invalid range end".to_string()))?,
            ),
        };

        Ok(Self { start, end })
    }

    /// Validate against a file size
    ///
    /// An open end runs to the last byte and an end past the file is clamped
    /// to it. A start at or beyond the end of the file, or after the end of
    /// the range, is not satisfiable.
    pub fn resolve(self, size: u64) -> Result<ByteRange, RangeError> {
        if self.start >= size {
            return Err(RangeError::NotSatisfiable { size });
        }

        let last = size - 1;
        let end = self.end.unwrap_or(last);
        if self.start > end {
            return Err(RangeError::NotSatisfiable { size });
        }

        Ok(ByteRange {
            start: self.start,
            end: end.min(last),
            size,
        })
    }
}

impl ByteRange {
    /// First byte offset
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte offset (inclusive)
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Total size of the file
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of bytes in the range
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a 206 response
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.size)
    }
}

/// Parse and validate a `Range` header in one step
pub fn parse_range(header: &str, size: u64) -> Result<ByteRange, RangeError> {
    RangeSpec::parse(header)?.resolve(size)
}

/// `Content-Range` value for a 416 response
pub fn unsatisfied_content_range(size: u64) -> String {
    format!("bytes */{}", size)
}

/// Decimal digits only. Values too large for u64 saturate so that an
/// oversized start is unsatisfiable and an oversized end is clamped.
fn parse_position(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
