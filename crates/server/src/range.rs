/// Inclusive byte span of a single `Range: bytes=` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    Invalid,
    Unsatisfiable,
}

/// Parses a single-range header against a file of `size` bytes. Multiple
/// ranges are rejected; an end past the file is clamped to the last byte.
pub fn parse_range_header(value: &str, size: u64) -> Result<ByteRange, RangeError> {
    let spec = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or(RangeError::Invalid)?;
    if spec.contains(',') {
        return Err(RangeError::Invalid);
    }
    if size == 0 {
        return Err(RangeError::Unsatisfiable);
    }
    let last = size - 1;

    let (start, end) = spec.split_once('-').ok_or(RangeError::Invalid)?;
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        let suffix: u64 = end.parse().map_err(|_| RangeError::Invalid)?;
        if suffix == 0 {
            return Err(RangeError::Unsatisfiable);
        }
        return Ok(ByteRange {
            start: size.saturating_sub(suffix),
            end: last,
        });
    }

    let start: u64 = start.parse().map_err(|_| RangeError::Invalid)?;
    if start > last {
        return Err(RangeError::Unsatisfiable);
    }
    let end = if end.is_empty() {
        last
    } else {
        let end: u64 = end.parse().map_err(|_| RangeError::Invalid)?;
        if end < start {
            return Err(RangeError::Invalid);
        }
        end.min(last)
    };

    Ok(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::{parse_range_header, ByteRange, RangeError};

    #[test]
    fn parses_open_ended_range() {
        let range = parse_range_header("bytes=0-", 100).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 99 });
        assert_eq!(range.length(), 100);
    }

    #[test]
    fn parses_closed_range() {
        let range = parse_range_header("bytes=10-19", 100).unwrap();
        assert_eq!(range, ByteRange { start: 10, end: 19 });
        assert_eq!(range.content_range(100), "bytes 10-19/100");
    }

    #[test]
    fn clamps_end_overflow() {
        let range = parse_range_header("bytes=90-200", 100).unwrap();
        assert_eq!(range, ByteRange { start: 90, end: 99 });
    }

    #[test]
    fn parses_suffix_range() {
        assert_eq!(
            parse_range_header("bytes=-10", 100).unwrap(),
            ByteRange { start: 90, end: 99 }
        );
        assert_eq!(
            parse_range_header("bytes=-500", 100).unwrap(),
            ByteRange { start: 0, end: 99 }
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        for value in ["bytes=0-1,2-3", "bytes=10-5", "items=0-1", "bytes=abc-", "bytes=-", "bytes=5"] {
            assert_eq!(parse_range_header(value, 100).unwrap_err(), RangeError::Invalid, "{}", value);
        }
    }

    #[test]
    fn rejects_unsatisfiable() {
        assert_eq!(
            parse_range_header("bytes=100-", 100).unwrap_err(),
            RangeError::Unsatisfiable
        );
        assert_eq!(
            parse_range_header("bytes=-0", 100).unwrap_err(),
            RangeError::Unsatisfiable
        );
        assert_eq!(
            parse_range_header("bytes=0-", 0).unwrap_err(),
            RangeError::Unsatisfiable
        );
    }
}
