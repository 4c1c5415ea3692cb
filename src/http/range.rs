//! `Range` header parsing (RFC 7233, single range, bytes unit).
//!
//! Browsers send these when seeking media files; supporting the single-range
//! form is enough for a development server. Multi-range and non-byte units
//! are ignored rather than rejected, which RFC 7233 permits.

/// A resolved byte range with inclusive bounds inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes spanned by the range.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// What to do with a request after inspecting its `Range` header.
#[derive(Debug)]
pub enum RangeOutcome {
    /// Serve `206 Partial Content` with the enclosed range.
    Partial(ByteRange),
    /// Serve `416 Range Not Satisfiable`.
    Unsatisfiable,
    /// No usable range; serve the whole file as `200`.
    Whole,
}

/// Resolve a `Range` header against a file of `file_size` bytes.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Bounds are clamped into the file, so `bytes=0-999999` on a small file is
/// satisfiable.
pub fn resolve_range(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Whole;
    };

    // Single range only; a list means "serve everything".
    if spec.contains(',') {
        return RangeOutcome::Whole;
    }

    let Some((start_spec, end_spec)) = spec.split_once('-') else {
        return RangeOutcome::Whole;
    };
    let (start_spec, end_spec) = (start_spec.trim(), end_spec.trim());

    if start_spec.is_empty() {
        return resolve_suffix(end_spec, file_size);
    }

    let Ok(start) = start_spec.parse::<usize>() else {
        return RangeOutcome::Whole;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_spec.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_spec.parse::<usize>() else {
            return RangeOutcome::Whole;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

/// `bytes=-N`: the final N bytes of the file.
fn resolve_suffix(suffix_spec: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_spec.parse::<usize>() else {
        return RangeOutcome::Whole;
    };
    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header_serves_whole_file() {
        assert!(matches!(resolve_range(None, 100), RangeOutcome::Whole));
    }

    #[test]
    fn test_bounded_range() {
        match resolve_range(Some("bytes=0-9"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 0, end: 9 });
                assert_eq!(r.len(), 10);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_open_ended_range() {
        match resolve_range(Some("bytes=50-"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 50, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_end_clamped_to_file() {
        match resolve_range(Some("bytes=10-500"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r.end, 99),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_range() {
        match resolve_range(Some("bytes=-20"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 80, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_longer_than_file() {
        match resolve_range(Some("bytes=-500"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 0, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_unsatisfiable_ranges() {
        assert!(matches!(
            resolve_range(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            resolve_range(Some("bytes=9-5"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            resolve_range(Some("bytes=-0"), 100),
            RangeOutcome::Unsatisfiable
        ));
        assert!(matches!(
            resolve_range(Some("bytes=0-"), 0),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_ignored_forms() {
        assert!(matches!(
            resolve_range(Some("bytes=a-b"), 100),
            RangeOutcome::Whole
        ));
        assert!(matches!(
            resolve_range(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Whole
        ));
        assert!(matches!(
            resolve_range(Some("items=0-9"), 100),
            RangeOutcome::Whole
        ));
    }
}
