//! Segmented byte accumulator.

use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

/// Bytes read from the source and not yet emitted, kept as the source
/// handed them over.
///
/// Segments are appended at the back and consumed from the front. No segment
/// is ever empty, and `len` always equals the sum of segment lengths.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    segments: VecDeque<Bytes>,
    len: usize,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a segment without copying. Empty segments are dropped.
    pub(crate) fn append(&mut self, data: Bytes) {
        if data.is_empty() {
            return;
        }
        self.len += data.len();
        self.segments.push_back(data);
    }

    /// Returns the smallest offset at which `pattern` starts.
    pub(crate) fn find(&self, pattern: &[u8]) -> Option<usize> {
        self.find_from(pattern, 0)
    }

    /// Returns the smallest offset `>= from` at which `pattern` starts.
    ///
    /// Matches may span any number of segments.
    pub(crate) fn find_from(&self, pattern: &[u8], from: usize) -> Option<usize> {
        let first = *pattern.first()?;
        if from + pattern.len() > self.len {
            return None;
        }
        let last_start = self.len - pattern.len();

        let mut base = 0;
        for (idx, segment) in self.segments.iter().enumerate() {
            let seg_end = base + segment.len();
            if seg_end <= from {
                base = seg_end;
                continue;
            }

            let skip = from.saturating_sub(base);
            for (pos, &byte) in segment.iter().enumerate().skip(skip) {
                let start = base + pos;
                if start > last_start {
                    return None;
                }
                if byte == first && self.matches_at(idx, pos, pattern) {
                    return Some(start);
                }
            }
            base = seg_end;
        }
        None
    }

    /// Compares `pattern` against the bytes starting at `pos` in segment
    /// `idx`, walking into following segments as needed.
    fn matches_at(&self, mut idx: usize, mut pos: usize, pattern: &[u8]) -> bool {
        let mut rest = pattern;
        while !rest.is_empty() {
            let Some(segment) = self.segments.get(idx) else {
                return false;
            };
            let available = &segment[pos..];
            let n = available.len().min(rest.len());
            if available[..n] != rest[..n] {
                return false;
            }
            rest = &rest[n..];
            idx += 1;
            pos = 0;
        }
        true
    }

    /// Removes and returns the first `n` bytes (clamped to `len`).
    ///
    /// Zero-copy when the prefix lies within the front segment.
    pub(crate) fn take(&mut self, n: usize) -> Bytes {
        let n = n.min(self.len);
        if n == 0 {
            return Bytes::new();
        }

        if let Some(front) = self.segments.front_mut() {
            if front.len() > n {
                self.len -= n;
                return front.split_to(n);
            }
            if front.len() == n {
                self.len -= n;
                return self.segments.pop_front().unwrap_or_default();
            }
        }

        let mut out = BytesMut::with_capacity(n);
        let mut remaining = n;
        while remaining > 0 {
            let Some(front) = self.segments.front_mut() else {
                break;
            };
            if front.len() <= remaining {
                remaining -= front.len();
                out.extend_from_slice(front);
                self.segments.pop_front();
            } else {
                out.extend_from_slice(&front.split_to(remaining));
                remaining = 0;
            }
        }
        self.len -= n - remaining;
        out.freeze()
    }

    /// Discards the first `n` bytes (clamped to `len`).
    pub(crate) fn advance(&mut self, n: usize) {
        let mut remaining = n.min(self.len);
        self.len -= remaining;
        while remaining > 0 {
            let Some(front) = self.segments.front_mut() else {
                break;
            };
            if front.len() <= remaining {
                remaining -= front.len();
                self.segments.pop_front();
            } else {
                let _ = front.split_to(remaining);
                remaining = 0;
            }
        }
    }

    /// Removes and returns everything.
    pub(crate) fn take_all(&mut self) -> Bytes {
        self.take(self.len)
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(parts: &[&'static [u8]]) -> Accumulator {
        let mut acc = Accumulator::new();
        for part in parts {
            acc.append(Bytes::from_static(part));
        }
        acc
    }

    #[test]
    fn test_append_tracks_len() {
        let acc = acc(&[b"abc", b"", b"de"]);
        assert_eq!(acc.len(), 5);
        assert_eq!(acc.segments.len(), 2);
    }

    #[test]
    fn test_find_within_segment() {
        let acc = acc(&[b"hello world"]);
        assert_eq!(acc.find(b" "), Some(5));
        assert_eq!(acc.find(b"world"), Some(6));
        assert_eq!(acc.find(b"xyz"), None);
    }

    #[test]
    fn test_find_across_segments() {
        let acc = acc(&[b"ab", b"cX", b"Y", b"Zd"]);
        assert_eq!(acc.find(b"XYZ"), Some(3));
        assert_eq!(acc.find(b"bcX"), Some(1));
        assert_eq!(acc.find(b"abcXYZd"), Some(0));
        assert_eq!(acc.find(b"abcXYZde"), None);
    }

    #[test]
    fn test_find_returns_earliest() {
        let acc = acc(&[b"a-b", b"-c-"]);
        assert_eq!(acc.find(b"-"), Some(1));
        assert_eq!(acc.find_from(b"-", 2), Some(3));
        assert_eq!(acc.find_from(b"-", 4), Some(5));
        assert_eq!(acc.find_from(b"-", 6), None);
    }

    #[test]
    fn test_find_partial_prefix_at_end() {
        let acc = acc(&[b"abX"]);
        assert_eq!(acc.find(b"XY"), None);
    }

    #[test]
    fn test_find_overlapping_candidates() {
        let acc = acc(&[b"aaa", b"ab"]);
        assert_eq!(acc.find(b"aab"), Some(2));
    }

    #[test]
    fn test_take_zero_copy_front() {
        let original = Bytes::from_static(b"hello world");
        let mut acc = Accumulator::new();
        acc.append(original.clone());

        let head = acc.take(5);
        assert_eq!(&head[..], b"hello");
        assert_eq!(head.as_ptr(), original.as_ptr());
        assert_eq!(acc.len(), 6);
        assert_eq!(acc.find(b"w"), Some(1));
    }

    #[test]
    fn test_take_across_segments() {
        let mut acc = acc(&[b"ab", b"cd", b"ef"]);
        assert_eq!(&acc.take(3)[..], b"abc");
        assert_eq!(acc.len(), 3);
        assert_eq!(&acc.take_all()[..], b"def");
        assert!(acc.is_empty());
    }

    #[test]
    fn test_take_clamps() {
        let mut acc = acc(&[b"ab"]);
        assert_eq!(&acc.take(10)[..], b"ab");
        assert!(acc.is_empty());
        assert!(acc.take(1).is_empty());
    }

    #[test]
    fn test_advance() {
        let mut acc = acc(&[b"ab", b"cd", b"ef"]);
        acc.advance(3);
        assert_eq!(acc.len(), 3);
        assert_eq!(&acc.take_all()[..], b"def");
    }

    #[test]
    fn test_clear() {
        let mut acc = acc(&[b"ab", b"cd"]);
        acc.clear();
        assert!(acc.is_empty());
        assert_eq!(acc.find(b"a"), None);
    }
}
