//! Segments of the frame currently being assembled.
//!
//! A frame that spans several chunks is held as an ordered list of
//! [`Bytes`] views into those chunks. Views are reference counted, so holding
//! one keeps its chunk alive without copying it and without aliasing memory
//! the caller may reuse.

use bytes::Bytes;

use crate::marker::SOI_LEAD;

/// Ordered byte segments of an incomplete frame, plus their total length.
///
/// Concatenating `segments` in order always reproduces the frame bytes from
/// SOI (inclusive) up to the last byte seen.
#[derive(Debug, Default, Clone)]
pub(crate) struct PendingFrame {
    segments: Vec<Bytes>,
    total_len: usize,
}

impl PendingFrame {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a view of the current chunk. Empty views are dropped.
    #[inline]
    pub(crate) fn push(&mut self, segment: Bytes) {
        if segment.is_empty() {
            return;
        }
        self.total_len += segment.len();
        self.segments.push(segment);
    }

    /// Append the SOI lead byte recovered from the tail of the previous chunk.
    ///
    /// The lead byte was discarded with that chunk while still searching for
    /// a start marker, so it is re-created here rather than referenced.
    pub(crate) fn push_soi_lead(&mut self) {
        self.push(Bytes::from_static(&SOI_LEAD));
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.total_len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    #[inline]
    pub(crate) fn segments(&self) -> &[Bytes] {
        &self.segments
    }

    /// Move the accumulated segments out, leaving this frame empty.
    pub(crate) fn take(&mut self) -> (Vec<Bytes>, usize) {
        let total_len = core::mem::take(&mut self.total_len);
        (core::mem::take(&mut self.segments), total_len)
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
        self.total_len = 0;
    }
}
