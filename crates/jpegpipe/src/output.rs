//! Delivery shapes for completed frames.

use core::fmt;

use bstr::ByteSlice;
use bytes::{Bytes, BytesMut};

use crate::{OutputMode, accumulator::PendingFrame, pool::BufferPool};

/// The chunk segments that make up one frame, in stream order.
///
/// Segments are reference-counted views into the chunks they came from, so
/// they stay valid for as long as the consumer keeps them, independently of
/// what the scanner does next.
#[derive(Clone, PartialEq, Eq)]
pub struct Segments {
    parts: Vec<Bytes>,
    total_len: usize,
}

impl Segments {
    /// The segments in order.
    #[must_use]
    pub fn parts(&self) -> &[Bytes] {
        &self.parts
    }

    /// Sum of all segment lengths.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Copy the segments into one contiguous buffer.
    ///
    /// A single segment is returned as-is without copying.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        match self.parts.as_slice() {
            [] => Bytes::new(),
            [only] => only.clone(),
            parts => concat(parts, self.total_len),
        }
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> core::slice::Iter<'_, Bytes> {
        self.parts.iter()
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Bytes;
    type IntoIter = core::slice::Iter<'a, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl fmt::Debug for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segments")
            .field("lens", &self.parts.iter().map(Bytes::len).collect::<Vec<_>>())
            .field("total_len", &self.total_len)
            .finish()
    }
}

/// A completed frame in the shape selected by [`OutputMode`].
#[derive(Clone, PartialEq, Eq)]
pub enum FrameOutput {
    /// The whole frame in one contiguous buffer.
    SingleBuffer(Bytes),
    /// The frame as ordered chunk segments, not copied.
    SegmentList(Segments),
    /// The whole frame in one contiguous buffer owned by the scanner's pool.
    ///
    /// Dropping the handle promptly lets the pool reuse the allocation.
    PooledBuffer(Bytes),
}

impl FrameOutput {
    /// Length of the frame in bytes, SOI through EOI inclusive.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            FrameOutput::SingleBuffer(buf) | FrameOutput::PooledBuffer(buf) => buf.len(),
            FrameOutput::SegmentList(segments) => segments.total_len(),
        }
    }

    /// Whether the frame holds no bytes. Emitted frames never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The frame as one buffer, if it already is one.
    #[must_use]
    pub fn as_contiguous(&self) -> Option<&Bytes> {
        match self {
            FrameOutput::SingleBuffer(buf) | FrameOutput::PooledBuffer(buf) => Some(buf),
            FrameOutput::SegmentList(_) => None,
        }
    }

    /// The frame as one buffer, concatenating segments if needed.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            FrameOutput::SingleBuffer(buf) | FrameOutput::PooledBuffer(buf) => buf,
            FrameOutput::SegmentList(segments) => segments.to_bytes(),
        }
    }

    /// Copy the frame into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        match self {
            FrameOutput::SingleBuffer(buf) | FrameOutput::PooledBuffer(buf) => buf.to_vec(),
            FrameOutput::SegmentList(segments) => segments.parts().concat(),
        }
    }

    /// The [`OutputMode`] that produced this output.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        match self {
            FrameOutput::SingleBuffer(_) => OutputMode::SingleBuffer,
            FrameOutput::SegmentList(_) => OutputMode::SegmentList,
            FrameOutput::PooledBuffer(_) => OutputMode::PooledBuffer,
        }
    }
}

impl fmt::Debug for FrameOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn edges(buf: &[u8]) -> String {
            if buf.len() <= 8 {
                return format!("{:?}", buf.as_bstr());
            }
            format!(
                "{:?}..{:?}",
                buf[..4].as_bstr(),
                buf[buf.len() - 4..].as_bstr()
            )
        }

        match self {
            FrameOutput::SingleBuffer(buf) => write!(f, "SingleBuffer({} bytes, {})", buf.len(), edges(buf)),
            FrameOutput::PooledBuffer(buf) => write!(f, "PooledBuffer({} bytes, {})", buf.len(), edges(buf)),
            FrameOutput::SegmentList(segments) => segments.fmt(f),
        }
    }
}

/// Turns a completed [`PendingFrame`] into a [`FrameOutput`].
///
/// Chosen once from [`OutputMode`] and fixed for the scanner's lifetime.
#[derive(Debug)]
pub(crate) enum OutputStrategy {
    SingleBuffer,
    SegmentList,
    Pooled(BufferPool),
}

impl OutputStrategy {
    pub(crate) fn new(mode: OutputMode, pool_size: usize) -> Self {
        match mode {
            OutputMode::SingleBuffer => OutputStrategy::SingleBuffer,
            OutputMode::SegmentList => OutputStrategy::SegmentList,
            OutputMode::PooledBuffer => OutputStrategy::Pooled(BufferPool::new(pool_size)),
        }
    }

    pub(crate) fn mode(&self) -> OutputMode {
        match self {
            OutputStrategy::SingleBuffer => OutputMode::SingleBuffer,
            OutputStrategy::SegmentList => OutputMode::SegmentList,
            OutputStrategy::Pooled(_) => OutputMode::PooledBuffer,
        }
    }

    pub(crate) fn pool(&self) -> Option<&BufferPool> {
        match self {
            OutputStrategy::Pooled(pool) => Some(pool),
            _ => None,
        }
    }

    /// Consume the pending frame, leaving it empty.
    pub(crate) fn deliver(&mut self, pending: &mut PendingFrame) -> FrameOutput {
        let (parts, total_len) = pending.take();
        match self {
            OutputStrategy::SingleBuffer => FrameOutput::SingleBuffer(match parts.as_slice() {
                [only] => only.clone(),
                parts => concat(parts, total_len),
            }),
            OutputStrategy::SegmentList => FrameOutput::SegmentList(Segments { parts, total_len }),
            OutputStrategy::Pooled(pool) => FrameOutput::PooledBuffer(pool.concat(&parts, total_len)),
        }
    }
}

fn concat(parts: &[Bytes], total_len: usize) -> Bytes {
    let mut buf = BytesMut::with_capacity(total_len);
    for part in parts {
        buf.extend_from_slice(part);
    }
    buf.freeze()
}
