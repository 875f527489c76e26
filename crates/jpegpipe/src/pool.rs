//! Rotating pool of frame buffers.
//!
//! Each slot remembers the last buffer it handed out. When the slot comes
//! around again its buffer is reclaimed only if nobody else still holds it
//! (`Bytes::try_into_mut` succeeds exactly when the handle is unique), so a
//! frame the consumer is still reading is never overwritten. If the old buffer
//! is still shared the slot gets a fresh allocation instead.

use bytes::{Bytes, BytesMut};

/// Buffer reuse counters of a scanner using
/// [`OutputMode::PooledBuffer`](crate::OutputMode::PooledBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of buffers in rotation.
    pub size: usize,
    /// Frames written into a buffer reclaimed from an earlier frame.
    pub reused: u64,
    /// Frames that needed a fresh allocation, either while the pool warms up
    /// or because the consumer still held the slot's previous buffer.
    pub allocated: u64,
}

#[derive(Debug)]
pub(crate) struct BufferPool {
    slots: Vec<Bytes>,
    next: usize,
    reused: u64,
    allocated: u64,
}

impl BufferPool {
    /// Create a pool of `size` slots. `size` must be at least 2.
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size >= 2, "a pool needs at least two buffers in flight");
        Self {
            slots: vec![Bytes::new(); size],
            next: 0,
            reused: 0,
            allocated: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Copy `segments` into the next pooled buffer and return a handle to it.
    pub(crate) fn concat(&mut self, segments: &[Bytes], total_len: usize) -> Bytes {
        let index = self.next;
        self.next = (self.next + 1) % self.slots.len();

        let previous = core::mem::take(&mut self.slots[index]);
        let mut buf = match previous.try_into_mut() {
            Ok(mut buf) if buf.capacity() > 0 => {
                self.reused += 1;
                buf.clear();
                buf.reserve(total_len);
                buf
            }
            _ => {
                self.allocated += 1;
                BytesMut::with_capacity(total_len)
            }
        };
        for segment in segments {
            buf.extend_from_slice(segment);
        }

        let frozen = buf.freeze();
        self.slots[index] = frozen.clone();
        frozen
    }

    /// Number of frames written into a reclaimed buffer.
    pub(crate) fn reused(&self) -> u64 {
        self.reused
    }

    /// Number of frames that needed a new allocation.
    pub(crate) fn allocated(&self) -> u64 {
        self.allocated
    }
}
