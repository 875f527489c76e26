//! Frame-boundary detection over a chunked byte stream.
//!
//! Overview
//! - The scanner alternates between two phases. While searching for a start
//!   it looks for `FF D8` and throws away everything before it. While
//!   searching for an end it looks for `FF D9` and keeps every byte from the
//!   start marker onwards in the pending frame.
//! - Chunk boundaries may fall anywhere, including between the two bytes of a
//!   marker. When a chunk ends in `FF` while that `FF` could begin the marker
//!   being searched for, `marker_split` is set and the next chunk is checked
//!   for the second byte before anything else. A split start marker has its
//!   lead byte re-created since the chunk holding it was already discarded; a
//!   split end marker needs nothing extra because its lead byte is already in
//!   the pending frame.
//! - Frames are built from zero-copy views of the chunks. A frame that fits
//!   inside one chunk is a single view of it.
//!
//! Search skip
//! - After a start marker the end search skips `byte_offset` bytes. The skip
//!   only narrows where `FF D9` is looked for; the skipped bytes always stay
//!   in the frame. The skip can span chunks: `skip_remaining` carries what is
//!   left of it into the next chunk.

use bytes::Bytes;

use crate::{
    ByteOffset, Frame, FrameSink, OutputMode, PoolStats, ScannerOptions,
    accumulator::PendingFrame,
    frame::Emitter,
    marker::{EOI, SOI, ends_with_lead, find_marker},
    output::OutputStrategy,
};

/// Pending frames larger than this are reported once, since a stream that
/// never produces an EOI grows the pending frame without bound.
const PENDING_WARN_LEN: usize = 64 * 1024 * 1024;

/// Which marker the scanner is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    /// Looking for an SOI marker; bytes seen here are discarded.
    #[default]
    SearchingStart,
    /// Inside a frame, looking for its EOI marker.
    SearchingEnd,
}

/// Everything the scanner remembers between chunks.
#[derive(Debug, Default)]
struct ScanState {
    phase: ScanPhase,
    pending: PendingFrame,
    /// The previous chunk ended with the lead byte of the marker currently
    /// searched for.
    marker_split: bool,
    /// Bytes of the current frame still excluded from the EOI search.
    skip_remaining: usize,
}

impl ScanState {
    /// Scan one chunk, calling `complete` with the pending frame every time an
    /// EOI marker closes it. `complete` must drain the pending frame.
    fn advance(
        &mut self,
        chunk: &Bytes,
        byte_offset: usize,
        mut complete: impl FnMut(&mut PendingFrame),
    ) {
        let len = chunk.len();
        if len == 0 {
            return;
        }

        // Next unread byte.
        let mut pos = 0;
        // Where the current frame's bytes begin in this chunk. A frame carried
        // over from an earlier chunk continues at 0.
        let mut frame_start = 0;
        // First index that could hold the EOI lead byte, before the skip.
        let mut cursor = 0;

        loop {
            match self.phase {
                ScanPhase::SearchingStart => {
                    let split = core::mem::take(&mut self.marker_split);
                    if split && chunk[pos] == SOI[1] {
                        debug_assert_eq!(pos, 0);
                        log::trace!("SOI split across chunks");
                        self.pending.push_soi_lead();
                        frame_start = pos;
                        cursor = pos + 1;
                    } else if let Some(soi) = find_marker(chunk, SOI, pos) {
                        log::trace!("SOI at {soi}");
                        if soi > pos {
                            log::debug!("discarding {} bytes before SOI", soi - pos);
                        }
                        frame_start = soi;
                        cursor = soi + 2;
                    } else {
                        self.marker_split = ends_with_lead(&chunk[pos..], SOI);
                        log::debug!("no SOI, discarding {} bytes", len - pos);
                        return;
                    }
                    self.skip_remaining = byte_offset;
                    self.phase = ScanPhase::SearchingEnd;
                }
                ScanPhase::SearchingEnd => {
                    let split = core::mem::take(&mut self.marker_split);
                    let end = if split && chunk[pos] == EOI[1] {
                        debug_assert_eq!(pos, 0);
                        log::trace!("EOI split across chunks");
                        pos + 1
                    } else {
                        let window = (cursor + self.skip_remaining).min(len);
                        self.skip_remaining -= window - cursor;
                        if let Some(eoi) = find_marker(chunk, EOI, window) {
                            log::trace!("EOI at {eoi}");
                            eoi + 2
                        } else {
                            self.carry(chunk.slice(frame_start..));
                            // Only a lead byte inside the search window may start the EOI.
                            self.marker_split = window < len && ends_with_lead(chunk, EOI);
                            return;
                        }
                    };

                    self.pending.push(chunk.slice(frame_start..end));
                    complete(&mut self.pending);
                    debug_assert!(self.pending.is_empty());
                    self.phase = ScanPhase::SearchingStart;

                    if end == len {
                        return;
                    }
                    pos = end;
                }
            }
        }
    }

    /// Keep the tail of a chunk that ends inside a frame.
    fn carry(&mut self, segment: Bytes) {
        let before = self.pending.len();
        self.pending.push(segment);
        if before < PENDING_WARN_LEN && self.pending.len() >= PENDING_WARN_LEN {
            log::warn!(
                "pending frame exceeds {} bytes without an EOI marker; \
                 the stream may be truncated or not MJPEG",
                PENDING_WARN_LEN
            );
        }
    }
}

/// Incremental JPEG frame extractor.
///
/// Feed it the chunks of an MJPEG byte stream, in order and of any size. Each
/// chunk is scanned to completion before the call returns, and every frame
/// whose EOI marker falls in that chunk is handed out, in stream order.
///
/// A scanner is single-threaded state: serialize calls into one instance.
///
/// A stream that stops mid-frame leaves the partial frame pending; it stays
/// until more bytes arrive or [`reset`](Self::reset) discards it. A stream
/// that never delivers an EOI keeps growing the pending frame.
///
/// # Examples
///
/// ```rust
/// use jpegpipe::{ByteOffset, FrameScanner, ScannerOptions};
///
/// // Toy frames are shorter than the default search skip.
/// let mut scanner = FrameScanner::new(ScannerOptions {
///     byte_offset: ByteOffset::new(0),
///     ..Default::default()
/// });
/// let jpeg = [0xFF, 0xD8, 0xAA, 0xBB, 0xFF, 0xD9];
///
/// // The EOI marker is split between the two chunks.
/// assert!(scanner.feed_slice(&jpeg[..5]).is_empty());
/// let frames = scanner.feed_slice(&jpeg[5..]);
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].to_vec(), jpeg);
/// ```
///
/// With the default [`ByteOffset`] of 200 every frame must be at least 204
/// bytes long, which real JPEG images always are.
#[derive(Debug)]
pub struct FrameScanner {
    state: ScanState,
    byte_offset: ByteOffset,
    strategy: OutputStrategy,
    emitter: Emitter,
}

impl FrameScanner {
    /// Create a scanner with the given options.
    #[must_use]
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            state: ScanState::default(),
            byte_offset: options.byte_offset,
            strategy: OutputStrategy::new(options.output_mode, options.effective_pool_size()),
            emitter: Emitter::default(),
        }
    }

    /// Scan one chunk, handing every completed frame to `sink`.
    ///
    /// Segments of frames that are still incomplete keep a reference to
    /// `chunk`; the caller is free to drop or reuse its own handle.
    pub fn process_chunk<S: FrameSink + ?Sized>(&mut self, chunk: Bytes, sink: &mut S) {
        let Self {
            state,
            byte_offset,
            strategy,
            emitter,
        } = self;
        state.advance(&chunk, byte_offset.get(), |pending| {
            let output = strategy.deliver(pending);
            emitter.emit(output, &mut *sink);
        });
    }

    /// Scan one chunk and collect the frames it completes.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Vec<Frame> {
        let mut frames = Vec::new();
        self.process_chunk(chunk.into(), &mut |frame: Frame| frames.push(frame));
        frames
    }

    /// Scan a borrowed chunk. The chunk is copied once into shared storage so
    /// pending segments never point at the caller's buffer.
    pub fn feed_slice(&mut self, chunk: &[u8]) -> Vec<Frame> {
        if chunk.is_empty() {
            return Vec::new();
        }
        self.feed(Bytes::copy_from_slice(chunk))
    }

    /// Drop all in-flight state: the pending frame, a half-seen marker, and the
    /// cached last frame. Options and the output pool are kept.
    pub fn reset(&mut self) {
        log::debug!(
            "reset: discarding {} pending bytes after {} frames",
            self.state.pending.len(),
            self.emitter.emitted()
        );
        self.state.phase = ScanPhase::SearchingStart;
        self.state.pending.clear();
        self.state.marker_split = false;
        self.state.skip_remaining = 0;
        self.emitter.reset();
    }

    /// Current EOI search skip.
    #[must_use]
    pub fn byte_offset(&self) -> ByteOffset {
        self.byte_offset
    }

    /// Change the EOI search skip. Applies from the next SOI marker on.
    pub fn set_byte_offset(&mut self, byte_offset: ByteOffset) {
        self.byte_offset = byte_offset;
    }

    /// Delivery shape of emitted frames.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        self.strategy.mode()
    }

    /// Number of pooled buffers, or `None` unless the output mode is
    /// [`OutputMode::PooledBuffer`].
    #[must_use]
    pub fn pool_size(&self) -> Option<usize> {
        self.strategy.pool().map(|pool| pool.len())
    }

    /// Buffer reuse counters, or `None` unless the output mode is
    /// [`OutputMode::PooledBuffer`].
    #[must_use]
    pub fn pool_stats(&self) -> Option<PoolStats> {
        self.strategy.pool().map(|pool| PoolStats {
            size: pool.len(),
            reused: pool.reused(),
            allocated: pool.allocated(),
        })
    }

    /// Which marker the scanner is looking for.
    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        self.state.phase
    }

    /// Whether the scanner is between frames.
    #[must_use]
    pub fn is_searching_start(&self) -> bool {
        self.state.phase == ScanPhase::SearchingStart
    }

    /// Bytes accumulated for the frame in progress.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.pending.len()
    }

    /// Segments of the frame in progress, in order.
    #[must_use]
    pub fn pending_segments(&self) -> &[Bytes] {
        self.state.pending.segments()
    }

    /// The most recently emitted frame, until the next [`reset`](Self::reset).
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.emitter.last()
    }

    /// Completion time of the most recently emitted frame.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<std::time::Instant> {
        self.emitter.last().map(|frame| frame.timestamp)
    }

    /// Length of the most recently emitted frame.
    #[must_use]
    pub fn last_total_len(&self) -> Option<usize> {
        self.emitter.last().map(Frame::len)
    }

    /// Frames emitted since construction or the last reset.
    #[must_use]
    pub fn frames_emitted(&self) -> u64 {
        self.emitter.emitted()
    }
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new(ScannerOptions::default())
    }
}
