use std::time::Instant;

use crate::FrameOutput;

/// One complete JPEG codestream, SOI through EOI inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame bytes, in the configured delivery shape.
    pub output: FrameOutput,
    /// When the EOI marker of this frame was matched.
    pub timestamp: Instant,
    /// 0-based emission order since the scanner was created or last reset.
    pub index: u64,
}

impl Frame {
    /// Length of the frame in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Always `false` for emitted frames; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Copy the frame into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.output.to_vec()
    }
}

/// Receives frames from a scanner, in stream order.
///
/// Implemented for every `FnMut(Frame)`, so a closure is usually all that is
/// needed:
///
/// ```rust
/// use jpegpipe::{Bytes, ByteOffset, Frame, FrameScanner, ScannerOptions};
///
/// let mut scanner = FrameScanner::new(ScannerOptions {
///     byte_offset: ByteOffset::new(0),
///     ..Default::default()
/// });
/// let mut sizes = Vec::new();
/// scanner.process_chunk(
///     Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9, 0xFF, 0xD8, 0x00, 0xFF, 0xD9]),
///     &mut |frame: Frame| sizes.push(frame.len()),
/// );
/// assert_eq!(sizes, [4, 5]);
/// ```
pub trait FrameSink {
    /// Accept one completed frame.
    fn frame(&mut self, frame: Frame);
}

impl<F: FnMut(Frame)> FrameSink for F {
    #[inline]
    fn frame(&mut self, frame: Frame) {
        self(frame);
    }
}

/// Stamps completed outputs and hands them to a sink, remembering the last
/// one.
#[derive(Debug, Default)]
pub(crate) struct Emitter {
    last: Option<Frame>,
    emitted: u64,
}

impl Emitter {
    pub(crate) fn emit<S: FrameSink + ?Sized>(&mut self, output: FrameOutput, sink: &mut S) {
        let frame = Frame {
            output,
            timestamp: Instant::now(),
            index: self.emitted,
        };
        self.emitted += 1;
        log::debug!(
            "frame {} complete: {} bytes in {} segment(s) as {}",
            frame.index,
            frame.len(),
            match &frame.output {
                FrameOutput::SegmentList(segments) => segments.parts().len(),
                _ => 1,
            },
            frame.output.mode()
        );
        self.last = Some(frame.clone());
        sink.frame(frame);
    }

    pub(crate) fn last(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub(crate) fn emitted(&self) -> u64 {
        self.emitted
    }

    pub(crate) fn reset(&mut self) {
        self.last = None;
        self.emitted = 0;
    }
}
