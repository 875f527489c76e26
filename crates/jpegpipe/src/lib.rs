//! Incremental extraction of JPEG frames from MJPEG byte streams.
//!
//! An MJPEG stream, such as the `image2pipe` output of an encoder, is a plain
//! concatenation of JPEG codestreams with no framing around them. Each one
//! starts with the SOI marker `FF D8` and ends with the EOI marker `FF D9`.
//! [`FrameScanner`] finds those markers in chunks of arbitrary size, including
//! markers split across two chunks, and hands out every complete frame in
//! stream order with its exact bytes.
//!
//! ```rust
//! use jpegpipe::{ByteOffset, FrameScanner, OutputMode, ScannerOptions};
//!
//! let mut scanner = FrameScanner::new(ScannerOptions {
//!     byte_offset: ByteOffset::new(0),
//!     output_mode: OutputMode::SegmentList,
//!     ..Default::default()
//! });
//!
//! let mut frames = Vec::new();
//! for chunk in [&[0x00, 0xFF][..], &[0xD8, 0x10, 0x20, 0xFF, 0xD9, 0xFF, 0xD8][..], &[0xFF, 0xD9]] {
//!     frames.extend(scanner.feed_slice(chunk));
//! }
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].to_vec(), [0xFF, 0xD8, 0x10, 0x20, 0xFF, 0xD9]);
//! assert_eq!(frames[1].to_vec(), [0xFF, 0xD8, 0xFF, 0xD9]);
//! ```
//!
//! The crate does not decode or validate JPEG data. It logs through the
//! [`log`] facade and installs no logger of its own.

mod accumulator;
mod chunk_utils;
mod error;
mod frame;
mod marker;
mod options;
mod output;
mod pool;
mod reader;
mod scanner;

#[cfg(test)]
mod tests;

pub use bytes::Bytes;
pub use chunk_utils::{produce_chunks, produce_seeded_chunks, split_after_marker_leads};
pub use error::OptionsError;
pub use frame::{Frame, FrameSink};
pub use marker::{EOI, SOI};
pub use options::{ByteOffset, OutputMode, ScannerOptions};
pub use output::{FrameOutput, Segments};
pub use pool::PoolStats;
pub use reader::FrameReader;
pub use scanner::{FrameScanner, ScanPhase};
