use bytes::Bytes;

use crate::{ByteOffset, FrameScanner, OutputMode, ScannerOptions};

/// Length of the marker segments `synthetic_jpeg` writes before scan data.
pub(crate) const HEADER_LEN: usize = 2 + 18 + 69 + 19 + 14;

struct XorShift(u64);

impl XorShift {
    fn next_u8(&mut self) -> u8 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0.to_le_bytes()[3]
    }
}

/// Build a structurally plausible baseline JPEG: SOI, APP0, DQT, SOF0, SOS,
/// `scan_len` bytes of entropy-coded data with `FF` stuffing, EOI.
///
/// The only `FF D8` / `FF D9` pairs in the result are the frame's own markers.
pub(crate) fn synthetic_jpeg(seed: u64, scan_len: usize) -> Vec<u8> {
    let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
    let mut out = Vec::with_capacity(HEADER_LEN + scan_len * 2 + 2);

    out.extend_from_slice(&[0xFF, 0xD8]);
    out.extend_from_slice(&[
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00,
    ]);
    out.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
    for _ in 0..64 {
        out.push(rng.next_u8().clamp(1, 0xFE));
    }
    out.extend_from_slice(&[
        0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10, 0x03, 0x01, 0x22, 0x00, 0x02, 0x11,
        0x01, 0x03, 0x11, 0x01,
    ]);
    out.extend_from_slice(&[
        0xFF, 0xDA, 0x00, 0x0C, 0x03, 0x01, 0x00, 0x02, 0x11, 0x03, 0x11, 0x00, 0x3F, 0x00,
    ]);
    debug_assert_eq!(out.len(), HEADER_LEN);

    for _ in 0..scan_len {
        let b = rng.next_u8();
        out.push(b);
        if b == 0xFF {
            out.push(0x00);
        }
    }
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub(crate) fn options(byte_offset: usize, output_mode: OutputMode) -> ScannerOptions {
    ScannerOptions {
        byte_offset: ByteOffset::new(i64::try_from(byte_offset).unwrap()),
        output_mode,
        ..Default::default()
    }
}

/// Feed `chunks` as zero-copy slices of one shared buffer and return every
/// emitted frame's bytes.
pub(crate) fn scan_chunks(options: ScannerOptions, chunks: &[&[u8]]) -> Vec<Vec<u8>> {
    let stream = Bytes::from(chunks.concat());
    let mut scanner = FrameScanner::new(options);
    let mut frames = Vec::new();
    let mut start = 0;
    for chunk in chunks {
        let end = start + chunk.len();
        for frame in scanner.feed(stream.slice(start..end)) {
            assert!(!frame.is_empty());
            frames.push(frame.to_vec());
        }
        start = end;
    }
    frames
}

/// Cut `stream` into chunks using arbitrary split sizes, the same way the
/// partition properties do.
pub(crate) fn split_by(stream: &[u8], splits: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut idx = 0;
    for s in splits {
        let remaining = stream.len() - idx;
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        chunks.push(stream[idx..idx + size].to_vec());
        idx += size;
    }
    if idx < stream.len() {
        chunks.push(stream[idx..].to_vec());
    }
    chunks
}
