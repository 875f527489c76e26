#![allow(missing_docs, dead_code)]

use jpegpipe::{ByteOffset, OutputMode, ScannerOptions};

/// Build a baseline JPEG with a fixed header and `scan_len` bytes of scan
/// data. `FF` bytes in the scan data are stuffed, so the only SOI/EOI pairs
/// are the frame's own.
pub fn jpeg(seed: u8, scan_len: usize) -> Vec<u8> {
    let mut out = vec![
        0xFF, 0xD8, // SOI
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00, // APP0
        0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, // SOS
    ];
    let mut state = u32::from(seed).wrapping_mul(2_654_435_761) | 1;
    for _ in 0..scan_len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let b = state.to_le_bytes()[1];
        out.push(b);
        if b == 0xFF {
            out.push(0x00);
        }
    }
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn options(byte_offset: i64, output_mode: OutputMode) -> ScannerOptions {
    ScannerOptions {
        byte_offset: ByteOffset::new(byte_offset),
        output_mode,
        ..Default::default()
    }
}

pub const MODES: [OutputMode; 3] = [
    OutputMode::SingleBuffer,
    OutputMode::SegmentList,
    OutputMode::PooledBuffer,
];
