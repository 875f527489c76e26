#![no_main]

use arbitrary::Arbitrary;
use jpegpipe::{Bytes, ByteOffset, FrameScanner, OutputMode, ScannerOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    byte_offset: u16,
    mode: u8,
    /// Chunk lengths; zero-length entries feed empty chunks.
    splits: Vec<u8>,
    data: Vec<u8>,
}

fn scanner(byte_offset: u16, mode: OutputMode) -> FrameScanner {
    FrameScanner::new(ScannerOptions {
        byte_offset: ByteOffset::new(i64::from(byte_offset)),
        output_mode: mode,
        ..Default::default()
    })
}

fuzz_target!(|input: Input| {
    let mode = match input.mode % 3 {
        0 => OutputMode::SingleBuffer,
        1 => OutputMode::SegmentList,
        _ => OutputMode::PooledBuffer,
    };
    let data = Bytes::from(input.data);

    // Reference: the whole stream in one chunk.
    let mut whole = scanner(input.byte_offset, mode);
    let expected: Vec<Vec<u8>> = whole.feed(data.clone()).iter().map(|f| f.to_vec()).collect();

    let mut split = scanner(input.byte_offset, mode);
    let mut got = Vec::new();
    let mut start = 0;
    for len in input.splits.iter().map(|&n| usize::from(n)) {
        let end = (start + len).min(data.len());
        got.extend(split.feed(data.slice(start..end)).iter().map(|f| f.to_vec()));
        start = end;
    }
    got.extend(split.feed(data.slice(start..)).iter().map(|f| f.to_vec()));

    assert_eq!(got, expected);
    assert_eq!(split.pending_len(), whole.pending_len());
    assert_eq!(split.phase(), whole.phase());
    for frame in &got {
        assert!(frame.starts_with(&[0xFF, 0xD8]) && frame.ends_with(&[0xFF, 0xD9]));
    }
});
