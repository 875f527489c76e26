//! Splits an MJPEG stream read from stdin into numbered JPEG files.
//!
//! Pipe an encoder into it, e.g.
//!
//! ```bash
//! ffmpeg -loglevel quiet -re -f lavfi -i testsrc=size=320x240:rate=10 \
//!     -t 3 -f image2pipe -c:v mjpeg - \
//!   | RUST_LOG=debug cargo run -p jpegpipe --example split_stdin -- out byteOffset=200
//! ```
//!
//! The first argument is the output directory (default `.`); the rest are
//! `key=value` scanner settings such as `outputMode=pooledBuffer`.
#![allow(missing_docs)]

use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::PathBuf,
};

use jpegpipe::{FrameOutput, FrameReader, ScannerOptions};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| ".".into()));
    let mut options = ScannerOptions::default();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
        options.set(key, value)?;
    }
    fs::create_dir_all(&dir)?;
    log::info!(
        "writing frames to {} (byteOffset={}, outputMode={})",
        dir.display(),
        options.byte_offset,
        options.output_mode
    );

    let mut reader = FrameReader::new(io::stdin().lock(), options);
    let mut bytes = 0usize;
    for frame in reader.by_ref() {
        let frame = frame?;
        let path = dir.join(format!("frame-{:05}.jpg", frame.index));
        let mut file = fs::File::create(&path)?;
        match &frame.output {
            FrameOutput::SingleBuffer(buf) | FrameOutput::PooledBuffer(buf) => file.write_all(buf)?,
            FrameOutput::SegmentList(segments) => {
                for part in segments {
                    file.write_all(part)?;
                }
            }
        }
        bytes += frame.len();
        log::debug!("{} ({} bytes)", path.display(), frame.len());
    }

    let scanner = reader.scanner();
    println!(
        "{} frames, {bytes} bytes, {} bytes left pending",
        scanner.frames_emitted(),
        scanner.pending_len()
    );
    if let Some(stats) = scanner.pool_stats() {
        println!(
            "pool: {} buffers, {} reused, {} allocated",
            stats.size, stats.reused, stats.allocated
        );
    }
    Ok(())
}
