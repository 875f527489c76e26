use std::{
    collections::VecDeque,
    io::{self, Read},
};

use bytes::BytesMut;

use crate::{Frame, FrameScanner, ScannerOptions};

/// Pulls an MJPEG byte stream from a reader and yields its frames.
///
/// Typical sources are the stdout pipe of an encoder process (for example
/// `ffmpeg ... -c:v mjpeg -f image2pipe pipe:1`), a socket or a file. The
/// reader is only read from when no completed frame is waiting, so a slow
/// consumer naturally pauses the source.
///
/// Iteration ends at end of stream. Bytes of a frame that was cut off by the
/// end of the stream stay pending in [`scanner`](Self::scanner).
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// use jpegpipe::{ByteOffset, FrameReader, ScannerOptions};
///
/// let stream = [0xFF, 0xD8, 0x01, 0xFF, 0xD9, 0xFF, 0xD8, 0x02, 0xFF, 0xD9];
/// let options = ScannerOptions {
///     byte_offset: ByteOffset::new(0),
///     ..Default::default()
/// };
/// let frames = FrameReader::with_chunk_size(Cursor::new(stream), options, 3)
///     .collect::<std::io::Result<Vec<_>>>()?;
/// assert_eq!(frames.len(), 2);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    scanner: FrameScanner,
    ready: VecDeque<Frame>,
    buf: BytesMut,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    /// Bytes requested from the reader per read call.
    pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

    /// Wrap `inner`, reading it in chunks of [`Self::DEFAULT_CHUNK_SIZE`].
    pub fn new(inner: R, options: ScannerOptions) -> Self {
        Self::with_chunk_size(inner, options, Self::DEFAULT_CHUNK_SIZE)
    }

    /// Wrap `inner`, reading at most `chunk_size` bytes at a time.
    pub fn with_chunk_size(inner: R, options: ScannerOptions, chunk_size: usize) -> Self {
        Self {
            inner,
            scanner: FrameScanner::new(options),
            ready: VecDeque::new(),
            buf: BytesMut::new(),
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }

    /// The scanner, including any partially received frame.
    pub fn scanner(&self) -> &FrameScanner {
        &self.scanner
    }

    /// Mutable access to the scanner, e.g. to [`reset`](FrameScanner::reset)
    /// it between streams.
    pub fn scanner_mut(&mut self) -> &mut FrameScanner {
        &mut self.scanner
    }

    /// Give back the underlying reader, dropping any undelivered frames.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one chunk and scan it. Returns the number of bytes read.
    fn pull(&mut self) -> io::Result<usize> {
        self.buf.resize(self.chunk_size, 0);
        let n = self.inner.read(&mut self.buf)?;
        self.buf.truncate(n);
        if n > 0 {
            let chunk = self.buf.split().freeze();
            let ready = &mut self.ready;
            self.scanner
                .process_chunk(chunk, &mut |frame: Frame| ready.push_back(frame));
        }
        Ok(n)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = io::Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Some(Ok(frame));
            }
            if self.done {
                return None;
            }
            match self.pull() {
                Ok(0) => {
                    self.done = true;
                    if self.scanner.pending_len() > 0 {
                        log::debug!(
                            "stream ended inside a frame, {} bytes pending",
                            self.scanner.pending_len()
                        );
                    }
                }
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
