use core::{fmt, str::FromStr};

use crate::OptionsError;

/// Number of bytes after the SOI marker that are excluded from the EOI search.
///
/// This is a scan-speed hint only. Skipped bytes are still part of the emitted
/// frame; they are just never inspected for an EOI marker. It relies on the
/// JPEG header segments that follow SOI never containing the byte pair
/// `FF D9`, so every frame in the stream must be at least `byte_offset + 4`
/// bytes long for the hint to be harmless. `ByteOffset::new(0)` disables it.
///
/// Values are clamped to `0..=1_000_000`.
///
/// # Examples
///
/// ```rust
/// use jpegpipe::ByteOffset;
///
/// assert_eq!(ByteOffset::default().get(), 200);
/// assert_eq!(ByteOffset::new(-5).get(), 0);
/// assert_eq!(ByteOffset::new(5_000_000).get(), 1_000_000);
/// assert_eq!(ByteOffset::parse_lossy("42px").get(), 42);
/// assert_eq!(ByteOffset::parse_lossy("fast").get(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ByteOffset(usize);

impl ByteOffset {
    /// Smallest accepted offset.
    pub const MIN: usize = 0;
    /// Largest accepted offset.
    pub const MAX: usize = 1_000_000;
    /// Offset used when none, or an unparseable one, is given.
    pub const DEFAULT: usize = 200;

    /// Create an offset, clamping `n` into `MIN..=MAX`.
    #[must_use]
    pub fn new(n: i64) -> Self {
        if n <= 0 {
            return Self(Self::MIN);
        }
        Self(usize::try_from(n).map_or(Self::MAX, |n| n.min(Self::MAX)))
    }

    /// Parse the leading integer of `text`, the way loosely typed option
    /// sources (environment variables, query strings, JSON written by hand)
    /// are usually interpreted.
    ///
    /// Leading whitespace and a sign are accepted, parsing stops at the first
    /// non-digit. Text without a leading integer yields the default.
    #[must_use]
    pub fn parse_lossy(text: &str) -> Self {
        let text = text.trim_start();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return Self::default();
        }
        if negative {
            return Self(Self::MIN);
        }
        // Anything too long for an i64 is far past MAX anyway.
        Self::new(digits[..end].parse().unwrap_or(i64::MAX))
    }

    /// The offset in bytes.
    #[must_use]
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ByteOffset {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ByteOffset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self::new(n),
            #[allow(clippy::cast_possible_truncation)]
            Raw::Float(n) if n.is_finite() => Self::new(n as i64),
            Raw::Text(text) => Self::parse_lossy(&text),
            Raw::Float(_) | Raw::Other(_) => Self::default(),
        })
    }
}

/// How a completed frame is handed to the consumer.
///
/// # Default
///
/// `SingleBuffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum OutputMode {
    /// One contiguous buffer per frame. Frames spanning several chunks are
    /// copied into a fresh allocation.
    #[default]
    SingleBuffer,
    /// The ordered chunk segments that make up the frame, without copying.
    SegmentList,
    /// One contiguous buffer per frame, drawn from a small rotating pool so
    /// steady-state streams stop allocating.
    PooledBuffer,
}

impl OutputMode {
    /// The camelCase configuration name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::SingleBuffer => "singleBuffer",
            OutputMode::SegmentList => "segmentList",
            OutputMode::PooledBuffer => "pooledBuffer",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "singleBuffer" | "single_buffer" | "single-buffer" => Ok(OutputMode::SingleBuffer),
            "segmentList" | "segment_list" | "segment-list" => Ok(OutputMode::SegmentList),
            "pooledBuffer" | "pooled_buffer" | "pooled-buffer" => Ok(OutputMode::PooledBuffer),
            other => Err(OptionsError::UnknownOutputMode(other.into())),
        }
    }
}

/// Configuration for a [`FrameScanner`](crate::FrameScanner), fixed at
/// construction.
///
/// # Examples
///
/// ```rust
/// use jpegpipe::{ByteOffset, FrameScanner, OutputMode, ScannerOptions};
///
/// let scanner = FrameScanner::new(ScannerOptions {
///     byte_offset: ByteOffset::new(500),
///     output_mode: OutputMode::PooledBuffer,
///     ..Default::default()
/// });
/// assert_eq!(scanner.pool_size(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScannerOptions {
    /// Bytes after SOI skipped by the EOI search.
    ///
    /// # Default
    ///
    /// `200`
    pub byte_offset: ByteOffset,

    /// Delivery shape of completed frames.
    ///
    /// # Default
    ///
    /// [`OutputMode::SingleBuffer`]
    pub output_mode: OutputMode,

    /// Number of buffers in the rotating pool. Only used by
    /// [`OutputMode::PooledBuffer`]; values below 2 are raised to 2 so the
    /// buffer a consumer is reading is never the one being refilled.
    ///
    /// # Default
    ///
    /// `2`
    pub pool_size: usize,
}

impl ScannerOptions {
    /// Smallest usable pool.
    pub const MIN_POOL_SIZE: usize = 2;

    /// Apply one string-valued setting, as read from a configuration file or
    /// command line.
    ///
    /// Recognized keys are `byteOffset`, `outputMode` and `poolSize` (the
    /// `snake_case` spellings are accepted too). Numeric values are coerced
    /// rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an unrecognized key and
    /// [`OptionsError::UnknownOutputMode`] for an unrecognized `outputMode`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        match key.trim() {
            "byteOffset" | "byte_offset" => self.byte_offset = ByteOffset::parse_lossy(value),
            "outputMode" | "output_mode" => self.output_mode = value.parse()?,
            "poolSize" | "pool_size" => {
                self.pool_size = value
                    .trim()
                    .parse::<usize>()
                    .unwrap_or(Self::MIN_POOL_SIZE)
                    .max(Self::MIN_POOL_SIZE);
            }
            other => return Err(OptionsError::UnknownOption(other.into())),
        }
        Ok(())
    }

    /// The pool size actually used, after clamping.
    #[must_use]
    pub fn effective_pool_size(&self) -> usize {
        self.pool_size.max(Self::MIN_POOL_SIZE)
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            byte_offset: ByteOffset::default(),
            output_mode: OutputMode::default(),
            pool_size: Self::MIN_POOL_SIZE,
        }
    }
}
