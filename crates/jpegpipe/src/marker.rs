//! JPEG frame-boundary markers.

use bstr::ByteSlice;

/// Start-Of-Image marker, the first two bytes of every JPEG codestream.
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End-Of-Image marker, the last two bytes of every JPEG codestream.
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// The first byte of [`SOI`], kept as a static so a marker split across two
/// chunks can be reconstructed without allocating.
pub(crate) static SOI_LEAD: [u8; 1] = [SOI[0]];

/// Find the first occurrence of `marker` in `haystack` at or after `from`.
///
/// Returns the absolute index of the marker's first byte.
#[inline]
pub(crate) fn find_marker(haystack: &[u8], marker: [u8; 2], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..].find(marker).map(|i| from + i)
}

/// Whether `chunk` ends with the lead byte of `marker`, i.e. the marker may
/// continue in the next chunk.
#[inline]
pub(crate) fn ends_with_lead(chunk: &[u8], marker: [u8; 2]) -> bool {
    chunk.last() == Some(&marker[0])
}
