/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// The last chunk may be shorter; fewer than `parts` chunks are returned when
/// `payload` is shorter than `parts`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    if payload.is_empty() {
        return Vec::new();
    }
    payload.chunks(payload.len().div_ceil(parts)).collect()
}

/// Split `payload` into chunks whose sizes are derived from `seed`.
///
/// Every chunk is at least one byte long. The same seed always produces the
/// same partition, which makes failures reproducible.
#[must_use]
pub fn produce_seeded_chunks(payload: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut state = seed | 1;
    let mut rest = payload;
    while !rest.is_empty() {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        // Mostly small chunks, with the occasional large one.
        let limit = if state % 8 == 0 { 4096 } else { 64 };
        let size = usize::try_from(state % limit).unwrap_or(0) + 1;
        let (chunk, tail) = rest.split_at(size.min(rest.len()));
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Split `payload` right after every occurrence of `0xFF`, so that every
/// two-byte marker in it is split across two chunks.
#[must_use]
pub fn split_after_marker_leads(payload: &[u8]) -> Vec<&[u8]> {
    payload.split_inclusive(|&b| b == 0xFF).collect()
}
