//! Slice-based Base64 encoder, validator and decoder.
//!
//! All three operate on caller-owned buffers. Capacity is checked up front and
//! reported as [`CodecError::BufferTooSmall`]; nothing is written on failure.
//! Text arguments are treated as C-style strings: scanning stops at the first
//! NUL byte, so the terminated output of [`encode`] can be fed straight back
//! into [`validate`] or [`decode`].

use super::alphabet::{PAD, symbol, symbol_value};
use super::error::CodecError;

/// Destination size [`encode`] needs for `n` input bytes, terminator included.
///
/// This is `4 * ceil(n / 3) + 1`, so an empty input still needs one byte.
#[inline]
pub const fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4 + 1
}

/// Encode `src` into `dest` as NUL-terminated Base64 text.
///
/// Returns the number of bytes written including the terminator, which is
/// `1` for empty input.
pub fn encode(dest: &mut [u8], src: &[u8]) -> Result<usize, CodecError> {
    let needed = encoded_len(src.len());
    if dest.len() < needed {
        return Err(CodecError::BufferTooSmall {
            needed,
            available: dest.len(),
        });
    }
    encode_body(&mut dest[..needed - 1], src);
    dest[needed - 1] = 0;
    Ok(needed)
}

/// Encode `src` into a freshly allocated buffer (no terminator).
pub fn encode_to_vec(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(src.len()) - 1];
    encode_body(&mut out, src);
    out
}

/// Encode `src` into a `String` (no terminator).
pub fn encode_to_string(src: &[u8]) -> String {
    encode_to_vec(src).into_iter().map(char::from).collect()
}

/// `out` must be exactly `4 * ceil(src.len() / 3)` bytes.
fn encode_body(out: &mut [u8], src: &[u8]) {
    let mut groups = src.chunks_exact(3);
    let mut wp = 0;

    for g in &mut groups {
        let n = (u32::from(g[0]) << 16) | (u32::from(g[1]) << 8) | u32::from(g[2]);
        out[wp..wp + 4].copy_from_slice(&[
            symbol(n >> 18),
            symbol(n >> 12),
            symbol(n >> 6),
            symbol(n),
        ]);
        wp += 4;
    }

    // Missing bytes of a short final group pack as zero.
    match *groups.remainder() {
        [a] => {
            let n = u32::from(a) << 16;
            out[wp..wp + 4].copy_from_slice(&[symbol(n >> 18), symbol(n >> 12), PAD, PAD]);
        }
        [a, b] => {
            let n = (u32::from(a) << 16) | (u32::from(b) << 8);
            out[wp..wp + 4].copy_from_slice(&[
                symbol(n >> 18),
                symbol(n >> 12),
                symbol(n >> 6),
                PAD,
            ]);
        }
        _ => {}
    }
}

/// Per-character scanner state shared by [`validate`] and [`decode`].
///
/// One scan covers the whole text, not each 4-character block. A `=` moves
/// `Data` to `Padding`; only further `=` may follow. [`ScanState::finish`]
/// at the end of the text moves to `Done`, which accepts no more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Data,
    Padding,
    Done,
}

impl ScanState {
    /// Consume one character. `None` means the text is malformed.
    #[inline]
    pub fn step(self, c: u8) -> Option<ScanState> {
        match self {
            ScanState::Data | ScanState::Padding if c == PAD => Some(ScanState::Padding),
            ScanState::Data if symbol_value(c).is_some() => Some(ScanState::Data),
            _ => None,
        }
    }

    /// End of text. Only an active scan can finish.
    #[inline]
    pub fn finish(self) -> Option<ScanState> {
        match self {
            ScanState::Data | ScanState::Padding => Some(ScanState::Done),
            ScanState::Done => None,
        }
    }
}

/// Shape of a well-formed text: block count and trailing `=` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    blocks: usize,
    padding: usize,
}

impl Layout {
    #[inline]
    fn decoded_len(self) -> usize {
        3 * self.blocks - self.padding
    }
}

/// Walk `text` through the scanner. Trailing-only padding plus the length
/// check confines `=` to the last two positions of the final block.
fn scan(text: &[u8]) -> Option<Layout> {
    if text.is_empty() || text.len() % 4 != 0 {
        return None;
    }

    let mut state = ScanState::Data;
    let mut padding = 0;
    for &c in text {
        state = state.step(c)?;
        if state == ScanState::Padding {
            padding += 1;
        }
    }
    state.finish()?;

    // "A===" and "aaaa====" would otherwise slip through.
    if padding > 2 {
        return None;
    }

    Some(Layout {
        blocks: text.len() / 4,
        padding,
    })
}

/// Cut a C-style string at its first NUL.
#[inline]
fn until_nul(text: &[u8]) -> &[u8] {
    match memchr::memchr(0, text) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Number of bytes `text` decodes to, or `0` if it is not well-formed Base64.
///
/// Rejects empty text, lengths that are not a multiple of 4, characters
/// outside the alphabet, `=` anywhere but the last one or two positions, and
/// more than two `=`. Never needs a destination buffer, so callers can size
/// one before calling [`decode`].
pub fn validate(text: impl AsRef<[u8]>) -> usize {
    scan(until_nul(text.as_ref())).map_or(0, Layout::decoded_len)
}

/// Decode `text` into `dest`, returning the number of bytes written.
///
/// Empty text or an empty destination is a no-op returning `Ok(0)`. The
/// text is scanned in full before anything is written, so malformed input
/// yields [`CodecError::Malformed`] and an undersized destination yields
/// [`CodecError::BufferTooSmall`], both with `dest` untouched.
pub fn decode(dest: &mut [u8], text: impl AsRef<[u8]>) -> Result<usize, CodecError> {
    let text = until_nul(text.as_ref());
    if text.is_empty() || dest.is_empty() {
        return Ok(0);
    }

    let needed = scan(text).ok_or(CodecError::Malformed)?.decoded_len();
    if dest.len() < needed {
        return Err(CodecError::BufferTooSmall {
            needed,
            available: dest.len(),
        });
    }
    decode_body(&mut dest[..needed], text);
    Ok(needed)
}

/// Decode `text` into a freshly allocated buffer.
pub fn decode_to_vec(text: impl AsRef<[u8]>) -> Result<Vec<u8>, CodecError> {
    let text = until_nul(text.as_ref());
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let layout = scan(text).ok_or(CodecError::Malformed)?;
    let mut out = vec![0u8; layout.decoded_len()];
    decode_body(&mut out, text);
    Ok(out)
}

/// `text` must have passed [`scan`] and `out` be sized to its decoded length.
fn decode_body(out: &mut [u8], text: &[u8]) {
    let mut wp = 0;
    for block in text.chunks_exact(4) {
        let mut n = 0u32;
        let mut live = 0;
        for &c in block {
            n <<= 6;
            // Padding contributes zero bits.
            if let Some(v) = symbol_value(c) {
                n |= u32::from(v);
                live += 1;
            }
        }

        // 4 symbols carry 3 bytes, 3 carry 2, 2 carry 1.
        let take = live - 1;
        let bytes = [(n >> 16) as u8, (n >> 8) as u8, n as u8];
        out[wp..wp + take].copy_from_slice(&bytes[..take]);
        wp += take;
    }
}
