use std::borrow::Cow;
use std::io::{self, Write};

use super::codec;
use super::error::CodecError;

/// Encode data and write it to `out`, wrapping lines at `wrap_col`.
/// `wrap_col == 0` disables wrapping and the trailing newline.
pub fn encode_to_writer(data: &[u8], wrap_col: usize, out: &mut impl Write) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let encoded = codec::encode_to_vec(data);
    if wrap_col == 0 {
        return out.write_all(&encoded);
    }

    out.write_all(&wrap_lines(&encoded, wrap_col))
}

/// Split encoded text into `wrap_col`-wide lines, each ending in `\n`.
/// Built with direct slice copies into one pre-sized buffer.
fn wrap_lines(encoded: &[u8], wrap_col: usize) -> Vec<u8> {
    let lines = encoded.len().div_ceil(wrap_col);
    let mut buf = vec![0u8; encoded.len() + lines];

    let mut wp = 0;
    for line in encoded.chunks(wrap_col) {
        buf[wp..wp + line.len()].copy_from_slice(line);
        wp += line.len();
        buf[wp] = b'\n';
        wp += 1;
    }
    buf
}

/// Decode base64 data and write it to `out`.
/// When `ignore_garbage` is true, strip all non-base64 characters;
/// otherwise only whitespace is stripped.
pub fn decode_to_writer(data: &[u8], ignore_garbage: bool, out: &mut impl Write) -> io::Result<()> {
    let clean = clean_input(data, ignore_garbage);
    if clean.is_empty() {
        return Ok(());
    }

    // The codec stops at NUL; a stray NUL here must not truncate silently.
    if memchr::memchr(0, &clean).is_some() {
        return Err(invalid_input(CodecError::Malformed));
    }

    let decoded = codec::decode_to_vec(&clean).map_err(invalid_input)?;
    out.write_all(&decoded)
}

/// Decoded size of `data` after the same cleaning [`decode_to_writer`]
/// applies, or `0` if it would not decode.
pub fn validate_input(data: &[u8], ignore_garbage: bool) -> usize {
    let clean = clean_input(data, ignore_garbage);
    if memchr::memchr(0, &clean).is_some() {
        return 0;
    }
    codec::validate(clean)
}

fn invalid_input(e: CodecError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Borrow `data` unchanged when there is nothing to strip.
fn clean_input(data: &[u8], ignore_garbage: bool) -> Cow<'_, [u8]> {
    if ignore_garbage {
        if data.iter().all(|&b| is_base64_char(b)) {
            return Cow::Borrowed(data);
        }
        return Cow::Owned(data.iter().copied().filter(|&b| is_base64_char(b)).collect());
    }

    if memchr::memchr(b'\n', data).is_none() && !data.iter().any(|&b| is_whitespace(b)) {
        return Cow::Borrowed(data);
    }
    Cow::Owned(strip_whitespace(data))
}

/// Strip newlines with memchr in one pass, then any other whitespace.
fn strip_whitespace(data: &[u8]) -> Vec<u8> {
    let mut clean = Vec::with_capacity(data.len());
    let mut last = 0;
    for pos in memchr::memchr_iter(b'\n', data) {
        if pos > last {
            clean.extend_from_slice(&data[last..pos]);
        }
        last = pos + 1;
    }
    if last < data.len() {
        clean.extend_from_slice(&data[last..]);
    }

    // Rare: CR, tab, etc.
    if clean.iter().any(|&b| is_whitespace(b)) {
        clean.retain(|&b| !is_whitespace(b));
    }
    clean
}

/// Check if a byte is a valid base64 alphabet character or padding.
#[inline]
fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}

/// Check if a byte is ASCII whitespace.
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
