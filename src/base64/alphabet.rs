/// Standard Base64 alphabet (RFC 4648 Table 1), indexed by 6-bit value.
pub const ENCODE_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character appended to a short final block.
pub const PAD: u8 = b'=';

/// Marker in [`DECODE_TABLE`] for bytes outside the alphabet (including `=`).
pub const INVALID: u8 = 0xFF;

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[ENCODE_TABLE[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Inverse of [`ENCODE_TABLE`]: byte value -> 6-bit index, or [`INVALID`].
pub const DECODE_TABLE: [u8; 256] = build_decode_table();

/// Look up the 6-bit value of an alphabet symbol.
#[inline]
pub fn symbol_value(b: u8) -> Option<u8> {
    match DECODE_TABLE[b as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// Alphabet symbol for the low 6 bits of `v`.
#[inline]
pub(crate) fn symbol(v: u32) -> u8 {
    ENCODE_TABLE[(v & 0x3F) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_inverse() {
        for (i, &c) in ENCODE_TABLE.iter().enumerate() {
            assert_eq!(DECODE_TABLE[c as usize] as usize, i);
        }
    }

    #[test]
    fn test_exactly_64_valid_entries() {
        let valid = DECODE_TABLE.iter().filter(|&&v| v != INVALID).count();
        assert_eq!(valid, 64);
    }

    #[test]
    fn test_padding_is_not_a_symbol() {
        assert_eq!(DECODE_TABLE[PAD as usize], INVALID);
        assert_eq!(symbol_value(PAD), None);
        assert_eq!(symbol_value(b'#'), None);
        assert_eq!(symbol_value(0), None);
        assert_eq!(symbol_value(0xFF), None);
    }

    #[test]
    fn test_symbol_order() {
        assert_eq!(symbol_value(b'A'), Some(0));
        assert_eq!(symbol_value(b'a'), Some(26));
        assert_eq!(symbol_value(b'0'), Some(52));
        assert_eq!(symbol_value(b'+'), Some(62));
        assert_eq!(symbol_value(b'/'), Some(63));
        assert_eq!(symbol(63), b'/');
        assert_eq!(symbol(64), b'A');
    }
}
