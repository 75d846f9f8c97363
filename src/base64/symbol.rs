//! Symbol alphabet, 6-bit codes, and group packing shared by both action sets.

/// The 64 symbols in code order.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Symbols whose code has its two low bits clear. Only these may end a
/// two-byte group, since those bits fall off the end of the output.
pub const SYMBOLS_4BIT: &[u8] = b"AEIMQUYcgkosw048";

/// Symbols whose code has its four low bits clear, for one-byte groups.
pub const SYMBOLS_2BIT: &[u8] = b"AQgw";

/// Whitespace allowed around the payload.
pub const WHITESPACE: &[u8] = b" \t\n\r\x0c\x0b";

pub const PAD: u8 = b'=';

/// Maps a symbol byte to its 6-bit code.
pub fn symbol_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Packs `N + 1` six-bit codes into `N` bytes, most significant first.
///
/// Codes missing from the end of `codes` count as zero. The `6 * (N + 1)`
/// accumulated bits are shifted right by `bits % 8` to drop the padding
/// bits before the bytes are read off from the last one backwards.
pub fn pack_group<const N: usize>(codes: &[u8]) -> [u8; N] {
    let mut x: u64 = 0;
    let mut bits = 0;
    for i in 0..=N {
        x = (x << 6) | u64::from(codes.get(i).copied().unwrap_or(0) & 0x3f);
        bits += 6;
    }
    x >>= bits % 8;

    let mut out = [0u8; N];
    for slot in out.iter_mut().rev() {
        *slot = (x & 0xff) as u8;
        x >>= 8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_codes_follow_position() {
        for (code, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_value(c), Some(code as u8), "symbol {}", c as char);
        }
    }

    #[test]
    fn non_symbols_have_no_code() {
        let valid = ALPHABET.iter().copied().collect::<Vec<_>>();
        for c in 0..=u8::MAX {
            if !valid.contains(&c) {
                assert_eq!(symbol_value(c), None, "byte {c}");
            }
        }
        assert_eq!(symbol_value(PAD), None);
    }

    #[test]
    fn restricted_sets_are_low_bit_clear_codes() {
        let four: Vec<u8> = ALPHABET
            .iter()
            .copied()
            .filter(|&c| symbol_value(c).is_some_and(|v| v & 0b11 == 0))
            .collect();
        let mut expected = SYMBOLS_4BIT.to_vec();
        expected.sort_by_key(|&c| symbol_value(c));
        assert_eq!(four, expected);

        let two: Vec<u8> = ALPHABET
            .iter()
            .copied()
            .filter(|&c| symbol_value(c).is_some_and(|v| v & 0b1111 == 0))
            .collect();
        assert_eq!(two, SYMBOLS_2BIT);
    }

    #[test]
    fn full_group_packs_three_bytes() {
        // "TWFu" -> "Man"
        let codes = [19, 22, 5, 46];
        assert_eq!(pack_group::<3>(&codes), *b"Man");
    }

    #[test]
    fn short_groups_drop_padding_bits() {
        // "QUI=" -> "AB", "QQ==" -> "A"
        assert_eq!(pack_group::<2>(&[16, 20, 8]), *b"AB");
        assert_eq!(pack_group::<1>(&[16, 16]), *b"A");
        assert_eq!(pack_group::<0>(&[]), [0u8; 0]);
    }

    #[test]
    fn missing_codes_count_as_zero() {
        assert_eq!(pack_group::<2>(&[16, 20]), pack_group::<2>(&[16, 20, 0]));
    }
}
