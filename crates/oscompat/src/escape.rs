//! Bidirectional table between undecodable high bytes and the escape range.
//!
//! A byte `0x80..=0xFF` that cannot be decoded is represented in text as one
//! of the 128 surrogates `U+DC80..=U+DCFF`; encoding maps those surrogates
//! back to the original byte. Bytes below `0x80` are always decodable by the
//! supported encodings and have no escape.

use crate::code_point::CodePoint;

/// First escaped byte.
pub const FIRST_ESCAPED_BYTE: u8 = 0x80;

/// First code point of the escape range, `U+DC80`.
pub const ESCAPE_RANGE_START: u32 = 0xDC80;

/// Last code point of the escape range, `U+DCFF`.
pub const ESCAPE_RANGE_END: u32 = 0xDCFF;

const TABLE_LEN: usize = 128;

/// Escape code point for each high byte, indexed by `byte - 0x80`.
static BYTE_TO_ESCAPE: [u32; TABLE_LEN] = {
    let mut table = [0; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = ESCAPE_RANGE_START + i as u32;
        i += 1;
    }
    table
};

/// High byte for each escape code point, indexed by `code_point - U+DC80`.
static ESCAPE_TO_BYTE: [u8; TABLE_LEN] = {
    let mut table = [0; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = FIRST_ESCAPED_BYTE + i as u8;
        i += 1;
    }
    table
};

/// Lookup between escaped bytes and escape code points.
pub struct EscapeTable;

impl EscapeTable {
    /// The escape code point for `byte`, or `None` for ASCII bytes.
    #[must_use]
    pub fn escape(byte: u8) -> Option<CodePoint> {
        let index = byte.checked_sub(FIRST_ESCAPED_BYTE)?;
        CodePoint::from_u32(BYTE_TO_ESCAPE[usize::from(index)])
    }

    /// The byte carried by `code_point`, or `None` outside `U+DC80..=U+DCFF`.
    #[must_use]
    pub fn unescape(code_point: CodePoint) -> Option<u8> {
        let value = code_point.to_u32();
        if !(ESCAPE_RANGE_START..=ESCAPE_RANGE_END).contains(&value) {
            return None;
        }
        let index = usize::try_from(value - ESCAPE_RANGE_START).ok()?;
        ESCAPE_TO_BYTE.get(index).copied()
    }

    #[must_use]
    pub fn is_escape(code_point: CodePoint) -> bool {
        Self::unescape(code_point).is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn table_covers_exactly_the_high_bytes() {
        for byte in 0..=u8::MAX {
            let escaped = EscapeTable::escape(byte);
            if byte < 0x80 {
                assert_eq!(escaped, None, "byte {byte:#04x}");
            } else {
                let cp = escaped.unwrap();
                assert!(cp.is_surrogate());
                assert_eq!(EscapeTable::unescape(cp), Some(byte));
            }
        }
    }

    #[rstest]
    #[case(0xDC7F)]
    #[case(0xDD00)]
    #[case(0xD800)]
    #[case(0x0080)]
    #[case(0x00FF)]
    fn outside_the_range_is_not_an_escape(#[case] value: u32) {
        let cp = CodePoint::from_u32(value).unwrap();
        assert_eq!(EscapeTable::unescape(cp), None);
        assert!(!EscapeTable::is_escape(cp));
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(EscapeTable::escape(0x80).map(CodePoint::to_u32), Some(0xDC80));
        assert_eq!(EscapeTable::escape(0xFF).map(CodePoint::to_u32), Some(0xDCFF));
    }
}
