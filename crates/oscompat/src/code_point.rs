use core::fmt;

/// A Unicode code point: an integer in `0..=0x10FFFF`.
///
/// Unlike [`char`], a `CodePoint` may be a surrogate (`U+D800..=U+DFFF`).
/// Decoded paths use the `U+DC80..=U+DCFF` surrogates to carry bytes that
/// could not be decoded.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(u32);

impl CodePoint {
    /// The largest code point, `U+10FFFF`.
    pub const MAX: CodePoint = CodePoint(0x10_FFFF);

    /// Returns `None` if `value` exceeds `U+10FFFF`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<CodePoint> {
        if value <= Self::MAX.0 {
            Some(CodePoint(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn from_char(value: char) -> CodePoint {
        CodePoint(value as u32)
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_surrogate(self) -> bool {
        self.0 >= 0xD800 && self.0 <= 0xDFFF
    }

    /// Returns `None` for surrogates.
    #[must_use]
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// Surrogates become U+FFFD REPLACEMENT CHARACTER.
    #[must_use]
    pub fn to_char_lossy(self) -> char {
        self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Number of bytes this code point takes in surrogate-permitting UTF-8.
    pub(crate) const fn len_utf8(self) -> usize {
        match self.0 {
            0..0x80 => 1,
            0x80..0x800 => 2,
            0x800..0x1_0000 => 3,
            _ => 4,
        }
    }
}

impl From<char> for CodePoint {
    fn from(value: char) -> Self {
        CodePoint::from_char(value)
    }
}

impl fmt::Debug for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrogates_are_code_points_but_not_chars() {
        let cp = CodePoint::from_u32(0xDC80).unwrap();
        assert!(cp.is_surrogate());
        assert_eq!(cp.to_char(), None);
        assert_eq!(cp.to_char_lossy(), '\u{FFFD}');
        assert!(!CodePoint::from('a').is_surrogate());
    }

    #[test]
    fn rejects_values_above_max() {
        assert_eq!(CodePoint::from_u32(0x11_0000), None);
        assert_eq!(CodePoint::from_u32(0x10_FFFF), Some(CodePoint::MAX));
    }

    #[test]
    fn debug_uses_unicode_notation() {
        assert_eq!(format!("{:?}", CodePoint::from('a')), "U+0061");
        assert_eq!(format!("{:?}", CodePoint::MAX), "U+10FFFF");
    }
}
