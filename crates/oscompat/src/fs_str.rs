//! Text that may contain lone surrogates.
//!
//! Decoded paths are sequences of code points, not of [`char`]s: an
//! undecodable byte becomes a surrogate from the escape range, which neither
//! `str` nor `String` can hold. [`FsStr`] and [`FsString`] store code points
//! as surrogate-permitting UTF-8: every code point, surrogates included, is
//! written with the usual UTF-8 bit layout. Surrogate pairs are *not*
//! combined, so `"\u{D83D}\u{DE00}"` stays two code points and compares
//! unequal to `"😀"`.
//!
//! Invariants
//! - The buffer only ever holds complete, minimal encodings of code points
//!   `<= U+10FFFF`; it is built exclusively through `push` / `push_str`.
//! - A buffer with no surrogate is valid UTF-8 and borrows as `&str`.

use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
    vec::Vec,
};
use core::{borrow::Borrow, fmt, ops::Deref, slice};

use crate::code_point::CodePoint;

/// Borrowed text that may contain lone surrogates.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FsStr {
    bytes: [u8],
}

/// Owned text that may contain lone surrogates.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FsString {
    bytes: Vec<u8>,
}

impl FsStr {
    /// Borrows `s` as an `FsStr`. Never copies.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> &FsStr {
        Self::from_internal(s.as_bytes())
    }

    /// `bytes` must satisfy the module invariants.
    fn from_internal(bytes: &[u8]) -> &FsStr {
        // SAFETY: `FsStr` is `repr(transparent)` over `[u8]`, so the pointer
        // cast preserves layout and metadata.
        unsafe { &*(core::ptr::from_ref::<[u8]>(bytes) as *const FsStr) }
    }

    /// Number of bytes in the internal encoding.
    pub(crate) fn internal_len(&self) -> usize {
        self.bytes.len()
    }

    /// The internal surrogate-permitting UTF-8 bytes.
    pub(crate) fn internal_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code_points().count()
    }

    #[must_use]
    pub fn code_points(&self) -> CodePoints<'_> {
        CodePoints {
            bytes: self.bytes.iter(),
        }
    }

    /// Returns the text as `&str` if it contains no surrogates.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    #[must_use]
    pub fn contains_surrogates(&self) -> bool {
        self.as_str().is_none()
    }

    /// Replaces every surrogate with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match self.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(self.code_points().map(CodePoint::to_char_lossy).collect()),
        }
    }

    #[must_use]
    pub fn to_fs_string(&self) -> FsString {
        FsString {
            bytes: self.bytes.to_vec(),
        }
    }

    /// Splits on an ASCII separator. Empty fields are kept, so splitting
    /// `""` yields one empty field.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is not ASCII.
    pub fn split_ascii(&self, separator: char) -> impl Iterator<Item = &FsStr> {
        assert!(separator.is_ascii(), "separator must be ASCII");
        let separator = separator as u8;
        // ASCII bytes never occur inside a multi-byte encoding.
        self.bytes
            .split(move |&b| b == separator)
            .map(FsStr::from_internal)
    }
}

impl FsString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` is in internal bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    // Truncating casts keep exactly the payload bits of each byte.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push(&mut self, code_point: CodePoint) {
        let value = code_point.to_u32();
        match code_point.len_utf8() {
            1 => self.bytes.push(value as u8),
            2 => self
                .bytes
                .extend_from_slice(&[0xC0 | (value >> 6) as u8, 0x80 | (value & 0x3F) as u8]),
            3 => self.bytes.extend_from_slice(&[
                0xE0 | (value >> 12) as u8,
                0x80 | ((value >> 6) & 0x3F) as u8,
                0x80 | (value & 0x3F) as u8,
            ]),
            _ => self.bytes.extend_from_slice(&[
                0xF0 | (value >> 18) as u8,
                0x80 | ((value >> 12) & 0x3F) as u8,
                0x80 | ((value >> 6) & 0x3F) as u8,
                0x80 | (value & 0x3F) as u8,
            ]),
        }
    }

    pub fn push_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.bytes
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    pub fn push_fs_str(&mut self, s: &FsStr) {
        self.bytes.extend_from_slice(&s.bytes);
    }

    #[must_use]
    pub fn as_fs_str(&self) -> &FsStr {
        FsStr::from_internal(&self.bytes)
    }

    /// Converts into a `String`, or gives the text back if it holds a
    /// surrogate.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when a surrogate is present.
    pub fn into_string(self) -> Result<String, FsString> {
        String::from_utf8(self.bytes).map_err(|err| FsString {
            bytes: err.into_bytes(),
        })
    }
}

/// Iterator over the code points of an [`FsStr`].
#[derive(Clone)]
pub struct CodePoints<'a> {
    bytes: slice::Iter<'a, u8>,
}

impl Iterator for CodePoints<'_> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        let lead = *self.bytes.next()?;
        let (len, mut value) = match lead {
            0x00..=0x7F => return CodePoint::from_u32(u32::from(lead)),
            0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            _ => (4, u32::from(lead & 0x07)),
        };
        for _ in 1..len {
            let cont = self.bytes.next().copied().unwrap_or(0x80);
            value = (value << 6) | u32::from(cont & 0x3F);
        }
        CodePoint::from_u32(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len();
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl fmt::Debug for FsStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for cp in self.code_points() {
            match cp.to_char() {
                Some(ch) => {
                    for escaped in ch.escape_debug() {
                        fmt::Write::write_char(f, escaped)?;
                    }
                }
                None => write!(f, "\\u{{{:x}}}", cp.to_u32())?,
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Display for FsStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Debug for FsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_fs_str(), f)
    }
}

impl fmt::Display for FsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_fs_str(), f)
    }
}

impl Deref for FsString {
    type Target = FsStr;

    fn deref(&self) -> &FsStr {
        self.as_fs_str()
    }
}

impl Borrow<FsStr> for FsString {
    fn borrow(&self) -> &FsStr {
        self.as_fs_str()
    }
}

impl ToOwned for FsStr {
    type Owned = FsString;

    fn to_owned(&self) -> FsString {
        self.to_fs_string()
    }
}

impl AsRef<FsStr> for FsStr {
    fn as_ref(&self) -> &FsStr {
        self
    }
}

impl AsRef<FsStr> for FsString {
    fn as_ref(&self) -> &FsStr {
        self.as_fs_str()
    }
}

impl AsRef<FsStr> for str {
    fn as_ref(&self) -> &FsStr {
        FsStr::from_str(self)
    }
}

impl AsRef<FsStr> for String {
    fn as_ref(&self) -> &FsStr {
        FsStr::from_str(self)
    }
}

impl<'a> From<&'a str> for &'a FsStr {
    fn from(s: &'a str) -> Self {
        FsStr::from_str(s)
    }
}

impl From<&str> for FsString {
    fn from(s: &str) -> Self {
        FsString {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl From<String> for FsString {
    fn from(s: String) -> Self {
        FsString {
            bytes: s.into_bytes(),
        }
    }
}

impl From<&FsStr> for FsString {
    fn from(s: &FsStr) -> Self {
        s.to_fs_string()
    }
}

impl<'a> From<FsString> for Cow<'a, FsStr> {
    fn from(s: FsString) -> Self {
        Cow::Owned(s)
    }
}

impl<'a> From<&'a FsStr> for Cow<'a, FsStr> {
    fn from(s: &'a FsStr) -> Self {
        Cow::Borrowed(s)
    }
}

impl FromIterator<CodePoint> for FsString {
    fn from_iter<T: IntoIterator<Item = CodePoint>>(iter: T) -> Self {
        let mut out = FsString::new();
        out.extend(iter);
        out
    }
}

impl FromIterator<char> for FsString {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut out = FsString::new();
        for ch in iter {
            out.push_char(ch);
        }
        out
    }
}

impl Extend<CodePoint> for FsString {
    fn extend<T: IntoIterator<Item = CodePoint>>(&mut self, iter: T) {
        for cp in iter {
            self.push(cp);
        }
    }
}

impl PartialEq<str> for FsStr {
    fn eq(&self, other: &str) -> bool {
        self.bytes == *other.as_bytes()
    }
}

impl PartialEq<&str> for FsStr {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == *other.as_bytes()
    }
}

impl PartialEq<str> for FsString {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for FsString {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<FsStr> for FsString {
    fn eq(&self, other: &FsStr) -> bool {
        self.bytes == other.bytes
    }
}

impl PartialEq<FsString> for FsStr {
    fn eq(&self, other: &FsString) -> bool {
        self.bytes == *other.bytes
    }
}
