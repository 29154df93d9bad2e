//! Filesystem path codec.
//!
//! [`FsCodec`] turns text into path bytes and back. Under the
//! surrogateescape handler every byte sequence decodes, and encoding the
//! result reproduces the original bytes exactly: each byte the encoding
//! cannot decode is carried as one escape code point (see
//! [`crate::escape`]).
//!
//! ```
//! use oscompat::{CodecOptions, FsCodec, FsEncoding};
//!
//! let codec = FsCodec::new(CodecOptions::escaping(FsEncoding::Utf8));
//! let text = codec.decode(b"caf\xc3\xa9-\xff").unwrap();
//! assert_eq!(format!("{text:?}"), r#""café-\u{dcff}""#);
//! assert_eq!(codec.encode(&text).unwrap(), b"caf\xc3\xa9-\xff");
//! ```

use alloc::{borrow::Cow, string::ToString, vec::Vec};

use crate::{
    error::{Error, Result},
    escape::EscapeTable,
    fs_str::{FsStr, FsString},
    options::{CodecOptions, ErrorHandler, FsEncoding},
    path_arg::PathArg,
    segments::{Segment, Segments},
};

/// Encoder and decoder for filesystem paths.
///
/// The codec holds no state besides its options; it is `Copy` and can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsCodec {
    options: CodecOptions,
}

impl FsCodec {
    #[must_use]
    pub const fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// UTF-8 with the platform's default error handler.
    #[must_use]
    pub fn platform() -> Self {
        Self::new(CodecOptions::default())
    }

    #[must_use]
    pub const fn options(&self) -> CodecOptions {
        self.options
    }

    #[must_use]
    pub const fn encoding(&self) -> FsEncoding {
        self.options.encoding
    }

    /// Encodes `text` into path bytes.
    ///
    /// Escape code points (`U+DC80..=U+DCFF`) become their byte under the
    /// surrogateescape handler; everything else goes through the encoding.
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] for the first code point that cannot be
    /// represented. `position` counts code points.
    pub fn encode(&self, text: &FsStr) -> Result<Vec<u8>> {
        let encoding = self.options.encoding;
        let escaping = self.options.errors == ErrorHandler::SurrogateEscape;
        let mut out = Vec::with_capacity(text.internal_len());
        for (position, code_point) in text.code_points().enumerate() {
            if escaping {
                if let Some(byte) = EscapeTable::unescape(code_point) {
                    out.push(byte);
                    continue;
                }
            }
            encoding
                .encode_code_point(code_point, &mut out)
                .map_err(|reason| Error::Encode {
                    encoding,
                    code_point,
                    position,
                    reason,
                })?;
        }
        Ok(out)
    }

    /// Decodes path bytes into text.
    ///
    /// The bytes are split into chunks the encoding decodes as-is and single
    /// bytes it cannot; the latter become escape code points under the
    /// surrogateescape handler.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] for the first undecodable byte under the strict
    /// handler. Never fails under surrogateescape.
    pub fn decode(&self, bytes: &[u8]) -> Result<FsString> {
        let encoding = self.options.encoding;
        let invalid = encoding.invalid_offsets(bytes);
        if let (ErrorHandler::Strict, Some(&position)) = (self.options.errors, invalid.first()) {
            return Err(self.decode_error(bytes[position], position));
        }
        if !invalid.is_empty() {
            tracing::trace!(
                %encoding,
                escaped = invalid.len(),
                len = bytes.len(),
                "escaping undecodable bytes"
            );
        }

        let mut out = FsString::with_capacity(bytes.len() + 2 * invalid.len());
        for segment in Segments::new(bytes, &invalid) {
            match segment {
                Segment::Valid { offset, bytes: chunk } => {
                    encoding
                        .decode_valid(chunk, &mut out)
                        .map_err(|at| self.decode_error(chunk[at], offset + at))?;
                }
                Segment::Invalid { offset, byte } => {
                    let escaped =
                        EscapeTable::escape(byte).ok_or_else(|| self.decode_error(byte, offset))?;
                    out.push(escaped);
                }
            }
        }
        Ok(out)
    }

    /// Encodes text, returning bytes unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentType`] for [`PathArg::Unsupported`], otherwise as
    /// [`FsCodec::encode`].
    pub fn fsencode<'a>(&self, path: impl Into<PathArg<'a>>) -> Result<Cow<'a, [u8]>> {
        match path.into() {
            PathArg::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            PathArg::Text(text) => self.encode(text).map(Cow::Owned),
            PathArg::Unsupported { type_name } => Err(Error::ArgumentType {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Decodes bytes, returning text unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentType`] for [`PathArg::Unsupported`], otherwise as
    /// [`FsCodec::decode`].
    pub fn fsdecode<'a>(&self, path: impl Into<PathArg<'a>>) -> Result<Cow<'a, FsStr>> {
        match path.into() {
            PathArg::Text(text) => Ok(Cow::Borrowed(text)),
            PathArg::Bytes(bytes) => self.decode(bytes).map(Cow::Owned),
            PathArg::Unsupported { type_name } => Err(Error::ArgumentType {
                type_name: type_name.to_string(),
            }),
        }
    }

    fn decode_error(&self, byte: u8, position: usize) -> Error {
        let encoding = self.options.encoding;
        Error::Decode {
            encoding,
            byte,
            position,
            reason: encoding.decode_reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::code_point::CodePoint;

    const UTF8: FsCodec = FsCodec::new(CodecOptions::escaping(FsEncoding::Utf8));
    const ASCII: FsCodec = FsCodec::new(CodecOptions::escaping(FsEncoding::Ascii));
    const LATIN1: FsCodec = FsCodec::new(CodecOptions::escaping(FsEncoding::Latin1));
    const UTF8_STRICT: FsCodec = FsCodec::new(CodecOptions::strict(FsEncoding::Utf8));

    fn high_bytes() -> Vec<u8> {
        (0x80..=0xFF).collect()
    }

    fn high_surrogates() -> FsString {
        (0xDC80..=0xDCFF)
            .map(|v| CodePoint::from_u32(v).unwrap())
            .collect()
    }

    #[test]
    fn encodes_every_escape_code_point() {
        assert_eq!(UTF8.encode(&high_surrogates()).unwrap(), high_bytes());
    }

    #[test]
    fn decodes_every_high_byte_to_its_escape() {
        assert_eq!(UTF8.decode(&high_bytes()).unwrap(), high_surrogates());
    }

    #[test]
    fn lone_continuation_byte() {
        let decoded = UTF8.decode(&[0x80]).unwrap();
        let code_points: Vec<u32> = decoded.code_points().map(CodePoint::to_u32).collect();
        assert_eq!(code_points, [0xDC80]);
    }

    #[test]
    fn ascii_passes_through() {
        let encoded = UTF8.encode("abc".as_ref()).unwrap();
        assert_eq!(encoded, b"abc");
        assert_eq!(UTF8.decode(&encoded).unwrap(), "abc");
    }

    #[test]
    fn encoded_surrogate_decodes_byte_by_byte() {
        let decoded = UTF8.decode(b"\xed\xb0\x80").unwrap();
        insta::assert_snapshot!(format!("{decoded:?}"), @r#""\u{dced}\u{dcb0}\u{dc80}""#);
        assert_eq!(UTF8.encode(&decoded).unwrap(), b"\xed\xb0\x80");
    }

    #[test]
    fn overlong_sequence_escapes_each_byte() {
        let decoded = UTF8.decode(b"a\xe0\x80\x80b").unwrap();
        assert_eq!(decoded.len(), 5);
        assert_eq!(UTF8.encode(&decoded).unwrap(), b"a\xe0\x80\x80b");
    }

    #[test]
    fn fsencode_returns_bytes_unchanged() {
        let bytes = b"abc\xff";
        let out = UTF8.fsencode(bytes).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), bytes);
    }

    #[test]
    fn fsdecode_returns_text_unchanged() {
        let out = UTF8.fsdecode("abc\u{0141}").unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), "abc\u{0141}");
    }

    #[rstest]
    #[case("unicode\u{0141}")]
    #[case("latin\u{e9}")]
    #[case("ascii")]
    fn identity(#[case] name: &str) {
        let encoded = UTF8.fsencode(name).unwrap();
        assert_eq!(UTF8.fsdecode(encoded.as_ref()).unwrap().as_ref(), name);
    }

    #[rstest]
    #[case("NoneType")]
    #[case("int")]
    #[case("list")]
    #[case("tuple")]
    fn unsupported_arguments_name_their_type(#[case] type_name: &str) {
        let expected = format!("expected str, bytes or os.PathLike object, not {type_name}");
        let err = UTF8.fsencode(PathArg::unsupported(type_name)).unwrap_err();
        assert_eq!(err.to_string(), expected);
        let err = UTF8.fsdecode(PathArg::unsupported(type_name)).unwrap_err();
        assert_eq!(
            err,
            Error::ArgumentType {
                type_name: String::from(type_name)
            }
        );
    }

    #[test]
    fn surrogates_outside_the_escape_range_do_not_encode() {
        let text: FsString = [CodePoint::from('a'), CodePoint::from_u32(0xD800).unwrap()]
            .into_iter()
            .collect();
        let err = UTF8.encode(&text).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'utf-8' codec can't encode character U+D800 in position 1: surrogates not allowed"
        );
    }

    #[test]
    fn strict_rejects_escapes_and_undecodable_bytes() {
        let err = UTF8_STRICT.decode(b"ok\xff").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'utf-8' codec can't decode byte 0xff in position 2: invalid utf-8 sequence"
        );
        assert!(matches!(
            UTF8_STRICT.encode(&high_surrogates()),
            Err(Error::Encode { position: 0, .. })
        ));
        assert_eq!(UTF8_STRICT.decode("é".as_bytes()).unwrap(), "é");
    }

    #[test]
    fn ascii_codec_escapes_high_bytes() {
        let decoded = ASCII.decode("é".as_bytes()).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(ASCII.encode(&decoded).unwrap(), "é".as_bytes());

        let err = ASCII.encode("é".as_ref()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'ascii' codec can't encode character U+00E9 in position 0: ordinal not in range(128)"
        );
    }

    #[test]
    fn latin1_codec_never_escapes_on_decode() {
        let decoded = LATIN1.decode(b"\xe9\xff").unwrap();
        assert_eq!(decoded, "\u{e9}\u{ff}");
        assert_eq!(LATIN1.encode(&decoded).unwrap(), b"\xe9\xff");
        assert!(LATIN1.encode("\u{20ac}".as_ref()).is_err());
        assert_eq!(LATIN1.encode(&high_surrogates()).unwrap(), high_bytes());
    }

    #[test]
    fn empty_input() {
        assert_eq!(UTF8.decode(b"").unwrap(), "");
        assert!(UTF8.encode("".as_ref()).unwrap().is_empty());
    }
}
