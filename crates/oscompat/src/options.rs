use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{
    code_point::CodePoint,
    error::{Error, Result},
    fs_str::FsString,
    scanner,
};

/// Text encoding used for filesystem paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum FsEncoding {
    #[default]
    #[cfg_attr(any(test, feature = "serde"), serde(rename = "utf-8"))]
    Utf8,
    #[cfg_attr(any(test, feature = "serde"), serde(rename = "ascii"))]
    Ascii,
    #[cfg_attr(any(test, feature = "serde"), serde(rename = "latin-1"))]
    Latin1,
}

/// What the codec does with input the encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ErrorHandler {
    /// Undecodable bytes become `U+DC80..=U+DCFF` and encode back to the
    /// same bytes.
    SurrogateEscape,
    /// Any undecodable byte or unencodable code point is an error.
    Strict,
}

/// Configuration for [`crate::FsCodec`].
///
/// # Examples
///
/// ```rust
/// use oscompat::{CodecOptions, ErrorHandler, FsCodec, FsEncoding};
///
/// let codec = FsCodec::new(CodecOptions {
///     encoding: FsEncoding::Ascii,
///     ..Default::default()
/// });
/// assert_eq!(codec.options().errors, ErrorHandler::SurrogateEscape);
/// ```
///
/// # Default
///
/// UTF-8. The error handler is `Strict` on Windows and `SurrogateEscape`
/// everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CodecOptions {
    /// Encoding applied to everything outside the escape range.
    ///
    /// # Default
    ///
    /// [`FsEncoding::Utf8`]
    pub encoding: FsEncoding,

    /// Handling of undecodable bytes and unencodable code points.
    ///
    /// # Default
    ///
    /// [`ErrorHandler::Strict`] on Windows, [`ErrorHandler::SurrogateEscape`]
    /// elsewhere.
    pub errors: ErrorHandler,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        if cfg!(windows) {
            ErrorHandler::Strict
        } else {
            ErrorHandler::SurrogateEscape
        }
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            encoding: FsEncoding::default(),
            errors: ErrorHandler::default(),
        }
    }
}

impl CodecOptions {
    /// `encoding` with the surrogateescape handler.
    #[must_use]
    pub const fn escaping(encoding: FsEncoding) -> Self {
        Self {
            encoding,
            errors: ErrorHandler::SurrogateEscape,
        }
    }

    /// `encoding` with the strict handler.
    #[must_use]
    pub const fn strict(encoding: FsEncoding) -> Self {
        Self {
            encoding,
            errors: ErrorHandler::Strict,
        }
    }
}

impl FsEncoding {
    /// Canonical name, as shown in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FsEncoding::Utf8 => "utf-8",
            FsEncoding::Ascii => "ascii",
            FsEncoding::Latin1 => "latin-1",
        }
    }

    /// Offsets of the bytes this encoding cannot decode.
    pub(crate) fn invalid_offsets(self, bytes: &[u8]) -> Vec<usize> {
        match self {
            FsEncoding::Utf8 => scanner::invalid_offsets(bytes),
            FsEncoding::Ascii => bytes
                .iter()
                .enumerate()
                .filter_map(|(i, b)| (!b.is_ascii()).then_some(i))
                .collect(),
            FsEncoding::Latin1 => Vec::new(),
        }
    }

    /// Why `byte` is undecodable.
    pub(crate) const fn decode_reason(self) -> &'static str {
        match self {
            FsEncoding::Utf8 => "invalid utf-8 sequence",
            FsEncoding::Ascii | FsEncoding::Latin1 => "ordinal not in range(128)",
        }
    }

    /// Appends a chunk that contains no invalid offsets.
    pub(crate) fn decode_valid(self, chunk: &[u8], out: &mut FsString) -> Result<(), usize> {
        match self {
            FsEncoding::Utf8 | FsEncoding::Ascii => {
                let text = core::str::from_utf8(chunk).map_err(|err| err.valid_up_to())?;
                out.push_str(text);
            }
            FsEncoding::Latin1 => {
                for &b in chunk {
                    out.push_char(char::from(b));
                }
            }
        }
        Ok(())
    }

    /// Appends the encoding of `code_point`, or says why it cannot.
    pub(crate) fn encode_code_point(
        self,
        code_point: CodePoint,
        out: &mut Vec<u8>,
    ) -> Result<(), &'static str> {
        let value = code_point.to_u32();
        match self {
            FsEncoding::Utf8 => {
                let ch = code_point.to_char().ok_or("surrogates not allowed")?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            FsEncoding::Ascii => {
                let byte = u8::try_from(value)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or("ordinal not in range(128)")?;
                out.push(byte);
            }
            FsEncoding::Latin1 => {
                let byte = u8::try_from(value).map_err(|_| "ordinal not in range(256)")?;
                out.push(byte);
            }
        }
        Ok(())
    }
}

impl fmt::Display for FsEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FsEncoding {
    type Err = Error;

    /// Accepts the usual aliases, ignoring case and treating `_` like `-`.
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "utf-8" | "utf8" | "u8" | "utf" | "cp65001" => Ok(FsEncoding::Utf8),
            "ascii" | "us-ascii" | "646" | "ansi-x3.4-1968" | "us" => Ok(FsEncoding::Ascii),
            "latin-1" | "latin1" | "latin" | "l1" | "iso-8859-1" | "iso8859-1" | "8859"
            | "cp819" => Ok(FsEncoding::Latin1),
            _ => Err(Error::UnknownEncoding(String::from(name))),
        }
    }
}

impl ErrorHandler {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ErrorHandler::SurrogateEscape => "surrogateescape",
            ErrorHandler::Strict => "strict",
        }
    }
}

impl fmt::Display for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorHandler {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "surrogateescape" => Ok(ErrorHandler::SurrogateEscape),
            "strict" => Ok(ErrorHandler::Strict),
            _ => Err(Error::UnknownErrorHandler(String::from(name))),
        }
    }
}
