use alloc::{string::String, vec::Vec};

use crate::fs_str::{FsStr, FsString};

/// An argument to the polymorphic codec functions: text, bytes, or a value
/// of some other type.
///
/// `Unsupported` exists for callers that receive dynamically typed input
/// (configuration values, foreign bindings). The codec rejects it with
/// [`crate::Error::ArgumentType`], naming the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathArg<'a> {
    Text(&'a FsStr),
    Bytes(&'a [u8]),
    Unsupported { type_name: &'a str },
}

impl<'a> PathArg<'a> {
    #[must_use]
    pub const fn unsupported(type_name: &'a str) -> Self {
        PathArg::Unsupported { type_name }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, PathArg::Text(_))
    }

    #[must_use]
    pub fn is_bytes(&self) -> bool {
        matches!(self, PathArg::Bytes(_))
    }
}

impl<'a> From<&'a FsStr> for PathArg<'a> {
    fn from(text: &'a FsStr) -> Self {
        PathArg::Text(text)
    }
}

impl<'a> From<&'a FsString> for PathArg<'a> {
    fn from(text: &'a FsString) -> Self {
        PathArg::Text(text.as_fs_str())
    }
}

impl<'a> From<&'a str> for PathArg<'a> {
    fn from(text: &'a str) -> Self {
        PathArg::Text(FsStr::from_str(text))
    }
}

impl<'a> From<&'a String> for PathArg<'a> {
    fn from(text: &'a String) -> Self {
        PathArg::Text(FsStr::from_str(text))
    }
}

impl<'a> From<&'a [u8]> for PathArg<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PathArg::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for PathArg<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        PathArg::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for PathArg<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        PathArg::Bytes(bytes)
    }
}

// On Unix an `OsStr` is raw bytes, the natural "path-like" input.
#[cfg(all(feature = "std", unix))]
impl<'a> From<&'a std::ffi::OsStr> for PathArg<'a> {
    fn from(value: &'a std::ffi::OsStr) -> Self {
        use std::os::unix::ffi::OsStrExt;
        PathArg::Bytes(value.as_bytes())
    }
}

#[cfg(all(feature = "std", unix))]
impl<'a> From<&'a std::path::Path> for PathArg<'a> {
    fn from(value: &'a std::path::Path) -> Self {
        PathArg::from(value.as_os_str())
    }
}
