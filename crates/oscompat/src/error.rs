use alloc::string::String;

use thiserror::Error;

use crate::{code_point::CodePoint, options::FsEncoding};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by the codec, the environment mapping and the exec-path
/// resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The argument was neither text nor bytes.
    #[error("expected str, bytes or os.PathLike object, not {type_name}")]
    ArgumentType { type_name: String },

    /// A code point could not be represented in the target encoding.
    #[error(
        "'{encoding}' codec can't encode character {code_point:?} in position {position}: {reason}"
    )]
    Encode {
        encoding: FsEncoding,
        code_point: CodePoint,
        position: usize,
        reason: &'static str,
    },

    /// A byte could not be decoded and the error handler is strict.
    #[error("'{encoding}' codec can't decode byte 0x{byte:02x} in position {position}: {reason}")]
    Decode {
        encoding: FsEncoding,
        byte: u8,
        position: usize,
        reason: &'static str,
    },

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("unknown error handler: {0}")]
    UnknownErrorHandler(String),

    /// Empty names and names containing `=` or NUL are rejected by the
    /// platform.
    #[error("illegal environment variable name: {0}")]
    InvalidVariableName(String),

    #[error("embedded null byte")]
    NulByte,

    #[error("env cannot contain 'PATH' and b'PATH' keys")]
    ConflictingPathKeys,
}
