//! Filesystem path encoding with lossless byte escaping.
//!
//! - [`FsCodec`] converts between text and path bytes. Under the
//!   surrogateescape handler every byte sequence decodes, and encoding the
//!   result gives back the same bytes.
//! - [`scanner`] finds the bytes of an input that are not part of a valid
//!   UTF-8 sequence.
//! - [`Environ`] is an environment mapping with a text view and a bytes
//!   view, kept in sync with the process environment.
//! - [`get_exec_path`] resolves the directories searched for executables.
//!
//! The codec works without `std`; the environment parts need the `std`
//! feature (enabled by default).

#![cfg_attr(not(any(feature = "std", test)), no_std)]
extern crate alloc;

mod code_point;
mod codec;
mod error;
mod escape;
mod fs_str;
mod options;
mod path_arg;
pub mod scanner;
mod segments;

#[cfg(feature = "std")]
mod environ;
#[cfg(feature = "std")]
mod exec_path;


pub use code_point::CodePoint;
pub use codec::FsCodec;
#[cfg(feature = "std")]
pub use environ::{Detached, EnvSink, Environ, ProcessEnv, supports_bytes_environ};
pub use error::{Error, Result};
pub use escape::EscapeTable;
#[cfg(feature = "std")]
pub use exec_path::{DEFPATH, PATHSEP, get_exec_path};
pub use fs_str::{CodePoints, FsStr, FsString};
pub use options::{CodecOptions, ErrorHandler, FsEncoding};
pub use path_arg::PathArg;
pub use segments::{Segment, Segments};
