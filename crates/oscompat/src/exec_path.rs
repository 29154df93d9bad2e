//! Exec-path resolution: the directories searched for a program name.

use alloc::vec::Vec;

use crate::{
    codec::FsCodec,
    error::{Error, Result},
    fs_str::{FsStr, FsString},
    path_arg::PathArg,
};

/// Search path used when the environment has no `PATH`.
pub const DEFPATH: &str = if cfg!(windows) { ".;C:\\bin" } else { "/bin:/usr/bin" };

/// Separator between entries of a search path.
pub const PATHSEP: char = if cfg!(windows) { ';' } else { ':' };

pub(crate) const PATH_KEY: &str = "PATH";

/// Returns the directories named by `PATH` in `env`, or [`DEFPATH`] when it
/// has none.
///
/// `env` is a sequence of `(key, value)` pairs where keys and values may be
/// text or bytes. A text `"PATH"` key and, where the environment is
/// byte-based, a bytes `b"PATH"` key are both recognized; a bytes value is
/// decoded with `codec`. Keys of any other type are ignored. Empty entries
/// are kept, so `PATH=""` gives `[""]`.
///
/// ```
/// use oscompat::{FsCodec, PathArg, get_exec_path};
///
/// let env = [(PathArg::from("PATH"), PathArg::from(b"/usr/local/bin:/bin"))];
/// let dirs = get_exec_path(&FsCodec::platform(), env).unwrap();
/// assert_eq!(dirs, ["/usr/local/bin", "/bin"]);
/// ```
///
/// # Errors
///
/// - [`Error::ConflictingPathKeys`] if both `"PATH"` and `b"PATH"` are set.
/// - [`Error::ArgumentType`] if the `PATH` value is neither text nor bytes.
/// - Decoding errors from `codec`.
pub fn get_exec_path<'a, I>(codec: &FsCodec, env: I) -> Result<Vec<FsString>>
where
    I: IntoIterator<Item = (PathArg<'a>, PathArg<'a>)>,
{
    let mut text_path = None;
    let mut bytes_path = None;
    for (key, value) in env {
        match key {
            PathArg::Text(key) if *key == *PATH_KEY => text_path = Some(value),
            PathArg::Bytes(key)
                if crate::supports_bytes_environ() && key == PATH_KEY.as_bytes() =>
            {
                bytes_path = Some(value);
            }
            _ => {}
        }
    }

    let value = match (text_path, bytes_path) {
        (Some(_), Some(_)) => return Err(Error::ConflictingPathKeys),
        (Some(value), None) | (None, Some(value)) => value,
        (None, None) => PathArg::from(DEFPATH),
    };
    let path = codec.fsdecode(value)?;
    Ok(split_search_path(&path))
}

pub(crate) fn split_search_path(path: &FsStr) -> Vec<FsString> {
    path.split_ascii(PATHSEP).map(FsString::from).collect()
}
