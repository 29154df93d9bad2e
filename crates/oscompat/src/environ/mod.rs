//! Environment-variable mapping with a text view and a bytes view.
//!
//! Both views share one store of encoded bytes. The text view encodes keys
//! and values with the environ's [`FsCodec`] on the way in and decodes them
//! on the way out, so a value written as bytes is visible as text (with
//! undecodable bytes escaped) and vice versa.
//!
//! Every write is forwarded to an [`EnvSink`] before the store is updated:
//! [`ProcessEnv`] keeps the real process environment in sync, [`Detached`]
//! keeps the mapping in memory only.
//!
//! ```
//! use oscompat::{CodecOptions, Environ, FsCodec, FsEncoding};
//!
//! let codec = FsCodec::new(CodecOptions::escaping(FsEncoding::Utf8));
//! let mut env = Environ::detached(codec);
//! env.insert_bytes(b"NAME", b"caf\xc3\xa9\xff").unwrap();
//! let text = env.get("NAME").unwrap().unwrap();
//! assert_eq!(format!("{text:?}"), r#""café\u{dcff}""#);
//! ```

mod sink;

use std::{collections::BTreeMap, fmt, vec::Vec};

use bstr::BStr;
pub use sink::{Detached, EnvSink, ProcessEnv};

use crate::{
    codec::FsCodec,
    error::Result,
    exec_path::{self, DEFPATH},
    fs_str::{FsStr, FsString},
};

/// Whether the platform exposes the environment as bytes.
///
/// On other platforms the bytes view still works, but it holds the UTF-8
/// encoding of Unicode variables.
#[must_use]
pub const fn supports_bytes_environ() -> bool {
    cfg!(unix)
}

/// Environment mapping synchronized with an [`EnvSink`].
pub struct Environ<S = ProcessEnv> {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    codec: FsCodec,
    sink: S,
}

impl Environ<ProcessEnv> {
    /// Snapshots the current process environment. Writes go back to it.
    #[must_use]
    pub fn from_process(codec: FsCodec) -> Self {
        let data: BTreeMap<_, _> = std::env::vars_os()
            .map(|(key, value)| (sink::os_to_bytes(key), sink::os_to_bytes(value)))
            .collect();
        tracing::debug!(variables = data.len(), "snapshotted process environment");
        Self {
            data,
            codec,
            sink: ProcessEnv,
        }
    }
}

impl Environ<Detached> {
    /// An empty mapping that is not connected to the process.
    #[must_use]
    pub fn detached(codec: FsCodec) -> Self {
        Self::with_sink(codec, Detached)
    }
}

impl<S: EnvSink> Environ<S> {
    /// An empty mapping that forwards writes to `sink`.
    pub fn with_sink(codec: FsCodec, sink: S) -> Self {
        Self {
            data: BTreeMap::new(),
            codec,
            sink,
        }
    }

    #[must_use]
    pub fn codec(&self) -> FsCodec {
        self.codec
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Text view
    // ─────────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Fails if the key cannot be encoded or the stored value cannot be
    /// decoded.
    pub fn get(&self, key: impl AsRef<FsStr>) -> Result<Option<FsString>> {
        let key = self.codec.encode(key.as_ref())?;
        self.data
            .get(&key)
            .map(|value| self.codec.decode(value))
            .transpose()
    }

    /// # Errors
    ///
    /// Fails if the key cannot be encoded.
    pub fn contains_key(&self, key: impl AsRef<FsStr>) -> Result<bool> {
        let key = self.codec.encode(key.as_ref())?;
        Ok(self.data.contains_key(&key))
    }

    /// Sets a variable, forwarding it to the sink first.
    ///
    /// # Errors
    ///
    /// Fails if the key or value cannot be encoded, if the key is not a
    /// valid variable name, or if the value contains NUL.
    pub fn insert(&mut self, key: impl AsRef<FsStr>, value: impl AsRef<FsStr>) -> Result<()> {
        let key = self.codec.encode(key.as_ref())?;
        let value = self.codec.encode(value.as_ref())?;
        self.insert_encoded(key, value)
    }

    /// Unsets a variable and returns its previous value, if any.
    ///
    /// The sink is asked to unset the name even when the mapping does not
    /// hold it, so an invalid name fails either way.
    ///
    /// # Errors
    ///
    /// Fails if the key cannot be encoded or is not a valid variable name.
    pub fn remove(&mut self, key: impl AsRef<FsStr>) -> Result<Option<FsString>> {
        let key = self.codec.encode(key.as_ref())?;
        self.remove_encoded(&key)?
            .map(|value| self.codec.decode(&value))
            .transpose()
    }

    /// Decoded `(key, value)` pairs in key-byte order.
    pub fn iter(&self) -> impl Iterator<Item = Result<(FsString, FsString)>> + '_ {
        self.data
            .iter()
            .map(|(key, value)| -> Result<(FsString, FsString)> {
                Ok((self.codec.decode(key)?, self.codec.decode(value)?))
            })
    }

    /// Sets every pair in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// As [`Environ::insert`].
    pub fn update<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<FsStr>,
        V: AsRef<FsStr>,
    {
        for (key, value) in pairs {
            self.insert(key, value)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Bytes view
    // ─────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn get_bytes(&self, key: &[u8]) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_key_bytes(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    /// # Errors
    ///
    /// Fails if the key is not a valid variable name or the value contains
    /// NUL.
    pub fn insert_bytes(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.insert_encoded(key.to_vec(), value.to_vec())
    }

    /// # Errors
    ///
    /// Fails if the key is not a valid variable name.
    pub fn remove_bytes(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.remove_encoded(key)
    }

    pub fn iter_bytes(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.data
            .iter()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }

    // ─────────────────────────────────────────────────────────────────────

    /// Unsets every variable.
    ///
    /// # Errors
    ///
    /// Stops at the first variable the sink refuses to unset; the
    /// variables already removed stay removed.
    pub fn clear(&mut self) -> Result<()> {
        let keys: Vec<Vec<u8>> = self.data.keys().cloned().collect();
        for key in keys {
            self.remove_encoded(&key)?;
        }
        Ok(())
    }

    /// Directories searched for executables, from this mapping's `PATH`.
    ///
    /// Falls back to [`DEFPATH`] when `PATH` is unset.
    ///
    /// # Errors
    ///
    /// Fails if `PATH` cannot be decoded.
    pub fn exec_path(&self) -> Result<Vec<FsString>> {
        let path = match self.data.get(exec_path::PATH_KEY.as_bytes()) {
            Some(value) => self.codec.decode(value)?,
            None => FsString::from(DEFPATH),
        };
        Ok(exec_path::split_search_path(&path))
    }

    fn insert_encoded(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        sink::check_key(&key)?;
        sink::check_value(&value)?;
        self.sink.set(&key, &value)?;
        tracing::debug!(key = %BStr::new(&key), "set environment variable");
        self.data.insert(key, value);
        Ok(())
    }

    fn remove_encoded(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        sink::check_key(key)?;
        self.sink.unset(key)?;
        tracing::debug!(key = %BStr::new(key), "unset environment variable");
        Ok(self.data.remove(key))
    }
}

/// Shows stored bytes as decoded text, or as raw bytes if the codec rejects
/// them.
struct Decoded<'a> {
    codec: FsCodec,
    bytes: &'a [u8],
}

impl fmt::Debug for Decoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.codec.decode(self.bytes) {
            Ok(text) => fmt::Debug::fmt(&text, f),
            Err(_) => fmt::Debug::fmt(BStr::new(self.bytes), f),
        }
    }
}

impl<S> fmt::Debug for Environ<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codec = self.codec;
        f.write_str("environ(")?;
        f.debug_map()
            .entries(self.data.iter().map(|(key, value)| {
                (
                    Decoded { codec, bytes: key },
                    Decoded {
                        codec,
                        bytes: value,
                    },
                )
            }))
            .finish()?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests;
