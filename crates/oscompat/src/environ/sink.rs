use std::{ffi::OsString, vec::Vec};

use crate::error::{Error, Result};

/// Receiver of environment writes made through an [`super::Environ`].
///
/// The environ validates names and values before calling the sink.
pub trait EnvSink {
    /// # Errors
    ///
    /// Returns an error if the sink rejects the variable.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the sink rejects the variable.
    fn unset(&mut self, key: &[u8]) -> Result<()>;
}

/// Mirrors every write into the environment of the current process.
///
/// # Safety
///
/// `env::set_var` and `env::remove_var` are only safe in single-threaded
/// programs. Other threads may read or write the environment through libc
/// at the same time, which is undefined behavior. Only use this sink while
/// no other thread touches the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

/// Keeps the mapping in memory; nothing is written anywhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl EnvSink for ProcessEnv {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let key = to_os_string(key)?;
        let value = to_os_string(value)?;
        // SAFETY: Only safe in single-threaded programs.
        // See the type-level safety documentation.
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }

    fn unset(&mut self, key: &[u8]) -> Result<()> {
        let key = to_os_string(key)?;
        // SAFETY: Only safe in single-threaded programs.
        // See the type-level safety documentation.
        unsafe { std::env::remove_var(key) };
        Ok(())
    }
}

impl EnvSink for Detached {
    fn set(&mut self, _key: &[u8], _value: &[u8]) -> Result<()> {
        Ok(())
    }

    fn unset(&mut self, _key: &[u8]) -> Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
fn to_os_string(bytes: &[u8]) -> Result<OsString> {
    use std::os::unix::ffi::OsStrExt;
    Ok(std::ffi::OsStr::from_bytes(bytes).to_os_string())
}

// Non-Unix environments are Unicode; bytes must be valid UTF-8.
#[cfg(not(unix))]
fn to_os_string(bytes: &[u8]) -> Result<OsString> {
    std::str::from_utf8(bytes)
        .map(OsString::from)
        .map_err(|_| Error::InvalidVariableName(bstr::BStr::new(bytes).to_string()))
}

#[cfg(unix)]
pub(crate) fn os_to_bytes(value: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    value.into_vec()
}

#[cfg(not(unix))]
pub(crate) fn os_to_bytes(value: OsString) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}

/// Rejects names the platform cannot store: empty, or containing `=` or
/// NUL.
pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() || key.contains(&b'=') || key.contains(&0) {
        return Err(Error::InvalidVariableName(
            bstr::BStr::new(key).to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_value(value: &[u8]) -> Result<()> {
    if value.contains(&0) {
        return Err(Error::NulByte);
    }
    Ok(())
}
