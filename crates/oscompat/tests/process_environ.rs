//! Writes through a process-backed `Environ` must show up in `std::env`.
//!
//! Everything lives in one test: the process environment is shared by all
//! threads of the test binary.

use oscompat::{CodecOptions, Environ, FsCodec, FsEncoding};

const KEY: &str = "OSCOMPAT_PROCESS_ENVIRON_TEST";

#[test]
fn process_environ_stays_in_sync() {
    let codec = FsCodec::new(CodecOptions::escaping(FsEncoding::Utf8));
    let mut env = Environ::from_process(codec);

    for (key, value) in std::env::vars_os() {
        if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
            assert_eq!(env.get(key).unwrap().unwrap(), value, "{key}");
        }
    }
    assert!(!env.contains_key(KEY).unwrap());

    env.insert(KEY, "euro\u{20ac}").unwrap();
    assert_eq!(std::env::var(KEY).unwrap(), "euro\u{20ac}");

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;

        env.insert_bytes(KEY.as_bytes(), b"raw\xff").unwrap();
        let value = std::env::var_os(KEY).unwrap();
        assert_eq!(value.as_bytes(), b"raw\xff");
        let text = env.get(KEY).unwrap().unwrap();
        assert_eq!(env.codec().encode(&text).unwrap(), b"raw\xff");
    }

    assert!(env.remove(KEY).unwrap().is_some());
    assert_eq!(std::env::var_os(KEY), None);
    assert!(env.remove(KEY).unwrap().is_none());
}
