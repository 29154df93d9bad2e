use rstest::rstest;

use super::*;
use crate::{CodePoint, CodecOptions, Error, FsEncoding};

const CODEC: FsCodec = FsCodec::new(CodecOptions::escaping(FsEncoding::Utf8));

fn environ() -> Environ<Detached> {
    Environ::detached(CODEC)
}

/// Records every call so tests can check what reached the sink.
#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
}

impl EnvSink for Recorder {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.calls
            .push(format!("set {}={}", BStr::new(key), BStr::new(value)));
        Ok(())
    }

    fn unset(&mut self, key: &[u8]) -> Result<()> {
        self.calls.push(format!("unset {}", BStr::new(key)));
        Ok(())
    }
}

#[test]
fn text_insert_is_visible_as_bytes() {
    let mut env = environ();
    env.insert("unicode", "euro\u{20ac}").unwrap();
    assert_eq!(env.get_bytes(b"unicode"), Some(&b"euro\xe2\x82\xac"[..]));
    assert_eq!(env.get("unicode").unwrap().unwrap(), "euro\u{20ac}");
}

#[test]
fn bytes_insert_is_visible_as_text() {
    let mut env = environ();
    env.insert_bytes(b"bytes", b"abc\xff").unwrap();
    let value = env.get("bytes").unwrap().unwrap();
    let expected: FsString = "abc"
        .chars()
        .map(CodePoint::from)
        .chain([CodePoint::from_u32(0xDCFF).unwrap()])
        .collect();
    assert_eq!(value, expected);
    assert_eq!(env.get_bytes(b"bytes"), Some(&b"abc\xff"[..]));
}

#[test]
fn escaped_text_key_matches_its_bytes() {
    let mut env = environ();
    let key = CODEC.decode(b"key\xfe").unwrap();
    env.insert(&key, "v").unwrap();
    assert!(env.contains_key_bytes(b"key\xfe"));
    assert!(env.contains_key(&key).unwrap());
}

#[test]
fn missing_keys() {
    let mut env = environ();
    assert_eq!(env.get("nope").unwrap(), None);
    assert!(!env.contains_key("nope").unwrap());
    assert_eq!(env.remove("nope").unwrap(), None);
    assert_eq!(env.remove_bytes(b"nope").unwrap(), None);
}

#[test]
fn remove_returns_the_previous_value() {
    let mut env = environ();
    env.insert("KEY", "value").unwrap();
    assert_eq!(env.remove("KEY").unwrap().unwrap(), "value");
    assert!(env.is_empty());

    env.insert_bytes(b"KEY", b"\xff").unwrap();
    assert_eq!(env.remove_bytes(b"KEY").unwrap(), Some(b"\xff".to_vec()));
}

#[rstest]
#[case::equals_sign("key=")]
#[case::leading_equals("=key")]
#[case::empty("")]
#[case::nul("k\0ey")]
fn invalid_names_are_rejected(#[case] key: &str) {
    let mut env = environ();
    assert!(matches!(
        env.insert(key, "value"),
        Err(Error::InvalidVariableName(_))
    ));
    assert!(matches!(
        env.remove(key),
        Err(Error::InvalidVariableName(_))
    ));
    assert!(env.is_empty());
}

#[test]
fn invalid_name_message() {
    let err = environ().remove("key=").unwrap_err();
    assert_eq!(err.to_string(), "illegal environment variable name: key=");
}

#[test]
fn nul_in_value_is_rejected() {
    let mut env = environ();
    assert_eq!(env.insert("KEY", "a\0b"), Err(Error::NulByte));
    assert_eq!(env.insert_bytes(b"KEY", b"a\0b"), Err(Error::NulByte));
    assert!(!env.contains_key_bytes(b"KEY"));
}

#[test]
fn unencodable_key_is_an_encode_error() {
    let strict = FsCodec::new(CodecOptions::strict(FsEncoding::Ascii));
    let mut env = Environ::detached(strict);
    assert!(matches!(
        env.insert("caf\u{e9}", "x"),
        Err(Error::Encode { .. })
    ));
}

#[test]
fn writes_reach_the_sink_before_the_store() {
    let mut env = Environ::with_sink(CODEC, Recorder::default());
    env.insert("A", "1").unwrap();
    env.insert_bytes(b"B", b"2").unwrap();
    env.remove("A").unwrap();
    env.remove("missing").unwrap();
    assert_eq!(
        env.sink().calls,
        ["set A=1", "set B=2", "unset A", "unset missing"]
    );
}

#[test]
fn rejected_writes_do_not_reach_the_sink() {
    let mut env = Environ::with_sink(CODEC, Recorder::default());
    env.insert("A=", "1").unwrap_err();
    env.insert("A", "\0").unwrap_err();
    assert!(env.sink().calls.is_empty());
}

#[test]
fn clear_unsets_everything() {
    let mut env = Environ::with_sink(CODEC, Recorder::default());
    env.update([("X", "1"), ("Y", "2")]).unwrap();
    assert_eq!(env.len(), 2);
    env.clear().unwrap();
    assert!(env.is_empty());
    assert_eq!(
        env.sink().calls,
        ["set X=1", "set Y=2", "unset X", "unset Y"]
    );
}

#[test]
fn iteration_is_in_key_order() {
    let mut env = environ();
    env.update([("b", "2"), ("a", "1")]).unwrap();
    env.insert_bytes(b"c", b"\x80").unwrap();

    let bytes: Vec<_> = env.iter_bytes().collect();
    assert_eq!(
        bytes,
        [
            (&b"a"[..], &b"1"[..]),
            (&b"b"[..], &b"2"[..]),
            (&b"c"[..], &b"\x80"[..]),
        ]
    );

    let text: Vec<(FsString, FsString)> = env.iter().collect::<Result<_>>().unwrap();
    assert_eq!(text.len(), 3);
    assert_eq!(text[0].0, "a");
    assert_eq!(CODEC.encode(&text[2].1).unwrap(), b"\x80");
}

#[test]
fn strict_codec_fails_to_read_undecodable_values() {
    let mut env = Environ::detached(FsCodec::new(CodecOptions::strict(FsEncoding::Utf8)));
    env.insert_bytes(b"KEY", b"\xff").unwrap();
    assert!(matches!(env.get("KEY"), Err(Error::Decode { .. })));
    assert_eq!(env.get_bytes(b"KEY"), Some(&b"\xff"[..]));
}

#[test]
fn debug_lists_the_variables() {
    let mut env = environ();
    env.update([("KEY1", "VALUE1"), ("KEY2", "VALUE2")]).unwrap();
    env.insert_bytes(b"KEY3", b"\xff").unwrap();
    insta::assert_snapshot!(
        format!("{env:?}"),
        @r#"environ({"KEY1": "VALUE1", "KEY2": "VALUE2", "KEY3": "\u{dcff}"})"#
    );
}

#[test]
fn debug_falls_back_to_bytes_when_undecodable() {
    let mut env = Environ::detached(FsCodec::new(CodecOptions::strict(FsEncoding::Utf8)));
    env.insert_bytes(b"KEY", b"caf\xc3\xa9\xff").unwrap();
    insta::assert_snapshot!(format!("{env:?}"), @r#"environ({"KEY": "café\xff"})"#);
}

#[test]
fn exec_path_reads_path_variable() {
    let mut env = environ();
    assert_eq!(
        env.exec_path().unwrap(),
        DEFPATH.split(crate::PATHSEP).collect::<Vec<_>>()
    );

    let path = ["/a", "", "/b"].join(&crate::PATHSEP.to_string());
    env.insert("PATH", path.as_str()).unwrap();
    assert_eq!(env.exec_path().unwrap(), ["/a", "", "/b"]);
}
