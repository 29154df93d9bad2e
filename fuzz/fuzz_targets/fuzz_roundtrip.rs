#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use oscompat::{CodecOptions, FsCodec, FsEncoding, scanner};

#[derive(Arbitrary, Debug)]
enum Encoding {
    Utf8,
    Ascii,
    Latin1,
}

#[derive(Arbitrary, Debug)]
struct Input {
    encoding: Encoding,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let encoding = match input.encoding {
        Encoding::Utf8 => FsEncoding::Utf8,
        Encoding::Ascii => FsEncoding::Ascii,
        Encoding::Latin1 => FsEncoding::Latin1,
    };
    let codec = FsCodec::new(CodecOptions::escaping(encoding));

    let text = codec.decode(&input.bytes).expect("surrogateescape never fails to decode");
    let bytes = codec.encode(&text).expect("decoded text always encodes");
    assert_eq!(bytes, input.bytes);

    let offsets = scanner::invalid_offsets(&input.bytes);
    assert_eq!(offsets.is_empty(), std::str::from_utf8(&input.bytes).is_ok());
    assert_eq!(scanner::scan(&input.bytes).collect::<Vec<_>>(), offsets);

    let strict = FsCodec::new(CodecOptions::strict(FsEncoding::Utf8));
    assert_eq!(strict.decode(&input.bytes).is_ok(), offsets.is_empty());
});
