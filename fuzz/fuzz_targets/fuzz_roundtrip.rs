#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive encode -> decode unchanged
    let limits = Limits::pixels(1 << 20);
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    for encoding in [Encoding::Binary, Encoding::Ascii] {
        let Ok(bytes) = EncodeRequest::new(encoding).encode(&decoded, enough::Unstoppable) else {
            panic!("encoding a decoded image failed");
        };
        let Ok(again) = DecodeRequest::new(&bytes).decode(enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded, again, "roundtrip mismatch ({encoding:?})");
    }
});
