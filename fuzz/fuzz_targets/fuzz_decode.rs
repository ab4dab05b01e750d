#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::{DecodeRequest, ImageInfo, Limits};

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = ImageInfo::from_bytes(data);

    let limits = Limits::pixels(1 << 20);
    if let Ok(image) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    {
        let buffer = zenraster::to_pixel_buffer(&image);
        let _ = zenraster::filter::median(&buffer);
    }
});
