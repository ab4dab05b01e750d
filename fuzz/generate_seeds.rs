#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let seeds: &[(&str, &[u8])] = &[
        ("pbm_ascii_2x2.pbm", b"P1\n2 2\n0 1\n1 0\n"),
        ("pbm_binary_9x1.pbm", b"P4\n9 1\n\x55\x80"),
        ("pgm_ascii_comments.pgm", b"P2\n# c\n3 1 # w h\n9\n0 4 9\n"),
        ("pgm_3x2.pgm", b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64"),
        ("pgm_16bit.pgm", b"P5\n2 1\n1000\n\x03\xe8\x00\x01"),
        ("ppm_ascii_1x1.ppm", b"P3\n1 1\n255\n255 0 128\n"),
        ("ppm_2x2.ppm", b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80"),
        // truncated and malformed
        ("empty.bin", b""),
        ("just_p6.bin", b"P6"),
        ("zero_width.bin", b"P5\n0 1\n255\n"),
        ("sample_over_max.bin", b"P2\n1 1\n7\n8\n"),
        ("short_payload.bin", b"P6\n4 4\n255\n\x00"),
    ];
    for (name, bytes) in seeds {
        fs::write(format!("{dir}/{name}"), bytes).unwrap();
    }

    println!("Generated seed corpus in {dir}/");
}
