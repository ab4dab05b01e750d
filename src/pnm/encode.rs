//! Netpbm encoder: P1–P6.

use super::{Encoding, PnmFormat};
use crate::raster::{BitImage, RasterImage};

/// Encode a raster image in its own kind with the requested encoding.
pub(crate) fn encode_pnm(image: &RasterImage, encoding: Encoding) -> Vec<u8> {
    let format = PnmFormat::new(image.kind(), encoding);
    let mut out = header(format, image.width(), image.height(), image.max_value());

    match (image, encoding) {
        (RasterImage::Bit(img), Encoding::Binary) => write_bits_binary(&mut out, img),
        (RasterImage::Bit(img), Encoding::Ascii) => write_bits_ascii(&mut out, img),
        (RasterImage::Gray(img), Encoding::Binary) => {
            write_samples_binary(&mut out, img.samples(), img.max_value())
        }
        (RasterImage::Gray(img), Encoding::Ascii) => {
            write_samples_ascii(&mut out, img.samples(), img.width() as usize)
        }
        (RasterImage::Rgb(img), Encoding::Binary) => {
            write_samples_binary(&mut out, img.samples(), img.max_value())
        }
        (RasterImage::Rgb(img), Encoding::Ascii) => {
            write_samples_ascii(&mut out, img.samples(), img.width() as usize * 3)
        }
    }
    out
}

fn header(format: PnmFormat, width: u32, height: u32, max_value: Option<u16>) -> Vec<u8> {
    let header = match max_value {
        Some(max) => format!("{}\n{width} {height}\n{max}\n", format.magic()),
        None => format!("{}\n{width} {height}\n", format.magic()),
    };
    header.into_bytes()
}

fn write_bits_binary(out: &mut Vec<u8>, img: &BitImage) {
    let w = img.width() as usize;
    out.reserve(w.div_ceil(8) * img.height() as usize);
    for row in img.pixels().chunks_exact(w) {
        for byte_px in row.chunks(8) {
            let mut byte = 0u8;
            for (bit, &foreground) in byte_px.iter().enumerate() {
                if !foreground {
                    byte |= 1 << (7 - bit);
                }
            }
            out.push(byte);
        }
    }
}

fn write_bits_ascii(out: &mut Vec<u8>, img: &BitImage) {
    let w = img.width() as usize;
    out.reserve(img.pixels().len() * 2);
    for row in img.pixels().chunks_exact(w) {
        for (i, &foreground) in row.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            out.push(if foreground { b'0' } else { b'1' });
        }
        out.push(b'\n');
    }
}

fn write_samples_binary(out: &mut Vec<u8>, samples: &[u16], max_value: u16) {
    if PnmFormat::sample_width(max_value) == 1 {
        out.extend(samples.iter().map(|&s| s as u8));
    } else {
        out.reserve(samples.len() * 2);
        for &s in samples {
            out.extend_from_slice(&s.to_be_bytes());
        }
    }
}

fn write_samples_ascii(out: &mut Vec<u8>, samples: &[u16], per_row: usize) {
    out.reserve(samples.len() * 4);
    for row in samples.chunks_exact(per_row) {
        for (i, &s) in row.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            push_decimal(out, s);
        }
        out.push(b'\n');
    }
}

fn push_decimal(out: &mut Vec<u8>, value: u16) {
    let mut digits = [0u8; 5];
    let mut n = value;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.extend(digits[..len].iter().rev());
}
