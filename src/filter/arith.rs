use rgb::RGBA8;

use super::GrayscaleMethod;
use crate::pixel::PixelBuffer;

/// Copy `src` and rewrite R, G, B of every pixel.
fn map_channels(src: &PixelBuffer, f: impl Fn(usize, u8) -> u8) -> PixelBuffer {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        *px = RGBA8::new(f(0, px.r), f(1, px.g), f(2, px.b), px.a);
    }
    out
}

#[inline]
fn clamp_i32(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn clamp_f64(v: f64) -> u8 {
    // NaN becomes 0
    v.clamp(0.0, 255.0) as u8
}

/// Add a per-channel offset to R, G, B.
pub fn add(src: &PixelBuffer, offsets: [i32; 3]) -> PixelBuffer {
    map_channels(src, |c, v| {
        clamp_i32(i32::from(v).saturating_add(offsets[c]))
    })
}

pub fn subtract(src: &PixelBuffer, offsets: [i32; 3]) -> PixelBuffer {
    map_channels(src, |c, v| {
        clamp_i32(i32::from(v).saturating_sub(offsets[c]))
    })
}

/// Scale R, G, B; the product is truncated.
pub fn multiply(src: &PixelBuffer, factors: [f64; 3]) -> PixelBuffer {
    map_channels(src, |c, v| clamp_f64(f64::from(v) * factors[c]))
}

/// Divide R, G, B. A channel whose divisor is zero keeps its value.
pub fn divide(src: &PixelBuffer, divisors: [f64; 3]) -> PixelBuffer {
    map_channels(src, |c, v| {
        let d = divisors[c];
        if d == 0.0 { v } else { clamp_f64(f64::from(v) / d) }
    })
}

/// Shift all three color channels by the same amount.
pub fn brightness(src: &PixelBuffer, delta: i32) -> PixelBuffer {
    add(src, [delta; 3])
}

/// Replace R, G, B with a single reduced value.
pub fn grayscale(src: &PixelBuffer, method: GrayscaleMethod) -> PixelBuffer {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        let v = method.reduce(px.r, px.g, px.b);
        *px = RGBA8::new(v, v, v, px.a);
    }
    out
}
