//! Color-picker sampling surfaces.
//!
//! Each pixel depends only on its coordinates, so rows are filled in
//! parallel. All surfaces are opaque.

use rayon::prelude::*;

use crate::color::{Hsv, Rgb, hsv_to_rgb};
use crate::error::RasterError;
use crate::pixel::PixelBuffer;

/// A face of the RGB cube, named by which side of the cube it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Corner colors: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(self) -> [Rgb; 4] {
        const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
            Rgb { r, g, b }
        }
        const BLACK: Rgb = rgb(0, 0, 0);
        const RED: Rgb = rgb(255, 0, 0);
        const GREEN: Rgb = rgb(0, 255, 0);
        const BLUE: Rgb = rgb(0, 0, 255);
        const YELLOW: Rgb = rgb(255, 255, 0);
        const CYAN: Rgb = rgb(0, 255, 255);
        const MAGENTA: Rgb = rgb(255, 0, 255);
        const WHITE: Rgb = rgb(255, 255, 255);

        match self {
            CubeFace::Front => [RED, YELLOW, MAGENTA, WHITE],
            CubeFace::Back => [GREEN, BLACK, CYAN, BLUE],
            CubeFace::Left => [BLACK, RED, BLUE, MAGENTA],
            CubeFace::Right => [YELLOW, GREEN, WHITE, CYAN],
            CubeFace::Top => [BLACK, GREEN, RED, YELLOW],
            CubeFace::Bottom => [MAGENTA, WHITE, BLUE, CYAN],
        }
    }
}

/// Position of `i` along `0..n` as a fraction in `[0, 1]`.
#[inline]
fn fraction(i: usize, n: u32) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / f64::from(n - 1)
    }
}

fn generate(
    width: u32,
    height: u32,
    pixel: impl Fn(f64, f64) -> Rgb + Sync,
) -> Result<PixelBuffer, RasterError> {
    let mut out = PixelBuffer::filled(width, height, [0, 0, 0, 255])?;
    let row_len = width as usize * PixelBuffer::CHANNELS;
    out.as_bytes_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let v = fraction(y, height);
            for (x, px) in row.chunks_exact_mut(PixelBuffer::CHANNELS).enumerate() {
                let c = pixel(fraction(x, width), v);
                px[..3].copy_from_slice(&[c.r, c.g, c.b]);
            }
        });
    Ok(out)
}

/// Saturation/value plane for one hue.
///
/// Saturation runs 0 → 100 left to right, value 100 → 0 top to bottom.
pub fn hsv_plane(hue: f64, width: u32, height: u32) -> Result<PixelBuffer, RasterError> {
    log::trace!("hsv plane hue={hue} {width}x{height}");
    generate(width, height, |u, v| {
        hsv_to_rgb(Hsv::new(hue, u * 100.0, (1.0 - v) * 100.0))
    })
}

/// A `size`×`size` square blending four corner colors bilinearly.
pub fn bilinear_face(corners: [Rgb; 4], size: u32) -> Result<PixelBuffer, RasterError> {
    log::trace!("bilinear face {size}x{size}");
    let [tl, tr, bl, br] = corners;
    generate(size, size, |u, v| {
        let blend = |a: u8, b: u8, c: u8, d: u8| {
            (f64::from(a) * (1.0 - u) * (1.0 - v)
                + f64::from(b) * u * (1.0 - v)
                + f64::from(c) * (1.0 - u) * v
                + f64::from(d) * u * v) as u8
        };
        Rgb::new(
            blend(tl.r, tr.r, bl.r, br.r),
            blend(tl.g, tr.g, bl.g, br.g),
            blend(tl.b, tr.b, bl.b, br.b),
        )
    })
}

pub fn cube_face(face: CubeFace, size: u32) -> Result<PixelBuffer, RasterError> {
    bilinear_face(face.corners(), size)
}
