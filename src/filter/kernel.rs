//! 3×3 neighborhood filters and the separable Gaussian blur.
//!
//! Taps that fall outside the buffer are dropped from the sum rather than
//! padded, so edge pixels see fewer neighbors. Sobel is the exception: its
//! one-pixel border is copied from the source untouched.

use rayon::prelude::*;

use crate::convert::LumaWeights;
use crate::pixel::PixelBuffer;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
const HIGH_PASS_KERNEL: Kernel3 = [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]];

const GAUSS_TAPS: [u32; 5] = [1, 4, 6, 4, 1];
const GAUSS_NORM: u32 = 16;

const STRIDE: usize = PixelBuffer::CHANNELS;

/// In-bounds neighbors of (`x`, `y`) as `(kernel_row, kernel_col, x, y)`.
fn neighbors(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize, usize, usize)> {
    (0..3usize).flat_map(move |ky| {
        (0..3usize).filter_map(move |kx| {
            let nx = (x + kx).checked_sub(1)?;
            let ny = (y + ky).checked_sub(1)?;
            (nx < width && ny < height).then_some((ky, kx, nx, ny))
        })
    })
}

/// Run `f(x, y, out_pixel)` for every pixel, rows in parallel. `out` starts
/// as a copy of the source.
fn for_each_pixel(src: &PixelBuffer, f: impl Fn(usize, usize, &mut [u8]) + Sync) -> PixelBuffer {
    let mut out = src.clone();
    let row_len = src.width() as usize * STRIDE;
    out.as_bytes_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(STRIDE).enumerate() {
                f(x, y, px);
            }
        });
    out
}

/// Per-channel 3×3 median over the in-bounds neighborhood.
///
/// With an even number of samples (corners, edges) the upper middle is
/// taken. Alpha is copied from the source pixel.
pub fn median(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.as_bytes();
    for_each_pixel(src, |x, y, px| {
        for (c, out) in px.iter_mut().take(3).enumerate() {
            let mut window = [0u8; 9];
            let mut len = 0;
            for (_, _, nx, ny) in neighbors(x, y, w, h) {
                window[len] = data[src.offset(nx, ny) + c];
                len += 1;
            }
            let window = &mut window[..len];
            window.sort_unstable();
            *out = window[len / 2];
        }
    })
}

/// Sobel gradient magnitude of BT.601 luma, written to R, G, B.
///
/// The outermost row and column on every side keep their source pixels.
pub fn sobel(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let luma: Vec<f64> = src
        .pixels()
        .iter()
        .map(|p| LumaWeights::Bt601.luma(f64::from(p.r), f64::from(p.g), f64::from(p.b)))
        .collect();

    for_each_pixel(src, |x, y, px| {
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return;
        }
        let (mut gx, mut gy) = (0.0, 0.0);
        for (ky, kx, nx, ny) in neighbors(x, y, w, h) {
            let l = luma[ny * w + nx];
            gx += f64::from(SOBEL_KERNEL_X[ky][kx]) * l;
            gy += f64::from(SOBEL_KERNEL_Y[ky][kx]) * l;
        }
        let mag = (gx * gx + gy * gy).sqrt().min(255.0) as u8;
        px[..3].fill(mag);
    })
}

/// Sharpen with a 3×3 high-pass kernel on each of R, G, B.
pub fn high_pass(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.as_bytes();
    for_each_pixel(src, |x, y, px| {
        let mut sums = [0i32; 3];
        for (ky, kx, nx, ny) in neighbors(x, y, w, h) {
            let at = src.offset(nx, ny);
            let k = HIGH_PASS_KERNEL[ky][kx];
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += k * i32::from(data[at + c]);
            }
        }
        for (out, sum) in px.iter_mut().zip(sums) {
            *out = sum.clamp(0, 255) as u8;
        }
    })
}

/// Separable `[1, 4, 6, 4, 1] / 16` blur, horizontal then vertical.
///
/// The divisor stays 16 near the edges, so borders darken. The
/// intermediate pass is stored as truncated bytes.
pub fn gaussian_blur(src: &PixelBuffer) -> PixelBuffer {
    let horizontal = gaussian_pass(src, 1, 0);
    gaussian_pass(&horizontal, 0, 1)
}

fn gaussian_pass(src: &PixelBuffer, dx: usize, dy: usize) -> PixelBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.as_bytes();
    for_each_pixel(src, |x, y, px| {
        let mut sums = [0u32; 3];
        for (i, &tap) in GAUSS_TAPS.iter().enumerate() {
            // tap i sits at offset i - 2 along the pass direction
            let Some(nx) = (x + i * dx).checked_sub(2 * dx) else {
                continue;
            };
            let Some(ny) = (y + i * dy).checked_sub(2 * dy) else {
                continue;
            };
            if nx >= w || ny >= h {
                continue;
            }
            let at = src.offset(nx, ny);
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += tap * u32::from(data[at + c]);
            }
        }
        for (out, sum) in px.iter_mut().zip(sums) {
            *out = (sum / GAUSS_NORM) as u8;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> PixelBuffer {
        let data = (0..w * h)
            .flat_map(|i| {
                let v = (i * 37 % 256) as u8;
                [v, 255 - v, v / 2, 200]
            })
            .collect();
        PixelBuffer::new(w, h, data).unwrap()
    }

    #[test]
    fn neighbors_are_clipped_at_corners() {
        assert_eq!(neighbors(0, 0, 5, 5).count(), 4);
        assert_eq!(neighbors(2, 0, 5, 5).count(), 6);
        assert_eq!(neighbors(2, 2, 5, 5).count(), 9);
        assert_eq!(neighbors(0, 0, 1, 1).count(), 1);
    }

    #[test]
    fn median_of_single_outlier_removes_it() {
        let mut buf = PixelBuffer::filled(3, 3, [10, 20, 30, 255]).unwrap();
        let at = buf.offset(1, 1);
        buf.as_bytes_mut()[at..at + 4].copy_from_slice(&[250, 250, 250, 40]);
        let out = median(&buf);
        assert_eq!(out.get(1, 1).unwrap(), rgb::RGBA8::new(10, 20, 30, 40));
    }

    #[test]
    fn sobel_finds_vertical_edge() {
        // left half black, right half white
        let data = (0..16)
            .flat_map(|i| {
                if i % 4 < 2 {
                    [0, 0, 0, 255]
                } else {
                    [255, 255, 255, 255]
                }
            })
            .collect();
        let buf = PixelBuffer::new(4, 4, data).unwrap();
        let out = sobel(&buf);
        assert_eq!(out.get(1, 1).unwrap().r, 255);
        assert_eq!(out.get(0, 1).unwrap(), buf.get(0, 1).unwrap());
    }

    #[test]
    fn high_pass_single_pixel_is_scaled_by_nine() {
        let out = high_pass(&PixelBuffer::filled(1, 1, [20, 28, 29, 3]).unwrap());
        assert_eq!(out.as_bytes(), &[180, 252, 255, 3]);
    }

    #[test]
    fn high_pass_uniform_interior_is_identity() {
        let out = high_pass(&PixelBuffer::filled(3, 3, [40, 50, 60, 255]).unwrap());
        assert_eq!(out.get(1, 1).unwrap(), rgb::RGBA8::new(40, 50, 60, 255));
        // corner sees 4 taps: 9v - 3v
        assert_eq!(out.get(0, 0).unwrap(), rgb::RGBA8::new(240, 255, 255, 255));
    }

    #[test]
    fn gaussian_uniform_interior_is_preserved_and_edges_darken() {
        let out = gaussian_blur(&PixelBuffer::filled(5, 5, [160, 160, 160, 255]).unwrap());
        assert_eq!(out.get(2, 2).unwrap().r, 160);
        // corner: (6+4+1)/16 per pass, truncated twice
        let once = 160 * 11 / 16;
        assert_eq!(u32::from(out.get(0, 0).unwrap().r), once * 11 / 16);
        assert_eq!(out.get(0, 0).unwrap().a, 255);
    }

    #[test]
    fn filters_keep_dimensions_and_alpha() {
        let src = ramp(7, 3);
        let outputs = [median(&src), sobel(&src), high_pass(&src)];
        for out in outputs.into_iter().chain([gaussian_blur(&src)]) {
            assert_eq!((out.width(), out.height()), (7, 3));
            assert!(out.pixels().iter().all(|p| p.a == 200));
        }
    }
}
