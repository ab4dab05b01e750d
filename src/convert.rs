//! Conversions between the three raster kinds and the RGBA8 working buffer.
//!
//! All conversions are pure: they read their input and allocate a new
//! image. Going through [`PixelBuffer`] always normalizes samples to 0–255
//! (`sample * 255 / max_value`) with opaque alpha.

use crate::pixel::PixelBuffer;
use crate::raster::{BitImage, GrayImage, RasterImage, RasterKind, RgbImage};

/// Channel weights used to collapse R,G,B into one luma value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LumaWeights {
    /// ITU-R BT.601: `0.299 R + 0.587 G + 0.114 B`.
    #[default]
    Bt601,
    /// `0.3 R + 0.59 G + 0.11 B`, the rounded weighting some older editors
    /// shipped. Only used when asked for explicitly.
    Legacy,
}

impl LumaWeights {
    pub fn coefficients(self) -> [f64; 3] {
        match self {
            Self::Bt601 => [0.299, 0.587, 0.114],
            Self::Legacy => [0.3, 0.59, 0.11],
        }
    }

    /// Weighted sum, not truncated.
    #[inline]
    pub fn luma(self, r: f64, g: f64, b: f64) -> f64 {
        let [wr, wg, wb] = self.coefficients();
        wr * r + wg * g + wb * b
    }
}

const FOREGROUND: u8 = 0;
const BACKGROUND: u8 = 255;

/// Scale a sample from `0..=max` to `0..=255`. A zero max scales by 1.
#[inline]
fn to_byte(sample: u16, max: u16) -> u8 {
    if max == 0 {
        return sample.min(255) as u8;
    }
    (u32::from(sample) * 255 / u32::from(max)).min(255) as u8
}

/// Expand any raster image to an RGBA8 buffer.
pub fn to_pixel_buffer(image: &RasterImage) -> PixelBuffer {
    let (w, h) = (image.width(), image.height());
    let data = match image {
        RasterImage::Bit(img) => img
            .pixels()
            .iter()
            .flat_map(|&fg| {
                let v = if fg { FOREGROUND } else { BACKGROUND };
                [v, v, v, 255]
            })
            .collect(),
        RasterImage::Gray(img) => gray_to_rgba(img),
        RasterImage::Rgb(img) => rgb_to_rgba(img),
    };
    PixelBuffer::from_raw(w, h, data)
}

fn gray_to_rgba(img: &GrayImage) -> Vec<u8> {
    let max = img.max_value();
    #[cfg(feature = "simd")]
    if max == 255 {
        let gray: Vec<u8> = img.samples().iter().map(|&s| s as u8).collect();
        let mut out = vec![0u8; gray.len() * 4];
        if garb::bytes::gray_to_rgba(&gray, &mut out).is_ok() {
            return out;
        }
    }
    img.samples()
        .iter()
        .flat_map(|&s| {
            let v = to_byte(s, max);
            [v, v, v, 255]
        })
        .collect()
}

fn rgb_to_rgba(img: &RgbImage) -> Vec<u8> {
    let max = img.max_value();
    #[cfg(feature = "simd")]
    if max == 255 {
        let rgb: Vec<u8> = img.samples().iter().map(|&s| s as u8).collect();
        let mut out = vec![0u8; rgb.len() / 3 * 4];
        if garb::bytes::rgb_to_rgba(&rgb, &mut out).is_ok() {
            return out;
        }
    }
    img.samples()
        .chunks_exact(3)
        .flat_map(|px| {
            let [r, g, b] = [px[0], px[1], px[2]].map(|s| to_byte(s, max));
            [r, g, b, 255]
        })
        .collect()
}

/// Collapse an RGBA8 buffer into a raster image of `kind` with max value 255.
///
/// Alpha is dropped. Gray uses truncated BT.601 luma. 1-bit thresholds that
/// same truncated gray at 127.5, so it agrees with going through
/// [`RasterKind::Gray`] and then [`RasterImage::convert`].
pub fn from_pixel_buffer(buffer: &PixelBuffer, kind: RasterKind) -> RasterImage {
    let (w, h) = (buffer.width(), buffer.height());
    let weights = LumaWeights::Bt601;
    let gray = |px: &rgb::RGBA8| {
        let luma = weights.luma(f64::from(px.r), f64::from(px.g), f64::from(px.b));
        (luma as u16).min(255)
    };

    match kind {
        RasterKind::Bit => {
            let pixels = buffer
                .pixels()
                .iter()
                .map(|px| f64::from(gray(px)) < 127.5)
                .collect();
            BitImage::from_raw(w, h, pixels).into()
        }
        RasterKind::Gray => {
            let samples = buffer.pixels().iter().map(gray).collect();
            GrayImage::from_raw(w, h, 255, samples).into()
        }
        RasterKind::Rgb => {
            let samples = buffer
                .pixels()
                .iter()
                .flat_map(|px| [u16::from(px.r), u16::from(px.g), u16::from(px.b)])
                .collect();
            RgbImage::from_raw(w, h, 255, samples).into()
        }
    }
}

impl RasterImage {
    /// Convert to another raster kind using BT.601 luma.
    pub fn convert(&self, kind: RasterKind) -> RasterImage {
        self.convert_with(kind, LumaWeights::Bt601)
    }

    /// Convert to another raster kind.
    ///
    /// - 1-bit → gray/RGB: foreground 0, background 255, max value 255.
    /// - gray/RGB → 1-bit: foreground when (luma of) the sample is below
    ///   `max_value / 2`; ties go to background.
    /// - RGB → gray: truncated luma, max value kept.
    /// - gray → RGB: sample replicated into R, G, B, max value kept.
    pub fn convert_with(&self, kind: RasterKind, weights: LumaWeights) -> RasterImage {
        let (w, h) = (self.width(), self.height());
        match (self, kind) {
            (_, k) if k == self.kind() => self.clone(),

            (RasterImage::Bit(img), RasterKind::Gray) => {
                let samples = img.pixels().iter().map(|&fg| bit_sample(fg)).collect();
                GrayImage::from_raw(w, h, 255, samples).into()
            }
            (RasterImage::Bit(img), _) => {
                let samples = img
                    .pixels()
                    .iter()
                    .flat_map(|&fg| [bit_sample(fg); 3])
                    .collect();
                RgbImage::from_raw(w, h, 255, samples).into()
            }

            (RasterImage::Gray(img), RasterKind::Bit) => {
                let half = f64::from(img.max_value()) / 2.0;
                let pixels = img.samples().iter().map(|&s| f64::from(s) < half).collect();
                BitImage::from_raw(w, h, pixels).into()
            }
            (RasterImage::Gray(img), _) => {
                let samples = img.samples().iter().flat_map(|&s| [s; 3]).collect();
                RgbImage::from_raw(w, h, img.max_value(), samples).into()
            }

            (RasterImage::Rgb(img), RasterKind::Bit) => {
                let half = f64::from(img.max_value()) / 2.0;
                let pixels = img
                    .samples()
                    .chunks_exact(3)
                    .map(|px| rgb_luma(px, weights) < half)
                    .collect();
                BitImage::from_raw(w, h, pixels).into()
            }
            (RasterImage::Rgb(img), _) => {
                let max = img.max_value();
                let samples = img
                    .samples()
                    .chunks_exact(3)
                    .map(|px| (rgb_luma(px, weights) as u16).min(max))
                    .collect();
                GrayImage::from_raw(w, h, max, samples).into()
            }
        }
    }
}

#[inline]
fn bit_sample(foreground: bool) -> u16 {
    if foreground { 0 } else { 255 }
}

#[inline]
fn rgb_luma(px: &[u16], weights: LumaWeights) -> f64 {
    weights.luma(f64::from(px[0]), f64::from(px[1]), f64::from(px[2]))
}
