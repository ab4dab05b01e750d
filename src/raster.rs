//! Raster images as stored by the Netpbm family.
//!
//! [`RasterImage`] is a sum type over the three storage kinds. Every
//! constructor validates its invariants, so a value that exists is always
//! consistent: non-zero dimensions, a sample count matching
//! `width * height * channels`, a `max_value` of at least 1, and no sample
//! above it.

use core::fmt;
use core::str::FromStr;

use crate::error::RasterError;

/// Which of the three raster representations an image uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RasterKind {
    /// One bit per pixel (PBM, `P1`/`P4`).
    Bit,
    /// One integer sample per pixel (PGM, `P2`/`P5`).
    Gray,
    /// Three integer samples per pixel, R,G,B (PPM, `P3`/`P6`).
    Rgb,
}

impl RasterKind {
    /// Number of samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Bit | Self::Gray => 1,
            Self::Rgb => 3,
        }
    }

    /// Canonical lowercase file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bit => "pbm",
            Self::Gray => "pgm",
            Self::Rgb => "ppm",
        }
    }

    /// Map a file extension (without the dot, any case) to a kind.
    pub fn from_extension(ext: &str) -> Result<Self, RasterError> {
        match ext.to_ascii_lowercase().as_str() {
            "pbm" => Ok(Self::Bit),
            "pgm" => Ok(Self::Gray),
            "ppm" => Ok(Self::Rgb),
            _ => Err(RasterError::UnsupportedFormat(format!(
                "unrecognized extension {ext:?}"
            ))),
        }
    }

    /// Whether this kind carries a max value in its header.
    pub fn has_max_value(self) -> bool {
        !matches!(self, Self::Bit)
    }
}

impl fmt::Display for RasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bit => "bit",
            Self::Gray => "gray",
            Self::Rgb => "rgb",
        })
    }
}

impl FromStr for RasterKind {
    type Err = RasterError;

    /// Accepts `bit`/`pbm`, `gray`/`pgm`, `rgb`/`ppm` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bit" | "pbm" => Ok(Self::Bit),
            "gray" | "pgm" => Ok(Self::Gray),
            "rgb" | "ppm" => Ok(Self::Rgb),
            _ => Err(RasterError::UnsupportedConversion(format!(
                "unknown raster kind {s:?}"
            ))),
        }
    }
}

fn check_dimensions(
    width: u32,
    height: u32,
    channels: usize,
    len: usize,
) -> Result<(), RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidArgument(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(channels))
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    if len != expected {
        return Err(RasterError::InvalidArgument(format!(
            "expected {expected} samples for {width}x{height}x{channels}, got {len}"
        )));
    }
    Ok(())
}

fn check_samples(samples: &[u16], max_value: u16) -> Result<(), RasterError> {
    if max_value == 0 {
        return Err(RasterError::InvalidArgument(
            "max value must be at least 1".into(),
        ));
    }
    if let Some(pos) = samples.iter().position(|&s| s > max_value) {
        return Err(RasterError::InvalidArgument(format!(
            "sample {} at index {pos} exceeds max value {max_value}",
            samples[pos]
        )));
    }
    Ok(())
}

/// 1-bit image. `true` is foreground (black), `false` background (white).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitImage {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BitImage {
    /// Build from row-major pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self, RasterError> {
        check_dimensions(width, height, 1, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn into_pixels(self) -> Vec<bool> {
        self.pixels
    }

    /// Assemble without validation; callers guarantee the invariants.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<bool>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Single-channel image with integer samples in `0..=max_value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    max_value: u16,
    samples: Vec<u16>,
}

impl GrayImage {
    /// Assemble without validation; callers guarantee the invariants.
    pub(crate) fn from_raw(width: u32, height: u32, max_value: u16, samples: Vec<u16>) -> Self {
        debug_assert_eq!(samples.len(), width as usize * height as usize);
        debug_assert!(samples.iter().all(|&s| s <= max_value));
        Self {
            width,
            height,
            max_value,
            samples,
        }
    }

    pub fn new(
        width: u32,
        height: u32,
        max_value: u16,
        samples: Vec<u16>,
    ) -> Result<Self, RasterError> {
        check_dimensions(width, height, 1, samples.len())?;
        check_samples(&samples, max_value)?;
        Ok(Self {
            width,
            height,
            max_value,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }
}

/// Three-channel image, samples interleaved R,G,B per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    max_value: u16,
    samples: Vec<u16>,
}

impl RgbImage {
    /// Assemble without validation; callers guarantee the invariants.
    pub(crate) fn from_raw(width: u32, height: u32, max_value: u16, samples: Vec<u16>) -> Self {
        debug_assert_eq!(samples.len(), width as usize * height as usize * 3);
        debug_assert!(samples.iter().all(|&s| s <= max_value));
        Self {
            width,
            height,
            max_value,
            samples,
        }
    }

    pub fn new(
        width: u32,
        height: u32,
        max_value: u16,
        samples: Vec<u16>,
    ) -> Result<Self, RasterError> {
        check_dimensions(width, height, 3, samples.len())?;
        check_samples(&samples, max_value)?;
        Ok(Self {
            width,
            height,
            max_value,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Interleaved R,G,B samples, row-major.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// `[r, g, b]` at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<[u16; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.samples.get(off..off + 3)?;
        Some([px[0], px[1], px[2]])
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }
}

/// A decoded (or constructed) raster image of any of the three kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterImage {
    Bit(BitImage),
    Gray(GrayImage),
    Rgb(RgbImage),
}

impl RasterImage {
    pub fn kind(&self) -> RasterKind {
        match self {
            Self::Bit(_) => RasterKind::Bit,
            Self::Gray(_) => RasterKind::Gray,
            Self::Rgb(_) => RasterKind::Rgb,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Bit(img) => img.width,
            Self::Gray(img) => img.width,
            Self::Rgb(img) => img.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Bit(img) => img.height,
            Self::Gray(img) => img.height,
            Self::Rgb(img) => img.height,
        }
    }

    /// Sample ceiling; `None` for 1-bit images.
    pub fn max_value(&self) -> Option<u16> {
        match self {
            Self::Bit(_) => None,
            Self::Gray(img) => Some(img.max_value),
            Self::Rgb(img) => Some(img.max_value),
        }
    }
}

impl From<BitImage> for RasterImage {
    fn from(img: BitImage) -> Self {
        Self::Bit(img)
    }
}

impl From<GrayImage> for RasterImage {
    fn from(img: GrayImage) -> Self {
        Self::Gray(img)
    }
}

impl From<RgbImage> for RasterImage {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}
