use rgb::AsPixels as _;
use rgb::RGBA8;

use crate::error::RasterError;

/// The RGBA8 working surface every filter operates on.
///
/// Row-major, four bytes per pixel in the order (value0, value1, value2,
/// alpha). The length always equals `width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 4;

    /// Wrap raw RGBA bytes.
    ///
    /// Fails with [`RasterError::InvalidArgument`] for zero dimensions or a
    /// length other than `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::InvalidArgument(format!(
                "pixel buffer for {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, RasterError> {
        let len = Self::byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from typed pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[RGBA8]) -> Result<Self, RasterError> {
        let data = pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
        Self::new(width, height, data)
    }

    fn byte_len(width: u32, height: u32) -> Result<usize, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidArgument(format!(
                "pixel buffer dimensions must be non-zero, got {width}x{height}"
            )));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(Self::CHANNELS))
            .ok_or(RasterError::DimensionsTooLarge { width, height })
    }

    /// Assemble without validation; callers guarantee the length.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * Self::CHANNELS
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Reinterpret as typed pixels.
    pub fn pixels(&self) -> &[RGBA8] {
        self.data.as_pixels()
    }

    pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
        self.data.as_pixels_mut()
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels()
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row `y` as RGBA bytes.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * Self::CHANNELS;
        self.data.chunks_exact(stride).nth(y as usize)
    }

    /// Byte offset of pixel (`x`, `y`).
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * Self::CHANNELS
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGBA8> {
        imgref::ImgRef::new(self.pixels(), self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGBA8> {
        imgref::ImgVec::new(
            self.pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
