use crate::error::RasterError;

/// Resource limits applied after a header is parsed and before any sample
/// buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded sample buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Only cap the pixel count.
    pub fn pixels(max_pixels: u64) -> Self {
        Self {
            max_pixels: Some(max_pixels),
            ..Self::default()
        }
    }

    /// Validate an image of `width`x`height` whose decoded representation
    /// needs `buffer_bytes` bytes.
    pub(crate) fn check_image(
        &self,
        width: u32,
        height: u32,
        buffer_bytes: usize,
    ) -> Result<(), RasterError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("buffer size", buffer_bytes as u64, self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit {
                if value > limit {
                    return Err(RasterError::LimitExceeded(format!(
                        "{what} {value} exceeds limit {limit}"
                    )));
                }
            }
        }
        Ok(())
    }
}
