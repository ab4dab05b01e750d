use enough::Stop;

use crate::error::RasterError;
use crate::pnm::Encoding;
use crate::pnm::encode::encode_pnm;
use crate::raster::{RasterImage, RasterKind};

/// Builder for encoding a [`RasterImage`] to Netpbm bytes.
///
/// By default the image is written in its own kind. [`EncodeRequest::as_kind`]
/// converts first, the way saving to a different extension does.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    encoding: Encoding,
    target: Option<RasterKind>,
}

impl EncodeRequest {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            target: None,
        }
    }

    pub fn binary() -> Self {
        Self::new(Encoding::Binary)
    }

    pub fn ascii() -> Self {
        Self::new(Encoding::Ascii)
    }

    /// Write as `kind`, converting when the image is another kind.
    pub fn as_kind(mut self, kind: RasterKind) -> Self {
        self.target = Some(kind);
        self
    }

    pub fn encode(self, image: &RasterImage, stop: impl Stop) -> Result<Vec<u8>, RasterError> {
        let converted;
        let image = match self.target {
            Some(kind) if kind != image.kind() => {
                converted = image.convert(kind);
                stop.check()?;
                &converted
            }
            _ => image,
        };
        stop.check()?;
        Ok(encode_pnm(image, self.encoding))
    }
}
