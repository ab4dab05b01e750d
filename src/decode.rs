use enough::Stop;

use crate::error::RasterError;
use crate::limits::Limits;
use crate::pnm::decode::{decode_payload, parse_header};
use crate::raster::{RasterImage, RasterKind};

/// Builder for decoding a Netpbm file held in memory.
///
/// ```
/// use zenraster::{DecodeRequest, RasterKind, Unstoppable};
///
/// let img = DecodeRequest::new(b"P2\n2 1\n9\n0 9\n")
///     .expect_kind(RasterKind::Gray)
///     .decode(Unstoppable)?;
/// assert_eq!(img.max_value(), Some(9));
/// # Ok::<(), zenraster::RasterError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    expected: Option<RasterKind>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            expected: None,
        }
    }

    /// Reject images exceeding `limits` before allocating sample storage.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Require the magic number to belong to `kind`'s family.
    pub fn expect_kind(mut self, kind: RasterKind) -> Self {
        self.expected = Some(kind);
        self
    }

    /// Parse the header, then decode the payload.
    ///
    /// `stop` is consulted once, between the two stages.
    pub fn decode(self, stop: impl Stop) -> Result<RasterImage, RasterError> {
        let header = parse_header(self.data)?;

        if let Some(expected) = self.expected {
            if header.format.kind != expected {
                return Err(RasterError::Format(format!(
                    "expected a {expected} image, found magic {}",
                    header.format.magic()
                )));
            }
        }
        if let Some(limits) = self.limits {
            limits.check_image(header.width, header.height, header.decoded_bytes()?)?;
        }

        stop.check()?;

        decode_payload(self.data, &header)
    }
}
