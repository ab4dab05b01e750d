//! Netpbm family: P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM).
//!
//! Each kind has a binary and an ASCII ("plain") encoding. Binary samples
//! are one byte when the max value is below 256 and two bytes big-endian
//! otherwise; binary PBM packs eight pixels per byte, MSB first, with a
//! 0 bit meaning foreground.

pub(crate) mod decode;
pub(crate) mod encode;
pub mod tokens;

use crate::error::RasterError;
use crate::raster::RasterKind;

/// Payload encoding of a Netpbm file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Raw bytes (`P4`, `P5`, `P6`).
    Binary,
    /// Decimal tokens (`P1`, `P2`, `P3`).
    Ascii,
}

impl Encoding {
    /// `true` selects [`Encoding::Binary`].
    pub fn from_binary_flag(is_binary: bool) -> Self {
        if is_binary { Self::Binary } else { Self::Ascii }
    }
}

/// A concrete Netpbm sub-format: raster kind plus encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PnmFormat {
    pub kind: RasterKind,
    pub encoding: Encoding,
}

impl PnmFormat {
    pub const fn new(kind: RasterKind, encoding: Encoding) -> Self {
        Self { kind, encoding }
    }

    /// The two-byte magic token for this format.
    pub fn magic(self) -> &'static str {
        match (self.kind, self.encoding) {
            (RasterKind::Bit, Encoding::Ascii) => "P1",
            (RasterKind::Gray, Encoding::Ascii) => "P2",
            (RasterKind::Rgb, Encoding::Ascii) => "P3",
            (RasterKind::Bit, Encoding::Binary) => "P4",
            (RasterKind::Gray, Encoding::Binary) => "P5",
            (RasterKind::Rgb, Encoding::Binary) => "P6",
        }
    }

    /// Identify a format from its magic token.
    pub fn from_magic(magic: &[u8]) -> Result<Self, RasterError> {
        let (kind, encoding) = match magic {
            b"P1" => (RasterKind::Bit, Encoding::Ascii),
            b"P2" => (RasterKind::Gray, Encoding::Ascii),
            b"P3" => (RasterKind::Rgb, Encoding::Ascii),
            b"P4" => (RasterKind::Bit, Encoding::Binary),
            b"P5" => (RasterKind::Gray, Encoding::Binary),
            b"P6" => (RasterKind::Rgb, Encoding::Binary),
            other => {
                return Err(RasterError::Format(format!(
                    "unrecognized magic number {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };
        Ok(Self { kind, encoding })
    }

    /// Bytes per sample in the binary encoding for a given max value.
    pub(crate) fn sample_width(max_value: u16) -> usize {
        if max_value < 256 { 1 } else { 2 }
    }
}

/// Header fields, available without decoding the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    /// `None` for PBM.
    pub max_value: Option<u16>,
}

impl ImageInfo {
    /// Parse only the header of a Netpbm file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RasterError> {
        let header = decode::parse_header(data)?;
        Ok(header.info())
    }
}
