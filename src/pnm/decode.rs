//! Netpbm decoder: header parsing and payload decoding for P1–P6.

use super::tokens::{ByteTokens, StreamTokens, TokenSource, parse_number};
use super::{Encoding, ImageInfo, PnmFormat};
use crate::error::RasterError;
use crate::raster::{BitImage, GrayImage, RasterImage, RasterKind, RgbImage};

/// Parsed header (internal).
#[derive(Clone, Copy, Debug)]
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    /// 1 for PBM, which has no max value field.
    pub max_value: u16,
    /// Offset of the first payload byte.
    pub data_offset: usize,
}

impl PnmHeader {
    pub(crate) fn info(&self) -> ImageInfo {
        ImageInfo {
            format: self.format,
            width: self.width,
            height: self.height,
            max_value: self.format.kind.has_max_value().then_some(self.max_value),
        }
    }

    /// Number of samples (or bits) in the payload.
    pub(crate) fn sample_count(&self) -> Result<usize, RasterError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.format.kind.channels()))
            .ok_or(RasterError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Size of the decoded in-memory representation.
    pub(crate) fn decoded_bytes(&self) -> Result<usize, RasterError> {
        let count = self.sample_count()?;
        let per_sample = match self.format.kind {
            RasterKind::Bit => core::mem::size_of::<bool>(),
            RasterKind::Gray | RasterKind::Rgb => core::mem::size_of::<u16>(),
        };
        count.checked_mul(per_sample).ok_or(RasterError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        })
    }
}

pub(crate) fn parse_header(data: &[u8]) -> Result<PnmHeader, RasterError> {
    let mut tokens = ByteTokens::new(data);
    let format = PnmFormat::from_magic(tokens.next_token()?)?;

    let width = tokens.next_number("width")?;
    let height = tokens.next_number("height")?;
    if width == 0 || height == 0 {
        return Err(RasterError::Format(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }

    let max_value = if format.kind.has_max_value() {
        let max = tokens.next_number("max value")?;
        match u16::try_from(max) {
            Ok(m) if m >= 1 => m,
            _ => {
                return Err(RasterError::Format(format!(
                    "max value {max} outside 1..=65535"
                )));
            }
        }
    } else {
        1
    };

    Ok(PnmHeader {
        format,
        width,
        height,
        max_value,
        data_offset: tokens.position(),
    })
}

pub(crate) fn decode_payload(data: &[u8], header: &PnmHeader) -> Result<RasterImage, RasterError> {
    let payload = data
        .get(header.data_offset..)
        .ok_or(RasterError::UnexpectedEof)?;
    let count = header.sample_count()?;
    let (w, h) = (header.width, header.height);

    match header.format.kind {
        RasterKind::Bit => {
            let pixels = match header.format.encoding {
                Encoding::Binary => decode_bits_binary(payload, w as usize, h as usize)?,
                Encoding::Ascii => decode_bits_ascii(payload, count)?,
            };
            Ok(BitImage::from_raw(w, h, pixels).into())
        }
        RasterKind::Gray | RasterKind::Rgb => {
            let samples = match header.format.encoding {
                Encoding::Binary => decode_samples_binary(payload, count, header.max_value)?,
                Encoding::Ascii => decode_samples_ascii(payload, count, header.max_value)?,
            };
            if header.format.kind == RasterKind::Gray {
                Ok(GrayImage::from_raw(w, h, header.max_value, samples).into())
            } else {
                Ok(RgbImage::from_raw(w, h, header.max_value, samples).into())
            }
        }
    }
}

fn decode_bits_binary(payload: &[u8], w: usize, h: usize) -> Result<Vec<bool>, RasterError> {
    let row_bytes = w.div_ceil(8);
    let needed = row_bytes.checked_mul(h).ok_or(RasterError::UnexpectedEof)?;
    let packed = payload.get(..needed).ok_or(RasterError::UnexpectedEof)?;

    let mut pixels = Vec::with_capacity(w * h);
    for row in packed.chunks_exact(row_bytes) {
        for x in 0..w {
            let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
            pixels.push(bit == 0);
        }
    }
    Ok(pixels)
}

fn decode_bits_ascii(payload: &[u8], count: usize) -> Result<Vec<bool>, RasterError> {
    let mut tokens = StreamTokens::new(payload);
    // every token needs at least one byte
    let mut pixels = Vec::with_capacity(count.min(payload.len()));
    for i in 0..count {
        let foreground = match tokens.next_token()? {
            b"0" => true,
            b"1" => false,
            other => {
                return Err(RasterError::Format(format!(
                    "pixel {i}: expected 0 or 1, got {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };
        pixels.push(foreground);
    }
    Ok(pixels)
}

fn check_sample(index: usize, value: u32, max_value: u16) -> Result<u16, RasterError> {
    if value > u32::from(max_value) {
        return Err(RasterError::Format(format!(
            "sample {index} is {value}, above max value {max_value}"
        )));
    }
    Ok(value as u16)
}

fn decode_samples_binary(
    payload: &[u8],
    count: usize,
    max_value: u16,
) -> Result<Vec<u16>, RasterError> {
    let width = PnmFormat::sample_width(max_value);
    let needed = count.checked_mul(width).ok_or(RasterError::UnexpectedEof)?;
    let raw = payload.get(..needed).ok_or(RasterError::UnexpectedEof)?;

    let mut samples = Vec::with_capacity(count);
    if width == 1 {
        for (i, &b) in raw.iter().enumerate() {
            samples.push(check_sample(i, u32::from(b), max_value)?);
        }
    } else {
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            let v = u16::from_be_bytes([pair[0], pair[1]]);
            samples.push(check_sample(i, u32::from(v), max_value)?);
        }
    }
    Ok(samples)
}

fn decode_samples_ascii(
    payload: &[u8],
    count: usize,
    max_value: u16,
) -> Result<Vec<u16>, RasterError> {
    let mut tokens = StreamTokens::new(payload);
    let mut samples = Vec::with_capacity(count.min(payload.len()));
    for i in 0..count {
        let token = tokens.next_token()?;
        let value = parse_number(token).ok_or_else(|| {
            RasterError::Format(format!(
                "sample {i}: expected a non-negative integer, got {:?}",
                String::from_utf8_lossy(token)
            ))
        })?;
        samples.push(check_sample(i, value, max_value)?);
    }
    Ok(samples)
}
