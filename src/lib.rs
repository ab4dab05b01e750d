//! # zenraster
//!
//! Netpbm raster images (PBM, PGM, PPM in both plain and raw encodings),
//! an RGBA8 working buffer with pixel filters, and RGB/CMYK/HSV color
//! conversion.
//!
//! ## Formats
//!
//! - **P1 / P4**: 1-bit bitmaps
//! - **P2 / P5**: grayscale, 8-bit and 16-bit samples
//! - **P3 / P6**: RGB, 8-bit and 16-bit samples
//!
//! Files are picked by extension (`.pbm`, `.pgm`, `.ppm`); the magic number
//! must agree.
//!
//! ## Working with pixels
//!
//! A [`RasterImage`] keeps the samples exactly as stored. Filters run on a
//! [`PixelBuffer`] (RGBA8, samples rescaled to 0–255):
//!
//! ```no_run
//! use zenraster::filter::GrayscaleMethod;
//! use zenraster::{Pipeline, RasterKind, Stage, Unstoppable};
//!
//! let image = zenraster::load("photo.ppm")?;
//! let buffer = zenraster::to_pixel_buffer(&image);
//!
//! let edges = Pipeline::new()
//!     .with(Stage::GaussianBlur)
//!     .with(Stage::Grayscale(GrayscaleMethod::Average))
//!     .with(Stage::Sobel)
//!     .run(&buffer, Unstoppable)?;
//!
//! let out = zenraster::from_pixel_buffer(&edges, RasterKind::Gray);
//! zenraster::save(&out, "edges.pgm", true)?;
//! # Ok::<(), zenraster::RasterError>(())
//! ```
//!
//! ## Cancellation
//!
//! Long operations take an [`enough::Stop`] token. It is checked between
//! stages (header and payload, pipeline steps), never inside a pixel loop.

#![forbid(unsafe_code)]

mod convert;
mod decode;
mod encode;
mod error;
mod fs;
mod limits;
mod pipeline;
mod pixel;
mod raster;

pub mod color;
pub mod filter;
pub mod pnm;
pub mod surface;

pub use convert::{LumaWeights, from_pixel_buffer, to_pixel_buffer};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::RasterError;
pub use fs::{load, load_with, save};
pub use limits::Limits;
pub use pipeline::{Pipeline, Stage};
pub use pixel::PixelBuffer;
pub use pnm::{Encoding, ImageInfo, PnmFormat};
pub use raster::{BitImage, GrayImage, RasterImage, RasterKind, RgbImage};
