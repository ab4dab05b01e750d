//! Filters over the RGBA8 [`PixelBuffer`](crate::PixelBuffer).
//!
//! Every filter borrows its input and returns a new buffer of the same
//! dimensions. Results are clamped to 0–255 and alpha passes through.

mod arith;
mod kernel;

pub use arith::{add, brightness, divide, grayscale, multiply, subtract};
pub use kernel::{gaussian_blur, high_pass, median, sobel};

/// How [`grayscale`] collapses R, G, B into one value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrayscaleMethod {
    /// `(r + g + b) / 3`.
    #[default]
    Average,
    RedChannel,
    GreenChannel,
    BlueChannel,
    /// `(r + g) / 2`.
    AverageRG,
    MaxValue,
    MinValue,
}

impl GrayscaleMethod {
    pub fn reduce(self, r: u8, g: u8, b: u8) -> u8 {
        let (r16, g16, b16) = (u16::from(r), u16::from(g), u16::from(b));
        match self {
            Self::Average => ((r16 + g16 + b16) / 3) as u8,
            Self::RedChannel => r,
            Self::GreenChannel => g,
            Self::BlueChannel => b,
            Self::AverageRG => ((r16 + g16) / 2) as u8,
            Self::MaxValue => r.max(g).max(b),
            Self::MinValue => r.min(g).min(b),
        }
    }
}
