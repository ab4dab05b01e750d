use enough::Stop;

use crate::error::RasterError;
use crate::filter::{self, GrayscaleMethod};
use crate::pixel::PixelBuffer;

/// One filter step with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    Add([i32; 3]),
    Subtract([i32; 3]),
    Multiply([f64; 3]),
    Divide([f64; 3]),
    Brightness(i32),
    Grayscale(GrayscaleMethod),
    Median,
    Sobel,
    HighPass,
    GaussianBlur,
}

impl Stage {
    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        match *self {
            Stage::Add(v) => filter::add(buffer, v),
            Stage::Subtract(v) => filter::subtract(buffer, v),
            Stage::Multiply(f) => filter::multiply(buffer, f),
            Stage::Divide(f) => filter::divide(buffer, f),
            Stage::Brightness(d) => filter::brightness(buffer, d),
            Stage::Grayscale(m) => filter::grayscale(buffer, m),
            Stage::Median => filter::median(buffer),
            Stage::Sobel => filter::sobel(buffer),
            Stage::HighPass => filter::high_pass(buffer),
            Stage::GaussianBlur => filter::gaussian_blur(buffer),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Add(_) => "add",
            Stage::Subtract(_) => "subtract",
            Stage::Multiply(_) => "multiply",
            Stage::Divide(_) => "divide",
            Stage::Brightness(_) => "brightness",
            Stage::Grayscale(_) => "grayscale",
            Stage::Median => "median",
            Stage::Sobel => "sobel",
            Stage::HighPass => "high_pass",
            Stage::GaussianBlur => "gaussian_blur",
        }
    }
}

/// An ordered list of [`Stage`]s.
///
/// ```
/// use zenraster::{Pipeline, PixelBuffer, Stage, Unstoppable};
///
/// let src = PixelBuffer::filled(4, 4, [10, 20, 30, 255])?;
/// let out = Pipeline::new()
///     .with(Stage::Brightness(100))
///     .with(Stage::Median)
///     .run(&src, Unstoppable)?;
/// assert_eq!(out.get(0, 0).map(|p| p.r), Some(110));
/// # Ok::<(), zenraster::RasterError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Apply every stage in order.
    ///
    /// `stop` is checked before each stage; a running stage always finishes.
    /// An empty pipeline returns a copy of `input`.
    pub fn run(&self, input: &PixelBuffer, stop: impl Stop) -> Result<PixelBuffer, RasterError> {
        let mut current = input.clone();
        for (i, stage) in self.stages.iter().enumerate() {
            stop.check()?;
            log::debug!(
                "stage {}/{}: {} on {}x{}",
                i + 1,
                self.stages.len(),
                stage.name(),
                current.width(),
                current.height()
            );
            current = stage.apply(&current);
        }
        Ok(current)
    }
}

impl FromIterator<Stage> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}
