use super::core::{F32Im, Im};
use image::ImageResult;
use std::path::Path;

fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

// Loading
// -----------------------------------------------------------------------------
impl Im<f32, 1> {
    /// Loads any image file as a luma raster with values scaled to `[0, 1]`.
    ///
    /// Colour images are converted to 16-bit luma first so 8 and 16 bit
    /// sources end up on the same scale.
    pub fn load_luma<P: AsRef<Path>>(path: P) -> ImageResult<F32Im> {
        let img = image::open(path)?.into_luma16();
        let w = img.width() as usize;
        let h = img.height() as usize;
        let raw = img.into_raw();

        if raw.len() != w * h {
            return Err(dim_mismatch_err());
        }

        let arr = raw.iter().map(|&v| v as f32 / u16::MAX as f32).collect();
        Ok(Self { w, h, s: w, arr })
    }
}
