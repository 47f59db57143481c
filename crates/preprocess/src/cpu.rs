use crate::config::{DEFAULT_INPUT_SIZE, RGB_CHANNELS};
use crate::frame::ModelImage;
use common::span;
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use std::path::Path;

/// Stretches arbitrary RGB images to the model input size.
///
/// The aspect ratio is not preserved and no letterbox border is added.
pub struct ImageResizer {
    pub input_size: (u32, u32),
    resizer: Resizer,
    options: ResizeOptions,
}

impl ImageResizer {
    pub fn new(input_size: (u32, u32)) -> Self {
        Self {
            input_size,
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
        }
    }

    /// Decode an image file and resize it to the model input size.
    ///
    /// Alpha is dropped; grayscale and palette images are expanded to RGB.
    pub fn load(&mut self, path: &Path) -> anyhow::Result<ModelImage> {
        let _s = span!("load_image");

        let decoded = image::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to decode {}: {}", path.display(), e))?
            .to_rgb8();
        let (width, height) = decoded.dimensions();

        tracing::debug!(
            path = %path.display(),
            width,
            height,
            "Decoded image"
        );

        self.resize(decoded.as_raw(), width, height)
    }

    pub fn resize(&mut self, pixels: &[u8], width: u32, height: u32) -> anyhow::Result<ModelImage> {
        let _s = span!("resize");

        let expected_size = width as usize * height as usize * RGB_CHANNELS;
        if pixels.len() != expected_size {
            anyhow::bail!(
                "Buffer size mismatch: expected {}, got {} bytes",
                expected_size,
                pixels.len()
            );
        }
        if width == 0 || height == 0 {
            anyhow::bail!("Cannot resize an empty {}x{} image", width, height);
        }

        let (target_width, target_height) = self.input_size;
        if target_width == 0 || target_height == 0 {
            anyhow::bail!(
                "Invalid target size {}x{}",
                target_width,
                target_height
            );
        }
        if (width, height) == self.input_size {
            return ModelImage::from_raw(width, height, pixels.to_vec());
        }

        let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;
        let mut resized = Image::new(target_width, target_height, PixelType::U8x3);

        self.resizer.resize(&src, &mut resized, &self.options)?;

        ModelImage::from_raw(target_width, target_height, resized.buffer().to_vec())
    }
}

impl Default for ImageResizer {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}
