use crate::config::RGB_CHANNELS;
use std::path::Path;

/// Decoded RGB image, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ModelImage {
    /// Wrap an RGB buffer, rejecting buffers that do not hold `width * height` pixels.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> anyhow::Result<Self> {
        let expected_size = width as usize * height as usize * RGB_CHANNELS;
        if pixels.len() != expected_size {
            anyhow::bail!(
                "Buffer size mismatch: expected {} bytes for {}x{} RGB, got {} bytes",
                expected_size,
                width,
                height,
                pixels.len()
            );
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Solid color image, mostly useful for tests and warmup runs.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * RGB_CHANNELS)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixels in row-major order as `[r, g, b]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .chunks_exact(RGB_CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * RGB_CHANNELS;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Write the image to disk; the format follows the file extension.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let buffer = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;
        buffer.save(path)?;
        tracing::debug!(path = %path.display(), "Saved image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_accepts_exact_size() {
        let image = ModelImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.pixel_count(), 2);
    }

    #[test]
    fn test_from_raw_rejects_size_mismatch() {
        let result = ModelImage::from_raw(10, 10, vec![0u8; 200]);

        assert!(result.is_err(), "Size mismatch should return error");
        assert!(
            result.unwrap_err().to_string().contains("mismatch"),
            "Error should mention mismatch"
        );
    }

    #[test]
    fn test_pixels_iterate_row_major() {
        let image = ModelImage::from_raw(
            2,
            2,
            vec![
                255, 0, 0, // (0, 0) red
                0, 255, 0, // (1, 0) green
                0, 0, 255, // (0, 1) blue
                9, 9, 9, // (1, 1)
            ],
        )
        .unwrap();

        let pixels: Vec<[u8; 3]> = image.pixels().collect();
        assert_eq!(
            pixels,
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]]
        );
        assert_eq!(image.get_pixel(0, 1), Some([0, 0, 255]));
        assert_eq!(image.get_pixel(2, 0), None);
    }

    #[test]
    fn test_filled() {
        let image = ModelImage::filled(3, 2, [10, 20, 30]);
        assert_eq!(image.as_raw().len(), 18);
        assert!(image.pixels().all(|px| px == [10, 20, 30]));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");

        ModelImage::filled(4, 4, [1, 2, 3]).save(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (4, 4));
        assert_eq!(reloaded.get_pixel(3, 3).0, [1, 2, 3]);
    }
}
