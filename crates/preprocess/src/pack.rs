use crate::config::RGB_CHANNELS;
use crate::frame::ModelImage;
use common::span_debug;
use ndarray::ArrayView4;

/// Raw `u8` input tensor in NHWC order with a batch of one.
///
/// Quantized models take the 0-255 channel values as-is, so there is no
/// normalization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedInput {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedInput {
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// `[1, height, width, 3]`
    pub fn shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, RGB_CHANNELS]
    }

    pub fn as_array(&self) -> anyhow::Result<ArrayView4<'_, u8>> {
        Ok(ArrayView4::from_shape(self.shape(), &self.bytes)?)
    }
}

/// Pack an image into the byte layout the quantized model was trained on:
/// pixels in row-major order, each as R, G, B.
///
/// The caller is responsible for resizing to the model input size first.
pub fn pack(image: &ModelImage) -> PackedInput {
    let _s = span_debug!("pack");

    let mut bytes = Vec::with_capacity(image.pixel_count() * RGB_CHANNELS);
    for [r, g, b] in image.pixels() {
        bytes.push(r);
        bytes.push(g);
        bytes.push(b);
    }

    PackedInput {
        width: image.width(),
        height: image.height(),
        bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INPUT_SIZE;

    #[test]
    fn test_pack_model_sized_image_length() {
        let (width, height) = DEFAULT_INPUT_SIZE;
        let image = ModelImage::filled(width, height, [128, 64, 32]);

        let packed = pack(&image);

        assert_eq!(packed.byte_len(), 150_528);
        assert_eq!(packed.shape(), [1, 224, 224, 3]);
    }

    #[test]
    fn test_pack_channel_order_is_rgb_row_major() {
        // 2x2 image where every channel value is distinct
        let raw: Vec<u8> = (0..12).collect();
        let image = ModelImage::from_raw(2, 2, raw.clone()).unwrap();

        let packed = pack(&image);

        assert_eq!(packed.as_slice(), raw.as_slice());
        for (i, chunk) in packed.as_slice().chunks_exact(3).enumerate() {
            let x = (i % 2) as u32;
            let y = (i / 2) as u32;
            assert_eq!(Some([chunk[0], chunk[1], chunk[2]]), image.get_pixel(x, y));
        }
    }

    #[test]
    fn test_pack_keeps_raw_byte_values() {
        let image = ModelImage::from_raw(1, 1, vec![0, 255, 7]).unwrap();
        assert_eq!(pack(&image).as_slice(), &[0, 255, 7]);
    }

    #[test]
    fn test_as_array_is_nhwc() {
        let image = ModelImage::from_raw(
            3,
            2,
            vec![
                1, 2, 3, 4, 5, 6, 7, 8, 9, //
                10, 11, 12, 13, 14, 15, 16, 17, 18,
            ],
        )
        .unwrap();
        let packed = pack(&image);

        let array = packed.as_array().unwrap();
        assert_eq!(array.shape(), &[1, 2, 3, 3]);
        // y = 1, x = 2, blue
        assert_eq!(array[[0, 1, 2, 2]], 18);
        // y = 0, x = 1, red
        assert_eq!(array[[0, 0, 1, 0]], 4);
    }
}
