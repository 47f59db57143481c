use crate::{
    backend::{InferenceBackend, InferenceOutput},
    errors::ClassifierError,
    labels::LabelTable,
    postprocessing::{Classification, select},
};
use common::span;
use preprocess::{ModelImage, PackedInput, RGB_CHANNELS, pack};
use std::time::Instant;

/// Single-image classification pipeline.
///
/// Holds the two resources loaded at startup, the label table and the model
/// handle, and reuses them read-only for every request.
pub struct Classifier<B: InferenceBackend> {
    backend: B,
    labels: LabelTable,
    input_size: (u32, u32),
}

impl<B: InferenceBackend> Classifier<B> {
    pub fn new(backend: B, labels: LabelTable, input_size: (u32, u32)) -> Self {
        Self {
            backend,
            labels,
            input_size,
        }
    }

    pub fn input_size(&self) -> (u32, u32) {
        self.input_size
    }

    /// Classify an image that is already at the model input size.
    ///
    /// Images of any other size are rejected; resize them with
    /// [`preprocess::ImageResizer`] first.
    pub fn classify(&mut self, image: &ModelImage) -> Result<Classification, ClassifierError> {
        let _s = span!("classify");

        if image.dimensions() != self.input_size {
            return Err(ClassifierError::InputSizeMismatch {
                expected: self.input_size,
                actual: image.dimensions(),
            });
        }

        let input = pack(image);

        let start = Instant::now();
        let scores = self.run(&input)?;
        let elapsed = start.elapsed();

        let result = select(&scores, self.labels.as_slice());

        tracing::debug!(
            index = ?result.index,
            label = %result.label,
            score = result.score,
            inference_ms = elapsed.as_secs_f64() * 1000.0,
            "Image classified"
        );

        Ok(result)
    }

    /// Invoke the model on a packed buffer and return its raw score vector.
    pub fn run(&mut self, input: &PackedInput) -> Result<Vec<u8>, ClassifierError> {
        let expected = self.input_size.0 as usize * self.input_size.1 as usize * RGB_CHANNELS;
        if input.byte_len() != expected {
            return Err(ClassifierError::InputBufferMismatch {
                expected,
                actual: input.byte_len(),
            });
        }

        let InferenceOutput { scores } = {
            let _infer_span = tracing::info_span!("model_inference").entered();
            self.backend
                .infer(input)
                .map_err(ClassifierError::Inference)?
        };

        if scores.len() != self.labels.len() {
            return Err(ClassifierError::OutputWidthMismatch {
                expected: self.labels.len(),
                actual: scores.len(),
            });
        }

        Ok(scores)
    }
}
