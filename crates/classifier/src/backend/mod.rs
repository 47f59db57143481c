use preprocess::PackedInput;

#[cfg(feature = "ort-backend")]
pub mod ort;

/// Black-box model runtime: one `u8` input tensor in, one `u8` score vector out.
pub trait InferenceBackend {
    fn load_model(path: &str) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run inference on a packed NHWC buffer and return the raw output untouched
    fn infer(&mut self, input: &PackedInput) -> anyhow::Result<InferenceOutput>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOutput {
    pub scores: Vec<u8>, // [num_classes] quantized scores
}
