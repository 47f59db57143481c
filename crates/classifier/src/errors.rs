use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to load labels from {}: {source}", .path.display())]
    LabelLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Label file {} is empty", .0.display())]
    EmptyLabels(PathBuf),

    #[error("Input size mismatch: model expects {expected:?}, got {actual:?}")]
    InputSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Input buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
    InputBufferMismatch { expected: usize, actual: usize },

    #[error("Model output width {actual} does not match label count {expected}")]
    OutputWidthMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0:#}")]
    Inference(anyhow::Error),
}
