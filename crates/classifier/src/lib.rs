pub mod backend;
pub mod config;
pub mod errors;
pub mod labels;
pub mod logging;
pub mod postprocessing;
pub mod runner;
pub mod service;

// Re-export commonly used types for convenience
pub use backend::{InferenceBackend, InferenceOutput};
pub use config::{ClassifierConfig, ExecutionProvider};
pub use errors::ClassifierError;
pub use labels::LabelTable;
pub use postprocessing::{Classification, UNKNOWN_LABEL, select};
pub use runner::{PreviewWriter, RunSummary, classify_all, classify_file};
pub use service::Classifier;
