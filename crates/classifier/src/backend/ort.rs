use super::{InferenceBackend, InferenceOutput};
use crate::config::{ClassifierConfig, ExecutionProvider};
use memmap2::Mmap;
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};
use preprocess::PackedInput;
use std::fs::File;

pub struct OrtBackend {
    session: Session,
}

impl OrtBackend {
    pub fn from_config(config: &ClassifierConfig) -> anyhow::Result<Self> {
        Self::load_model_with_options(
            &config.model_path,
            config.execution_provider,
            config.intra_threads,
        )
    }

    /// Load model with specified execution provider
    ///
    /// The artifact is memory-mapped and handed to ONNX Runtime as-is.
    pub fn load_model_with_options(
        path: &str,
        provider: ExecutionProvider,
        intra_threads: usize,
    ) -> anyhow::Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open model {}: {}", path, e))?;

        // SAFETY: the mapping is read-only and only lives until the session is built.
        let model = unsafe { Mmap::map(&file)? };
        tracing::debug!(
            model_mb = model.len() as f64 / (1024.0 * 1024.0),
            "Mapped model artifact"
        );

        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(intra_threads)?;

        let mut builder = match provider {
            #[cfg(feature = "cuda")]
            ExecutionProvider::Cuda => {
                tracing::info!("Initializing ONNX Runtime with CUDA execution provider");
                builder.with_execution_providers([
                    ort::execution_providers::CUDAExecutionProvider::default()
                        .with_device_id(0)
                        .build()
                        .error_on_failure(),
                ])?
            }
            #[cfg(not(feature = "cuda"))]
            ExecutionProvider::Cuda => {
                anyhow::bail!("CUDA execution provider requested but the 'cuda' feature is disabled");
            }
            ExecutionProvider::Cpu => {
                tracing::info!(intra_threads, "Initializing ONNX Runtime with CPU execution provider");
                builder
            }
        };

        let session = builder.commit_from_memory(&model)?;

        tracing::info!("Model loaded from {}", path);
        Ok(Self { session })
    }
}

impl InferenceBackend for OrtBackend {
    fn load_model(path: &str) -> anyhow::Result<Self> {
        Self::load_model_with_options(path, ExecutionProvider::Cpu, 1)
    }

    fn infer(&mut self, input: &PackedInput) -> anyhow::Result<InferenceOutput> {
        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(input.as_array()?)?])?;

        let scores = outputs[0].try_extract_array::<u8>()?;

        Ok(InferenceOutput {
            scores: scores.iter().copied().collect(),
        })
    }
}
