use std::env;
use std::str::FromStr;

pub use common::Environment;
use preprocess::DEFAULT_INPUT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionProvider {
    Cpu,
    Cuda,
}

impl FromStr for ExecutionProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(ExecutionProvider::Cpu),
            "cuda" => Ok(ExecutionProvider::Cuda),
            other => anyhow::bail!("Unknown execution provider '{}' (expected cpu or cuda)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub environment: Environment,
    pub model_path: String,
    pub labels_path: String,
    pub input_size: (u32, u32),
    pub intra_threads: usize,
    pub execution_provider: ExecutionProvider,
}

impl ClassifierConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();

        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "models/mobilenet_v2_1.0_224_quant.onnx".to_string());

        let labels_path = env::var("LABELS_PATH").unwrap_or_else(|_| "models/labels.txt".to_string());

        let input_width = env::var("INPUT_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_INPUT_SIZE.0);

        let input_height = env::var("INPUT_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_INPUT_SIZE.1);

        let intra_threads = env::var("INTRA_THREADS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(1);

        let execution_provider = match env::var("EXECUTION_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => ExecutionProvider::Cpu,
        };

        Ok(Self {
            environment,
            model_path,
            labels_path,
            input_size: (input_width, input_height),
            intra_threads,
            execution_provider,
        })
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            model_path: "/models/model.onnx".to_string(),
            labels_path: "/models/labels.txt".to_string(),
            input_size: (224, 224),
            intra_threads: 1,
            execution_provider: ExecutionProvider::Cpu,
        }
    }
}
