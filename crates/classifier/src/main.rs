use clap::Parser;
use classifier::{
    Classifier, ClassifierConfig, LabelTable, PreviewWriter, backend::ort::OrtBackend,
    classify_all, logging::setup_logging,
};
use preprocess::ImageResizer;
use std::io;
use std::path::PathBuf;

/// Classify photos with a quantized MobileNetV2 model.
///
/// Model, labels and runtime options come from the environment
/// (MODEL_PATH, LABELS_PATH, INPUT_WIDTH, INPUT_HEIGHT, INTRA_THREADS,
/// EXECUTION_PROVIDER, ENVIRONMENT, RUST_LOG).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Images to classify, one prediction per image
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Also write the resized model input of each image to this directory
    #[arg(long, value_name = "DIR")]
    save_resized: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ClassifierConfig::from_env()?;

    setup_logging(&config);

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    let labels = LabelTable::load(&config.labels_path)?;

    tracing::info!("Loading inference model");
    let backend = OrtBackend::from_config(&config)?;
    tracing::info!("Model loaded successfully");

    let mut classifier = Classifier::new(backend, labels, config.input_size);
    let mut resizer = ImageResizer::new(config.input_size);

    let mut previews = args.save_resized.map(PreviewWriter::create).transpose()?;

    let summary = classify_all(
        &mut classifier,
        &mut resizer,
        &args.images,
        previews.as_mut(),
        &mut io::stdout().lock(),
    )?;

    summary.ensure_success()
}
