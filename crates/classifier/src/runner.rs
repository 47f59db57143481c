use crate::{backend::InferenceBackend, postprocessing::Classification, service::Classifier};
use anyhow::Context;
use preprocess::{ImageResizer, ModelImage};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the resized model input of each image as `<stem>_<width>.png`.
///
/// Names are unique per run. When two sources share a stem (`a/cat.jpg`,
/// `b/cat.png`) the later preview gets a `_2`, `_3`, ... suffix instead of
/// overwriting the earlier one.
pub struct PreviewWriter {
    dir: PathBuf,
    used: HashSet<String>,
}

impl PreviewWriter {
    pub fn create(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(Self {
            dir,
            used: HashSet::new(),
        })
    }

    /// Reserve the preview path for `source`.
    pub fn next_path(&mut self, source: &Path, image: &ModelImage) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let base = format!("{}_{}", stem, image.width());

        let mut name = base.clone();
        let mut n = 1;
        while !self.used.insert(name.clone()) {
            n += 1;
            name = format!("{base}_{n}");
        }

        self.dir.join(format!("{name}.png"))
    }

    pub fn write(&mut self, source: &Path, image: &ModelImage) -> anyhow::Result<PathBuf> {
        let path = self.next_path(source, image);
        image.save(&path)?;
        tracing::debug!(source = %source.display(), preview = %path.display(), "Saved preview");
        Ok(path)
    }
}

/// Outcome of classifying a batch of independent image files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn ensure_success(&self) -> anyhow::Result<()> {
        if self.failed > 0 {
            anyhow::bail!(
                "{} of {} images could not be classified",
                self.failed,
                self.total
            );
        }
        Ok(())
    }
}

/// Decode, resize, optionally preview, and classify one image file.
pub fn classify_file<B: InferenceBackend>(
    classifier: &mut Classifier<B>,
    resizer: &mut ImageResizer,
    path: &Path,
    previews: Option<&mut PreviewWriter>,
) -> anyhow::Result<Classification> {
    let image = resizer.load(path)?;

    if let Some(previews) = previews {
        previews.write(path, &image)?;
    }

    Ok(classifier.classify(&image)?)
}

/// Classify each path as a separate request and print one line per success.
///
/// A failed image is logged and skipped; the rest still run. Lines carry the
/// path prefix only when more than one image is given.
pub fn classify_all<B: InferenceBackend, W: Write>(
    classifier: &mut Classifier<B>,
    resizer: &mut ImageResizer,
    paths: &[PathBuf],
    mut previews: Option<&mut PreviewWriter>,
    out: &mut W,
) -> anyhow::Result<RunSummary> {
    let show_path = paths.len() > 1;
    let mut failed = 0usize;

    for path in paths {
        match classify_file(classifier, resizer, path, previews.as_deref_mut()) {
            Ok(result) if show_path => writeln!(out, "{}: {}", path.display(), result)?,
            Ok(result) => writeln!(out, "{}", result)?,
            Err(e) => {
                failed += 1;
                tracing::error!(
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "Failed to classify image"
                );
            }
        }
    }

    Ok(RunSummary {
        total: paths.len(),
        failed,
    })
}
