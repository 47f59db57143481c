use crate::errors::ClassifierError;
use std::fs;
use std::path::Path;

/// Class names in model output order: `labels[i]` names output channel `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Read one label per line, keeping file order.
    ///
    /// Blank lines are kept so indices stay aligned with the model output.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ClassifierError::LabelLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_lines(contents.lines());
        if table.is_empty() {
            return Err(ClassifierError::EmptyLabels(path.to_path_buf()));
        }

        tracing::info!(
            path = %path.display(),
            count = table.len(),
            "Loaded label table"
        );
        Ok(table)
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
