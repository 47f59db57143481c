use std::fmt;

/// Label reported when the winning index has no entry in the label table.
pub const UNKNOWN_LABEL: &str = "Unknown";

const MAX_SCORE: f32 = u8::MAX as f32;

/// Top-1 prediction for a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Arg-max of the score vector, `None` for an empty vector
    pub index: Option<usize>,
    pub label: String,
    /// Raw quantized score at `index`
    pub score: u8,
    /// `score * 100 / 255`, in `[0, 100]`
    pub confidence: f32,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            index: None,
            label: UNKNOWN_LABEL.to_string(),
            score: 0,
            confidence: 0.0,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prediction: {} ({:.2}%)", self.label, self.confidence)
    }
}

/// Index of the highest score; ties go to the lowest index.
pub fn argmax(scores: &[u8]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, max_score)) if score <= max_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Map a quantized score to a percentage.
#[inline]
pub fn confidence_percent(score: u8) -> f32 {
    score as f32 * 100.0 / MAX_SCORE
}

/// Pick the top-1 label from a quantized score vector.
///
/// Never fails: an empty vector or an index past the end of `labels`
/// yields [`UNKNOWN_LABEL`].
pub fn select<S: AsRef<str>>(scores: &[u8], labels: &[S]) -> Classification {
    let Some(index) = argmax(scores) else {
        tracing::debug!("Empty score vector");
        return Classification::unknown();
    };

    let score = scores[index];
    let label = match labels.get(index) {
        Some(label) => label.as_ref().to_string(),
        None => {
            tracing::warn!(
                index,
                num_labels = labels.len(),
                "Top-1 index has no label"
            );
            UNKNOWN_LABEL.to_string()
        }
    };

    Classification {
        index: Some(index),
        label,
        score,
        confidence: confidence_percent(score),
    }
}
