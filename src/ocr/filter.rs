use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::core::model::TextFragment;

const CURRENCY_SIGNS: &[char] = &['$', '€', '£', '¥', '円', '元'];

#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<TextFragment>,
    pub low_confidence: usize,
    pub malformed: usize,
    pub empty: usize,
}

impl FilterOutcome {
    pub fn dropped(&self) -> usize {
        self.low_confidence + self.malformed + self.empty
    }

    /// Mean confidence of the surviving fragments, zero when none survive.
    pub fn mean_confidence(&self) -> f32 {
        if self.kept.is_empty() {
            0.0
        } else {
            self.kept.iter().map(|f| f.confidence).sum::<f32>() / self.kept.len() as f32
        }
    }
}

/// First pipeline stage: drops unusable fragments and normalizes the rest.
#[derive(Debug, Clone)]
pub struct FragmentFilter {
    min_confidence: f32,
}

impl FragmentFilter {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    pub fn filter(&self, fragments: &[TextFragment]) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for fragment in fragments {
            if !fragment.confidence.is_finite() || fragment.confidence < self.min_confidence {
                outcome.low_confidence += 1;
                continue;
            }
            if !fragment.bbox.is_normalized() {
                warn!(text = %fragment.text, bbox = ?fragment.bbox, "dropping fragment with malformed geometry");
                outcome.malformed += 1;
                continue;
            }

            let text = normalize_text(&fragment.text);
            if !is_meaningful(&text) {
                outcome.empty += 1;
                continue;
            }

            outcome.kept.push(TextFragment {
                text,
                confidence: fragment.confidence.clamp(0.0, 1.0),
                bbox: fragment.bbox,
                alternates: fragment.alternates.clone(),
            });
        }

        debug!(
            kept = outcome.kept.len(),
            low_confidence = outcome.low_confidence,
            malformed = outcome.malformed,
            empty = outcome.empty,
            "filtered OCR fragments"
        );
        outcome
    }
}

/// NFKC normalization plus whitespace collapsing.
pub fn normalize_text(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_meaningful(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_alphanumeric() || CURRENCY_SIGNS.contains(&c))
}
