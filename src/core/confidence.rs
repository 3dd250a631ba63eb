use crate::core::model::{DishCandidate, DishCategory};

/// Signals that adjust a candidate's group confidence.
#[derive(Debug, Clone, Copy)]
pub struct DishSignals {
    pub group_confidence: f32,
    pub has_price: bool,
    pub description_chars: usize,
    /// A category other than the `MainCourse` fallback was assigned.
    pub non_default_category: bool,
    pub name_chars: usize,
    pub name_all_uppercase: bool,
}

impl DishSignals {
    pub fn from_candidate(candidate: &DishCandidate) -> Self {
        let name = candidate.name.as_str();
        let has_letters = name.chars().any(|c| c.is_alphabetic());
        Self {
            group_confidence: candidate.group_confidence,
            has_price: candidate.price.is_some(),
            description_chars: candidate
                .description
                .as_deref()
                .map(|d| d.chars().count())
                .unwrap_or(0),
            non_default_category: matches!(candidate.category, Some(c) if c != DishCategory::MainCourse),
            name_chars: name.chars().count(),
            name_all_uppercase: has_letters && !name.chars().any(|c| c.is_lowercase()),
        }
    }
}

pub fn score_dish_confidence(signals: DishSignals) -> f32 {
    let mut score = signals.group_confidence;

    if signals.has_price {
        score += 0.2;
    }
    if signals.description_chars > 10 {
        score += 0.1;
    }
    if signals.non_default_category {
        score += 0.1;
    }

    if signals.name_chars < 5 {
        score -= 0.2;
    }
    if signals.name_all_uppercase {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}
