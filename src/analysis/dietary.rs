use std::collections::BTreeSet;

use crate::core::keywords::{contains_any, ALLERGEN_KEYWORDS, DIETARY_KEYWORDS};
use crate::core::model::DietaryTag;

/// Every dietary tag whose keywords appear in lowercase `text`.
pub fn dietary_tags(text: &str) -> BTreeSet<DietaryTag> {
    DIETARY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Every allergen group whose keywords appear in lowercase `text`.
pub fn allergens(text: &str) -> BTreeSet<String> {
    ALLERGEN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(group, _)| group.to_string())
        .collect()
}
