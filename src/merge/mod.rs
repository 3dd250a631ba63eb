//! Collapses near-duplicate dishes, such as OCR double reads.

pub mod compare;
pub mod resolve;

use tracing::debug;

use crate::core::model::Dish;

pub use compare::name_similarity;
pub use resolve::merge_pair;

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub dishes: Vec<Dish>,
    pub merged: usize,
}

/// Folds each dish, in input order, into the first kept dish whose name is
/// more similar than `threshold`; otherwise keeps it as a new record.
///
/// Only direct matches merge: A~B and B~C with A≁C can leave two records.
pub fn merge_similar(dishes: Vec<Dish>, threshold: f32) -> MergeOutcome {
    let mut kept: Vec<Dish> = Vec::with_capacity(dishes.len());
    let mut merged = 0;

    for dish in dishes {
        match kept
            .iter()
            .position(|existing| name_similarity(&existing.name, &dish.name) > threshold)
        {
            Some(pos) => {
                debug!(kept = %kept[pos].name, duplicate = %dish.name, "merging similar dishes");
                kept[pos] = merge_pair(&kept[pos], &dish);
                merged += 1;
            }
            None => kept.push(dish),
        }
    }

    MergeOutcome {
        dishes: kept,
        merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn dish(name: &str, confidence: f32) -> Dish {
        Dish {
            name: name.to_string(),
            description: None,
            price: None,
            category: None,
            allergens: BTreeSet::new(),
            dietary_tags: BTreeSet::new(),
            section: None,
            extraction_confidence: confidence,
        }
    }

    #[test]
    fn collapses_double_reads() {
        let outcome = merge_similar(
            vec![
                dish("Grilled Salmon", 0.8),
                dish("Tomato Soup", 0.7),
                dish("Grilled Salmon ", 0.9),
            ],
            0.8,
        );
        assert_eq!(outcome.dishes.len(), 2);
        assert_eq!(outcome.merged, 1);
        assert_eq!(outcome.dishes[0].extraction_confidence, 0.9);
    }

    #[test]
    fn merges_only_through_direct_matches() {
        // A~B (4/5) and B~C (4/5) but A≁C (3/5)
        let a = dish("a b c d", 0.9);
        let b = dish("a b c d e", 0.8);
        let c = dish("b c d e", 0.7);
        assert!(name_similarity(&a.name, &b.name) > 0.75);
        assert!(name_similarity(&a.name, &c.name) < 0.75);

        let outcome = merge_similar(vec![a, b, c], 0.75);
        assert_eq!(outcome.dishes.len(), 2);
        assert_eq!(outcome.dishes[0].name, "a b c d");
        assert_eq!(outcome.dishes[1].name, "b c d e");
    }

    #[test]
    fn distinct_dishes_survive() {
        let outcome = merge_similar(vec![dish("Grilled Salmon", 0.8), dish("Grilled Chicken", 0.8)], 0.8);
        assert_eq!(outcome.dishes.len(), 2);
        assert_eq!(outcome.merged, 0);
    }
}
