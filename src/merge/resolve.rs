use crate::core::model::Dish;

/// Merges two records of the same dish.
///
/// The more confident record supplies the scalar fields (the first one on a
/// tie), the other fills in whatever the base lacks, tag and allergen sets are
/// united and the higher confidence is kept.
pub fn merge_pair(a: &Dish, b: &Dish) -> Dish {
    let (base, other) = if b.extraction_confidence > a.extraction_confidence {
        (b, a)
    } else {
        (a, b)
    };

    let mut merged = base.clone();
    if merged.description.is_none() {
        merged.description = other.description.clone();
    }
    if merged.price.is_none() {
        merged.price = other.price.clone();
    }
    if merged.category.is_none() {
        merged.category = other.category;
    }
    if merged.section.is_none() {
        merged.section = other.section.clone();
    }
    merged.allergens.extend(other.allergens.iter().cloned());
    merged.dietary_tags.extend(other.dietary_tags.iter().copied());
    merged.extraction_confidence = a.extraction_confidence.max(b.extraction_confidence);
    merged
}
