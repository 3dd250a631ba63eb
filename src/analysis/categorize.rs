use crate::core::keywords::CATEGORY_KEYWORDS;
use crate::core::model::DishCategory;

/// Category chosen for a dish together with the score behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    pub category: DishCategory,
    /// Fraction of the category's keywords found; zero for the fallback.
    pub score: f32,
}

/// Scores every category by `matched / total` keywords found as substrings of
/// lowercase `text` and picks the best one. Ties keep the earlier category; an all-zero
/// result falls back to [`DishCategory::MainCourse`].
pub fn categorize(text: &str) -> CategoryScore {
    let mut best = CategoryScore {
        category: DishCategory::MainCourse,
        score: 0.0,
    };

    for (category, keywords) in CATEGORY_KEYWORDS.iter() {
        if keywords.is_empty() {
            continue;
        }
        let matched = keywords.iter().filter(|kw| text.contains(*kw)).count();
        let score = matched as f32 / keywords.len() as f32;
        if score > best.score {
            best = CategoryScore {
                category: *category,
                score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picks_the_best_scoring_category() {
        assert_eq!(categorize("caesar salad").category, DishCategory::Appetizer);
        assert_eq!(categorize("grilled salmon").category, DishCategory::MainCourse);
        assert_eq!(categorize("chocolate lava cake").category, DishCategory::Dessert);
        assert_eq!(categorize("iced latte").category, DishCategory::Beverage);
        assert_eq!(categorize("chef's signature tasting").category, DishCategory::Special);
    }

    #[test]
    fn normalizes_by_category_size() {
        // one beverage hit out of 17 outweighs one main-course hit out of 23
        let result = categorize("chicken and juice");
        assert_eq!(result.category, DishCategory::Beverage);
        assert!((result.score - 1.0 / 17.0).abs() < 1e-6);
    }

    #[test]
    fn matches_keywords_inside_compound_words() {
        let burger = categorize("cheeseburger");
        assert_eq!(burger.category, DishCategory::MainCourse);
        assert!((burger.score - 1.0 / 23.0).abs() < 1e-6);

        let pancakes = categorize("pancakes with syrup");
        assert_eq!(pancakes.category, DishCategory::Dessert);
        assert!(pancakes.score > 0.0);
    }

    #[test]
    fn falls_back_to_main_course() {
        let result = categorize("mystery plate");
        assert_eq!(result.category, DishCategory::MainCourse);
        assert_eq!(result.score, 0.0);
    }
}
