//! Dish-name plausibility and cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::group_classifier::{is_restaurant_info, is_section_header};
use crate::core::keywords::{contains_any, FOOD_KEYWORDS};
use crate::pricing::{contains_price, strip_prices};

pub const MIN_NAME_CHARS: usize = 3;
pub const MAX_NAME_CHARS: usize = 100;

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("bracket pattern is a valid literal"));

// dot or dash leaders between a name and its price
static LEADERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*[.·…_-]){3,}\s*").expect("leader pattern is a valid literal"));

/// Heuristic test for a line that reads like a dish name.
pub fn looks_like_dish_name(line: &str) -> bool {
    let trimmed = line.trim();
    let tokens = trimmed.split_whitespace().count();
    if !(2..=10).contains(&tokens) || contains_price(trimmed) {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if contains_any(&lower, FOOD_KEYWORDS) {
        return true;
    }

    let len = trimmed.chars().count();
    let capitalized = trimmed.chars().next().is_some_and(|c| c.is_uppercase());
    capitalized && (5..=50).contains(&len)
}

/// Strips prices, bracketed asides, decoration and leaders from a raw name.
pub fn clean_name(raw: &str) -> String {
    let without_prices = strip_prices(raw);
    let without_asides = BRACKETED.replace_all(&without_prices, " ");
    let without_leaders = LEADERS.replace_all(&without_asides, " ");
    without_leaders
        .chars()
        .filter(|c| *c != '*' && *c != '#')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '-' || c == ':' || c == ',' || c == '.')
        .trim()
        .to_string()
}

/// A cleaned name survives when it has a sane length and is neither a price,
/// a section heading nor restaurant information.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    if name.is_empty() || !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return false;
    }
    if !name.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    !contains_price(name) && !is_section_header(name) && !is_restaurant_info(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recognizes_dish_like_lines() {
        assert!(looks_like_dish_name("Grilled Salmon"));
        assert!(looks_like_dish_name("tomato soup"));
        assert!(looks_like_dish_name("Chef's Surprise"));
        assert!(!looks_like_dish_name("Caesar Salad $12.99"));
        assert!(!looks_like_dish_name("Bouillabaisse"));
        assert!(!looks_like_dish_name("served with a side of seasonal vegetables and a lemon wedge"));
    }

    #[test]
    fn cleans_decorated_names() {
        assert_eq!(clean_name("*Caesar Salad* (GF) $12.99"), "Caesar Salad");
        assert_eq!(clean_name("# Ribeye [16oz]"), "Ribeye");
        assert_eq!(clean_name("Tomato Soup ........ 6.50"), "Tomato Soup");
        assert_eq!(clean_name("  Lemon   Tart  "), "Lemon Tart");
    }

    #[test]
    fn validates_cleaned_names() {
        assert!(is_valid_name("Caesar Salad"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Ok"));
        assert!(!is_valid_name("12.99"));
        assert!(!is_valid_name("DESSERTS"));
        assert!(!is_valid_name("Tel 555-123-4567"));
        assert!(!is_valid_name(&"a".repeat(101)));
    }
}
