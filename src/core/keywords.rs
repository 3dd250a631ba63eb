//! Static vocabularies used by classification, name heuristics and analysis.
//!
//! Every list is lowercase. Maps are built once on first use.

use once_cell::sync::Lazy;

use crate::core::model::{DietaryTag, DishCategory};

/// Words that mark a menu section heading.
pub const SECTION_HEADERS: &[&str] = &[
    "appetizers",
    "appetisers",
    "starters",
    "small plates",
    "entrees",
    "entrées",
    "mains",
    "main courses",
    "main dishes",
    "desserts",
    "sweets",
    "beverages",
    "drinks",
    "soups",
    "salads",
    "sides",
    "side dishes",
    "specials",
    "breakfast",
    "brunch",
    "lunch",
    "dinner",
    "wine list",
    "cocktails",
    "kids menu",
];

/// Words that suggest a line names a dish.
pub const FOOD_KEYWORDS: &[&str] = &[
    "salad", "soup", "chicken", "beef", "pork", "lamb", "fish", "salmon", "shrimp", "pasta",
    "pizza", "burger", "sandwich", "steak", "rice", "noodle", "curry", "grilled", "fried",
    "roasted", "baked", "cheese", "tomato", "mushroom", "taco", "wings", "cake", "pie", "tart",
    "chocolate", "coffee", "tea", "tofu", "risotto", "duck",
];

/// Words that mark restaurant contact or identity information.
pub const RESTAURANT_INFO_WORDS: &[&str] = &[
    "restaurant",
    "tel",
    "phone",
    "www",
    "http",
    "https",
    "email",
    "open daily",
    "reservations",
];

pub static CATEGORY_KEYWORDS: Lazy<Vec<(DishCategory, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            DishCategory::Appetizer,
            vec![
                "appetizer", "starter", "salad", "soup", "wings", "bruschetta", "calamari",
                "nachos", "dip", "spring roll", "dumpling", "edamame", "tapas", "sampler",
                "fries", "hummus", "ceviche", "carpaccio", "antipasto", "croquette",
            ],
        ),
        (
            DishCategory::MainCourse,
            vec![
                "steak", "chicken", "beef", "pork", "lamb", "salmon", "fish", "pasta", "burger",
                "pizza", "risotto", "curry", "entree", "ribs", "chop", "roast", "fillet", "filet",
                "sandwich", "noodle", "rice", "taco", "duck",
            ],
        ),
        (
            DishCategory::Dessert,
            vec![
                "dessert", "cake", "pie", "ice cream", "chocolate", "tart", "pudding",
                "cheesecake", "brownie", "sundae", "tiramisu", "mousse", "gelato", "sorbet",
                "creme brulee", "crème brûlée", "cookie", "custard", "macaron", "cobbler",
            ],
        ),
        (
            DishCategory::Beverage,
            vec![
                "coffee", "tea", "juice", "soda", "latte", "espresso", "cappuccino", "wine",
                "beer", "cocktail", "smoothie", "lemonade", "water", "milkshake", "mocktail",
                "cola", "drink",
            ],
        ),
        (
            DishCategory::Special,
            vec![
                "special", "chef", "signature", "house", "seasonal", "daily", "today", "limited",
                "featured",
            ],
        ),
    ]
});

pub static DIETARY_KEYWORDS: Lazy<Vec<(DietaryTag, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            DietaryTag::Vegetarian,
            vec!["vegetarian", "veggie", "meatless", "paneer", "(v)"],
        ),
        (
            DietaryTag::Vegan,
            vec!["vegan", "plant-based", "plant based", "(vg)"],
        ),
        (
            DietaryTag::GlutenFree,
            vec!["gluten-free", "gluten free", "(gf)", "celiac"],
        ),
        (
            DietaryTag::DairyFree,
            vec!["dairy-free", "dairy free", "lactose-free", "lactose free", "non-dairy", "(df)"],
        ),
        (
            DietaryTag::Spicy,
            vec![
                "spicy", "chili", "chilli", "jalapeno", "jalapeño", "sriracha", "habanero",
                "szechuan", "sichuan", "cayenne", "wasabi", "hot sauce", "buffalo",
            ],
        ),
        (
            DietaryTag::Healthy,
            vec![
                "healthy", "low-fat", "low fat", "low-calorie", "low calorie", "steamed",
                "superfood", "quinoa", "kale", "organic", "light",
            ],
        ),
    ]
});

pub static ALLERGEN_KEYWORDS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            "nuts",
            vec![
                "nuts", "almond", "almonds", "walnut", "walnuts", "pecan", "pecans", "cashew",
                "cashews", "pistachio", "pistachios", "hazelnut", "hazelnuts", "macadamia",
                "pine nuts",
            ],
        ),
        ("peanuts", vec!["peanut", "peanuts", "satay"]),
        (
            "shellfish",
            vec![
                "shrimp", "prawn", "prawns", "crab", "lobster", "oyster", "oysters", "mussel",
                "mussels", "clam", "clams", "scallop", "scallops", "shellfish",
            ],
        ),
        (
            "fish",
            vec![
                "fish", "salmon", "tuna", "cod", "halibut", "anchovy", "anchovies", "trout",
                "sea bass", "tilapia", "mackerel", "sardine", "sardines",
            ],
        ),
        (
            "eggs",
            vec!["egg", "eggs", "mayonnaise", "mayo", "aioli", "meringue", "omelette", "omelet"],
        ),
        (
            "dairy",
            vec![
                "cheese", "milk", "cream", "butter", "yogurt", "yoghurt", "parmesan",
                "mozzarella", "cheddar", "feta", "ricotta", "mascarpone",
            ],
        ),
        ("soy", vec!["soy", "tofu", "edamame", "miso", "tempeh"]),
        (
            "wheat",
            vec![
                "wheat", "bread", "pasta", "flour", "noodle", "noodles", "bun", "crouton",
                "croutons", "tortilla", "breaded", "spaghetti", "linguine",
            ],
        ),
    ]
});

/// Whole-word (or whole-phrase) match of `keyword` inside lowercase `text`,
/// allowing a plural `s`/`es` suffix.
///
/// Keywords that carry their own punctuation, such as `(v)`, match as plain
/// substrings.
pub fn contains_word(text: &str, keyword: &str) -> bool {
    if !keyword.chars().all(|c| c.is_alphanumeric() || c == ' ' || c == '-') {
        return text.contains(keyword);
    }

    let at_boundary = |rest: &str| rest.chars().next().map_or(true, |c| !c.is_alphanumeric());

    text.match_indices(keyword).any(|(start, _)| {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &text[start + keyword.len()..];
        let after_ok = at_boundary(rest)
            || rest.strip_prefix("es").is_some_and(at_boundary)
            || rest.strip_prefix('s').is_some_and(at_boundary);
        before_ok && after_ok
    })
}

/// Any keyword of `keywords` matches `text` (see [`contains_word`]).
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| contains_word(text, kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_words_only() {
        assert!(contains_word("fried egg on toast", "egg"));
        assert!(!contains_word("roasted eggplant", "egg"));
        assert!(contains_word("sea bass, lemon", "sea bass"));
        assert!(contains_word("mushroom risotto (v)", "(v)"));
        assert!(!contains_word("hotel", "tel"));
        assert!(!contains_word("steak frites", "tea"));
    }

    #[test]
    fn accepts_plural_suffixes() {
        assert!(contains_word("fish tacos", "taco"));
        assert!(contains_word("two dishes", "dish"));
        assert!(!contains_word("tacoma", "taco"));
    }

    #[test]
    fn vocabularies_are_lowercase() {
        let all_lists = CATEGORY_KEYWORDS
            .iter()
            .flat_map(|(_, words)| words.iter())
            .chain(DIETARY_KEYWORDS.iter().flat_map(|(_, words)| words.iter()))
            .chain(ALLERGEN_KEYWORDS.iter().flat_map(|(_, words)| words.iter()))
            .chain(FOOD_KEYWORDS.iter())
            .chain(SECTION_HEADERS.iter());
        for word in all_lists {
            assert_eq!(*word, word.to_lowercase(), "{word} is not lowercase");
        }
    }
}
