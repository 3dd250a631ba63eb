use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::keywords::{contains_any, RESTAURANT_INFO_WORDS, SECTION_HEADERS};
use crate::core::model::{GroupType, TextGroup};
use crate::extract::name::looks_like_dish_name;
use crate::pricing::contains_price;

const DESCRIPTION_MIN_CHARS: usize = 50;

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{2,4}\)?[\s.-]\d{3,4}[\s.-]\d{3,4}")
        .expect("phone pattern is a valid literal")
});

static WEB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[\w.-]+\.(?:com|net|org|co|io|biz|info)\b|@[\w-]+\.")
        .expect("web pattern is a valid literal")
});

/// Shape and text signals the classifier decides on.
#[derive(Debug, Clone)]
pub struct GroupSignals {
    pub text: String,
    pub fragment_count: usize,
}

impl GroupSignals {
    pub fn from_group(group: &TextGroup) -> Self {
        Self {
            text: group.combined_text(),
            fragment_count: group.fragments.len(),
        }
    }
}

pub fn classify_group(signals: &GroupSignals) -> GroupType {
    let text = signals.text.trim();
    let tokens = text.split_whitespace().count();

    if is_section_header(text) {
        GroupType::SectionHeader
    } else if signals.fragment_count == 1 && tokens <= 2 && contains_price(text) {
        GroupType::PriceOnly
    } else if is_restaurant_info(text) {
        GroupType::RestaurantInfo
    } else if text.chars().count() > DESCRIPTION_MIN_CHARS && !looks_like_dish_name(text) {
        GroupType::Description
    } else {
        GroupType::DishItem
    }
}

/// Text naming a menu section anywhere in it.
pub fn is_section_header(text: &str) -> bool {
    contains_any(&text.to_lowercase(), SECTION_HEADERS)
}

/// Contact details, web addresses or the restaurant's own name line.
pub fn is_restaurant_info(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, RESTAURANT_INFO_WORDS) || is_contact_line(text)
}

/// Phone numbers, URLs and e-mail addresses.
pub fn is_contact_line(text: &str) -> bool {
    PHONE.is_match(text) || WEB.is_match(text)
}
