//! Dish candidates from dish-item groups, plus the page context around them.

pub mod candidate;
pub mod context;
pub mod name;

pub use candidate::{build_candidates, candidate_from_group, CandidateBatch};
pub use context::{assign_sections, attach_descriptions, restaurant_name};
pub use name::{clean_name, is_valid_name, looks_like_dish_name};
