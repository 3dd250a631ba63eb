//! Keyword-driven categorization and dietary/allergen analysis.

pub mod categorize;
pub mod dietary;

use crate::core::model::DishCandidate;

pub use categorize::{categorize, CategoryScore};
pub use dietary::{allergens, dietary_tags};

/// Which analyses to run over a candidate.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub categories: bool,
    pub dietary: bool,
}

/// Fills category, dietary tags and allergens from the candidate's name and
/// description.
pub fn analyze_candidate(candidate: &mut DishCandidate, options: AnalysisOptions) {
    let text = candidate.analysis_text();

    if options.categories {
        candidate.category = Some(categorize(&text).category);
    }

    if options.dietary {
        candidate.dietary_tags.extend(dietary_tags(&text));
        candidate.allergens.extend(allergens(&text));
    }
}
