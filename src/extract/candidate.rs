use tracing::debug;

use crate::core::model::{DishCandidate, GroupType, TextGroup};
use crate::extract::name::{clean_name, is_valid_name, looks_like_dish_name};
use crate::pricing::strip_prices;

/// Candidates built from the dish-item groups, and how many groups were
/// rejected on the way.
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<DishCandidate>,
    pub rejected: usize,
}

pub fn build_candidates(groups: &[TextGroup], same_line_threshold: f32) -> CandidateBatch {
    let mut batch = CandidateBatch::default();

    for group in groups.iter().filter(|g| g.group_type == GroupType::DishItem) {
        match candidate_from_group(group, same_line_threshold) {
            Some(candidate) => batch.candidates.push(candidate),
            None => {
                debug!(text = %group.combined_text(), "rejected dish group");
                batch.rejected += 1;
            }
        }
    }

    batch
}

/// Name from the first line that reads like a dish once cleaned (or the first
/// line), description from the next line that carries words rather than just
/// a price.
pub fn candidate_from_group(group: &TextGroup, same_line_threshold: f32) -> Option<DishCandidate> {
    let lines = group.text_lines(same_line_threshold);
    let first = lines.first()?;

    let name_idx = lines
        .iter()
        .position(|line| looks_like_dish_name(&clean_name(line)))
        .unwrap_or(0);
    let raw_name = lines.get(name_idx).unwrap_or(first);

    let name = clean_name(raw_name);
    if !is_valid_name(&name) {
        return None;
    }

    let description = lines
        .iter()
        .skip(name_idx + 1)
        .find_map(|line| description_text(line));

    let mut candidate = DishCandidate::new(name, group.fragments.clone(), group.confidence);
    candidate.description = description;
    Some(candidate)
}

/// Line text with prices removed, when any words remain.
pub fn description_text(line: &str) -> Option<String> {
    let stripped = strip_prices(line);
    let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().any(|c| c.is_alphabetic()) {
        Some(text)
    } else {
        None
    }
}
