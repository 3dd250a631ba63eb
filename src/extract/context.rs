//! Page context around candidates: orphan descriptions, section headings and
//! the restaurant's name.

use crate::core::group_classifier::is_contact_line;
use crate::core::keywords::{contains_any, RESTAURANT_INFO_WORDS};
use crate::core::model::{DishCandidate, GroupType, TextGroup};
use crate::extract::name::clean_name;

/// Gives candidates without a description the nearest unused description
/// group directly below them. Returns how many descriptions were attached.
pub fn attach_descriptions(
    candidates: &mut [DishCandidate],
    groups: &[TextGroup],
    max_gap: f32,
    same_line_threshold: f32,
) -> usize {
    let descriptions: Vec<&TextGroup> = groups
        .iter()
        .filter(|g| g.group_type == GroupType::Description)
        .collect();
    let mut used = vec![false; descriptions.len()];
    let mut attached = 0;

    for candidate in candidates.iter_mut() {
        if candidate.description.is_some() {
            continue;
        }
        let Some(bbox) = candidate.bbox() else {
            continue;
        };

        let mut best: Option<(usize, f32)> = None;
        for (idx, group) in descriptions.iter().enumerate() {
            if used[idx] || bbox.horizontal_overlap(&group.bbox) <= 0.0 {
                continue;
            }
            // the description's top edge sits under the candidate's bottom edge
            let gap = bbox.y0 - group.bbox.y1;
            if !(-same_line_threshold..=max_gap).contains(&gap) {
                continue;
            }
            if best.map_or(true, |(_, best_gap)| gap < best_gap) {
                best = Some((idx, gap));
            }
        }

        if let Some((idx, _)) = best {
            used[idx] = true;
            let text = descriptions[idx].text_lines(same_line_threshold).join(" ");
            candidate.description = Some(text);
            attached += 1;
        }
    }

    attached
}

/// Records on each candidate the nearest section heading above it, preferring
/// headings in the same column.
pub fn assign_sections(candidates: &mut [DishCandidate], groups: &[TextGroup], same_line_threshold: f32) {
    let headers: Vec<(&TextGroup, String)> = groups
        .iter()
        .filter(|g| g.group_type == GroupType::SectionHeader)
        .map(|g| (g, clean_name(&g.text_lines(same_line_threshold).join(" "))))
        .filter(|(_, title)| !title.is_empty())
        .collect();

    for candidate in candidates.iter_mut() {
        let Some(bbox) = candidate.bbox() else {
            continue;
        };
        let cy = bbox.center_y();

        let above: Vec<&(&TextGroup, String)> = headers
            .iter()
            .filter(|(g, _)| g.bbox.center_y() > cy)
            .collect();

        let same_column = nearest_header(
            above
                .iter()
                .copied()
                .filter(|(g, _)| g.bbox.horizontal_overlap(&bbox) > 0.0),
        );
        candidate.section = same_column.or_else(|| nearest_header(above.iter().copied()));
    }
}

fn nearest_header<'a, I>(headers: I) -> Option<String>
where
    I: Iterator<Item = &'a (&'a TextGroup, String)>,
{
    headers
        .min_by(|(a, _), (b, _)| a.bbox.center_y().total_cmp(&b.bbox.center_y()))
        .map(|(_, title)| title.clone())
}

/// Name line of the highest restaurant-information group.
pub fn restaurant_name(groups: &[TextGroup], same_line_threshold: f32) -> Option<String> {
    let mut info: Vec<&TextGroup> = groups
        .iter()
        .filter(|g| g.group_type == GroupType::RestaurantInfo)
        .collect();
    info.sort_by(|a, b| b.bbox.y1.total_cmp(&a.bbox.y1));

    info.into_iter()
        .flat_map(|g| g.text_lines(same_line_threshold))
        .find_map(|line| {
            if is_contact_line(&line) {
                return None;
            }
            let lower = line.to_lowercase();
            let contact_words: Vec<&str> = RESTAURANT_INFO_WORDS
                .iter()
                .copied()
                .filter(|w| *w != "restaurant")
                .collect();
            if contains_any(&lower, &contact_words) {
                return None;
            }
            let name = clean_name(&line);
            (name.chars().filter(|c| c.is_alphabetic()).count() >= 2).then_some(name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::TextFragment;
    use pretty_assertions::assert_eq;

    fn group(text: &str, bbox: BBox, group_type: GroupType) -> TextGroup {
        TextGroup::from_fragments(vec![TextFragment::new(text, 0.9, bbox)], group_type)
            .expect("non-empty group")
    }

    fn candidate(name: &str, bbox: BBox) -> DishCandidate {
        DishCandidate::new(name.to_string(), vec![TextFragment::new(name, 0.9, bbox)], 0.9)
    }

    #[test]
    fn attaches_description_directly_below() {
        let groups = vec![group(
            "slow roasted with garlic, rosemary and a red wine reduction, served with mash",
            BBox::new(0.10, 0.70, 0.60, 0.74),
            GroupType::Description,
        )];
        let mut candidates = vec![
            candidate("Lamb Shank", BBox::new(0.10, 0.76, 0.30, 0.78)),
            candidate("Tiramisu", BBox::new(0.10, 0.30, 0.30, 0.32)),
        ];

        let attached = attach_descriptions(&mut candidates, &groups, 0.08, 0.03);

        assert_eq!(attached, 1);
        assert!(candidates[0].description.is_some());
        assert!(candidates[1].description.is_none());
    }

    #[test]
    fn assigns_nearest_section_above() {
        let groups = vec![
            group("STARTERS", BBox::new(0.10, 0.90, 0.30, 0.92), GroupType::SectionHeader),
            group("DESSERTS", BBox::new(0.10, 0.50, 0.30, 0.52), GroupType::SectionHeader),
        ];
        let mut candidates = vec![
            candidate("Tomato Soup", BBox::new(0.10, 0.80, 0.30, 0.82)),
            candidate("Lemon Tart", BBox::new(0.10, 0.40, 0.30, 0.42)),
        ];

        assign_sections(&mut candidates, &groups, 0.03);

        assert_eq!(candidates[0].section.as_deref(), Some("STARTERS"));
        assert_eq!(candidates[1].section.as_deref(), Some("DESSERTS"));
    }

    #[test]
    fn picks_restaurant_name_over_contact_lines() {
        let groups = vec![
            group("Tel: (555) 123-4567", BBox::new(0.3, 0.05, 0.7, 0.07), GroupType::RestaurantInfo),
            group("Trattoria Luca Restaurant", BBox::new(0.2, 0.94, 0.8, 0.97), GroupType::RestaurantInfo),
        ];
        assert_eq!(
            restaurant_name(&groups, 0.03).as_deref(),
            Some("Trattoria Luca Restaurant")
        );
        assert_eq!(restaurant_name(&groups[..1], 0.03), None);
    }
}
