use strsim::normalized_levenshtein;

use crate::core::model::{LayoutRegion, TextFragment};
use crate::ocr::filter::normalize_text;

/// Fragments claimed by layout regions, and the ones left over.
#[derive(Debug, Clone, Default)]
pub struct RegionAssignment {
    /// One index list per region that claimed at least one fragment.
    pub claimed: Vec<(String, Vec<usize>)>,
    pub unclaimed: Vec<usize>,
}

/// Binds region member texts to fragments by text and position.
///
/// A fragment is claimed when its center lies inside the region and its text
/// matches a member text exactly or with normalized Levenshtein similarity of
/// at least `min_similarity`. Each member text claims at most one fragment,
/// preferring an exact match, then the most similar one.
pub fn assign_regions(
    fragments: &[TextFragment],
    regions: &[LayoutRegion],
    min_similarity: f32,
) -> RegionAssignment {
    let mut used = vec![false; fragments.len()];
    let mut claimed = Vec::new();

    for region in regions {
        let mut members = Vec::new();

        for member_text in &region.member_texts {
            let wanted = normalize_text(member_text);
            if wanted.is_empty() {
                continue;
            }

            let mut best_idx = None;
            let mut best_score = 0.0_f32;
            for (idx, fragment) in fragments.iter().enumerate() {
                if used[idx] {
                    continue;
                }
                let (cx, cy) = fragment.bbox.center();
                if !region.bbox.contains_point(cx, cy) {
                    continue;
                }
                let score = if fragment.text == wanted {
                    1.0
                } else {
                    normalized_levenshtein(&fragment.text.to_lowercase(), &wanted.to_lowercase())
                        as f32
                };
                if score >= min_similarity && score > best_score {
                    best_score = score;
                    best_idx = Some(idx);
                }
            }

            if let Some(idx) = best_idx {
                used[idx] = true;
                members.push(idx);
            }
        }

        if !members.is_empty() {
            claimed.push((region.name.clone(), members));
        }
    }

    let unclaimed = (0..fragments.len()).filter(|idx| !used[*idx]).collect();

    RegionAssignment { claimed, unclaimed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    fn region(name: &str, texts: &[&str], bbox: BBox) -> LayoutRegion {
        LayoutRegion {
            name: name.to_string(),
            member_texts: texts.iter().map(|t| t.to_string()).collect(),
            bbox,
        }
    }

    #[test]
    fn duplicate_texts_bind_to_their_own_region() {
        let fragments = vec![
            TextFragment::new("Soup of the Day", 0.9, BBox::new(0.1, 0.80, 0.3, 0.82)),
            TextFragment::new("Soup of the Day", 0.9, BBox::new(0.6, 0.30, 0.8, 0.32)),
        ];
        let regions = vec![
            region("lunch", &["Soup of the Day"], BBox::new(0.5, 0.2, 1.0, 0.4)),
            region("dinner", &["Soup of the Day"], BBox::new(0.0, 0.7, 0.5, 0.9)),
        ];

        let assignment = assign_regions(&fragments, &regions, 0.9);

        assert_eq!(
            assignment.claimed,
            vec![
                ("lunch".to_string(), vec![1]),
                ("dinner".to_string(), vec![0]),
            ]
        );
        assert!(assignment.unclaimed.is_empty());
    }

    #[test]
    fn tolerates_small_ocr_differences() {
        let fragments = vec![
            TextFragment::new("Grilled Salmom", 0.9, BBox::new(0.1, 0.5, 0.3, 0.52)),
            TextFragment::new("Tiramisu", 0.9, BBox::new(0.1, 0.1, 0.3, 0.12)),
        ];
        let regions = vec![region("mains", &["Grilled Salmon"], BBox::new(0.0, 0.4, 0.5, 0.6))];

        let assignment = assign_regions(&fragments, &regions, 0.9);

        assert_eq!(assignment.claimed, vec![("mains".to_string(), vec![0])]);
        assert_eq!(assignment.unclaimed, vec![1]);
    }
}
