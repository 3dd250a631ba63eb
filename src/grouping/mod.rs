//! Spatial grouping of filtered fragments into classified text groups.

pub mod layout;
pub mod proximity;

use tracing::debug;

use crate::core::group_classifier::{classify_group, GroupSignals};
use crate::core::model::{GroupType, LayoutRegion, TextFragment, TextGroup};

pub use layout::{assign_regions, RegionAssignment};
pub use proximity::{are_related, cluster_indices, ProximityParams};

#[derive(Debug, Clone)]
pub struct SpatialGrouper {
    params: ProximityParams,
    use_layout: bool,
    region_similarity: f32,
}

impl SpatialGrouper {
    pub fn new(params: ProximityParams) -> Self {
        Self {
            params,
            use_layout: true,
            region_similarity: 0.9,
        }
    }

    pub fn with_layout(mut self, enabled: bool, region_similarity: f32) -> Self {
        self.use_layout = enabled;
        self.region_similarity = region_similarity;
        self
    }

    /// Groups every fragment exactly once and classifies each group.
    pub fn group(
        &self,
        fragments: &[TextFragment],
        regions: Option<&[LayoutRegion]>,
    ) -> Vec<TextGroup> {
        let mut index_groups: Vec<Vec<usize>> = Vec::new();

        let leftover: Vec<usize> = match regions {
            Some(regions) if self.use_layout && !regions.is_empty() => {
                let assignment = assign_regions(fragments, regions, self.region_similarity);
                debug!(
                    regions = assignment.claimed.len(),
                    unclaimed = assignment.unclaimed.len(),
                    "assigned fragments to layout regions"
                );
                index_groups.extend(assignment.claimed.into_iter().map(|(_, members)| members));
                assignment.unclaimed
            }
            _ => (0..fragments.len()).collect(),
        };

        let remaining: Vec<TextFragment> = leftover.iter().map(|&idx| fragments[idx].clone()).collect();
        for cluster in cluster_indices(&remaining, &self.params) {
            index_groups.push(cluster.into_iter().map(|local| leftover[local]).collect());
        }

        let groups: Vec<TextGroup> = index_groups
            .into_iter()
            .filter_map(|members| {
                let members = members.into_iter().map(|idx| fragments[idx].clone()).collect();
                TextGroup::from_fragments(members, GroupType::DishItem)
            })
            .map(|mut group| {
                group.group_type = classify_group(&GroupSignals::from_group(&group));
                group
            })
            .collect();

        debug!(groups = groups.len(), "grouped fragments");
        groups
    }
}

impl Default for SpatialGrouper {
    fn default() -> Self {
        Self::new(ProximityParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    fn fragment(text: &str, bbox: BBox) -> TextFragment {
        TextFragment::new(text, 0.9, bbox)
    }

    fn sample_page() -> Vec<TextFragment> {
        vec![
            fragment("APPETIZERS", BBox::new(0.35, 0.90, 0.65, 0.93)),
            fragment("Caesar Salad", BBox::new(0.10, 0.80, 0.30, 0.82)),
            fragment("$12.99", BBox::new(0.80, 0.80, 0.88, 0.82)),
            fragment("Tomato Soup", BBox::new(0.10, 0.60, 0.30, 0.62)),
            fragment("$6.50", BBox::new(0.80, 0.60, 0.88, 0.62)),
        ]
    }

    #[test]
    fn covers_every_fragment_exactly_once() {
        let fragments = sample_page();
        let groups = SpatialGrouper::default().group(&fragments, None);
        let total: usize = groups.iter().map(|g| g.fragments.len()).sum();
        assert_eq!(total, fragments.len());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn classifies_grouped_elements() {
        let groups = SpatialGrouper::default().group(&sample_page(), None);
        let types: Vec<GroupType> = groups.iter().map(|g| g.group_type).collect();
        assert_eq!(
            types,
            vec![GroupType::SectionHeader, GroupType::DishItem, GroupType::DishItem]
        );
    }

    #[test]
    fn grouping_is_idempotent() {
        let grouper = SpatialGrouper::default();
        let fragments = sample_page();
        let first = grouper.group(&fragments, None);
        let second = grouper.group(&fragments, None);
        let summary = |groups: &[TextGroup]| {
            groups
                .iter()
                .map(|g| (g.group_type, g.combined_text()))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&first), summary(&second));
    }

    #[test]
    fn layout_regions_claim_before_proximity() {
        let fragments = sample_page();
        let regions = vec![LayoutRegion {
            name: "soup".to_string(),
            member_texts: vec!["Tomato Soup".to_string(), "$6.50".to_string()],
            bbox: BBox::new(0.0, 0.55, 1.0, 0.65),
        }];

        let groups = SpatialGrouper::default().group(&fragments, Some(&regions));

        assert_eq!(groups[0].combined_text(), "Tomato Soup $6.50");
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn disabled_layout_ignores_regions() {
        let fragments = sample_page();
        let regions = vec![LayoutRegion {
            name: "all".to_string(),
            member_texts: vec!["APPETIZERS".to_string(), "Tomato Soup".to_string()],
            bbox: BBox::new(0.0, 0.0, 1.0, 1.0),
        }];

        let groups = SpatialGrouper::default()
            .with_layout(false, 0.9)
            .group(&fragments, Some(&regions));

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].combined_text(), "APPETIZERS");
    }
}
