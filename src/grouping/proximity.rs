use crate::core::model::TextFragment;

/// Thresholds of the fragment relation, in normalized page units.
#[derive(Debug, Clone, Copy)]
pub struct ProximityParams {
    /// Max vertical center distance for two fragments on the same line.
    pub same_line_threshold: f32,
    /// Max vertical center distance for two fragments stacked in a column.
    pub column_threshold: f32,
    /// Min horizontal overlap, as a fraction of the narrower width, for a column.
    pub column_overlap_ratio: f32,
}

impl Default for ProximityParams {
    fn default() -> Self {
        Self {
            same_line_threshold: 0.03,
            column_threshold: 0.15,
            column_overlap_ratio: 0.10,
        }
    }
}

/// Same line, or horizontally overlapping and vertically close.
pub fn are_related(a: &TextFragment, b: &TextFragment, params: &ProximityParams) -> bool {
    let dy = a.bbox.vertical_center_delta(&b.bbox);
    if dy < params.same_line_threshold {
        return true;
    }

    let narrower = a.bbox.width().min(b.bbox.width());
    if narrower <= 0.0 {
        return false;
    }
    let overlap = a.bbox.horizontal_overlap(&b.bbox);
    overlap > narrower * params.column_overlap_ratio && dy < params.column_threshold
}

/// Greedy single-pass clustering over `fragments`.
///
/// Each fragment not yet claimed seeds a group, and every unclaimed fragment
/// related to the seed joins it. Returns groups as index lists in discovery
/// order.
pub fn cluster_indices(fragments: &[TextFragment], params: &ProximityParams) -> Vec<Vec<usize>> {
    let mut used = vec![false; fragments.len()];
    let mut clusters = Vec::new();

    for (seed_idx, seed) in fragments.iter().enumerate() {
        if used[seed_idx] {
            continue;
        }
        used[seed_idx] = true;
        let mut members = vec![seed_idx];

        for (idx, other) in fragments.iter().enumerate().skip(seed_idx + 1) {
            if used[idx] {
                continue;
            }
            if are_related(seed, other, params) {
                used[idx] = true;
                members.push(idx);
            }
        }

        clusters.push(members);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    fn fragment(text: &str, bbox: BBox) -> TextFragment {
        TextFragment::new(text, 0.9, bbox)
    }

    #[test]
    fn relates_fragments_on_one_line() {
        let params = ProximityParams::default();
        let a = fragment("Caesar Salad", BBox::new(0.10, 0.80, 0.30, 0.82));
        let b = fragment("$12.99", BBox::new(0.80, 0.80, 0.88, 0.82));
        assert!(are_related(&a, &b, &params));
    }

    #[test]
    fn relates_stacked_fragments_in_a_column() {
        let params = ProximityParams::default();
        let name = fragment("Caesar Salad", BBox::new(0.10, 0.80, 0.30, 0.82));
        let desc = fragment("romaine, croutons", BBox::new(0.10, 0.75, 0.40, 0.77));
        let far = fragment("Tiramisu", BBox::new(0.10, 0.40, 0.30, 0.42));
        let other_column = fragment("Espresso", BBox::new(0.60, 0.75, 0.80, 0.77));
        assert!(are_related(&name, &desc, &params));
        assert!(!are_related(&name, &far, &params));
        assert!(!are_related(&name, &other_column, &params));
    }

    #[test]
    fn clusters_in_discovery_order() {
        let params = ProximityParams::default();
        let fragments = vec![
            fragment("Tiramisu", BBox::new(0.10, 0.40, 0.30, 0.42)),
            fragment("Caesar Salad", BBox::new(0.10, 0.80, 0.30, 0.82)),
            fragment("$8", BBox::new(0.70, 0.40, 0.75, 0.42)),
            fragment("$12.99", BBox::new(0.70, 0.80, 0.78, 0.82)),
        ];
        let clusters = cluster_indices(&fragments, &params);
        assert_eq!(clusters, vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn clustering_is_deterministic() {
        let params = ProximityParams::default();
        let fragments = vec![
            fragment("A", BBox::new(0.1, 0.9, 0.2, 0.92)),
            fragment("B", BBox::new(0.1, 0.85, 0.2, 0.87)),
            fragment("C", BBox::new(0.5, 0.5, 0.6, 0.52)),
        ];
        assert_eq!(
            cluster_indices(&fragments, &params),
            cluster_indices(&fragments, &params)
        );
    }
}
