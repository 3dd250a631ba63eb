use crate::core::model::{DishCandidate, PriceInfo};

/// Attaches to each candidate the detected price whose center is nearest to
/// the candidate's center, when that distance is under `cutoff`.
///
/// Candidates are matched independently: one price may serve several
/// candidates. Returns the number of candidates that received a price.
pub fn associate_prices(candidates: &mut [DishCandidate], prices: &[PriceInfo], cutoff: f32) -> usize {
    let mut attached = 0;

    for candidate in candidates.iter_mut() {
        let Some(bbox) = candidate.bbox() else {
            continue;
        };

        let mut best: Option<(&PriceInfo, f32)> = None;
        for price in prices {
            let dist = bbox.center_distance(&price.bbox);
            if !dist.is_finite() {
                continue;
            }
            match best {
                Some((_, best_dist)) if best_dist <= dist => {}
                _ => best = Some((price, dist)),
            }
        }

        if let Some((price, dist)) = best {
            if dist < cutoff {
                candidate.price = Some(price.clone());
                attached += 1;
            }
        }
    }

    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::{CurrencyPosition, TextFragment};

    fn candidate(name: &str, bbox: BBox) -> DishCandidate {
        DishCandidate::new(
            name.to_string(),
            vec![TextFragment::new(name, 0.9, bbox)],
            0.9,
        )
    }

    fn price(amount: &str, bbox: BBox) -> PriceInfo {
        PriceInfo {
            amount: amount.to_string(),
            value: amount.parse().unwrap_or(0.0),
            currency: Some("$".to_string()),
            position: CurrencyPosition::Prefix,
            bbox,
            confidence: 0.9,
            original_text: format!("${amount}"),
        }
    }

    #[test]
    fn picks_the_nearest_price_within_cutoff() {
        let mut candidates = vec![
            candidate("Caesar Salad", BBox::new(0.10, 0.80, 0.30, 0.82)),
            candidate("Tomato Soup", BBox::new(0.10, 0.70, 0.30, 0.72)),
        ];
        let prices = vec![
            price("12.99", BBox::new(0.31, 0.80, 0.35, 0.82)),
            price("6.50", BBox::new(0.31, 0.70, 0.35, 0.72)),
        ];

        let attached = associate_prices(&mut candidates, &prices, 0.15);

        assert_eq!(attached, 2);
        assert_eq!(candidates[0].price.as_ref().map(|p| p.amount.as_str()), Some("12.99"));
        assert_eq!(candidates[1].price.as_ref().map(|p| p.amount.as_str()), Some("6.50"));
    }

    #[test]
    fn leaves_distant_prices_unattached() {
        let mut candidates = vec![candidate("Caesar Salad", BBox::new(0.05, 0.80, 0.25, 0.82))];
        let prices = vec![price("12.99", BBox::new(0.85, 0.80, 0.95, 0.82))];

        assert_eq!(associate_prices(&mut candidates, &prices, 0.15), 0);
        assert!(candidates[0].price.is_none());
    }

    #[test]
    fn one_price_may_serve_several_candidates() {
        let mut candidates = vec![
            candidate("Soup", BBox::new(0.10, 0.50, 0.20, 0.52)),
            candidate("Salad", BBox::new(0.10, 0.46, 0.20, 0.48)),
        ];
        let prices = vec![price("5.00", BBox::new(0.22, 0.48, 0.28, 0.50))];

        assert_eq!(associate_prices(&mut candidates, &prices, 0.15), 2);
    }
}
