//! Extraction settings.
//!
//! Every field has a default, so a TOML file only needs the values it changes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grouping::ProximityParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Dishes scoring below this are discarded (inclusive threshold)
    pub min_dish_confidence: f32,
    /// OCR fragments below this are dropped before grouping
    pub min_fragment_confidence: f32,

    pub enable_advanced_pricing: bool,
    pub enable_category_detection: bool,
    pub enable_dietary_analysis: bool,
    pub merge_similar_dishes: bool,
    pub enable_layout_awareness: bool,

    pub same_line_threshold: f32,
    pub column_threshold: f32,
    pub column_overlap_ratio: f32,
    /// Max center distance between a dish and its price
    pub price_association_cutoff: f32,
    /// Name Jaccard similarity above which two dishes merge
    pub merge_similarity_threshold: f32,
    /// Min normalized Levenshtein similarity for a layout member text
    pub region_match_similarity: f32,
    /// Max gap between a dish and an orphan description below it
    pub description_attach_distance: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_dish_confidence: 0.3,
            min_fragment_confidence: 0.3,
            enable_advanced_pricing: true,
            enable_category_detection: true,
            enable_dietary_analysis: true,
            merge_similar_dishes: true,
            enable_layout_awareness: true,
            same_line_threshold: 0.03,
            column_threshold: 0.15,
            column_overlap_ratio: 0.10,
            price_association_cutoff: 0.15,
            merge_similarity_threshold: 0.8,
            region_match_similarity: 0.9,
            description_attach_distance: 0.08,
        }
    }
}

impl ExtractionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("min_dish_confidence", self.min_dish_confidence),
            ("min_fragment_confidence", self.min_fragment_confidence),
            ("column_overlap_ratio", self.column_overlap_ratio),
            ("merge_similarity_threshold", self.merge_similarity_threshold),
            ("region_match_similarity", self.region_match_similarity),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be within [0, 1], got {value}");
            }
        }

        let distance_fields = [
            ("same_line_threshold", self.same_line_threshold),
            ("column_threshold", self.column_threshold),
            ("price_association_cutoff", self.price_association_cutoff),
            ("description_attach_distance", self.description_attach_distance),
        ];
        for (name, value) in distance_fields {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{name} must be a positive distance, got {value}");
            }
        }

        if self.same_line_threshold > self.column_threshold {
            anyhow::bail!(
                "same_line_threshold ({}) must not exceed column_threshold ({})",
                self.same_line_threshold,
                self.column_threshold
            );
        }
        Ok(())
    }

    pub fn proximity_params(&self) -> ProximityParams {
        ProximityParams {
            same_line_threshold: self.same_line_threshold,
            column_threshold: self.column_threshold,
            column_overlap_ratio: self.column_overlap_ratio,
        }
    }
}
