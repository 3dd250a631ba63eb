use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// One OCR-recognized span of text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub confidence: f32,
    pub bbox: BBox,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<String>,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, confidence: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
            alternates: Vec::new(),
        }
    }
}

/// Externally supplied layout region with the texts it contains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutRegion {
    pub name: String,
    pub member_texts: Vec<String>,
    pub bbox: BBox,
}

/// Everything the OCR provider hands to the extraction pipeline for one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrPage {
    pub fragments: Vec<TextFragment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_regions: Option<Vec<LayoutRegion>>,
}

impl OcrPage {
    pub fn new(fragments: Vec<TextFragment>) -> Self {
        Self {
            fragments,
            layout_regions: None,
        }
    }

    pub fn with_layout(mut self, regions: Vec<LayoutRegion>) -> Self {
        self.layout_regions = Some(regions);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    DishItem,
    SectionHeader,
    PriceOnly,
    Description,
    RestaurantInfo,
}

/// Cluster of fragments believed to form one menu element.
#[derive(Debug, Clone)]
pub struct TextGroup {
    pub fragments: Vec<TextFragment>,
    pub bbox: BBox,
    pub group_type: GroupType,
    pub confidence: f32,
}

impl TextGroup {
    /// Builds a group over a non-empty fragment list; returns `None` when empty.
    pub fn from_fragments(fragments: Vec<TextFragment>, group_type: GroupType) -> Option<Self> {
        let bbox = BBox::union_all(fragments.iter().map(|f| &f.bbox))?;
        let confidence =
            fragments.iter().map(|f| f.confidence).sum::<f32>() / fragments.len() as f32;
        Some(Self {
            fragments,
            bbox,
            group_type,
            confidence,
        })
    }

    /// Fragment texts joined into lines: left to right within a line, lines
    /// top to bottom, separated by `\n`.
    pub fn text_lines(&self, same_line_threshold: f32) -> Vec<String> {
        let mut ordered: Vec<&TextFragment> = self.fragments.iter().collect();
        ordered.sort_by(|a, b| {
            b.bbox
                .center_y()
                .total_cmp(&a.bbox.center_y())
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });

        let mut lines: Vec<Vec<&TextFragment>> = Vec::new();
        for fragment in ordered {
            match lines.last_mut() {
                Some(line)
                    if line[0].bbox.vertical_center_delta(&fragment.bbox)
                        < same_line_threshold =>
                {
                    line.push(fragment)
                }
                _ => lines.push(vec![fragment]),
            }
        }

        lines
            .into_iter()
            .map(|mut line| {
                line.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
                line.iter()
                    .map(|f| f.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// All fragment texts in discovery order, joined by spaces.
    pub fn combined_text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPosition {
    Prefix,
    Suffix,
    None,
}

/// A price found in a fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceInfo {
    /// Numeric text as printed, e.g. `12.99` or `7,50`.
    pub amount: String,
    pub value: f64,
    pub currency: Option<String>,
    pub position: CurrencyPosition,
    pub bbox: BBox,
    pub confidence: f32,
    pub original_text: String,
}

impl PriceInfo {
    /// Currency and amount in their printed order, without interior spacing.
    pub fn formatted(&self) -> String {
        match (&self.currency, self.position) {
            (Some(symbol), CurrencyPosition::Prefix) => format!("{symbol}{}", self.amount),
            (Some(symbol), CurrencyPosition::Suffix) => format!("{}{symbol}", self.amount),
            _ => self.amount.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DishCategory {
    Appetizer,
    MainCourse,
    Dessert,
    Beverage,
    Special,
}

impl DishCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DishCategory::Appetizer => "Appetizer",
            DishCategory::MainCourse => "Main Course",
            DishCategory::Dessert => "Dessert",
            DishCategory::Beverage => "Beverage",
            DishCategory::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    Spicy,
    Healthy,
}

impl DietaryTag {
    pub fn label(&self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Vegan => "vegan",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::DairyFree => "dairy-free",
            DietaryTag::Spicy => "spicy",
            DietaryTag::Healthy => "healthy",
        }
    }
}

/// Provisional dish record carried between extraction and validation.
#[derive(Debug, Clone)]
pub struct DishCandidate {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<PriceInfo>,
    pub category: Option<DishCategory>,
    pub allergens: BTreeSet<String>,
    pub dietary_tags: BTreeSet<DietaryTag>,
    pub section: Option<String>,
    pub source_fragments: Vec<TextFragment>,
    pub group_confidence: f32,
}

impl DishCandidate {
    pub fn new(name: String, source_fragments: Vec<TextFragment>, group_confidence: f32) -> Self {
        Self {
            name,
            description: None,
            price: None,
            category: None,
            allergens: BTreeSet::new(),
            dietary_tags: BTreeSet::new(),
            section: None,
            source_fragments,
            group_confidence,
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::union_all(self.source_fragments.iter().map(|f| &f.bbox))
    }

    /// Name and description, lowercased, used for keyword analysis.
    pub fn analysis_text(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.name, desc).to_lowercase(),
            None => self.name.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DishCategory>,
    pub allergens: BTreeSet<String>,
    pub dietary_tags: BTreeSet<DietaryTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub extraction_confidence: f32,
}

impl Dish {
    pub fn from_candidate(candidate: DishCandidate, extraction_confidence: f32) -> Self {
        Self {
            name: candidate.name,
            description: candidate.description,
            price: candidate.price.map(|p| p.formatted()),
            category: candidate.category,
            allergens: candidate.allergens,
            dietary_tags: candidate.dietary_tags,
            section: candidate.section,
            extraction_confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub dishes: Vec<Dish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    pub ocr_confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment(text: &str, bbox: BBox) -> TextFragment {
        TextFragment::new(text, 0.8, bbox)
    }

    #[test]
    fn group_bbox_and_confidence_cover_members() {
        let group = TextGroup::from_fragments(
            vec![
                TextFragment::new("Soup", 0.6, BBox::new(0.1, 0.8, 0.2, 0.82)),
                TextFragment::new("$5", 1.0, BBox::new(0.7, 0.79, 0.75, 0.81)),
            ],
            GroupType::DishItem,
        )
        .expect("group");
        assert_eq!(group.bbox, BBox::new(0.1, 0.79, 0.75, 0.82));
        assert!((group.confidence - 0.8).abs() < 1e-6);
        assert!(TextGroup::from_fragments(vec![], GroupType::DishItem).is_none());
    }

    #[test]
    fn text_lines_follow_reading_order() {
        let group = TextGroup::from_fragments(
            vec![
                fragment("with croutons", BBox::new(0.1, 0.70, 0.4, 0.72)),
                fragment("Salad", BBox::new(0.3, 0.75, 0.4, 0.77)),
                fragment("Caesar", BBox::new(0.1, 0.75, 0.28, 0.77)),
            ],
            GroupType::DishItem,
        )
        .expect("group");
        assert_eq!(
            group.text_lines(0.03),
            vec!["Caesar Salad".to_string(), "with croutons".to_string()]
        );
    }

    #[test]
    fn formats_prices_in_printed_order() {
        let mut price = PriceInfo {
            amount: "12.99".to_string(),
            value: 12.99,
            currency: Some("$".to_string()),
            position: CurrencyPosition::Prefix,
            bbox: BBox::new(0.0, 0.0, 0.1, 0.1),
            confidence: 0.9,
            original_text: "$ 12.99".to_string(),
        };
        assert_eq!(price.formatted(), "$12.99");
        price.position = CurrencyPosition::Suffix;
        assert_eq!(price.formatted(), "12.99$");
    }
}
