use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::geometry::BBox;
use crate::core::model::{LayoutRegion, OcrPage, TextFragment};
use crate::ocr::OcrProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    pub bbox: [f32; 4],
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default)]
    pub alternates: Vec<String>,
}

fn default_confidence() -> f32 {
    0.5
}

impl From<OcrToken> for TextFragment {
    fn from(token: OcrToken) -> Self {
        TextFragment {
            text: token.text,
            confidence: token.confidence,
            bbox: BBox::from_array(token.bbox),
            alternates: token.alternates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionToken {
    pub name: String,
    #[serde(default)]
    pub member_texts: Vec<String>,
    pub bbox: [f32; 4],
}

impl From<RegionToken> for LayoutRegion {
    fn from(token: RegionToken) -> Self {
        LayoutRegion {
            name: token.name,
            member_texts: token.member_texts,
            bbox: BBox::from_array(token.bbox),
        }
    }
}

/// Either a full page object or a bare list of tokens.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OcrDump {
    Page {
        fragments: Vec<OcrToken>,
        #[serde(default)]
        layout_regions: Option<Vec<RegionToken>>,
    },
    Tokens(Vec<OcrToken>),
}

/// Reads OCR output that an external engine has dumped as JSON.
#[derive(Debug, Clone, Default)]
pub struct OcrDumpReader;

impl OcrDumpReader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, json: &str) -> Result<OcrPage> {
        let dump: OcrDump =
            serde_json::from_str(json).with_context(|| "failed to parse OCR JSON dump")?;
        let page = match dump {
            OcrDump::Page {
                fragments,
                layout_regions,
            } => OcrPage {
                fragments: fragments.into_iter().map(TextFragment::from).collect(),
                layout_regions: layout_regions
                    .map(|regions| regions.into_iter().map(LayoutRegion::from).collect()),
            },
            OcrDump::Tokens(tokens) => {
                OcrPage::new(tokens.into_iter().map(TextFragment::from).collect())
            }
        };
        Ok(page)
    }
}

impl OcrProvider for OcrDumpReader {
    fn recognize(&self, source: &Path) -> Result<OcrPage> {
        let json = fs::read_to_string(source)
            .with_context(|| format!("failed to read OCR dump: {}", source.display()))?;
        self.parse_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_page_objects_with_regions() -> Result<()> {
        let json = r#"{
            "fragments": [
                {"text": "Caesar Salad", "confidence": 0.9, "bbox": [0.1, 0.8, 0.3, 0.82]},
                {"text": "$12.99", "bbox": [0.32, 0.8, 0.38, 0.82], "alternates": ["$12.90"]}
            ],
            "layout_regions": [
                {"name": "starters", "member_texts": ["Caesar Salad"], "bbox": [0.0, 0.7, 0.5, 0.9]}
            ]
        }"#;

        let page = OcrDumpReader::new().parse_str(json)?;

        assert_eq!(page.fragments.len(), 2);
        assert_eq!(page.fragments[1].confidence, 0.5);
        assert_eq!(page.fragments[1].alternates, vec!["$12.90".to_string()]);
        let regions = page.layout_regions.expect("regions");
        assert_eq!(regions[0].member_texts, vec!["Caesar Salad".to_string()]);
        Ok(())
    }

    #[test]
    fn parses_bare_token_lists() -> Result<()> {
        let json = r#"[{"text": "Soup", "confidence": 0.7, "bbox": [0.1, 0.5, 0.2, 0.52]}]"#;
        let page = OcrDumpReader::new().parse_str(json)?;
        assert_eq!(page.fragments.len(), 1);
        assert!(page.layout_regions.is_none());
        Ok(())
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(OcrDumpReader::new().parse_str("{\"fragments\": 3}").is_err());
    }
}
