pub mod bridge;
pub mod filter;

use anyhow::Result;
use std::path::Path;

use crate::core::model::OcrPage;

pub use bridge::{OcrDumpReader, OcrToken};
pub use filter::{FilterOutcome, FragmentFilter};

/// Source of positioned OCR text for one menu page.
pub trait OcrProvider {
    fn recognize(&self, source: &Path) -> Result<OcrPage>;
}
