pub mod json_export;
pub mod markdown_export;
pub mod text_export;

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::model::Menu;

pub use json_export::JsonExporter;
pub use markdown_export::MarkdownExporter;
pub use text_export::TextExporter;

pub trait Exporter {
    fn export(&self, menu: &Menu) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Markdown,
    Text,
}

/// Writes `menu` into `out_dir` once per requested format.
pub fn export_menu(menu: &Menu, out_dir: &Path, formats: &[ExportFormat]) -> Result<()> {
    for format in formats {
        let exporter: Box<dyn Exporter> = match format {
            ExportFormat::Json => Box::new(JsonExporter::new(out_dir.to_path_buf())),
            ExportFormat::Markdown => Box::new(MarkdownExporter::new(out_dir.to_path_buf())),
            ExportFormat::Text => Box::new(TextExporter::new(out_dir.to_path_buf())),
        };
        exporter.export(menu)?;
    }
    Ok(())
}
