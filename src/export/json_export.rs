use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::Menu;
use crate::export::Exporter;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, menu: &Menu) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("menu.json");
        let data = serde_json::to_string_pretty(menu)?;
        fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
