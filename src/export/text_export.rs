use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::{Dish, Menu};
use crate::export::Exporter;

#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    fn format_dish(dish: &Dish) -> String {
        let mut text = match &dish.price {
            Some(price) => format!("{} ... {}", dish.name, price),
            None => dish.name.clone(),
        };
        if let Some(description) = &dish.description {
            text.push_str(&format!("\n    {}", description));
        }
        text
    }
}

impl Exporter for TextExporter {
    fn export(&self, menu: &Menu) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let mut full_text = String::new();
        if let Some(name) = &menu.restaurant_name {
            full_text.push_str(&format!("=== {} ===\n\n", name));
        }
        let mut current_section: Option<&str> = None;
        for dish in &menu.dishes {
            if dish.section.is_some() && dish.section.as_deref() != current_section {
                current_section = dish.section.as_deref();
                full_text.push_str(&format!("[{}]\n", current_section.unwrap_or_default()));
            }
            full_text.push_str(&Self::format_dish(dish));
            full_text.push('\n');
        }

        let path = self.out_dir.join("menu.txt");
        fs::write(&path, full_text).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
