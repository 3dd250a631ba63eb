use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::{Dish, DishCategory, Menu};
use crate::export::Exporter;

#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    out_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    /// Renders dishes under their printed section, or under their category
    /// when the menu has no section headers for them.
    pub fn render(menu: &Menu) -> String {
        let mut markdown = String::new();
        let title = menu.restaurant_name.as_deref().unwrap_or("Menu");
        markdown.push_str(&format!("# {}\n\n", title));

        let mut sections: Vec<(String, Vec<&Dish>)> = Vec::new();
        for dish in menu.dishes.iter().filter(|d| d.section.is_some()) {
            let section = dish.section.clone().unwrap_or_default();
            match sections.iter_mut().find(|(name, _)| *name == section) {
                Some((_, dishes)) => dishes.push(dish),
                None => sections.push((section, vec![dish])),
            }
        }

        let mut by_category: BTreeMap<Option<DishCategory>, Vec<&Dish>> = BTreeMap::new();
        for dish in menu.dishes.iter().filter(|d| d.section.is_none()) {
            by_category.entry(dish.category).or_default().push(dish);
        }

        for (section, dishes) in &sections {
            markdown.push_str(&format!("## {}\n\n", section));
            for dish in dishes {
                markdown.push_str(&Self::format_dish(dish));
            }
            markdown.push('\n');
        }

        for (category, dishes) in &by_category {
            let heading = category.map(|c| c.label()).unwrap_or("Other");
            markdown.push_str(&format!("## {}\n\n", heading));
            for dish in dishes {
                markdown.push_str(&Self::format_dish(dish));
            }
            markdown.push('\n');
        }

        markdown
    }

    fn format_dish(dish: &Dish) -> String {
        let mut line = format!("- **{}**", dish.name);
        if let Some(price) = &dish.price {
            line.push_str(&format!(" {}", price));
        }
        if !dish.dietary_tags.is_empty() {
            let tags: Vec<&str> = dish.dietary_tags.iter().map(|t| t.label()).collect();
            line.push_str(&format!(" _({})_", tags.join(", ")));
        }
        line.push('\n');

        if let Some(description) = &dish.description {
            line.push_str(&format!("  {}\n", description));
        }
        if !dish.allergens.is_empty() {
            let allergens: Vec<&str> = dish.allergens.iter().map(String::as_str).collect();
            line.push_str(&format!("  Allergens: {}\n", allergens.join(", ")));
        }
        line
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, menu: &Menu) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("menu.md");
        fs::write(&path, Self::render(menu))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
