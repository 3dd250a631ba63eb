pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod extract;
pub mod grouping;
pub mod logging;
pub mod merge;
pub mod ocr;
pub mod pipeline;
pub mod pricing;

pub use config::ExtractionConfig;
pub use core::model::{Dish, DishCategory, DietaryTag, Menu, OcrPage, TextFragment};
pub use error::ExtractionError;
pub use pipeline::{MenuPipeline, PipelineState};
