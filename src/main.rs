use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use menustruct::export::{export_menu, ExportFormat};
use menustruct::logging::init_logging;
use menustruct::ocr::{OcrDumpReader, OcrProvider};
use menustruct::pricing::find_prices;
use menustruct::{ExtractionConfig, MenuPipeline};

#[derive(Parser, Debug)]
#[command(name = "menustruct")]
#[command(version, about = "Menu structure extraction from positioned OCR text", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a menu from an OCR dump
    Extract {
        /// OCR dump (JSON)
        input: PathBuf,

        #[command(flatten)]
        options: ExtractOptions,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Extract menus from several OCR dumps
    Batch {
        /// OCR dumps (JSON)
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: ExtractOptions,
    },

    /// Print every price detected in a line of text
    Prices {
        text: String,
    },
}

#[derive(Args, Debug, Clone)]
struct ExtractOptions {
    /// Output directory (default: ./<input_name>_menu)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format(s) to generate
    #[arg(short, long, value_enum, default_values_t = vec![Format::Json, Format::Markdown])]
    format: Vec<Format>,

    /// Extraction settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the minimum dish confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    #[arg(long)]
    no_pricing: bool,

    #[arg(long)]
    no_categories: bool,

    #[arg(long)]
    no_dietary: bool,

    #[arg(long)]
    no_merge: bool,

    #[arg(long)]
    no_layout: bool,
}

impl ExtractOptions {
    fn build_config(&self) -> Result<ExtractionConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::load(path)?,
            None => ExtractionConfig::default(),
        };
        if let Some(min) = self.min_confidence {
            config.min_dish_confidence = min;
        }
        config.enable_advanced_pricing &= !self.no_pricing;
        config.enable_category_detection &= !self.no_categories;
        config.enable_dietary_analysis &= !self.no_dietary;
        config.merge_similar_dishes &= !self.no_merge;
        config.enable_layout_awareness &= !self.no_layout;
        config.validate()?;
        Ok(config)
    }

    fn export_formats(&self) -> Vec<ExportFormat> {
        self.format
            .iter()
            .map(|f| match f {
                Format::Json => ExportFormat::Json,
                Format::Markdown => ExportFormat::Markdown,
                Format::Text => ExportFormat::Text,
            })
            .collect()
    }
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum Format {
    Json,
    Markdown,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = matches!(cli.command, Commands::Extract { quiet: true, .. });
    init_logging(cli.verbose, quiet);

    match cli.command {
        Commands::Extract {
            input,
            options,
            quiet,
        } => {
            let config = options.build_config()?;
            let output = options.output.clone();
            extract_single(&input, output, &options.export_formats(), &config, quiet)
        }
        Commands::Batch { inputs, options } => extract_batch(&inputs, &options),
        Commands::Prices { text } => show_prices(&text),
    }
}

fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "menu".to_string())
}

fn extract_single(
    input: &Path,
    output: Option<PathBuf>,
    formats: &[ExportFormat],
    config: &ExtractionConfig,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from(format!("{}_menu", input_stem(input))));

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output_dir.display());
    }

    let page = OcrDumpReader::new().recognize(input)?;

    let pipeline = MenuPipeline::new(config.clone());
    let (menu, report) = pipeline
        .extract_with_report(&page)
        .with_context(|| format!("Failed to extract menu: {}", input.display()))?;

    if !quiet {
        println!(
            "[+] Fragments: {} kept, {} dropped",
            report.fragments_kept, report.fragments_dropped
        );
        println!(
            "[+] Dishes: {} ({} below threshold, {} merged)",
            menu.dishes.len(),
            report.dishes_below_threshold,
            report.dishes_merged
        );
        println!("[+] Exporting results...");
    }

    export_menu(&menu, &output_dir, formats)
        .with_context(|| format!("Failed to export menu to {}", output_dir.display()))?;

    if !quiet {
        println!("[✓] Done: {}", output_dir.display());
    }

    Ok(())
}

fn extract_batch(inputs: &[PathBuf], options: &ExtractOptions) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let config = options.build_config()?;
    let formats = options.export_formats();
    let base_output = options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("batch_menus"));

    println!("[*] Batch processing {} file(s)", inputs.len());
    println!("[*] Base output: {}\n", base_output.display());

    let mut success = 0;
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        println!("[{}/{}] Processing: {}", i + 1, inputs.len(), input.display());

        if !input.exists() {
            eprintln!("  [!] Skipped: file does not exist");
            failed += 1;
            continue;
        }

        let output_dir = base_output.join(input_stem(input));

        match extract_single(input, Some(output_dir), &formats, &config, true) {
            Ok(_) => {
                println!("  [✓] Success");
                success += 1;
            }
            Err(e) => {
                eprintln!("  [✗] Failed: {:#}", e);
                failed += 1;
            }
        }
    }

    println!("\n[*] Summary: {} succeeded, {} failed", success, failed);

    if failed > 0 {
        anyhow::bail!("{} file(s) failed to process", failed);
    }

    Ok(())
}

fn show_prices(text: &str) -> Result<()> {
    let prices = find_prices(text);
    if prices.is_empty() {
        println!("No prices found");
        return Ok(());
    }

    println!("Prices");
    println!("======");
    for price in prices {
        println!(
            "{:<12} value={:<10} currency={:<4} position={:?}",
            price.matched_text,
            price.value,
            price.currency.as_deref().unwrap_or("-"),
            price.position
        );
    }
    Ok(())
}
