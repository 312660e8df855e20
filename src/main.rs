mod codegen;
mod collector;
mod error;
mod fetch;
mod parser;
mod record;
mod taxonomy;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};

use codegen::emit::ModuleSpec;
use parser::LinkFilter;
use taxonomy::Taxonomy;

/// The sole contract between the two stages.
const ARTICLES_JSON: &str = "vital_articles_hierarchy.json";
/// Artifact names derive from this: `vital_module.h` / `vital_module.c`.
const MODULE_NAME: &str = "vital";

#[derive(Parser)]
#[command(name = "vital_scraper", about = "Wikipedia vital-articles scraper + flecs module generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every taxonomy page into the JSON article document
    Scrape,
    /// Generate the flecs C module from the JSON article document
    Generate,
    /// Scrape + generate in one pipeline
    Run,
    /// Per-category record counts from the JSON article document
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape => scrape().await,
        Commands::Generate => generate(),
        Commands::Run => {
            scrape().await?;
            generate()
        }
        Commands::Stats => stats(),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn scrape() -> anyhow::Result<()> {
    let taxonomy = Taxonomy::vital_articles();
    let filter = LinkFilter::default();

    let targets = taxonomy.page_targets().len();
    println!("Scraping {} listing pages...", targets);

    let records = collector::collect_all(&taxonomy, &filter).await?;
    record::save_records(Path::new(ARTICLES_JSON), &records)?;

    println!("Extracted {} articles. Saved to {}.", records.len(), ARTICLES_JSON);
    Ok(())
}

fn generate() -> anyhow::Result<()> {
    let taxonomy = Taxonomy::vital_articles();
    let spec = ModuleSpec::new(MODULE_NAME);

    let module = codegen::generate_to_files(
        &taxonomy,
        Path::new(ARTICLES_JSON),
        Path::new("."),
        &spec,
    )?;

    println!(
        "Generated {} and {}: {} tags, {} entities, {} attachments.",
        spec.header_file(),
        spec.source_file(),
        module.tags,
        module.entities,
        module.attachments,
    );
    Ok(())
}

fn stats() -> anyhow::Result<()> {
    let records = record::load_records(Path::new(ARTICLES_JSON))?;
    if records.is_empty() {
        println!("No records. Run 'scrape' first.");
        return Ok(());
    }

    let taxonomy = Taxonomy::vital_articles();
    println!("{:<32} {:>8}", "Category", "Articles");
    println!("{}", "-".repeat(41));
    for (category, _) in taxonomy.entries() {
        let count = records.iter().filter(|r| &r.category == category).count();
        println!("{:<32} {:>8}", category, count);
    }
    println!("{}", "-".repeat(41));
    println!("{:<32} {:>8}", "Total", records.len());
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
