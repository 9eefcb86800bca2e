//! Command-line interface for the extraction pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::block::{read_block, read_json, write_json};
use crate::chunk::{build_chunks, ChunkFile};
use crate::config::{DocumentConfig, JobConfig};
use crate::error::Result;
use crate::heading::HeadingRecognizer;
use crate::ingest::split_into_categories;
use crate::outline::OutlineBuilder;
use crate::segment::segment_outline;
use crate::types::DocumentOutline;

/// Norm Extractor - Reconstruct section trees from flat standard text.
#[derive(Parser)]
#[command(name = "norm-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split raw text into structurally analyzed categories.
    Extract {
        /// Job configuration file
        config: PathBuf,

        /// Document key in the job configuration
        #[arg(short, long)]
        document: String,
    },

    /// Build a section tree from a line block.
    Outline {
        /// Job configuration file
        config: PathBuf,

        /// Document key in the job configuration
        #[arg(short, long)]
        document: String,
    },

    /// Segment leaf sections into control sections.
    Segment {
        /// Job configuration file
        config: PathBuf,

        /// Document key in the job configuration
        #[arg(short, long)]
        document: String,
    },

    /// Emit chunk records from a segmented outline.
    Chunk {
        /// Job configuration file
        config: PathBuf,

        /// Document key in the job configuration
        #[arg(short, long)]
        document: String,
    },

    /// Run every configured step for a document in pipeline order.
    Run {
        /// Job configuration file
        config: PathBuf,

        /// Document key in the job configuration
        #[arg(short, long)]
        document: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { config, document } => {
            with_document(&config, &document, |doc| {
                extract_command(doc.require_structure(&document)?)
            })
        }
        Commands::Outline { config, document } => with_document(&config, &document, |doc| {
            outline_command(doc.require_outline(&document)?)
        }),
        Commands::Segment { config, document } => with_document(&config, &document, |doc| {
            segment_command(doc.require_segment(&document)?)
        }),
        Commands::Chunk { config, document } => with_document(&config, &document, |doc| {
            chunk_command(doc.require_chunks(&document)?)
        }),
        Commands::Run { config, document } => {
            with_document(&config, &document, |doc| run_command(doc, &document))
        }
    }
}

fn with_document<F>(config_path: &Path, document: &str, f: F) -> Result<()>
where
    F: FnOnce(&DocumentConfig) -> Result<()>,
{
    let config = JobConfig::load(config_path)?;
    f(config.document(document)?)
}

fn extract_command(step: &crate::config::StructureStep) -> Result<()> {
    println!(
        "{} {}",
        style("Extracting").bold(),
        style(step.input_text_path.display()).cyan()
    );

    let raw_text = fs::read_to_string(&step.input_text_path)?;
    let document = split_into_categories(&raw_text, &step.options)?;

    println!("  Categories: {}", document.categories.len());
    write_json(&step.output_json_path, &document)?;
    report_saved(&step.output_json_path);
    Ok(())
}

fn outline_command(step: &crate::config::OutlineStep) -> Result<()> {
    println!(
        "{} {}",
        style("Outlining").bold(),
        style(step.input_json_path.display()).cyan()
    );

    let lines = read_block(&step.input_json_path)?;
    let recognizer =
        HeadingRecognizer::with_patterns(step.l1_pattern.as_deref(), step.l2_pattern.as_deref())?;
    let outline = OutlineBuilder::new(recognizer)
        .include_heading_in_lines(step.include_heading_in_lines)
        .build(&lines, &step.input_json_path.display().to_string());

    println!("  Sections: {}", outline.l1_sections.len());
    write_json(&step.output_json_path, &outline)?;
    report_saved(&step.output_json_path);
    Ok(())
}

fn segment_command(step: &crate::config::SegmentStep) -> Result<()> {
    println!(
        "{} {}",
        style("Segmenting").bold(),
        style(step.input_json_path.display()).cyan()
    );

    let mut outline: DocumentOutline = read_json(&step.input_json_path)?;
    segment_outline(&mut outline);

    write_json(&step.output_json_path, &outline)?;
    report_saved(&step.output_json_path);
    Ok(())
}

fn chunk_command(step: &crate::config::ChunkStep) -> Result<()> {
    println!(
        "{} {}",
        style("Chunking").bold(),
        style(step.input_json_path.display()).cyan()
    );

    let outline: DocumentOutline = read_json(&step.input_json_path)?;
    let chunks = build_chunks(&outline, &step.metadata);

    println!("  Chunks: {}", chunks.len());
    write_json(&step.output_json_path, &ChunkFile { chunks })?;
    report_saved(&step.output_json_path);
    Ok(())
}

/// Execute every configured step, in pipeline order. Absent steps are
/// skipped rather than treated as errors.
fn run_command(doc: &DocumentConfig, document: &str) -> Result<()> {
    println!("{} {}", style("Running pipeline for").bold(), style(document).cyan());

    if let Some(step) = &doc.structure {
        extract_command(step)?;
    }
    if let Some(step) = &doc.outline {
        outline_command(step)?;
    }
    if let Some(step) = &doc.segment {
        segment_command(step)?;
    }
    if let Some(step) = &doc.chunks {
        chunk_command(step)?;
    }

    Ok(())
}

fn report_saved(path: &Path) {
    println!("{} {}", style("Saved to:").green().bold(), path.display());
}
