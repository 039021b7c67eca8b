use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use doc_segmenter::core::writer::{CsvWriter, JsonWriter, SegmentWriter};
use doc_segmenter::utils::document_processor::DocumentProcessor;
use doc_segmenter::{ImportanceTable, OutputFormat, Segmenter, SegmenterConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Flat,
    Hierarchical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    Csv,
    Json,
}

/// Split documents into titles, subtitles and paragraphs with importance weights.
#[derive(Debug, Parser)]
#[command(name = "doc-segmenter", version, about)]
struct Cli {
    /// Source file (.docx, .pdf, .md, .txt, .words.json) or a directory of them
    input: PathBuf,

    /// Directory for the generated files
    #[arg(short, long, default_value = "data/chunk")]
    output_dir: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output shape; overrides the configuration file
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Output encoding; defaults to csv for flat output and json for hierarchical
    #[arg(short, long, value_enum)]
    encoding: Option<EncodingArg>,

    /// Importance override, e.g. `--weight subtitle_l2=1.5` (repeatable)
    #[arg(short, long = "weight", value_name = "KEY=VALUE")]
    weights: Vec<String>,

    /// Start from the 1.0/0.8 title/subtitle weights
    #[arg(long)]
    legacy_weights: bool,
}

fn load_config(cli: &Cli) -> Result<SegmenterConfig> {
    let mut config = match &cli.config {
        Some(path) => SegmenterConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => SegmenterConfig::default(),
    };

    if cli.legacy_weights {
        config.importance = ImportanceTable::legacy();
    }
    for weight in &cli.weights {
        config.importance.apply_override(weight)?;
    }
    if let Some(format) = cli.format {
        config.format = match format {
            FormatArg::Flat => OutputFormat::Flat,
            FormatArg::Hierarchical => OutputFormat::Hierarchical,
        };
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    log::debug!("Using configuration {:?}", config);

    let mut processor = DocumentProcessor::new(Segmenter::new(config));
    if let Some(encoding) = cli.encoding {
        let writer: Box<dyn SegmentWriter> = match encoding {
            EncodingArg::Csv => Box::new(CsvWriter),
            EncodingArg::Json => Box::new(JsonWriter),
        };
        processor = processor.with_writer(writer);
    }

    let reports = processor.process_path(cli.input.as_path(), cli.output_dir.as_path())?;
    let failed: Vec<_> = reports.iter().filter(|r| !r.is_ok()).collect();
    for report in &failed {
        eprintln!(
            "⚠️  {}: {}",
            report.source.display(),
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    if !failed.is_empty() {
        anyhow::bail!("{} of {} documents failed", failed.len(), reports.len());
    }
    Ok(())
}
