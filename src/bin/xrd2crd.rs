//! xrd2crd - Generate a CRD from a composite resource definition.
//!
//! Reads the top-level definition, merges every definition file found in its
//! directory and writes the resulting CRD as YAML or JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use xrd_crd_gen::{
    for_composite_resource_with_options, CompositeResourceDefinition, ConvertOptions, ErrorMode,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "xrd2crd", version, about)]
struct Cli {
    /// Path to the top-level composite resource definition.
    definition: PathBuf,

    /// Directory of definition files, overriding spec.directory.
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Output location. Use '-' for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Process files in directory listing order instead of by name.
    #[arg(long)]
    unsorted: bool,

    /// Report every failing file instead of stopping at the first.
    #[arg(long)]
    collect_errors: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let content = fs::read_to_string(&cli.definition)
        .with_context(|| format!("failed to read definition {}", cli.definition.display()))?;
    let mut xrd = CompositeResourceDefinition::from_yaml(&content)
        .with_context(|| format!("failed to parse definition {}", cli.definition.display()))?;
    if let Some(dir) = cli.directory {
        xrd.spec.directory = Some(dir);
    }

    let opts = ConvertOptions::new()
        .with_sort_entries(!cli.unsorted)
        .with_error_mode(if cli.collect_errors {
            ErrorMode::CollectAll
        } else {
            ErrorMode::FailFast
        });
    let crd = for_composite_resource_with_options(&xrd, &opts)?;

    let rendered = match cli.format {
        Format::Yaml => crd.to_yaml()?,
        Format::Json => crd.to_json()? + "\n",
    };

    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .with_context(|| format!("failed to create output file {}", cli.output))?,
        )
    };
    output.write_all(rendered.as_bytes())?;
    output.flush()?;

    Ok(())
}
