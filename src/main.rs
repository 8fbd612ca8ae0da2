//! Wind Hierarchy - Entry Point
//!
//! Reads one or more tree exports, classifies their bones by branch level
//! and writes a wind hierarchy JSON file per tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wind_hierarchy::core::HierarchyConfig;
use wind_hierarchy::emit::preview;
use wind_hierarchy::extract::describe_index;
use wind_hierarchy::pipeline::{default_output_path, run_batch, BatchItem, PipelineOutcome};

/// Generate wind simulation hierarchies from tree exports
#[derive(Parser, Debug)]
#[command(name = "wind-hierarchy")]
#[command(about = "Classify tree export bones by branch level and write wind hierarchy JSON")]
struct Args {
    /// Tree export XML files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (only valid with a single input)
    #[arg(long, short = 'o', conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory for output files (default: next to each input)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Hierarchy config TOML (default: built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the per-level object listing and a hierarchy preview
    #[arg(long)]
    preview: bool,

    /// Print the JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging of classification decisions
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wind_hierarchy={}", default_level).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.output.is_some() && args.inputs.len() > 1 {
        eprintln!("--output can only be used with a single input; use --output-dir instead");
        return ExitCode::FAILURE;
    }

    let config = match &args.config {
        Some(path) => match HierarchyConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => HierarchyConfig::default(),
    };

    let results = run_batch(&args.inputs, &config);

    let mut failed = false;
    for item in &results {
        if let Err(e) = report(item, &args, &config) {
            tracing::error!("Error writing output for {:?}: {}", item.path, e);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report(item: &BatchItem, args: &Args, config: &HierarchyConfig) -> wind_hierarchy::Result<()> {
    let run = &item.run;

    if args.preview {
        println!("=== {} ===", item.path.display());
        print!("{}", describe_index(&run.index));
        println!();
        println!("Bone ID Level Assignments:");
        for (bone_id, level) in &run.classification.assignment {
            println!("  Bone ID {}: Level {}", bone_id, level);
        }
        println!();
        print!("{}", preview(&run.classification.assignment, config));
        println!();
    }

    let doc = match &run.outcome {
        PipelineOutcome::Generated(doc) => doc,
        PipelineOutcome::NothingGenerated => {
            tracing::warn!("{:?}: no bones assigned, nothing generated", item.path);
            return Ok(());
        }
    };

    if args.stdout {
        println!("{}", doc.to_json()?);
    } else {
        if let Some(dir) = &args.output_dir {
            std::fs::create_dir_all(dir)?;
        }
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&item.path, args.output_dir.as_deref()));
        doc.write_to(&output)?;
    }

    for line in doc.summary().lines() {
        tracing::info!("{}", line);
    }

    Ok(())
}
