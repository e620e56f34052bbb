mod input;
mod logging;
mod model;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;

use crate::input::{LookupPolicy, load_comparisons, load_parameter_scan, resolve_parameter_scan};
use crate::model::Unit;
use crate::pipeline::stage1_pairwise::run_stage1;
use crate::pipeline::stage2_scan::run_stage2;
use crate::pipeline::stage3_render::{FigureOptions, render_pairwise, render_scan};
use crate::pipeline::stage4_summary::{build_summary, write_summary};

#[derive(Debug, Parser)]
#[command(
    name = "stim-paperplots",
    version,
    about = "Render the pairwise-error and parameter-scan figures from comparison CSV files."
)]
struct Cli {
    /// Directory holding compare-<A>-<B>.csv and comparison-parameter-scan.csv.
    #[arg(long, default_value = ".")]
    input: PathBuf,

    /// Directory receiving pairwise_error.pdf and parameter_scan.pdf.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Only accept compare-<reference>-<other>.csv, never the reversed name.
    #[arg(long)]
    strict_names: bool,

    /// Unit printed on the y axes.
    #[arg(long, value_enum, default_value_t = Unit::Micrometers)]
    unit: Unit,

    /// Also write the figures as SVG next to the PDFs.
    #[arg(long)]
    svg: bool,

    /// Write a JSON summary of the plotted data.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Debug logging, overriding RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    input_dir: PathBuf,
    out_dir: PathBuf,
    lookup: LookupPolicy,
    unit: Unit,
    keep_svg: bool,
    summary_path: Option<PathBuf>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            input_dir: cli.input,
            out_dir: cli.out,
            lookup: if cli.strict_names {
                LookupPolicy::Strict
            } else {
                LookupPolicy::ReversedFallback
            },
            unit: cli.unit,
            keep_svg: cli.svg,
            summary_path: cli.summary,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(RunConfig::from(cli)) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: RunConfig) -> Result<(), String> {
    tracing::info!(
        "input={} out={} lookup={:?} unit={:?}",
        config.input_dir.display(),
        config.out_dir.display(),
        config.lookup,
        config.unit
    );

    let figure_options = FigureOptions {
        unit: config.unit,
        keep_svg: config.keep_svg,
    };

    let records = load_comparisons(&config.input_dir, config.lookup).map_err(|e| e.to_string())?;
    let box_layout = run_stage1(&records).map_err(|e| e.to_string())?;
    let mut figures = render_pairwise(&box_layout, figure_options, &config.out_dir)
        .map_err(|e| e.to_string())?;

    let scan_path = resolve_parameter_scan(&config.input_dir).map_err(|e| e.to_string())?;
    let rows = load_parameter_scan(&scan_path).map_err(|e| e.to_string())?;
    let line_layout = run_stage2(&rows);
    figures.extend(
        render_scan(&line_layout, figure_options, &config.out_dir).map_err(|e| e.to_string())?,
    );

    if let Some(path) = &config.summary_path {
        let summary = build_summary(
            &box_layout,
            &line_layout,
            config.unit,
            config.lookup,
            &figures,
        );
        write_summary(&summary, path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
