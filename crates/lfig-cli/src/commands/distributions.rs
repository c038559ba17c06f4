use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lfig_core::{load_yaml, DistributionConfig};
use lfig_metrics::{format_counts, format_summary, run_distributions};

use crate::write_json;

#[derive(Args, Debug)]
pub struct DistributionsArgs {
    /// JSON array of spatial mapping result records.
    pub input: PathBuf,
    /// Where the figure is written (default: the directory of INPUT).
    pub output: Option<PathBuf>,
    /// YAML file overriding the metric key, bound policy and figure size.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also write distribution_summary.json next to the figure.
    #[arg(long)]
    pub json: bool,
}

fn load_config(args: &DistributionsArgs) -> Result<DistributionConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_yaml::<DistributionConfig>(path)?,
        None => DistributionConfig::default(),
    };
    config.input = args.input.clone();
    if args.output.is_some() {
        config.output_dir = args.output.clone();
    }
    Ok(config)
}

pub fn run(args: &DistributionsArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let report = run_distributions(&config)?;

    println!(
        "Regenerating distribution plots from {} successful results ({} total)",
        report.successful, report.total_records
    );
    print!("{}", format_counts(&report.counts));
    println!("Saved: {}", report.figure.display());
    if let Some(bound) = &report.founder_bound {
        if let Some(outliers) = &bound.outliers {
            println!(
                "Founder separation axis clamped to [0, {:.3}]; {} values >= {}",
                bound.upper, outliers.count, outliers.threshold
            );
        }
    }
    println!();
    print!("{}", format_summary(&report.summaries));

    if args.json {
        let path = config.resolved_output_dir().join("distribution_summary.json");
        write_json(&path, &report)?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}
