use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lfig_core::{load_yaml, CombineConfig};
use lfig_pair::run_combine;

use crate::write_json;

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Presentation directory holding the tree and spatial mapping folders.
    pub input: PathBuf,
    /// Where combined figures are written (default: <INPUT>/combined_figures).
    pub output: Option<PathBuf>,
    /// YAML file overriding folder names, prefixes and layout.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also write combine_summary.json into the output directory.
    #[arg(long)]
    pub json: bool,
}

fn load_config(args: &CombineArgs) -> Result<CombineConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_yaml::<CombineConfig>(path)?,
        None => CombineConfig::default(),
    };
    config.input_dir = args.input.clone();
    if args.output.is_some() {
        config.output_dir = args.output.clone();
    }
    Ok(config)
}

pub fn run(args: &CombineArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let summary = run_combine(&config)?;

    if summary.primaries == 0 {
        println!("No coalescent tree images found");
        return Ok(());
    }
    println!("Found {} coalescent tree images", summary.primaries);
    for path in &summary.combined {
        println!("Saved: {}", path.display());
    }
    for id in &summary.unmatched {
        println!("No spatial mapping found for patient {id}");
    }
    for failed in &summary.failed {
        println!("Failed to combine patient {}: {}", failed.id, failed.error);
    }
    println!(
        "Combined {} of {} figures into {}",
        summary.combined.len(),
        summary.primaries,
        summary.output_dir.display()
    );
    println!("Total combined figures: {}", summary.total_outputs);

    if args.json {
        let path = summary.output_dir.join("combine_summary.json");
        write_json(&path, &summary)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
