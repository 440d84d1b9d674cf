use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use lanefill::config::LFConfig;
use lanefill::io;
use lanefill::io::cli::Cli;
use lanefill::io::output::Output;
use lanefill::opt::lanefill_opt::LaneFillOptimizer;
use lanefill::opt::monitor::TimeLimit;
use marker_core::io::export::export_solution;
use marker_core::io::import::Importer;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            LFConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed LFConfig: {config:?}");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let time_limit = args.time_limit.map(Duration::from_secs);

    args.input_files
        .par_iter()
        .map(|input_file| solve_file(input_file, &config, &args.solution_folder, time_limit))
        .collect::<Result<Vec<()>>>()?;

    Ok(())
}

fn solve_file(
    input_file: &Path,
    config: &LFConfig,
    output_folder: &Path,
    time_limit: Option<Duration>,
) -> Result<()> {
    let input_stem = input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", input_file.display()))?;

    let ext_instance = io::read_instance(input_file)?;
    let importer = Importer::new(config.lane_a_suffix.clone());
    let instance = importer.import_instance(&ext_instance)?;

    let mut monitor = TimeLimit::new(input_stem, time_limit);
    let start = Instant::now();
    let result = LaneFillOptimizer::new(instance, config.clone())?.solve(&mut monitor);
    let run_time_ms = start.elapsed().as_millis() as u64;

    let output = Output {
        instance: ext_instance,
        solution: export_solution(&result, run_time_ms),
        config: config.clone(),
    };

    let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)
}
