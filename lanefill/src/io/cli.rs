use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Instance files to solve, solved concurrently
    #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
    pub input_files: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    /// Time limit per instance in seconds, the run is cancelled when it expires
    #[arg(short, long, value_name = "SECS")]
    pub time_limit: Option<u64>,
}
