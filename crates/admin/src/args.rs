use std::path::PathBuf;

use clap::Parser;

use fitstock_observability::LogFormat;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "fitstock-admin")]
#[command(about = "Interactive inventory administration console", long_about = None)]
pub struct Cli {
    /// Simulated fetch latency for the built-in catalogue, in milliseconds
    #[arg(long, value_name = "MS")]
    pub load_delay_ms: Option<u64>,

    /// Load the initial catalogue from a JSON file instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub seed_file: Option<PathBuf>,

    /// Log output format (text or json)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Simulate a failed initial fetch
    #[arg(long)]
    pub fail_load: bool,
}
