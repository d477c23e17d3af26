use clap::Parser;
use std::path::PathBuf;

/// Conductor - multi-agent chat orchestration service
#[derive(Parser, Debug, Clone)]
#[command(name = "conductor", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "CONDUCTOR_CONFIG", default_value = "conductor.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "CONDUCTOR_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "CONDUCTOR_PORT")]
    pub port: Option<u16>,

    /// Delay between independent agent steps in milliseconds
    #[arg(long, env = "CONDUCTOR_STEP_DELAY_MS")]
    pub step_delay_ms: Option<u64>,
}
