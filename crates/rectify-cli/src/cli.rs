use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "rectify - Relaxes DNA-origami scaffold routings by settling rigid helices and searching per-helix base counts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relax a routed scene and write the best configuration found.
    Relax(RelaxArgs),
    /// Print the helices and strain of a scene as built, without relaxing it.
    Inspect(InspectArgs),
}

/// Arguments for the `relax` subcommand.
#[derive(Args, Debug)]
pub struct RelaxArgs {
    // --- Core Arguments ---
    /// Path to the input scene file (v/e/h records).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the relaxed output scene.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// TOML file with helix constants (pitch, step, radius, ...), overriding the config file.
    #[arg(long, value_name = "PATH")]
    pub helix_params: Option<PathBuf>,

    /// Write every optimization trial to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    // --- Optimization Overrides ---
    /// Search strategy: gradient-descent, simulated-annealing or rectify.
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    /// Seed for the random number generator. A random seed is drawn and logged when omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Lower bound for every trial base count.
    #[arg(long, value_name = "INT")]
    pub min_base_count: Option<u32>,

    /// Maximum number of gradient-descent passes.
    #[arg(long, value_name = "INT")]
    pub max_passes: Option<usize>,

    /// Number of simulated-annealing steps.
    #[arg(long, value_name = "INT")]
    pub kmax: Option<usize>,

    /// Stop annealing once the total separation (nm) is at or below this value.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub emax: Option<f64>,

    /// Largest distance (in bases) from the initial count an annealing step may try.
    #[arg(long, value_name = "INT")]
    pub base_range: Option<u32>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S simulated-annealing.kmax=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the scene file to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// TOML file with helix constants.
    #[arg(long, value_name = "PATH")]
    pub helix_params: Option<PathBuf>,

    /// List every helix with its base count and connections.
    #[arg(long)]
    pub helices: bool,
}
