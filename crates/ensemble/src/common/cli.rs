use std::path::PathBuf;

use clap::Parser;

use rsets::{NumOfNodes, ProcCount, RsetCount, TaskRequest};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    /// Human readable output
    Cli,
    /// Machine readable JSON output
    Json,
}

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Enables more detailed log output
    #[arg(
        long,
        short,
        env = "ENSEMBLE_VERBOSE",
        global = true,
        help_heading("GLOBAL OPTIONS")
    )]
    pub verbose: bool,

    /// Sets output formatting
    #[arg(
        long,
        env = "ENSEMBLE_OUTPUT_MODE",
        default_value_t = OutputMode::Cli,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: OutputMode,
}

// Root CLI options
#[derive(Parser)]
#[command(
    author,
    about,
    version(crate::ENSEMBLE_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Assign a sequence of resource set requests on one cluster
    Schedule(ScheduleOpts),
    /// Assign resource sets to a single task and compute its launch layout
    Plan(PlanOpts),
}

#[derive(Parser)]
pub struct ScheduleOpts {
    /// Path to the cluster configuration (TOML)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Numbers of resource sets requested, assigned in order
    #[arg(required = true)]
    pub requests: Vec<RsetCount>,
}

#[derive(Parser)]
pub struct PlanOpts {
    /// Path to the cluster configuration (TOML)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Number of resource sets assigned to the task
    #[arg(long)]
    pub rsets: RsetCount,

    /// Total number of processes
    #[arg(long)]
    pub num_procs: Option<ProcCount>,

    /// Number of nodes
    #[arg(long)]
    pub num_nodes: Option<NumOfNodes>,

    /// Number of processes per node
    #[arg(long)]
    pub procs_per_node: Option<ProcCount>,

    /// Count logical (hyperthreaded) cores instead of physical ones
    #[arg(long)]
    pub hyperthreads: bool,

    /// Write a machinefile to this path instead of printing a hostlist
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub machinefile: Option<PathBuf>,
}

impl PlanOpts {
    pub fn task_request(&self) -> TaskRequest {
        TaskRequest {
            num_procs: self.num_procs,
            num_nodes: self.num_nodes,
            procs_per_node: self.procs_per_node,
        }
    }
}
