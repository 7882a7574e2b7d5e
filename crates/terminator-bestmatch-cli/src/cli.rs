use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bestmatch")]
#[command(about = "Resolve friendly control names against window snapshots")]
#[command(
    long_about = "Loads a JSON snapshot of a window's accessibility tree and lets you inspect its controls, list the names each control can be reached by, and check which control a friendly name resolves to."
)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dump the attributes and control identifiers of every element
    Inspect(InspectArgs),
    /// Resolve one or more names to elements
    Resolve(ResolveArgs),
    /// List every element with the names that reach it
    Candidates(SnapshotArgs),
    /// Follow a relative path such as "lblNewItem.Edit"
    Relative(RelativeArgs),
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Path to the JSON snapshot of the window
    pub snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// JSON file with matcher settings, e.g. {"cutoff": 0.6}
    #[clap(long, env = "BESTMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum similarity for a fuzzy match (0.0 - 1.0), overrides --config
    #[clap(long, env = "BESTMATCH_CUTOFF")]
    pub cutoff: Option<f64>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Write the report to this file instead of stdout
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Names to resolve, e.g. "lblNewItemEdit" "Button_Minimize"
    #[clap(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Args, Debug)]
pub struct RelativeArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Dotted path: a name followed by control types of following siblings
    pub path: String,

    #[command(flatten)]
    pub matching: MatchArgs,
}
