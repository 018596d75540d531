use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rk", version, about = "Inspect a repokit database")]
pub struct Cli {
    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug logs, including every statement sent to the database.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file to open instead of the configured one.
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count rows matching the filters.
    Count(FilterArgs),
    /// Print matching rows as JSON lines.
    Select(SelectArgs),
    /// Delete matching rows.
    Delete(FilterArgs),
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Table to operate on.
    pub table: String,

    /// Equality filter `column=value`; repeatable, all must match.
    #[arg(long = "eq", value_name = "COLUMN=VALUE")]
    pub eq: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of rows.
    #[arg(long)]
    pub limit: Option<u64>,

    /// Sort column, optionally suffixed with `:desc`.
    #[arg(long, value_name = "COLUMN[:desc]")]
    pub order: Option<String>,
}
