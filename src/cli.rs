use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::preview::PREVIEW_ROWS;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Filter a billing CSV down to the required columns, trim ICD10 codes and sort by date of service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clean one file and save the filtered CSV
    Clean(CleanArgs),
    /// Clean one file and print the first rows without saving
    Preview(PreviewArgs),
    /// Clean every file matching a glob pattern
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Billing CSV to clean
    pub input: Option<PathBuf>,

    /// Directory for `Filtered_<name>.csv`, ignored when `--output` is given
    #[arg(long, env = "BILLCLEAN_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Explicit destination file, overrides the default export name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a preview of the cleaned rows before saving
    #[arg(long)]
    pub preview: bool,

    #[arg(long, default_value_t = PREVIEW_ROWS)]
    pub preview_rows: usize,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Billing CSV to clean
    pub input: Option<PathBuf>,

    /// Number of rows to show
    #[arg(short, long, default_value_t = PREVIEW_ROWS)]
    pub rows: usize,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Glob pattern, e.g. "uploads/*.csv"
    pub pattern: String,

    #[arg(long, env = "BILLCLEAN_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,
}
