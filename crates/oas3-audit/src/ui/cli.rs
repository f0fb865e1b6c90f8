use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-audit")]
#[command(author, version, about = "Static analysis and security audit for OpenAPI specifications")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Run every analyzer over a specification and report the findings
  Audit(AuditCommand),
  /// Assess the impact of changing one component schema
  BlastRadius(BlastRadiusCommand),
  /// List information from the OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug)]
pub struct AuditCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Write the full report as JSON to this path instead of printing tables
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Jaccard index above which schemas are clustered as near-duplicates
  #[arg(long, value_name = "RATIO", default_value_t = 0.8)]
  pub similarity_threshold: f64,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (findings only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct BlastRadiusCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Name of the component schema to assess
  #[arg(short, long, value_name = "NAME")]
  pub schema: String,

  /// Print the report as JSON instead of a table
  #[arg(long, default_value_t = false)]
  pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations with their declared security posture
  Operations {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
