//! Rowscope CLI
//!
//! Inspect a table store snapshot: list tables, compare declared column
//! types with what the rows actually hold, browse rows, and try out the
//! insert form a table's schema produces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rowscope_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "rowscope", about = "Schema introspection for table store snapshots")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Config file (default: $ROWSCOPE_HOME/config.toml)
    #[arg(long, global = true, env = "ROWSCOPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tables, internal ones grouped apart
    Tables {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show declared and observed column types of a table
    Describe {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Table name
        table: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse a table's rows
    Rows {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Table name
        table: String,

        /// Keep rows where any cell contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the insert form derived from a table's columns
    Fields {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Table name
        table: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse form input into the row an insert would write
    Insert {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Table name
        table: String,

        /// Field value as COLUMN=VALUE (repeatable)
        #[arg(long = "set", value_name = "COLUMN=VALUE")]
        set: Vec<String>,

        /// Tick a checkbox field (repeatable)
        #[arg(long = "check", value_name = "COLUMN")]
        check: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Tables { json, .. } => *json,
        Commands::Describe { json, .. } => *json,
        Commands::Rows { json, .. } => *json,
        Commands::Fields { json, .. } => *json,
        Commands::Insert { json, .. } => *json,
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let config = cli::config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Tables { snapshot, json } => {
            cli::tables::run(cli::tables::TablesArgs { snapshot, json }, &config)
        }

        Commands::Describe {
            snapshot,
            table,
            json,
        } => cli::describe::run(cli::describe::DescribeArgs {
            snapshot,
            table,
            json,
        }),

        Commands::Rows {
            snapshot,
            table,
            search,
            page,
            page_size,
            json,
        } => cli::rows::run(
            cli::rows::RowsArgs {
                snapshot,
                table,
                search,
                page,
                page_size,
                json,
            },
            &config,
        ),

        Commands::Fields {
            snapshot,
            table,
            json,
        } => cli::fields::run(
            cli::fields::FieldsArgs {
                snapshot,
                table,
                json,
            },
            &config,
        ),

        Commands::Insert {
            snapshot,
            table,
            set,
            check,
            json,
        } => cli::insert::run(
            cli::insert::InsertArgs {
                snapshot,
                table,
                set,
                check,
                json,
            },
            &config,
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = command_wants_json(&cli.command);

    if let Err(err) = init_logging(LogConfig {
        app_name: "rowscope",
        verbose: cli.verbose,
    }) {
        eprintln!("Warning: failed to initialize logging: {:#}", err);
    }

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
