use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for staffledger
/// Browse the employee snapshot and file change requests for reconciliation
#[derive(Parser)]
#[command(
    name = "staffledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee list viewer and change-request ledger backed by a version-controlled JSON store",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a local directory as store (overrides the configured backend)
    #[arg(global = true, long = "store", value_name = "DIR")]
    pub store: Option<String>,

    /// Access passphrase, when one is configured
    #[arg(global = true, long = "passphrase")]
    pub passphrase: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file
    Init {
        /// Configure the filesystem backend rooted at DIR
        #[arg(long = "store-dir", value_name = "DIR")]
        store_dir: Option<String>,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration (secrets redacted)")]
        print_config: bool,
    },

    /// List employees from the current snapshot
    List {
        #[arg(long = "refresh", help = "Bypass the snapshot cache")]
        refresh: bool,

        #[arg(
            long = "watch",
            value_name = "SECS",
            help = "Keep listing, refreshing every SECS seconds (Ctrl-C to stop)"
        )]
        watch: Option<u64>,

        #[arg(long = "title", help = "Only employees whose title contains this text")]
        title: Option<String>,
    },

    /// List change requests waiting for reconciliation
    Pending,

    /// Request a new employee
    Add {
        #[arg(long = "id", help = "Employee id (must be unused)")]
        id: i64,

        #[arg(long = "name", help = "Full name")]
        name: String,

        #[arg(long = "title", help = "Job title")]
        title: String,
    },

    /// Request changes to an existing employee
    Edit {
        #[arg(long = "id")]
        id: i64,

        #[arg(long = "name", help = "New full name")]
        name: Option<String>,

        #[arg(long = "title", help = "New job title")]
        title: Option<String>,
    },

    /// Request removal of an employee
    Del {
        #[arg(long = "id")]
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Tell whether an employee id is free for a new insert
    CheckId { id: i64 },

    /// Export the employee snapshot
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: employees_YYYYMMDD.<ext>)")]
        file: Option<PathBuf>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the local audit log
    Log,
}

impl Commands {
    /// Commands that work without passing the access gate.
    pub fn is_ungated(&self) -> bool {
        matches!(self, Commands::Init { .. } | Commands::Config { .. })
    }
}
