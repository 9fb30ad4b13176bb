// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Kintree CLI - kinship classifier and record keeper for your family tree

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kintree::commands;

#[derive(Parser)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Data directory override
    #[arg(long, env = "KINTREE_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage person records
    Person {
        /// Action: add, remove, list, show
        action: String,

        /// Person name or ID (for remove/show; "First Last" shortcut for add)
        name: Option<String>,

        /// Given name
        #[arg(long)]
        first: Option<String>,

        /// Family name
        #[arg(long)]
        last: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        born: Option<String>,

        /// Tags to attach
        #[arg(long)]
        tag: Vec<String>,
    },

    /// Manage relationships between people
    Relate {
        /// Action: add, remove, list
        action: String,

        /// First endpoint (the parent for --rel parent)
        #[arg(long)]
        from: Option<String>,

        /// Second endpoint (the child for --rel parent)
        #[arg(long)]
        to: Option<String>,

        /// Relationship kind (parent, spouse)
        #[arg(long, default_value = "parent")]
        rel: String,
    },

    /// Classify how a candidate relates to a target person
    Classify {
        /// Target person (name or ID)
        target: String,

        /// Candidate person (name or ID)
        candidate: String,
    },

    /// Show the chronological timeline of a person's relatives
    Timeline {
        /// Target person (name or ID)
        target: String,

        /// Order by generation before date instead of date only
        #[arg(long)]
        group: bool,

        /// Show only relatives with this label (e.g. sibling, aunt/uncle)
        #[arg(long)]
        only: Option<String>,
    },

    /// Import a family store snapshot from a JSON file
    Import {
        /// Path to the JSON file
        file: std::path::PathBuf,
    },

    /// Export the family tree to various formats
    Export {
        /// Output format (dot, json, toml)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Audit the record data for inconsistencies
    Check,

    /// Get configuration values
    Config {
        /// Configuration key (data_dir, cache_dir, log_level)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    if let Some(dir) = &cli.data_dir {
        std::env::set_var("KINTREE_DATA_DIR", dir);
    }

    // Execute command
    match cli.command {
        Commands::Person {
            action,
            name,
            first,
            last,
            born,
            tag,
        } => commands::person::run(&action, name, first, last, born, tag),
        Commands::Relate {
            action,
            from,
            to,
            rel,
        } => commands::relate::run(&action, from, to, &rel),
        Commands::Classify { target, candidate } => {
            commands::classify::run(&target, &candidate, cli.json)
        }
        Commands::Timeline {
            target,
            group,
            only,
        } => commands::timeline::run(&target, group, only, cli.json),
        Commands::Import { file } => commands::import::run(&file),
        Commands::Export { format, output } => commands::export::run(&format, output),
        Commands::Check => commands::check::run(),
        Commands::Config { key } => commands::config::run(key.as_deref()),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
