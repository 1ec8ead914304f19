//! Command-line front end for the hierarchy engine.
//!
//! Reads a JSON record document, runs one transformation or query, and writes
//! the JSON result. Field names and the root value come from `hierarchy.toml`
//! and can be overridden per invocation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use hierarchy::command::{Operation, error_exit_code, execute, parse_identifier};
use hierarchy::io::config::{DEFAULT_CONFIG_FILE, HierarchyConfig, load_config, write_config};
use hierarchy::io::records::{load_records, write_json};
use hierarchy::{Hierarchy, TreeOptions, exit_codes, logging};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "hierarchy",
    version,
    about = "Convert parent-linked records between flat and tree form"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Config file (defaults to `hierarchy.toml` if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Input JSON document, `-` for stdin.
    #[arg(short, long, global = true, default_value = "-")]
    input: PathBuf,

    /// Output file, stdout when omitted.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Identifier field name.
    #[arg(long, global = true)]
    id_field: Option<String>,

    /// Parent identifier field name.
    #[arg(long, global = true)]
    parent_field: Option<String>,

    /// Children field name.
    #[arg(long, global = true)]
    children_field: Option<String>,

    /// Level field name written by `flat`.
    #[arg(long, global = true)]
    level_field: Option<String>,

    /// Parent value marking top-level records (parsed as JSON when possible).
    #[arg(long, global = true)]
    root: Option<String>,

    /// Disable the visited-identifier guard. Cyclic input will not terminate.
    #[arg(long, global = true)]
    no_cycle_guard: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Nest a flat collection into a tree.
    Tree,
    /// Flatten a tree into a pre-order collection with depth levels.
    Flat {
        /// Level assigned to top-level nodes.
        #[arg(long, default_value_t = 0)]
        start_level: usize,
    },
    /// List the ancestors of a record, top-level first.
    Ancestors { id: String },
    /// List the descendants of a record in pre-order.
    Descendants { id: String },
    /// Print the identifier path from the top-level ancestor to a record.
    Path {
        id: String,
        /// Leave the record itself off the end of the path.
        #[arg(long)]
        exclude_self: bool,
    },
    /// Print the record path from the top-level ancestor to a record.
    PathNodes {
        id: String,
        /// Leave the record itself off the end of the path.
        #[arg(long)]
        exclude_self: bool,
    },
    /// Write a config file with default settings.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let operation = match cli.command {
        Command::InitConfig { force } => return cmd_init_config(&cli.global, force),
        Command::Tree => Operation::Tree,
        Command::Flat { start_level } => Operation::Flat { start_level },
        Command::Ancestors { id } => Operation::Ancestors {
            id: parse_identifier(&id),
        },
        Command::Descendants { id } => Operation::Descendants {
            id: parse_identifier(&id),
        },
        Command::Path { id, exclude_self } => Operation::PathIds {
            id: parse_identifier(&id),
            include_self: !exclude_self,
        },
        Command::PathNodes { id, exclude_self } => Operation::PathNodes {
            id: parse_identifier(&id),
            include_self: !exclude_self,
        },
    };

    let options = resolve_options(&cli.global)?;
    let records = load_records(&cli.global.input)?;
    let engine = Hierarchy::new(options);
    match execute(&engine, &records, &operation) {
        Ok(outcome) => {
            write_json(cli.global.output.as_deref(), &outcome.document)?;
            Ok(outcome.exit_code)
        }
        Err(err) => {
            eprintln!("{}", err);
            Ok(error_exit_code(&err))
        }
    }
}

fn cmd_init_config(global: &GlobalArgs, force: bool) -> Result<i32> {
    let path = config_path(global);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(&path, &HierarchyConfig::default())?;
    Ok(exit_codes::OK)
}

fn config_path(global: &GlobalArgs) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Merge config file settings with command-line overrides.
fn resolve_options(global: &GlobalArgs) -> Result<TreeOptions<Value>> {
    let path = config_path(global);
    if global.config.is_some() && !path.exists() {
        bail!("config file {} not found", path.display());
    }
    let mut cfg = load_config(&path)?;
    if let Some(name) = &global.id_field {
        cfg.fields.id = name.clone();
    }
    if let Some(name) = &global.parent_field {
        cfg.fields.parent = name.clone();
    }
    if let Some(name) = &global.children_field {
        cfg.fields.children = name.clone();
    }
    if let Some(name) = &global.level_field {
        cfg.fields.level = name.clone();
    }
    if global.no_cycle_guard {
        cfg.cycle_guard = false;
    }

    let mut options = cfg.to_options().context("resolve hierarchy options")?;
    if let Some(raw) = &global.root {
        options = options.with_root(parse_identifier(raw));
    }
    Ok(options)
}
