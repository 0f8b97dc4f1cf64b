use anyhow::{anyhow, Context, Result};
use catalog_sqlite::Connection;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::Config;
use output::{ExistsRow, OutputFormat};

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Parser)]
#[command(name = "tablecheck", version, about = "Check whether tables or views exist in a SQLite database")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./tablecheck.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file to inspect (opened read-only)
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Attach another database as ALIAS=FILE; repeatable
    #[arg(long, global = true, value_name = "ALIAS=FILE", value_parser = parse_attach)]
    attach: Vec<(String, PathBuf)>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Check one or more names; exits 1 if any is missing
    Exists {
        /// Table or view names (case-insensitive)
        #[arg(required = true)]
        names: Vec<String>,
        /// Output format: text, json, or jsonl
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List every table and view name, lowercased and sorted
    List {
        /// Output format: text, json, or jsonl
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn parse_attach(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((alias, file)) if !alias.is_empty() && !file.is_empty() => {
            Ok((alias.to_string(), PathBuf::from(file)))
        }
        _ => Err(format!("expected ALIAS=FILE, got `{s}`")),
    }
}

fn resolve_format(flag: Option<OutputFormat>, cfg: &Config) -> Result<OutputFormat> {
    if let Some(f) = flag {
        return Ok(f);
    }
    match cfg.format.as_deref() {
        Some(s) => OutputFormat::from_str(s, true).map_err(|e| anyhow!("config format: {e}")),
        None => Ok(OutputFormat::Text),
    }
}

fn connect(db: Option<PathBuf>, attach: Vec<(String, PathBuf)>, cfg: &Config) -> Result<Connection> {
    let db = db
        .or_else(|| cfg.db.clone())
        .context("no database given; pass --db or set `db` in the config")?;
    let busy = Duration::from_millis(cfg.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS));
    let conn = catalog_sqlite::open_read_only(&db, busy)?;
    // flag aliases replace config aliases of the same name
    let mut schemas: BTreeMap<String, PathBuf> = cfg.attach.clone();
    schemas.extend(attach);
    for (alias, file) in &schemas {
        catalog_sqlite::attach(&conn, file, alias)?;
    }
    Ok(conn)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let Cli { config: config_path, db, attach, command } = cli;
    let cfg = config::load_config(config_path.as_deref())?.unwrap_or_default();
    match command {
        Commands::Version => {
            println!("tablecheck {} (core {})", env!("CARGO_PKG_VERSION"), tablecheck_core::version());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Exists { names, format } => {
            let format = resolve_format(format, &cfg)?;
            let conn = connect(db, attach, &cfg)?;
            let mut rows = Vec::with_capacity(names.len());
            for name in &names {
                let exists = catalog_sqlite::table_exists(&conn, name)
                    .with_context(|| format!("checking `{name}`"))?;
                debug!(name = %name, exists, "checked");
                rows.push(ExistsRow { name, exists });
            }
            print!("{}", output::render_exists(&rows, format)?);
            Ok(if rows.iter().all(|r| r.exists) { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
        Commands::List { format } => {
            let format = resolve_format(format, &cfg)?;
            let conn = connect(db, attach, &cfg)?;
            let names = catalog_sqlite::table_names(&conn).context("listing catalog")?;
            print!("{}", output::render_names(&names.sorted(), format)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
