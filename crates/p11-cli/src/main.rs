mod config;

use std::{
    borrow::Cow,
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use p11_core::{AttributeEntry, AttributeId, AttributeTable, NOT_FOUND};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{CliConfig, OutputFormat, VendorAttribute};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PKCS#11 attribute name tooling",
    propagate_version = true
)]
struct Cli {
    /// Configuration file (TOML) with output defaults and vendor attributes.
    #[arg(long, env = "P11_CLI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// How attribute codes are printed. Overrides the config file.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve attribute names (case-insensitive) to their numeric codes.
    Resolve {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
        /// Emit a JSON array instead of tab-separated lines.
        #[arg(long)]
        json: bool,
        /// Exit successfully even when some names are not recognized.
        #[arg(long)]
        allow_unknown: bool,
    },
    /// List known attributes in table order.
    List {
        /// Only show names containing this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
        /// Emit the matching entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate the active attribute table, including vendor attributes.
    Check,
}

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    name: &'a str,
    code: AttributeId,
    found: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.format);
    let vendor_count = config.vendor_attributes.len();
    let table = build_table(config.vendor_attributes)?;

    let status = match &cli.command {
        Commands::Resolve {
            names,
            json,
            allow_unknown,
        } => resolve_names(&table, names, format, *json, *allow_unknown)?,
        Commands::List { filter, json } => {
            list_attributes(&table, filter.as_deref(), format, *json)?;
            ExitCode::SUCCESS
        }
        Commands::Check => {
            table
                .validate()
                .context("attribute table failed validation")?;
            println!(
                "attribute table OK: {} entries ({} vendor-defined)",
                table.len(),
                vendor_count
            );
            ExitCode::SUCCESS
        }
    };
    Ok(status)
}

fn build_table(vendor: Vec<VendorAttribute>) -> anyhow::Result<Cow<'static, AttributeTable>> {
    if vendor.is_empty() {
        return Ok(Cow::Borrowed(AttributeTable::builtin()));
    }
    let count = vendor.len();
    let table = AttributeTable::with_extensions(vendor.into_iter().map(Into::into))
        .context("merging vendor attributes into the built-in table")?;
    info!(vendor = count, total = table.len(), "using extended attribute table");
    Ok(Cow::Owned(table))
}

fn resolve_names(
    table: &AttributeTable,
    names: &[String],
    format: OutputFormat,
    json: bool,
    allow_unknown: bool,
) -> anyhow::Result<ExitCode> {
    let results: Vec<Resolution<'_>> = names
        .iter()
        .map(|name| {
            let code = table.resolve(name);
            Resolution {
                name: name.as_str(),
                code,
                found: code != NOT_FOUND,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}\t{}", result.name, format.render(result.code));
        }
    }

    let unknown: Vec<&str> = results
        .iter()
        .filter(|result| !result.found)
        .map(|result| result.name)
        .collect();
    if unknown.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    debug!(names = ?unknown, "unrecognized attribute names");
    if allow_unknown {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("unknown attribute name(s): {}", unknown.join(", "));
        Ok(ExitCode::FAILURE)
    }
}

fn list_attributes(
    table: &AttributeTable,
    filter: Option<&str>,
    format: OutputFormat,
    json: bool,
) -> anyhow::Result<()> {
    let needle = filter.map(str::to_ascii_lowercase);
    let rows: Vec<&AttributeEntry> = table
        .iter()
        .filter(|entry| {
            needle
                .as_deref()
                .map_or(true, |needle| entry.name().to_ascii_lowercase().contains(needle))
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No attributes match {}", filter.unwrap_or_default());
        return Ok(());
    }

    let mut output = Table::new();
    output.load_preset(UTF8_FULL);
    output.set_header(vec!["Name", "Code"]);
    for entry in rows {
        output.add_row(vec![entry.name().to_string(), format.render(entry.code())]);
    }
    println!("{output}");
    Ok(())
}
