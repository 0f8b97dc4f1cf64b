use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat { Text, Json, Jsonl }

#[derive(Debug, Serialize)]
pub struct ExistsRow<'a> {
    pub name: &'a str,
    pub exists: bool,
}

#[derive(Debug, Serialize)]
struct NameRow<'a> {
    name: &'a str,
}

pub fn render_exists(rows: &[ExistsRow<'_>], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for r in rows {
                writeln!(out, "{}\t{}", r.name, if r.exists { "yes" } else { "no" })?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(rows)?)?;
        }
        OutputFormat::Jsonl => {
            for r in rows {
                writeln!(out, "{}", serde_json::to_string(r)?)?;
            }
        }
    }
    Ok(out)
}

pub fn render_names(names: &[&str], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for n in names {
                writeln!(out, "{n}")?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(names)?)?;
        }
        OutputFormat::Jsonl => {
            for n in names {
                writeln!(out, "{}", serde_json::to_string(&NameRow { name: n })?)?;
            }
        }
    }
    Ok(out)
}
