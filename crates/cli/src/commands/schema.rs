//! Classifier schema inspection

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use super::load_artifacts;
use crate::output::{print_info, print_json, print_table, OutputFormat};

#[derive(Tabled, Serialize)]
struct ColumnRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Column")]
    column: String,
}

#[derive(Serialize)]
struct SchemaOutput<'a> {
    artifact_dir: String,
    complete: bool,
    expected_columns: &'a [String],
}

/// Show the columns, in order, that feature rows are aligned to
pub fn show_schema(artifact_dir: &Path, format: OutputFormat) -> Result<()> {
    let artifacts = load_artifacts(artifact_dir);
    let columns = artifacts.expected_columns();

    match format {
        OutputFormat::Json => print_json(&SchemaOutput {
            artifact_dir: artifact_dir.display().to_string(),
            complete: artifacts.is_complete(),
            expected_columns: columns,
        })?,
        OutputFormat::Table => {
            println!("{}", "Classifier Schema".bold());
            println!("{}", "=".repeat(50));
            println!("Artifact directory:     {}", artifact_dir.display().to_string().cyan());
            println!("Artifacts loaded:       {}/3", artifacts.loaded_count());
            println!();

            if columns.is_empty() {
                print_info("No classifier loaded; no columns to show");
                return Ok(());
            }
            let rows: Vec<ColumnRow> = columns
                .iter()
                .enumerate()
                .map(|(index, column)| ColumnRow {
                    index,
                    column: column.clone(),
                })
                .collect();
            print_table(&rows, format)?;
        }
    }

    Ok(())
}
