//! Vocabulary listings

use anyhow::Result;
use classifier_lib::{
    vocab::{TYPE_COLORS, UNKNOWN_COLOR},
    UNKNOWN_LABEL,
};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use super::load_artifacts;
use crate::output::{print_table, type_badge, OutputFormat};

#[derive(Tabled, Serialize)]
struct AbilityRow {
    #[tabled(rename = "Ability")]
    ability: String,
}

#[derive(Tabled, Serialize)]
struct TypeRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "label")]
    badge: String,
    #[tabled(rename = "Color")]
    color: &'static str,
}

/// List the abilities offered by the form
pub fn list_abilities(artifact_dir: &Path, format: OutputFormat) -> Result<()> {
    let rows: Vec<AbilityRow> = load_artifacts(artifact_dir)
        .ability_options()
        .into_iter()
        .map(|ability| AbilityRow { ability })
        .collect();
    print_table(&rows, format)
}

/// List the type palette, including the fallback color
pub fn list_types(format: OutputFormat) -> Result<()> {
    let decorate = matches!(format, OutputFormat::Table);
    let rows: Vec<TypeRow> = TYPE_COLORS
        .iter()
        .copied()
        .chain(std::iter::once((UNKNOWN_LABEL, UNKNOWN_COLOR)))
        .map(|(label, color)| TypeRow {
            badge: if decorate { type_badge(label) } else { label.to_string() },
            color,
        })
        .collect();
    print_table(&rows, format)
}
