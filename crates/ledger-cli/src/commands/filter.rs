use std::path::Path;

use anyhow::{Context, bail};
use ledger_list::filter::rewrite_query;
use ledger_list::{FilterCatalog, FilterDropdown};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FilterCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FilterOutput {
    url: String,
}

/// Handle `ledgerctl filter`.
pub fn handle(action: &FilterCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = match action {
        FilterCommands::Apply {
            url,
            field,
            values,
            catalog,
        } => match catalog {
            Some(path) => apply_from_catalog(url, field, values, &read_catalog(path)?)?,
            None => apply(url, field, values)?,
        },
        FilterCommands::Clear { url, field } => rewrite_query(url, field, &[])?,
    };
    output(&FilterOutput { url }, flags.format)
}

fn read_catalog(path: &Path) -> anyhow::Result<FilterCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read filter catalog {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid filter catalog {}", path.display()))
}

fn apply(url: &str, field: &str, values: &[String]) -> anyhow::Result<String> {
    let Some(mut dropdown) = FilterDropdown::open(field, values, &[]) else {
        return Ok(rewrite_query(url, field, &[])?);
    };
    dropdown.toggle_all(true);
    Ok(dropdown.apply(url)?)
}

/// Open the column's dropdown from the page maps. Given values replace the
/// active filter; an empty list re-applies the active filter as is.
fn apply_from_catalog(
    url: &str,
    field: &str,
    values: &[String],
    catalog: &FilterCatalog,
) -> anyhow::Result<String> {
    let Some(mut dropdown) = catalog.dropdown(field) else {
        bail!("column '{field}' has no filter options");
    };
    if !values.is_empty() {
        dropdown.toggle_all(false);
        for value in values {
            if !dropdown.toggle(value, true) {
                bail!("'{value}' is not an option of column '{field}'");
            }
        }
    }
    Ok(dropdown.apply(url)?)
}
