use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use deid_catalogue::provider_for;
use deid_core::{RunOptions, run_pipeline};
use deid_model::{RunSummary, raw_file_name};
use deid_storage::LocalParquetStore;
use tracing::info;

use crate::cli::{RunArgs, TablesArgs};
use crate::summary::{apply_table_style, header_cell, verdict_cell};

/// Publish the catalogued tables and optionally write a JSON report.
pub fn run(args: &RunArgs) -> Result<RunSummary> {
    let config = args
        .config
        .pipeline_config()
        .context("invalid configuration")?;
    let store = LocalParquetStore::from_config(&config.storage).context("open storage")?;
    let provider = provider_for(&config.catalogue).context("build catalogue provider")?;
    let options = RunOptions {
        dry_run: args.dry_run,
        only: args.only.clone(),
    };

    let summary = run_pipeline(&config, provider.as_ref(), &store, &options)?;

    if let Some(path) = &args.report {
        write_report(&summary, path)?;
        info!(path = %path.display(), "wrote run report");
    }
    Ok(summary)
}

pub fn write_report(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write run report {}", path.display()))
}

/// Print the catalogue with per-table treatment counts and guard verdicts.
pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let source = args.catalogue.source().context("invalid configuration")?;
    let catalogue = provider_for(&source)
        .context("build catalogue provider")?
        .fetch()
        .context("fetch catalogue")?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Hashed"),
        header_cell("Dropped"),
        header_cell("Hour"),
        header_cell("Month"),
        header_cell("Free text"),
        header_cell("Intermediate"),
        header_cell("Final"),
    ]);
    apply_table_style(&mut table);
    for (name, descriptor) in &catalogue {
        let intermediate = descriptor.has_intermediate_content();
        let final_tier = intermediate && descriptor.has_final_content();
        table.add_row(vec![
            Cell::new(name),
            Cell::new(raw_file_name(name, &args.file_extension)),
            Cell::new(descriptor.client_id_columns.len()),
            Cell::new(descriptor.other_identifiable_columns.len()),
            Cell::new(descriptor.datetime_columns.len()),
            Cell::new(descriptor.date_of_birth_columns.len()),
            Cell::new(descriptor.free_text_columns.len()),
            verdict_cell(intermediate),
            verdict_cell(final_tier),
        ]);
    }
    println!("{table}");
    Ok(())
}
