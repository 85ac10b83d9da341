use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use deid_model::{RunSummary, TableOutcome, TableStatus, TierOutcome};

pub fn print_summary(summary: &RunSummary) {
    if summary.dry_run {
        println!("Dry run: nothing was written.");
    }
    println!("{}", summary_table(summary));

    let failures: Vec<(&str, String)> = summary
        .tables
        .iter()
        .filter_map(|outcome| {
            outcome
                .failure()
                .map(|failure| (outcome.table_name.as_str(), failure.message.clone()))
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (table_name, message) in failures {
            eprintln!("- {table_name}: {message}");
        }
    }
}

/// One row per table in catalogue order, then a totals row.
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Intermediate"),
        header_cell("Final"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_rows = 0usize;
    for outcome in &summary.tables {
        table.add_row(outcome_row(outcome, &mut total_rows));
    }
    let published = summary.count(TableStatus::Published);
    let skipped = summary.count(TableStatus::Skipped);
    let failed = summary.count(TableStatus::Failed);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} tables", summary.tables.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{published} ok / {skipped} skipped / {failed} failed"))
            .add_attribute(Attribute::Bold),
    ]);
    table
}

fn outcome_row(outcome: &TableOutcome, total_rows: &mut usize) -> Vec<Cell> {
    let name = Cell::new(&outcome.table_name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold);
    let file = Cell::new(&outcome.file_name);
    match outcome.report() {
        Some(report) => {
            *total_rows += report.rows;
            vec![
                name,
                file,
                Cell::new(report.rows),
                tier_cell(&report.intermediate),
                tier_cell(&report.final_tier),
                status_cell(outcome.status()),
            ]
        }
        None => vec![
            name,
            file,
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            status_cell(TableStatus::Failed),
        ],
    }
}

fn tier_cell(outcome: &TierOutcome) -> Cell {
    match outcome {
        TierOutcome::Written(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        TierOutcome::Planned(_) => Cell::new("planned").fg(Color::Cyan),
        TierOutcome::Skipped(reason) => dim_cell(reason),
    }
}

fn status_cell(status: TableStatus) -> Cell {
    match status {
        TableStatus::Published => Cell::new(status).fg(Color::Green),
        TableStatus::Skipped => Cell::new(status).fg(Color::Yellow),
        TableStatus::Failed => Cell::new(status)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

/// Guard verdict for the `tables` listing.
pub fn verdict_cell(publishes: bool) -> Cell {
    if publishes {
        Cell::new("publish").fg(Color::Green)
    } else {
        dim_cell("skip")
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
