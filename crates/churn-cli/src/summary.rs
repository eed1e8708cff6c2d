use std::path::Path;

use churn_common::any_to_string;
use churn_features::{FeatureReport, RuleStatus};
use churn_ingest::{CleaningReport, CleaningStep};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{Column, DataFrame};

use churn_cli::pipeline::PipelineResult;

pub fn print_summary(result: &PipelineResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    println!(
        "Rows: {} raw, {} final ({} columns)",
        result.raw_rows,
        result.table.height(),
        result.table.width()
    );
    if let Some(report) = &result.cleaning {
        print_cleaning_table(report);
    }
    if let Some(report) = &result.features {
        print_feature_table(report);
    }
}

fn print_cleaning_table(report: &CleaningReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Column"),
        header_cell("Rows removed"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for step in CleaningStep::ALL {
        let skipped = report.skipped_steps.contains(&step);
        let removed = match step {
            CleaningStep::CoerceTotalCharges => Some(report.unparseable_total_charges),
            CleaningStep::DropZeroTenure => Some(report.zero_tenure),
            CleaningStep::DropIdentifier | CleaningStep::EncodeChurn => None,
        };
        table.add_row(vec![
            Cell::new(step.display_name()),
            dim_cell(step.column()),
            if skipped {
                dim_cell("-")
            } else {
                count_cell(removed, Color::Yellow)
            },
            status_cell(!skipped),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.input_rows - report.output_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    if report.churn_unmapped > 0 {
        eprintln!(
            "warning: {} Churn values were not Yes/No and became null",
            report.churn_unmapped
        );
    }
}

fn print_feature_table(report: &FeatureReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Feature"),
        header_cell("Status"),
        header_cell("Missing inputs"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for outcome in &report.rules {
        let (applied, missing) = match &outcome.status {
            RuleStatus::Applied => (true, dim_cell("-")),
            RuleStatus::Skipped { missing } => (false, Cell::new(missing.join(", "))),
        };
        table.add_row(vec![
            Cell::new(&outcome.output)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(applied),
            missing,
        ]);
    }
    println!("{table}");

    if let Some(one_hot) = &report.one_hot {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Column"),
            header_cell("Reference"),
            header_cell("Indicators"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for encoded in &one_hot.encoded {
            table.add_row(vec![
                Cell::new(&encoded.column),
                encoded
                    .reference
                    .as_deref()
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(encoded.indicators.len()),
            ]);
        }
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(one_hot.indicator_count()).add_attribute(Attribute::Bold),
        ]);
        println!("{table}");
    }
}

/// Prints column names, inferred types, null counts and a sample value.
pub fn print_schema(path: &Path, df: &DataFrame) {
    println!("Input: {}", path.display());
    println!("Rows: {}", df.height());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Example"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, column) in df.get_columns().iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(column.name().as_str()),
            Cell::new(column.dtype().to_string()),
            count_cell(Some(column.null_count()), Color::Yellow),
            example_cell(column),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn example_cell(column: &Column) -> Cell {
    let first = (0..column.len())
        .filter_map(|index| column.get(index).ok())
        .map(any_to_string)
        .find(|value| !value.trim().is_empty());
    match first {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn status_cell(applied: bool) -> Cell {
    if applied {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("skipped").fg(Color::DarkGrey)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
