use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use edprep_cli::types::{RunResult, TableStatus};

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Description"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Columns"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for summary in &result.tables {
        total_in += summary.rows_in;
        total_out += summary.rows_out;
        table.add_row(vec![
            Cell::new(&summary.table)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(&summary.description),
            Cell::new(summary.rows_in),
            rows_out_cell(summary.rows_in, summary.rows_out),
            Cell::new(summary.columns),
            status_cell(summary.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All tables")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

/// Rows removed by cleaning are highlighted.
fn rows_out_cell(rows_in: usize, rows_out: usize) -> Cell {
    if rows_out < rows_in {
        Cell::new(rows_out).fg(Color::Yellow)
    } else {
        Cell::new(rows_out)
    }
}

fn status_cell(status: TableStatus) -> Cell {
    let color = match status {
        TableStatus::Processed => Color::Green,
        TableStatus::PassedThrough | TableStatus::Disabled => Color::DarkGrey,
        TableStatus::Missing => Color::Yellow,
        TableStatus::Failed => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}
