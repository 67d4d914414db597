use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ligand_model::{Severity, StatusSignal, Table as DataTable};
use ligand_output::ExportKind;

use crate::types::MergeResult;

pub fn print_summary(result: &MergeResult, preview_rows: usize) {
    let report = &result.report;
    println!("Prefix: {}", result.prefix);
    println!(
        "Records: {} parsed, {} dropped",
        report.records, report.dropped
    );
    print_signal_table(&report.signals);
    if let Some(table) = &report.full_table {
        print_preview("Full merged table", table, preview_rows);
    }
    if let (Some(parameter), Some(table)) =
        (&report.selected_parameter, &report.measurement_table)
    {
        print_preview(&format!("'{parameter}' table"), table, preview_rows);
    }
    if result.dry_run {
        println!();
        println!("Dry run: no files written.");
    } else if !result.exported.is_empty() {
        print_export_table(result);
    }
}

fn print_signal_table(signals: &[StatusSignal]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Signal"),
        header_cell("Message"),
    ]);
    apply_signal_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for signal in signals {
        table.add_row(vec![
            severity_cell(signal.severity()),
            dim_cell(signal.code()),
            Cell::new(signal.to_string()),
        ]);
    }
    println!("{table}");
}

fn print_preview(title: &str, data: &DataTable, rows: usize) {
    let preview = data.head(rows);
    println!();
    println!(
        "{title}: {} rows x {} columns (showing {})",
        data.height(),
        data.width(),
        preview.height()
    );
    let mut table = Table::new();
    table.set_header(preview.columns.iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in &preview.rows {
        table.add_row(row.iter().map(|cell| match cell {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        }));
    }
    println!("{table}");
}

fn print_export_table(result: &MergeResult) {
    println!();
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for file in &result.exported {
        let kind = match file.kind {
            ExportKind::Full => "Full",
            ExportKind::Measurement => "Measurement",
        };
        let name = file
            .path
            .file_name()
            .map_or_else(|| file.path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            });
        table.add_row(vec![
            Cell::new(kind).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(file.rows),
            Cell::new(name),
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

fn apply_signal_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Success => Cell::new("OK").fg(Color::Green),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
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
