//! Terminal rendering of dashboard panels.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dash_model::{
    ID_COLUMN, Table as DataTable, ValueKind, cell_text, display_label, format_number,
};
use dash_rank::{ChartData, ColumnProfile};

use crate::dashboard::{Page, Panel};

pub const NO_DATA: &str = "No data available";
pub const NO_CHART_DATA: &str = "No data available for chart";

pub fn render_page(page: &Page) -> String {
    let mut out = format!("{}\n", page.title);
    for panel in &page.panels {
        out.push('\n');
        out.push_str(&render_panel(panel));
    }
    out
}

pub fn render_panel(panel: &Panel) -> String {
    let mut out = format!("== {} ==\n", panel.title);
    out.push_str(&format!(
        "Ranked by {} ({} of {} rows)\n",
        panel.key,
        panel.table.len(),
        panel.total_rows
    ));
    out.push_str(&render_table(&panel.table));
    out.push('\n');
    if let Some(chart) = &panel.chart {
        out.push_str(&render_chart(chart));
        out.push('\n');
    }
    out
}

/// One row per record, the row id first, then every canonical column.
pub fn render_table(data: &DataTable) -> String {
    if data.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new();
    let mut header = vec![header_cell(&display_label(ID_COLUMN))];
    header.extend(data.columns().iter().map(|column| header_cell(&display_label(column))));
    table.set_header(header);
    apply_table_style(&mut table);
    for row in data.rows() {
        let mut cells = vec![dim_cell(row.id.as_str())];
        cells.extend(data.columns().iter().map(|column| {
            let value = row.get(column);
            let cell = Cell::new(cell_text(value));
            if value.is_number() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }));
        table.add_row(cells);
    }
    table.to_string()
}

/// Chart series as a label/value table; radial charts get a share column.
pub fn render_chart(chart: &ChartData) -> String {
    let mut out = format!("{} [{}]\n", chart.title, chart.kind);
    if chart.is_empty() {
        out.push_str(NO_CHART_DATA);
        return out;
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("Label")];
    header.extend(chart.series.iter().map(|series| header_cell(&series.label)));
    let shares = if chart.kind.is_radial() {
        header.push(header_cell("Share"));
        chart.shares()
    } else {
        Vec::new()
    };
    table.set_header(header);
    apply_table_style(&mut table);
    for (index, label) in chart.labels.iter().enumerate() {
        let mut cells = vec![Cell::new(label)];
        cells.extend(chart.series.iter().map(|series| {
            let value = series.values.get(index).copied().unwrap_or(0.0);
            Cell::new(format_number(value)).set_alignment(CellAlignment::Right)
        }));
        if let Some(share) = shares.get(index) {
            cells.push(Cell::new(format!("{share}%")).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    out.push_str(&table.to_string());
    out
}

/// Inferred column types of a table.
pub fn render_profiles(profiles: &[ColumnProfile], rows: usize) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Numbers"),
        header_cell("Text"),
        header_cell("Null"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles {
        let kind = profile.dominant_kind().map_or("null", ValueKind::as_str);
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(kind),
            count_cell(profile.numbers),
            count_cell(profile.strings),
            count_cell(profile.nulls),
            count_cell(profile.missing(rows)),
        ]);
    }
    table.to_string()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell("-").set_alignment(CellAlignment::Right)
    } else {
        Cell::new(count).set_alignment(CellAlignment::Right)
    }
}
