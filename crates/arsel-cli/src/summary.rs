use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use arsel_core::SelectionSession;
use arsel_model::{AvailableItem, ListMode};

/// Serializable view of a session after a command has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub mode: ListMode,
    pub switchable: bool,
    pub validation_warning: bool,
    pub available: Vec<AvailableItem>,
    pub selected: Vec<SelectedRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedRow {
    pub position: usize,
    pub raw: String,
    pub alias: String,
}

impl StateSnapshot {
    pub fn capture(session: &SelectionSession, log: Vec<String>) -> Self {
        let raw = session.raw_selected_names();
        let selected = session
            .selected_sequence()
            .iter()
            .zip(raw)
            .map(|(entry, raw)| SelectedRow {
                position: entry.position,
                raw,
                alias: entry.alias.clone(),
            })
            .collect();
        Self {
            mode: session.mode(),
            switchable: session.is_mode_switchable(),
            validation_warning: session.has_validation_warning(),
            available: session.available_pool(),
            selected,
            log,
        }
    }
}

pub fn print_state(snapshot: &StateSnapshot) {
    println!(
        "Mode: {}{}",
        snapshot.mode,
        if snapshot.switchable {
            " (switchable)"
        } else {
            ""
        }
    );
    if snapshot.validation_warning {
        println!("Aliases are sanitized to [A-Za-z0-9_]");
    }
    for line in &snapshot.log {
        println!("  {line}");
    }
    println!("{}", available_table(&snapshot.available));
    println!("{}", selected_table(&snapshot.selected));
}

pub fn available_table(items: &[AvailableItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Pos"),
        header_cell("Available"),
        header_cell("Tooltip"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (row, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(row),
            dim_cell(item.position),
            Cell::new(&item.name),
            item.tooltip
                .as_deref()
                .map_or_else(|| dim_cell("-"), dim_cell::<&str>),
        ]);
    }
    table
}

pub fn selected_table(rows: &[SelectedRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Pos"),
        header_cell("Selected"),
        header_cell("Alias"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, row) in rows.iter().enumerate() {
        let alias = if row.alias == row.raw {
            Cell::new(&row.alias)
        } else {
            Cell::new(&row.alias).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(index),
            dim_cell(row.position),
            Cell::new(&row.raw),
            alias,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
