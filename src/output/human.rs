use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};

use crate::core::metrics::{ChartData, Series};
use crate::core::units;
use crate::models::entry::{WeightEntry, WeightUnit};

fn local_stamp(e: &WeightEntry) -> String {
    e.date.with_timezone(&Local).format("%d/%m/%y %H:%M").to_string()
}

/// One-line summary of an entry, weight in `unit`.
pub fn format_entry(e: &WeightEntry, unit: WeightUnit) -> String {
    let (w, u) = units::to_display(e.weight, unit);
    format!(
        "{} | weight {:.1} {} | muscle {:.1}% | fat {:.1}% | visceral {}",
        local_stamp(e),
        w,
        u,
        e.muscle_mass,
        e.body_fat,
        e.visceral_fat
    )
}

/// The "last entry" panel.
pub fn format_latest(latest: Option<&WeightEntry>, unit: WeightUnit) -> String {
    let Some(e) = latest else {
        return "No entries yet.".to_string();
    };
    let (w, u) = units::to_display(e.weight, unit);
    format!(
        "{} {}\n\nWeight: {:.1} {}\nMuscle Mass: {:.1} %\nBody Fat: {:.1} %\nVisceral Fat: {}",
        "Last Entry".bold(),
        e.date.with_timezone(&Local).format("%d/%m/%y"),
        w,
        u,
        e.muscle_mass,
        e.body_fat,
        e.visceral_fat
    )
}

/// History table, rows in the order given.
pub fn history_table(entries: &[&WeightEntry], unit: WeightUnit) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID"),
            Cell::new("Date"),
            Cell::new(format!("Weight ({})", unit)),
            Cell::new("Muscle %"),
            Cell::new("Body Fat %"),
            Cell::new("Visc. Fat"),
            Cell::new("Pic"),
        ]);

    for e in entries {
        let (w, _) = units::to_display(e.weight, unit);
        let pic = if e.image.is_some() { "yes" } else { "-" };
        table.add_row(vec![
            Cell::new(&e.id),
            Cell::new(local_stamp(e)),
            Cell::new(format!("{:.1}", w)),
            Cell::new(format!("{:.1}", e.muscle_mass)),
            Cell::new(format!("{:.1}", e.body_fat)),
            Cell::new(e.visceral_fat.to_string()),
            Cell::new(pic),
        ]);
    }
    table
}

/// Chart series laid out as a table: one row per date, one column per
/// visible series. A dash marks a suppressed point.
pub fn chart_table(data: &ChartData) -> Table {
    let visible = data.visible();
    let mut header = vec![Cell::new("Date")];
    for s in &visible {
        let label = match s {
            Series::Weight => format!("{} ({})", s.label(), data.unit),
            Series::Fat | Series::Muscle if data.show_as_weight => {
                format!("{} ({})", s.label(), data.unit)
            }
            Series::Fat | Series::Muscle => format!("{} (%)", s.label()),
            Series::VisceralFat => s.label().to_string(),
        };
        header.push(Cell::new(label));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for point in &data.weight {
        let mut row = vec![Cell::new(
            point.date.with_timezone(&Local).format("%d/%m/%y").to_string(),
        )];
        for s in &visible {
            let value = data
                .series(*s)
                .iter()
                .find(|p| p.row == point.row)
                .map(|p| match s {
                    Series::VisceralFat => format!("{:.0}", p.value),
                    _ => format!("{:.1}", p.value),
                })
                .unwrap_or_else(|| "-".to_string());
            row.push(Cell::new(value));
        }
        table.add_row(row);
    }
    table
}

pub fn format_error(message: &str) -> String {
    format!("{} {}", "error:".red().bold(), message)
}
