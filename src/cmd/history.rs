use anyhow::Result;
use serde_json::json;

use weightlog::models::WeightUnit;
use weightlog::output;
use weightlog::output::human;

pub fn run(unit: Option<WeightUnit>, human_flag: bool) -> Result<()> {
    let (config, store) = super::open_store()?;
    let unit = super::active_unit(&config, unit);
    let entries = store.history();

    if human_flag {
        if entries.is_empty() {
            println!("No entries recorded.");
        } else {
            println!("{}", human::history_table(&entries, unit));
        }
    } else {
        let views: Vec<_> = entries
            .iter()
            .map(|e| output::entry_view(e, unit))
            .collect();
        let out = output::success("history", json!({ "unit": unit, "entries": views }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
