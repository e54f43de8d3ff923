use anyhow::Result;
use serde_json::json;

use weightlog::core::metrics;
use weightlog::models::WeightUnit;
use weightlog::output;
use weightlog::output::human;

/// Per-run choice between weight and percentage mode, if either flag is given.
pub fn mode_override(as_weight: bool, as_percent: bool) -> Option<bool> {
    match (as_weight, as_percent) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn run(unit: Option<WeightUnit>, show_as_weight: Option<bool>, human_flag: bool) -> Result<()> {
    let (config, store) = super::open_store()?;
    let unit = super::active_unit(&config, unit);
    let show_as_weight = show_as_weight.unwrap_or(config.chart.show_as_weight);
    let data = metrics::chart(store.all(), unit, show_as_weight);

    if human_flag {
        if data.weight.is_empty() {
            println!("No entries to chart.");
        } else {
            println!("Weight Progress");
            println!("{}", human::chart_table(&data));
        }
    } else {
        let visible: Vec<_> = data.visible().iter().map(|s| s.label()).collect();
        let out = output::success("chart", json!({ "series": data, "visible": visible }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
