use anyhow::Result;
use serde_json::json;

use weightlog::models::WeightUnit;
use weightlog::output;
use weightlog::output::human;

pub fn run(unit: Option<WeightUnit>, human_flag: bool) -> Result<()> {
    let (config, store) = super::open_store()?;
    let unit = super::active_unit(&config, unit);
    let latest = store.latest();

    if human_flag {
        println!("{}", human::format_latest(latest, unit));
    } else {
        let out = output::success(
            "latest",
            json!({ "entry": latest.map(|e| output::entry_view(e, unit)) }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
