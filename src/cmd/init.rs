use anyhow::Result;
use serde_json::json;

use weightlog::db::Database;
use weightlog::models::WeightUnit;
use weightlog::models::config::Config;
use weightlog::output;

pub fn run(unit: Option<WeightUnit>, human: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(u) = unit {
        config.units.weight = u;
    }
    config.save()?;
    Database::open(&Config::db_path()?)?;

    let dir = Config::data_dir()?;
    if human {
        println!("Config initialized at {}", Config::path()?.display());
    } else {
        let out = output::success(
            "init",
            json!({ "data_dir": dir.display().to_string(), "unit": config.units.weight }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
