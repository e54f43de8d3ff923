pub mod human;

use serde_json::{Value, json};

use crate::core::metrics;
use crate::core::units::round1;
use crate::core::validate::ValidationError;
use crate::models::entry::{WeightEntry, WeightUnit};

/// Standard JSON envelope for every command.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Error envelope naming the offending field, so callers can clear just that one.
pub fn validation_error(command: &str, err: &ValidationError) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": err.code(),
            "field": err.field().name(),
            "message": err.to_string()
        }
    })
}

/// JSON view of an entry with weights in `unit`. The photo is reported, not inlined.
pub fn entry_view(e: &WeightEntry, unit: WeightUnit) -> Value {
    let m = metrics::display(e, unit);
    json!({
        "id": e.id,
        "date": e.date.to_rfc3339(),
        "day": e.day().to_string(),
        "weight_kg": e.weight,
        "weight": round1(m.weight),
        "fat_weight": round1(m.fat_weight),
        "muscle_weight": round1(m.muscle_weight),
        "unit": unit,
        "entered_unit": e.unit,
        "body_fat": e.body_fat,
        "muscle_mass": e.muscle_mass,
        "visceral_fat": e.visceral_fat,
        "has_image": e.image.is_some()
    })
}
