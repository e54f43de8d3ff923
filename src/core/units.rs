use crate::models::entry::WeightUnit;

pub const KG_TO_LBS: f64 = 2.20462;
pub const KG_PER_STONE: f64 = 6.35029;

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * KG_TO_LBS
}

pub fn kg_to_stone(kg: f64) -> f64 {
    kg / KG_PER_STONE
}

/// Inverse of [`kg_to_lbs`]. Dividing keeps `lbs -> kg -> lbs` exact to
/// floating-point tolerance, which `lbs * 0.453592` does not.
pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / KG_TO_LBS
}

pub fn stone_to_kg(stone: f64) -> f64 {
    stone * KG_PER_STONE
}

/// Convert a value entered in `unit` to kilograms for storage.
pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => lbs_to_kg(value),
        WeightUnit::Stone => stone_to_kg(value),
    }
}

/// Convert a stored kilogram value to `unit`.
pub fn from_kg(kg: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => kg,
        WeightUnit::Lbs => kg_to_lbs(kg),
        WeightUnit::Stone => kg_to_stone(kg),
    }
}

/// Convert a stored (kg) value to display value + display unit string.
pub fn to_display(kg: f64, unit: WeightUnit) -> (f64, &'static str) {
    (round1(from_kg(kg, unit)), unit.label())
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
