use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::units::from_kg;
use crate::models::entry::{WeightEntry, WeightUnit};

/// Weight, fat weight and muscle weight of one entry in a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayMetrics {
    pub weight: f64,
    pub fat_weight: f64,
    pub muscle_weight: f64,
    pub unit: WeightUnit,
}

pub fn display_weight(entry: &WeightEntry, unit: WeightUnit) -> f64 {
    from_kg(entry.weight, unit)
}

pub fn display_fat_weight(entry: &WeightEntry, unit: WeightUnit) -> f64 {
    from_kg(entry.weight * entry.body_fat / 100.0, unit)
}

pub fn display_muscle_weight(entry: &WeightEntry, unit: WeightUnit) -> f64 {
    from_kg(entry.weight * entry.muscle_mass / 100.0, unit)
}

pub fn display(entry: &WeightEntry, unit: WeightUnit) -> DisplayMetrics {
    DisplayMetrics {
        weight: display_weight(entry, unit),
        fat_weight: display_fat_weight(entry, unit),
        muscle_weight: display_muscle_weight(entry, unit),
        unit,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    Weight,
    Fat,
    Muscle,
    VisceralFat,
}

impl Series {
    pub const ALL: [Series; 4] = [Self::Weight, Self::Fat, Self::Muscle, Self::VisceralFat];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weight => "Weight",
            Self::Fat => "Fat",
            Self::Muscle => "Muscle",
            Self::VisceralFat => "Visceral Fat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
    /// Position of the source entry in date order; the weight series has one
    /// point per row.
    #[serde(skip)]
    pub row: usize,
}

/// Numeric series for the trend chart, ascending by date.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub unit: WeightUnit,
    pub show_as_weight: bool,
    pub weight: Vec<ChartPoint>,
    pub fat: Vec<ChartPoint>,
    pub muscle: Vec<ChartPoint>,
    pub visceral_fat: Vec<ChartPoint>,
}

impl ChartData {
    pub fn series(&self, series: Series) -> &[ChartPoint] {
        match series {
            Series::Weight => &self.weight,
            Series::Fat => &self.fat,
            Series::Muscle => &self.muscle,
            Series::VisceralFat => &self.visceral_fat,
        }
    }

    /// Series that have at least one point to draw.
    pub fn visible(&self) -> Vec<Series> {
        Series::ALL
            .into_iter()
            .filter(|s| !self.series(*s).is_empty())
            .collect()
    }
}

/// Build chart series from entries in any order.
///
/// With `show_as_weight` fat and muscle are derived weights in `unit`,
/// otherwise raw percentages. Visceral fat is always the raw level. A zero
/// body fat, muscle mass or visceral fat value contributes no point.
pub fn chart(entries: &[WeightEntry], unit: WeightUnit, show_as_weight: bool) -> ChartData {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut data = ChartData {
        unit,
        show_as_weight,
        weight: Vec::with_capacity(sorted.len()),
        fat: Vec::new(),
        muscle: Vec::new(),
        visceral_fat: Vec::new(),
    };

    for (row, e) in sorted.into_iter().enumerate() {
        let point = |value: f64| ChartPoint {
            date: e.date,
            value,
            row,
        };
        data.weight.push(point(display_weight(e, unit)));
        if e.body_fat != 0.0 {
            let v = if show_as_weight {
                display_fat_weight(e, unit)
            } else {
                e.body_fat
            };
            data.fat.push(point(v));
        }
        if e.muscle_mass != 0.0 {
            let v = if show_as_weight {
                display_muscle_weight(e, unit)
            } else {
                e.muscle_mass
            };
            data.muscle.push(point(v));
        }
        if e.visceral_fat != 0 {
            data.visceral_fat.push(point(f64::from(e.visceral_fat)));
        }
    }

    data
}
