use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 3] = [Self::Kg, Self::Lbs, Self::Stone];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
            Self::Stone => "stone",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WeightUnit {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(Self::Kg),
            "lbs" | "lb" => Ok(Self::Lbs),
            "stone" | "st" => Ok(Self::Stone),
            _ => anyhow::bail!("invalid unit: {} (expected kg/lbs/stone)", s),
        }
    }
}

/// One measurement event. `weight` is always kilograms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub weight: f64,
    pub body_fat: f64,
    pub muscle_mass: f64,
    pub visceral_fat: u32,
    pub unit: WeightUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl WeightEntry {
    pub fn new(
        date: DateTime<Utc>,
        weight: f64,
        body_fat: f64,
        muscle_mass: f64,
        visceral_fat: u32,
        unit: WeightUnit,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            weight,
            body_fat,
            muscle_mass,
            visceral_fat,
            unit,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<Vec<u8>>) -> Self {
        self.image = image;
        self
    }

    /// Calendar day of the entry in the local timezone.
    pub fn day(&self) -> NaiveDate {
        local_day(&self.date)
    }
}

pub fn local_day(ts: &DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}
