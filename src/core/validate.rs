use chrono::{DateTime, Utc};
use std::str::FromStr;
use thiserror::Error;

use crate::core::units;
use crate::models::config::Limits;
use crate::models::entry::{WeightEntry, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Weight,
    MuscleMass,
    BodyFat,
    VisceralFat,
    Date,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::MuscleMass => "muscle_mass",
            Self::BodyFat => "body_fat",
            Self::VisceralFat => "visceral_fat",
            Self::Date => "date",
        }
    }

    /// The other half of the muscle mass / body fat pair.
    fn sibling_percent(&self) -> Option<Field> {
        match self {
            Self::MuscleMass => Some(Self::BodyFat),
            Self::BodyFat => Some(Self::MuscleMass),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "weight" => Ok(Self::Weight),
            "muscle_mass" | "muscle" => Ok(Self::MuscleMass),
            "body_fat" | "fat" => Ok(Self::BodyFat),
            "visceral_fat" | "visceral" => Ok(Self::VisceralFat),
            "date" => Ok(Self::Date),
            _ => anyhow::bail!("unknown field: {}", s),
        }
    }
}

/// The rule a field broke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),
    #[error("must be greater than 0")]
    NotPositive,
    #[error("{kg:.1} kg must be less than {max} kg")]
    TooHeavy { kg: f64, max: f64 },
    #[error("{0} must be from 0 to 100")]
    PercentOutOfRange(f64),
    #[error("muscle mass and body fat combined ({0}%) must not exceed 100%")]
    CombinedOver100(f64),
    #[error("must not be negative")]
    Negative,
    #[error("{0} is in the future")]
    FutureDate(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid weight: {0}")]
    InvalidWeight(Violation),
    #[error("invalid muscle mass: {0}")]
    InvalidMuscleMass(Violation),
    #[error("invalid body fat: {0}")]
    InvalidBodyFat(Violation),
    #[error("invalid visceral fat: {0}")]
    InvalidVisceralFat(Violation),
    #[error("invalid date: {0}")]
    InvalidDate(Violation),
}

impl ValidationError {
    pub fn new(field: Field, violation: Violation) -> Self {
        match field {
            Field::Weight => Self::InvalidWeight(violation),
            Field::MuscleMass => Self::InvalidMuscleMass(violation),
            Field::BodyFat => Self::InvalidBodyFat(violation),
            Field::VisceralFat => Self::InvalidVisceralFat(violation),
            Field::Date => Self::InvalidDate(violation),
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Self::InvalidWeight(_) => Field::Weight,
            Self::InvalidMuscleMass(_) => Field::MuscleMass,
            Self::InvalidBodyFat(_) => Field::BodyFat,
            Self::InvalidVisceralFat(_) => Field::VisceralFat,
            Self::InvalidDate(_) => Field::Date,
        }
    }

    pub fn violation(&self) -> &Violation {
        match self {
            Self::InvalidWeight(v)
            | Self::InvalidMuscleMass(v)
            | Self::InvalidBodyFat(v)
            | Self::InvalidVisceralFat(v)
            | Self::InvalidDate(v) => v,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidWeight(_) => "invalid_weight",
            Self::InvalidMuscleMass(_) => "invalid_muscle_mass",
            Self::InvalidBodyFat(_) => "invalid_body_fat",
            Self::InvalidVisceralFat(_) => "invalid_visceral_fat",
            Self::InvalidDate(_) => "invalid_date",
        }
    }
}

/// Raw, in-progress input for one entry, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub weight: String,
    pub muscle_mass: String,
    pub body_fat: String,
    pub visceral_fat: String,
    pub date: DateTime<Utc>,
    /// Unit the weight string is typed in.
    pub unit: WeightUnit,
    pub image: Option<Vec<u8>>,
}

impl EntryForm {
    pub fn new(date: DateTime<Utc>, unit: WeightUnit) -> Self {
        Self {
            weight: String::new(),
            muscle_mass: String::new(),
            body_fat: String::new(),
            visceral_fat: String::new(),
            date,
            unit,
            image: None,
        }
    }

    /// Pre-fill from a stored entry, with the weight expressed in `unit`.
    pub fn from_entry(entry: &WeightEntry, unit: WeightUnit) -> Self {
        Self {
            weight: units::from_kg(entry.weight, unit).to_string(),
            muscle_mass: entry.muscle_mass.to_string(),
            body_fat: entry.body_fat.to_string(),
            visceral_fat: entry.visceral_fat.to_string(),
            date: entry.date,
            unit,
            image: entry.image.clone(),
        }
    }

    /// Raw text of a field. The date has no text form and reads as empty.
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Weight => &self.weight,
            Field::MuscleMass => &self.muscle_mass,
            Field::BodyFat => &self.body_fat,
            Field::VisceralFat => &self.visceral_fat,
            Field::Date => "",
        }
    }

    fn raw_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Weight => Some(&mut self.weight),
            Field::MuscleMass => Some(&mut self.muscle_mass),
            Field::BodyFat => Some(&mut self.body_fat),
            Field::VisceralFat => Some(&mut self.visceral_fat),
            Field::Date => None,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.raw_mut(field) {
            *slot = value.into();
        }
    }

    /// Check one field as the user leaves it. A failing field is cleared;
    /// every other field keeps its text.
    pub fn check_field(
        &mut self,
        validator: &EntryValidator,
        field: Field,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let result = validator.validate_field(field, self, now);
        if result.is_err()
            && let Some(slot) = self.raw_mut(field)
        {
            slot.clear();
        }
        result
    }
}

/// Turns raw form input into a well-formed [`WeightEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryValidator {
    limits: Limits,
}

impl EntryValidator {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Live check of a single field against the rest of the form.
    /// An empty field passes: nothing has been entered yet.
    pub fn validate_field(
        &self,
        field: Field,
        form: &EntryForm,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if field != Field::Date && form.raw(field).trim().is_empty() {
            return Ok(());
        }
        match field {
            Field::Weight => self.weight(form).map(|_| ()),
            Field::MuscleMass | Field::BodyFat => percent(field, form).map(|_| ()),
            Field::VisceralFat => visceral_fat(form).map(|_| ()),
            Field::Date => date(form.date, now),
        }
    }

    /// Full submit-time validation. Fields are checked in order (weight,
    /// muscle mass, body fat, visceral fat, date) and the first failure wins.
    pub fn validate(
        &self,
        form: &EntryForm,
        now: DateTime<Utc>,
    ) -> Result<WeightEntry, ValidationError> {
        let weight = self.weight(form)?;
        let muscle_mass = percent(Field::MuscleMass, form)?;
        let body_fat = percent(Field::BodyFat, form)?;
        let visceral = visceral_fat(form)?;
        date(form.date, now)?;

        Ok(
            WeightEntry::new(form.date, weight, body_fat, muscle_mass, visceral, form.unit)
                .with_image(form.image.clone()),
        )
    }

    /// Parse the weight and convert it to kilograms.
    fn weight(&self, form: &EntryForm) -> Result<f64, ValidationError> {
        let err = |v| ValidationError::new(Field::Weight, v);
        let value = parse_number(&form.weight).map_err(err)?;
        let kg = units::to_kg(value, form.unit);
        if kg <= 0.0 {
            return Err(err(Violation::NotPositive));
        }
        if let Some(max) = self.limits.max_weight()
            && kg >= max
        {
            return Err(err(Violation::TooHeavy { kg, max }));
        }
        Ok(kg)
    }
}

fn parse_number(raw: &str) -> Result<f64, Violation> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Violation::NotANumber(trimmed.to_string())),
    }
}

fn percent(field: Field, form: &EntryForm) -> Result<f64, ValidationError> {
    let err = |v| ValidationError::new(field, v);
    let value = parse_number(form.raw(field)).map_err(err)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(err(Violation::PercentOutOfRange(value)));
    }
    // The combined rule only applies once the sibling holds a usable value.
    if let Some(other) = field.sibling_percent()
        && let Ok(sibling) = parse_number(form.raw(other))
        && (0.0..=100.0).contains(&sibling)
        && value + sibling > 100.0
    {
        return Err(err(Violation::CombinedOver100(value + sibling)));
    }
    Ok(value)
}

fn visceral_fat(form: &EntryForm) -> Result<u32, ValidationError> {
    let err = |v| ValidationError::new(Field::VisceralFat, v);
    let raw = form.visceral_fat.trim();
    match raw.parse::<i64>() {
        Ok(n) if n < 0 => Err(err(Violation::Negative)),
        Ok(n) => u32::try_from(n).map_err(|_| err(Violation::NotAnInteger(raw.to_string()))),
        Err(_) => match parse_number(raw) {
            Ok(v) if v < 0.0 => Err(err(Violation::Negative)),
            Ok(_) => Err(err(Violation::NotAnInteger(raw.to_string()))),
            Err(v) => Err(err(v)),
        },
    }
}

fn date(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if date > now {
        return Err(ValidationError::new(
            Field::Date,
            Violation::FutureDate(date),
        ));
    }
    Ok(())
}
