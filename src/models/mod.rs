pub mod config;
pub mod entry;

pub use entry::{WeightEntry, WeightUnit};
