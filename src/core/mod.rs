pub mod conflict;
pub mod metrics;
pub mod store;
pub mod units;
pub mod validate;
