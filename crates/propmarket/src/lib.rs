//! Property marketplace catalog: listing storage, derived categories, and the
//! search pipeline that turns raw query strings into paginated results.

pub mod config;
pub mod error;
pub mod listings;
pub mod telemetry;
