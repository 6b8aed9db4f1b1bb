//! Civil calendar arithmetic for the chart engine.
//!
//! This crate provides:
//! - Julian Day Number ↔ Gregorian conversions
//! - `LocalDateTime`, a validated wall-clock instant at the fixed +09:00 offset
//! - The approximate solar-term table used for month and year cutovers

pub mod error;
pub mod julian;
pub mod local_time;
pub mod solar_term;

pub use error::TimeError;
pub use julian::{MINUTES_PER_DAY, days_in_month, gregorian_to_jdn, is_leap_year, jdn_to_gregorian};
pub use local_time::{LocalDateTime, UTC_OFFSET_MINUTES};
pub use solar_term::{
    ALL_SOLAR_TERMS, SAMPLE_FIRST_YEAR, SAMPLE_LAST_YEAR, SolarTerm, SolarTermBoundary,
    boundaries_for_civil_year, boundary_after, boundary_at_or_before, boundary_for,
    sample_offset_minutes,
};
