//! Civil-input normalization and solar-term lookup for chart derivation.
//!
//! This crate provides:
//! - Birth-input validation and conversion to a canonical local-mean-time
//!   instant on the engine's reference meridian (UTC+9, minus a fixed
//!   30-minute correction)
//! - The twelve month-boundary solar terms with a provider adapter: an
//!   injected source, a process-wide year-keyed cache, and fixed
//!   calendar-day fallbacks when the source is degraded
//! - Trait seams for the external lunar→solar converter and the overseas
//!   city/timezone resolver

pub mod city;
pub mod civil;
pub mod error;
pub mod lunar;
pub mod terms;

pub use city::{CityResolver, StaticCityTable};
pub use civil::{
    BirthInput, CalendarType, Gender, LMT_CORRECTION_MIN, NormalizedBirth,
    REFERENCE_MERIDIAN_OFFSET_MIN, normalize_birth, to_local_mean_time,
};
pub use error::CalendarError;
pub use lunar::{LunarConverter, LunarTable, NoLunarSource};
pub use terms::{NullTermSource, SolarTerm, SolarTermProvider, SolarTermSource, TermCache, TermTable};
