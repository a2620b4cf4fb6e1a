//! Lunar→solar conversion seam.
//!
//! The real converter is an external service; the engine only sees this
//! trait. `None` means the civil date is unrecoverable and the query fails
//! with `ConversionUnavailable` upstream.

use std::collections::HashMap;

use chrono::NaiveDate;

/// Lunar civil date→solar civil date lookup.
pub trait LunarConverter: Send + Sync {
    /// Solar date for a lunar (year, month, day, leap-month) quadruple, or
    /// `None` when the converter has no answer.
    fn to_solar(&self, year: i32, month: u32, day: u32, leap_month: bool) -> Option<NaiveDate>;
}

/// Converter with no backing data; every lookup is a miss.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLunarSource;

impl LunarConverter for NoLunarSource {
    fn to_solar(&self, _: i32, _: u32, _: u32, _: bool) -> Option<NaiveDate> {
        None
    }
}

/// In-memory conversion table (tests, offline fixtures).
#[derive(Debug, Default, Clone)]
pub struct LunarTable {
    entries: HashMap<(i32, u32, u32, bool), NaiveDate>,
}

impl LunarTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((i32, u32, u32, bool), NaiveDate)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl LunarConverter for LunarTable {
    fn to_solar(&self, year: i32, month: u32, day: u32, leap_month: bool) -> Option<NaiveDate> {
        self.entries.get(&(year, month, day, leap_month)).copied()
    }
}
