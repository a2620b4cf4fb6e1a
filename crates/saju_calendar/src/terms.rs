//! Solar-term boundaries for the astrological month grid.
//!
//! Each astrological year runs from Ipchun to the next Ipchun and is cut
//! into twelve periods by the "principal" solar terms. Exact instants come
//! from a pluggable [`SolarTermSource`]; when a source has no data for a
//! year, every boundary falls back to a fixed calendar date at 12:00 KST,
//! which keeps the pipeline running at reduced precision.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::civil::LMT_CORRECTION_MIN;
use crate::error::CalendarError;

/// The twelve month-opening solar terms, in astrological-year order
/// starting at Ipchun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarTerm {
    Ipchun,
    Gyeongchip,
    Cheongmyeong,
    Ipha,
    Mangjong,
    Soseo,
    Ipchu,
    Baengno,
    Hallo,
    Ipdong,
    Daeseol,
    Sohan,
}

pub const ALL_TERMS: [SolarTerm; 12] = [
    SolarTerm::Ipchun,
    SolarTerm::Gyeongchip,
    SolarTerm::Cheongmyeong,
    SolarTerm::Ipha,
    SolarTerm::Mangjong,
    SolarTerm::Soseo,
    SolarTerm::Ipchu,
    SolarTerm::Baengno,
    SolarTerm::Hallo,
    SolarTerm::Ipdong,
    SolarTerm::Daeseol,
    SolarTerm::Sohan,
];

impl SolarTerm {
    pub const fn name(self) -> &'static str {
        match self {
            SolarTerm::Ipchun => "ipchun",
            SolarTerm::Gyeongchip => "gyeongchip",
            SolarTerm::Cheongmyeong => "cheongmyeong",
            SolarTerm::Ipha => "ipha",
            SolarTerm::Mangjong => "mangjong",
            SolarTerm::Soseo => "soseo",
            SolarTerm::Ipchu => "ipchu",
            SolarTerm::Baengno => "baengno",
            SolarTerm::Hallo => "hallo",
            SolarTerm::Ipdong => "ipdong",
            SolarTerm::Daeseol => "daeseol",
            SolarTerm::Sohan => "sohan",
        }
    }

    /// Position within the astrological year, Ipchun = 0.
    pub const fn index(self) -> usize {
        match self {
            SolarTerm::Ipchun => 0,
            SolarTerm::Gyeongchip => 1,
            SolarTerm::Cheongmyeong => 2,
            SolarTerm::Ipha => 3,
            SolarTerm::Mangjong => 4,
            SolarTerm::Soseo => 5,
            SolarTerm::Ipchu => 6,
            SolarTerm::Baengno => 7,
            SolarTerm::Hallo => 8,
            SolarTerm::Ipdong => 9,
            SolarTerm::Daeseol => 10,
            SolarTerm::Sohan => 11,
        }
    }

    pub const fn from_index(index: usize) -> SolarTerm {
        ALL_TERMS[index % 12]
    }

    /// Typical civil (month, day) of the term, used when no source data
    /// is available for a year.
    pub const fn fallback_month_day(self) -> (u32, u32) {
        match self {
            SolarTerm::Ipchun => (2, 4),
            SolarTerm::Gyeongchip => (3, 6),
            SolarTerm::Cheongmyeong => (4, 5),
            SolarTerm::Ipha => (5, 6),
            SolarTerm::Mangjong => (6, 6),
            SolarTerm::Soseo => (7, 7),
            SolarTerm::Ipchu => (8, 8),
            SolarTerm::Baengno => (9, 8),
            SolarTerm::Hallo => (10, 8),
            SolarTerm::Ipdong => (11, 7),
            SolarTerm::Daeseol => (12, 7),
            SolarTerm::Sohan => (1, 6),
        }
    }
}

/// Exact KST instants of the twelve terms of one astrological year.
pub type TermTable = HashMap<SolarTerm, NaiveDateTime>;

/// Supplier of exact term instants (KST) per astrological year.
///
/// Returning `None` signals the source has no data for that year; callers
/// degrade to the fixed fallback dates.
pub trait SolarTermSource: Send + Sync {
    fn term_table(&self, astro_year: i32) -> Option<TermTable>;
}

/// Source with no data at all. Every boundary uses the fallback grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTermSource;

impl SolarTermSource for NullTermSource {
    fn term_table(&self, _astro_year: i32) -> Option<TermTable> {
        None
    }
}

/// Per-year memo of source lookups.
///
/// The source is consulted outside the lock, so two threads racing on the
/// same year may both query it; the second insert simply wins. A source
/// miss is cached as an empty table so the fallback path is not re-queried.
#[derive(Debug, Default)]
pub struct TermCache {
    tables: Mutex<HashMap<i32, TermTable>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_populate(&self, astro_year: i32, source: &dyn SolarTermSource) -> TermTable {
        if let Ok(tables) = self.tables.lock() {
            if let Some(table) = tables.get(&astro_year) {
                return table.clone();
            }
        }
        let table = source.term_table(astro_year).unwrap_or_default();
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(astro_year, table.clone());
        }
        table
    }
}

/// Cached term lookup with fallback, producing boundaries in LMT.
pub struct SolarTermProvider {
    source: Box<dyn SolarTermSource>,
    cache: TermCache,
}

impl SolarTermProvider {
    pub fn new(source: Box<dyn SolarTermSource>) -> Self {
        Self {
            source,
            cache: TermCache::new(),
        }
    }

    /// Instant the given term opens within the given astrological year,
    /// as local mean time.
    ///
    /// Sohan of astrological year Y lands in civil year Y+1; the fallback
    /// path accounts for that when building its date.
    pub fn boundary_lmt(
        &self,
        astro_year: i32,
        term: SolarTerm,
    ) -> Result<NaiveDateTime, CalendarError> {
        let table = self.cache.get_or_populate(astro_year, self.source.as_ref());
        let kst = match table.get(&term) {
            Some(&instant) => instant,
            None => self.fallback_kst(astro_year, term)?,
        };
        Ok(kst - Duration::minutes(LMT_CORRECTION_MIN))
    }

    fn fallback_kst(
        &self,
        astro_year: i32,
        term: SolarTerm,
    ) -> Result<NaiveDateTime, CalendarError> {
        let (month, day) = term.fallback_month_day();
        let civil_year = if month < 2 { astro_year + 1 } else { astro_year };
        warn!(
            astro_year,
            term = term.name(),
            "no exact term data, using fixed fallback date"
        );
        NaiveDate::from_ymd_opt(civil_year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .ok_or_else(|| {
                CalendarError::InvalidInput(format!(
                    "no valid fallback date for {} in {civil_year}",
                    term.name()
                ))
            })
    }
}
