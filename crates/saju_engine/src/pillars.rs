//! Natal pillar derivation from local mean time.
//!
//! The year and month pillars follow the solar-term grid: the astrological
//! year opens at Ipchun and each of its twelve periods opens at one
//! principal term. Day and hour pillars come from plain cycle arithmetic
//! over the proleptic day ordinal and the two-hour watch of the day.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use saju_base::{Chart, GanJi, Stem};
use saju_calendar::{NormalizedBirth, SolarTerm, SolarTermProvider};

use crate::error::EngineError;

/// Month stem cycle start per year stem.
const MONTH_STEM_START: [usize; 10] = [2, 4, 6, 8, 0, 2, 4, 6, 8, 0];

/// Branch governing each solar-term period, Ipchun opening In.
const PERIOD_BRANCH: [usize; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 1];

/// Hour stem cycle start per day stem.
const HOUR_STEM_START: [usize; 10] = [0, 2, 4, 6, 8, 0, 2, 4, 6, 8];

/// Minute of day at which the late Ja watch opens (23:30).
const LATE_JA_MINUTE: u32 = 23 * 60 + 30;

/// A derived natal chart plus the calendar context later stages need.
#[derive(Debug, Clone)]
pub struct DerivedChart {
    pub chart: Chart,
    /// Ipchun-based year the birth falls in.
    pub astro_year: i32,
    /// Solar-term period within the astrological year, Ipchun period = 0.
    pub period_index: usize,
    /// All twelve possible hour pillars; populated only when the birth
    /// time was unknown and the noon placeholder was used.
    pub hour_candidates: Vec<GanJi>,
}

/// Ipchun-based year of an instant. Before that civil year's Ipchun the
/// instant still belongs to the previous astrological year.
pub fn astro_year_of(lmt: NaiveDateTime, terms: &SolarTermProvider) -> Result<i32, EngineError> {
    let ipchun = terms.boundary_lmt(lmt.year(), SolarTerm::Ipchun)?;
    if lmt < ipchun {
        Ok(lmt.year() - 1)
    } else {
        Ok(lmt.year())
    }
}

pub fn year_pillar(astro_year: i32) -> GanJi {
    GanJi::for_year(astro_year)
}

/// Month pillar and period index for an instant within its astrological
/// year. The default period is the last one; the first boundary the
/// instant precedes closes the search.
pub fn month_pillar(
    lmt: NaiveDateTime,
    astro_year: i32,
    year_stem: Stem,
    terms: &SolarTermProvider,
) -> Result<(GanJi, usize), EngineError> {
    let mut period = 11;
    for i in 0..12 {
        let boundary = terms.boundary_lmt(astro_year, SolarTerm::from_index(i))?;
        if lmt < boundary {
            period = (i + 11) % 12;
            break;
        }
    }
    let stem_idx = (MONTH_STEM_START[year_stem.index()] + period) % 10;
    Ok((GanJi::from_indices(stem_idx, PERIOD_BRANCH[period]), period))
}

/// Day pillar from the proleptic day ordinal.
pub fn day_pillar(date: NaiveDate) -> GanJi {
    let ordinal = date.num_days_from_ce() as i64;
    let stem_idx = (ordinal + 4).rem_euclid(10) as usize;
    let branch_idx = (ordinal + 2).rem_euclid(12) as usize;
    GanJi::from_indices(stem_idx, branch_idx)
}

/// Hour pillar from the two-hour watch the instant falls in.
///
/// From 23:30 the instant counts as the late Ja watch: the branch stays
/// Ja but the stem is looked up against the next day's stem.
pub fn hour_pillar(lmt: NaiveDateTime, day_stem: Stem) -> GanJi {
    let minute_of_day = lmt.hour() * 60 + lmt.minute();
    let branch_idx = ((minute_of_day + 30) / 120) as usize % 12;

    let mut effective_day_stem = day_stem.index();
    if minute_of_day >= LATE_JA_MINUTE {
        effective_day_stem = (effective_day_stem + 1) % 10;
    }
    let stem_idx = (HOUR_STEM_START[effective_day_stem] + branch_idx) % 10;
    GanJi::from_indices(stem_idx, branch_idx)
}

/// All twelve hour pillars a given day stem admits, Ja watch first.
pub fn hour_candidates(day_stem: Stem) -> Vec<GanJi> {
    let base = HOUR_STEM_START[day_stem.index()];
    (0..12)
        .map(|j| GanJi::from_indices((base + j) % 10, j))
        .collect()
}

/// Derive the full natal chart for a normalized birth instant.
pub fn derive_chart(
    birth: &NormalizedBirth,
    terms: &SolarTermProvider,
) -> Result<DerivedChart, EngineError> {
    let lmt = birth.lmt;
    let astro_year = astro_year_of(lmt, terms)?;
    let year = year_pillar(astro_year);
    let (month, period_index) = month_pillar(lmt, astro_year, year.stem, terms)?;
    let day = day_pillar(lmt.date());
    let hour = hour_pillar(lmt, day.stem);

    let candidates = if birth.time_known {
        Vec::new()
    } else {
        hour_candidates(day.stem)
    };

    Ok(DerivedChart {
        chart: Chart {
            year,
            month,
            day,
            hour,
        },
        astro_year,
        period_index,
        hour_candidates: candidates,
    })
}
