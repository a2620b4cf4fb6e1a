//! Decade luck cycles: direction, onset age, and the hundred-year ladder.

use chrono::NaiveDateTime;
use saju_base::{GanJi, Polarity, Stem};
use saju_calendar::{Gender, SolarTerm, SolarTermProvider};
use serde::Serialize;
use tracing::warn;

use crate::error::EngineError;

/// Onset sentinel for a chart whose direction cannot be decided.
pub const ONSET_UNKNOWN_DIRECTION: i32 = -1;
/// Onset sentinel for a failed boundary computation.
pub const ONSET_COMPUTE_FAILED: i32 = -3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Indeterminate,
}

impl Direction {
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Indeterminate => "indeterminate",
        }
    }
}

/// Cycle direction from the year stem's polarity and the gender.
/// Yang year + male and yin year + female run forward.
pub fn direction(year_stem: Stem, gender: Gender) -> Direction {
    let yang = year_stem.polarity() == Polarity::Yang;
    match gender {
        Gender::Male => {
            if yang {
                Direction::Forward
            } else {
                Direction::Backward
            }
        }
        Gender::Female => {
            if yang {
                Direction::Backward
            } else {
                Direction::Forward
            }
        }
        Gender::Unknown => Direction::Indeterminate,
    }
}

/// Korean-age onset of the first decade cycle.
///
/// Forward charts measure to the next period boundary, backward charts
/// back to the current one; every three days of distance count as one
/// year, half-rounded, floored at one. A forward chart born in the last
/// period measures to the next astrological year's Ipchun.
pub fn onset_age(
    birth_lmt: NaiveDateTime,
    dir: Direction,
    astro_year: i32,
    period_index: usize,
    terms: &SolarTermProvider,
) -> i32 {
    if dir == Direction::Indeterminate {
        return ONSET_UNKNOWN_DIRECTION;
    }
    match onset_days(birth_lmt, dir, astro_year, period_index, terms) {
        Ok(days) => {
            let rounded = (days.max(0.0) / 3.0 + 0.5).floor() as i32;
            if rounded == 0 { 1 } else { rounded }
        }
        Err(err) => {
            warn!(%err, "decade onset boundary lookup failed");
            ONSET_COMPUTE_FAILED
        }
    }
}

fn onset_days(
    birth_lmt: NaiveDateTime,
    dir: Direction,
    astro_year: i32,
    period_index: usize,
    terms: &SolarTermProvider,
) -> Result<f64, EngineError> {
    let diff = match dir {
        Direction::Forward => {
            let (target_year, target_term) = if period_index == 11 {
                (astro_year + 1, SolarTerm::Ipchun)
            } else {
                (astro_year, SolarTerm::from_index(period_index + 1))
            };
            terms.boundary_lmt(target_year, target_term)? - birth_lmt
        }
        Direction::Backward => {
            birth_lmt - terms.boundary_lmt(astro_year, SolarTerm::from_index(period_index))?
        }
        Direction::Indeterminate => return Ok(0.0),
    };
    Ok(diff.num_seconds() as f64 / 86_400.0)
}

/// One decade-long luck cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeCycle {
    pub start_year: i32,
    pub end_year: i32,
    pub pillar: GanJi,
}

impl DecadeCycle {
    pub fn covers(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }
}

/// The ten decade cycles, stepping the month pillar along the cycle.
///
/// Any non-forward direction steps backward, so even an indeterminate
/// chart still gets a ladder to score against.
pub fn decade_cycles(
    birth_year: i32,
    month_pillar: GanJi,
    onset: i32,
    dir: Direction,
) -> Vec<DecadeCycle> {
    let first_start = birth_year + onset - 1;
    let stem_idx = month_pillar.stem.index() as i64;
    let branch_idx = month_pillar.branch.index() as i64;

    (0..10)
        .map(|i| {
            let offset = if dir == Direction::Forward { i + 1 } else { -(i + 1) };
            let pillar = GanJi::from_indices(
                (stem_idx + offset).rem_euclid(10) as usize,
                (branch_idx + offset).rem_euclid(12) as usize,
            );
            let start_year = first_start + (i as i32) * 10;
            DecadeCycle {
                start_year,
                end_year: start_year + 9,
                pillar,
            }
        })
        .collect()
}
