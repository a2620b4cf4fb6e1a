//! Seasonal climate scoring (cold/warm/dry/wet) over the natal branches.
//!
//! Each branch carries fixed cold and dry scores on a 0-10 scale; warm and
//! wet are their complements after normalization. The natal baseline blends
//! the four branch scores with pillar-specific weights; an annual overlay
//! blends 70% natal with 30% of the annual branch's own scores.

use serde::Serialize;

use crate::ganji::Branch;
use crate::pillars::{Chart, Pillar};

/// Raw per-branch scores: (cold, warm, dry, wet), each 0-10.
const fn branch_scores(branch: Branch) -> (f64, f64, f64, f64) {
    match branch {
        Branch::Ja => (8.0, 2.0, 8.0, 2.0),
        Branch::Chuk => (9.0, 1.0, 3.0, 7.0),
        Branch::In => (7.0, 3.0, 7.0, 3.0),
        Branch::Myo => (4.0, 6.0, 3.0, 7.0),
        Branch::Jin => (3.0, 7.0, 1.0, 9.0),
        Branch::Sa => (2.0, 8.0, 7.0, 3.0),
        Branch::O => (2.0, 8.0, 4.0, 6.0),
        Branch::Mi => (1.0, 9.0, 7.0, 3.0),
        Branch::Sin => (3.0, 7.0, 4.0, 6.0),
        Branch::Yu => (6.0, 4.0, 8.0, 2.0),
        Branch::Sul => (7.0, 3.0, 9.0, 1.0),
        Branch::Hae => (7.0, 3.0, 3.0, 7.0),
    }
}

/// Pillar weights for the cold blend (hour, day, month, year).
const COLD_WEIGHTS: [f64; 4] = [0.15, 0.20, 0.60, 0.05];
/// Pillar weights for the dry blend (hour, day, month, year).
const DRY_WEIGHTS: [f64; 4] = [0.05, 0.60, 0.20, 0.15];

/// Normalized climate snapshot; each axis pair sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateSnapshot {
    pub cold: f64,
    pub warm: f64,
    pub dry: f64,
    pub wet: f64,
}

/// Raw per-pillar climate detail row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarClimate {
    pub pillar: Pillar,
    pub branch: Branch,
    pub cold: f64,
    pub warm: f64,
    pub dry: f64,
    pub wet: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Weighted hour/day/month/year blend of one score axis, normalized to 0..1.
fn blend(chart: &Chart, weights: [f64; 4], pick: fn(Branch) -> f64) -> f64 {
    let branches = [
        chart.hour.branch,
        chart.day.branch,
        chart.month.branch,
        chart.year.branch,
    ];
    let raw: f64 = branches
        .iter()
        .zip(weights)
        .map(|(&b, w)| pick(b) * w)
        .sum();
    raw / 10.0
}

fn cold_of(b: Branch) -> f64 {
    branch_scores(b).0
}

fn dry_of(b: Branch) -> f64 {
    branch_scores(b).2
}

/// Natal climate baseline of a chart.
pub fn natal_climate(chart: &Chart) -> ClimateSnapshot {
    let cold = blend(chart, COLD_WEIGHTS, cold_of);
    let dry = blend(chart, DRY_WEIGHTS, dry_of);
    ClimateSnapshot {
        cold: round2(cold),
        warm: round2(1.0 - cold),
        dry: round2(dry),
        wet: round2(1.0 - dry),
    }
}

/// Climate with an annual branch overlay: 70% natal, 30% annual.
pub fn climate_with_annual(chart: &Chart, annual: Branch) -> ClimateSnapshot {
    let base_cold = blend(chart, COLD_WEIGHTS, cold_of);
    let base_dry = blend(chart, DRY_WEIGHTS, dry_of);
    let cold = base_cold * 0.7 + cold_of(annual) / 10.0 * 0.3;
    let dry = base_dry * 0.7 + dry_of(annual) / 10.0 * 0.3;
    ClimateSnapshot {
        cold: round2(cold),
        warm: round2(1.0 - cold),
        dry: round2(dry),
        wet: round2(1.0 - dry),
    }
}

/// Raw climate rows per pillar, hour first (presentation order).
pub fn pillar_climate_rows(chart: &Chart) -> [PillarClimate; 4] {
    let row = |pillar: Pillar| {
        let branch = chart.pillar(pillar).branch;
        let (cold, warm, dry, wet) = branch_scores(branch);
        PillarClimate {
            pillar,
            branch,
            cold,
            warm,
            dry,
            wet,
        }
    };
    [
        row(Pillar::Hour),
        row(Pillar::Day),
        row(Pillar::Month),
        row(Pillar::Year),
    ]
}
