//! Serialized report structs assembled by the analysis pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use saju_base::{
    Branch, ClimateSnapshot, Element, MonthRank, Pillar, PillarClimate, PillarPosition, Stem,
    TenGod,
};
use saju_calendar::{CalendarType, Gender};
use serde::Serialize;

use crate::luck_cycle::{DecadeCycle, Direction};

/// Echo of the request plus the resolved instants.
#[derive(Debug, Clone, Serialize)]
pub struct InputEcho {
    pub calendar: CalendarType,
    pub date: String,
    /// Civil time as given; absent when the birth time was unknown.
    pub time: Option<String>,
    pub gender: Gender,
    pub leap_month: bool,
    pub overseas: bool,
    pub city: Option<String>,
    /// Solar civil date after any lunar conversion.
    pub solar_date: NaiveDate,
    /// Canonical local-mean-time instant everything was derived from.
    pub lmt: NaiveDateTime,
}

/// One natal pillar in display form.
#[derive(Debug, Clone, Serialize)]
pub struct PillarEntry {
    pub pillar: Pillar,
    pub stem: Stem,
    pub branch: Branch,
    pub name: String,
    pub hanja: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarReport {
    /// One-line romanized chart, year pillar first.
    pub summary: String,
    pub entries: Vec<PillarEntry>,
    pub time_known: bool,
    /// Romanized candidate hour pillars when the time was unknown.
    pub hour_candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LuckCycleReport {
    pub direction: Direction,
    /// Korean-age onset of the first cycle; negative sentinels flag an
    /// undecidable direction (-1) or a failed computation (-3).
    pub onset_age: i32,
    pub first_cycle_year: i32,
    pub cycles: Vec<DecadeCycle>,
}

/// One element with its normalized need score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElementNeed {
    pub element: Element,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreAnalysis {
    pub primary: Option<Element>,
    pub secondary: Option<Element>,
    pub tertiary: Option<Element>,
    pub ranking: Vec<ElementNeed>,
    /// Display keyword, e.g. "o (pyeongwan)".
    pub keyword: String,
    pub keyword_position: PillarPosition,
    pub keyword_ten_god: TenGod,
    pub luck_quantity: i32,
    /// One-line combination / clash / marker digest.
    pub interaction_summary: String,
}

/// Climate snapshot of one nearby year under its annual branch.
#[derive(Debug, Clone, Serialize)]
pub struct ClimateTrendEntry {
    pub label: &'static str,
    pub year: i32,
    /// Romanized annual pillar.
    pub annual: String,
    pub scores: ClimateSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClimateReport {
    pub natal: ClimateSnapshot,
    pub pillars: Vec<PillarClimate>,
    /// Last, reference, and next year overlays.
    pub trend: Vec<ClimateTrendEntry>,
}

/// One year of the luck trajectory in display form.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryEntry {
    pub year: i32,
    pub age: u32,
    pub cycle: String,
    pub annual: String,
    /// Intensity rounded to two decimals for display.
    pub value: f64,
    pub momentum: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    /// Mean intensity over the working ages (21 to 70).
    pub aggregate: f64,
    pub samples: Vec<TrajectoryEntry>,
}

/// The full analysis product.
#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub input: InputEcho,
    pub pillars: PillarReport,
    pub luck_cycles: LuckCycleReport,
    pub core: CoreAnalysis,
    pub climate: ClimateReport,
    pub monthly_ranking: Vec<MonthRank>,
    pub trajectory: TrajectoryReport,
}
