//! End-to-end analysis: normalized birth in, full chart report out.

use chrono::Datelike;
use saju_base::{
    GanJi, Pillar, climate_with_annual, detect_interactions, interaction_summary,
    monthly_ranking, natal_climate, pillar_climate_rows,
};
use saju_calendar::{BirthInput, CityResolver, LunarConverter, SolarTermProvider};
use tracing::{debug, info};

use crate::balance::assess_balance;
use crate::error::EngineError;
use crate::luck_cycle::{decade_cycles, direction, onset_age};
use crate::pillars::derive_chart;
use crate::trajectory::{aggregate_score, trajectory};
use crate::types::{
    ChartReport, ClimateReport, ClimateTrendEntry, CoreAnalysis, ElementNeed, InputEcho,
    LuckCycleReport, PillarEntry, PillarReport, TrajectoryEntry, TrajectoryReport,
};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// External data sources the pipeline draws on.
pub struct Providers {
    pub terms: SolarTermProvider,
    pub lunar: Box<dyn LunarConverter>,
    pub cities: Box<dyn CityResolver>,
}

/// Run the whole pipeline for one birth.
///
/// `reference_year` anchors the three-year climate trend; callers pass
/// the current civil year.
pub fn analyze(
    input: &BirthInput,
    providers: &Providers,
    reference_year: i32,
) -> Result<ChartReport, EngineError> {
    let normalized =
        saju_calendar::normalize_birth(input, providers.lunar.as_ref(), providers.cities.as_ref())?;
    debug!(lmt = %normalized.lmt, "normalized birth instant");

    let derived = derive_chart(&normalized, &providers.terms)?;
    let chart = derived.chart;
    info!(
        chart = %chart_summary(&chart),
        astro_year = derived.astro_year,
        "derived natal chart"
    );

    let dir = direction(chart.year.stem, input.gender);
    let onset = onset_age(
        normalized.lmt,
        dir,
        derived.astro_year,
        derived.period_index,
        &providers.terms,
    );
    let birth_year = normalized.solar_date.year();
    let cycles = decade_cycles(birth_year, chart.month, onset, dir);
    let first_cycle_year = birth_year + onset - 1;

    let balance = assess_balance(&chart);
    let samples = trajectory(
        &chart,
        birth_year,
        &balance.ranking,
        balance.keyword,
        balance.luck_quantity,
        &cycles,
    );
    let aggregate = round2(aggregate_score(&samples));

    let interactions = detect_interactions(&chart);

    let trend = [-1i32, 0, 1]
        .into_iter()
        .map(|offset| {
            let year = reference_year + offset;
            let annual = GanJi::for_year(year);
            ClimateTrendEntry {
                label: match offset {
                    -1 => "last_year",
                    0 => "this_year",
                    _ => "next_year",
                },
                year,
                annual: annual.name(),
                scores: climate_with_annual(&chart, annual.branch),
            }
        })
        .collect();

    Ok(ChartReport {
        input: InputEcho {
            calendar: input.calendar,
            date: input.date.clone(),
            time: (!input.time_unknown).then(|| input.time.clone()),
            gender: input.gender,
            leap_month: input.leap_month,
            overseas: input.overseas,
            city: (!input.city.is_empty()).then(|| input.city.clone()),
            solar_date: normalized.solar_date,
            lmt: normalized.lmt,
        },
        pillars: PillarReport {
            summary: chart_summary(&chart),
            entries: [Pillar::Year, Pillar::Month, Pillar::Day, Pillar::Hour]
                .into_iter()
                .map(|p| {
                    let pair = chart.pillar(p);
                    PillarEntry {
                        pillar: p,
                        stem: pair.stem,
                        branch: pair.branch,
                        name: pair.name(),
                        hanja: pair.hanja(),
                    }
                })
                .collect(),
            time_known: normalized.time_known,
            hour_candidates: derived.hour_candidates.iter().map(|g| g.name()).collect(),
        },
        luck_cycles: LuckCycleReport {
            direction: dir,
            onset_age: onset,
            first_cycle_year,
            cycles,
        },
        core: CoreAnalysis {
            primary: balance.primary,
            secondary: balance.secondary,
            tertiary: balance.tertiary,
            ranking: balance
                .ranking
                .iter()
                .map(|&(element, score)| ElementNeed { element, score })
                .collect(),
            keyword: format!(
                "{} ({})",
                balance.keyword.name(),
                balance.keyword_ten_god.korean_name()
            ),
            keyword_position: balance.keyword_position,
            keyword_ten_god: balance.keyword_ten_god,
            luck_quantity: balance.luck_quantity,
            interaction_summary: interaction_summary(&interactions),
        },
        climate: ClimateReport {
            natal: natal_climate(&chart),
            pillars: pillar_climate_rows(&chart).to_vec(),
            trend,
        },
        monthly_ranking: monthly_ranking(balance.primary),
        trajectory: TrajectoryReport {
            aggregate,
            samples: samples
                .iter()
                .map(|s| TrajectoryEntry {
                    year: s.year,
                    age: s.age,
                    cycle: s.cycle.name(),
                    annual: s.annual.name(),
                    value: round2(s.intensity),
                    momentum: s.momentum,
                })
                .collect(),
        },
    })
}

fn chart_summary(chart: &saju_base::Chart) -> String {
    format!(
        "{} {} {} {}",
        chart.year.name(),
        chart.month.name(),
        chart.day.name(),
        chart.hour.name()
    )
}

#[cfg(test)]
mod tests {
    use saju_base::Element;
    use saju_calendar::{CalendarType, Gender, NoLunarSource, NullTermSource, StaticCityTable};

    use super::*;

    fn offline_providers() -> Providers {
        Providers {
            terms: SolarTermProvider::new(Box::new(NullTermSource)),
            lunar: Box::new(NoLunarSource),
            cities: Box::new(StaticCityTable),
        }
    }

    fn golden_input() -> BirthInput {
        BirthInput {
            calendar: CalendarType::Solar,
            date: "19900615".into(),
            time: "1230".into(),
            gender: Gender::Male,
            leap_month: false,
            time_unknown: false,
            overseas: false,
            city: String::new(),
        }
    }

    #[test]
    fn full_pipeline_on_golden_input() {
        let report = analyze(&golden_input(), &offline_providers(), 2026).unwrap();
        assert_eq!(report.pillars.summary, "gyeong-o im-o sin-hae gap-o");
        assert_eq!(report.luck_cycles.onset_age, 7);
        assert_eq!(report.luck_cycles.first_cycle_year, 1996);
        assert_eq!(report.core.primary, Some(Element::Earth));
        assert_eq!(report.core.luck_quantity, 8);
        assert_eq!(report.trajectory.samples.len(), 95);
        assert!(report.pillars.hour_candidates.is_empty());
        assert_eq!(report.monthly_ranking.len(), 12);
    }

    #[test]
    fn unknown_time_reports_candidates() {
        let mut input = golden_input();
        input.time_unknown = true;
        let report = analyze(&input, &offline_providers(), 2026).unwrap();
        assert!(!report.pillars.time_known);
        assert_eq!(report.pillars.hour_candidates.len(), 12);
        assert_eq!(report.input.time, None);
        // The noon placeholder lands in the O watch either way.
        assert_eq!(report.pillars.summary, "gyeong-o im-o sin-hae gap-o");
    }

    #[test]
    fn invalid_date_is_rejected() {
        let mut input = golden_input();
        input.date = "1990-6-15".into();
        let err = analyze(&input, &offline_providers(), 2026).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn climate_trend_brackets_reference_year() {
        let report = analyze(&golden_input(), &offline_providers(), 2026).unwrap();
        let years: Vec<i32> = report.climate.trend.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2025, 2026, 2027]);
        for entry in &report.climate.trend {
            assert!((entry.scores.cold + entry.scores.warm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn report_serializes_to_json() {
        let report = analyze(&golden_input(), &offline_providers(), 2026).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["core"]["primary"], "earth");
        assert_eq!(json["luck_cycles"]["direction"], "forward");
    }
}
