//! Hundred-year luck trajectory scoring.
//!
//! Every year of life is scored over four slots: the governing decade
//! cycle's stem and branch and the annual pillar's stem and branch. Raw
//! totals are normalized against the theoretical extremes over all
//! sexagenary pairings, scaled by the chart's luck quantity, and smoothed
//! into a centered three-year momentum.

use saju_base::{Branch, Chart, Element, GanJi, SIXTY_GANJI, Symbol};
use serde::Serialize;

use crate::luck_cycle::DecadeCycle;
use crate::trajectory_data::{
    HALF_COMBO_TRIGGERS, LuckSlot, OVERRIDE_KEYWORDS, OVERRIDE_TRIGGERS, interaction_coefficient,
    storage_base,
};

/// Base weight of a symbol matching the primary or secondary needed
/// element.
const PRIMARY_BASE: f64 = 12.0;
const SECONDARY_BASE: f64 = 10.0;

/// One scored year of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LuckSample {
    pub age: u32,
    pub year: i32,
    pub cycle: GanJi,
    pub cycle_start: i32,
    pub cycle_end: i32,
    pub annual: GanJi,
    /// Normalized signed intensity, three decimals.
    pub intensity: f64,
    /// Centered three-year mean, absent at the trajectory edges.
    pub momentum: Option<f64>,
}

/// Theoretical extreme totals over every decade/annual pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub max: f64,
    pub min: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn plain_base(el: Element, primary: Element, secondary: Option<Element>) -> f64 {
    if el == primary {
        PRIMARY_BASE
    } else if secondary == Some(el) {
        SECONDARY_BASE
    } else {
        1.0
    }
}

/// Weighted contribution of one transit symbol.
fn slot_score(
    symbol: Symbol,
    slot: LuckSlot,
    primary: Element,
    secondary: Option<Element>,
) -> f64 {
    let el = symbol.element();
    let base = match symbol {
        Symbol::Branch(branch) if slot.is_branch() => {
            storage_base(branch, primary).unwrap_or_else(|| plain_base(el, primary, secondary))
        }
        _ => plain_base(el, primary, secondary),
    };
    base * interaction_coefficient(primary, el) * slot.weight()
}

fn pair_total(
    cycle: GanJi,
    annual: GanJi,
    primary: Element,
    secondary: Option<Element>,
) -> f64 {
    slot_score(Symbol::Stem(cycle.stem), LuckSlot::CycleStem, primary, secondary)
        + slot_score(Symbol::Branch(cycle.branch), LuckSlot::CycleBranch, primary, secondary)
        + slot_score(Symbol::Stem(annual.stem), LuckSlot::AnnualStem, primary, secondary)
        + slot_score(Symbol::Branch(annual.branch), LuckSlot::AnnualBranch, primary, secondary)
}

/// Extreme totals over all 3600 decade/annual pairings, scored against
/// the chart's original needed elements.
pub fn theoretical_extremes(primary: Element, secondary: Option<Element>) -> Extremes {
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for cycle in SIXTY_GANJI {
        for annual in SIXTY_GANJI {
            let total = pair_total(cycle, annual, primary, secondary);
            if total > max {
                max = total;
            }
            if total < min {
                min = total;
            }
        }
    }
    Extremes { max, min }
}

/// Needed elements in effect for one year, after checking whether a
/// transit branch completes a natal half-combination through the keyword.
///
/// When it does, the primary is considered consumed by the combination:
/// the secondary and tertiary take over and the year's intensity is
/// damped. Only a branch keyword participates.
fn effective_needed(
    chart: &Chart,
    keyword: Symbol,
    ranking: &[(Element, f64)],
    cycle_branch: Branch,
    annual_branch: Branch,
) -> (Option<Element>, Option<Element>, bool) {
    let original = (
        ranking.first().map(|&(el, _)| el),
        ranking.get(1).map(|&(el, _)| el),
        false,
    );

    let Symbol::Branch(keyword_branch) = keyword else {
        return original;
    };
    if !OVERRIDE_KEYWORDS.contains(&keyword_branch) {
        return original;
    }
    if !OVERRIDE_TRIGGERS.contains(&cycle_branch) && !OVERRIDE_TRIGGERS.contains(&annual_branch) {
        return original;
    }

    let [yb, mb, db, hb] = chart.branches();
    let adjacent = [(yb, mb), (mb, db), (db, hb)];

    for ((a, b), trigger) in HALF_COMBO_TRIGGERS {
        if cycle_branch != trigger && annual_branch != trigger {
            continue;
        }
        let natal_hit = adjacent
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a));
        if natal_hit && (keyword_branch == a || keyword_branch == b) {
            return (
                ranking.get(1).map(|&(el, _)| el),
                ranking.get(2).map(|&(el, _)| el),
                true,
            );
        }
    }
    original
}

/// Score the full trajectory, ages 0 through 100.
///
/// Years before the first decade cycle or after the last produce no
/// sample. An empty ranking produces an empty trajectory.
pub fn trajectory(
    chart: &Chart,
    birth_year: i32,
    ranking: &[(Element, f64)],
    keyword: Symbol,
    luck_quantity: i32,
    cycles: &[DecadeCycle],
) -> Vec<LuckSample> {
    let Some(&(original_primary, _)) = ranking.first() else {
        return Vec::new();
    };
    let original_secondary = ranking.get(1).map(|&(el, _)| el);
    let extremes = theoretical_extremes(original_primary, original_secondary);

    let mut samples = Vec::with_capacity(101);
    for age in 0u32..=100 {
        let year = birth_year + age as i32;
        let annual = GanJi::for_year(year);
        let Some(cycle) = cycles.iter().find(|c| c.covers(year)) else {
            continue;
        };

        let (primary, secondary, adjusted) =
            effective_needed(chart, keyword, ranking, cycle.pillar.branch, annual.branch);
        let total = match primary {
            Some(p) => pair_total(cycle.pillar, annual, p, secondary),
            None => 0.0,
        };

        let effective = if total > 0.0 && extremes.max != 0.0 {
            total / extremes.max
        } else if total < 0.0 && extremes.min != 0.0 {
            total / extremes.min.abs()
        } else {
            0.0
        };

        let mut intensity = (effective * f64::from(luck_quantity)) / 10.0;
        if adjusted {
            intensity /= 10.0;
        }

        samples.push(LuckSample {
            age,
            year,
            cycle: cycle.pillar,
            cycle_start: cycle.start_year,
            cycle_end: cycle.end_year,
            annual,
            intensity: round3(intensity),
            momentum: None,
        });
    }

    fill_momentum(&mut samples);
    samples
}

/// Centered three-sample rolling mean; the first and last samples stay
/// unset.
fn fill_momentum(samples: &mut [LuckSample]) {
    let n = samples.len();
    if n < 3 {
        return;
    }
    for i in 1..n - 1 {
        let mean =
            (samples[i - 1].intensity + samples[i].intensity + samples[i + 1].intensity) / 3.0;
        let mut value = round2(mean);
        if value == 0.0 {
            value = 0.0; // normalize -0.0
        }
        samples[i].momentum = Some(value);
    }
}

/// Mean intensity over ages 21 through 70, the working span; the whole
/// trajectory when no sample lands there, zero when empty.
pub fn aggregate_score(samples: &[LuckSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let working: Vec<f64> = samples
        .iter()
        .filter(|s| (21..=70).contains(&s.age))
        .map(|s| s.intensity)
        .collect();
    let pool: Vec<f64> = if working.is_empty() {
        samples.iter().map(|s| s.intensity).collect()
    } else {
        working
    };
    pool.iter().sum::<f64>() / pool.len() as f64
}

#[cfg(test)]
mod tests {
    use saju_base::{Branch, PillarPosition, Stem};

    use crate::balance::assess_balance;
    use crate::luck_cycle::{Direction, decade_cycles};

    use super::*;

    /// Gyeong-O / Im-O / Sin-Hae / Gap-O (solar 1990-06-15 noon).
    fn golden_chart() -> Chart {
        Chart {
            year: GanJi::from_indices(6, 6),
            month: GanJi::from_indices(8, 6),
            day: GanJi::from_indices(7, 11),
            hour: GanJi::from_indices(0, 6),
        }
    }

    fn golden_trajectory() -> Vec<LuckSample> {
        let chart = golden_chart();
        let outcome = assess_balance(&chart);
        let cycles = decade_cycles(1990, chart.month, 7, Direction::Forward);
        trajectory(
            &chart,
            1990,
            &outcome.ranking,
            outcome.keyword,
            outcome.luck_quantity,
            &cycles,
        )
    }

    #[test]
    fn earth_primary_extremes_are_all_positive() {
        // The earth interaction row has no negative entry, so even the
        // worst pairing stays positive.
        let ext = theoretical_extremes(Element::Earth, Some(Element::Fire));
        assert_eq!(ext.max, 256.0);
        assert_eq!(ext.min, 12.0);
    }

    #[test]
    fn samples_start_at_first_cycle_year() {
        let samples = golden_trajectory();
        assert_eq!(samples.first().map(|s| s.age), Some(6));
        assert_eq!(samples.last().map(|s| s.age), Some(100));
        assert_eq!(samples.len(), 95);
    }

    #[test]
    fn golden_intensities() {
        let samples = golden_trajectory();
        // Age 6 (1996): cycle Gye-Mi, annual Byeong-Ja; slot total 96 of
        // max 256, times quantity 8 over 10.
        let age6 = &samples[0];
        assert_eq!(age6.year, 1996);
        assert_eq!(age6.cycle.stem, Stem::Gye);
        assert_eq!(age6.cycle.branch, Branch::Mi);
        assert_eq!(age6.annual.stem, Stem::Byeong);
        assert_eq!(age6.annual.branch, Branch::Ja);
        assert_eq!(age6.intensity, 0.3);

        // Age 7 (1997): annual Jeong-Chuk, the Chuk storage branch
        // scoring 100 on its own; total 191.
        let age7 = &samples[1];
        assert_eq!(age7.annual.stem, Stem::Jeong);
        assert_eq!(age7.annual.branch, Branch::Chuk);
        assert_eq!(age7.intensity, 0.597);

        // Age 8 (1998): annual Mu-In; total 138.
        let age8 = &samples[2];
        assert_eq!(age8.annual.stem, Stem::Mu);
        assert_eq!(age8.annual.branch, Branch::In);
        assert_eq!(age8.intensity, 0.431);
    }

    #[test]
    fn momentum_is_centered_mean_with_open_edges() {
        let samples = golden_trajectory();
        assert_eq!(samples[0].momentum, None);
        assert_eq!(samples[samples.len() - 1].momentum, None);
        // Ages 6..8 score 0.3, 0.597, 0.431.
        assert_eq!(samples[1].momentum, Some(0.44));
    }

    #[test]
    fn aggregate_covers_working_ages() {
        let samples = golden_trajectory();
        let expected: Vec<f64> = samples
            .iter()
            .filter(|s| (21..=70).contains(&s.age))
            .map(|s| s.intensity)
            .collect();
        let mean = expected.iter().sum::<f64>() / expected.len() as f64;
        assert!((aggregate_score(&samples) - mean).abs() < 1e-12);
        assert_eq!(aggregate_score(&[]), 0.0);
    }

    #[test]
    fn stem_keyword_never_triggers_override() {
        // Chart with the metal stem Sin as keyword; the homophonous Sin
        // branch rules must not fire.
        let chart = golden_chart();
        let ranking = vec![(Element::Metal, 0.5), (Element::Fire, 0.3), (Element::Wood, 0.1)];
        let (p, s, adjusted) = effective_needed(
            &chart,
            Symbol::Stem(Stem::Sin),
            &ranking,
            Branch::O,
            Branch::Ja,
        );
        assert_eq!(p, Some(Element::Metal));
        assert_eq!(s, Some(Element::Fire));
        assert!(!adjusted);
    }

    #[test]
    fn override_requires_natal_adjacency_and_keyword_membership() {
        // Natal branches Sul(Y) O(M) In(D) O(H): In-Sul are not adjacent,
        // so an O transit completes nothing.
        let chart = Chart {
            year: GanJi::from_indices(0, 10),
            month: GanJi::from_indices(4, 6),
            day: GanJi::from_indices(6, 2),
            hour: GanJi::from_indices(0, 6),
        };
        let ranking = vec![(Element::Wood, 0.5), (Element::Fire, 0.3), (Element::Water, 0.1)];
        let (_, _, adjusted) = effective_needed(
            &chart,
            Symbol::Branch(Branch::In),
            &ranking,
            Branch::O,
            Branch::Ja,
        );
        assert!(!adjusted);

        // Month-day Sul-In adjacency completes In-O-Sul under an O transit.
        let chart = Chart {
            year: GanJi::from_indices(0, 0),
            month: GanJi::from_indices(4, 10),
            day: GanJi::from_indices(6, 2),
            hour: GanJi::from_indices(0, 6),
        };
        let (p, s, adjusted) = effective_needed(
            &chart,
            Symbol::Branch(Branch::In),
            &ranking,
            Branch::O,
            Branch::Ja,
        );
        assert!(adjusted);
        assert_eq!(p, Some(Element::Fire));
        assert_eq!(s, Some(Element::Water));
    }

    #[test]
    fn adjusted_year_is_damped_tenfold() {
        // Natal month-day In-Sul adjacency with keyword In; the 2014
        // annual O branch (Gap-O year) completes the trine.
        let chart = Chart {
            year: GanJi::from_indices(0, 0),
            month: GanJi::from_indices(2, 2),
            day: GanJi::from_indices(0, 10),
            hour: GanJi::from_indices(0, 0),
        };
        let ranking = vec![(Element::Wood, 0.5), (Element::Fire, 0.3), (Element::Water, 0.1)];
        let cycles = decade_cycles(1990, chart.month, 5, Direction::Forward);
        let samples = trajectory(&chart, 1990, &ranking, Symbol::Branch(Branch::In), 4, &cycles);

        let y2014 = samples.iter().find(|s| s.year == 2014).copied();
        let Some(sample) = y2014 else {
            panic!("2014 not covered");
        };
        assert_eq!(sample.annual.branch, Branch::O);
        // Same slots scored undamped for comparison.
        let ext = theoretical_extremes(Element::Wood, Some(Element::Fire));
        let raw = pair_total(sample.cycle, sample.annual, Element::Fire, Some(Element::Water));
        let eff = if raw > 0.0 { raw / ext.max } else { raw / ext.min.abs() };
        assert_eq!(sample.intensity, round3(eff * 4.0 / 10.0 / 10.0));
    }

    #[test]
    fn keyword_position_unused_by_scoring() {
        // Balance hands the trajectory only the keyword symbol; make sure
        // the golden keyword is the one the override logic would see.
        let outcome = assess_balance(&golden_chart());
        assert_eq!(outcome.keyword_position, PillarPosition::MonthBranch);
        assert_eq!(outcome.keyword, Symbol::Branch(Branch::O));
    }
}
