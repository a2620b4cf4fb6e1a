//! Elemental balance scoring, keyword selection, and luck quantity.
//!
//! Each chart slot is judged strong or weak against its neighbors: forces
//! feeding the slot (its generator and its restrainer) against forces it
//! spends itself on (what it generates and restrains). A strong slot wants
//! the elements that drain it, a weak one wants the elements that feed it,
//! and each want accrues the slot's fixed weight. Normalized totals rank
//! the five elements; the top-ranked element present in the chart becomes
//! the keyword.

use saju_base::{
    ALL_ELEMENTS, ALL_POSITIONS, Chart, Element, PillarPosition, Symbol, TenGod, classify_symbol,
};
use serde::Serialize;

/// Total slot weight, the normalization denominator.
const TOTAL_WEIGHT: f64 = 4.3;

/// Keyword search order over the chart slots. Stems outrank branches and
/// the month stem leads; the day stem is held back as the fallback.
const KEYWORD_SEARCH_ORDER: [PillarPosition; 7] = [
    PillarPosition::MonthStem,
    PillarPosition::HourStem,
    PillarPosition::YearStem,
    PillarPosition::MonthBranch,
    PillarPosition::DayBranch,
    PillarPosition::HourBranch,
    PillarPosition::YearBranch,
];

/// Ranked balance result for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceOutcome {
    /// All five elements with their normalized need score, best first.
    /// Ties keep the canonical generation-cycle order.
    pub ranking: Vec<(Element, f64)>,
    pub primary: Option<Element>,
    pub secondary: Option<Element>,
    pub tertiary: Option<Element>,
    /// Representative chart symbol for the top needed element.
    pub keyword: Symbol,
    pub keyword_position: PillarPosition,
    /// Relation of the keyword to the day master.
    pub keyword_ten_god: TenGod,
    /// Magnitude of the keyword's support or opposition within the chart.
    pub luck_quantity: i32,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Elements one slot calls for, by strength of its neighborhood.
/// A balanced slot calls for nothing.
fn needed_for_position(chart: &Chart, pos: PillarPosition) -> Option<[Element; 2]> {
    let center = chart.symbol(pos).element();
    let mut in_force = 0u32;
    let mut out_force = 0u32;

    for &neighbor_pos in pos.neighbors() {
        let neighbor = chart.symbol(neighbor_pos).element();
        if neighbor == center {
            continue;
        }
        if neighbor == center.generated_by() || neighbor == center.restrained_by() {
            in_force += 1;
        }
        if neighbor == center.generates() || neighbor == center.restrains() {
            out_force += 1;
        }
    }

    if in_force > out_force {
        Some([center.restrains(), center.generates()])
    } else if out_force > in_force {
        Some([center.generated_by(), center.restrained_by()])
    } else {
        None
    }
}

/// Normalized need score per element, in canonical element order.
pub fn element_scores(chart: &Chart) -> [f64; 5] {
    let mut raw = [0.0f64; 5];
    for pos in ALL_POSITIONS {
        if let Some(needed) = needed_for_position(chart, pos) {
            for el in needed {
                raw[el.index()] += pos.weight();
            }
        }
    }
    let mut scores = [0.0f64; 5];
    for (i, total) in raw.iter().enumerate() {
        scores[i] = round2(total / TOTAL_WEIGHT);
    }
    scores
}

fn ranked(scores: [f64; 5]) -> Vec<(Element, f64)> {
    let mut ranking: Vec<(Element, f64)> = ALL_ELEMENTS
        .iter()
        .map(|&el| (el, scores[el.index()]))
        .collect();
    // Stable sort keeps the canonical order for equal scores.
    ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranking
}

/// First chart symbol matching the primary needed element, then the
/// secondary; the day master itself when neither appears.
fn derive_keyword(
    chart: &Chart,
    primary: Option<Element>,
    secondary: Option<Element>,
) -> (Symbol, PillarPosition) {
    for wanted in [primary, secondary].into_iter().flatten() {
        for pos in KEYWORD_SEARCH_ORDER {
            let symbol = chart.symbol(pos);
            if symbol.element() == wanted {
                return (symbol, pos);
            }
        }
    }
    (
        chart.symbol(PillarPosition::DayStem),
        PillarPosition::DayStem,
    )
}

/// Signed support for the keyword element over the slots participating
/// with the keyword's slot, taken as a magnitude. Feeding forces add,
/// opposing and draining ones subtract. Never zero.
pub fn luck_quantity(chart: &Chart, reference: Element, keyword_pos: PillarPosition) -> i32 {
    let mut total = 0i32;
    for &pos in keyword_pos.participants() {
        let el = chart.symbol(pos).element();
        if el == reference {
            continue;
        }
        if el == reference.generated_by() {
            total += 1;
        } else if el == reference.restrained_by() {
            total -= 2;
        } else if el == reference.generates() {
            total -= 1;
        } else if el == reference.restrains() {
            total -= 2;
        }
    }
    let quantity = total.abs();
    if quantity == 0 { 1 } else { quantity }
}

/// Full balance assessment of a chart.
pub fn assess_balance(chart: &Chart) -> BalanceOutcome {
    let ranking = ranked(element_scores(chart));
    let primary = ranking.first().map(|&(el, _)| el);
    let secondary = ranking.get(1).map(|&(el, _)| el);
    let tertiary = ranking.get(2).map(|&(el, _)| el);

    let (keyword, keyword_position) = derive_keyword(chart, primary, secondary);
    let day_master = chart.day.stem;

    BalanceOutcome {
        keyword_ten_god: classify_symbol(day_master, keyword),
        luck_quantity: luck_quantity(chart, keyword.element(), keyword_position),
        ranking,
        primary,
        secondary,
        tertiary,
        keyword,
        keyword_position,
    }
}

#[cfg(test)]
mod tests {
    use saju_base::{Branch, GanJi, Stem};

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

    #[test]
    fn golden_scores_rank_earth_fire_metal() {
        let scores = element_scores(&golden_chart());
        assert_eq!(scores[Element::Earth.index()], 0.58);
        assert_eq!(scores[Element::Fire.index()], 0.33);
        assert_eq!(scores[Element::Metal.index()], 0.26);
        assert_eq!(scores[Element::Wood.index()], 0.05);
        assert_eq!(scores[Element::Water.index()], 0.05);
    }

    #[test]
    fn ties_keep_canonical_element_order() {
        let ranking = ranked(element_scores(&golden_chart()));
        let order: Vec<Element> = ranking.iter().map(|&(el, _)| el).collect();
        assert_eq!(
            order,
            vec![
                Element::Earth,
                Element::Fire,
                Element::Metal,
                Element::Wood,
                Element::Water
            ]
        );
    }

    #[test]
    fn keyword_falls_through_to_secondary_element() {
        // No earth symbol in the chart, so the fire month branch wins.
        let outcome = assess_balance(&golden_chart());
        assert_eq!(outcome.primary, Some(Element::Earth));
        assert_eq!(outcome.secondary, Some(Element::Fire));
        assert_eq!(outcome.tertiary, Some(Element::Metal));
        assert_eq!(outcome.keyword, Symbol::Branch(Branch::O));
        assert_eq!(outcome.keyword_position, PillarPosition::MonthBranch);
    }

    #[test]
    fn golden_luck_quantity() {
        let outcome = assess_balance(&golden_chart());
        assert_eq!(outcome.luck_quantity, 8);
    }

    #[test]
    fn keyword_ten_god_against_day_master() {
        let outcome = assess_balance(&golden_chart());
        assert_eq!(outcome.keyword_ten_god, TenGod::IndirectAuthority);
    }

    #[test]
    fn luck_quantity_never_zero() {
        // Gap-Ja / Byeong-In / Gap-In / Gap-Ja: wood-heavy chart where the
        // (wood) keyword slot sums to zero support.
        let chart = Chart {
            year: GanJi::from_indices(0, 0),
            month: GanJi::from_indices(2, 2),
            day: GanJi::from_indices(0, 2),
            hour: GanJi::from_indices(0, 0),
        };
        let outcome = assess_balance(&chart);
        assert!(outcome.luck_quantity >= 1);
    }

    #[test]
    fn balanced_slot_requests_nothing() {
        // The golden chart's year branch sees one feeder and one drainer.
        assert_eq!(
            needed_for_position(&golden_chart(), PillarPosition::YearBranch),
            None
        );
    }

    #[test]
    fn day_master_fallback_when_no_needed_element_present() {
        // All-metal chart: Gyeong-Sin everywhere. Needed elements never
        // appear among the symbols, so the day stem is the keyword.
        let pair = GanJi::from_indices(6, 8);
        let chart = Chart {
            year: pair,
            month: pair,
            day: pair,
            hour: pair,
        };
        let outcome = assess_balance(&chart);
        assert_eq!(outcome.keyword, Symbol::Stem(Stem::Gyeong));
        assert_eq!(outcome.keyword_position, PillarPosition::DayStem);
        assert_eq!(outcome.keyword_ten_god, TenGod::Rival);
    }
}
