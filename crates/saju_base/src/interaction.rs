//! Combination, clash, and marker detection over a natal chart.
//!
//! Adjacency rules:
//! - stem combinations are checked between adjacent stem slots only
//!   (year-month, month-day, day-hour)
//! - six-combinations and clashes are checked between adjacent branch
//!   slots only (hour-day, day-month, month-year); identical adjacent
//!   branches are skipped
//! - trine and directional groups are checked across all four branches
//!   regardless of position; a half trine needs exactly two members, one
//!   of them the group's dominant (middle) branch

use serde::Serialize;

use crate::element::Element;
use crate::ganji::{Branch, Stem};
use crate::pillars::{ALL_PILLARS, Chart, Pillar};

/// Five stem combination pairs and the element each fuses into.
const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),
    (Stem::Eul, Stem::Gyeong, Element::Metal),
    (Stem::Byeong, Stem::Sin, Element::Water),
    (Stem::Jeong, Stem::Im, Element::Wood),
    (Stem::Mu, Stem::Gye, Element::Fire),
];

/// Six branch combination pairs; the O-Mi pair fuses into no element.
const SIX_COMBINATIONS: [(Branch, Branch, Option<Element>); 6] = [
    (Branch::Ja, Branch::Chuk, Some(Element::Earth)),
    (Branch::In, Branch::Hae, Some(Element::Wood)),
    (Branch::Myo, Branch::Sul, Some(Element::Fire)),
    (Branch::Jin, Branch::Yu, Some(Element::Metal)),
    (Branch::Sa, Branch::Sin, Some(Element::Water)),
    (Branch::O, Branch::Mi, None),
];

/// Six opposite-branch clash pairs.
const CLASH_PAIRS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// Four trine groups [birth, dominant, grave] and their fused element.
pub const TRINE_GROUPS: [([Branch; 3], Element); 4] = [
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal),
    ([Branch::Sin, Branch::Ja, Branch::Jin], Element::Water),
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),
];

/// Four seasonal (directional) groups and their element.
const DIRECTIONAL_GROUPS: [([Branch; 3], Element); 4] = [
    ([Branch::In, Branch::Myo, Branch::Jin], Element::Wood),
    ([Branch::Sa, Branch::O, Branch::Mi], Element::Fire),
    ([Branch::Sin, Branch::Yu, Branch::Sul], Element::Metal),
    ([Branch::Hae, Branch::Ja, Branch::Chuk], Element::Water),
];

/// Trine group containing a branch (every branch belongs to exactly one).
pub const fn trine_group_of(branch: Branch) -> ([Branch; 3], Element) {
    match branch {
        Branch::In | Branch::O | Branch::Sul => TRINE_GROUPS[0],
        Branch::Sa | Branch::Yu | Branch::Chuk => TRINE_GROUPS[1],
        Branch::Sin | Branch::Ja | Branch::Jin => TRINE_GROUPS[2],
        Branch::Hae | Branch::Myo | Branch::Mi => TRINE_GROUPS[3],
    }
}

/// A stem combination between two adjacent pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StemCombination {
    pub first: (Pillar, Stem),
    pub second: (Pillar, Stem),
    pub fused: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchRelationKind {
    SixCombination,
    Clash,
}

/// A pairwise branch relation between two adjacent pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BranchRelation {
    pub kind: BranchRelationKind,
    pub first: (Pillar, Branch),
    pub second: (Pillar, Branch),
    /// Fused element for six-combinations that carry one.
    pub fused: Option<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Trine,
    HalfTrine,
    Directional,
}

/// A trine / directional group match across the four natal branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCombination {
    pub kind: GroupKind,
    pub element: Element,
    /// Matched members with the pillar each was found at.
    pub members: Vec<(Pillar, Branch)>,
}

/// The four symbolic markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    PeachBlossom,
    Canopy,
    RedBlossom,
    PostHorse,
}

impl Marker {
    pub const fn name(self) -> &'static str {
        match self {
            Self::PeachBlossom => "peach_blossom",
            Self::Canopy => "canopy",
            Self::RedBlossom => "red_blossom",
            Self::PostHorse => "post_horse",
        }
    }

    /// Korean romanized name.
    pub const fn korean_name(self) -> &'static str {
        match self {
            Self::PeachBlossom => "dohwa",
            Self::Canopy => "hwagae",
            Self::RedBlossom => "hongyeom",
            Self::PostHorse => "yeongma",
        }
    }
}

/// A marker found at a pillar's branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerHit {
    pub marker: Marker,
    pub pillar: Pillar,
    pub branch: Branch,
}

/// Full detection result over one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionReport {
    pub stem_combinations: Vec<StemCombination>,
    pub branch_relations: Vec<BranchRelation>,
    pub group_combinations: Vec<GroupCombination>,
    pub markers: Vec<MarkerHit>,
}

/// Adjacent stem slot pairs, year outward.
const ADJACENT_STEM_PAIRS: [(Pillar, Pillar); 3] = [
    (Pillar::Year, Pillar::Month),
    (Pillar::Month, Pillar::Day),
    (Pillar::Day, Pillar::Hour),
];

/// Adjacent branch slot pairs, hour inward (reporting order).
const ADJACENT_BRANCH_PAIRS: [(Pillar, Pillar); 3] = [
    (Pillar::Hour, Pillar::Day),
    (Pillar::Day, Pillar::Month),
    (Pillar::Month, Pillar::Year),
];

fn find_stem_combinations(chart: &Chart) -> Vec<StemCombination> {
    let mut out = Vec::new();
    for (p1, p2) in ADJACENT_STEM_PAIRS {
        let s1 = chart.pillar(p1).stem;
        let s2 = chart.pillar(p2).stem;
        for (a, b, fused) in STEM_COMBINATIONS {
            if (s1 == a && s2 == b) || (s1 == b && s2 == a) {
                out.push(StemCombination {
                    first: (p1, s1),
                    second: (p2, s2),
                    fused,
                });
            }
        }
    }
    out
}

fn find_branch_relations(chart: &Chart) -> Vec<BranchRelation> {
    let mut out = Vec::new();
    for (p1, p2) in ADJACENT_BRANCH_PAIRS {
        let b1 = chart.pillar(p1).branch;
        let b2 = chart.pillar(p2).branch;
        if b1 == b2 {
            continue;
        }
        for (a, b) in CLASH_PAIRS {
            if (b1 == a && b2 == b) || (b1 == b && b2 == a) {
                out.push(BranchRelation {
                    kind: BranchRelationKind::Clash,
                    first: (p1, b1),
                    second: (p2, b2),
                    fused: None,
                });
            }
        }
        for (a, b, fused) in SIX_COMBINATIONS {
            if (b1 == a && b2 == b) || (b1 == b && b2 == a) {
                out.push(BranchRelation {
                    kind: BranchRelationKind::SixCombination,
                    first: (p1, b1),
                    second: (p2, b2),
                    fused,
                });
            }
        }
    }
    out
}

/// First pillar holding `branch`, searched year→hour.
fn position_of(chart: &Chart, branch: Branch) -> Option<Pillar> {
    ALL_PILLARS
        .into_iter()
        .find(|&p| chart.pillar(p).branch == branch)
}

fn find_group_combinations(chart: &Chart) -> Vec<GroupCombination> {
    let mut out = Vec::new();
    for (members, element) in TRINE_GROUPS {
        let present: Vec<(Pillar, Branch)> = members
            .iter()
            .filter_map(|&m| position_of(chart, m).map(|p| (p, m)))
            .collect();
        if present.len() == 3 {
            out.push(GroupCombination {
                kind: GroupKind::Trine,
                element,
                members: present,
            });
        } else if present.len() == 2 {
            // Half trine: the dominant (middle) member must be one of the two.
            let dominant = members[1];
            if present.iter().any(|&(_, b)| b == dominant) {
                out.push(GroupCombination {
                    kind: GroupKind::HalfTrine,
                    element,
                    members: present,
                });
            }
        }
    }
    for (members, element) in DIRECTIONAL_GROUPS {
        let present: Vec<(Pillar, Branch)> = members
            .iter()
            .filter_map(|&m| position_of(chart, m).map(|p| (p, m)))
            .collect();
        if present.len() == 3 {
            out.push(GroupCombination {
                kind: GroupKind::Directional,
                element,
                members: present,
            });
        }
    }
    out
}

/// Peach-blossom target branch per trine group, keyed by the group's
/// first (birth) member.
const fn peach_blossom_target(group_first: Branch) -> Branch {
    match group_first {
        Branch::In => Branch::Myo,
        Branch::Sa => Branch::O,
        Branch::Sin => Branch::Yu,
        _ => Branch::Ja,
    }
}

/// Post-horse target: the clash opposite of the group's first member.
const fn post_horse_target(group_first: Branch) -> Branch {
    match group_first {
        Branch::In => Branch::Sin,
        Branch::Sa => Branch::Hae,
        Branch::Sin => Branch::In,
        _ => Branch::Sa,
    }
}

/// Red-blossom target branch, keyed by the day stem.
const fn red_blossom_target(day_stem: Stem) -> Branch {
    match day_stem {
        Stem::Gap | Stem::Eul => Branch::O,
        Stem::Byeong => Branch::In,
        Stem::Jeong => Branch::Mi,
        Stem::Mu | Stem::Gi => Branch::Jin,
        Stem::Gyeong => Branch::Sul,
        Stem::Sin => Branch::Yu,
        Stem::Im => Branch::Ja,
        Stem::Gye => Branch::Sin,
    }
}

fn find_markers(chart: &Chart) -> Vec<MarkerHit> {
    let mut out = Vec::new();
    let (group, _) = trine_group_of(chart.day.branch);
    let first = group[0];
    // Canopy target is the group's grave (third) member.
    let targets = [
        (Marker::PeachBlossom, peach_blossom_target(first)),
        (Marker::Canopy, group[2]),
        (Marker::PostHorse, post_horse_target(first)),
    ];
    for pillar in ALL_PILLARS {
        let branch = chart.pillar(pillar).branch;
        for (marker, target) in targets {
            if branch == target {
                out.push(MarkerHit {
                    marker,
                    pillar,
                    branch,
                });
            }
        }
    }
    // Red blossom is checked against the day branch only.
    let red = red_blossom_target(chart.day.stem);
    if chart.day.branch == red {
        out.push(MarkerHit {
            marker: Marker::RedBlossom,
            pillar: Pillar::Day,
            branch: red,
        });
    }
    out
}

/// Run all detectors over one chart.
pub fn detect_interactions(chart: &Chart) -> InteractionReport {
    InteractionReport {
        stem_combinations: find_stem_combinations(chart),
        branch_relations: find_branch_relations(chart),
        group_combinations: find_group_combinations(chart),
        markers: find_markers(chart),
    }
}

/// Plain-text one-line summary for the report surface.
pub fn interaction_summary(report: &InteractionReport) -> String {
    let mut parts = Vec::new();
    if !report.markers.is_empty() {
        let items: Vec<String> = report
            .markers
            .iter()
            .map(|m| format!("{}@{}", m.marker.korean_name(), m.pillar.name()))
            .collect();
        parts.push(format!("[markers] {}", items.join(", ")));
    }
    if !report.stem_combinations.is_empty() {
        let items: Vec<String> = report
            .stem_combinations
            .iter()
            .map(|c| {
                format!(
                    "{}+{} ({}) {}-{}",
                    c.first.1.name(),
                    c.second.1.name(),
                    c.fused.name(),
                    c.first.0.name(),
                    c.second.0.name()
                )
            })
            .collect();
        parts.push(format!("[stem combinations] {}", items.join(", ")));
    }
    let mut branch_items: Vec<String> = report
        .branch_relations
        .iter()
        .map(|r| {
            let label = match r.kind {
                BranchRelationKind::Clash => "clash",
                BranchRelationKind::SixCombination => "six-combination",
            };
            format!(
                "{}+{} {} {}-{}",
                r.first.1.name(),
                r.second.1.name(),
                label,
                r.first.0.name(),
                r.second.0.name()
            )
        })
        .collect();
    branch_items.extend(report.group_combinations.iter().map(|g| {
        let label = match g.kind {
            GroupKind::Trine => "trine",
            GroupKind::HalfTrine => "half-trine",
            GroupKind::Directional => "directional",
        };
        let members: Vec<&str> = g.members.iter().map(|(_, b)| b.name()).collect();
        format!("{} {} ({})", members.join("+"), label, g.element.name())
    }));
    if !branch_items.is_empty() {
        parts.push(format!("[branch relations] {}", branch_items.join(", ")));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganji::GanJi;

    fn chart_of(year: (usize, usize), month: (usize, usize), day: (usize, usize), hour: (usize, usize)) -> Chart {
        Chart {
            year: GanJi::from_indices(year.0, year.1),
            month: GanJi::from_indices(month.0, month.1),
            day: GanJi::from_indices(day.0, day.1),
            hour: GanJi::from_indices(hour.0, hour.1),
        }
    }

    #[test]
    fn stem_combination_adjacent_only() {
        // Gap (year) + Gi (month): adjacent, fuses to earth.
        let chart = chart_of((0, 0), (5, 1), (2, 2), (4, 4));
        let report = detect_interactions(&chart);
        assert_eq!(report.stem_combinations.len(), 1);
        assert_eq!(report.stem_combinations[0].fused, Element::Earth);

        // Gap (year) + Gi (day): not adjacent, no combination.
        let chart = chart_of((0, 0), (2, 2), (5, 1), (4, 4));
        let report = detect_interactions(&chart);
        assert!(report.stem_combinations.is_empty());
    }

    #[test]
    fn clash_detected_between_adjacent_branches() {
        // Day branch Ja vs month branch O: clash.
        let chart = chart_of((0, 0), (2, 6), (0, 0), (4, 4));
        let report = detect_interactions(&chart);
        assert!(
            report
                .branch_relations
                .iter()
                .any(|r| r.kind == BranchRelationKind::Clash
                    && r.first == (Pillar::Day, Branch::Ja)
                    && r.second == (Pillar::Month, Branch::O))
        );
    }

    #[test]
    fn identical_adjacent_branches_skip_relations() {
        // All branches O: no clash/six-combination reported.
        let chart = chart_of((0, 6), (2, 6), (4, 6), (6, 6));
        let report = detect_interactions(&chart);
        assert!(report.branch_relations.is_empty());
    }

    #[test]
    fn full_trine_found_at_any_positions() {
        // Branches In (year), O (month), Sul (day): fire trine.
        let chart = chart_of((0, 2), (2, 6), (8, 10), (1, 1));
        let report = detect_interactions(&chart);
        assert!(
            report
                .group_combinations
                .iter()
                .any(|g| g.kind == GroupKind::Trine && g.element == Element::Fire)
        );
    }

    #[test]
    fn half_trine_requires_dominant_member() {
        // In + O present (O is dominant of the fire trine): half trine.
        let chart = chart_of((0, 2), (2, 6), (1, 1), (3, 3));
        let report = detect_interactions(&chart);
        assert!(
            report
                .group_combinations
                .iter()
                .any(|g| g.kind == GroupKind::HalfTrine && g.element == Element::Fire)
        );

        // In + Sul without O (birth + grave only): no half trine.
        let chart = chart_of((0, 2), (8, 10), (1, 1), (3, 3));
        let report = detect_interactions(&chart);
        assert!(
            !report
                .group_combinations
                .iter()
                .any(|g| g.kind == GroupKind::HalfTrine && g.element == Element::Fire)
        );
    }

    #[test]
    fn directional_group_needs_all_three() {
        // In, Myo, Jin across year/month/day: wood directional.
        let chart = chart_of((0, 2), (1, 3), (2, 4), (3, 5));
        let report = detect_interactions(&chart);
        assert!(
            report
                .group_combinations
                .iter()
                .any(|g| g.kind == GroupKind::Directional && g.element == Element::Wood)
        );
    }

    #[test]
    fn markers_follow_day_branch_group() {
        // Day branch O -> fire trine (In, O, Sul): peach blossom target Myo,
        // canopy target Sul, post horse target Sin.
        let chart = chart_of((1, 3), (2, 10), (4, 6), (6, 8));
        let report = detect_interactions(&chart);
        let has = |marker: Marker, pillar: Pillar| {
            report
                .markers
                .iter()
                .any(|m| m.marker == marker && m.pillar == pillar)
        };
        assert!(has(Marker::PeachBlossom, Pillar::Year));
        assert!(has(Marker::Canopy, Pillar::Month));
        assert!(has(Marker::PostHorse, Pillar::Hour));
    }

    #[test]
    fn red_blossom_day_branch_only() {
        // Day pillar Mu-Jin: red blossom target for Mu is Jin -> hit.
        let chart = chart_of((0, 0), (2, 2), (4, 4), (6, 6));
        let report = detect_interactions(&chart);
        assert!(
            report
                .markers
                .iter()
                .any(|m| m.marker == Marker::RedBlossom && m.pillar == Pillar::Day)
        );

        // Same target at the year branch does not count.
        let chart = chart_of((0, 4), (2, 2), (4, 0), (6, 6));
        let report = detect_interactions(&chart);
        assert!(!report.markers.iter().any(|m| m.marker == Marker::RedBlossom));
    }

    #[test]
    fn summary_is_single_line() {
        let chart = chart_of((0, 2), (5, 7), (8, 10), (1, 1));
        let report = detect_interactions(&chart);
        let text = interaction_summary(&report);
        assert!(!text.contains('\n'));
    }
}
