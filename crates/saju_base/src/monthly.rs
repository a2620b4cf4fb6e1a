//! Fixed month-branch luck rankings keyed by the primary needed element.

use serde::Serialize;

use crate::element::Element;
use crate::ganji::{ALL_BRANCHES, Branch};

/// One ranked month entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRank {
    pub branch: Branch,
    /// Civil month the branch governs (Ja=12, Chuk=1, .. Hae=11).
    pub month: u8,
}

/// Civil month governed by a branch.
pub const fn month_of_branch(branch: Branch) -> u8 {
    match branch {
        Branch::Ja => 12,
        Branch::Chuk => 1,
        Branch::In => 2,
        Branch::Myo => 3,
        Branch::Jin => 4,
        Branch::Sa => 5,
        Branch::O => 6,
        Branch::Mi => 7,
        Branch::Sin => 8,
        Branch::Yu => 9,
        Branch::Sul => 10,
        Branch::Hae => 11,
    }
}

/// Best-to-worst month branches for each primary needed element.
const fn ranking_for(element: Element) -> [Branch; 12] {
    use Branch::*;
    match element {
        Element::Wood => [Myo, In, Jin, Hae, Mi, Sa, O, Sul, Chuk, Ja, Yu, Sin],
        Element::Fire => [O, Sa, Mi, Sul, In, Myo, Sin, Yu, Hae, Ja, Jin, Chuk],
        Element::Earth => [Jin, Mi, Sul, Chuk, Sa, O, Sin, Yu, Hae, Ja, In, Myo],
        Element::Metal => [Sin, Yu, O, Sa, Chuk, Hae, Ja, Sul, Myo, In, Jin, Mi],
        Element::Water => [Hae, Ja, Sin, Yu, In, Myo, Chuk, Jin, Sa, O, Sul, Mi],
    }
}

/// Ranked months for a primary needed element; plain branch order when the
/// primary element is absent.
pub fn monthly_ranking(primary: Option<Element>) -> Vec<MonthRank> {
    let order: Vec<Branch> = match primary {
        Some(el) => ranking_for(el).to_vec(),
        None => ALL_BRANCHES.to_vec(),
    };
    order
        .into_iter()
        .map(|branch| MonthRank {
            branch,
            month: month_of_branch(branch),
        })
        .collect()
}
