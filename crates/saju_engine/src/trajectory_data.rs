//! Fixed tables for luck-trajectory scoring.

use saju_base::{Branch, Element};
use serde::Serialize;

/// The four scored slots of one trajectory year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckSlot {
    CycleStem,
    CycleBranch,
    AnnualStem,
    AnnualBranch,
}

impl LuckSlot {
    /// Slot multiplier; annual symbols outweigh decade ones and branches
    /// outweigh stems.
    pub const fn weight(self) -> f64 {
        match self {
            LuckSlot::CycleStem => 1.0,
            LuckSlot::CycleBranch => 3.0,
            LuckSlot::AnnualStem => 3.0,
            LuckSlot::AnnualBranch => 5.0,
        }
    }

    pub const fn is_branch(self) -> bool {
        matches!(self, LuckSlot::CycleBranch | LuckSlot::AnnualBranch)
    }
}

/// Pairwise element interaction, indexed by [primary][incoming].
/// Rows and columns follow the canonical element order.
const INTERACTION: [[f64; 5]; 5] = [
    // wood  fire  earth metal water
    [1.5, 2.0, 1.0, -1.5, -2.0],  // wood
    [2.0, 1.5, 1.0, -2.0, -1.5],  // fire
    [1.0, 1.0, 2.0, 1.0, 1.0],    // earth
    [-1.5, -2.0, 1.0, 1.5, 2.0],  // metal
    [-2.0, -1.5, 1.0, 2.0, 1.5],  // water
];

pub const fn interaction_coefficient(primary: Element, incoming: Element) -> f64 {
    INTERACTION[primary.index()][incoming.index()]
}

/// Base weights of the four storage branches, by the primary needed
/// element. Their buried stems make the flat element lookup misleading,
/// so each carries its own profile.
const STORAGE_BASES: [(Branch, [f64; 5]); 4] = [
    (Branch::Jin, [6.0, -2.0, 10.0, 2.0, 7.0]),
    (Branch::Sul, [1.0, 7.0, 10.0, 4.0, -1.0]),
    (Branch::Chuk, [-2.0, -3.0, 10.0, 7.0, 10.0]),
    (Branch::Mi, [7.0, 10.0, 10.0, -3.0, -3.0]),
];

/// Storage-branch base weight, `None` for the eight plain branches.
pub fn storage_base(branch: Branch, primary: Element) -> Option<f64> {
    STORAGE_BASES
        .iter()
        .find(|(b, _)| *b == branch)
        .map(|(_, profile)| profile[primary.index()])
}

/// Keyword branches eligible for the transit-completion override.
pub const OVERRIDE_KEYWORDS: [Branch; 8] = [
    Branch::In,
    Branch::Sin,
    Branch::Sa,
    Branch::Hae,
    Branch::Jin,
    Branch::Sul,
    Branch::Chuk,
    Branch::Mi,
];

/// Transit branches able to complete a natal half-combination.
pub const OVERRIDE_TRIGGERS: [Branch; 4] = [Branch::Ja, Branch::O, Branch::Myo, Branch::Yu];

/// Natal half-pairs and the transit branch completing each into a full
/// trine.
pub const HALF_COMBO_TRIGGERS: [((Branch, Branch), Branch); 8] = [
    ((Branch::In, Branch::Sul), Branch::O),
    ((Branch::In, Branch::Jin), Branch::Myo),
    ((Branch::Sa, Branch::Chuk), Branch::Yu),
    ((Branch::Sa, Branch::Mi), Branch::O),
    ((Branch::Sin, Branch::Jin), Branch::Ja),
    ((Branch::Sin, Branch::Sul), Branch::Yu),
    ((Branch::Hae, Branch::Mi), Branch::Myo),
    ((Branch::Hae, Branch::Chuk), Branch::Ja),
];
