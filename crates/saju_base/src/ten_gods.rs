//! Ten-way relational classification of a symbol against a base stem.
//!
//! The classification depends only on the element relation between base and
//! target and on whether their polarities match. Branch targets use the
//! branch's primary element and functional polarity.

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::ganji::{Branch, Stem};
use crate::pillars::Symbol;

/// The ten relational classes ("ten gods").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    /// Same element, same polarity (bigyeon).
    Rival,
    /// Same element, opposite polarity (geopjae).
    Challenger,
    /// Base generates target, same polarity (siksin).
    Output,
    /// Base generates target, opposite polarity (sanggwan).
    Expression,
    /// Target generates base, same polarity (pyeonin).
    IndirectResource,
    /// Target generates base, opposite polarity (jeongin).
    DirectResource,
    /// Base restrains target, same polarity (pyeonjae).
    IndirectWealth,
    /// Base restrains target, opposite polarity (jeongjae).
    DirectWealth,
    /// Target restrains base, same polarity (pyeongwan).
    IndirectAuthority,
    /// Target restrains base, opposite polarity (jeonggwan).
    DirectAuthority,
}

impl TenGod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rival => "rival",
            Self::Challenger => "challenger",
            Self::Output => "output",
            Self::Expression => "expression",
            Self::IndirectResource => "indirect_resource",
            Self::DirectResource => "direct_resource",
            Self::IndirectWealth => "indirect_wealth",
            Self::DirectWealth => "direct_wealth",
            Self::IndirectAuthority => "indirect_authority",
            Self::DirectAuthority => "direct_authority",
        }
    }

    /// Korean romanized name.
    pub const fn korean_name(self) -> &'static str {
        match self {
            Self::Rival => "bigyeon",
            Self::Challenger => "geopjae",
            Self::Output => "siksin",
            Self::Expression => "sanggwan",
            Self::IndirectResource => "pyeonin",
            Self::DirectResource => "jeongin",
            Self::IndirectWealth => "pyeonjae",
            Self::DirectWealth => "jeongjae",
            Self::IndirectAuthority => "pyeongwan",
            Self::DirectAuthority => "jeonggwan",
        }
    }
}

fn classify(base_el: Element, base_pol: Polarity, el: Element, pol: Polarity) -> TenGod {
    let same = base_pol == pol;
    if base_el == el {
        if same { TenGod::Rival } else { TenGod::Challenger }
    } else if base_el.generates() == el {
        if same { TenGod::Output } else { TenGod::Expression }
    } else if base_el.generated_by() == el {
        if same {
            TenGod::IndirectResource
        } else {
            TenGod::DirectResource
        }
    } else if base_el.restrains() == el {
        if same {
            TenGod::IndirectWealth
        } else {
            TenGod::DirectWealth
        }
    } else {
        // el restrains base_el: the only remaining relation.
        if same {
            TenGod::IndirectAuthority
        } else {
            TenGod::DirectAuthority
        }
    }
}

/// Classify a stem target against a base stem.
pub fn classify_stem(base: Stem, target: Stem) -> TenGod {
    classify(
        base.element(),
        base.polarity(),
        target.element(),
        target.polarity(),
    )
}

/// Classify a branch target against a base stem (primary element,
/// functional polarity).
pub fn classify_branch(base: Stem, target: Branch) -> TenGod {
    classify(
        base.element(),
        base.polarity(),
        target.element(),
        target.functional_polarity(),
    )
}

/// Classify any chart symbol against a base stem.
pub fn classify_symbol(base: Stem, target: Symbol) -> TenGod {
    match target {
        Symbol::Stem(s) => classify_stem(base, s),
        Symbol::Branch(b) => classify_branch(base, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganji::{ALL_BRANCHES, ALL_STEMS};

    #[test]
    fn self_is_rival() {
        for stem in ALL_STEMS {
            assert_eq!(classify_stem(stem, stem), TenGod::Rival);
        }
    }

    #[test]
    fn known_stem_classifications() {
        // Gap (yang wood) base.
        assert_eq!(classify_stem(Stem::Gap, Stem::Eul), TenGod::Challenger);
        assert_eq!(classify_stem(Stem::Gap, Stem::Byeong), TenGod::Output);
        assert_eq!(classify_stem(Stem::Gap, Stem::Jeong), TenGod::Expression);
        assert_eq!(classify_stem(Stem::Gap, Stem::Mu), TenGod::IndirectWealth);
        assert_eq!(classify_stem(Stem::Gap, Stem::Gi), TenGod::DirectWealth);
        assert_eq!(
            classify_stem(Stem::Gap, Stem::Gyeong),
            TenGod::IndirectAuthority
        );
        assert_eq!(classify_stem(Stem::Gap, Stem::Sin), TenGod::DirectAuthority);
        assert_eq!(classify_stem(Stem::Gap, Stem::Im), TenGod::IndirectResource);
        assert_eq!(classify_stem(Stem::Gap, Stem::Gye), TenGod::DirectResource);
    }

    #[test]
    fn branch_uses_functional_polarity() {
        // Sin stem (yin metal) vs O branch (fire, functionally yin):
        // fire restrains metal, polarities match -> indirect authority.
        assert_eq!(
            classify_branch(Stem::Sin, Branch::O),
            TenGod::IndirectAuthority
        );
        // Sin stem vs Sa branch (fire, functionally yang): mismatch -> direct.
        assert_eq!(
            classify_branch(Stem::Sin, Branch::Sa),
            TenGod::DirectAuthority
        );
    }

    #[test]
    fn every_pairing_classifies() {
        // Exhaustive: no panic, and same-element pairs split by polarity.
        for base in ALL_STEMS {
            for target in ALL_BRANCHES {
                let god = classify_branch(base, target);
                if base.element() == target.element() {
                    assert!(matches!(god, TenGod::Rival | TenGod::Challenger));
                }
            }
        }
    }
}
