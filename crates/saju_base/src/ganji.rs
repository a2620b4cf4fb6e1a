//! Heavenly stems, earthly branches, and the 60-pair sexagenary cycle.
//!
//! Only 60 of the 120 (stem, branch) combinations are valid: a pair exists
//! iff some cycle position `i` in 0..60 satisfies `i % 10 == stem` and
//! `i % 12 == branch`, i.e. the stem and branch indices have equal parity.

use serde::Serialize;

use crate::element::{Element, Polarity};

/// The ten heavenly stems, Gap (甲) through Gye (癸).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All ten stems in cycle order (Gap=0 .. Gye=9).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// Korean romanized name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gap => "gap",
            Self::Eul => "eul",
            Self::Byeong => "byeong",
            Self::Jeong => "jeong",
            Self::Mu => "mu",
            Self::Gi => "gi",
            Self::Gyeong => "gyeong",
            Self::Sin => "sin",
            Self::Im => "im",
            Self::Gye => "gye",
        }
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Gap => "甲",
            Self::Eul => "乙",
            Self::Byeong => "丙",
            Self::Jeong => "丁",
            Self::Mu => "戊",
            Self::Gi => "己",
            Self::Gyeong => "庚",
            Self::Sin => "辛",
            Self::Im => "壬",
            Self::Gye => "癸",
        }
    }

    /// 0-based cycle index (Gap=0 .. Gye=9).
    pub const fn index(self) -> usize {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Stem at cycle index `i` (wraps mod 10).
    pub const fn from_index(i: usize) -> Stem {
        ALL_STEMS[i % 10]
    }

    /// Fixed polarity: even indices yang, odd yin.
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Gap | Self::Byeong | Self::Mu | Self::Gyeong | Self::Im => Polarity::Yang,
            _ => Polarity::Yin,
        }
    }

    /// Fixed element: stems pair up through the element cycle.
    pub const fn element(self) -> Element {
        match self {
            Self::Gap | Self::Eul => Element::Wood,
            Self::Byeong | Self::Jeong => Element::Fire,
            Self::Mu | Self::Gi => Element::Earth,
            Self::Gyeong | Self::Sin => Element::Metal,
            Self::Im | Self::Gye => Element::Water,
        }
    }
}

/// The twelve earthly branches, Ja (子) through Hae (亥).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All twelve branches in cycle order (Ja=0 .. Hae=11).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    /// Korean romanized name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::Chuk => "chuk",
            Self::In => "in",
            Self::Myo => "myo",
            Self::Jin => "jin",
            Self::Sa => "sa",
            Self::O => "o",
            Self::Mi => "mi",
            Self::Sin => "sin",
            Self::Yu => "yu",
            Self::Sul => "sul",
            Self::Hae => "hae",
        }
    }

    /// Hanja glyph.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Ja => "子",
            Self::Chuk => "丑",
            Self::In => "寅",
            Self::Myo => "卯",
            Self::Jin => "辰",
            Self::Sa => "巳",
            Self::O => "午",
            Self::Mi => "未",
            Self::Sin => "申",
            Self::Yu => "酉",
            Self::Sul => "戌",
            Self::Hae => "亥",
        }
    }

    /// 0-based cycle index (Ja=0 .. Hae=11).
    pub const fn index(self) -> usize {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Branch at cycle index `i` (wraps mod 12).
    pub const fn from_index(i: usize) -> Branch {
        ALL_BRANCHES[i % 12]
    }

    /// Functional polarity (seasonal usage, not the parity of the index).
    pub const fn functional_polarity(self) -> Polarity {
        match self {
            Self::In | Self::Jin | Self::Sa | Self::Sin | Self::Sul | Self::Hae => Polarity::Yang,
            _ => Polarity::Yin,
        }
    }

    /// Primary element.
    pub const fn element(self) -> Element {
        match self {
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Jin | Self::Sul | Self::Chuk | Self::Mi => Element::Earth,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Hae | Self::Ja => Element::Water,
        }
    }

    /// Whether this is one of the four mixed (storage) branches,
    /// Jin/Sul/Chuk/Mi, which carry secondary per-element weights.
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Jin | Self::Sul | Self::Chuk | Self::Mi)
    }
}

/// A valid sexagenary (stem, branch) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GanJi {
    pub stem: Stem,
    pub branch: Branch,
}

/// The 60 valid pairs in cycle order (GapJa=0 .. GyeHae=59).
pub const SIXTY_GANJI: [GanJi; 60] = {
    let mut out = [GanJi {
        stem: Stem::Gap,
        branch: Branch::Ja,
    }; 60];
    let mut i = 0;
    while i < 60 {
        out[i] = GanJi {
            stem: ALL_STEMS[i % 10],
            branch: ALL_BRANCHES[i % 12],
        };
        i += 1;
    }
    out
};

impl GanJi {
    /// Build a pair from stem/branch cycle indices, each taken modulo its
    /// own cycle. The result is always one of the 60 valid pairs when the
    /// two indices come from the same cycle position.
    pub const fn from_indices(stem_idx: usize, branch_idx: usize) -> GanJi {
        GanJi {
            stem: Stem::from_index(stem_idx),
            branch: Branch::from_index(branch_idx),
        }
    }

    /// Pair at a 0..59 cycle position.
    pub const fn from_cycle_index(i: usize) -> GanJi {
        SIXTY_GANJI[i % 60]
    }

    /// Position of this pair in the 60-cycle, or `None` for an invalid
    /// stem/branch combination.
    pub fn cycle_index(self) -> Option<usize> {
        let s = self.stem.index();
        let b = self.branch.index();
        // Valid iff stem and branch indices share parity; the unique cycle
        // position is then congruent to s mod 10 and b mod 12.
        (0..60).find(|i| i % 10 == s && i % 12 == b)
    }

    /// Sexagenary pair of a calendar year (epoch: year 4 = GapJa).
    pub fn for_year(year: i32) -> GanJi {
        let idx = (year - 4).rem_euclid(60) as usize;
        SIXTY_GANJI[idx]
    }

    /// Romanized name, e.g. "gyeong-o".
    pub fn name(self) -> String {
        format!("{}-{}", self.stem.name(), self.branch.name())
    }

    /// Hanja name, e.g. "庚午".
    pub fn hanja(self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_cycle_pairs_are_distinct_and_valid() {
        for (i, pair) in SIXTY_GANJI.iter().enumerate() {
            assert_eq!(pair.stem.index(), i % 10);
            assert_eq!(pair.branch.index(), i % 12);
            assert_eq!(pair.cycle_index(), Some(i));
        }
    }

    #[test]
    fn mismatched_parity_is_invalid() {
        // Gap (index 0) with Chuk (index 1) never occurs in the cycle.
        let bad = GanJi {
            stem: Stem::Gap,
            branch: Branch::Chuk,
        };
        assert_eq!(bad.cycle_index(), None);
    }

    #[test]
    fn year_pairs_match_known_anchors() {
        // 1984 opened a cycle: GapJa.
        let y1984 = GanJi::for_year(1984);
        assert_eq!(y1984.stem, Stem::Gap);
        assert_eq!(y1984.branch, Branch::Ja);
        // 1990: GyeongO (metal horse).
        let y1990 = GanJi::for_year(1990);
        assert_eq!(y1990.stem, Stem::Gyeong);
        assert_eq!(y1990.branch, Branch::O);
        // 60-year period.
        assert_eq!(GanJi::for_year(1930), y1990);
    }

    #[test]
    fn stem_polarity_alternates() {
        for (i, stem) in ALL_STEMS.iter().enumerate() {
            let expect = if i % 2 == 0 {
                Polarity::Yang
            } else {
                Polarity::Yin
            };
            assert_eq!(stem.polarity(), expect);
        }
    }

    #[test]
    fn mixed_branches_are_all_earth() {
        for branch in ALL_BRANCHES {
            if branch.is_mixed() {
                assert_eq!(branch.element(), Element::Earth);
            }
        }
    }
}
