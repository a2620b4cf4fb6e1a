//! Chart positions: four pillars, eight symbol slots, adjacency and weights.
//!
//! The eight slots form a fixed graph; each slot carries a scoring weight
//! used by the elemental balance model. Adjacency is position-specific and
//! not symmetric in list form (every listed neighbor is consulted when the
//! slot itself is scored).

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::ganji::{Branch, GanJi, Stem};

/// One of the four named pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Year,
    Month,
    Day,
    Hour,
}

/// All four pillars, year first.
pub const ALL_PILLARS: [Pillar; 4] = [Pillar::Year, Pillar::Month, Pillar::Day, Pillar::Hour];

impl Pillar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

/// One of the eight symbol slots of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarPosition {
    YearStem,
    YearBranch,
    MonthStem,
    MonthBranch,
    DayStem,
    DayBranch,
    HourStem,
    HourBranch,
}

/// All eight slots in year→hour, stem-before-branch order.
pub const ALL_POSITIONS: [PillarPosition; 8] = [
    PillarPosition::YearStem,
    PillarPosition::YearBranch,
    PillarPosition::MonthStem,
    PillarPosition::MonthBranch,
    PillarPosition::DayStem,
    PillarPosition::DayBranch,
    PillarPosition::HourStem,
    PillarPosition::HourBranch,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::YearStem => "year_stem",
            Self::YearBranch => "year_branch",
            Self::MonthStem => "month_stem",
            Self::MonthBranch => "month_branch",
            Self::DayStem => "day_stem",
            Self::DayBranch => "day_branch",
            Self::HourStem => "hour_stem",
            Self::HourBranch => "hour_branch",
        }
    }

    pub const fn pillar(self) -> Pillar {
        match self {
            Self::YearStem | Self::YearBranch => Pillar::Year,
            Self::MonthStem | Self::MonthBranch => Pillar::Month,
            Self::DayStem | Self::DayBranch => Pillar::Day,
            Self::HourStem | Self::HourBranch => Pillar::Hour,
        }
    }

    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::YearBranch | Self::MonthBranch | Self::DayBranch | Self::HourBranch
        )
    }

    /// Fixed scoring weight of this slot in the balance model.
    pub const fn weight(self) -> f64 {
        match self {
            Self::YearStem => 0.2,
            Self::YearBranch => 0.1,
            Self::MonthStem => 0.5,
            Self::MonthBranch => 1.0,
            Self::DayStem => 1.0,
            Self::DayBranch => 0.7,
            Self::HourStem => 0.4,
            Self::HourBranch => 0.4,
        }
    }

    /// Neighboring slots consulted when this slot is scored.
    pub const fn neighbors(self) -> &'static [PillarPosition] {
        use PillarPosition::*;
        match self {
            YearStem => &[MonthStem, YearBranch, MonthBranch],
            YearBranch => &[YearStem, MonthStem, MonthBranch],
            MonthStem => &[YearStem, DayStem, YearBranch, MonthBranch, DayBranch],
            MonthBranch => &[YearStem, MonthStem, DayStem, YearBranch, DayBranch],
            DayStem => &[MonthStem, HourStem, MonthBranch, DayBranch, HourBranch],
            DayBranch => &[MonthStem, DayStem, HourStem, MonthBranch, HourBranch],
            HourStem => &[DayStem, DayBranch, HourBranch],
            HourBranch => &[DayStem, HourStem, DayBranch],
        }
    }

    /// Slots participating in the luck-quantity accumulation when this slot
    /// holds the chart keyword. Differs from `neighbors` for the year slots.
    pub const fn participants(self) -> &'static [PillarPosition] {
        use PillarPosition::*;
        match self {
            YearStem => &[YearBranch, MonthStem, MonthBranch],
            YearBranch => &[YearStem, MonthStem, MonthBranch],
            MonthStem => &[YearStem, YearBranch, MonthBranch, DayStem, DayBranch],
            MonthBranch => &[YearStem, YearBranch, MonthStem, DayStem, DayBranch],
            DayStem => &[MonthStem, MonthBranch, DayBranch, HourStem, HourBranch],
            DayBranch => &[MonthStem, MonthBranch, DayStem, HourStem, HourBranch],
            HourStem => &[DayStem, DayBranch, HourBranch],
            HourBranch => &[DayStem, DayBranch, HourStem],
        }
    }
}

/// A stem or branch occupying a chart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Stem(Stem),
    Branch(Branch),
}

impl Symbol {
    pub const fn element(self) -> Element {
        match self {
            Self::Stem(s) => s.element(),
            Self::Branch(b) => b.element(),
        }
    }

    /// Polarity: fixed for stems, functional for branches.
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Stem(s) => s.polarity(),
            Self::Branch(b) => b.functional_polarity(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Stem(s) => s.name(),
            Self::Branch(b) => b.name(),
        }
    }

    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Stem(s) => s.hanja(),
            Self::Branch(b) => b.hanja(),
        }
    }
}

/// A natal chart: one sexagenary pair per pillar.
///
/// When the birth time is unknown the hour pillar is derived from the noon
/// placeholder civil time; the deriver separately enumerates the twelve
/// candidate hour pillars for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub year: GanJi,
    pub month: GanJi,
    pub day: GanJi,
    pub hour: GanJi,
}

impl Chart {
    pub const fn pillar(&self, pillar: Pillar) -> GanJi {
        match pillar {
            Pillar::Year => self.year,
            Pillar::Month => self.month,
            Pillar::Day => self.day,
            Pillar::Hour => self.hour,
        }
    }

    /// Symbol at a slot.
    pub const fn symbol(&self, pos: PillarPosition) -> Symbol {
        let pair = self.pillar(pos.pillar());
        if pos.is_branch() {
            Symbol::Branch(pair.branch)
        } else {
            Symbol::Stem(pair.stem)
        }
    }

    /// Branches in year→hour order.
    pub const fn branches(&self) -> [Branch; 4] {
        [
            self.year.branch,
            self.month.branch,
            self.day.branch,
            self.hour.branch,
        ]
    }

    /// Stems in year→hour order.
    pub const fn stems(&self) -> [Stem; 4] {
        [self.year.stem, self.month.stem, self.day.stem, self.hour.stem]
    }
}
