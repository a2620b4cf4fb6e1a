//! The five elements and their generation/restraint cycles.
//!
//! Generation (sheng) and restraint (geuk) each form a directed 5-cycle:
//! Wood→Fire→Earth→Metal→Water→Wood and Wood→Earth→Water→Fire→Metal→Wood.

use serde::Serialize;

/// Yang/yin polarity, attached to stems and (functionally) to branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

/// The five elements in canonical order (Wood first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in canonical order (Wood=0 .. Water=4).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }

    /// 0-based index in canonical order (Wood=0 .. Water=4).
    pub const fn index(self) -> usize {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// The element this one generates (sheng cycle).
    pub const fn generates(self) -> Element {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element this one restrains (geuk cycle).
    pub const fn restrains(self) -> Element {
        match self {
            Self::Wood => Self::Earth,
            Self::Fire => Self::Metal,
            Self::Earth => Self::Water,
            Self::Metal => Self::Wood,
            Self::Water => Self::Fire,
        }
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Element {
        match self {
            Self::Wood => Self::Water,
            Self::Fire => Self::Wood,
            Self::Earth => Self::Fire,
            Self::Metal => Self::Earth,
            Self::Water => Self::Metal,
        }
    }

    /// The element that restrains this one.
    pub const fn restrained_by(self) -> Element {
        match self {
            Self::Wood => Self::Metal,
            Self::Fire => Self::Water,
            Self::Earth => Self::Wood,
            Self::Metal => Self::Fire,
            Self::Water => Self::Earth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_cycle_closes() {
        for el in ALL_ELEMENTS {
            let mut cur = el;
            for _ in 0..5 {
                cur = cur.generates();
            }
            assert_eq!(cur, el);
        }
    }

    #[test]
    fn restraint_cycle_closes() {
        for el in ALL_ELEMENTS {
            let mut cur = el;
            for _ in 0..5 {
                cur = cur.restrains();
            }
            assert_eq!(cur, el);
        }
    }

    #[test]
    fn inverse_relations_agree() {
        for el in ALL_ELEMENTS {
            assert_eq!(el.generates().generated_by(), el);
            assert_eq!(el.restrains().restrained_by(), el);
        }
    }

    #[test]
    fn generation_and_restraint_are_disjoint() {
        for el in ALL_ELEMENTS {
            assert_ne!(el.generates(), el.restrains());
            assert_ne!(el.generated_by(), el.restrained_by());
        }
    }
}
