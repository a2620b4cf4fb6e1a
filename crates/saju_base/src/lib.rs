//! Core sexagenary symbol domain for four-pillar chart analysis.
//!
//! This crate provides:
//! - The ten heavenly stems and twelve earthly branches, with fixed
//!   polarity and element assignments
//! - The 60-pair sexagenary cycle and year-to-pair arithmetic
//! - The eight chart positions, their adjacency graph and scoring weights
//! - The ten-way relational classifier ("ten gods") against a base stem
//! - Combination / clash / marker detection over a natal chart
//! - Seasonal climate scoring and per-element monthly rankings
//!
//! Everything here is pure and table-driven; no I/O, no clocks.

pub mod climate;
pub mod element;
pub mod ganji;
pub mod interaction;
pub mod monthly;
pub mod pillars;
pub mod ten_gods;

pub use climate::{
    ClimateSnapshot, PillarClimate, climate_with_annual, natal_climate, pillar_climate_rows,
};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use ganji::{ALL_BRANCHES, ALL_STEMS, Branch, GanJi, SIXTY_GANJI, Stem};
pub use interaction::{
    BranchRelation, BranchRelationKind, GroupCombination, GroupKind, InteractionReport, Marker,
    MarkerHit, StemCombination, detect_interactions, interaction_summary,
};
pub use monthly::{MonthRank, monthly_ranking};
pub use pillars::{ALL_PILLARS, ALL_POSITIONS, Chart, Pillar, PillarPosition, Symbol};
pub use ten_gods::{TenGod, classify_branch, classify_stem, classify_symbol};
