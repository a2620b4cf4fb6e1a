//! Chart analysis engine: natal pillar derivation, decade luck cycles,
//! elemental balance, and the hundred-year luck trajectory.
//!
//! The pipeline entry point is [`analyze`], which takes a raw
//! [`saju_calendar::BirthInput`], the external [`Providers`], and a
//! reference year, and returns a serializable [`ChartReport`].

pub mod analysis;
pub mod balance;
pub mod error;
pub mod luck_cycle;
pub mod pillars;
pub mod trajectory;
pub mod trajectory_data;
pub mod types;

pub use analysis::{Providers, analyze};
pub use balance::{BalanceOutcome, assess_balance, element_scores, luck_quantity};
pub use error::EngineError;
pub use luck_cycle::{DecadeCycle, Direction, decade_cycles, direction, onset_age};
pub use pillars::{DerivedChart, derive_chart, hour_candidates};
pub use trajectory::{Extremes, LuckSample, aggregate_score, theoretical_extremes, trajectory};
pub use types::ChartReport;
