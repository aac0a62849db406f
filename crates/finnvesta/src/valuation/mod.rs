//! Point-in-time building valuation (JHA, TeknA, kla, repair debt) and
//! linear condition forecasts.

pub mod domain;
mod engine;
mod methodology;
mod trajectory;

pub use domain::{BuildingInput, ConditionClass, InvalidBuilding, RepairDebt, ValuationSnapshot};
pub use engine::{
    building_age, calculate_full_valuation, condition_score, replacement_value, technical_value,
    ValuationEngine,
};
pub use methodology::{ComponentWeights, Methodology};
pub use trajectory::{Trajectory, TrajectoryPoint};
