//! Long-term investment planning (PTS, pitkän aikavälin suunnitelma).
//!
//! Each building is forecast independently: the first year its condition
//! drops below the trigger threshold becomes its renovation year, the gap to
//! the target condition becomes its investment, and large buildings spread
//! that investment over two or three budget years. The per-building results
//! are then merged into one year-indexed schedule.

pub mod domain;
pub mod report;
mod scheduler;
mod sizing;

pub use domain::{
    current_year, PlanningError, PlanningParameters, PtsPlan, YearlyInvestment,
    DEFAULT_PLANNING_HORIZON_YEARS, DEFAULT_TARGET_PERCENTAGE, DEFAULT_TRIGGER_THRESHOLD,
};
pub use report::{
    AnnualSummaryEntry, BuildingForecast, ConditionBandEntry, PortfolioConditionOverview,
};
pub use scheduler::{generate_pts_plan, BuildingRenovation, PtsScheduler};
pub use sizing::{investment_need, RenovationProject, SplitPolicy};
