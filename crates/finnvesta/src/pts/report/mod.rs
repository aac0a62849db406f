mod overview;
mod summary;
pub mod views;

pub use views::{
    AnnualSummaryEntry, BuildingForecast, ConditionBandEntry, PortfolioConditionOverview,
};
