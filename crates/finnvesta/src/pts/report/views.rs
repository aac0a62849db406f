use crate::valuation::{ConditionClass, Trajectory};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualSummaryEntry {
    pub year: i32,
    pub total_investment: f64,
    /// Distinct buildings with an installment this year.
    pub buildings_count: usize,
    pub cumulative_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionBandEntry {
    pub class: ConditionClass,
    pub class_label: &'static str,
    pub buildings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioConditionOverview {
    pub total_buildings: usize,
    pub buildings_good: usize,
    pub buildings_adequate: usize,
    pub buildings_poor: usize,
    pub buildings_critical: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_condition: Option<f64>,
    pub total_replacement_value: f64,
    pub total_technical_value: f64,
    pub total_repair_debt: f64,
    pub condition_bands: Vec<ConditionBandEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingForecast {
    pub building_id: i64,
    pub building_name: String,
    pub reference_year: i32,
    pub current_condition: f64,
    pub trigger_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_year: Option<i32>,
    pub trajectory: Trajectory,
}
