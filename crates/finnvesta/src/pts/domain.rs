use crate::valuation::InvalidBuilding;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_TRIGGER_THRESHOLD: f64 = 0.50;
pub const DEFAULT_TARGET_PERCENTAGE: f64 = 1.00;
pub const DEFAULT_PLANNING_HORIZON_YEARS: u32 = 15;

/// Per-call knobs of the PTS planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanningParameters {
    /// Condition score below which a building needs renovation.
    pub trigger_threshold: f64,
    /// Post-renovation condition relative to replacement value.
    pub target_percentage: f64,
    pub planning_horizon_years: u32,
    /// Calendar year the plan starts from; the current year when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

impl Default for PlanningParameters {
    fn default() -> Self {
        Self {
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            target_percentage: DEFAULT_TARGET_PERCENTAGE,
            planning_horizon_years: DEFAULT_PLANNING_HORIZON_YEARS,
            reference_year: None,
        }
    }
}

impl PlanningParameters {
    pub const TRIGGER_THRESHOLD_RANGE: (f64, f64) = (0.0, 1.0);
    pub const TARGET_PERCENTAGE_RANGE: (f64, f64) = (0.5, 1.5);
    pub const HORIZON_RANGE: (u32, u32) = (5, 30);
    pub const REFERENCE_YEAR_RANGE: (i32, i32) = (1800, 2200);

    pub fn with_reference_year(mut self, reference_year: i32) -> Self {
        self.reference_year = Some(reference_year);
        self
    }

    pub fn effective_reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }

    /// Fails on the first parameter outside its documented domain.
    pub fn validate(&self) -> Result<(), PlanningError> {
        let (min, max) = Self::TRIGGER_THRESHOLD_RANGE;
        if !(min..=max).contains(&self.trigger_threshold) {
            return Err(PlanningError::InvalidTriggerThreshold(self.trigger_threshold));
        }

        let (min, max) = Self::TARGET_PERCENTAGE_RANGE;
        if !(min..=max).contains(&self.target_percentage) {
            return Err(PlanningError::InvalidTargetPercentage(self.target_percentage));
        }

        let (min, max) = Self::HORIZON_RANGE;
        if !(min..=max).contains(&self.planning_horizon_years) {
            return Err(PlanningError::InvalidHorizon(self.planning_horizon_years));
        }

        if let Some(year) = self.reference_year {
            let (min, max) = Self::REFERENCE_YEAR_RANGE;
            if !(min..=max).contains(&year) {
                return Err(PlanningError::InvalidReferenceYear(year));
            }
        }

        Ok(())
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("trigger threshold {0} must be within [0.0, 1.0]")]
    InvalidTriggerThreshold(f64),
    #[error("target percentage {0} must be within [0.5, 1.5]")]
    InvalidTargetPercentage(f64),
    #[error("planning horizon {0} must be between 5 and 30 years")]
    InvalidHorizon(u32),
    #[error("reference year {0} must be between 1800 and 2200")]
    InvalidReferenceYear(i32),
    #[error(transparent)]
    InvalidBuilding(#[from] InvalidBuilding),
}

/// Money allocated to one building in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyInvestment {
    pub year: i32,
    pub building_id: i64,
    pub building_name: String,
    pub investment_amount: f64,
    /// Set on the first installment only.
    pub condition_before: Option<f64>,
    /// Set on the last installment only.
    pub condition_after: Option<f64>,
    pub is_split_project: bool,
    /// 1-based installment number for split projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_year_index: Option<u8>,
}

/// Portfolio-wide long-term investment plan (PTS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtsPlan {
    pub start_year: i32,
    pub end_year: i32,
    pub total_investment: f64,
    pub average_annual_investment: f64,
    /// Every year of the horizon, empty years included.
    pub yearly_schedule: BTreeMap<i32, Vec<YearlyInvestment>>,
    pub buildings_needing_renovation: usize,
    pub total_buildings: usize,
    /// Installments of split projects that fall after `end_year`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deferred_installments: Vec<YearlyInvestment>,
    pub parameters: PlanningParameters,
}

impl PtsPlan {
    pub fn planning_horizon_years(&self) -> u32 {
        self.parameters.planning_horizon_years
    }

    pub fn investments(&self) -> impl Iterator<Item = &YearlyInvestment> {
        self.yearly_schedule.values().flatten()
    }

    pub fn investments_for_year(&self, year: i32) -> &[YearlyInvestment] {
        self.yearly_schedule
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn investments_for_building(&self, building_id: i64) -> Vec<&YearlyInvestment> {
        self.investments()
            .filter(|investment| investment.building_id == building_id)
            .collect()
    }

    pub fn deferred_total(&self) -> f64 {
        self.deferred_installments
            .iter()
            .map(|investment| investment.investment_amount)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings_needing_renovation == 0
    }
}
