use super::domain::{PlanningParameters, PtsPlan, YearlyInvestment};
use super::report::views::BuildingForecast;
use super::sizing::{investment_need, RenovationProject, SplitPolicy};
use crate::valuation::{building_age, replacement_value, BuildingInput, ValuationEngine};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// One building's renovation, sized and allocated to budget years.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingRenovation {
    pub building_id: i64,
    pub trigger_year: i32,
    pub project: RenovationProject,
    pub installments: Vec<YearlyInvestment>,
}

/// Builds PTS plans from building registers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PtsScheduler {
    valuation: ValuationEngine,
    split_policy: SplitPolicy,
}

impl PtsScheduler {
    pub fn new(valuation: ValuationEngine, split_policy: SplitPolicy) -> Self {
        Self {
            valuation,
            split_policy,
        }
    }

    pub fn valuation(&self) -> &ValuationEngine {
        &self.valuation
    }

    /// Sizes the renovation of one building, or `None` when it stays above the
    /// trigger threshold for the whole horizon.
    pub fn plan_building(
        &self,
        building: &BuildingInput,
        reference_year: i32,
        params: &PlanningParameters,
    ) -> Option<BuildingRenovation> {
        let trajectory = self
            .valuation
            .forecast(building, reference_year, params.planning_horizon_years);
        let trigger_year = trajectory.trigger_year(params.trigger_threshold)?;

        let replacement_value = replacement_value(building.area_m2, building.cost_per_m2);
        let years_until_trigger = u32::try_from(trigger_year - reference_year).unwrap_or(0);
        let renovation_age = building_age(building.construction_year, reference_year)
            .saturating_add(years_until_trigger);
        let at_trigger = self
            .valuation
            .snapshot_at_age(replacement_value, renovation_age);

        let project = RenovationProject {
            renovation_year: trigger_year,
            total_investment: investment_need(
                replacement_value,
                at_trigger.technical_value,
                params.target_percentage,
            ),
            condition_before: at_trigger.condition_score,
            condition_after: params.target_percentage,
        };

        debug!(
            building_id = building.id,
            trigger_year,
            investment = project.total_investment,
            condition_before = project.condition_before,
            "building crosses renovation threshold"
        );

        Some(BuildingRenovation {
            building_id: building.id,
            trigger_year,
            installments: self.split_policy.allocate(building, &project),
            project,
        })
    }

    /// Plans every building independently and merges the installments by year.
    ///
    /// Installments that land after the last plan year are returned in
    /// [`PtsPlan::deferred_installments`] and excluded from the totals.
    pub fn generate_plan(
        &self,
        buildings: &[BuildingInput],
        params: &PlanningParameters,
    ) -> PtsPlan {
        let start_year = params.effective_reference_year();
        let horizon = params.planning_horizon_years;
        let end_year = start_year.saturating_add_unsigned(horizon);

        let renovations: Vec<BuildingRenovation> = buildings
            .par_iter()
            .filter_map(|building| self.plan_building(building, start_year, params))
            .collect();

        let mut yearly_schedule: BTreeMap<i32, Vec<YearlyInvestment>> =
            (start_year..=end_year).map(|year| (year, Vec::new())).collect();
        let mut deferred_installments = Vec::new();
        let mut total_investment = 0.0;

        for renovation in &renovations {
            for installment in &renovation.installments {
                match yearly_schedule.get_mut(&installment.year) {
                    Some(bucket) => {
                        total_investment += installment.investment_amount;
                        bucket.push(installment.clone());
                    }
                    None => {
                        debug!(
                            building_id = installment.building_id,
                            year = installment.year,
                            end_year,
                            amount = installment.investment_amount,
                            "installment falls after plan horizon"
                        );
                        deferred_installments.push(installment.clone());
                    }
                }
            }
        }

        let average_annual_investment = if horizon > 0 {
            total_investment / f64::from(horizon)
        } else {
            0.0
        };

        PtsPlan {
            start_year,
            end_year,
            total_investment,
            average_annual_investment,
            yearly_schedule,
            buildings_needing_renovation: renovations.len(),
            total_buildings: buildings.len(),
            deferred_installments,
            parameters: params.with_reference_year(start_year),
        }
    }

    /// Condition trajectory of a single building with its renovation trigger.
    pub fn forecast_building(
        &self,
        building: &BuildingInput,
        params: &PlanningParameters,
    ) -> BuildingForecast {
        let reference_year = params.effective_reference_year();
        let trajectory = self
            .valuation
            .forecast(building, reference_year, params.planning_horizon_years);

        BuildingForecast {
            building_id: building.id,
            building_name: building.name.clone(),
            reference_year,
            current_condition: trajectory
                .current()
                .map(|point| point.condition_score)
                .unwrap_or_default(),
            trigger_threshold: params.trigger_threshold,
            trigger_year: trajectory.trigger_year(params.trigger_threshold),
            trajectory,
        }
    }
}

/// Plans a portfolio under the standard methodology and split policy.
pub fn generate_pts_plan(buildings: &[BuildingInput], params: &PlanningParameters) -> PtsPlan {
    PtsScheduler::default().generate_plan(buildings, params)
}
