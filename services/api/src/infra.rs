use clap::Args;
use finnvesta::pts::{PlanningError, PlanningParameters, PtsPlan};
use finnvesta::valuation::BuildingInput;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Planning knobs used when a request leaves them out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlanningDefaults(pub(crate) PlanningParameters);

/// Optional per-call replacements for the configured planning defaults.
#[derive(Args, Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PlanningOverrides {
    /// Condition score below which a building needs renovation (0.0-1.0)
    #[arg(long)]
    pub(crate) trigger_threshold: Option<f64>,
    /// Post-renovation condition relative to replacement value (0.5-1.5)
    #[arg(long)]
    pub(crate) target_percentage: Option<f64>,
    /// Number of years to plan ahead (5-30)
    #[arg(long = "horizon")]
    pub(crate) planning_horizon_years: Option<u32>,
    /// First year of the plan (defaults to the current year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
}

impl PlanningOverrides {
    pub(crate) fn resolve(
        self,
        defaults: PlanningParameters,
    ) -> Result<PlanningParameters, PlanningError> {
        let params = PlanningParameters {
            trigger_threshold: self.trigger_threshold.unwrap_or(defaults.trigger_threshold),
            target_percentage: self.target_percentage.unwrap_or(defaults.target_percentage),
            planning_horizon_years: self
                .planning_horizon_years
                .unwrap_or(defaults.planning_horizon_years),
            reference_year: self.reference_year.or(defaults.reference_year),
        };
        params.validate()?;
        Ok(params)
    }
}

pub(crate) fn validate_buildings(buildings: &[BuildingInput]) -> Result<(), PlanningError> {
    for building in buildings {
        building.validate()?;
    }
    Ok(())
}

pub(crate) fn log_plan_summary(plan: &PtsPlan) {
    info!(
        start_year = plan.start_year,
        end_year = plan.end_year,
        horizon_years = plan.planning_horizon_years(),
        total_buildings = plan.total_buildings,
        buildings_needing_renovation = plan.buildings_needing_renovation,
        total_investment = plan.total_investment,
        deferred_installments = plan.deferred_installments.len(),
        "pts plan generated"
    );
    if plan.is_empty() {
        info!("no building falls below the trigger threshold within the horizon");
    }
}

/// Built-in municipal portfolio used by the demo command.
pub(crate) fn sample_portfolio() -> Vec<BuildingInput> {
    let building = |id: i64, name: &str, area_m2: f64, cost_per_m2: f64, year: i32, kind: &str| {
        BuildingInput {
            id,
            name: name.to_string(),
            area_m2,
            cost_per_m2,
            construction_year: year,
            building_type: Some(kind.to_string()),
        }
    };

    vec![
        building(1, "Keskuskoulu", 1500.0, 2000.0, 1994, "school"),
        building(2, "Uimahalli", 5200.0, 2600.0, 1988, "sports"),
        building(3, "Kaupungintalo", 9000.0, 2300.0, 2000, "office"),
        building(4, "Päiväkoti Tähti", 820.0, 2300.0, 2008, "daycare"),
        building(5, "Pääkirjasto", 3400.0, 2450.0, 1979, "library"),
        building(6, "Terveysasema", 2100.0, 2700.0, 2016, "healthcare"),
    ]
}
