use crate::infra::{log_plan_summary, sample_portfolio, validate_buildings, PlanningOverrides};
use clap::Args;
use finnvesta::config::AppConfig;
use finnvesta::error::AppError;
use finnvesta::import::BuildingRegisterImporter;
use finnvesta::pts::{
    current_year, BuildingForecast, PlanningParameters, PortfolioConditionOverview, PtsPlan,
    PtsScheduler,
};
use finnvesta::telemetry;
use finnvesta::valuation::{BuildingInput, ValuationEngine, ValuationSnapshot};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct BuildingArgs {
    /// Gross floor area in square metres
    #[arg(long)]
    pub(crate) area_m2: f64,
    /// Construction cost per square metre in euros
    #[arg(long)]
    pub(crate) cost_per_m2: f64,
    /// Year the building was completed
    #[arg(long)]
    pub(crate) construction_year: i32,
    /// Display name used in the output
    #[arg(long, default_value = "Building")]
    pub(crate) name: String,
}

impl BuildingArgs {
    fn into_building(self) -> BuildingInput {
        BuildingInput {
            id: 1,
            name: self.name,
            area_m2: self.area_m2,
            cost_per_m2: self.cost_per_m2,
            construction_year: self.construction_year,
            building_type: None,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValuationArgs {
    #[command(flatten)]
    pub(crate) building: BuildingArgs,
    /// Year to value the building at (defaults to the current year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
}

#[derive(Args, Debug)]
pub(crate) struct ForecastArgs {
    #[command(flatten)]
    pub(crate) building: BuildingArgs,
    #[command(flatten)]
    pub(crate) planning: PlanningOverrides,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Building register CSV (comma or semicolon separated)
    #[arg(long)]
    pub(crate) register: PathBuf,
    #[command(flatten)]
    pub(crate) planning: PlanningOverrides,
    /// List every scheduled installment under its year
    #[arg(long)]
    pub(crate) list_installments: bool,
    /// Print the plan as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) planning: PlanningOverrides,
}

/// Loads configuration and installs logging for one-shot commands.
fn planning_defaults() -> Result<PlanningParameters, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config.planning)
}

pub(crate) fn run_valuation(args: ValuationArgs) -> Result<(), AppError> {
    let ValuationArgs {
        building,
        reference_year,
    } = args;
    let building = building.into_building();
    building.validate()?;

    let reference_year = reference_year.unwrap_or_else(current_year);
    let snapshot = ValuationEngine::default().snapshot_for(&building, reference_year);
    println!("Valuation of {} in {}", building.name, reference_year);
    render_valuation(&snapshot);
    Ok(())
}

pub(crate) fn run_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let params = args.planning.resolve(planning_defaults()?)?;
    let building = args.building.into_building();
    building.validate()?;

    let forecast = PtsScheduler::default().forecast_building(&building, &params);
    render_forecast(&forecast);
    Ok(())
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        register,
        planning,
        list_installments,
        json,
    } = args;

    let params = planning.resolve(planning_defaults()?)?;
    let register = BuildingRegisterImporter::from_path(&register)?;
    for skipped in &register.skipped {
        eprintln!("skipped row {}: {}", skipped.row, skipped.reason);
    }
    if register.buildings.is_empty() {
        return Err(AppError::NotFound("no valid buildings in register".to_string()));
    }

    let plan = PtsScheduler::default().generate_plan(&register.buildings, &params);
    log_plan_summary(&plan);

    if json {
        let rendered = serde_json::to_string_pretty(&plan).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        render_plan(&plan, list_installments);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let params = args.planning.resolve(planning_defaults()?)?;
    let reference_year = params.effective_reference_year();
    let portfolio = sample_portfolio();
    validate_buildings(&portfolio)?;

    println!(
        "FinnVesta demo portfolio ({} buildings, {})",
        portfolio.len(),
        reference_year
    );

    let engine = ValuationEngine::default();
    let snapshots: Vec<ValuationSnapshot> = portfolio
        .iter()
        .map(|building| engine.snapshot_for(building, reference_year))
        .collect();

    println!("\nCurrent condition");
    for (building, snapshot) in portfolio.iter().zip(&snapshots) {
        println!(
            "- {:<18} built {} | kla {:>5.1}% ({}) | repair debt {}",
            building.name,
            building.construction_year,
            snapshot.condition_score * 100.0,
            snapshot.condition_class.label(),
            format_eur(snapshot.repair_debt.total)
        );
    }

    render_overview(&PortfolioConditionOverview::from_snapshots(&snapshots));

    let scheduler = PtsScheduler::default();
    let plan = scheduler.generate_plan(&portfolio, &params);
    log_plan_summary(&plan);
    render_plan(&plan, true);

    if let Some(building) = portfolio.iter().find(|building| building.area_m2 > 8000.0) {
        println!();
        render_forecast(&scheduler.forecast_building(building, &params));
    }

    Ok(())
}

fn render_valuation(snapshot: &ValuationSnapshot) {
    println!(
        "- Replacement value (JHA): {}",
        format_eur(snapshot.replacement_value)
    );
    println!(
        "- Annual depreciation: {}",
        format_eur(snapshot.annual_depreciation)
    );
    println!("- Age: {} years", snapshot.building_age);
    println!(
        "- Technical value (TeknA): {}",
        format_eur(snapshot.technical_value)
    );
    println!(
        "- Condition (kla): {:.1}% ({})",
        snapshot.condition_score * 100.0,
        snapshot.condition_class.label()
    );
    println!(
        "- Repair debt: {} (maintenance {}, improvement {})",
        format_eur(snapshot.repair_debt.total),
        format_eur(snapshot.repair_debt.maintenance_need),
        format_eur(snapshot.repair_debt.improvement_need)
    );
}

fn render_forecast(forecast: &BuildingForecast) {
    println!(
        "Condition forecast for {} from {}",
        forecast.building_name, forecast.reference_year
    );
    match forecast.trigger_year {
        Some(year) => println!(
            "- Falls below {:.0}% in {}",
            forecast.trigger_threshold * 100.0,
            year
        ),
        None => println!(
            "- Stays above {:.0}% for the whole horizon",
            forecast.trigger_threshold * 100.0
        ),
    }
    for point in &forecast.trajectory {
        println!(
            "  {} | age {:>3} | kla {:>5.1}% | TeknA {}",
            point.year,
            point.age,
            point.condition_score * 100.0,
            format_eur(point.technical_value)
        );
    }
}

fn render_overview(overview: &PortfolioConditionOverview) {
    println!("\nPortfolio overview");
    if let Some(average) = overview.average_condition {
        println!("- Average condition: {:.1}%", average * 100.0);
    }
    println!(
        "- Good {} | adequate {} | poor {} | critical {}",
        overview.buildings_good,
        overview.buildings_adequate,
        overview.buildings_poor,
        overview.buildings_critical
    );
    println!(
        "- JHA {} | TeknA {} | repair debt {}",
        format_eur(overview.total_replacement_value),
        format_eur(overview.total_technical_value),
        format_eur(overview.total_repair_debt)
    );
}

fn render_plan(plan: &PtsPlan, list_installments: bool) {
    println!("\n{}", plan_heading(plan));
    if plan.is_empty() {
        return;
    }
    println!(
        "- Total {} | average {} per year",
        format_eur(plan.total_investment),
        format_eur(plan.average_annual_investment)
    );
    if let Some(peak) = plan.peak_year() {
        println!(
            "- Peak year {} with {}",
            peak.year,
            format_eur(peak.total_investment)
        );
    }
    if !plan.deferred_installments.is_empty() {
        println!(
            "- {} installments ({}) fall after {}",
            plan.deferred_installments.len(),
            format_eur(plan.deferred_total()),
            plan.end_year
        );
    }

    for entry in plan.annual_summary() {
        if entry.total_investment == 0.0 {
            continue;
        }
        println!(
            "  {} | {:>2} buildings | {:>16} | cumulative {}",
            entry.year,
            entry.buildings_count,
            format_eur(entry.total_investment),
            format_eur(entry.cumulative_investment)
        );
        if list_installments {
            for investment in plan.investments_for_year(entry.year) {
                let split = match investment.split_year_index {
                    Some(index) => format!(" (installment {index})"),
                    None => String::new(),
                };
                println!(
                    "      {} {}{}",
                    investment.building_name,
                    format_eur(investment.investment_amount),
                    split
                );
            }
        }
    }
}

fn plan_heading(plan: &PtsPlan) -> String {
    let span = format!(
        "PTS plan {}-{} ({} years)",
        plan.start_year,
        plan.end_year,
        plan.planning_horizon_years()
    );
    if plan.is_empty() {
        format!(
            "{span}: none of {} buildings needs renovation",
            plan.total_buildings
        )
    } else {
        format!(
            "{span}: {} of {} buildings need renovation",
            plan.buildings_needing_renovation, plan.total_buildings
        )
    }
}

/// Whole euros with space-grouped thousands, e.g. `1 575 000 €`.
fn format_eur(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_euros_with_grouped_thousands() {
        assert_eq!(format_eur(1_575_000.0), "1 575 000 €");
        assert_eq!(format_eur(999.6), "1 000 €");
        assert_eq!(format_eur(0.0), "0 €");
        assert_eq!(format_eur(-12_500.0), "-12 500 €");
    }

    #[test]
    fn plan_heading_reports_horizon_and_renovation_count() {
        let params = PlanningParameters {
            reference_year: Some(2024),
            ..PlanningParameters::default()
        };
        let scheduler = PtsScheduler::default();

        let plan = scheduler.generate_plan(&sample_portfolio(), &params);
        let heading = plan_heading(&plan);
        assert!(heading.starts_with("PTS plan 2024-2039 (15 years): "));
        assert!(heading.ends_with(" of 6 buildings need renovation"));

        let empty = scheduler.generate_plan(&[], &params);
        assert_eq!(
            plan_heading(&empty),
            "PTS plan 2024-2039 (15 years): none of 0 buildings needs renovation"
        );
    }
}
