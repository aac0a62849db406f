use crate::infra::{
    log_plan_summary, validate_buildings, AppState, PlanningDefaults, PlanningOverrides,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use finnvesta::error::AppError;
use finnvesta::import::{BuildingRegisterImporter, SkippedRow};
use finnvesta::pts::{
    current_year, AnnualSummaryEntry, BuildingForecast, PortfolioConditionOverview, PtsPlan,
    PtsScheduler,
};
use finnvesta::valuation::{
    calculate_full_valuation, BuildingInput, ValuationEngine, ValuationSnapshot,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct ValuationRequest {
    pub(crate) area_m2: f64,
    pub(crate) cost_per_m2: f64,
    pub(crate) construction_year: i32,
    #[serde(default)]
    pub(crate) reference_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValuationResponse {
    pub(crate) reference_year: i32,
    #[serde(flatten)]
    pub(crate) valuation: ValuationSnapshot,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchValuationRequest {
    pub(crate) buildings: Vec<BuildingInput>,
    #[serde(default)]
    pub(crate) reference_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BuildingValuation {
    pub(crate) building_id: i64,
    pub(crate) building_name: String,
    #[serde(flatten)]
    pub(crate) valuation: ValuationSnapshot,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchValuationResponse {
    pub(crate) reference_year: i32,
    pub(crate) count: usize,
    pub(crate) valuations: Vec<BuildingValuation>,
}

/// Buildings given inline, as a register CSV, or both.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PortfolioSource {
    #[serde(default)]
    pub(crate) buildings: Vec<BuildingInput>,
    #[serde(default)]
    pub(crate) register_csv: Option<String>,
}

impl PortfolioSource {
    fn load(self) -> Result<(Vec<BuildingInput>, Vec<SkippedRow>), AppError> {
        let PortfolioSource {
            mut buildings,
            register_csv,
        } = self;
        validate_buildings(&buildings)?;

        let mut skipped = Vec::new();
        if let Some(csv) = register_csv {
            let register = BuildingRegisterImporter::from_reader(Cursor::new(csv.into_bytes()))?;
            buildings.extend(register.buildings);
            skipped = register.skipped;
        }

        if buildings.is_empty() {
            return Err(AppError::NotFound("no buildings in portfolio".to_string()));
        }

        Ok((buildings, skipped))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanRequest {
    #[serde(flatten)]
    pub(crate) portfolio: PortfolioSource,
    #[serde(flatten)]
    pub(crate) overrides: PlanningOverrides,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) plan: PtsPlan,
    pub(crate) annual_summary: Vec<AnnualSummaryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) peak_year: Option<AnnualSummaryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) skipped_rows: Vec<SkippedRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastRequest {
    pub(crate) building: BuildingInput,
    #[serde(flatten)]
    pub(crate) overrides: PlanningOverrides,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverviewRequest {
    #[serde(flatten)]
    pub(crate) portfolio: PortfolioSource,
    #[serde(default)]
    pub(crate) reference_year: Option<i32>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/valuations/calculate", post(valuation_endpoint))
        .route(
            "/api/v1/valuations/batch-calculate",
            post(batch_valuation_endpoint),
        )
        .route("/api/v1/pts/generate-plan", post(generate_plan_endpoint))
        .route(
            "/api/v1/pts/building-forecast",
            post(building_forecast_endpoint),
        )
        .route(
            "/api/v1/portfolio/overview",
            post(portfolio_overview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn valuation_endpoint(
    Json(payload): Json<ValuationRequest>,
) -> Result<Json<ValuationResponse>, AppError> {
    let ValuationRequest {
        area_m2,
        cost_per_m2,
        construction_year,
        reference_year,
    } = payload;

    BuildingInput {
        id: 0,
        name: String::new(),
        area_m2,
        cost_per_m2,
        construction_year,
        building_type: None,
    }
    .validate()?;

    let reference_year = reference_year.unwrap_or_else(current_year);
    Ok(Json(ValuationResponse {
        reference_year,
        valuation: calculate_full_valuation(
            area_m2,
            cost_per_m2,
            construction_year,
            reference_year,
        ),
    }))
}

pub(crate) async fn batch_valuation_endpoint(
    Json(payload): Json<BatchValuationRequest>,
) -> Result<Json<BatchValuationResponse>, AppError> {
    let BatchValuationRequest {
        buildings,
        reference_year,
    } = payload;
    validate_buildings(&buildings)?;

    let reference_year = reference_year.unwrap_or_else(current_year);
    let engine = ValuationEngine::default();
    let valuations: Vec<BuildingValuation> = buildings
        .into_iter()
        .map(|building| BuildingValuation {
            valuation: engine.snapshot_for(&building, reference_year),
            building_id: building.id,
            building_name: building.name,
        })
        .collect();

    Ok(Json(BatchValuationResponse {
        reference_year,
        count: valuations.len(),
        valuations,
    }))
}

pub(crate) async fn generate_plan_endpoint(
    Extension(PlanningDefaults(defaults)): Extension<PlanningDefaults>,
    Json(payload): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let params = payload.overrides.resolve(defaults)?;
    let (buildings, skipped_rows) = payload.portfolio.load()?;

    let plan = PtsScheduler::default().generate_plan(&buildings, &params);
    log_plan_summary(&plan);

    Ok(Json(PlanResponse {
        generated_at: Utc::now(),
        annual_summary: plan.annual_summary(),
        peak_year: plan.peak_year(),
        plan,
        skipped_rows,
    }))
}

pub(crate) async fn building_forecast_endpoint(
    Extension(PlanningDefaults(defaults)): Extension<PlanningDefaults>,
    Json(payload): Json<ForecastRequest>,
) -> Result<Json<BuildingForecast>, AppError> {
    let params = payload.overrides.resolve(defaults)?;
    payload.building.validate()?;

    Ok(Json(
        PtsScheduler::default().forecast_building(&payload.building, &params),
    ))
}

pub(crate) async fn portfolio_overview_endpoint(
    Json(payload): Json<OverviewRequest>,
) -> Result<Json<PortfolioConditionOverview>, AppError> {
    let reference_year = payload.reference_year.unwrap_or_else(current_year);
    let (buildings, _) = payload.portfolio.load()?;

    let engine = ValuationEngine::default();
    let snapshots: Vec<ValuationSnapshot> = buildings
        .iter()
        .map(|building| engine.snapshot_for(building, reference_year))
        .collect();

    Ok(Json(PortfolioConditionOverview::from_snapshots(&snapshots)))
}
