use serde::{Deserialize, Serialize};

/// Static facts about one building, as handed over by the building register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInput {
    pub id: i64,
    pub name: String,
    pub area_m2: f64,
    pub cost_per_m2: f64,
    pub construction_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
}

impl BuildingInput {
    /// Rejects buildings the engine cannot value meaningfully.
    ///
    /// The calculator itself trusts its inputs; callers run this before
    /// handing untrusted data to the engine.
    pub fn validate(&self) -> Result<(), InvalidBuilding> {
        if !(self.area_m2.is_finite() && self.area_m2 > 0.0) {
            return Err(InvalidBuilding::NonPositiveArea {
                building_id: self.id,
                area_m2: self.area_m2,
            });
        }

        if !(self.cost_per_m2.is_finite() && self.cost_per_m2 > 0.0) {
            return Err(InvalidBuilding::NonPositiveCost {
                building_id: self.id,
                cost_per_m2: self.cost_per_m2,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidBuilding {
    #[error("building {building_id} has non-positive floor area {area_m2}")]
    NonPositiveArea { building_id: i64, area_m2: f64 },
    #[error("building {building_id} has non-positive construction cost {cost_per_m2} per m2")]
    NonPositiveCost { building_id: i64, cost_per_m2: f64 },
}

/// Repair debt (korjausvelka) split into its two mutually exclusive parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RepairDebt {
    /// Maintenance need (kptarve), raised for buildings in adequate condition.
    #[serde(rename = "kptarve")]
    pub maintenance_need: f64,
    /// Improvement need (pptarve), raised for buildings in poor condition.
    #[serde(rename = "pptarve")]
    pub improvement_need: f64,
    pub total: f64,
}

impl RepairDebt {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn maintenance(amount: f64) -> Self {
        Self {
            maintenance_need: amount,
            improvement_need: 0.0,
            total: amount,
        }
    }

    pub fn improvement(amount: f64) -> Self {
        Self {
            maintenance_need: 0.0,
            improvement_need: amount,
            total: amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionClass {
    Critical,
    Poor,
    Adequate,
    Good,
    Excellent,
}

impl ConditionClass {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Excellent,
            Self::Good,
            Self::Adequate,
            Self::Poor,
            Self::Critical,
        ]
    }

    pub fn from_score(condition_score: f64) -> Self {
        if condition_score >= 0.90 {
            Self::Excellent
        } else if condition_score >= 0.75 {
            Self::Good
        } else if condition_score >= 0.60 {
            Self::Adequate
        } else if condition_score >= 0.50 {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Adequate => "Adequate",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

/// Point-in-time valuation of a single building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// JHA: cost to rebuild at current construction cost.
    pub replacement_value: f64,
    pub annual_depreciation: f64,
    pub building_age: u32,
    /// TeknA: replacement value less accumulated depreciation, never below 0.
    pub technical_value: f64,
    /// kla: technical value relative to replacement value.
    pub condition_score: f64,
    pub repair_debt: RepairDebt,
    pub condition_class: ConditionClass,
}
