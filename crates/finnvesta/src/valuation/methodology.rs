use serde::{Deserialize, Serialize};

/// Policy constants of the valuation methodology.
///
/// Injected into [`super::ValuationEngine`] so alternate methodologies can be
/// evaluated side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    /// Share of replacement value lost per year of age.
    pub depreciation_rate: f64,
    /// Condition at or above which a building carries no repair debt.
    pub good_condition_floor: f64,
    /// Condition at or above which only maintenance need is raised.
    pub adequate_condition_floor: f64,
    /// Share of replacement value that maintenance restores a building to.
    pub maintenance_target: f64,
    /// Share of replacement value that an improvement project lifts a building to.
    pub improvement_target: f64,
}

impl Methodology {
    pub const fn finnish_standard() -> Self {
        Self {
            depreciation_rate: 0.0175,
            good_condition_floor: 0.75,
            adequate_condition_floor: 0.60,
            maintenance_target: 0.75,
            improvement_target: 1.20,
        }
    }
}

impl Default for Methodology {
    fn default() -> Self {
        Self::finnish_standard()
    }
}

/// Weights of the nine components scored in a physical condition assessment (PKA).
///
/// The standard table sums to 1.02, not 1.00. The literal weights are kept so
/// scores stay comparable with assessments already on record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub structure: f64,
    pub facade_roof: f64,
    pub windows_doors: f64,
    pub interior_walls: f64,
    pub interior_finishes: f64,
    pub heating: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub hvac: f64,
}

impl ComponentWeights {
    pub const fn standard() -> Self {
        Self {
            structure: 0.30,
            facade_roof: 0.15,
            windows_doors: 0.05,
            interior_walls: 0.10,
            interior_finishes: 0.13,
            heating: 0.05,
            electrical: 0.08,
            plumbing: 0.08,
            hvac: 0.08,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("structure", self.structure),
            ("facade_roof", self.facade_roof),
            ("windows_doors", self.windows_doors),
            ("interior_walls", self.interior_walls),
            ("interior_finishes", self.interior_finishes),
            ("heating", self.heating),
            ("electrical", self.electrical),
            ("plumbing", self.plumbing),
            ("hvac", self.hvac),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self::standard()
    }
}
