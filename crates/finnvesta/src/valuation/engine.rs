use super::domain::{BuildingInput, ConditionClass, RepairDebt, ValuationSnapshot};
use super::methodology::Methodology;
use super::trajectory::{Trajectory, TrajectoryPoint};

/// Stateless calculator that applies a [`Methodology`] to building attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValuationEngine {
    methodology: Methodology,
}

impl ValuationEngine {
    pub fn new(methodology: Methodology) -> Self {
        Self { methodology }
    }

    pub fn methodology(&self) -> &Methodology {
        &self.methodology
    }

    pub fn annual_depreciation(&self, replacement_value: f64) -> f64 {
        replacement_value * self.methodology.depreciation_rate
    }

    pub fn repair_debt(
        &self,
        condition_score: f64,
        replacement_value: f64,
        technical_value: f64,
    ) -> RepairDebt {
        let methodology = &self.methodology;
        if condition_score >= methodology.good_condition_floor {
            RepairDebt::none()
        } else if condition_score >= methodology.adequate_condition_floor {
            let target = replacement_value * methodology.maintenance_target;
            RepairDebt::maintenance((target - technical_value).max(0.0))
        } else {
            let target = replacement_value * methodology.improvement_target;
            RepairDebt::improvement((target - technical_value).max(0.0))
        }
    }

    /// Values a building at `reference_year`.
    pub fn snapshot(
        &self,
        area_m2: f64,
        cost_per_m2: f64,
        construction_year: i32,
        reference_year: i32,
    ) -> ValuationSnapshot {
        let age = building_age(construction_year, reference_year);
        self.snapshot_at_age(replacement_value(area_m2, cost_per_m2), age)
    }

    pub fn snapshot_for(&self, building: &BuildingInput, reference_year: i32) -> ValuationSnapshot {
        self.snapshot(
            building.area_m2,
            building.cost_per_m2,
            building.construction_year,
            reference_year,
        )
    }

    pub fn snapshot_at_age(&self, replacement_value: f64, building_age: u32) -> ValuationSnapshot {
        let annual_depreciation = self.annual_depreciation(replacement_value);
        let technical_value = technical_value(replacement_value, annual_depreciation, building_age);
        let condition_score = condition_score(technical_value, replacement_value);
        let repair_debt = self.repair_debt(condition_score, replacement_value, technical_value);

        ValuationSnapshot {
            replacement_value,
            annual_depreciation,
            building_age,
            technical_value,
            condition_score,
            repair_debt,
            condition_class: ConditionClass::from_score(condition_score),
        }
    }

    /// Projects the building from `reference_year` through `reference_year + horizon_years`.
    pub fn forecast(
        &self,
        building: &BuildingInput,
        reference_year: i32,
        horizon_years: u32,
    ) -> Trajectory {
        let replacement_value = replacement_value(building.area_m2, building.cost_per_m2);
        let current_age = building_age(building.construction_year, reference_year);
        self.trajectory_from(replacement_value, current_age, reference_year, horizon_years)
    }

    pub fn trajectory_from(
        &self,
        replacement_value: f64,
        current_age: u32,
        reference_year: i32,
        horizon_years: u32,
    ) -> Trajectory {
        let annual_depreciation = self.annual_depreciation(replacement_value);
        let points = (0..=horizon_years)
            .map(|offset| {
                let age = current_age.saturating_add(offset);
                let technical_value = technical_value(replacement_value, annual_depreciation, age);
                TrajectoryPoint {
                    year: reference_year.saturating_add_unsigned(offset),
                    age,
                    technical_value,
                    condition_score: condition_score(technical_value, replacement_value),
                }
            })
            .collect();

        Trajectory::new(points)
    }
}

/// JHA: floor area times construction cost. No rounding.
pub fn replacement_value(area_m2: f64, cost_per_m2: f64) -> f64 {
    area_m2 * cost_per_m2
}

/// Whole years between construction and `reference_year`, never negative.
pub fn building_age(construction_year: i32, reference_year: i32) -> u32 {
    u32::try_from(i64::from(reference_year) - i64::from(construction_year)).unwrap_or(0)
}

/// TeknA, bounded to `[0, replacement_value]`.
pub fn technical_value(replacement_value: f64, annual_depreciation: f64, building_age: u32) -> f64 {
    let depreciated = replacement_value - annual_depreciation * f64::from(building_age);
    depreciated.min(replacement_value).max(0.0)
}

pub fn condition_score(technical_value: f64, replacement_value: f64) -> f64 {
    if replacement_value == 0.0 {
        return 0.0;
    }
    technical_value / replacement_value
}

/// Full valuation under the standard methodology.
pub fn calculate_full_valuation(
    area_m2: f64,
    cost_per_m2: f64,
    construction_year: i32,
    reference_year: i32,
) -> ValuationSnapshot {
    ValuationEngine::default().snapshot(area_m2, cost_per_m2, construction_year, reference_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn values_the_reference_office_building() {
        let snapshot = calculate_full_valuation(1500.0, 2000.0, 1994, 2024);

        assert_close(snapshot.replacement_value, 3_000_000.0);
        assert_close(snapshot.annual_depreciation, 52_500.0);
        assert_eq!(snapshot.building_age, 30);
        assert_close(snapshot.technical_value, 1_425_000.0);
        assert_close(snapshot.condition_score, 0.475);
        assert_close(snapshot.repair_debt.improvement_need, 2_175_000.0);
        assert_eq!(snapshot.repair_debt.maintenance_need, 0.0);
        assert_close(snapshot.repair_debt.total, 2_175_000.0);
        assert_eq!(snapshot.condition_class, ConditionClass::Critical);
    }

    #[test]
    fn age_is_clamped_for_future_construction_years() {
        assert_eq!(building_age(2030, 2024), 0);
        let snapshot = calculate_full_valuation(100.0, 1000.0, 2030, 2024);
        assert_eq!(snapshot.building_age, 0);
        assert_eq!(snapshot.technical_value, snapshot.replacement_value);
        assert_eq!(snapshot.condition_score, 1.0);
    }

    #[test]
    fn technical_value_floors_at_zero_for_old_buildings() {
        let snapshot = calculate_full_valuation(1000.0, 1500.0, 1900, 2024);
        assert_eq!(snapshot.technical_value, 0.0);
        assert_eq!(snapshot.condition_score, 0.0);
        assert_close(snapshot.repair_debt.improvement_need, 1_500_000.0 * 1.20);
    }

    #[test]
    fn zero_replacement_value_yields_zero_condition() {
        let snapshot = ValuationEngine::default().snapshot_at_age(0.0, 10);
        assert_eq!(snapshot.condition_score, 0.0);
        assert_eq!(snapshot.repair_debt.total, 0.0);
    }

    #[test]
    fn maintenance_tier_lifts_to_seventy_five_percent() {
        // 12 years at 1.75% leaves 79%; 15 years leaves 73.75%.
        let good = calculate_full_valuation(1000.0, 1000.0, 2012, 2024);
        assert_eq!(good.repair_debt, RepairDebt::none());

        let adequate = calculate_full_valuation(1000.0, 1000.0, 2009, 2024);
        assert_close(adequate.condition_score, 0.7375);
        assert_close(adequate.repair_debt.maintenance_need, 12_500.0);
        assert_eq!(adequate.repair_debt.improvement_need, 0.0);
        assert_eq!(adequate.condition_class, ConditionClass::Adequate);
    }

    #[test]
    fn repair_debt_components_are_mutually_exclusive_across_ages() {
        let engine = ValuationEngine::default();
        for age in 0..80 {
            let snapshot = engine.snapshot_at_age(2_000_000.0, age);
            let debt = snapshot.repair_debt;
            assert!(debt.maintenance_need == 0.0 || debt.improvement_need == 0.0);
            assert_close(debt.total, debt.maintenance_need + debt.improvement_need);
        }
    }

    #[test]
    fn injected_methodology_changes_depreciation() {
        let engine = ValuationEngine::new(Methodology {
            depreciation_rate: 0.02,
            ..Methodology::finnish_standard()
        });
        let snapshot = engine.snapshot(1000.0, 1000.0, 2014, 2024);
        assert_close(snapshot.annual_depreciation, 20_000.0);
        assert_close(snapshot.condition_score, 0.8);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let engine = ValuationEngine::default();
        let first = engine.snapshot(2345.5, 1873.25, 1981, 2024);
        let second = engine.snapshot(2345.5, 1873.25, 1981, 2024);
        assert_eq!(first, second);
    }
}
