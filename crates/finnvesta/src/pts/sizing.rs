use super::domain::YearlyInvestment;
use crate::valuation::BuildingInput;
use serde::{Deserialize, Serialize};

/// Euros needed to lift a building from `technical_value` to
/// `replacement_value * target_percentage`.
pub fn investment_need(replacement_value: f64, technical_value: f64, target_percentage: f64) -> f64 {
    (replacement_value * target_percentage - technical_value).max(0.0)
}

/// A sized renovation awaiting allocation to budget years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenovationProject {
    pub renovation_year: i32,
    pub total_investment: f64,
    pub condition_before: f64,
    pub condition_after: f64,
}

/// Floor-area thresholds above which a renovation is spread over several budget years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitPolicy {
    pub two_year_above_m2: f64,
    pub three_year_above_m2: f64,
}

impl SplitPolicy {
    pub const fn standard() -> Self {
        Self {
            two_year_above_m2: 4000.0,
            three_year_above_m2: 8000.0,
        }
    }

    pub fn installments_for(&self, area_m2: f64) -> u8 {
        if area_m2 > self.three_year_above_m2 {
            3
        } else if area_m2 > self.two_year_above_m2 {
            2
        } else {
            1
        }
    }

    /// Allocates `project` to consecutive years starting at its renovation year.
    ///
    /// Intermediate installments of a split carry no condition readings.
    pub fn allocate(
        &self,
        building: &BuildingInput,
        project: &RenovationProject,
    ) -> Vec<YearlyInvestment> {
        let installments = self.installments_for(building.area_m2);

        if installments == 1 {
            return vec![YearlyInvestment {
                year: project.renovation_year,
                building_id: building.id,
                building_name: building.name.clone(),
                investment_amount: project.total_investment,
                condition_before: Some(project.condition_before),
                condition_after: Some(project.condition_after),
                is_split_project: false,
                split_year_index: None,
            }];
        }

        let installment_amount = project.total_investment / f64::from(installments);
        (0..installments)
            .map(|index| YearlyInvestment {
                year: project.renovation_year.saturating_add(i32::from(index)),
                building_id: building.id,
                building_name: building.name.clone(),
                investment_amount: installment_amount,
                condition_before: (index == 0).then_some(project.condition_before),
                condition_after: (index + 1 == installments).then_some(project.condition_after),
                is_split_project: true,
                split_year_index: Some(index + 1),
            })
            .collect()
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(area_m2: f64) -> BuildingInput {
        BuildingInput {
            id: 42,
            name: "Kaupungintalo".to_string(),
            area_m2,
            cost_per_m2: 2500.0,
            construction_year: 1975,
            building_type: None,
        }
    }

    fn project(total_investment: f64) -> RenovationProject {
        RenovationProject {
            renovation_year: 2030,
            total_investment,
            condition_before: 0.48,
            condition_after: 1.0,
        }
    }

    #[test]
    fn investment_need_is_gap_to_target() {
        assert_eq!(investment_need(3_000_000.0, 1_425_000.0, 1.0), 1_575_000.0);
        assert!((investment_need(3_000_000.0, 1_425_000.0, 1.2) - 2_175_000.0).abs() < 1e-6);
        assert_eq!(investment_need(1_000_000.0, 900_000.0, 0.5), 0.0);
    }

    #[test]
    fn installment_count_follows_floor_area() {
        let policy = SplitPolicy::standard();
        assert_eq!(policy.installments_for(1500.0), 1);
        assert_eq!(policy.installments_for(4000.0), 1);
        assert_eq!(policy.installments_for(4000.5), 2);
        assert_eq!(policy.installments_for(8000.0), 2);
        assert_eq!(policy.installments_for(8001.0), 3);
    }

    #[test]
    fn large_building_is_split_over_three_years() {
        let entries = SplitPolicy::standard().allocate(&building(9000.0), &project(900_000.0));

        assert_eq!(entries.len(), 3);
        let years: Vec<i32> = entries.iter().map(|entry| entry.year).collect();
        assert_eq!(years, vec![2030, 2031, 2032]);
        assert!(entries.iter().all(|entry| entry.investment_amount == 300_000.0));
        assert!(entries.iter().all(|entry| entry.is_split_project));
        assert_eq!(
            entries.iter().map(|entry| entry.split_year_index).collect::<Vec<_>>(),
            vec![Some(1), Some(2), Some(3)]
        );

        assert_eq!(entries[0].condition_before, Some(0.48));
        assert_eq!(entries[0].condition_after, None);
        assert_eq!(entries[1].condition_before, None);
        assert_eq!(entries[1].condition_after, None);
        assert_eq!(entries[2].condition_before, None);
        assert_eq!(entries[2].condition_after, Some(1.0));
    }

    #[test]
    fn medium_building_is_split_over_two_years() {
        let entries = SplitPolicy::standard().allocate(&building(6000.0), &project(1_000_001.0));

        assert_eq!(entries.len(), 2);
        let total: f64 = entries.iter().map(|entry| entry.investment_amount).sum();
        assert!((total - 1_000_001.0).abs() < 1e-6);
        assert_eq!(entries[0].condition_before, Some(0.48));
        assert_eq!(entries[1].condition_after, Some(1.0));
        assert_eq!(entries[1].year, 2031);
    }

    #[test]
    fn small_building_gets_single_unsplit_entry() {
        let entries = SplitPolicy::standard().allocate(&building(1500.0), &project(250_000.0));

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert!(!entry.is_split_project);
        assert_eq!(entry.split_year_index, None);
        assert_eq!(entry.investment_amount, 250_000.0);
        assert_eq!(entry.condition_before, Some(0.48));
        assert_eq!(entry.condition_after, Some(1.0));
    }
}
