use super::views::{ConditionBandEntry, PortfolioConditionOverview};
use crate::valuation::{ConditionClass, ValuationSnapshot};
use std::collections::HashMap;

impl PortfolioConditionOverview {
    /// Rolls current valuations up into dashboard figures.
    pub fn from_snapshots(snapshots: &[ValuationSnapshot]) -> Self {
        let mut per_class: HashMap<ConditionClass, usize> = HashMap::new();
        let mut total_replacement_value = 0.0;
        let mut total_technical_value = 0.0;
        let mut total_repair_debt = 0.0;
        let mut condition_sum = 0.0;

        for snapshot in snapshots {
            *per_class.entry(snapshot.condition_class).or_default() += 1;
            total_replacement_value += snapshot.replacement_value;
            total_technical_value += snapshot.technical_value;
            total_repair_debt += snapshot.repair_debt.total;
            condition_sum += snapshot.condition_score;
        }

        let count = |class: ConditionClass| per_class.get(&class).copied().unwrap_or(0);
        let average_condition = if snapshots.is_empty() {
            None
        } else {
            Some(condition_sum / snapshots.len() as f64)
        };

        let condition_bands = ConditionClass::ordered()
            .into_iter()
            .map(|class| ConditionBandEntry {
                class,
                class_label: class.label(),
                buildings: count(class),
            })
            .collect();

        Self {
            total_buildings: snapshots.len(),
            buildings_good: count(ConditionClass::Excellent) + count(ConditionClass::Good),
            buildings_adequate: count(ConditionClass::Adequate),
            buildings_poor: count(ConditionClass::Poor),
            buildings_critical: count(ConditionClass::Critical),
            average_condition,
            total_replacement_value,
            total_technical_value,
            total_repair_debt,
            condition_bands,
        }
    }
}
