use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    pub age: u32,
    pub technical_value: f64,
    pub condition_score: f64,
}

/// Yearly condition forecast for one building, ordered by ascending year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub(crate) fn new(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn current(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn point_for_year(&self, year: i32) -> Option<&TrajectoryPoint> {
        self.points.iter().find(|point| point.year == year)
    }

    /// First year whose condition falls below `threshold`.
    ///
    /// A building already below the threshold triggers in the first year of
    /// the trajectory. Later, lower points never win over an earlier hit.
    pub fn trigger_year(&self, threshold: f64) -> Option<i32> {
        self.points
            .iter()
            .find(|point| point.condition_score < threshold)
            .map(|point| point.year)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::super::engine::ValuationEngine;
    use super::super::domain::BuildingInput;

    fn building(construction_year: i32) -> BuildingInput {
        BuildingInput {
            id: 7,
            name: "Koulu".to_string(),
            area_m2: 1000.0,
            cost_per_m2: 2000.0,
            construction_year,
            building_type: Some("school".to_string()),
        }
    }

    #[test]
    fn forecast_covers_reference_year_through_horizon() {
        let trajectory = ValuationEngine::default().forecast(&building(2000), 2024, 15);

        assert_eq!(trajectory.len(), 16);
        let years: Vec<i32> = trajectory.points().iter().map(|p| p.year).collect();
        assert_eq!(years.first(), Some(&2024));
        assert_eq!(years.last(), Some(&2039));
        assert_eq!(trajectory.current().map(|p| p.age), Some(24));
        assert_eq!(trajectory.point_for_year(2030).map(|p| p.age), Some(30));
    }

    #[test]
    fn points_match_point_in_time_valuation() {
        let engine = ValuationEngine::default();
        let input = building(1990);
        let trajectory = engine.forecast(&input, 2024, 10);

        for point in &trajectory {
            let snapshot = engine.snapshot_for(&input, point.year);
            assert_eq!(point.technical_value, snapshot.technical_value);
            assert_eq!(point.condition_score, snapshot.condition_score);
        }
    }

    #[test]
    fn condition_never_improves_and_stays_at_zero() {
        let trajectory = ValuationEngine::default().forecast(&building(1970), 2024, 30);

        let scores: Vec<f64> = trajectory.points().iter().map(|p| p.condition_score).collect();
        assert!(scores.windows(2).all(|pair| pair[1] <= pair[0]));

        let first_zero = scores
            .iter()
            .position(|score| *score == 0.0)
            .expect("building fully depreciates within the horizon");
        assert!(scores[first_zero..].iter().all(|score| *score == 0.0));
    }

    #[test]
    fn trigger_is_first_year_below_threshold() {
        // 1000 * 2000 at 1.75%/year drops below 50% once age exceeds 28.57 years.
        let trajectory = ValuationEngine::default().forecast(&building(2000), 2024, 15);

        assert_eq!(trajectory.trigger_year(0.50), Some(2029));
        let hit = trajectory.point_for_year(2029).expect("trigger year in trajectory");
        assert!(hit.condition_score < 0.50);
        assert!(trajectory
            .points()
            .iter()
            .filter(|point| point.year < 2029)
            .all(|point| point.condition_score >= 0.50));
    }

    #[test]
    fn trigger_is_reference_year_when_already_below_threshold() {
        let trajectory = ValuationEngine::default().forecast(&building(1980), 2024, 15);
        assert_eq!(trajectory.trigger_year(0.50), Some(2024));
    }

    #[test]
    fn no_trigger_when_threshold_is_never_crossed() {
        let trajectory = ValuationEngine::default().forecast(&building(2020), 2024, 15);
        assert_eq!(trajectory.trigger_year(0.50), None);
    }
}
