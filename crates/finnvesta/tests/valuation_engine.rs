use finnvesta::valuation::{
    calculate_full_valuation, BuildingInput, ConditionClass, Methodology, ValuationEngine,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn school(construction_year: i32) -> BuildingInput {
    BuildingInput {
        id: 1,
        name: "Keskuskoulu".to_string(),
        area_m2: 1500.0,
        cost_per_m2: 2000.0,
        construction_year,
        building_type: Some("school".to_string()),
    }
}

#[test]
fn reference_building_valuation_matches_published_figures() {
    let snapshot = calculate_full_valuation(1500.0, 2000.0, 1994, 2024);

    assert_close(snapshot.replacement_value, 3_000_000.0);
    assert_close(snapshot.annual_depreciation, 52_500.0);
    assert_eq!(snapshot.building_age, 30);
    assert_close(snapshot.technical_value, 1_425_000.0);
    assert_close(snapshot.condition_score, 0.475);
    assert_eq!(snapshot.repair_debt.maintenance_need, 0.0);
    assert_close(snapshot.repair_debt.improvement_need, 2_175_000.0);
    assert_close(snapshot.repair_debt.total, 2_175_000.0);
    assert_eq!(snapshot.condition_class, ConditionClass::Critical);
}

#[test]
fn technical_value_stays_within_bounds_and_declines_with_age() {
    let engine = ValuationEngine::default();

    for construction_year in [1930, 1965, 1994, 2010, 2024, 2030] {
        let trajectory = engine.forecast(&school(construction_year), 2024, 30);
        let mut previous = f64::INFINITY;

        for point in trajectory.points() {
            assert!(point.technical_value >= 0.0);
            assert!(point.technical_value <= 3_000_000.0);
            assert!(
                point.condition_score <= previous,
                "condition rose in {} for a building from {}",
                point.year,
                construction_year
            );
            previous = point.condition_score;
        }
    }

    let worn_out = engine.forecast(&school(1950), 2024, 10);
    assert!(worn_out
        .points()
        .iter()
        .all(|point| point.condition_score == 0.0));
}

#[test]
fn repair_debt_parts_never_overlap() {
    let engine = ValuationEngine::default();

    for construction_year in 1940..=2024 {
        let debt = engine.snapshot_for(&school(construction_year), 2024).repair_debt;
        assert!(
            debt.maintenance_need == 0.0 || debt.improvement_need == 0.0,
            "both needs raised for a building from {construction_year}"
        );
        assert_close(debt.total, debt.maintenance_need + debt.improvement_need);
    }
}

#[test]
fn trigger_year_is_first_point_below_threshold() {
    let engine = ValuationEngine::default();

    for construction_year in [1990, 1995, 2000, 2005, 2015] {
        let trajectory = engine.forecast(&school(construction_year), 2024, 15);
        let trigger = trajectory.trigger_year(0.5);
        let first_below = trajectory
            .points()
            .iter()
            .find(|point| point.condition_score < 0.5)
            .map(|point| point.year);

        assert_eq!(trigger, first_below);
        if let Some(year) = trigger {
            assert!(trajectory
                .points()
                .iter()
                .filter(|point| point.year < year)
                .all(|point| point.condition_score >= 0.5));
        }
    }
}

#[test]
fn alternate_methodology_changes_depreciation_only_where_injected() {
    let faster = ValuationEngine::new(Methodology {
        depreciation_rate: 0.02,
        ..Methodology::finnish_standard()
    });

    let snapshot = faster.snapshot(1500.0, 2000.0, 1994, 2024);
    assert_close(snapshot.annual_depreciation, 60_000.0);
    assert_close(snapshot.technical_value, 1_200_000.0);
    assert_close(snapshot.condition_score, 0.4);

    let standard = calculate_full_valuation(1500.0, 2000.0, 1994, 2024);
    assert_close(standard.condition_score, 0.475);
}

#[test]
fn valuation_is_repeatable() {
    let first = calculate_full_valuation(2350.5, 2875.0, 1987, 2024);
    let second = calculate_full_valuation(2350.5, 2875.0, 1987, 2024);
    assert_eq!(first, second);
}
