use super::super::domain::PtsPlan;
use super::views::AnnualSummaryEntry;
use std::collections::BTreeSet;

impl PtsPlan {
    /// Year-by-year totals with a running cumulative sum.
    pub fn annual_summary(&self) -> Vec<AnnualSummaryEntry> {
        let mut cumulative_investment = 0.0;

        (self.start_year..=self.end_year)
            .map(|year| {
                let investments = self.investments_for_year(year);
                let total_investment: f64 = investments
                    .iter()
                    .map(|investment| investment.investment_amount)
                    .sum();
                cumulative_investment += total_investment;

                let buildings_count = investments
                    .iter()
                    .map(|investment| investment.building_id)
                    .collect::<BTreeSet<_>>()
                    .len();

                AnnualSummaryEntry {
                    year,
                    total_investment,
                    buildings_count,
                    cumulative_investment,
                }
            })
            .collect()
    }

    /// Year with the largest scheduled spend; the earliest wins a tie.
    pub fn peak_year(&self) -> Option<AnnualSummaryEntry> {
        self.annual_summary()
            .into_iter()
            .filter(|entry| entry.total_investment > 0.0)
            .fold(None, |peak: Option<AnnualSummaryEntry>, entry| match peak {
                Some(current) if current.total_investment >= entry.total_investment => {
                    Some(current)
                }
                _ => Some(entry),
            })
    }
}
