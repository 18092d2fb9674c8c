use analyzer_core::{CashFlowOption, CategoricalMetric};

/// Points for the selected cash-flow category. No selection, or a category the
/// rubric has no entry for, scores 0.
pub fn cash_flow_score(selection: Option<CashFlowOption>, config: &CategoricalMetric) -> f64 {
    selection
        .and_then(|option| config.scores.get(&option).copied())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::ScoringSettings;

    #[test]
    fn test_default_category_points() {
        let cashflow = ScoringSettings::default().cashflow;
        assert_eq!(cash_flow_score(Some(CashFlowOption::ProfitInflow), &cashflow), 40.0);
        assert_eq!(cash_flow_score(Some(CashFlowOption::ProfitOutflow), &cashflow), 30.0);
        assert_eq!(cash_flow_score(Some(CashFlowOption::LossInflow), &cashflow), 20.0);
        assert_eq!(cash_flow_score(Some(CashFlowOption::LossOutflow), &cashflow), 1.0);
    }

    #[test]
    fn test_missing_selection_or_entry_is_zero() {
        let mut cashflow = ScoringSettings::default().cashflow;
        assert_eq!(cash_flow_score(None, &cashflow), 0.0);

        cashflow.scores.remove(&CashFlowOption::LossInflow);
        assert_eq!(cash_flow_score(Some(CashFlowOption::LossInflow), &cashflow), 0.0);
    }
}
