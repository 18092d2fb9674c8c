use analyzer_core::{CashFlowOption, RatioInputs, ScoreBreakdown, ScoringSettings};

use crate::cashflow::cash_flow_score;
use crate::ratios::{check_undervalued_pe, check_zulu_principle};
use crate::tiers::get_score;

/// Score every metric and sum the GDP and PRC halves.
///
/// Absent (`NaN`) ratios are absorbed by the tier evaluator, so the totals are
/// always numbers. Totals are not clamped to the rubric's maxima.
pub fn aggregate(
    inputs: &RatioInputs,
    cash_flow: Option<CashFlowOption>,
    settings: &ScoringSettings,
) -> ScoreBreakdown {
    let cagr_score = get_score(inputs.cagr, &settings.cagr);
    let dy_score = get_score(inputs.dividend_yield, &settings.dy);
    let pe_score = get_score(inputs.pe_ratio, &settings.pe);
    let margin_score = get_score(inputs.profit_margin, &settings.margin);
    let roe_score = get_score(inputs.roe, &settings.roe);
    let cash_flow_score = cash_flow_score(cash_flow, &settings.cashflow);

    let gdp_score = cagr_score + dy_score + pe_score;
    let prc_score = margin_score + roe_score + cash_flow_score;

    let passed_zulu = check_zulu_principle(inputs.pe_ratio, inputs.cagr);
    // a PE of zero or less would read as a 100%+ discount
    let undervalued_pe = inputs.pe_ratio > 0.0 && check_undervalued_pe(inputs.pe_ratio, inputs.avg_pe);

    let breakdown = ScoreBreakdown {
        cagr_score,
        dy_score,
        pe_score,
        margin_score,
        roe_score,
        cash_flow_score,
        gdp_score,
        prc_score,
        total_score: gdp_score + prc_score,
        passed_zulu,
        undervalued_pe,
    };

    tracing::debug!(
        gdp = breakdown.gdp_score,
        prc = breakdown.prc_score,
        total = breakdown.total_score,
        passed_zulu,
        undervalued_pe,
        "Aggregated cold eye score"
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::{MetricConfig, MetricId, MetricUnit, ThresholdMetric};

    fn sample_inputs() -> RatioInputs {
        RatioInputs {
            cagr: 18.0,
            dividend_yield: 6.0,
            pe_ratio: 8.0,
            profit_margin: 18.0,
            roe: 17.0,
            avg_pe: f64::NAN,
        }
    }

    #[test]
    fn test_end_to_end_default_rubric() {
        let b = aggregate(
            &sample_inputs(),
            Some(CashFlowOption::ProfitInflow),
            &ScoringSettings::default(),
        );
        assert_eq!(b.cagr_score, 50.0);
        assert_eq!(b.dy_score, 15.0);
        assert_eq!(b.pe_score, 30.0);
        assert_eq!(b.gdp_score, 95.0);
        assert_eq!(b.margin_score, 20.0);
        assert_eq!(b.roe_score, 20.0);
        assert_eq!(b.cash_flow_score, 40.0);
        assert_eq!(b.prc_score, 80.0);
        assert_eq!(b.total_score, 175.0);
        // PEG = 8 / 18
        assert!(b.passed_zulu);
        assert!(!b.undervalued_pe);
    }

    #[test]
    fn test_sum_invariants_hold_across_inputs() {
        let settings = ScoringSettings::default();
        let values = [f64::NAN, -5.0, 0.0, 0.5, 3.0, 7.5, 12.0, 16.0, 30.0, f64::INFINITY];
        for &a in &values {
            for &b in &values {
                let inputs = RatioInputs {
                    cagr: a,
                    dividend_yield: b,
                    pe_ratio: a,
                    profit_margin: b,
                    roe: a,
                    avg_pe: b,
                };
                for cash in [None, Some(CashFlowOption::LossOutflow)] {
                    let s = aggregate(&inputs, cash, &settings);
                    assert_eq!(s.gdp_score, s.cagr_score + s.dy_score + s.pe_score);
                    assert_eq!(s.prc_score, s.margin_score + s.roe_score + s.cash_flow_score);
                    assert_eq!(s.total_score, s.gdp_score + s.prc_score);
                    assert!(!s.total_score.is_nan());
                }
            }
        }
    }

    #[test]
    fn test_empty_form_scores_zero() {
        let b = aggregate(&RatioInputs::default(), None, &ScoringSettings::default());
        assert_eq!(b.total_score, 0.0);
        assert!(!b.passed_zulu);
        assert!(!b.undervalued_pe);
    }

    #[test]
    fn test_undervalued_pe_side_channel() {
        let inputs = RatioInputs {
            pe_ratio: 15.0,
            avg_pe: 20.0,
            ..sample_inputs()
        };
        let b = aggregate(&inputs, None, &ScoringSettings::default());
        assert!(b.undervalued_pe);
        assert_eq!(b.pe_score, 20.0);

        let zero_pe = RatioInputs {
            pe_ratio: 0.0,
            avg_pe: 20.0,
            ..sample_inputs()
        };
        assert!(!aggregate(&zero_pe, None, &ScoringSettings::default()).undervalued_pe);
    }

    #[test]
    fn test_edited_rubric_is_not_clamped() {
        let mut settings = ScoringSettings::default();
        settings
            .replace(
                MetricId::Roe,
                MetricConfig::Threshold(ThresholdMetric::new(
                    "ROE",
                    MetricUnit::Percent,
                    false,
                    &[(10.0, 500.0)],
                )),
            )
            .unwrap();
        let b = aggregate(&sample_inputs(), Some(CashFlowOption::ProfitInflow), &settings);
        assert_eq!(b.roe_score, 500.0);
        assert_eq!(b.prc_score, 560.0);
    }
}
