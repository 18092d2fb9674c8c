use analyzer_core::{CashFlowOption, MetricId, RatioInputs, ScoreBreakdown, ScoreLevel, ScoringSettings, Verdict};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::verdict::classify_verdict;

/// Scores plus the verdict derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub breakdown: ScoreBreakdown,
    pub verdict: Verdict,
}

/// Scoring engine bound to one rubric snapshot.
///
/// Holds no other state; build a new engine when the rubric changes.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    settings: ScoringSettings,
}

impl ScoringEngine {
    pub fn new(settings: ScoringSettings) -> Self {
        let warnings = settings.validate();
        for warning in &warnings {
            tracing::warn!(
                "Rubric for {} (tier {:?}): {}",
                warning.metric,
                warning.tier_index,
                warning.message
            );
        }
        Self { settings }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Score the inputs and classify the subtotals. A form with no ratio and no
    /// cash-flow selection scores 0 but is `Neutral`, not a verdict.
    pub fn evaluate(&self, inputs: &RatioInputs, cash_flow: Option<CashFlowOption>) -> Evaluation {
        let breakdown = aggregate(inputs, cash_flow, &self.settings);
        let verdict = if inputs.is_empty() && cash_flow.is_none() {
            classify_verdict(None, None)
        } else {
            classify_verdict(Some(breakdown.gdp_score), Some(breakdown.prc_score))
        };
        tracing::debug!("Verdict {} ({})", verdict, verdict.label());
        Evaluation { breakdown, verdict }
    }

    /// Badge level of a metric score against the rubric's own maximum
    pub fn level_of(&self, metric: MetricId, score: f64) -> ScoreLevel {
        ScoreLevel::from_ratio(score, self.settings.max_score(metric))
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_passes_strong_company() {
        let engine = ScoringEngine::default();
        let inputs = RatioInputs {
            cagr: 18.0,
            dividend_yield: 6.0,
            pe_ratio: 8.0,
            profit_margin: 18.0,
            roe: 17.0,
            avg_pe: 12.0,
        };
        let eval = engine.evaluate(&inputs, Some(CashFlowOption::ProfitInflow));
        assert_eq!(eval.breakdown.total_score, 175.0);
        assert_eq!(eval.verdict, Verdict::Pass);
        assert!(eval.breakdown.undervalued_pe);
    }

    #[test]
    fn test_evaluate_empty_form_is_neutral() {
        let eval = ScoringEngine::default().evaluate(&RatioInputs::default(), None);
        assert_eq!(eval.breakdown.total_score, 0.0);
        assert_eq!(eval.verdict, Verdict::Neutral);
    }

    #[test]
    fn test_any_entered_value_gives_a_verdict() {
        let engine = ScoringEngine::default();
        let weak = RatioInputs {
            roe: 2.0,
            ..RatioInputs::default()
        };
        assert_eq!(engine.evaluate(&weak, None).verdict, Verdict::Fail);
        assert_eq!(
            engine
                .evaluate(&RatioInputs::default(), Some(CashFlowOption::LossOutflow))
                .verdict,
            Verdict::Fail
        );
    }

    #[test]
    fn test_evaluation_json_shape() {
        let inputs = RatioInputs {
            cagr: 18.0,
            pe_ratio: 8.0,
            ..RatioInputs::default()
        };
        let eval = ScoringEngine::default().evaluate(&inputs, Some(CashFlowOption::ProfitInflow));
        let json = serde_json::to_value(eval).unwrap();
        assert_eq!(json["verdict"], "NEUTRAL");
        assert_eq!(json["breakdown"]["gdp_score"], 80.0);
        assert_eq!(json["breakdown"]["prc_score"], 40.0);
        assert_eq!(json["breakdown"]["passed_zulu"], true);

        let decoded: Evaluation = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, eval);
    }

    #[test]
    fn test_growth_only_company_is_neutral() {
        let inputs = RatioInputs {
            cagr: 20.0,
            pe_ratio: 12.0,
            ..RatioInputs::default()
        };
        let eval = ScoringEngine::default().evaluate(&inputs, Some(CashFlowOption::LossOutflow));
        assert_eq!(eval.breakdown.gdp_score, 70.0);
        assert_eq!(eval.breakdown.prc_score, 1.0);
        assert_eq!(eval.verdict, Verdict::Neutral);
    }

    #[test]
    fn test_level_uses_rubric_maximum() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.level_of(MetricId::Dy, 15.0), ScoreLevel::High);
        assert_eq!(engine.level_of(MetricId::Cagr, 20.0), ScoreLevel::Medium);
        assert_eq!(engine.level_of(MetricId::Pe, 0.0), ScoreLevel::Low);
    }
}
