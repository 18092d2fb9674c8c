//! Scoring rubric model.
//!
//! Five metrics are scored against ordered threshold tiers; cash flow is scored
//! by a direct category lookup. The two shapes are separate variants so the
//! evaluator never has to sniff which one it was handed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{AnalyzerError, CashFlowOption, MetricId, MetricUnit};

/// A single breakpoint in a metric's rubric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringTier {
    /// `+inf` is written as JSON `null`, `-inf` as `"-inf"`
    #[serde(with = "crate::float_serde::infinity_as_null")]
    pub threshold: f64,
    pub score: f64,
}

impl ScoringTier {
    pub fn new(threshold: f64, score: f64) -> Self {
        Self { threshold, score }
    }
}

/// Rubric entry for a ratio scored by ordered thresholds.
///
/// Tiers are scanned in declared order and the first match wins, so normal
/// metrics need descending thresholds and inverse metrics ascending ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetric {
    pub label: String,
    pub unit: MetricUnit,
    /// Lower raw values score higher (PE)
    #[serde(default)]
    pub is_inverse: bool,
    pub tiers: Vec<ScoringTier>,
}

impl ThresholdMetric {
    pub fn new(label: &str, unit: MetricUnit, is_inverse: bool, tiers: &[(f64, f64)]) -> Self {
        Self {
            label: label.to_string(),
            unit,
            is_inverse,
            tiers: tiers
                .iter()
                .map(|&(threshold, score)| ScoringTier::new(threshold, score))
                .collect(),
        }
    }

    pub fn max_score(&self) -> f64 {
        self.tiers.iter().map(|t| t.score).fold(0.0, f64::max)
    }
}

/// Rubric entry scored by direct category lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalMetric {
    pub label: String,
    pub unit: MetricUnit,
    pub scores: BTreeMap<CashFlowOption, f64>,
}

impl CategoricalMetric {
    pub fn max_score(&self) -> f64 {
        self.scores.values().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricConfig {
    Threshold(ThresholdMetric),
    Categorical(CategoricalMetric),
}

impl MetricConfig {
    pub fn label(&self) -> &str {
        match self {
            MetricConfig::Threshold(m) => &m.label,
            MetricConfig::Categorical(m) => &m.label,
        }
    }

    pub fn max_score(&self) -> f64 {
        match self {
            MetricConfig::Threshold(m) => m.max_score(),
            MetricConfig::Categorical(m) => m.max_score(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            MetricConfig::Threshold(_) => "threshold",
            MetricConfig::Categorical(_) => "categorical",
        }
    }
}

/// The full rubric: one entry per metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub cagr: ThresholdMetric,
    pub dy: ThresholdMetric,
    pub pe: ThresholdMetric,
    pub margin: ThresholdMetric,
    pub roe: ThresholdMetric,
    pub cashflow: CategoricalMetric,
}

impl Default for ScoringSettings {
    /// The "Cold Eye" default thresholds
    fn default() -> Self {
        Self {
            cagr: ThresholdMetric::new(
                "CAGR (Growth)",
                MetricUnit::Percent,
                false,
                &[(15.0, 50.0), (10.0, 40.0), (6.0, 30.0), (1.0, 20.0)],
            ),
            dy: ThresholdMetric::new(
                "Dividend Yield",
                MetricUnit::Percent,
                false,
                &[(7.0, 20.0), (5.0, 15.0), (3.0, 10.0), (1.0, 5.0)],
            ),
            pe: ThresholdMetric::new(
                "PE Ratio",
                MetricUnit::Multiple,
                true,
                &[(9.0, 30.0), (15.0, 20.0), (24.0, 10.0), (f64::INFINITY, 0.0)],
            ),
            margin: ThresholdMetric::new(
                "Net Profit Margin",
                MetricUnit::Percent,
                false,
                &[(16.0, 20.0), (11.0, 15.0), (6.0, 10.0), (1.0, 0.0)],
            ),
            roe: ThresholdMetric::new(
                "ROE",
                MetricUnit::Percent,
                false,
                &[(16.0, 20.0), (11.0, 15.0), (6.0, 10.0), (1.0, 0.0)],
            ),
            cashflow: CategoricalMetric {
                label: "Cash Flow Status".to_string(),
                unit: MetricUnit::Points,
                scores: BTreeMap::from([
                    (CashFlowOption::ProfitInflow, 40.0),
                    (CashFlowOption::ProfitOutflow, 30.0),
                    (CashFlowOption::LossInflow, 20.0),
                    (CashFlowOption::LossOutflow, 1.0),
                ]),
            },
        }
    }
}

impl ScoringSettings {
    /// Default config for a single metric
    pub fn default_for(id: MetricId) -> MetricConfig {
        Self::default().get(id)
    }

    pub fn get(&self, id: MetricId) -> MetricConfig {
        match self.threshold(id) {
            Some(m) => MetricConfig::Threshold(m.clone()),
            None => MetricConfig::Categorical(self.cashflow.clone()),
        }
    }

    /// Threshold config for the five ratio metrics, `None` for cash flow
    pub fn threshold(&self, id: MetricId) -> Option<&ThresholdMetric> {
        match id {
            MetricId::Cagr => Some(&self.cagr),
            MetricId::Dy => Some(&self.dy),
            MetricId::Pe => Some(&self.pe),
            MetricId::Margin => Some(&self.margin),
            MetricId::Roe => Some(&self.roe),
            MetricId::Cashflow => None,
        }
    }

    fn threshold_mut(&mut self, id: MetricId) -> Option<&mut ThresholdMetric> {
        match id {
            MetricId::Cagr => Some(&mut self.cagr),
            MetricId::Dy => Some(&mut self.dy),
            MetricId::Pe => Some(&mut self.pe),
            MetricId::Margin => Some(&mut self.margin),
            MetricId::Roe => Some(&mut self.roe),
            MetricId::Cashflow => None,
        }
    }

    /// Replace one metric's config wholesale. The variant must fit the metric.
    pub fn replace(&mut self, id: MetricId, config: MetricConfig) -> Result<(), AnalyzerError> {
        check_shape(id, &config)?;
        match config {
            MetricConfig::Categorical(m) => self.cashflow = m,
            MetricConfig::Threshold(m) => {
                if let Some(slot) = self.threshold_mut(id) {
                    *slot = m;
                }
            }
        }
        Ok(())
    }

    /// Assemble settings from per-metric entries, as a keyed store holds them
    pub fn from_entries<I>(entries: I) -> Result<Self, AnalyzerError>
    where
        I: IntoIterator<Item = (MetricId, MetricConfig)>,
    {
        let entries: BTreeMap<MetricId, MetricConfig> = entries.into_iter().collect();
        if let Some(missing) = MetricId::ALL.into_iter().find(|id| !entries.contains_key(id)) {
            return Err(AnalyzerError::MissingMetric(missing));
        }

        let mut settings = Self::default();
        for (id, config) in entries {
            settings.replace(id, config)?;
        }
        Ok(settings)
    }

    pub fn entries(&self) -> Vec<(MetricId, MetricConfig)> {
        MetricId::ALL.into_iter().map(|id| (id, self.get(id))).collect()
    }

    pub fn max_score(&self, id: MetricId) -> f64 {
        match self.threshold(id) {
            Some(m) => m.max_score(),
            None => self.cashflow.max_score(),
        }
    }

    pub fn gdp_max(&self) -> f64 {
        MetricId::ALL
            .into_iter()
            .filter(MetricId::is_gdp)
            .map(|id| self.max_score(id))
            .sum()
    }

    pub fn prc_max(&self) -> f64 {
        MetricId::ALL
            .into_iter()
            .filter(|id| !id.is_gdp())
            .map(|id| self.max_score(id))
            .sum()
    }

    pub fn validate(&self) -> Vec<TierWarning> {
        MetricId::ALL
            .into_iter()
            .filter_map(|id| self.threshold(id).map(|m| validate_metric(id, m)))
            .flatten()
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, AnalyzerError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub fn check_shape(id: MetricId, config: &MetricConfig) -> Result<(), AnalyzerError> {
    let fits = match config {
        MetricConfig::Categorical(_) => id.is_categorical(),
        MetricConfig::Threshold(_) => !id.is_categorical(),
    };
    if fits {
        Ok(())
    } else {
        let expected = if id.is_categorical() { "categorical" } else { "threshold" };
        tracing::debug!("Rejected {} config for {}", config.kind(), id);
        Err(AnalyzerError::ShapeMismatch { metric: id, expected })
    }
}

/// A rubric problem worth surfacing in an editor. Never blocks a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierWarning {
    pub metric: MetricId,
    pub tier_index: Option<usize>,
    pub message: String,
}

/// Check that tiers are ordered the way the first-match scan needs them.
pub fn validate_metric(id: MetricId, metric: &ThresholdMetric) -> Vec<TierWarning> {
    let mut warnings = Vec::new();

    if metric.tiers.is_empty() {
        warnings.push(TierWarning {
            metric: id,
            tier_index: None,
            message: "no tiers configured; every value scores 0".to_string(),
        });
        return warnings;
    }

    for (i, tier) in metric.tiers.iter().enumerate() {
        if tier.threshold.is_nan() || tier.score.is_nan() {
            warnings.push(TierWarning {
                metric: id,
                tier_index: Some(i),
                message: "threshold and score must be numbers".to_string(),
            });
        }
    }

    for (i, pair) in metric.tiers.windows(2).enumerate() {
        let (prev, next) = (pair[0].threshold, pair[1].threshold);
        let ordered = if metric.is_inverse { next > prev } else { next < prev };
        if !ordered && !prev.is_nan() && !next.is_nan() {
            let direction = if metric.is_inverse { "ascend" } else { "descend" };
            warnings.push(TierWarning {
                metric: id,
                tier_index: Some(i + 1),
                message: format!(
                    "threshold {} does not {} from {}; this tier can never match first",
                    next, direction, prev
                ),
            });
        }
    }

    warnings
}
