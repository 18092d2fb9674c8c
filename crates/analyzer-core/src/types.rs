use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AnalyzerError;

/// Identifies which rubric entry governs a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricId {
    Cagr,
    Dy,
    Pe,
    Margin,
    Roe,
    Cashflow,
}

impl MetricId {
    pub const ALL: [MetricId; 6] = [
        MetricId::Cagr,
        MetricId::Dy,
        MetricId::Pe,
        MetricId::Margin,
        MetricId::Roe,
        MetricId::Cashflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::Cagr => "cagr",
            MetricId::Dy => "dy",
            MetricId::Pe => "pe",
            MetricId::Margin => "margin",
            MetricId::Roe => "roe",
            MetricId::Cashflow => "cashflow",
        }
    }

    /// Whether the metric feeds the GDP (wealth creation) half of the score
    pub fn is_gdp(&self) -> bool {
        matches!(self, MetricId::Cagr | MetricId::Dy | MetricId::Pe)
    }

    /// Only cash flow is scored by category instead of by threshold
    pub fn is_categorical(&self) -> bool {
        matches!(self, MetricId::Cashflow)
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| AnalyzerError::UnknownMetric(s.to_string()))
    }
}

/// Display unit of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "x")]
    Multiple,
    #[serde(rename = "pts")]
    Points,
}

impl MetricUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricUnit::Percent => "%",
            MetricUnit::Multiple => "x",
            MetricUnit::Points => "pts",
        }
    }
}

/// Profitability crossed with net cash flow direction, picked by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowOption {
    ProfitInflow,
    ProfitOutflow,
    LossInflow,
    LossOutflow,
}

impl CashFlowOption {
    pub const ALL: [CashFlowOption; 4] = [
        CashFlowOption::ProfitInflow,
        CashFlowOption::ProfitOutflow,
        CashFlowOption::LossInflow,
        CashFlowOption::LossOutflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowOption::ProfitInflow => "profit_inflow",
            CashFlowOption::ProfitOutflow => "profit_outflow",
            CashFlowOption::LossInflow => "loss_inflow",
            CashFlowOption::LossOutflow => "loss_outflow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CashFlowOption::ProfitInflow => "Profit + Net Inflow",
            CashFlowOption::ProfitOutflow => "Profit + Net Outflow",
            CashFlowOption::LossInflow => "Loss + Net Inflow",
            CashFlowOption::LossOutflow => "Loss + Net Outflow",
        }
    }
}

impl fmt::Display for CashFlowOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashFlowOption {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CashFlowOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| AnalyzerError::InvalidConfig(format!("unknown cash flow option: {s}")))
    }
}

/// Overall verdict derived from the GDP and PRC halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Neutral,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Neutral => "NEUTRAL",
            Verdict::Fail => "FAIL",
        }
    }

    /// Human-readable action for the verdict
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "Invest",
            Verdict::Neutral => "Watch",
            Verdict::Fail => "Reject",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge level of a score relative to its metric's maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    High,
    Medium,
    Low,
}

impl ScoreLevel {
    pub fn from_ratio(score: f64, max_score: f64) -> Self {
        if max_score <= 0.0 || max_score.is_nan() {
            return ScoreLevel::Low;
        }
        match score / max_score {
            r if r >= 0.7 => ScoreLevel::High,
            r if r >= 0.4 => ScoreLevel::Medium,
            _ => ScoreLevel::Low,
        }
    }
}
