use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{CashFlowOption, MetricId};

/// Raw ratio values entered for one company.
///
/// NaN marks an absent value and is written as `null`; infinite sentinels
/// such as the PE of a loss-making company are written as `"inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioInputs {
    /// Percent
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub cagr: f64,
    /// Percent
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub dividend_yield: f64,
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub pe_ratio: f64,
    /// Percent
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub profit_margin: f64,
    /// Percent
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub roe: f64,
    /// Historical average PE, only used for the undervaluation check
    #[serde(with = "crate::float_serde::nan_as_null")]
    pub avg_pe: f64,
}

impl Default for RatioInputs {
    /// Every field absent
    fn default() -> Self {
        Self {
            cagr: f64::NAN,
            dividend_yield: f64::NAN,
            pe_ratio: f64::NAN,
            profit_margin: f64::NAN,
            roe: f64::NAN,
            avg_pe: f64::NAN,
        }
    }
}

impl RatioInputs {
    /// No scored ratio has a value. `avg_pe` alone does not count.
    pub fn is_empty(&self) -> bool {
        [
            self.cagr,
            self.dividend_yield,
            self.pe_ratio,
            self.profit_margin,
            self.roe,
        ]
        .iter()
        .all(|v| v.is_nan())
    }
}

/// Per-metric scores with GDP / PRC subtotals.
///
/// `gdp_score = cagr + dy + pe`, `prc_score = margin + roe + cash_flow`,
/// `total_score = gdp + prc`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cagr_score: f64,
    pub dy_score: f64,
    pub pe_score: f64,
    pub margin_score: f64,
    pub roe_score: f64,
    pub cash_flow_score: f64,
    pub gdp_score: f64,
    pub prc_score: f64,
    pub total_score: f64,
    pub passed_zulu: bool,
    pub undervalued_pe: bool,
}

impl ScoreBreakdown {
    pub fn score_for(&self, id: MetricId) -> f64 {
        match id {
            MetricId::Cagr => self.cagr_score,
            MetricId::Dy => self.dy_score,
            MetricId::Pe => self.pe_score,
            MetricId::Margin => self.margin_score,
            MetricId::Roe => self.roe_score,
            MetricId::Cashflow => self.cash_flow_score,
        }
    }
}

/// Qualitative gate the user confirms before logging an analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitativeChecks {
    /// Stable needs -> revenue -> profit flow
    pub value_chain: bool,
    pub dividend_policy: bool,
    /// No accounting scandals
    pub management: bool,
    pub moat: bool,
}

impl QualitativeChecks {
    pub fn all_passed(&self) -> bool {
        self.value_chain && self.dividend_policy && self.management && self.moat
    }
}

/// Immutable record of a full GDP/PRC analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLog {
    pub id: Uuid,
    pub ticker: String,
    pub stock_exchange: Option<String>,
    pub company_name: Option<String>,
    pub date: DateTime<Utc>,
    pub inputs: RatioInputs,
    pub cash_flow_option: Option<CashFlowOption>,
    pub gdp_score: f64,
    pub prc_score: f64,
    pub total_score: f64,
    pub passed_zulu: bool,
    pub undervalued_pe: bool,
    pub qualitative_checks: QualitativeChecks,
}

impl StockLog {
    pub fn new(
        ticker: &str,
        stock_exchange: Option<&str>,
        company_name: Option<&str>,
        inputs: RatioInputs,
        cash_flow_option: Option<CashFlowOption>,
        breakdown: &ScoreBreakdown,
        qualitative_checks: QualitativeChecks,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticker: ticker.trim().to_uppercase(),
            stock_exchange: stock_exchange
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            company_name: company_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            date: Utc::now(),
            inputs,
            cash_flow_option,
            gdp_score: breakdown.gdp_score,
            prc_score: breakdown.prc_score,
            total_score: breakdown.total_score,
            passed_zulu: breakdown.passed_zulu,
            undervalued_pe: breakdown.undervalued_pe,
            qualitative_checks,
        }
    }
}

/// A ratio value together with the points it earned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredValue {
    pub value: f64,
    pub score: f64,
}

/// Snapshot of the stand-alone calculators for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorLog {
    pub id: Uuid,
    pub ticker: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub date: DateTime<Utc>,
    pub results: BTreeMap<MetricId, ScoredValue>,
    /// Sum of the scores present in `results`
    pub total_score: f64,
}

impl CalculatorLog {
    pub fn new(
        ticker: &str,
        name: Option<&str>,
        exchange: Option<&str>,
        results: BTreeMap<MetricId, ScoredValue>,
    ) -> Self {
        let total_score = results.values().map(|r| r.score).sum();
        Self {
            id: Uuid::new_v4(),
            ticker: ticker.trim().to_uppercase(),
            name: name.map(str::to_string),
            exchange: exchange.map(|s| s.to_uppercase()),
            date: Utc::now(),
            results,
            total_score,
        }
    }
}
