//! Stand-alone calculators for the toolbox page.
//!
//! Unlike the bare ratio functions these guard their inputs: when the inputs
//! cannot produce a meaningful ratio the value is `None` and the score is 0.

use analyzer_core::{ScoredValue, ScoringSettings};
use serde::{Deserialize, Serialize};

use crate::ratios::{
    calculate_cagr, calculate_dividend_yield, calculate_pe_discount, calculate_pe_ratio,
    calculate_peg, calculate_profit_margin, calculate_ps_ratio, calculate_roe, UNDERVALUED_PE_DISCOUNT,
    ZULU_MAX_PEG,
};
use crate::shorthand::parse_shorthand;
use crate::tiers::get_score;

/// Ratio plus the points it earns under the rubric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub value: Option<f64>,
    pub score: f64,
}

impl CalculatorResult {
    fn empty() -> Self {
        Self { value: None, score: 0.0 }
    }

    /// Value and score for a calculator log, when there is a value
    pub fn scored(&self) -> Option<ScoredValue> {
        self.value.map(|value| ScoredValue { value, score: self.score })
    }
}

/// Ratio plus a pass/fail check instead of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub value: Option<f64>,
    pub passed: bool,
}

impl CheckResult {
    fn empty() -> Self {
        Self { value: None, passed: false }
    }
}

/// `false` for NaN as well as for zero and negatives
fn positive(x: f64) -> bool {
    x > 0.0
}

/// CAGR from shorthand start/end values
pub fn cagr_calculator(start: &str, end: &str, years: f64, settings: &ScoringSettings) -> CalculatorResult {
    let start = parse_shorthand(start);
    let end = parse_shorthand(end);
    if start.is_nan() || end.is_nan() || start == 0.0 || years <= 0.0 {
        return CalculatorResult::empty();
    }

    let cagr = calculate_cagr(end, start, years);
    CalculatorResult {
        value: Some(cagr),
        score: get_score(cagr, &settings.cagr),
    }
}

pub fn dividend_yield_calculator(price: f64, dividend: f64, settings: &ScoringSettings) -> CalculatorResult {
    if !positive(price) || dividend.is_nan() {
        return CalculatorResult::empty();
    }

    let dy = calculate_dividend_yield(price, dividend);
    CalculatorResult {
        value: Some(dy),
        score: get_score(dy, &settings.dy),
    }
}

pub fn pe_calculator(price: f64, eps: f64, settings: &ScoringSettings) -> CalculatorResult {
    if !(positive(price) && positive(eps)) {
        return CalculatorResult::empty();
    }

    let pe = calculate_pe_ratio(price, eps);
    CalculatorResult {
        value: Some(pe),
        score: get_score(pe, &settings.pe),
    }
}

/// Net profit margin from shorthand net income / revenue
pub fn margin_calculator(net_income: &str, revenue: &str, settings: &ScoringSettings) -> CalculatorResult {
    let income = parse_shorthand(net_income);
    let revenue = parse_shorthand(revenue);
    if income.is_nan() || revenue.is_nan() || revenue <= 0.0 {
        return CalculatorResult::empty();
    }

    let margin = calculate_profit_margin(income, revenue);
    CalculatorResult {
        value: Some(margin),
        score: get_score(margin, &settings.margin),
    }
}

/// ROE from shorthand net income / shareholders' equity
pub fn roe_calculator(net_income: &str, equity: &str, settings: &ScoringSettings) -> CalculatorResult {
    let income = parse_shorthand(net_income);
    let equity = parse_shorthand(equity);
    if income.is_nan() || equity.is_nan() || equity <= 0.0 {
        return CalculatorResult::empty();
    }

    let roe = calculate_roe(income, equity);
    CalculatorResult {
        value: Some(roe),
        score: get_score(roe, &settings.roe),
    }
}

/// PEG with the Zulu principle check
pub fn peg_calculator(pe_ratio: f64, cagr: f64) -> CheckResult {
    if !(positive(pe_ratio) && positive(cagr)) {
        return CheckResult::empty();
    }

    let peg = calculate_peg(pe_ratio, cagr);
    CheckResult {
        value: Some(peg),
        passed: peg <= ZULU_MAX_PEG,
    }
}

/// Discount to historical PE with the undervaluation check
pub fn pe_discount_calculator(current_pe: f64, avg_pe: f64) -> CheckResult {
    if !(positive(current_pe) && positive(avg_pe)) {
        return CheckResult::empty();
    }

    let discount = calculate_pe_discount(current_pe, avg_pe);
    CheckResult {
        value: Some(discount),
        passed: discount >= UNDERVALUED_PE_DISCOUNT,
    }
}

/// Price-to-sales. Not scored; only meaningful next to the margin check.
pub fn ps_calculator(market_cap_or_price: f64, total_sales: f64) -> Option<f64> {
    if !(positive(market_cap_or_price) && positive(total_sales)) {
        return None;
    }
    Some(calculate_ps_ratio(market_cap_or_price, total_sales))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr_calculator_reads_shorthand() {
        let settings = ScoringSettings::default();
        let result = cagr_calculator("100k", "150k", 1.0, &settings);
        assert_relative_eq!(result.value.unwrap(), 50.0, epsilon = 1e-9);
        assert_eq!(result.score, 50.0);

        let result = cagr_calculator("1M", "1.2M", 3.0, &settings);
        // ~6.27% a year
        assert_eq!(result.score, 30.0);
    }

    #[test]
    fn test_cagr_calculator_guards() {
        let settings = ScoringSettings::default();
        assert_eq!(cagr_calculator("", "150k", 5.0, &settings), CalculatorResult::empty());
        assert_eq!(cagr_calculator("0", "150k", 5.0, &settings).value, None);
        assert_eq!(cagr_calculator("100", "150", 0.0, &settings).value, None);
    }

    #[test]
    fn test_dividend_and_pe_calculators() {
        let settings = ScoringSettings::default();
        let dy = dividend_yield_calculator(50.0, 3.0, &settings);
        assert_relative_eq!(dy.value.unwrap(), 6.0, epsilon = 1e-9);
        assert_eq!(dy.score, 15.0);
        assert_eq!(dividend_yield_calculator(0.0, 3.0, &settings).value, None);

        let pe = pe_calculator(80.0, 10.0, &settings);
        assert_eq!(pe.value, Some(8.0));
        assert_eq!(pe.score, 30.0);
        assert_eq!(pe_calculator(80.0, -1.0, &settings), CalculatorResult::empty());
    }

    #[test]
    fn test_margin_and_roe_calculators() {
        let settings = ScoringSettings::default();
        let margin = margin_calculator("18m", "100M", &settings);
        assert_relative_eq!(margin.value.unwrap(), 18.0, epsilon = 1e-9);
        assert_eq!(margin.score, 20.0);
        assert_eq!(margin_calculator("18m", "0", &settings).value, None);

        let roe = roe_calculator("-2m", "10m", &settings);
        assert_relative_eq!(roe.value.unwrap(), -20.0, epsilon = 1e-9);
        assert_eq!(roe.score, 0.0);
        assert_eq!(roe_calculator("abc", "10m", &settings).value, None);
    }

    #[test]
    fn test_check_calculators() {
        let peg = peg_calculator(10.0, 20.0);
        assert_eq!(peg.value, Some(0.5));
        assert!(peg.passed);
        assert_eq!(peg_calculator(10.0, 0.0), CheckResult::empty());

        let discount = pe_discount_calculator(15.0, 20.0);
        assert!(discount.passed);
        assert!(!pe_discount_calculator(19.0, 20.0).passed);
        assert_eq!(pe_discount_calculator(0.0, 20.0).value, None);
    }

    #[test]
    fn test_ps_calculator() {
        assert_eq!(ps_calculator(1_000_000.0, 500_000.0), Some(2.0));
        assert_eq!(ps_calculator(1_000_000.0, 0.0), None);
    }

    #[test]
    fn test_scored_conversion() {
        let settings = ScoringSettings::default();
        let scored = pe_calculator(80.0, 10.0, &settings).scored().unwrap();
        assert_eq!(scored.score, 30.0);
        assert!(CalculatorResult::empty().scored().is_none());
    }
}
