//! Ratio calculators.
//!
//! Non-positive denominators never error. Ratios where a missing denominator
//! means "no return" come back as `0.0`; ratios where it means "unattractive"
//! (PE, PEG, P/S) come back as `f64::INFINITY`.

/// Year span used when the caller does not give one
pub const DEFAULT_CAGR_YEARS: f64 = 5.0;

/// PEG at or below this passes the Zulu principle
pub const ZULU_MAX_PEG: f64 = 1.0;

/// Discount to historical PE, in percent, that counts as undervalued
pub const UNDERVALUED_PE_DISCOUNT: f64 = 25.0;

/// Compound annual growth rate in percent.
///
/// Both values positive uses `(end/start)^(1/years) - 1`. A loss on either
/// side has no compound rate, so the simple annualised change relative to
/// `|start|` is used instead.
pub fn calculate_cagr(end_value: f64, start_value: f64, years: f64) -> f64 {
    if start_value == 0.0 || years <= 0.0 {
        return 0.0;
    }

    if start_value > 0.0 && end_value > 0.0 {
        return ((end_value / start_value).powf(1.0 / years) - 1.0) * 100.0;
    }

    let growth = ((end_value - start_value) / start_value.abs()) * 100.0;
    growth / years
}

/// Annual dividend over price, in percent
pub fn calculate_dividend_yield(current_price: f64, annual_dividend: f64) -> f64 {
    if current_price <= 0.0 {
        return 0.0;
    }
    (annual_dividend / current_price) * 100.0
}

pub fn calculate_pe_ratio(current_price: f64, eps: f64) -> f64 {
    if eps <= 0.0 {
        return f64::INFINITY;
    }
    current_price / eps
}

/// Net income over revenue, in percent
pub fn calculate_profit_margin(net_income: f64, revenue: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    (net_income / revenue) * 100.0
}

/// Net income over shareholders' equity, in percent
pub fn calculate_roe(net_income: f64, shareholders_equity: f64) -> f64 {
    if shareholders_equity <= 0.0 {
        return 0.0;
    }
    (net_income / shareholders_equity) * 100.0
}

/// PE over CAGR (in percent points)
pub fn calculate_peg(pe_ratio: f64, cagr: f64) -> f64 {
    if cagr <= 0.0 {
        return f64::INFINITY;
    }
    pe_ratio / cagr
}

/// Percent below the historical average PE. Negative means above average.
pub fn calculate_pe_discount(current_pe: f64, avg_pe: f64) -> f64 {
    if avg_pe <= 0.0 {
        return 0.0;
    }
    (1.0 - current_pe / avg_pe) * 100.0
}

/// Market cap over total sales, or price over sales per share
pub fn calculate_ps_ratio(market_cap_or_price: f64, total_sales_or_per_share: f64) -> f64 {
    if total_sales_or_per_share <= 0.0 {
        return f64::INFINITY;
    }
    market_cap_or_price / total_sales_or_per_share
}

pub fn check_zulu_principle(pe_ratio: f64, cagr: f64) -> bool {
    let peg = calculate_peg(pe_ratio, cagr);
    peg <= ZULU_MAX_PEG && peg.is_finite()
}

pub fn check_undervalued_pe(current_pe: f64, avg_pe: f64) -> bool {
    calculate_pe_discount(current_pe, avg_pe) >= UNDERVALUED_PE_DISCOUNT
}
