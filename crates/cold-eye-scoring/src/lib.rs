//! Cold Eye scoring engine
//!
//! Turns raw financial ratios into GDP (growth, dividend, PE) and PRC
//! (profit margin, ROE, cash flow) points under a configurable rubric, then
//! classifies the pair of subtotals into a verdict. Every function here is
//! total: absent or degenerate input comes back as a sentinel (`NaN`, `0`,
//! `+inf`) instead of an error.

pub mod aggregate;
pub mod cashflow;
pub mod engine;
pub mod ratios;
pub mod shorthand;
pub mod tiers;
pub mod toolbox;
pub mod verdict;

pub use aggregate::aggregate;
pub use cashflow::cash_flow_score;
pub use engine::{Evaluation, ScoringEngine};
pub use ratios::*;
pub use shorthand::parse_shorthand;
pub use tiers::get_score;
pub use verdict::{classify_verdict, PASS_THRESHOLD};
