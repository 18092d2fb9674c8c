use analyzer_core::{CashFlowOption, MetricConfig, MetricId, RatioInputs, ScoringSettings};
use anyhow::{bail, Context, Result};
use cold_eye_scoring::{parse_shorthand, toolbox, ScoringEngine};
use serde_json::{json, Value};

use crate::config::CliConfig;

pub const USAGE: &str = "\
Usage:
  cold-eye score [--ticker T] --cagr N --dy N --pe N --margin N --roe N [--avg-pe N] [--cashflow OPTION]
  cold-eye rubric
  cold-eye calc cagr --start V --end V [--years N]
  cold-eye calc dy --price N --dividend N
  cold-eye calc pe --price N --eps N
  cold-eye calc margin --net-income V --revenue V
  cold-eye calc roe --net-income V --equity V
  cold-eye calc peg --pe N --cagr N
  cold-eye calc pe-discount --current-pe N --avg-pe N
  cold-eye calc ps --market-cap V --sales V

Values accept shorthand (100k, 2.5M, 1B). OPTION is one of
profit_inflow, profit_outflow, loss_inflow, loss_outflow.";

/// Value following `--name`, if the flag is present
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Numeric flag; absent flags are NaN like any other unparseable input
fn number(args: &[String], name: &str) -> f64 {
    flag(args, name).map_or(f64::NAN, parse_shorthand)
}

pub fn run(args: &[String], config: &CliConfig) -> Result<Value> {
    match args.first().map(String::as_str) {
        Some("score") => score(&args[1..], config.load_settings()?),
        Some("rubric") => rubric(config.load_settings()?),
        Some("calc") => calc(&args[1..], config),
        _ => bail!("{}", USAGE),
    }
}

pub fn score(args: &[String], settings: ScoringSettings) -> Result<Value> {
    let inputs = RatioInputs {
        cagr: number(args, "--cagr"),
        dividend_yield: number(args, "--dy"),
        pe_ratio: number(args, "--pe"),
        profit_margin: number(args, "--margin"),
        roe: number(args, "--roe"),
        avg_pe: number(args, "--avg-pe"),
    };
    let cash_flow = flag(args, "--cashflow")
        .map(str::parse::<CashFlowOption>)
        .transpose()
        .context("Invalid --cashflow")?;

    let engine = ScoringEngine::new(settings);
    let eval = engine.evaluate(&inputs, cash_flow);

    let levels: serde_json::Map<String, Value> = MetricId::ALL
        .into_iter()
        .map(|id| {
            let level = engine.level_of(id, eval.breakdown.score_for(id));
            (id.to_string(), json!(level))
        })
        .collect();

    tracing::info!(
        "Scored {}: GDP {} / PRC {} -> {}",
        flag(args, "--ticker").unwrap_or("(unnamed)"),
        eval.breakdown.gdp_score,
        eval.breakdown.prc_score,
        eval.verdict
    );

    Ok(json!({
        "ticker": flag(args, "--ticker").map(str::to_uppercase),
        "inputs": inputs,
        "cash_flow": cash_flow,
        "breakdown": eval.breakdown,
        "verdict": eval.verdict,
        "verdict_label": eval.verdict.label(),
        "levels": levels,
        "gdp_max": engine.settings().gdp_max(),
        "prc_max": engine.settings().prc_max(),
    }))
}

pub fn rubric(settings: ScoringSettings) -> Result<Value> {
    let warnings = settings.validate();

    let metrics: Vec<Value> = settings
        .entries()
        .into_iter()
        .map(|(id, config)| {
            let unit = match &config {
                MetricConfig::Threshold(m) => m.unit,
                MetricConfig::Categorical(m) => m.unit,
            };
            json!({
                "id": id,
                "label": config.label(),
                "unit": unit.symbol(),
                "group": if id.is_gdp() { "GDP" } else { "PRC" },
                "max_score": config.max_score(),
            })
        })
        .collect();

    let cash_flow_options: Vec<Value> = CashFlowOption::ALL
        .into_iter()
        .map(|option| {
            json!({
                "option": option,
                "label": option.label(),
                "score": settings.cashflow.scores.get(&option),
            })
        })
        .collect();

    Ok(json!({
        "gdp_max": settings.gdp_max(),
        "prc_max": settings.prc_max(),
        "metrics": metrics,
        "cash_flow_options": cash_flow_options,
        "warnings": warnings,
        "settings": settings,
    }))
}

pub fn calc(args: &[String], config: &CliConfig) -> Result<Value> {
    let rest = args.get(1..).unwrap_or_default();
    let text = |name: &str| flag(rest, name).unwrap_or("");

    let result = match args.first().map(String::as_str) {
        Some("cagr") => {
            let settings = config.load_settings()?;
            let years = flag(rest, "--years").map_or(config.cagr_years, parse_shorthand);
            json!(toolbox::cagr_calculator(text("--start"), text("--end"), years, &settings))
        }
        Some("dy") => {
            let settings = config.load_settings()?;
            json!(toolbox::dividend_yield_calculator(
                number(rest, "--price"),
                number(rest, "--dividend"),
                &settings
            ))
        }
        Some("pe") => {
            let settings = config.load_settings()?;
            json!(toolbox::pe_calculator(number(rest, "--price"), number(rest, "--eps"), &settings))
        }
        Some("margin") => {
            let settings = config.load_settings()?;
            json!(toolbox::margin_calculator(text("--net-income"), text("--revenue"), &settings))
        }
        Some("roe") => {
            let settings = config.load_settings()?;
            json!(toolbox::roe_calculator(text("--net-income"), text("--equity"), &settings))
        }
        Some("peg") => json!(toolbox::peg_calculator(number(rest, "--pe"), number(rest, "--cagr"))),
        Some("pe-discount") => json!(toolbox::pe_discount_calculator(
            number(rest, "--current-pe"),
            number(rest, "--avg-pe")
        )),
        Some("ps") => json!({
            "value": toolbox::ps_calculator(number(rest, "--market-cap"), number(rest, "--sales"))
        }),
        Some(other) => bail!("Unknown calculator: {}\n\n{}", other, USAGE),
        None => bail!("{}", USAGE),
    };
    Ok(result)
}
