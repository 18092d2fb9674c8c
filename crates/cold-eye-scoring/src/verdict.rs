use analyzer_core::Verdict;

/// Each half of the score must reach this to pass
pub const PASS_THRESHOLD: f64 = 50.0;

/// Classify a pair of GDP / PRC subtotals.
///
/// Both halves at or above [`PASS_THRESHOLD`] is a pass, one is neutral, none
/// is a fail. A score that has not been computed (missing or `NaN`) is
/// neutral, so an empty form never reads as a verdict either way.
pub fn classify_verdict(gdp_score: Option<f64>, prc_score: Option<f64>) -> Verdict {
    let (gdp, prc) = match (gdp_score, prc_score) {
        (Some(gdp), Some(prc)) if !gdp.is_nan() && !prc.is_nan() => (gdp, prc),
        _ => return Verdict::Neutral,
    };

    match (gdp >= PASS_THRESHOLD, prc >= PASS_THRESHOLD) {
        (true, true) => Verdict::Pass,
        (true, false) | (false, true) => Verdict::Neutral,
        (false, false) => Verdict::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_verdict(Some(50.0), Some(50.0)), Verdict::Pass);
        assert_eq!(classify_verdict(Some(50.0), Some(49.0)), Verdict::Neutral);
        assert_eq!(classify_verdict(Some(49.0), Some(50.0)), Verdict::Neutral);
        assert_eq!(classify_verdict(Some(49.0), Some(49.0)), Verdict::Fail);
    }

    #[test]
    fn test_missing_scores_are_neutral() {
        assert_eq!(classify_verdict(None, None), Verdict::Neutral);
        assert_eq!(classify_verdict(None, Some(80.0)), Verdict::Neutral);
        assert_eq!(classify_verdict(Some(0.0), None), Verdict::Neutral);
        assert_eq!(classify_verdict(Some(f64::NAN), Some(0.0)), Verdict::Neutral);
    }

    #[test]
    fn test_zero_scores_fail() {
        assert_eq!(classify_verdict(Some(0.0), Some(0.0)), Verdict::Fail);
    }
}
