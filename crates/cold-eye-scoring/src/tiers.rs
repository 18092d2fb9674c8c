use analyzer_core::ThresholdMetric;

/// Points earned by `value` under a threshold rubric.
///
/// Tiers are scanned in the order they are declared and the first match wins;
/// nothing is sorted or validated here, so a misordered rubric scores wrongly
/// but never panics.
///
/// - Normal metrics match the first tier with `value >= threshold`, else 0.
/// - Inverse metrics match the first tier with `value <= threshold`, else the
///   last tier's score (0 with no tiers).
///
/// `NaN` never compares true and lands in the no-match branch.
pub fn get_score(value: f64, config: &ThresholdMetric) -> f64 {
    if config.is_inverse {
        config
            .tiers
            .iter()
            .find(|tier| value <= tier.threshold)
            .or_else(|| config.tiers.last())
            .map_or(0.0, |tier| tier.score)
    } else {
        config
            .tiers
            .iter()
            .find(|tier| value >= tier.threshold)
            .map_or(0.0, |tier| tier.score)
    }
}
