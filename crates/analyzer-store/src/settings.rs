use analyzer_core::{
    check_shape, validate_metric, AnalyzerError, CashFlowOption, MetricConfig, MetricId, ScoringSettings,
    SettingsStore, TierWarning,
};
use async_trait::async_trait;
use dashmap::DashMap;

/// Rubric held per metric id, the way a keyed settings collection stores it
pub struct InMemorySettingsStore {
    entries: DashMap<MetricId, MetricConfig>,
}

impl InMemorySettingsStore {
    /// Empty store; defaults are seeded on first `list`
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn with_settings(settings: ScoringSettings) -> Self {
        let entries = DashMap::new();
        for (id, config) in settings.entries() {
            entries.insert(id, config);
        }
        Self { entries }
    }

    fn seed_missing(&self) {
        for id in MetricId::ALL {
            if !self.entries.contains_key(&id) {
                tracing::info!("Seeding default rubric for {}", id);
                self.entries.insert(id, ScoringSettings::default_for(id));
            }
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn list(&self) -> Result<ScoringSettings, AnalyzerError> {
        self.seed_missing();
        let snapshot: Vec<(MetricId, MetricConfig)> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        ScoringSettings::from_entries(snapshot)
    }

    async fn update(
        &self,
        entries: Vec<(MetricId, MetricConfig)>,
    ) -> Result<Vec<TierWarning>, AnalyzerError> {
        // reject the whole batch before anything is written
        for (id, config) in &entries {
            check_shape(*id, config)?;
        }

        let mut warnings = Vec::new();
        for (id, config) in entries {
            if !self.entries.contains_key(&id) {
                tracing::warn!("Skipping update for {}: not in store", id);
                continue;
            }
            if let MetricConfig::Threshold(metric) = &config {
                for warning in validate_metric(id, metric) {
                    tracing::warn!("Rubric for {}: {}", id, warning.message);
                    warnings.push(warning);
                }
            }
            self.entries.insert(id, config);
            tracing::info!("Updated rubric for {}", id);
        }
        Ok(warnings)
    }

    async fn update_cash_flow_score(
        &self,
        option: CashFlowOption,
        score: f64,
    ) -> Result<(), AnalyzerError> {
        let mut entry = self
            .entries
            .entry(MetricId::Cashflow)
            .or_insert_with(|| ScoringSettings::default_for(MetricId::Cashflow));

        match entry.value_mut() {
            MetricConfig::Categorical(metric) => {
                metric.scores.insert(option, score);
                tracing::info!("Cash flow score for {} set to {}", option, score);
                Ok(())
            }
            MetricConfig::Threshold(_) => Err(AnalyzerError::ShapeMismatch {
                metric: MetricId::Cashflow,
                expected: "categorical",
            }),
        }
    }

    async fn reset(&self) -> Result<(), AnalyzerError> {
        let defaults = ScoringSettings::default();
        for mut entry in self.entries.iter_mut() {
            let id = *entry.key();
            *entry.value_mut() = defaults.get(id);
        }
        tracing::info!("Rubric reset to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::{MetricUnit, ThresholdMetric};

    #[tokio::test]
    async fn test_list_seeds_defaults() {
        let store = InMemorySettingsStore::new();
        let settings = store.list().await.unwrap();
        assert_eq!(settings, ScoringSettings::default());
        assert_eq!(store.entries.len(), MetricId::ALL.len());
    }

    #[tokio::test]
    async fn test_list_seeds_only_missing_metrics() {
        let store = InMemorySettingsStore::new();
        let roe = ThresholdMetric::new("ROE", MetricUnit::Percent, false, &[(20.0, 25.0)]);
        store
            .entries
            .insert(MetricId::Roe, MetricConfig::Threshold(roe.clone()));

        let settings = store.list().await.unwrap();
        assert_eq!(settings.roe, roe);
        assert_eq!(settings.cagr, ScoringSettings::default().cagr);
    }

    #[tokio::test]
    async fn test_update_replaces_and_reports_warnings() {
        let store = InMemorySettingsStore::with_settings(ScoringSettings::default());
        let misordered = ThresholdMetric::new(
            "CAGR",
            MetricUnit::Percent,
            false,
            &[(5.0, 20.0), (10.0, 40.0)],
        );

        let warnings = store
            .update(vec![(MetricId::Cagr, MetricConfig::Threshold(misordered.clone()))])
            .await
            .unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].metric, MetricId::Cagr);
        assert_eq!(store.list().await.unwrap().cagr, misordered);
    }

    #[tokio::test]
    async fn test_update_rejects_shape_mismatch_atomically() {
        let store = InMemorySettingsStore::with_settings(ScoringSettings::default());
        let defaults = ScoringSettings::default();
        let dy = ThresholdMetric::new("DY", MetricUnit::Percent, false, &[(2.0, 99.0)]);

        let err = store
            .update(vec![
                (MetricId::Dy, MetricConfig::Threshold(dy)),
                (MetricId::Cashflow, MetricConfig::Threshold(defaults.cagr.clone())),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::ShapeMismatch { .. }));
        assert_eq!(store.list().await.unwrap().dy, defaults.dy);
    }

    #[tokio::test]
    async fn test_update_skips_metrics_not_in_store() {
        let store = InMemorySettingsStore::new();
        let pe = ThresholdMetric::new("PE", MetricUnit::Multiple, true, &[(10.0, 30.0)]);
        let warnings = store
            .update(vec![(MetricId::Pe, MetricConfig::Threshold(pe))])
            .await
            .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(store.list().await.unwrap().pe, ScoringSettings::default().pe);
    }

    #[tokio::test]
    async fn test_cash_flow_score_and_reset() {
        let store = InMemorySettingsStore::with_settings(ScoringSettings::default());
        store
            .update_cash_flow_score(CashFlowOption::LossOutflow, 0.0)
            .await
            .unwrap();
        let settings = store.list().await.unwrap();
        assert_eq!(settings.cashflow.scores[&CashFlowOption::LossOutflow], 0.0);
        assert_eq!(settings.cashflow.scores[&CashFlowOption::ProfitInflow], 40.0);

        store.reset().await.unwrap();
        assert_eq!(store.list().await.unwrap(), ScoringSettings::default());
    }

    #[tokio::test]
    async fn test_store_feeds_the_engine() {
        use cold_eye_scoring::ScoringEngine;
        use analyzer_core::{RatioInputs, Verdict};

        let store = InMemorySettingsStore::new();
        store
            .update_cash_flow_score(CashFlowOption::ProfitInflow, 10.0)
            .await
            .unwrap();

        let engine = ScoringEngine::new(store.list().await.unwrap());
        let inputs = RatioInputs {
            cagr: 18.0,
            dividend_yield: 6.0,
            pe_ratio: 8.0,
            profit_margin: 18.0,
            roe: 17.0,
            avg_pe: f64::NAN,
        };
        let eval = engine.evaluate(&inputs, Some(CashFlowOption::ProfitInflow));
        assert_eq!(eval.breakdown.prc_score, 50.0);
        assert_eq!(eval.verdict, Verdict::Pass);
    }
}
