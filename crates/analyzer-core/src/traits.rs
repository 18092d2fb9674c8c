use async_trait::async_trait;
use uuid::Uuid;

use crate::{AnalyzerError, CalculatorLog, CashFlowOption, MetricConfig, MetricId, ScoringSettings, StockLog, TierWarning};

/// Persists the scoring rubric keyed by metric id
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Full rubric, seeding any metric the store does not hold yet
    async fn list(&self) -> Result<ScoringSettings, AnalyzerError>;

    /// Replace the named metrics wholesale. Returns rubric warnings for the editor.
    async fn update(
        &self,
        entries: Vec<(MetricId, MetricConfig)>,
    ) -> Result<Vec<TierWarning>, AnalyzerError>;

    async fn update_cash_flow_score(
        &self,
        option: CashFlowOption,
        score: f64,
    ) -> Result<(), AnalyzerError>;

    async fn reset(&self) -> Result<(), AnalyzerError>;
}

/// Append-only history of analyses and calculator snapshots
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn add_log(&self, log: StockLog) -> Result<(), AnalyzerError>;
    async fn delete_log(&self, id: Uuid) -> Result<(), AnalyzerError>;
    async fn clear_logs(&self) -> Result<(), AnalyzerError>;
    /// Newest first
    async fn logs(&self) -> Result<Vec<StockLog>, AnalyzerError>;

    async fn add_calculator_log(&self, log: CalculatorLog) -> Result<(), AnalyzerError>;
    async fn delete_calculator_log(&self, id: Uuid) -> Result<(), AnalyzerError>;
    async fn calculator_logs(&self) -> Result<Vec<CalculatorLog>, AnalyzerError>;
}
