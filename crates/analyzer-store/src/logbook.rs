use analyzer_core::{AnalyzerError, CalculatorLog, LogStore, StockLog};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Analysis history, newest entry first
#[derive(Default)]
pub struct InMemoryLogStore {
    logs: RwLock<Vec<StockLog>>,
    calculator_logs: RwLock<Vec<CalculatorLog>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn add_log(&self, log: StockLog) -> Result<(), AnalyzerError> {
        tracing::info!("Logged analysis {} for {} (total {})", log.id, log.ticker, log.total_score);
        self.logs.write().await.insert(0, log);
        Ok(())
    }

    async fn delete_log(&self, id: Uuid) -> Result<(), AnalyzerError> {
        let mut logs = self.logs.write().await;
        let before = logs.len();
        logs.retain(|log| log.id != id);
        if logs.len() == before {
            return Err(AnalyzerError::NotFound(format!("analysis log {id}")));
        }
        tracing::info!("Deleted analysis log {}", id);
        Ok(())
    }

    async fn clear_logs(&self) -> Result<(), AnalyzerError> {
        let mut logs = self.logs.write().await;
        tracing::info!("Clearing {} analysis logs", logs.len());
        logs.clear();
        Ok(())
    }

    async fn logs(&self) -> Result<Vec<StockLog>, AnalyzerError> {
        Ok(self.logs.read().await.clone())
    }

    async fn add_calculator_log(&self, log: CalculatorLog) -> Result<(), AnalyzerError> {
        tracing::info!("Logged calculator snapshot {} for {}", log.id, log.ticker);
        self.calculator_logs.write().await.insert(0, log);
        Ok(())
    }

    async fn delete_calculator_log(&self, id: Uuid) -> Result<(), AnalyzerError> {
        let mut logs = self.calculator_logs.write().await;
        let before = logs.len();
        logs.retain(|log| log.id != id);
        if logs.len() == before {
            return Err(AnalyzerError::NotFound(format!("calculator log {id}")));
        }
        Ok(())
    }

    async fn calculator_logs(&self) -> Result<Vec<CalculatorLog>, AnalyzerError> {
        Ok(self.calculator_logs.read().await.clone())
    }
}
