use analyzer_core::ScoringSettings;
use anyhow::{Context, Result};
use cold_eye_scoring::DEFAULT_CAGR_YEARS;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON rubric to score against; the default rubric when unset
    pub settings_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Year span for the CAGR calculator when `--years` is not given
    pub cagr_years: f64,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        let settings_path = env::var("COLD_EYE_SETTINGS")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match env::var("LOG_FORMAT").unwrap_or_default().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let cagr_years: f64 = env::var("COLD_EYE_CAGR_YEARS")
            .unwrap_or_else(|_| DEFAULT_CAGR_YEARS.to_string())
            .parse()
            .context("COLD_EYE_CAGR_YEARS must be a number")?;
        if cagr_years <= 0.0 {
            anyhow::bail!("COLD_EYE_CAGR_YEARS must be positive, got {}", cagr_years);
        }

        Ok(Self {
            settings_path,
            log_format,
            cagr_years,
        })
    }

    pub fn load_settings(&self) -> Result<ScoringSettings> {
        let Some(path) = &self.settings_path else {
            tracing::debug!("No COLD_EYE_SETTINGS set, using default rubric");
            return Ok(ScoringSettings::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rubric from {}", path.display()))?;
        let settings = ScoringSettings::from_json(&raw)
            .with_context(|| format!("Invalid rubric in {}", path.display()))?;
        tracing::info!("Loaded rubric from {}", path.display());
        Ok(settings)
    }
}
