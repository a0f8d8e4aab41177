//! HTTP client for the question-answering service.

use crate::{NarrativeError, NarrativeResult};
use dq_engine::{ColumnKpi, KpiSummary};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Endpoint path appended to the base URL.
pub const ANSWER_QUESTION_PATH: &str = "/answerQuestion";

/// Number of column KPI rows embedded in the question.
pub const MAX_KPI_ROWS: usize = 20;

/// Connection settings for the narrative service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeConfig {
    /// Base URL of the service; `None` disables narratives
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NarrativeConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Sets basic auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint URL, or `None` when no base URL is set.
    pub fn endpoint(&self) -> Option<String> {
        let base = self.base_url.as_deref()?.trim().trim_end_matches('/');
        (!base.is_empty()).then(|| format!("{}{}", base, ANSWER_QUESTION_PATH))
    }

    /// Returns the credentials when both username and password are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    question: &'a str,
    plot: bool,
    markdown_response: bool,
    verbose: bool,
}

/// Client generating narratives from KPIs.
#[derive(Debug, Clone)]
pub struct NarrativeClient {
    config: NarrativeConfig,
    client: Client,
}

impl NarrativeClient {
    /// Creates a client from its configuration.
    pub fn from_config(config: NarrativeConfig) -> NarrativeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                NarrativeError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Returns true if a service endpoint is configured.
    pub fn is_enabled(&self) -> bool {
        self.config.endpoint().is_some()
    }

    /// Sends a question and returns the answer text.
    ///
    /// Returns `Ok(None)` without any I/O when no endpoint is configured, and
    /// when the response carries no usable answer.
    pub async fn answer_question(&self, question: &str) -> NarrativeResult<Option<String>> {
        let Some(url) = self.config.endpoint() else {
            return Ok(None);
        };

        let payload = AnswerRequest {
            question,
            plot: false,
            markdown_response: true,
            verbose: false,
        };

        debug!("Posting question to {}", url);
        let mut request = self.client.post(&url).json(&payload);
        if let Some((username, password)) = self.config.credentials() {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeError::Http {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        Ok(extract_answer(&body))
    }

    /// Generates a markdown narrative for the given KPIs.
    ///
    /// Never fails: any error is logged and yields `None`.
    pub async fn generate(&self, summary: &KpiSummary, column_kpis: &[ColumnKpi]) -> Option<String> {
        if !self.is_enabled() {
            debug!("Narrative service not configured, skipping");
            return None;
        }

        let question = match build_question(summary, column_kpis) {
            Ok(question) => question,
            Err(e) => {
                warn!("Failed to build narrative question: {}", e);
                return None;
            }
        };

        match self.answer_question(&question).await {
            Ok(Some(answer)) => {
                info!("Received narrative ({} chars)", answer.len());
                Some(answer)
            }
            Ok(None) => {
                warn!("Narrative service returned no answer");
                None
            }
            Err(e) => {
                warn!("Narrative service call failed: {}", e);
                None
            }
        }
    }
}

/// Builds the question sent to the service.
///
/// Embeds the KPI summary and the first [`MAX_KPI_ROWS`] column KPI rows as
/// JSON.
pub fn build_question(
    summary: &KpiSummary,
    column_kpis: &[ColumnKpi],
) -> Result<String, serde_json::Error> {
    let head = &column_kpis[..column_kpis.len().min(MAX_KPI_ROWS)];
    Ok(format!(
        "You are a data quality analyst. I will give you high-level KPI metrics \
         (before/after completeness, total violations) and a column-level table \
         of null % and violation counts. Write a short markdown summary for an \
         executive dashboard, focusing on improvements and remaining issues.\n\n\
         KPI summary: {}\n\n\
         Column KPIs (first rows): {}",
        serde_json::to_string(summary)?,
        serde_json::to_string(head)?
    ))
}

/// Reads the answer text from a response body.
///
/// Prefers `answer`, falls back to `response`; empty strings count as absent.
pub fn extract_answer(body: &Value) -> Option<String> {
    ["answer", "response"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kpi(name: &str) -> ColumnKpi {
        ColumnKpi {
            column_name: name.to_string(),
            null_count_before: 1,
            null_count_after: 0,
            null_percent_before: 50.0,
            null_percent_after: 0.0,
            violation_count: 1,
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(NarrativeConfig::default().endpoint(), None);
        assert_eq!(NarrativeConfig::new("  ").endpoint(), None);
        assert_eq!(
            NarrativeConfig::new("http://sdk:8008/").endpoint(),
            Some("http://sdk:8008/answerQuestion".to_string())
        );
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let config = NarrativeConfig::new("http://sdk").with_credentials("user", "");
        assert_eq!(config.credentials(), None);

        let config = NarrativeConfig::new("http://sdk").with_credentials("user", "pass");
        assert_eq!(config.credentials(), Some(("user", "pass")));
    }

    #[test]
    fn test_extract_answer() {
        assert_eq!(
            extract_answer(&json!({"answer": "A", "response": "R"})),
            Some("A".to_string())
        );
        assert_eq!(
            extract_answer(&json!({"answer": "", "response": "R"})),
            Some("R".to_string())
        );
        assert_eq!(extract_answer(&json!({"other": "x"})), None);
        assert_eq!(extract_answer(&json!({"answer": 3})), None);
    }

    #[test]
    fn test_question_embeds_first_rows() {
        let summary = KpiSummary {
            overall_completeness_before: 0.5,
            overall_completeness_after: 1.0,
            total_violations: 2,
        };
        let kpis: Vec<ColumnKpi> = (0..25).map(|i| kpi(&format!("col_{}", i))).collect();

        let question = build_question(&summary, &kpis).unwrap();

        assert!(question.contains("\"total_violations\":2"));
        assert!(question.contains("col_19"));
        assert!(!question.contains("col_20"));
    }
}
