//! Grammar and style linting through an external checker

use crate::config::FeedbackConfig;
use crate::error::{Result, ScorerError};
use crate::processing::document::DocumentText;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    pub message: String,
    pub rule_id: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Rule: {})", self.message, self.rule_id)
    }
}

/// Advisory checker; callers treat failures as "no feedback available"
#[async_trait]
pub trait LintProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn lint(&self, text: &DocumentText) -> Result<Vec<LintIssue>>;
}

/// Client for a LanguageTool server's `/v2/check` endpoint
pub struct LanguageToolClient {
    client: Client,
    base_url: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    message: String,
    rule: CheckRule,
}

#[derive(Debug, Deserialize)]
struct CheckRule {
    id: String,
}

impl CheckResponse {
    fn into_issues(self) -> Vec<LintIssue> {
        self.matches
            .into_iter()
            .map(|m| LintIssue {
                message: m.message,
                rule_id: m.rule.id,
            })
            .collect()
    }
}

impl LanguageToolClient {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScorerError::ProviderFailure(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn from_config(config: &FeedbackConfig) -> Result<Self> {
        Self::new(
            &config.languagetool_url,
            &config.language,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn check_url(&self) -> String {
        format!("{}/v2/check", self.base_url)
    }
}

#[async_trait]
impl LintProvider for LanguageToolClient {
    fn name(&self) -> &str {
        "languagetool"
    }

    async fn lint(&self, text: &DocumentText) -> Result<Vec<LintIssue>> {
        let url = self.check_url();
        debug!("Requesting grammar check from {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[("text", text.as_str()), ("language", self.language.as_str())])
            .send()
            .await
            .map_err(|e| ScorerError::ProviderFailure(format!("LanguageTool request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScorerError::ProviderFailure(format!(
                "LanguageTool returned status {}",
                status.as_u16()
            )));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::ProviderFailure(format!("Invalid LanguageTool response: {}", e)))?;

        Ok(body.into_issues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_response_maps_to_issues() {
        let body = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [
                {"message": "Possible spelling mistake found.", "offset": 3, "length": 5,
                 "rule": {"id": "MORFOLOGIK_RULE_EN_US", "description": "Possible spelling mistake"}},
                {"message": "Use \"an\" instead of \"a\".", "offset": 20, "length": 1,
                 "rule": {"id": "EN_A_VS_AN"}}
            ]
        }"#;
        let response: CheckResponse = serde_json::from_str(body).unwrap();
        let issues = response.into_issues();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].rule_id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(
            issues[1].to_string(),
            "Use \"an\" instead of \"a\". (Rule: EN_A_VS_AN)"
        );
    }

    #[test]
    fn test_missing_matches_means_no_issues() {
        let response: CheckResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_issues().is_empty());
    }

    #[test]
    fn test_check_url_strips_trailing_slash() {
        let client =
            LanguageToolClient::new("http://localhost:8081/", "en-US", Duration::from_secs(1)).unwrap();
        assert_eq!(client.check_url(), "http://localhost:8081/v2/check");
    }
}
