//! Configuration validation.

pub mod report;

use reqwest::Url;

use crate::config::model::AlertConfig;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Blocks configuration loading.
    Error,
    /// Logged but allows loading.
    Warning,
}

/// A validation issue found during configuration checking.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: ValidationSeverity,
    /// Path to the problematic config field (e.g., "mentions[1]").
    pub path: String,
    /// Description of the issue.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new error-level validation issue.
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Creates a new warning-level validation issue.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Result of validating a configuration.
#[derive(Debug, Default)]
pub struct ValidationResult {
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Creates an empty validation result.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the result.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns true if there are no errors (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == ValidationSeverity::Error)
    }

    /// Returns an iterator over error-level issues.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
    }

    /// Returns an iterator over warning-level issues.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
    }

    /// Returns the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Validates an alert configuration.
pub fn validate_config(config: &AlertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(url) = &config.webhook_url {
        validate_webhook_url(url, &mut result);
    }

    if let Some(logs_url) = &config.logs_url {
        if logs_url.trim().is_empty() {
            result.add(
                ValidationIssue::warning("logs_url", "Logs URL is empty")
                    .with_suggestion("Remove the key to send alerts without a default logs link"),
            );
        }
    }

    if config.timeout_seconds == Some(0) {
        result.add(
            ValidationIssue::error("timeout_seconds", "Timeout must be greater than zero")
                .with_suggestion("Remove the key to disable the timeout"),
        );
    }

    for (i, mention) in config.mentions.iter().enumerate() {
        let path = format!("mentions[{}]", i);
        if mention.trim().is_empty() {
            result.add(ValidationIssue::error(path, "Mention is empty"));
        } else if mention.starts_with('<') || mention.ends_with('>') {
            let bare = mention.trim_start_matches('<').trim_end_matches('>');
            result.add(
                ValidationIssue::error(path, format!("Mention '{}' is already wrapped", mention))
                    .with_suggestion(format!("Use '{}'", bare)),
            );
        }
    }

    if config.branding.color.trim().is_empty() {
        result.add(
            ValidationIssue::warning("branding.color", "Attachment color is empty")
                .with_suggestion("Use 'danger', 'warning', 'good' or a hex color"),
        );
    }

    result
}

/// Checks that a webhook URL is an absolute HTTP(S) URL with a host.
fn validate_webhook_url(url: &str, result: &mut ValidationResult) {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            result.add(
                ValidationIssue::error("webhook_url", format!("'{}' is not a valid URL: {}", url, e))
                    .with_suggestion("Use the incoming-webhook URL from the Slack app settings"),
            );
            return;
        }
    };

    match parsed.scheme() {
        "https" => {}
        "http" => result.add(
            ValidationIssue::warning("webhook_url", "Webhook URL is not using HTTPS")
                .with_suggestion("Slack webhooks are served over https://"),
        ),
        scheme => {
            result.add(ValidationIssue::error(
                "webhook_url",
                format!("Unsupported URL scheme '{}'", scheme),
            ));
            return;
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        result.add(ValidationIssue::error(
            "webhook_url",
            format!("'{}' has no host", url),
        ));
    }
}
