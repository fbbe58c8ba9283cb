//! Validation report formatting.

use super::{ValidationIssue, ValidationResult, ValidationSeverity};

/// Formats a validation result into a human-readable report.
pub fn format_report(result: &ValidationResult) -> String {
    let errors: Vec<_> = result.errors().collect();
    let warnings: Vec<_> = result.warnings().collect();

    if errors.is_empty() && warnings.is_empty() {
        return "Alert configuration is valid.\n".to_string();
    }

    let mut report = String::new();
    for issue in errors.iter().chain(warnings.iter()) {
        report.push_str(&format_issue(issue));
    }

    report.push_str(&format!(
        "---\n{} warning(s), {} error(s)\n",
        warnings.len(),
        errors.len()
    ));
    if !errors.is_empty() {
        report.push_str("Config rejected.\n");
    }

    report
}

/// Formats a single validation issue.
fn format_issue(issue: &ValidationIssue) -> String {
    let prefix = match issue.severity {
        ValidationSeverity::Error => "ERROR",
        ValidationSeverity::Warning => "WARNING",
    };

    let mut output = format!("{} {}\n  └─ {}\n", prefix, issue.path, issue.message);
    if let Some(suggestion) = &issue.suggestion {
        output.push_str(&format!("     {}\n", suggestion));
    }

    output
}
