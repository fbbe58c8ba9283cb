//! Slack Alert - formats error alerts as Slack webhook messages and delivers them.
//!
//! The library builds a fixed-shape message (mention prefix, one attachment with
//! the error text and a "View Logs" button) and posts it to an incoming webhook,
//! succeeding only on HTTP 200.

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod validation;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

pub use crate::error::{AlertError, ConfigError};
pub use crate::notify::{
    build_error_message, send, send_error_alert, AlertDispatcher, Branding, Message,
};

use crate::cli::{AlertArgs, Cli, Commands, SendArgs};
use crate::config::AlertConfig;
use crate::validation::report::format_report;

/// Runs the command-line tool with the provided arguments.
pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Send(args) => send_alert(args, config_path).await,
        Commands::Preview(args) => preview_alert(&args, config_path),
        Commands::ConfigValidate => validate_config(config_path),
        Commands::ConfigShow => show_config(config_path),
    }
}

/// Initializes the tracing subscriber for structured logging.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Loads and validates the configuration, or returns defaults when no path is given.
fn load_config(config_path: Option<&Path>) -> Result<AlertConfig> {
    match config_path {
        Some(path) => config::load_and_validate(path),
        None => Ok(AlertConfig::default()),
    }
}

/// Resolves the logs URL and mentions from CLI arguments and configuration.
fn resolve_alert<'a>(args: &'a AlertArgs, config: &'a AlertConfig) -> (&'a str, &'a [String]) {
    let logs_url = args
        .logs_url
        .as_deref()
        .or(config.logs_url.as_deref())
        .unwrap_or_default();

    let mentions = if args.mentions.is_empty() {
        config.mentions.as_slice()
    } else {
        args.mentions.as_slice()
    };

    (logs_url, mentions)
}

/// Builds and sends an error alert.
pub async fn send_alert(args: SendArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let webhook_url = args
        .webhook_url
        .as_deref()
        .or(config.webhook_url.as_deref())
        .context("No webhook URL: pass --webhook-url, set SLACK_WEBHOOK_URL or configure webhook_url")?;

    let dispatcher = config.dispatcher(webhook_url)?;
    let (logs_url, mentions) = resolve_alert(&args.alert, &config);

    if let Err(e) = dispatcher
        .send_error_alert(&args.alert.message, logs_url, mentions)
        .await
    {
        error!(error = %e, status = ?e.status(), "Failed to deliver alert");
        return Err(e).context("Alert was not delivered");
    }

    info!(mentions = mentions.len(), "Alert delivered");
    Ok(())
}

/// Prints the JSON payload an alert would carry.
fn preview_alert(args: &AlertArgs, config_path: Option<&Path>) -> Result<()> {
    println!("{}", render_preview(args, config_path)?);
    Ok(())
}

/// Renders the JSON payload an alert would carry, without sending it.
pub fn render_preview(args: &AlertArgs, config_path: Option<&Path>) -> Result<String> {
    let config = load_config(config_path)?;
    let (logs_url, mentions) = resolve_alert(args, &config);

    let message = config
        .branding
        .error_message(&args.message, logs_url, mentions);
    let json = serde_json::to_string_pretty(&message).map_err(AlertError::from)?;
    Ok(json)
}

/// Validates the configuration file and reports any issues.
fn validate_config(config_path: Option<&Path>) -> Result<()> {
    print!("{}", validation_report(config_path)?);
    Ok(())
}

/// Validates the configuration file and returns the report.
///
/// Fails with the report attached when the file has errors.
pub fn validation_report(config_path: Option<&Path>) -> Result<String> {
    let path = config_path.context("No configuration file given (use --config)")?;
    let config = config::load_from_path(path)?;

    let result = validation::validate_config(&config);
    let report = format_report(&result);

    if !result.is_valid() {
        return Err(ConfigError::ValidationFailed {
            error_count: result.error_count(),
        })
        .context(report);
    }
    Ok(report)
}

/// Displays the effective configuration.
fn show_config(config_path: Option<&Path>) -> Result<()> {
    println!("{}", render_config(config_path)?);
    Ok(())
}

/// Renders the effective configuration as YAML.
pub fn render_config(config_path: Option<&Path>) -> Result<String> {
    let config = load_config(config_path)?;
    Ok(serde_yaml::to_string(&config)?)
}
