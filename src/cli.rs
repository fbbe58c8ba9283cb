//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sends error alerts to a Slack incoming webhook.
#[derive(Parser, Debug)]
#[command(name = "slack-alert", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "SLACK_ALERT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an error alert and deliver it to the webhook.
    Send(SendArgs),

    /// Print the JSON payload of an error alert without sending it.
    Preview(AlertArgs),

    /// Validate the configuration file.
    #[command(name = "config-validate")]
    ConfigValidate,

    /// Display the parsed configuration.
    #[command(name = "config-show")]
    ConfigShow,
}

/// Content of an error alert.
#[derive(Args, Debug)]
pub struct AlertArgs {
    /// Error description carried in the alert.
    #[arg(short, long)]
    pub message: String,

    /// Link shown on the "View Logs" button. Overrides the configured logs URL.
    #[arg(short, long)]
    pub logs_url: Option<String>,

    /// User or group to mention (repeatable). Replaces the configured mentions.
    #[arg(long = "mention", value_name = "ID")]
    pub mentions: Vec<String>,
}

/// Arguments for the send subcommand.
#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub alert: AlertArgs,

    /// Webhook URL. Overrides the configured webhook URL.
    #[arg(short, long, env = "SLACK_WEBHOOK_URL")]
    pub webhook_url: Option<String>,
}
