//! Slack webhook error alerts: payload construction and delivery.

pub mod message;
pub mod slack;
pub mod transport;

pub use message::{build_error_message, Action, Attachment, Branding, Field, Message};
pub use slack::{send, send_error_alert, send_with, AlertDispatcher};
pub use transport::{default_client, HttpTransport, Transport, WebhookResponse};
