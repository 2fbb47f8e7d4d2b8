//! # Notifications
//!
//! Outbound alerts for opportunities the bot finds while watching.

/// Slack channel notifier
pub mod slack;

pub use slack::SlackNotifier;
