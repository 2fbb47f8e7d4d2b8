use std::time::Duration;

use eyre::Result;
use reqwest::Client;
use serde_json::json;

/// Slack notifier for found opportunities and operational errors.
#[derive(Debug)]
pub struct SlackNotifier {
    /// The Slack OAuth token
    token: String,
    /// The HTTP client
    client: Client,
}

impl SlackNotifier {
    /// Creates a notifier from the `SLACK_OAUTH_TOKEN` environment variable.
    ///
    /// # Errors
    /// Fails when the token is unset or the HTTP client cannot be built;
    /// callers treat either as "notifications disabled".
    pub fn new() -> Result<Self> {
        let token = std::env::var("SLACK_OAUTH_TOKEN")
            .map_err(|_| eyre::eyre!("SLACK_OAUTH_TOKEN not set"))?;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self { token, client })
    }

    /// Sends a message to a specific channel.
    ///
    /// # Errors
    /// Fails on transport errors or when the Slack API answers with
    /// `ok: false`.
    pub async fn send_to(&self, msg: &str, channel: &str) -> Result<()> {
        let payload = json!({
            "channel": channel,
            "text": msg,
            "username": "Gyre Bot",
            "icon_emoji": ":arrows_counterclockwise:"
        });

        let response = self
            .client
            .post("https://slack.com/api/chat.postMessage")
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        if !response["ok"].as_bool().unwrap_or(false) {
            return Err(eyre::eyre!(
                "Slack API error: {}",
                response["error"].as_str().unwrap_or("unknown error")
            ));
        }

        Ok(())
    }

    /// Sends a message to the default channel.
    ///
    /// # Errors
    /// Same failure modes as [`SlackNotifier::send_to`].
    pub async fn send(&self, msg: &str) -> Result<()> {
        self.send_to(msg, "#gyre").await
    }

    /// Sends an error message to the error channel.
    ///
    /// # Errors
    /// Same failure modes as [`SlackNotifier::send_to`].
    pub async fn send_error(&self, error: &str) -> Result<()> {
        self.send_to(&format!(":warning: Error: {error}"), "#gyre-errors")
            .await
    }
}
