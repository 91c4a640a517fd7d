use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

use crate::config::AppConfig;

/// SMTP connection settings, sourced from a secret store or the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl SmtpSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            user: config.smtp_user.clone(),
            pass: config.smtp_pass.clone(),
        }
    }

    /// Parses a secret document shaped like the environment variables:
    /// `{"SMTP_HOST": ..., "SMTP_PORT": ..., "SMTP_USER": ..., "SMTP_PASS": ...}`.
    /// The port may be a number or a string.
    pub fn from_secret(secret: &Value) -> anyhow::Result<Self> {
        let text = |key: &str| secret.get(key).and_then(Value::as_str).unwrap_or_default();

        let port = match secret.get("SMTP_PORT") {
            None | Some(Value::Null) => 587,
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|p| u16::try_from(p).ok())
                .context("SMTP_PORT out of range")?,
            Some(Value::String(s)) => s.trim().parse::<u16>().context("SMTP_PORT is not a number")?,
            Some(other) => anyhow::bail!("SMTP_PORT has unexpected type: {other}"),
        };

        let host = match text("SMTP_HOST") {
            "" => "smtp.gmail.com".to_string(),
            h => h.to_string(),
        };

        Ok(Self {
            host,
            port,
            user: text("SMTP_USER").to_string(),
            pass: text("SMTP_PASS").to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.user.is_empty()
    }
}

pub struct SecretStoreClient {
    url: String,
    token: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl SecretStoreClient {
    pub fn new(url: String, token: String, timeout: Duration) -> Self {
        Self {
            url,
            token,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch(&self) -> anyhow::Result<SmtpSettings> {
        let mut req = self.client.get(&self.url).timeout(self.timeout);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        let secret: Value = req
            .send()
            .await
            .context("failed to reach secret store")?
            .error_for_status()
            .context("secret store returned error")?
            .json()
            .await
            .context("failed to parse secret document")?;

        SmtpSettings::from_secret(&secret)
    }
}

/// Loads SMTP settings from the secret store when one is configured,
/// falling back to the environment values on any failure.
pub async fn load_smtp_settings(config: &AppConfig) -> SmtpSettings {
    if config.smtp_secret_url.is_empty() {
        tracing::info!("SMTP_SECRET_URL not set, using environment variables");
        return SmtpSettings::from_config(config);
    }

    let store = SecretStoreClient::new(
        config.smtp_secret_url.clone(),
        config.smtp_secret_token.clone(),
        Duration::from_secs(config.smtp_secret_timeout_secs),
    );
    match store.fetch().await {
        Ok(settings) => {
            tracing::info!("SMTP credentials loaded from secret store");
            settings
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load SMTP settings from secret store, using environment");
            SmtpSettings::from_config(config)
        }
    }
}
