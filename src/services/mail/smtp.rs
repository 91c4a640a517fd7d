use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::OnceCell;

use super::secrets::{load_smtp_settings, SmtpSettings};
use super::{MailError, Mailer};
use crate::config::AppConfig;
use crate::services::notification::NotificationEmail;

const IMPLICIT_TLS_PORT: u16 = 465;
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

struct Transport {
    settings: SmtpSettings,
    smtp: AsyncSmtpTransport<Tokio1Executor>,
}

/// Sends notifications over SMTP. Settings are resolved and the transport
/// built on first use, then shared by every later request.
pub struct SmtpMailer {
    config: AppConfig,
    transport: OnceCell<Transport>,
}

impl SmtpMailer {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            transport: OnceCell::new(),
        }
    }

    async fn transport(&self) -> anyhow::Result<&Transport> {
        self.transport
            .get_or_try_init(|| async {
                let settings = load_smtp_settings(&self.config).await;
                let smtp = build_transport(&settings)?;
                Ok::<_, anyhow::Error>(Transport { settings, smtp })
            })
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Implicit,
    StartTls,
}

pub fn tls_mode(port: u16) -> TlsMode {
    if port == IMPLICIT_TLS_PORT {
        TlsMode::Implicit
    } else {
        TlsMode::StartTls
    }
}

fn build_transport(settings: &SmtpSettings) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = match tls_mode(settings.port) {
        TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host),
        TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host),
    }
    .with_context(|| format!("invalid SMTP host {}", settings.host))?;

    Ok(builder
        .port(settings.port)
        .timeout(Some(SMTP_TIMEOUT))
        .credentials(Credentials::new(settings.user.clone(), settings.pass.clone()))
        .build())
}

pub fn build_message(from: &str, email: &NotificationEmail) -> anyhow::Result<Message> {
    let from: Mailbox = from.parse().with_context(|| format!("invalid sender address {from}"))?;
    let to: Mailbox = email
        .to
        .parse()
        .with_context(|| format!("invalid recipient address {}", email.to))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .context("failed to build email message")
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &NotificationEmail) -> Result<(), MailError> {
        let transport = self.transport().await?;
        if !transport.settings.is_configured() {
            return Err(MailError::NotConfigured("SMTP_USER is empty".to_string()));
        }

        let message = build_message(&transport.settings.user, email)?;
        transport
            .smtp
            .send(message)
            .await
            .context("failed to send email")?;

        Ok(())
    }

    /// Loads the transport and checks that the SMTP server accepts
    /// connections.
    async fn verify(&self) {
        let transport = match self.transport().await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "could not load SMTP configuration");
                return;
            }
        };

        if !transport.settings.is_configured() {
            tracing::warn!("SMTP_USER is not configured in the secret store or environment");
            return;
        }

        match transport.smtp.test_connection().await {
            Ok(true) => tracing::info!(host = %transport.settings.host, "email server is ready to send messages"),
            Ok(false) => tracing::warn!(host = %transport.settings.host, "email server did not accept the connection"),
            Err(e) => tracing::warn!(error = %e, "email configuration error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> NotificationEmail {
        NotificationEmail {
            to: to.to_string(),
            subject: "New Laundry Service Request - Jane".to_string(),
            text: "plain".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[test]
    fn test_build_message_rejects_bad_sender() {
        assert!(build_message("", &email("owner@example.com")).is_err());
        assert!(build_message("not an address", &email("owner@example.com")).is_err());
    }

    #[test]
    fn test_build_message_multipart() {
        let msg = build_message("bot@example.com", &email("owner@example.com")).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("Subject: New Laundry Service Request - Jane"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("To: owner@example.com"));
    }

    #[tokio::test]
    async fn test_send_without_user_is_not_configured() {
        let mut config = AppConfig::from_env();
        config.smtp_secret_url = String::new();
        config.smtp_host = "localhost".to_string();
        config.smtp_user = String::new();

        let mailer = SmtpMailer::new(config);
        let err = mailer.send(&email("owner@example.com")).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured(_)));
    }

    #[test]
    fn test_tls_mode_by_port() {
        assert_eq!(tls_mode(465), TlsMode::Implicit);
        assert_eq!(tls_mode(587), TlsMode::StartTls);
        assert_eq!(tls_mode(25), TlsMode::StartTls);
    }

    #[tokio::test]
    async fn test_build_transport_for_both_tls_modes() {
        for port in [465, 587] {
            let settings = SmtpSettings {
                host: "localhost".to_string(),
                port,
                user: "bot@example.com".to_string(),
                pass: "secret".to_string(),
            };
            assert!(build_transport(&settings).is_ok(), "port {port}");
        }
    }

    #[tokio::test]
    async fn test_verify_returns_when_secret_store_hangs() {
        // Accepts connections and never writes a byte.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut config = AppConfig::from_env();
        config.smtp_secret_url = format!("http://{addr}/smtp");
        config.smtp_secret_timeout_secs = 1;
        config.smtp_host = "localhost".to_string();
        config.smtp_user = String::new();

        let mailer = SmtpMailer::new(config);
        let result =
            tokio::time::timeout(std::time::Duration::from_secs(10), mailer.verify()).await;
        assert!(result.is_ok(), "verify blocked on an unresponsive secret store");
    }
}
