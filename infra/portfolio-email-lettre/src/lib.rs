use std::str::FromStr;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{authentication::Credentials, response::Response},
};
use log::debug;
use portfolio_relay_app::ports::email::{DeliveryReceipt, EmailPort, SendEmailError};
use thiserror::Error;

/// Connection settings for the outbound SMTP provider.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// e.g. `smtps://smtp.gmail.com` or `smtp://localhost:1025`
    pub url: String,
    pub credentials: Option<(String, String)>,
    pub from: String,
}

#[derive(Debug, Error)]
pub enum LettreSetupError {
    #[error("Invalid SMTP url: {0}")]
    InvalidUrl(String),
    #[error("Invalid from address: {0}")]
    InvalidFromAddress(String),
}

pub struct LettreEmailAdapter {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl LettreEmailAdapter {
    pub fn new(settings: SmtpSettings) -> Result<Self, LettreSetupError> {
        let from = Mailbox::from_str(&settings.from)
            .map_err(|e| LettreSetupError::InvalidFromAddress(e.to_string()))?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(&settings.url)
            .map_err(|e| LettreSetupError::InvalidUrl(e.to_string()))?;
        if let Some((user, password)) = settings.credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn describe_response(response: &Response) -> String {
    let lines: Vec<&str> = response.message().collect();
    format!("{} {}", response.code(), lines.join(" "))
}

#[async_trait::async_trait]
impl EmailPort for LettreEmailAdapter {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<DeliveryReceipt, SendEmailError> {
        let to =
            Mailbox::from_str(to).map_err(|e| SendEmailError::InvalidToAddress(e.to_string()))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| SendEmailError::Build(e.to_string()))?;
        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| SendEmailError::Transport(e.to_string()))?;
        debug!("SMTP response: {:?}", response);
        Ok(DeliveryReceipt::new(describe_response(&response)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use portfolio_relay_app::domain::contact::{ContactEmail, ContactSubmission};
    use tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::TcpListener,
        sync::oneshot,
        time::timeout,
    };

    use super::*;

    /// Accepts one SMTP session with scripted replies and hands back the
    /// DATA section it received.
    async fn start_fake_smtp_server() -> (u16, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (data_tx, data_rx) = oneshot::channel();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (reader, mut writer) = stream.into_split();
            let mut lines = BufReader::new(reader).lines();
            let mut data_tx = Some(data_tx);
            writer
                .write_all(b"220 localhost ESMTP fake\r\n")
                .await
                .unwrap();
            while let Ok(Some(line)) = lines.next_line().await {
                let command = line.to_ascii_uppercase();
                let reply: &[u8] = if command.starts_with("EHLO") {
                    b"250-localhost\r\n250 8BITMIME\r\n"
                } else if command == "DATA" {
                    writer.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await.unwrap();
                    let mut data = Vec::new();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if line == "." {
                            break;
                        }
                        data.push(line);
                    }
                    if let Some(tx) = data_tx.take() {
                        let _ = tx.send(data.join("\n"));
                    }
                    b"250 2.0.0 Ok: queued as 42\r\n"
                } else if command == "QUIT" {
                    writer.write_all(b"221 2.0.0 Bye\r\n").await.unwrap();
                    break;
                } else {
                    b"250 2.0.0 Ok\r\n"
                };
                writer.write_all(reply).await.unwrap();
            }
        });
        (port, data_rx)
    }

    fn settings(url: &str) -> SmtpSettings {
        SmtpSettings {
            url: url.to_string(),
            credentials: None,
            from: "Portfolio <owner@example.com>".to_string(),
        }
    }

    #[test]
    fn test_rejects_invalid_from_address() {
        let result = LettreEmailAdapter::new(SmtpSettings {
            from: "not a mailbox".to_string(),
            ..settings("smtp://127.0.0.1:1")
        });
        assert!(matches!(result, Err(LettreSetupError::InvalidFromAddress(_))));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = LettreEmailAdapter::new(settings("ftp://example.com"));
        assert!(matches!(result, Err(LettreSetupError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_to_address() {
        let adapter = LettreEmailAdapter::new(settings("smtp://127.0.0.1:1")).unwrap();
        let result = adapter.send_email("nobody", "subject", "body").await;
        assert!(matches!(result, Err(SendEmailError::InvalidToAddress(_))));
    }

    #[tokio::test]
    async fn test_delivered_email_returns_server_reply() {
        let (port, data_rx) = start_fake_smtp_server().await;
        let adapter =
            LettreEmailAdapter::new(settings(&format!("smtp://127.0.0.1:{}", port))).unwrap();
        let email =
            ContactEmail::compose(&ContactSubmission::new("Ada", "ada@example.com", "Hello"));

        let receipt = adapter
            .send_email("owner@example.com", &email.subject, &email.body)
            .await
            .unwrap();

        assert_eq!(receipt.response, "250 2.0.0 Ok: queued as 42");
        let data = timeout(Duration::from_secs(5), data_rx)
            .await
            .unwrap()
            .unwrap();
        assert!(data.contains("Subject: New Contact Form Message from Ada"));
        assert!(data.contains("To: owner@example.com"));
        assert!(data.contains("Name: Ada"));
        assert!(data.contains("Email: ada@example.com"));
        assert!(data.contains("Message: Hello"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let adapter = LettreEmailAdapter::new(settings("smtp://127.0.0.1:1")).unwrap();
        let result = adapter
            .send_email("owner@example.com", "subject", "body")
            .await;
        match result {
            Err(SendEmailError::Transport(details)) => assert!(!details.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
