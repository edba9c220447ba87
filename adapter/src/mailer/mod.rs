use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::mailer::Mailer;
use shared::{config::MailConfig, error::AppError, error::AppResult};

const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Sends mail through the Gmail REST API with a pre-provisioned access
/// token. Callers dispatch through `tokio::spawn`; a failed send is
/// logged by the caller and never fails the triggering request.
pub struct GmailMailer {
    http: reqwest::Client,
    sender: String,
    access_token: String,
}

impl GmailMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            sender: config.sender.clone(),
            access_token: config.gmail_access_token.clone(),
        }
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.sender, to, subject, body
        );
        let raw = general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes());

        let res = self
            .http
            .post(GMAIL_SEND_URL)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("gmail request failed: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "gmail send failed ({status}): {detail}"
            )));
        }

        Ok(())
    }
}
