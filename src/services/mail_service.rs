use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::json;

/// HTTP mail collaborator (Resend-style API): one POST per recipient,
/// `{from, to, subject, html}`.
#[derive(Clone)]
pub struct MailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl MailService {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(
            config.mail_api_url.clone(),
            config.mail_api_key.clone(),
            config.mail_from.clone(),
        )
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let payload = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Mail provider rejected message to {}: {} {}", to, status, body);
            return Err(Error::Upload(format!(
                "Mail provider returned {} for {}",
                status, to
            )));
        }

        Ok(())
    }
}
