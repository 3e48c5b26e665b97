//! Contact form notifications
//!
//! Submissions are forwarded as JSON to an optional webhook. Delivery runs
//! in the background and never affects the response shown to the visitor.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Contact form fields as posted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub token: String,
    /// Honeypot field; real visitors leave it blank
    #[serde(default)]
    pub website: String,
}

/// JSON body delivered to the webhook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub token: String,
    pub website: String,
    /// URL the form was submitted to
    pub page: String,
}

impl ContactPayload {
    pub fn from_form(form: ContactForm, page: String) -> Self {
        Self {
            name: form.name,
            email: form.email,
            message: form.message,
            token: form.token,
            website: form.website,
            page,
        }
    }
}

/// Webhook client for contact submissions
#[derive(Clone)]
pub struct ContactNotifier {
    http_client: reqwest::Client,
    webhook_url: Option<String>,
}

impl ContactNotifier {
    pub fn new(webhook_url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("dpfa-web/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            webhook_url,
        })
    }

    /// Notifier that never sends anything
    pub fn disabled() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            webhook_url: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Deliver `payload` on a background task
    pub fn notify(&self, payload: ContactPayload) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.deliver(&payload).await;
        });
    }

    /// Deliver `payload` and wait for the outcome; failures are logged only
    pub async fn deliver(&self, payload: &ContactPayload) {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::debug!("Contact webhook not configured, submission dropped");
            return;
        };

        match self.http_client.post(url).json(payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(status = response.status().as_u16(), "Contact submission forwarded");
            }
            Ok(response) => {
                tracing::warn!(
                    status = response.status().as_u16(),
                    "Contact webhook rejected submission"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact webhook unreachable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            message: "Missing song in Overtime 12".to_string(),
            token: "t0k".to_string(),
            website: String::new(),
        }
    }

    #[test]
    fn test_payload_fields() {
        let payload = ContactPayload::from_form(form(), "http://localhost/contact/submit".into());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["page"], "http://localhost/contact/submit");
        assert_eq!(json["website"], "");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_swallowed() {
        let notifier = ContactNotifier::new(
            Some("http://127.0.0.1:9/hook".to_string()),
            Duration::from_millis(200),
        )
        .unwrap();
        assert!(notifier.is_enabled());
        notifier
            .deliver(&ContactPayload::from_form(form(), "/contact/submit".into()))
            .await;
    }

    #[tokio::test]
    async fn test_disabled_notifier_sends_nothing() {
        let notifier = ContactNotifier::disabled();
        assert!(!notifier.is_enabled());
        notifier
            .deliver(&ContactPayload::from_form(form(), "/contact/submit".into()))
            .await;
    }
}
