use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::app::error::{ClientError, ClientResult};

/// Fixed code accepted when the session has been downgraded to mock mode.
pub const MOCK_OTP_CODE: &str = "123456";
/// Placeholder identity token sent to the backend in mock mode.
pub const MOCK_ID_TOKEN: &str = "mock-id-token";

/// Out-of-band one-time-code provider. Dispatches a code to the resolved
/// email and, on verification, issues an identity token the backend accepts.
#[async_trait]
pub trait OtpProvider: Send + Sync {
    async fn send_code(&self, email: &str) -> ClientResult<()>;

    /// Returns the provider-issued identity token.
    async fn verify_code(&self, email: &str, code: &str) -> ClientResult<String>;
}

pub struct HttpOtpProvider {
    base_url: String,
    client: Client,
}

impl HttpOtpProvider {
    pub fn new(base_url: &str) -> Self {
        HttpOtpProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenDto {
    #[serde(rename = "idToken")]
    id_token: String,
}

#[async_trait]
impl OtpProvider for HttpOtpProvider {
    async fn send_code(&self, email: &str) -> ClientResult<()> {
        let url = format!("{}/otp/send", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Service(format!(
                "OTP dispatch returned {}",
                response.status()
            )))
        }
    }

    async fn verify_code(&self, email: &str, code: &str) -> ClientResult<String> {
        let url = format!("{}/otp/verify", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "code": code }))
            .send()
            .await?;

        if response.status().is_success() {
            let body: IdTokenDto = response.json().await?;
            Ok(body.id_token)
        } else {
            Err(ClientError::Service("invalid code".to_string()))
        }
    }
}
