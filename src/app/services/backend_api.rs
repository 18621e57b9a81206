use async_trait::async_trait;
use reqwest::Client;

use crate::app::dtos::candidate_dto::{CandidateMetaDto, CandidatesResponseDto};
use crate::app::dtos::login_dto::{LoginResponseDto, SessionDto, VerifyOtpDto};
use crate::app::error::{ClientError, ClientResult};

/// REST service backing the pages: credential check, OTP verification and
/// candidate metadata.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn login(&self, voter_id: &str, password: &str) -> ClientResult<LoginResponseDto>;

    async fn verify_otp(&self, request: &VerifyOtpDto) -> ClientResult<SessionDto>;

    async fn fetch_candidates(&self) -> ClientResult<Vec<CandidateMetaDto>>;
}

pub struct HttpBackendApi {
    base_url: String,
    client: Client,
}

impl HttpBackendApi {
    pub fn new(base_url: &str) -> Self {
        HttpBackendApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn login(&self, voter_id: &str, password: &str) -> ClientResult<LoginResponseDto> {
        let url = format!("{}/login", self.base_url);
        // The service authenticates the call itself with a bearer-style
        // header carrying the voter id.
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", voter_id))
            .query(&[("voter_id", voter_id), ("password", password)])
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(ClientError::Service("Invalid credentials".to_string()))
        }
    }

    async fn verify_otp(&self, request: &VerifyOtpDto) -> ClientResult<SessionDto> {
        let url = format!("{}/verify-otp", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(ClientError::Service("OTP verification failed".to_string()))
        }
    }

    async fn fetch_candidates(&self) -> ClientResult<Vec<CandidateMetaDto>> {
        let url = format!("{}/candidates", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            let body: CandidatesResponseDto = response.json().await?;
            Ok(body.candidates)
        } else {
            Err(ClientError::Service(format!(
                "candidate metadata request returned {}",
                response.status()
            )))
        }
    }
}
