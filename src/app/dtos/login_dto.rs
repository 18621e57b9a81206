use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credential form input. Validated before any network call is made.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Please enter both Voter ID and Password."))]
    pub voter_id: String,

    #[validate(length(min = 1, message = "Please enter both Voter ID and Password."))]
    pub password: String,
}

/// OTP form input.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OtpSubmissionDto {
    #[validate(length(min = 6, message = "Please enter a valid 6-digit OTP."))]
    pub code: String,
}

/// `GET /login` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `POST /verify-otp` request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyOtpDto {
    #[serde(rename = "idToken")]
    pub id_token: String,

    #[serde(rename = "tempToken")]
    pub temp_token: String,

    #[serde(rename = "voterId")]
    pub voter_id: String,

    pub mock: bool,
}

/// `POST /verify-otp` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionDto {
    #[serde(rename = "sessionToken")]
    pub session_token: String,

    pub role: String,
}
