use dotenv::dotenv;
use std::env;

/// Endpoints of the external collaborators plus the flags that gate
/// development-only behaviour. Built once at startup and passed into each
/// view's controller.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential / OTP-verify / candidate-metadata REST service.
    pub backend_url: String,
    /// Contract RPC gateway.
    pub gateway_url: String,
    /// Real-time feed service.
    pub feed_url: String,
    /// OTP dispatch/verify provider.
    pub otp_provider_url: String,
    /// Base URL the login flow redirects into after verification.
    pub app_url: String,
    /// Allows the silent downgrade to the fixed mock OTP code when the
    /// provider is unreachable. Off by default.
    pub allow_mock_otp: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        AppConfig {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            gateway_url: env::var("GATEWAY_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9545".to_string()),
            feed_url: env::var("FEED_URL").unwrap_or_else(|_| "http://127.0.0.1:4000".to_string()),
            otp_provider_url: env::var("OTP_PROVIDER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:4100".to_string()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            allow_mock_otp: env::var("ALLOW_MOCK_OTP")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
