use std::sync::Arc;
use validator::Validate;

use crate::app::controllers::StatusMessage;
use crate::app::dtos::login_dto::{LoginRequestDto, OtpSubmissionDto, SessionDto, VerifyOtpDto};
use crate::app::entities::session_entity::{PendingAuth, Role};
use crate::app::error::{ClientError, ClientResult};
use crate::app::services::backend_api::BackendApi;
use crate::app::services::otp_provider::{OtpProvider, MOCK_ID_TOKEN, MOCK_OTP_CODE};
use crate::app::storage::{LocalStore, EMAIL_FOR_SIGN_IN_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    AwaitingCredentials,
    AwaitingOtp,
    Completed,
}

/// Target the host navigates to once. Carries the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub url: String,
}

/// Two-phase login: credential check against the backend, then out-of-band
/// one-time-code confirmation, ending in a session-token redirect.
///
/// All state is session-local; abandoning the page discards it. Failures
/// leave the machine where it was so the user can resubmit.
pub struct LoginController {
    backend: Arc<dyn BackendApi>,
    otp: Arc<dyn OtpProvider>,
    store: Arc<LocalStore>,
    app_url: String,
    allow_mock_otp: bool,
    state: LoginState,
    pending: Option<PendingAuth>,
    redirect: Option<Redirect>,
    pub message: Option<StatusMessage>,
}

impl LoginController {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        otp: Arc<dyn OtpProvider>,
        store: Arc<LocalStore>,
        app_url: &str,
        allow_mock_otp: bool,
    ) -> Self {
        LoginController {
            backend,
            otp,
            store,
            app_url: app_url.trim_end_matches('/').to_string(),
            allow_mock_otp,
            state: LoginState::AwaitingCredentials,
            pending: None,
            redirect: None,
            message: None,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingAuth> {
        self.pending.as_ref()
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    fn show(&mut self, message: StatusMessage) {
        self.message = Some(message);
    }

    /// Phase 1: credential form submission.
    pub async fn submit_credentials(&mut self, voter_id: &str, password: &str) -> ClientResult<()> {
        if self.state != LoginState::AwaitingCredentials {
            return Err(ClientError::InvalidInput(
                "login already in progress".to_string(),
            ));
        }

        let request = LoginRequestDto {
            voter_id: voter_id.trim().to_string(),
            password: password.to_string(),
        };
        if request.validate().is_err() {
            self.show(StatusMessage::error(
                "Please enter both Voter ID and Password.",
            ));
            return Err(ClientError::InvalidInput(
                "voter id and password are required".to_string(),
            ));
        }

        self.show(StatusMessage::info("Authenticating..."));

        let response = match self.backend.login(&request.voter_id, &request.password).await {
            Ok(response) => response,
            Err(e) => {
                self.show(StatusMessage::error(format!("Login failed: {}", e)));
                return Err(e);
            }
        };

        let email = response
            .email
            .unwrap_or_else(|| format!("{}@voter.local", request.voter_id));
        let mut pending = PendingAuth {
            temp_token: response.token,
            role: Role::parse(&response.role),
            email: email.clone(),
            voter_id: request.voter_id,
            use_mock: false,
        };

        // Credential check passed: the credential form goes away and the OTP
        // form takes over, regardless of how the dispatch below fares.
        self.state = LoginState::AwaitingOtp;

        match self.otp.send_code(&email).await {
            Ok(()) => {
                self.store.set(EMAIL_FOR_SIGN_IN_KEY, &email);
                self.show(StatusMessage::info(format!(
                    "OTP sent to {}. Check your email and enter the code.",
                    email
                )));
            }
            Err(e) if self.allow_mock_otp => {
                log::error!("OTP provider error: {}", e);
                pending.use_mock = true;
                self.show(StatusMessage::info(format!(
                    "OTP provider unavailable. Using mock OTP: {}",
                    MOCK_OTP_CODE
                )));
            }
            Err(e) => {
                self.show(StatusMessage::error(format!("Failed to send OTP: {}", e)));
            }
        }

        self.pending = Some(pending);
        Ok(())
    }

    /// Phase 2: OTP form submission.
    pub async fn submit_otp(&mut self, code: &str) -> ClientResult<()> {
        if self.state != LoginState::AwaitingOtp {
            return Err(ClientError::InvalidInput(
                "no OTP verification in progress".to_string(),
            ));
        }

        let submission = OtpSubmissionDto {
            code: code.trim().to_string(),
        };
        if submission.validate().is_err() {
            self.show(StatusMessage::error("Please enter a valid 6-digit OTP."));
            return Err(ClientError::InvalidInput("OTP code too short".to_string()));
        }

        let pending = match self.pending.clone() {
            Some(pending) => pending,
            None => {
                return Err(ClientError::InvalidInput(
                    "no pending login state".to_string(),
                ))
            }
        };

        self.show(StatusMessage::info("Verifying OTP..."));

        let session = if pending.use_mock {
            if submission.code != MOCK_OTP_CODE {
                self.show(StatusMessage::error("Invalid OTP code."));
                return Err(ClientError::InvalidInput("invalid OTP code".to_string()));
            }
            self.verify_with_backend(&pending, MOCK_ID_TOKEN, true).await
        } else {
            self.verify_with_provider(&pending, &submission.code).await
        };

        let session = match session {
            Ok(session) => session,
            Err(e) => {
                self.show(StatusMessage::error(format!("Verification failed: {}", e)));
                return Err(e);
            }
        };

        self.complete_login(session);
        Ok(())
    }

    async fn verify_with_provider(
        &self,
        pending: &PendingAuth,
        code: &str,
    ) -> ClientResult<SessionDto> {
        let email = self
            .store
            .get(EMAIL_FOR_SIGN_IN_KEY)
            .unwrap_or_else(|| pending.email.clone());
        let id_token = self.otp.verify_code(&email, code).await?;
        self.verify_with_backend(pending, &id_token, false).await
    }

    async fn verify_with_backend(
        &self,
        pending: &PendingAuth,
        id_token: &str,
        mock: bool,
    ) -> ClientResult<SessionDto> {
        let request = VerifyOtpDto {
            id_token: id_token.to_string(),
            temp_token: pending.temp_token.clone(),
            voter_id: pending.voter_id.clone(),
            mock,
        };
        self.backend.verify_otp(&request).await
    }

    fn complete_login(&mut self, session: SessionDto) {
        let role = Role::parse(&session.role);
        self.store.set(role.token_key(), &session.session_token);
        self.redirect = Some(Redirect {
            url: format!(
                "{}/{}?Authorization=Bearer {}",
                self.app_url,
                role.landing_page(),
                session.session_token
            ),
        });
        self.state = LoginState::Completed;
        self.show(StatusMessage::info("Verified! Redirecting..."));
    }
}
