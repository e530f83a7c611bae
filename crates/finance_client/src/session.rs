use std::{future::Future, sync::Arc};

use api_types::auth::{AuthResponse, LoginRequest, RegisterRequest};
use thiserror::Error;
use tokio::sync::watch;

use crate::{
    error::ClientError,
    http::ApiClient,
    storage::{StorageError, StoredTokens, TokenStore},
};

/// Snapshot published to every subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    /// True until the stored tokens have been read once.
    pub loading: bool,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Email hoặc mật khẩu không đúng")]
    LoginFailed,
    #[error("Đăng ký thất bại, vui lòng thử lại")]
    RegisterFailed,
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Authentication endpoints.
pub trait AuthBackend: Send + Sync {
    fn login(
        &self,
        payload: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ClientError>> + Send;

    fn register(
        &self,
        payload: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ClientError>> + Send;
}

impl AuthBackend for ApiClient {
    async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ClientError> {
        ApiClient::login(self, payload).await
    }

    async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        ApiClient::register(self, payload).await
    }
}

/// Owns the authenticated flag and keeps it in step with the token store.
#[derive(Debug)]
pub struct SessionStore {
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState {
            authenticated: false,
            loading: true,
        });
        Self { tokens, state }
    }

    /// Reads the persisted token once and publishes the result.
    pub fn init(&self) -> SessionState {
        let authenticated = self.tokens.access_token().is_some();
        tracing::info!(authenticated, "session restored");
        self.publish(authenticated)
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn login<B: AuthBackend>(
        &self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let payload = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let auth = backend.login(&payload).await.map_err(|err| {
            tracing::warn!("login failed: {err}");
            SessionError::LoginFailed
        })?;
        self.persist(auth)?;
        tracing::info!("logged in");
        Ok(())
    }

    pub async fn register<B: AuthBackend>(
        &self,
        backend: &B,
        payload: &RegisterRequest,
    ) -> Result<(), SessionError> {
        let auth = backend.register(payload).await.map_err(|err| {
            tracing::warn!("register failed: {err}");
            SessionError::RegisterFailed
        })?;
        self.persist(auth)?;
        tracing::info!("registered");
        Ok(())
    }

    /// Drops both tokens. Never fails: when the store cannot be cleared the
    /// tokens are overwritten with blanks, which reads back as no session.
    pub fn logout(&self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!("failed to clear stored tokens: {err}");
            if let Err(err) = self.tokens.save(&StoredTokens::default()) {
                tracing::error!("failed to blank stored tokens: {err}");
            }
        }
        self.publish(false);
        tracing::info!("logged out");
    }

    fn persist(&self, auth: AuthResponse) -> Result<(), SessionError> {
        self.tokens.save(&StoredTokens {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            access_token_expires_at: auth.access_token_expires_at,
        })?;
        self.publish(self.tokens.access_token().is_some());
        Ok(())
    }

    fn publish(&self, authenticated: bool) -> SessionState {
        let next = SessionState {
            authenticated,
            loading: false,
        };
        self.state.send_replace(next);
        next
    }
}
