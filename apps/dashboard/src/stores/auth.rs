use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::errors::ClientError;
use crate::models::User;
use crate::route::Route;
use crate::storage::{clear_session, save_session, KeyValueStore};

/// What an auth-gated page is allowed to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthGate<'a> {
    /// No answer from `/me` yet; render a spinner, never the page.
    Initializing,
    /// Initialization finished without a session.
    Anonymous,
    Authenticated(&'a User),
}

/// The signed-in user, mirrored from the backend session.
///
/// Session validity belongs to the backend: there is no retry, refresh or
/// expiry tracking here. A failed `/me` simply means "nobody is signed in".
pub struct AuthStore {
    backend: Arc<dyn Backend>,
    storage: Arc<dyn KeyValueStore>,
    user: Option<User>,
    is_initializing: bool,
}

impl AuthStore {
    pub fn new(backend: Arc<dyn Backend>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            storage,
            user: None,
            is_initializing: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_initializing(&self) -> bool {
        self.is_initializing
    }

    pub fn gate(&self) -> AuthGate<'_> {
        if self.is_initializing {
            return AuthGate::Initializing;
        }
        match &self.user {
            Some(user) => AuthGate::Authenticated(user),
            None => AuthGate::Anonymous,
        }
    }

    /// Asks the backend who is signed in. Returns whether someone is.
    pub async fn fetch_user(&mut self) -> bool {
        self.is_initializing = true;
        let result = self.backend.me().await;
        self.user = match result {
            Ok(user) => {
                debug!("Signed in as {}", user.email);
                Some(user)
            }
            Err(ClientError::Unauthorized) => {
                debug!("No active session");
                None
            }
            Err(e) => {
                warn!("Error during fetch_user: {e}");
                None
            }
        };
        self.is_initializing = false;
        self.user.is_some()
    }

    /// Ends the session. The backend call is best-effort: local state is
    /// cleared whatever it returns.
    pub async fn logout(&mut self) -> Route {
        self.is_initializing = true;
        if let Err(e) = self.backend.logout().await {
            warn!("Error during logout: {e}");
        }
        if let Err(e) = clear_session(self.storage.as_ref()) {
            warn!("Failed to clear stored session: {e}");
        }
        self.user = None;
        self.is_initializing = false;
        info!("Logged out");
        Route::Root
    }

    /// Where a browser has to go to sign in.
    pub fn login_url(&self) -> String {
        self.backend.authorize_url()
    }

    /// Stores a session token obtained from the browser login so later
    /// requests are made on its behalf. Call `fetch_user` to verify it.
    pub fn login_with_token(&mut self, token: &str) -> Result<(), ClientError> {
        save_session(self.storage.as_ref(), token)?;
        info!("Session token saved");
        Ok(())
    }
}
