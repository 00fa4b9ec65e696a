use super::DineClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use shared::client::{
    LoginRequest, LoginResponse, LogoutRequest, PasscodeLoginRequest, Route, landing_route,
};
use tracing::{info, instrument, warn};

impl<C: HttpClient> DineClient<C> {
    /// Username/password login; returns the landing route for the user's role
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Route> {
        let request = LoginRequest::new(username, password)?;
        let response: LoginResponse = self.http.post("login/", &request).await?;
        self.start_session(response).await
    }

    #[instrument(skip_all)]
    pub async fn login_passcode(&self, passcode: &str) -> ClientResult<Route> {
        let request = PasscodeLoginRequest::new(passcode)?;
        let response: LoginResponse = self.http.post("login-passcode/", &request).await?;
        self.start_session(response).await
    }

    async fn start_session(&self, response: LoginResponse) -> ClientResult<Route> {
        let route = landing_route(&response.user.role);
        info!(user = %response.user.username, role = %response.user.role, "Logged in");
        self.session().replace(Session::from_login(response)).await;
        self.persist().await?;
        Ok(route)
    }

    /// Blacklist the refresh token and forget the session
    ///
    /// The local session is cleared even when the server call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ClientResult<()> {
        if let Some(refresh_token) = self.session().refresh_token().await {
            let request = LogoutRequest { refresh_token };
            if let Err(e) = self
                .http
                .post::<serde_json::Value, _>("logout/", &request)
                .await
            {
                warn!(error = %e, "Logout request failed");
            }
        }
        self.session().clear().await;
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        Ok(())
    }

    /// Drop a session the API no longer accepts
    pub async fn expire_session(&self) -> ClientResult<()> {
        self.session().clear().await;
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        Ok(())
    }
}
