use tracing::{info, warn};

use crate::client::ApiClient;
use crate::errors::{TripError, TripResult};
use crate::types::{AuthResponse, RegisterRequest, User};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;

/// Where the client is in the login lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

impl RegisterRequest {
    /// Build a registration body, rejecting input the server would refuse
    pub fn new(
        email: &str,
        username: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> TripResult<Self> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(TripError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        let username = username.trim();
        let allowed = username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if !USERNAME_LEN.contains(&username.chars().count()) || !allowed {
            return Err(TripError::Validation(format!(
                "Username must be {}-{} letters, digits, '_' or '-'",
                USERNAME_LEN.start(),
                USERNAME_LEN.end()
            )));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TripError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(Self {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            full_name: full_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        })
    }
}

/// Login/logout state machine over the session's persisted token.
///
/// There is no refresh and no expiry detection: an expired token simply
/// makes later authenticated calls fail.
#[derive(Debug)]
pub struct AuthFlow {
    client: ApiClient,
    state: AuthState,
}

impl AuthFlow {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AuthState::Anonymous,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Adopt a token persisted by an earlier run
    pub async fn restore(&mut self) -> TripResult<AuthState> {
        self.state = if self.client.session().is_logged_in().await? {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Ok(self.state)
    }

    pub async fn register(&self, request: &RegisterRequest) -> TripResult<User> {
        let user: User = self.client.post_json("/auth/register", request).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Submit credentials as a form and persist the returned token
    pub async fn login(&mut self, username: &str, password: &str) -> TripResult<AuthResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TripError::Validation(
                "Please enter your username and password".to_string(),
            ));
        }

        let prior = self.state;
        self.state = AuthState::Authenticating;
        let result = self
            .client
            .post_form::<AuthResponse>(
                "/auth/login",
                &[("username", username.trim()), ("password", password)],
            )
            .await;

        let response = match result {
            Ok(response) if !response.access_token.is_empty() => response,
            Ok(_) => {
                self.state = prior;
                return Err(TripError::Parse(
                    "Login response did not include an access token".to_string(),
                ));
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.state = prior;
                return Err(e);
            }
        };

        if let Err(e) = self.client.session().store_token(&response.access_token).await {
            self.state = prior;
            return Err(e);
        }

        self.state = AuthState::Authenticated;
        info!("Logged in as {}", username.trim());
        Ok(response)
    }

    pub async fn logout(&mut self) -> TripResult<()> {
        self.client.session().clear_token().await?;
        self.state = AuthState::Anonymous;
        info!("Logged out");
        Ok(())
    }

    /// Profile of the logged-in user, fetched fresh every time
    pub async fn current_user(&self) -> TripResult<User> {
        self.client.get_json("/auth/me", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest::new(" ana@example.com ", "ana_b", "longenough", Some("  "))
            .unwrap();
        assert_eq!(ok.email, "ana@example.com");
        assert_eq!(ok.full_name, None);

        assert!(RegisterRequest::new("not-an-email", "ana_b", "longenough", None).is_err());
        assert!(RegisterRequest::new("a@b.c", "an", "longenough", None).is_err());
        assert!(RegisterRequest::new("a@b.c", "ana b", "longenough", None).is_err());
        assert!(RegisterRequest::new("a@b.c", "ana-b", "short", None).is_err());
    }
}
