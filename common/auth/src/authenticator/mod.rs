pub mod actix;
pub mod error;
pub mod user;

use error::AuthenticationError;
use std::sync::Arc;
use user::{UserDetails, UserInformation};

/// Looks up accounts by their credentials.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return the details of the active account matching both username and password.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserDetails>, anyhow::Error>;
}

/// Authenticates requests carrying HTTP basic credentials.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserInformation, AuthenticationError> {
        match self.store.verify(username, password).await {
            Ok(Some(details)) => Ok(UserInformation::Authenticated(details)),
            Ok(None) => {
                log::debug!("rejected credentials for '{username}'");
                Err(AuthenticationError::Failed)
            }
            Err(err) => {
                log::warn!("failed to verify credentials: {err}");
                Err(AuthenticationError::Failed)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    struct Fixed;

    #[async_trait::async_trait]
    impl CredentialStore for Fixed {
        async fn verify(
            &self,
            username: &str,
            password: &str,
        ) -> Result<Option<UserDetails>, anyhow::Error> {
            Ok((username == "admin" && password == "secret").then(|| UserDetails {
                id: 1,
                username: username.into(),
                is_staff: true,
            }))
        }
    }

    #[test(tokio::test)]
    async fn authenticate() {
        let authenticator = Authenticator::new(Arc::new(Fixed));

        let user = authenticator.authenticate("admin", "secret").await;
        assert!(matches!(
            user,
            Ok(UserInformation::Authenticated(UserDetails { id: 1, .. }))
        ));

        let user = authenticator.authenticate("admin", "wrong").await;
        assert!(matches!(user, Err(AuthenticationError::Failed)));
    }
}
