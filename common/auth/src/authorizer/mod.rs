mod require;

pub use require::*;

use crate::authenticator::{error::AuthorizationError, user::UserInformation};

#[derive(Clone, Debug)]
pub struct Authorizer {
    enabled: bool,
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Authorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Require any authenticated user.
    pub fn require_user(&self, user: &UserInformation) -> Result<(), AuthorizationError> {
        if !self.enabled {
            return Ok(());
        }

        match user {
            UserInformation::Authenticated(_) => Ok(()),
            UserInformation::Anonymous => Err(AuthorizationError::Unauthenticated),
        }
    }

    /// Require an authenticated staff member.
    pub fn require_staff(&self, user: &UserInformation) -> Result<(), AuthorizationError> {
        self.require_user(user)?;

        if !self.enabled || user.is_staff() {
            Ok(())
        } else {
            log::debug!("user is not a staff member: {user:?}");
            Err(AuthorizationError::Failed)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::authenticator::user::UserDetails;

    fn user(is_staff: bool) -> UserInformation {
        UserInformation::Authenticated(UserDetails {
            id: 1,
            username: "alice".into(),
            is_staff,
        })
    }

    #[test]
    fn disabled_allows_everyone() {
        let authorizer = Authorizer::new(false);
        assert!(authorizer.require_user(&UserInformation::Anonymous).is_ok());
        assert!(authorizer.require_staff(&UserInformation::Anonymous).is_ok());
    }

    #[test]
    fn enabled() {
        let authorizer = Authorizer::new(true);
        assert!(matches!(
            authorizer.require_user(&UserInformation::Anonymous),
            Err(AuthorizationError::Unauthenticated)
        ));
        assert!(authorizer.require_user(&user(false)).is_ok());
        assert!(matches!(
            authorizer.require_staff(&user(false)),
            Err(AuthorizationError::Failed)
        ));
        assert!(authorizer.require_staff(&user(true)).is_ok());
    }
}
