use actix_http::{header, HttpMessage, Request};
use licensing_auth::authenticator::user::{UserDetails, UserInformation};

/// Convenient way of adding (authenticated) user information to the request.
pub trait TestAuthentication: Sized {
    /// Make the request an authenticated request with the provided user details
    fn test_auth_details(self, details: UserDetails) -> Self;

    /// Make the request an authenticated request of a regular user
    fn test_auth(self, username: impl Into<String>) -> Self {
        self.test_auth_details(UserDetails {
            id: 0,
            username: username.into(),
            is_staff: false,
        })
    }
}

impl TestAuthentication for Request {
    fn test_auth_details(self, details: UserDetails) -> Self {
        test_auth(self, details)
    }
}

/// Add data making the request authenticated.
pub fn test_auth(request: Request, details: UserDetails) -> Request {
    request
        .extensions_mut()
        .insert(UserInformation::Authenticated(details));
    request
}

/// The value of a basic `Authorization` header.
pub fn basic(username: &str, password: &str) -> (header::HeaderName, String) {
    use actix_web_httpauth::headers::authorization::Basic;

    (
        header::AUTHORIZATION,
        Basic::new(username.to_string(), Some(password.to_string())).to_string(),
    )
}
