use actix_http::HttpMessage;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::convert::Infallible;
use std::future::{ready, Ready};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserDetails {
    /// the account id
    pub id: i32,
    pub username: String,
    /// staff members may manage accounts
    pub is_staff: bool,
}

/// The identity a request was made with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UserInformation {
    Authenticated(UserDetails),
    #[default]
    Anonymous,
}

impl UserInformation {
    pub fn details(&self) -> Option<&UserDetails> {
        match self {
            Self::Authenticated(details) => Some(details),
            Self::Anonymous => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.details().is_some_and(|details| details.is_staff)
    }
}

impl FromRequest for UserInformation {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<UserInformation>()
            .cloned()
            .unwrap_or_default()))
    }
}
