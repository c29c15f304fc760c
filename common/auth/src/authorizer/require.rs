use crate::{
    authenticator::{error::AuthorizationError, user::UserInformation},
    authorizer::Authorizer,
};
use actix_http::HttpMessage;
use licensing_common::error::ErrorInformation;
use std::marker::PhantomData;

/// Extractor enforcing a [`Requirement`] before the handler runs.
pub struct Require<T: Requirement>(PhantomData<T>);

#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    #[error("missing authorizer, must call .app_data(authorizer)")]
    MissingAuthorizer,
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

impl actix_web::ResponseError for RequirementError {
    fn error_response(&self) -> actix_web::HttpResponse<actix_http::body::BoxBody> {
        match self {
            Self::MissingAuthorizer => actix_web::HttpResponse::Forbidden()
                .json(ErrorInformation::new("MissingAuthorizer", self)),
            Self::Authorization(err) => err.error_response(),
        }
    }
}

pub trait Requirement {
    fn enforce(authorizer: &Authorizer, user: &UserInformation) -> Result<(), RequirementError>;
}

impl<T: Requirement> actix_web::FromRequest for Require<T> {
    type Error = RequirementError;
    type Future = core::future::Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_http::Payload,
    ) -> Self::Future {
        fn enforce<T: Requirement>(
            req: &actix_web::HttpRequest,
        ) -> Result<Require<T>, RequirementError> {
            let authorizer = req
                .app_data::<actix_web::web::Data<Authorizer>>()
                .ok_or(RequirementError::MissingAuthorizer)?;
            let ext = req.extensions();
            let user = ext.get::<UserInformation>();

            T::enforce(authorizer, user.unwrap_or(&UserInformation::Anonymous))?;

            Ok(Require(PhantomData))
        }

        core::future::ready(enforce(req))
    }
}

/// Any authenticated user
pub struct Authenticated;

impl Requirement for Authenticated {
    fn enforce(authorizer: &Authorizer, user: &UserInformation) -> Result<(), RequirementError> {
        Ok(authorizer.require_user(user)?)
    }
}

/// Staff members only
pub struct Staff;

impl Requirement for Staff {
    fn enforce(authorizer: &Authorizer, user: &UserInformation) -> Result<(), RequirementError> {
        Ok(authorizer.require_staff(user)?)
    }
}
