use actix_web::{http::header, HttpResponse, ResponseError};
use licensing_common::error::ErrorInformation;

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Authentication failed")]
    Failed,
}

impl ResponseError for AuthenticationError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Failed => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="licensing""#))
                .json(ErrorInformation::new("Unauthorized", self)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Authorization failed")]
    Failed,
}

impl ResponseError for AuthorizationError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Unauthenticated => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="licensing""#))
                .json(ErrorInformation::new("Unauthorized", self)),
            Self::Failed => HttpResponse::Forbidden().json(ErrorInformation::new("Forbidden", self)),
        }
    }
}
