use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use licensing_auth::password::PasswordError;
use licensing_common::{
    db::DatabaseErrors, error::ErrorInformation, validation::FieldErrors,
};
use sea_orm::DbErr;
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("already exists: {0}")]
    Uniqueness(FieldErrors),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Query(#[from] licensing_common::db::query::Error),
    #[error(transparent)]
    Database(anyhow::Error),
    #[error(transparent)]
    Storage(anyhow::Error),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl Error {
    /// A validation error on a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// The field messages of validation and uniqueness errors.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) | Self::Uniqueness(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        if value.is_duplicate() {
            // lost a race against the uniqueness check
            Self::Uniqueness(FieldErrors::single(
                "non_field_errors",
                "A record with these values already exists.",
            ))
        } else {
            Self::Database(value.into())
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.into())
    }
}

impl From<FieldErrors> for Error {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Validation(errors) => HttpResponse::BadRequest().json(
                ErrorInformation::new("ValidationError", self).with_details(errors.clone()),
            ),
            Self::Uniqueness(errors) => HttpResponse::Conflict().json(
                ErrorInformation::new("UniquenessError", self).with_details(errors.clone()),
            ),
            Self::NotFound(_) => {
                HttpResponse::NotFound().json(ErrorInformation::new("NotFound", self))
            }
            Self::Query(err) => {
                HttpResponse::BadRequest().json(ErrorInformation::new("QueryError", err))
            }
            Self::Database(err) | Self::Storage(err) | Self::Any(err) => {
                log::warn!("internal error: {err:#}");
                HttpResponse::InternalServerError().json(ErrorInformation::new("Internal", err))
            }
            Self::Password(err) => {
                log::warn!("password hashing failed: {err}");
                HttpResponse::InternalServerError().json(ErrorInformation::new("Internal", err))
            }
        }
    }
}
