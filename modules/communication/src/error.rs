use crate::provider::SmsError;
use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use licensing_common::{db::DatabaseErrors, error::ErrorInformation, validation::FieldErrors};
use sea_orm::DbErr;
use serde_json::json;

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
    /// The message was recorded, but the provider did not take it.
    #[error("SMS {id} failed to send: {source}")]
    Provider {
        id: i32,
        #[source]
        source: SmsError,
    },
    #[error(transparent)]
    Database(anyhow::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
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
            Self::Provider { id, source } => HttpResponse::BadGateway().json(
                ErrorInformation::new("ExternalServiceError", self).with_details(json!({
                    "sms": id,
                    "retryable": source.retryable(),
                })),
            ),
            Self::Database(err) | Self::Any(err) => {
                log::warn!("internal error: {err:#}");
                HttpResponse::InternalServerError().json(ErrorInformation::new("Internal", err))
            }
        }
    }
}
