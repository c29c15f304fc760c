use crate::html::{escape, page};
use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use licensing_module_fundamental::Error as ServiceError;

/// Failures rendered as a page, rather than being shown next to form fields.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Query(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Validation(_) | ServiceError::Uniqueness(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let (title, message) = match status {
            StatusCode::NOT_FOUND => ("Not found", self.to_string()),
            StatusCode::INTERNAL_SERVER_ERROR => {
                log::warn!("failed to render page: {self}");
                ("Error", "Something went wrong, please try again.".to_string())
            }
            _ => ("Invalid request", self.to_string()),
        };

        page(status, title, &format!("<p>{}</p>", escape(&message)))
    }
}
