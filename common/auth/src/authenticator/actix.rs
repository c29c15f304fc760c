use super::{error::AuthenticationError, Authenticator};
use actix_http::HttpMessage;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{self, Header},
    middleware::Next,
    web, Error,
};
use actix_web_httpauth::headers::authorization::{Authorization, Basic};

/// Authenticate requests carrying basic credentials, attaching the resulting user.
///
/// Requests without an `Authorization` header pass as anonymous, it is up to the
/// [`crate::authorizer::Require`] extractor to reject them. Invalid credentials fail right
/// away. Without an [`Authenticator`] registered as app data, this is a no-op.
pub async fn authenticate(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let authenticator = req.app_data::<web::Data<Authenticator>>().cloned();

    if let Some(authenticator) = authenticator {
        if req.headers().contains_key(header::AUTHORIZATION) {
            let auth = Authorization::<Basic>::parse(&req).map_err(|err| {
                log::debug!("invalid authorization header: {err}");
                AuthenticationError::Failed
            })?;
            let credentials = auth.into_scheme();

            let user = authenticator
                .authenticate(
                    credentials.user_id(),
                    credentials.password().unwrap_or_default(),
                )
                .await?;

            req.extensions_mut().insert(user);
        }
    }

    next.call(req).await
}
