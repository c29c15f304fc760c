pub mod http;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::{from_fn, Compress, Condition, Logger},
    web, App, Error, HttpRequest, HttpResponse,
};
use licensing_auth::{
    authenticator::{actix::authenticate, Authenticator},
    authorizer::Authorizer,
};
use licensing_common::error::ErrorInformation;
use std::{fmt::Display, sync::Arc};

#[derive(Default)]
pub struct AppOptions {
    pub authenticator: Option<Arc<Authenticator>>,
    pub authorizer: Authorizer,
    pub logger: Option<Logger>,
    pub json_limit: Option<usize>,
}

/// Turn an extractor failure into a `400 Bad Request` carrying [`ErrorInformation`].
fn bad_request<E>(
    error: &'static str,
) -> impl Fn(E, &HttpRequest) -> Error + Clone + Send + Sync + 'static
where
    E: Display + std::fmt::Debug + 'static,
{
    move |err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorInformation::new(error, &err));
        InternalError::from_response(err, response).into()
    }
}

/// Build a new HTTP app in a consistent way.
///
/// The order of execution is last added becomes first to be executed.
pub fn new_app(
    options: AppOptions,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let mut json = web::JsonConfig::default().error_handler(bad_request("JsonPayload"));
    if let Some(limit) = options.json_limit {
        json = json.limit(limit);
    }

    let mut app = App::new()
        .app_data(json)
        .app_data(web::QueryConfig::default().error_handler(bad_request("Query")))
        .app_data(web::PathConfig::default().error_handler(bad_request("Path")));

    if let Some(authenticator) = options.authenticator {
        app = app.app_data(web::Data::from(authenticator));
    }

    let (enabled, logger) = match options.logger {
        Some(logger) => (true, logger),
        None => (false, Logger::default()),
    };

    app
        // Handle authentication, might fail and return early
        .wrap(from_fn(authenticate))
        // Handle authorization
        .app_data(web::Data::new(options.authorizer))
        // Compress everything
        .wrap(Compress::default())
        // First log the request, so that we know what happens (can't fail)
        .wrap(Condition::new(enabled, logger))
}
