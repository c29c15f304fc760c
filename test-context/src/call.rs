use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    web, Error,
};
use bytes::Bytes;
use licensing_infrastructure::app::{new_app, AppOptions};
use serde::de::DeserializeOwned;
use std::future::Future;

/// A trait wrapping an `impl Service` in a way that we can pass it as a reference.
pub trait CallService {
    fn call_service(&self, s: Request) -> impl Future<Output = ServiceResponse>;
    fn call_and_read_body(&self, r: Request) -> impl Future<Output = Bytes>;
    fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> impl Future<Output = T>;
}

impl<S, B> CallService for S
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody + 'static,
{
    async fn call_service(&self, r: Request) -> ServiceResponse {
        actix_web::test::call_service(self, r)
            .await
            .map_into_boxed_body()
    }

    async fn call_and_read_body(&self, r: Request) -> Bytes {
        actix_web::test::call_and_read_body(self, r).await
    }

    async fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> T {
        actix_web::test::call_and_read_body_json(self, r).await
    }
}

/// Create a test service with the default app setup, authentication being disabled.
pub async fn caller<F>(configure: F) -> anyhow::Result<impl CallService>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    caller_with(AppOptions::default(), configure).await
}

/// Create a test service with custom app options, e.g. an enabled authenticator.
pub async fn caller_with<F>(options: AppOptions, configure: F) -> anyhow::Result<impl CallService>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    Ok(actix_web::test::init_service(new_app(options).configure(configure)).await)
}
