
use crate::{
    model::{SmsDetails, SmsFilter, SmsSend},
    provider::SmsProvider,
    service::SmsService,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{
    db::{query::Query, Database},
    error::ErrorInformation,
    model::{Paginated, PaginatedResults},
};
use std::sync::Arc;
use utoipa::OpenApi;

pub fn configure(config: &mut web::ServiceConfig, db: Database, provider: Arc<dyn SmsProvider>) {
    let service = SmsService::new(db, provider);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(send)
        .service(get)
        .service(delete);
}

#[derive(OpenApi)]
#[openapi(
    nest((path = "/api", api = SmsApi)),
    tags((name = "sms", description = "Text messages")),
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(all, send, get, delete),
    components(schemas(SmsDetails, SmsSend, licensing_entity::status::MessageStatus)),
    tags()
)]
struct SmsApi;

#[utoipa::path(
    tag = "sms",
    operation_id = "listSms",
    params(
        Query,
        Paginated,
        SmsFilter,
    ),
    responses(
        (status = 200, description = "Matching messages", body = PaginatedResults<SmsDetails>),
        (status = 400, description = "Invalid query", body = ErrorInformation),
    ),
)]
#[get("/v1/sms")]
/// List recorded text messages
pub async fn all(
    state: web::Data<SmsService>,
    web::Query(search): web::Query<Query>,
    web::Query(paginated): web::Query<Paginated>,
    web::Query(filter): web::Query<SmsFilter>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_messages(search, paginated, filter).await?))
}

#[utoipa::path(
    tag = "sms",
    operation_id = "sendSms",
    request_body = SmsSend,
    responses(
        (status = 201, description = "The message was sent", body = SmsDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 409, description = "A message to this number was sent already", body = ErrorInformation),
        (status = 502, description = "The provider failed, the message stays pending until sent again", body = ErrorInformation),
    ),
)]
#[post("/v1/sms")]
/// Send a text message
pub async fn send(
    state: web::Data<SmsService>,
    web::Json(input): web::Json<SmsSend>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Created().json(state.send(input).await?))
}

#[utoipa::path(
    tag = "sms",
    operation_id = "getSms",
    params(
        ("id", Path, description = "ID of the message"),
    ),
    responses(
        (status = 200, description = "The message", body = SmsDetails),
        (status = 404, description = "The message could not be found"),
    ),
)]
#[get("/v1/sms/{id}")]
/// Retrieve a text message
pub async fn get(
    state: web::Data<SmsService>,
    id: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_message(*id).await?))
}

#[utoipa::path(
    tag = "sms",
    operation_id = "deleteSms",
    params(
        ("id", Path, description = "ID of the message"),
    ),
    responses(
        (status = 204, description = "The message was marked as deleted"),
        (status = 404, description = "The message could not be found"),
    ),
)]
#[delete("/v1/sms/{id}")]
/// Delete a text message
pub async fn delete(
    state: web::Data<SmsService>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    state.delete_message(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}
