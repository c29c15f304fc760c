
use crate::agreement::{
    model::{AgreementCreate, AgreementDetails, AgreementFilter, AgreementUpdate, Validity},
    service::AgreementService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{
    db::{query::Query, Database},
    error::ErrorInformation,
    model::{Paginated, PaginatedResults},
};
use utoipa::OpenApi;

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = AgreementService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(delete)
        .service(validity);
}

#[derive(OpenApi)]
#[openapi(
    paths(all, create, get, update, delete, validity),
    components(schemas(
        crate::agreement::model::AgreementDetails,
        crate::agreement::model::AgreementCreate,
        crate::agreement::model::AgreementUpdate,
        crate::agreement::model::Validity,
        licensing_entity::status::Status,
        licensing_common::error::ErrorInformation,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "agreement",
    operation_id = "listAgreements",
    params(
        Query,
        Paginated,
        AgreementFilter,
    ),
    responses(
        (status = 200, description = "Matching agreements", body = PaginatedResults<AgreementDetails>),
        (status = 400, description = "Invalid query", body = ErrorInformation),
    ),
)]
#[get("/v1/agreement")]
/// List license agreements
pub async fn all(
    state: web::Data<AgreementService>,
    web::Query(search): web::Query<Query>,
    web::Query(paginated): web::Query<Paginated>,
    web::Query(filter): web::Query<AgreementFilter>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_agreements(search, paginated, filter).await?))
}

#[utoipa::path(
    tag = "agreement",
    operation_id = "createAgreement",
    request_body = AgreementCreate,
    responses(
        (status = 201, description = "The created agreement", body = AgreementDetails),
        (status = 400, description = "Invalid fields or references", body = ErrorInformation),
    ),
)]
#[post("/v1/agreement")]
/// Create a license agreement
pub async fn create(
    state: web::Data<AgreementService>,
    web::Json(input): web::Json<AgreementCreate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Created().json(state.create_agreement(input).await?))
}

#[utoipa::path(
    tag = "agreement",
    operation_id = "getAgreement",
    params(
        ("id", Path, description = "ID of the agreement"),
    ),
    responses(
        (status = 200, description = "The agreement", body = AgreementDetails),
        (status = 404, description = "The agreement could not be found"),
    ),
)]
#[get("/v1/agreement/{id}")]
/// Retrieve agreement details
pub async fn get(
    state: web::Data<AgreementService>,
    id: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_agreement(*id).await?))
}

#[utoipa::path(
    tag = "agreement",
    operation_id = "updateAgreement",
    request_body = AgreementUpdate,
    params(
        ("id", Path, description = "ID of the agreement"),
    ),
    responses(
        (status = 200, description = "The updated agreement", body = AgreementDetails),
        (status = 400, description = "Invalid fields or references", body = ErrorInformation),
        (status = 404, description = "The agreement could not be found"),
    ),
)]
#[put("/v1/agreement/{id}")]
/// Update an agreement, only the given fields are changed
pub async fn update(
    state: web::Data<AgreementService>,
    id: web::Path<i32>,
    web::Json(input): web::Json<AgreementUpdate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.update_agreement(*id, input).await?))
}

#[utoipa::path(
    tag = "agreement",
    operation_id = "deleteAgreement",
    params(
        ("id", Path, description = "ID of the agreement"),
    ),
    responses(
        (status = 204, description = "The agreement was marked as deleted"),
        (status = 404, description = "The agreement could not be found"),
    ),
)]
#[delete("/v1/agreement/{id}")]
/// Delete an agreement
pub async fn delete(
    state: web::Data<AgreementService>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    state.delete_agreement(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    tag = "agreement",
    operation_id = "checkAgreementValidity",
    params(
        ("id", Path, description = "ID of the agreement"),
    ),
    responses(
        (status = 200, description = "Whether the agreement is valid today", body = Validity),
        (status = 404, description = "The agreement could not be found"),
    ),
)]
#[get("/v1/agreement/{id}/validity")]
/// Check if an agreement is still valid, as of today (UTC)
pub async fn validity(
    state: web::Data<AgreementService>,
    id: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let today = Utc::now().date_naive();
    Ok(HttpResponse::Ok().json(state.check_validity(*id, today).await?))
}
