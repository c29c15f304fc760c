#[cfg(test)]
mod test;

use crate::{
    common::StatusFilter,
    party::{
        model::{PartyCreate, PartyDetails, PartyUpdate},
        service::PartyService,
        PartyKind,
    },
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{
    db::{query::Query, Database},
    error::ErrorInformation,
    model::{Paginated, PaginatedResults},
};
use utoipa::OpenApi;

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = PartyService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(delete);
}

#[derive(OpenApi)]
#[openapi(
    paths(all, create, get, update, delete),
    components(schemas(
        crate::party::PartyKind,
        crate::party::model::PartyDetails,
        crate::party::model::PartyCreate,
        crate::party::model::PartyUpdate,
        crate::common::address::AddressDetails,
        crate::common::address::AddressInput,
        licensing_entity::status::Status,
        licensing_common::error::ErrorInformation,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "party",
    operation_id = "listParties",
    params(
        ("kind" = PartyKind, Path, description = "Either licensor or licensee"),
        Query,
        Paginated,
        StatusFilter,
    ),
    responses(
        (status = 200, description = "Matching parties", body = PaginatedResults<PartyDetails>),
        (status = 400, description = "Invalid query", body = ErrorInformation),
    ),
)]
#[get("/v1/{kind:licensor|licensee}")]
/// List licensors or licensees
pub async fn all(
    state: web::Data<PartyService>,
    kind: web::Path<PartyKind>,
    web::Query(search): web::Query<Query>,
    web::Query(paginated): web::Query<Paginated>,
    web::Query(filter): web::Query<StatusFilter>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(
        state
            .fetch_parties(*kind, search, paginated, filter)
            .await?,
    ))
}

#[utoipa::path(
    tag = "party",
    operation_id = "createParty",
    request_body = PartyCreate,
    params(
        ("kind" = PartyKind, Path, description = "Either licensor or licensee"),
    ),
    responses(
        (status = 201, description = "The created party", body = PartyDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 409, description = "Mobile or email already taken", body = ErrorInformation),
    ),
)]
#[post("/v1/{kind:licensor|licensee}")]
/// Create a licensor or licensee
pub async fn create(
    state: web::Data<PartyService>,
    kind: web::Path<PartyKind>,
    web::Json(input): web::Json<PartyCreate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Created().json(state.create_party(*kind, input).await?))
}

#[utoipa::path(
    tag = "party",
    operation_id = "getParty",
    params(
        ("kind" = PartyKind, Path, description = "Either licensor or licensee"),
        ("id", Path, description = "ID of the party"),
    ),
    responses(
        (status = 200, description = "The party", body = PartyDetails),
        (status = 404, description = "The party could not be found"),
    ),
)]
#[get("/v1/{kind:licensor|licensee}/{id}")]
/// Retrieve licensor or licensee details
pub async fn get(
    state: web::Data<PartyService>,
    path: web::Path<(PartyKind, i32)>,
) -> actix_web::Result<impl Responder> {
    let (kind, id) = path.into_inner();
    Ok(HttpResponse::Ok().json(state.fetch_party(kind, id).await?))
}

#[utoipa::path(
    tag = "party",
    operation_id = "updateParty",
    request_body = PartyUpdate,
    params(
        ("kind" = PartyKind, Path, description = "Either licensor or licensee"),
        ("id", Path, description = "ID of the party"),
    ),
    responses(
        (status = 200, description = "The updated party", body = PartyDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 404, description = "The party could not be found"),
        (status = 409, description = "Mobile or email already taken", body = ErrorInformation),
    ),
)]
#[put("/v1/{kind:licensor|licensee}/{id}")]
/// Update a licensor or licensee, only the given fields are changed
pub async fn update(
    state: web::Data<PartyService>,
    path: web::Path<(PartyKind, i32)>,
    web::Json(input): web::Json<PartyUpdate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    let (kind, id) = path.into_inner();
    Ok(HttpResponse::Ok().json(state.update_party(kind, id, input).await?))
}

#[utoipa::path(
    tag = "party",
    operation_id = "deleteParty",
    params(
        ("kind" = PartyKind, Path, description = "Either licensor or licensee"),
        ("id", Path, description = "ID of the party"),
    ),
    responses(
        (status = 204, description = "The party was marked as deleted"),
        (status = 404, description = "The party could not be found"),
    ),
)]
#[delete("/v1/{kind:licensor|licensee}/{id}")]
/// Delete a licensor or licensee
pub async fn delete(
    state: web::Data<PartyService>,
    path: web::Path<(PartyKind, i32)>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    let (kind, id) = path.into_inner();
    state.delete_party(kind, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
