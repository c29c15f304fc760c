
use crate::{
    common::StatusFilter,
    software::{
        model::{SoftwareCreate, SoftwareDetails, SoftwareUpdate, UserGuideUpload},
        service::SoftwareService,
    },
};
use actix_web::{
    delete, get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, put, web, HttpResponse, Responder,
};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{
    db::{query::Query, Database},
    error::ErrorInformation,
    model::{Paginated, PaginatedResults},
};
use licensing_module_storage::service::fs::FileSystemBackend;
use utoipa::OpenApi;

pub fn configure(config: &mut web::ServiceConfig, db: Database, storage: FileSystemBackend) {
    let service = SoftwareService::new(db, storage);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(delete)
        .service(upload_user_guide)
        .service(download_user_guide);
}

#[derive(OpenApi)]
#[openapi(
    paths(all, create, get, update, delete, upload_user_guide, download_user_guide),
    components(schemas(
        crate::software::model::SoftwareDetails,
        crate::software::model::SoftwareCreate,
        crate::software::model::SoftwareUpdate,
        licensing_entity::status::Status,
        licensing_common::error::ErrorInformation,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "software",
    operation_id = "listSoftwares",
    params(
        Query,
        Paginated,
        StatusFilter,
    ),
    responses(
        (status = 200, description = "Matching softwares", body = PaginatedResults<SoftwareDetails>),
        (status = 400, description = "Invalid query", body = ErrorInformation),
    ),
)]
#[get("/v1/software")]
/// List softwares
pub async fn all(
    state: web::Data<SoftwareService>,
    web::Query(search): web::Query<Query>,
    web::Query(paginated): web::Query<Paginated>,
    web::Query(filter): web::Query<StatusFilter>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_softwares(search, paginated, filter).await?))
}

#[utoipa::path(
    tag = "software",
    operation_id = "createSoftware",
    request_body = SoftwareCreate,
    responses(
        (status = 201, description = "The created software", body = SoftwareDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
    ),
)]
#[post("/v1/software")]
/// Create a software
pub async fn create(
    state: web::Data<SoftwareService>,
    web::Json(input): web::Json<SoftwareCreate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Created().json(state.create_software(input).await?))
}

#[utoipa::path(
    tag = "software",
    operation_id = "getSoftware",
    params(
        ("id", Path, description = "ID of the software"),
    ),
    responses(
        (status = 200, description = "The software", body = SoftwareDetails),
        (status = 404, description = "The software could not be found"),
    ),
)]
#[get("/v1/software/{id}")]
/// Retrieve software details
pub async fn get(
    state: web::Data<SoftwareService>,
    id: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_software(*id).await?))
}

#[utoipa::path(
    tag = "software",
    operation_id = "updateSoftware",
    request_body = SoftwareUpdate,
    params(
        ("id", Path, description = "ID of the software"),
    ),
    responses(
        (status = 200, description = "The updated software", body = SoftwareDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 404, description = "The software could not be found"),
    ),
)]
#[put("/v1/software/{id}")]
/// Update a software, only the given fields are changed
pub async fn update(
    state: web::Data<SoftwareService>,
    id: web::Path<i32>,
    web::Json(input): web::Json<SoftwareUpdate>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.update_software(*id, input).await?))
}

#[utoipa::path(
    tag = "software",
    operation_id = "deleteSoftware",
    params(
        ("id", Path, description = "ID of the software"),
    ),
    responses(
        (status = 204, description = "The software was marked as deleted"),
        (status = 404, description = "The software could not be found"),
    ),
)]
#[delete("/v1/software/{id}")]
/// Delete a software
pub async fn delete(
    state: web::Data<SoftwareService>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    state.delete_software(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    tag = "software",
    operation_id = "uploadUserGuide",
    request_body = Vec<u8>,
    params(
        ("id", Path, description = "ID of the software"),
        UserGuideUpload,
    ),
    responses(
        (status = 200, description = "The user guide was stored", body = SoftwareDetails),
        (status = 404, description = "The software could not be found"),
    ),
)]
#[put("/v1/software/{id}/user-guide")]
/// Upload the user guide of a software, replacing the current one
pub async fn upload_user_guide(
    state: web::Data<SoftwareService>,
    id: web::Path<i32>,
    web::Query(UserGuideUpload { filename }): web::Query<UserGuideUpload>,
    _: Require<Authenticated>,
    payload: web::Payload,
) -> actix_web::Result<impl Responder> {
    let filename = filename.unwrap_or_else(|| "user-guide".to_string());
    Ok(HttpResponse::Ok().json(state.upload_user_guide(*id, &filename, payload).await?))
}

#[utoipa::path(
    tag = "software",
    operation_id = "downloadUserGuide",
    params(
        ("id", Path, description = "ID of the software"),
    ),
    responses(
        (status = 200, description = "The user guide", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "The software or its user guide could not be found"),
    ),
)]
#[get("/v1/software/{id}/user-guide")]
/// Download the user guide of a software
pub async fn download_user_guide(
    state: web::Data<SoftwareService>,
    id: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let (filename, stream) = state.download_user_guide(*id).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .streaming(stream))
}
