#[cfg(test)]
mod test;

use crate::account::{
    model::{AccountCreate, AccountDetails, AccountFilter, AccountUpdate, PasswordChange},
    service::AccountService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use licensing_auth::{
    authenticator::user::UserInformation,
    authorizer::{Authenticated, Require, Staff},
};
use licensing_common::{
    db::{query::Query, Database},
    error::ErrorInformation,
    model::{Paginated, PaginatedResults},
};
use utoipa::OpenApi;

pub fn configure(config: &mut web::ServiceConfig, db: Database) {
    let service = AccountService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(delete)
        .service(change_password);
}

#[derive(OpenApi)]
#[openapi(
    paths(all, create, get, update, delete, change_password),
    components(schemas(
        crate::account::model::AccountDetails,
        crate::account::model::AccountCreate,
        crate::account::model::AccountUpdate,
        crate::account::model::PasswordChange,
        licensing_common::error::ErrorInformation,
    )),
    tags()
)]
pub struct ApiDoc;

#[utoipa::path(
    tag = "account",
    operation_id = "listAccounts",
    params(
        Query,
        Paginated,
        AccountFilter,
    ),
    responses(
        (status = 200, description = "Matching accounts", body = PaginatedResults<AccountDetails>),
        (status = 400, description = "Invalid query", body = ErrorInformation),
        (status = 403, description = "Not a staff member", body = ErrorInformation),
    ),
)]
#[get("/v1/account")]
/// List active accounts
pub async fn all(
    state: web::Data<AccountService>,
    web::Query(search): web::Query<Query>,
    web::Query(paginated): web::Query<Paginated>,
    web::Query(filter): web::Query<AccountFilter>,
    _: Require<Staff>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_accounts(search, paginated, filter).await?))
}

#[utoipa::path(
    tag = "account",
    operation_id = "createAccount",
    request_body = AccountCreate,
    responses(
        (status = 201, description = "The created account", body = AccountDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 409, description = "The username is taken", body = ErrorInformation),
    ),
)]
#[post("/v1/account")]
/// Create an account
pub async fn create(
    state: web::Data<AccountService>,
    web::Json(input): web::Json<AccountCreate>,
    _: Require<Staff>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Created().json(state.create_account(input).await?))
}

#[utoipa::path(
    tag = "account",
    operation_id = "getAccount",
    params(
        ("id", Path, description = "ID of the account"),
    ),
    responses(
        (status = 200, description = "The account", body = AccountDetails),
        (status = 404, description = "The account could not be found"),
    ),
)]
#[get("/v1/account/{id}")]
/// Retrieve account details
pub async fn get(
    state: web::Data<AccountService>,
    id: web::Path<i32>,
    _: Require<Staff>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.fetch_account(*id).await?))
}

#[utoipa::path(
    tag = "account",
    operation_id = "updateAccount",
    request_body = AccountUpdate,
    params(
        ("id", Path, description = "ID of the account"),
    ),
    responses(
        (status = 200, description = "The updated account", body = AccountDetails),
        (status = 400, description = "Invalid fields", body = ErrorInformation),
        (status = 404, description = "The account could not be found"),
    ),
)]
#[put("/v1/account/{id}")]
/// Update an account, only the given fields are changed
pub async fn update(
    state: web::Data<AccountService>,
    id: web::Path<i32>,
    web::Json(input): web::Json<AccountUpdate>,
    _: Require<Staff>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(state.update_account(*id, input).await?))
}

#[utoipa::path(
    tag = "account",
    operation_id = "deleteAccount",
    params(
        ("id", Path, description = "ID of the account"),
    ),
    responses(
        (status = 204, description = "The account was deactivated"),
        (status = 404, description = "The account could not be found"),
    ),
)]
#[delete("/v1/account/{id}")]
/// Deactivate an account
pub async fn delete(
    state: web::Data<AccountService>,
    id: web::Path<i32>,
    _: Require<Staff>,
) -> actix_web::Result<impl Responder> {
    state.delete_account(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    tag = "account",
    operation_id = "changePassword",
    request_body = PasswordChange,
    responses(
        (status = 204, description = "The password was changed"),
        (status = 400, description = "Wrong old password, or an invalid new one", body = ErrorInformation),
        (status = 401, description = "Not logged in", body = ErrorInformation),
    ),
)]
#[put("/v1/account/me/password")]
/// Change the password of the current user
pub async fn change_password(
    state: web::Data<AccountService>,
    user: UserInformation,
    web::Json(input): web::Json<PasswordChange>,
    _: Require<Authenticated>,
) -> actix_web::Result<impl Responder> {
    let Some(details) = user.details() else {
        // only with authentication disabled
        return Ok(HttpResponse::NotFound().json(ErrorInformation::new(
            "NotFound",
            "no current user, authentication is disabled",
        )));
    };

    state.change_password(details.id, input).await?;
    Ok(HttpResponse::NoContent().finish())
}
