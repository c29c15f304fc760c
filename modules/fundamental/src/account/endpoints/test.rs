use crate::{
    account::{model::AccountCreate, service::AccountService},
    test::caller_with_auth,
};
use actix_http::StatusCode;
use actix_web::test::TestRequest;
use licensing_test_context::{auth::basic, call::CallService, LicensingContext};
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;

async fn create(ctx: &LicensingContext, username: &str, is_staff: bool) -> anyhow::Result<i32> {
    let account = AccountService::new(ctx.db.clone())
        .create_account(AccountCreate {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: format!("{username}-password"),
            is_staff,
        })
        .await?;
    Ok(account.id)
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn staff_only(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    create(ctx, "admin", true).await?;
    create(ctx, "clerk", false).await?;
    let app = caller_with_auth(ctx).await?;

    let request = TestRequest::get().uri("/api/v1/account").to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = TestRequest::get()
        .uri("/api/v1/account")
        .insert_header(basic("clerk", "clerk-password"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = TestRequest::get()
        .uri("/api/v1/account")
        .insert_header(basic("admin", "wrong-password"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = TestRequest::get()
        .uri("/api/v1/account?sort=username")
        .insert_header(basic("admin", "admin-password"))
        .to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(2));
    assert_eq!(list["items"][0]["username"], json!("admin"));
    assert!(list["items"][0].get("password_hash").is_none());

    let request = TestRequest::post()
        .uri("/api/v1/account")
        .insert_header(basic("admin", "admin-password"))
        .set_json(json!({
            "username": "auditor",
            "email": "auditor@example.com",
            "password": "auditor-password",
        }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(created["is_staff"], json!(false));

    // the new account can write
    let request = TestRequest::post()
        .uri("/api/v1/software")
        .insert_header(basic("auditor", "auditor-password"))
        .set_json(json!({"name": "Ledger"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = created["id"].as_i64().expect("must have an id");
    let request = TestRequest::delete()
        .uri(&format!("/api/v1/account/{id}"))
        .insert_header(basic("admin", "admin-password"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // but no longer after being deactivated
    let request = TestRequest::post()
        .uri("/api/v1/software")
        .insert_header(basic("auditor", "auditor-password"))
        .set_json(json!({"name": "Ledger"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn change_own_password(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    create(ctx, "clerk", false).await?;
    let app = caller_with_auth(ctx).await?;

    let request = TestRequest::put()
        .uri("/api/v1/account/me/password")
        .set_json(json!({"old_password": "clerk-password", "new_password": "clerk-secret-2"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = TestRequest::put()
        .uri("/api/v1/account/me/password")
        .insert_header(basic("clerk", "clerk-password"))
        .set_json(json!({"old_password": "not-it", "new_password": "clerk-secret-2"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert!(body["details"]["old_password"].is_array(), "{body}");

    let request = TestRequest::put()
        .uri("/api/v1/account/me/password")
        .insert_header(basic("clerk", "clerk-password"))
        .set_json(json!({"old_password": "clerk-password", "new_password": "clerk-secret-2"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri("/api/v1/software")
        .insert_header(basic("clerk", "clerk-secret-2"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
