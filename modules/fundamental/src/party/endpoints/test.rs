use crate::test::{caller, caller_with_auth};
use actix_http::StatusCode;
use actix_web::test::TestRequest;
use licensing_test_context::{call::CallService, LicensingContext};
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;

fn alice() -> Value {
    json!({
        "first_name": "Alice",
        "last_name": "Smith",
        "mobile": "+14155550101",
        "email": "alice@example.com",
        "address": {
            "line1": "1 Main Street",
            "location": "Springfield",
            "state": "IL",
            "country": "USA",
            "zip_code": 62701
        }
    })
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn crud(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(alice())
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_web::test::read_body_json(response).await;

    let id = created["id"].as_i64().expect("must have an id");
    assert_eq!(created["full_name"], json!("Alice Smith"));
    assert_eq!(created["status"], json!("Active"));
    assert_eq!(created["address"]["city_or_village"], json!("Springfield"));

    let request = TestRequest::put()
        .uri(&format!("/api/v1/licensor/{id}"))
        .set_json(json!({"last_name": "Jones"}))
        .to_request();
    let updated: Value = app.call_and_read_body_json(request).await;
    assert_eq!(updated["full_name"], json!("Alice Jones"));
    assert_eq!(updated["address"]["id"], created["address"]["id"]);

    let request = TestRequest::get()
        .uri("/api/v1/licensor?q=jones")
        .to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(1));
    assert_eq!(list["items"][0]["id"], json!(id));

    let request = TestRequest::delete()
        .uri(&format!("/api/v1/licensor/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri(&format!("/api/v1/licensor/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["error"], json!("NotFound"));

    let request = TestRequest::get().uri("/api/v1/licensor").to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(0));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn errors(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    // missing and invalid fields
    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(json!({"first_name": "Bob", "mobile": "abc"}))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["error"], json!("ValidationError"));
    for field in ["last_name", "mobile", "email"] {
        assert!(body["details"][field].is_array(), "{field}: {body}");
    }
    assert!(body["details"]["first_name"].is_null());

    // duplicates
    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(alice())
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::CREATED);

    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(alice())
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["error"], json!("UniquenessError"));
    assert_eq!(
        body["details"]["email"],
        json!(["licensor with this email already exists."])
    );

    // bad sort field
    let request = TestRequest::get()
        .uri("/api/v1/licensor?sort=status")
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["error"], json!("QueryError"));

    // not a number
    let request = TestRequest::get().uri("/api/v1/licensor/abc").to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // not a kind of party
    let request = TestRequest::get().uri("/api/v1/licensees").to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn writes_require_authentication(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller_with_auth(ctx).await?;

    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(alice())
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // reading is fine
    let request = TestRequest::get().uri("/api/v1/licensor").to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn kinds_are_separate(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/api/v1/licensor")
        .set_json(alice())
        .to_request();
    let created: Value = app.call_and_read_body_json(request).await;
    let id = created["id"].as_i64().expect("must have an id");

    // the same mobile and email are fine for a licensee
    let request = TestRequest::post()
        .uri("/api/v1/licensee")
        .set_json(alice())
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let licensee: Value = actix_web::test::read_body_json(response).await;

    let request = TestRequest::get().uri("/api/v1/licensee").to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(1));

    let request = TestRequest::delete()
        .uri(&format!("/api/v1/licensee/{}", licensee["id"]))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // the licensor is unaffected
    let request = TestRequest::get()
        .uri(&format!("/api/v1/licensor/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn create_and_filter(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    for (name, mobile, status) in [
        ("Victor", "+14155550301", "Active"),
        ("Walter", "+14155550302", "Inactive"),
    ] {
        let request = TestRequest::post()
            .uri("/api/v1/licensee")
            .set_json(json!({
                "first_name": name,
                "last_name": "Licensee",
                "mobile": mobile,
                "email": format!("{}@example.org", name.to_lowercase()),
                "status": status,
                // not complete, so ignored
                "address": { "location": "Nowhere" }
            }))
            .to_request();
        let response = app.call_service(request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_web::test::read_body_json(response).await;
        assert_eq!(created["address"], Value::Null);
    }

    let request = TestRequest::get()
        .uri("/api/v1/licensee?status=Inactive")
        .to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(1));
    assert_eq!(list["items"][0]["first_name"], json!("Walter"));

    let request = TestRequest::get()
        .uri("/api/v1/licensee?sort=first_name:desc&limit=1")
        .to_request();
    let list: Value = app.call_and_read_body_json(request).await;
    assert_eq!(list["total"], json!(2));
    assert_eq!(list["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(list["items"][0]["first_name"], json!("Walter"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn delete_status_is_rejected(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/api/v1/licensee")
        .set_json(json!({
            "first_name": "Xavier",
            "last_name": "Licensee",
            "mobile": "+14155550303",
            "email": "xavier@example.org",
            "status": "Delete"
        }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_web::test::read_body_json(response).await;
    assert!(body["details"]["status"].is_array(), "{body}");

    Ok(())
}
