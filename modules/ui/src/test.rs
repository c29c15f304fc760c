use crate::configure;
use actix_http::{header, StatusCode};
use actix_web::{
    dev::ServiceResponse,
    test::{read_body, TestRequest},
};
use licensing_auth::{authenticator::Authenticator, authorizer::Authorizer};
use licensing_infrastructure::app::AppOptions;
use licensing_module_fundamental::{
    account::{model::AccountCreate, service::AccountService},
    party::{model::PartyCreate, service::PartyService, PartyKind},
    software::{model::SoftwareCreate, service::SoftwareService},
};
use licensing_test_context::{
    auth::basic,
    call::{self, CallService},
    LicensingContext,
};
use std::sync::Arc;
use test_context::test_context;
use test_log::test;

async fn caller(ctx: &LicensingContext) -> anyhow::Result<impl CallService> {
    let (db, storage) = (ctx.db.clone(), ctx.storage.clone());
    call::caller(|svc| configure(svc, db, storage)).await
}

async fn text(response: ServiceResponse) -> anyhow::Result<String> {
    Ok(String::from_utf8(read_body(response).await.to_vec())?)
}

fn location(response: &ServiceResponse) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

const LICENSOR: &[(&str, &str)] = &[
    ("first_name", "Ada"),
    ("last_name", "Lovelace"),
    ("mobile", "+14155550100"),
    ("email", "ada@example.com"),
    ("status", "Active"),
    ("line1", "1 Main Street"),
    ("location", "Springfield"),
    ("state", "IL"),
    ("country", "USA"),
    ("zip", "62701"),
];

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn add_licensor(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::get().uri("/license/licensor/add/").to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await?.contains(r#"name="first_name""#));

    let request = TestRequest::post()
        .uri("/license/licensor/add/")
        .set_form(LICENSOR)
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/license/licensors/"));

    let request = TestRequest::get().uri("/license/licensors/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("Springfield, USA"));

    let request = TestRequest::get().uri("/license/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("Licensors</a></td><td>1</td>"));
    assert!(html.contains("Licensees</a></td><td>0</td>"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn invalid_licensor(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/license/licensor/add/")
        .set_form([
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("mobile", "+14155550100"),
            ("email", "not-an-email"),
            ("zip", "abc"),
        ])
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = text(response).await?;
    assert!(html.contains("Enter a valid email address."));
    assert!(html.contains("Enter a whole number."));
    // the submitted values are shown again
    assert!(html.contains(r#"value="not-an-email""#));

    assert_eq!(
        PartyService::new(ctx.db.clone())
            .count(PartyKind::Licensor)
            .await?,
        0
    );

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn duplicate_mobile(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    for expected in [StatusCode::SEE_OTHER, StatusCode::UNPROCESSABLE_ENTITY] {
        let request = TestRequest::post()
            .uri("/license/licensee/add/")
            .set_form(LICENSOR)
            .to_request();
        let response = app.call_service(request).await;
        assert_eq!(response.status(), expected);

        if expected == StatusCode::UNPROCESSABLE_ENTITY {
            let html = text(response).await?;
            assert!(html.contains("licensee with this mobile already exists."));
        }
    }

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn escapes_values(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    PartyService::new(ctx.db.clone())
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                first_name: "<script>alert(1)</script>".into(),
                last_name: "Mallory".into(),
                mobile: "+14155550199".into(),
                email: "mallory@example.com".into(),
                ..Default::default()
            },
        )
        .await?;
    let app = caller(ctx).await?;

    let request = TestRequest::get().uri("/license/licensors/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; Mallory"));
    assert!(!html.contains("<script>"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn edit_and_delete_licensor(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    let service = PartyService::new(ctx.db.clone());

    let request = TestRequest::post()
        .uri("/license/licensor/add/")
        .set_form(LICENSOR)
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::SEE_OTHER);
    let id = service
        .fetch_parties(
            PartyKind::Licensor,
            Default::default(),
            Default::default(),
            Default::default(),
        )
        .await?
        .items[0]
        .id;

    let request = TestRequest::get()
        .uri(&format!("/license/licensor/{id}/edit/"))
        .to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains(r#"value="Springfield""#));
    assert!(html.contains(r#"<option value="Active" selected>"#));

    let mut form = LICENSOR.to_vec();
    form.push(("designation", "Countess"));
    let request = TestRequest::post()
        .uri(&format!("/license/licensor/{id}/edit/"))
        .set_form(form)
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::SEE_OTHER);

    let licensor = service.fetch_party(PartyKind::Licensor, id).await?;
    assert_eq!(licensor.designation.as_deref(), Some("Countess"));
    assert_eq!(
        licensor.address.map(|address| address.zip_code),
        Some(62701)
    );

    let request = TestRequest::get()
        .uri(&format!("/license/licensor/{id}/delete/"))
        .to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains(r#"Are you sure you want to delete "Ada Lovelace"?"#));

    let request = TestRequest::post()
        .uri(&format!("/license/licensor/{id}/delete/"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/license/licensors/"));

    let request = TestRequest::get()
        .uri(&format!("/license/licensor/{id}/edit/"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await?.contains("Not found"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn software(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/license/software/add/")
        .set_form([("name", ""), ("status", "Retired")])
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(response)
        .await?
        .contains("Select a valid choice. Retired is not one of the available choices."));

    let request = TestRequest::post()
        .uri("/license/software/add/")
        .set_form([("name", "Office Suite"), ("indemnity", "Patent pending")])
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::SEE_OTHER);

    let request = TestRequest::get().uri("/license/softwares/?q=office").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("Office Suite"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn add_agreement(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let party = |first_name: &str, mobile: &str| PartyCreate {
        first_name: first_name.into(),
        last_name: "Smith".into(),
        mobile: mobile.into(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        ..Default::default()
    };
    let parties = PartyService::new(ctx.db.clone());
    let licensor = parties
        .create_party(PartyKind::Licensor, party("Lena", "+14155550901"))
        .await?;
    let licensee = parties
        .create_party(PartyKind::Licensee, party("Leo", "+14155550902"))
        .await?;
    let software = SoftwareService::new(ctx.db.clone(), ctx.storage.clone())
        .create_software(SoftwareCreate {
            name: "Office Suite".into(),
            ..Default::default()
        })
        .await?;
    let app = caller(ctx).await?;

    let request = TestRequest::get().uri("/license/agreement/add/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains(&format!(r#"<option value="{}">Lena Smith</option>"#, licensor.id)));

    let (licensor, licensee, software) = (
        licensor.id.to_string(),
        licensee.id.to_string(),
        software.id.to_string(),
    );
    let mut form = vec![
        ("licensor", licensor.as_str()),
        ("licensee", licensee.as_str()),
        ("software", software.as_str()),
        ("effective_date", "2024-01-01"),
        ("expiry_date", "2023-12-31"),
        ("delivery_date", "2024-01-01"),
        ("terms_and_conditions", "All rights reserved"),
        ("price", "1500.50"),
        ("no_of_copies", "10"),
    ];

    let request = TestRequest::post()
        .uri("/license/agreement/add/")
        .set_form(&form)
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(response)
        .await?
        .contains("The expiry date must not be before the effective date."));

    form[4] = ("expiry_date", "2024-12-31");
    let request = TestRequest::post()
        .uri("/license/agreement/add/")
        .set_form(&form)
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/license/agreements/"));

    let request = TestRequest::get().uri("/license/agreements/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("Agreement between Lena Smith and Leo Smith for Office Suite"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn users(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;

    let request = TestRequest::post()
        .uri("/license/user/add/")
        .set_form([
            ("username", "clerk"),
            ("email", "clerk@example.com"),
            ("password", "short"),
        ])
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = text(response).await?;
    assert!(html.contains("Ensure this field has at least 8 characters."));
    assert!(!html.contains(r#"value="short""#));

    let request = TestRequest::post()
        .uri("/license/user/add/")
        .set_form([
            ("username", "clerk"),
            ("email", "clerk@example.com"),
            ("password", "clerk-password"),
            ("is_staff", "on"),
        ])
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::SEE_OTHER);

    let service = AccountService::new(ctx.db.clone());
    let account = service
        .fetch_accounts(Default::default(), Default::default(), Default::default())
        .await?
        .items
        .remove(0);
    assert!(account.is_staff);

    // a blank password keeps the current one
    let request = TestRequest::post()
        .uri(&format!("/license/user/{}/edit/", account.id))
        .set_form([("username", "clerk"), ("email", "clerk@example.org")])
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::SEE_OTHER);

    let account = service.fetch_account(account.id).await?;
    assert_eq!(account.email, "clerk@example.org");
    assert!(!account.is_staff);

    let request = TestRequest::get().uri("/license/users/").to_request();
    let html = text(app.call_service(request).await).await?;
    assert!(html.contains("clerk@example.org"));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn requires_login(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let accounts = AccountService::new(ctx.db.clone());
    accounts
        .create_account(AccountCreate {
            username: "clerk".into(),
            email: "clerk@example.com".into(),
            password: "clerk-password".into(),
            is_staff: false,
        })
        .await?;

    let (db, storage) = (ctx.db.clone(), ctx.storage.clone());
    let app = call::caller_with(
        AppOptions {
            authenticator: Some(Arc::new(Authenticator::new(Arc::new(accounts)))),
            authorizer: Authorizer::new(true),
            ..Default::default()
        },
        |svc| configure(svc, db, storage),
    )
    .await?;

    let request = TestRequest::get().uri("/license/").to_request();
    assert_eq!(
        app.call_service(request).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let request = TestRequest::get()
        .uri("/license/")
        .insert_header(basic("clerk", "clerk-password"))
        .to_request();
    assert_eq!(app.call_service(request).await.status(), StatusCode::OK);

    let request = TestRequest::get()
        .uri("/license/users/")
        .insert_header(basic("clerk", "clerk-password"))
        .to_request();
    assert_eq!(
        app.call_service(request).await.status(),
        StatusCode::FORBIDDEN
    );

    Ok(())
}
