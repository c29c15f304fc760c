use actix_web::web;
use licensing_common::db::Database;
use licensing_module_communication::provider::SmsProvider;
use licensing_module_storage::service::fs::FileSystemBackend;
use std::sync::Arc;

/// Everything the modules need to serve requests.
#[derive(Clone)]
pub struct Config {
    pub db: Database,
    pub storage: FileSystemBackend,
    pub sms: Arc<dyn SmsProvider>,
}

/// Mount the REST API below `/api` and the pages below `/license`.
pub fn configure(svc: &mut web::ServiceConfig, config: Config) {
    let Config { db, storage, sms } = config;

    svc.service(web::scope("/api").configure(|svc| {
        licensing_module_fundamental::configure(svc, db.clone(), storage.clone());
        licensing_module_communication::configure(svc, db.clone(), sms);
    }));

    licensing_module_ui::configure(svc, db, storage);
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_http::StatusCode;
    use actix_web::test::TestRequest;
    use licensing_module_communication::provider::Disabled;
    use licensing_test_context::{
        call::{self, CallService},
        LicensingContext,
    };
    use serde_json::{json, Value};
    use test_context::test_context;
    use test_log::test;

    #[test_context(LicensingContext)]
    #[test(actix_web::test)]
    async fn api_and_pages(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
        let config = Config {
            db: ctx.db.clone(),
            storage: ctx.storage.clone(),
            sms: Arc::new(Disabled),
        };
        let app = call::caller(|svc| configure(svc, config)).await?;

        let request = TestRequest::post()
            .uri("/api/v1/licensor")
            .set_json(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "mobile": "+14155550100",
                "email": "ada@example.com",
            }))
            .to_request();
        assert_eq!(app.call_service(request).await.status(), StatusCode::CREATED);

        let request = TestRequest::get().uri("/api/v1/sms").to_request();
        let list: Value = app.call_and_read_body_json(request).await;
        assert_eq!(list["total"], json!(0));

        let request = TestRequest::get().uri("/license/").to_request();
        let body = app.call_and_read_body(request).await;
        assert!(String::from_utf8(body.to_vec())?.contains("Licensors</a></td><td>1</td>"));

        // without a provider, sending fails and is not retryable
        let request = TestRequest::post()
            .uri("/api/v1/sms")
            .set_json(json!({"mobile": "+14155550100", "message": "Hello"}))
            .to_request();
        let response = app.call_service(request).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        Ok(())
    }
}
