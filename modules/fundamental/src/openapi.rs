use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/api", api = crate::account::endpoints::ApiDoc),
        (path = "/api", api = crate::agreement::endpoints::ApiDoc),
        (path = "/api", api = crate::party::endpoints::ApiDoc),
        (path = "/api", api = crate::software::endpoints::ApiDoc),
    ),
    tags(
        (name = "account", description = "Login accounts"),
        (name = "agreement", description = "License agreements"),
        (name = "party", description = "Licensors granting licenses and licensees holding them"),
        (name = "software", description = "Licensed software"),
    ),
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
