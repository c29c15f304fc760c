use utoipa::OpenApi;

/// The document of the complete REST API.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = licensing_module_fundamental::openapi();
    doc.merge(licensing_module_communication::endpoints::ApiDoc::openapi());
    doc.info.title = "Software Licensing".into();
    doc.info.version = env!("CARGO_PKG_VERSION").into();

    doc
}
