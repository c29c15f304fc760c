use crate::{
    endpoints::Services,
    error::Error,
    html::{link, page, table},
};
use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_module_fundamental::party::PartyKind;

#[get("")]
async fn root() -> impl Responder {
    crate::html::see_other("/license/")
}

/// How many of each record there are.
#[get("/")]
async fn index(
    state: web::Data<Services>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let counts = [
        ("Licensors", "/license/licensors/", state.parties.count(PartyKind::Licensor).await?),
        ("Licensees", "/license/licensees/", state.parties.count(PartyKind::Licensee).await?),
        ("Softwares", "/license/softwares/", state.softwares.count().await?),
        ("Agreements", "/license/agreements/", state.agreements.count().await?),
    ];

    let rows = counts
        .iter()
        .map(|(label, href, count)| vec![link(href, label), count.to_string()])
        .collect::<Vec<_>>();

    Ok(page(StatusCode::OK, "Dashboard", &table(&["", "Total"], &rows)))
}

pub fn configure(svc: &mut web::ServiceConfig) {
    svc.service(root).service(index);
}
