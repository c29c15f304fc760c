use crate::{
    endpoints::Services,
    error::Error,
    form::Parser,
    html::{escape, link, page, see_other, status_options, table, Form},
};
use actix_web::{get, http::StatusCode, post, web, HttpResponse, Responder};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{db::query::Query, model::Paginated, validation::FieldErrors};
use licensing_module_fundamental::{
    common::StatusFilter,
    software::model::{SoftwareCreate, SoftwareDetails, SoftwareUpdate},
    Error as ServiceError,
};

const LIST: &str = "/license/softwares/";

pub fn configure(svc: &mut web::ServiceConfig) {
    svc.service(list)
        .service(add_form)
        .service(add)
        .service(edit_form)
        .service(edit)
        .service(confirm_delete)
        .service(delete);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct SoftwareForm {
    pub name: String,
    pub specification: String,
    pub indemnity: String,
    pub status: String,
}

impl From<SoftwareDetails> for SoftwareForm {
    fn from(value: SoftwareDetails) -> Self {
        Self {
            name: value.name,
            specification: value.specification.unwrap_or_default(),
            indemnity: value.indemnity.unwrap_or_default(),
            status: value.status.to_string(),
        }
    }
}

fn render_form(
    id: Option<i32>,
    form: &SoftwareForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> HttpResponse {
    let (title, action) = match id {
        Some(id) => ("Edit software", format!("/license/software/{id}/edit/")),
        None => ("Add software", "/license/software/add/".to_string()),
    };

    let mut content = Form::new(&action, errors)
        .text("name", "Name", &form.name)
        .textarea("specification", "Specification", &form.specification)
        .textarea("indemnity", "Indemnity", &form.indemnity)
        .select("status", "Status", &status_options(), &form.status)
        .finish("Save");
    if let Some(id) = id {
        content.push_str(&format!(
            "\n<p>The user guide is uploaded through the API, {}.</p>",
            link(&format!("/api/v1/software/{id}/user-guide"), "download the current one")
        ));
    }

    page(status, title, &content)
}

fn rejected(id: Option<i32>, form: &SoftwareForm, err: ServiceError) -> Result<HttpResponse, Error> {
    match err.field_errors() {
        Some(errors) => Ok(render_form(id, form, errors, StatusCode::UNPROCESSABLE_ENTITY)),
        None => Err(err.into()),
    }
}

#[get("/softwares/")]
async fn list(
    state: web::Data<Services>,
    web::Query(search): web::Query<Query>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    let softwares = state
        .softwares
        .fetch_softwares(search.clone(), Paginated::default(), StatusFilter::default())
        .await?;

    let rows = softwares
        .items
        .iter()
        .map(|software| {
            let guide = match software.user_guide_document {
                Some(_) => link(
                    &format!("/api/v1/software/{}/user-guide", software.id),
                    "Download",
                ),
                None => String::new(),
            };
            vec![
                escape(&software.name),
                escape(&software.status.to_string()),
                guide,
                format!(
                    "{} {}",
                    link(&format!("/license/software/{}/edit/", software.id), "Edit"),
                    link(&format!("/license/software/{}/delete/", software.id), "Delete")
                ),
            ]
        })
        .collect::<Vec<_>>();

    let content = format!(
        r#"<p>{add}</p>
<form method="get"><input type="search" name="q" value="{q}"> <button type="submit">Search</button></form>
{table}"#,
        add = link("/license/software/add/", "Add software"),
        q = escape(&search.q),
        table = table(&["Name", "Status", "User guide", ""], &rows),
    );

    Ok(page(StatusCode::OK, "Softwares", &content))
}

#[get("/software/add/")]
async fn add_form(_: Require<Authenticated>) -> impl Responder {
    render_form(None, &SoftwareForm::default(), &FieldErrors::new(), StatusCode::OK)
}

#[post("/software/add/")]
async fn add(
    state: web::Data<Services>,
    web::Form(form): web::Form<SoftwareForm>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let mut parser = Parser::default();
    let input = SoftwareCreate {
        name: form.name.clone(),
        specification: Parser::optional(&form.specification),
        indemnity: Parser::optional(&form.indemnity),
        status: parser.status("status", &form.status),
    };
    if let Err(errors) = parser.finish() {
        return Ok(render_form(None, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY));
    }

    match state.softwares.create_software(input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(None, &form, err),
    }
}

#[get("/software/{id}/edit/")]
async fn edit_form(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    let software = state.softwares.fetch_software(*id).await?;
    Ok(render_form(
        Some(*id),
        &software.into(),
        &FieldErrors::new(),
        StatusCode::OK,
    ))
}

#[post("/software/{id}/edit/")]
async fn edit(
    state: web::Data<Services>,
    id: web::Path<i32>,
    web::Form(form): web::Form<SoftwareForm>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let mut parser = Parser::default();
    let input = SoftwareUpdate {
        name: Some(form.name.clone()),
        specification: Some(form.specification.clone()),
        indemnity: Some(form.indemnity.clone()),
        status: Some(parser.status("status", &form.status)),
    };
    if let Err(errors) = parser.finish() {
        return Ok(render_form(Some(*id), &form, &errors, StatusCode::UNPROCESSABLE_ENTITY));
    }

    match state.softwares.update_software(*id, input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(Some(*id), &form, err),
    }
}

#[get("/software/{id}/delete/")]
async fn confirm_delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    let software = state.softwares.fetch_software(*id).await?;
    let content = format!(
        r#"<form method="post" action="/license/software/{id}/delete/">
<p>Are you sure you want to delete "{name}"?</p>
<p><button type="submit">Yes, delete</button> {cancel}</p>
</form>"#,
        id = *id,
        name = escape(&software.name),
        cancel = link(LIST, "Cancel"),
    );

    Ok(page(StatusCode::OK, "Delete software", &content))
}

#[post("/software/{id}/delete/")]
async fn delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    state.softwares.delete_software(*id).await?;
    Ok(see_other(LIST))
}
