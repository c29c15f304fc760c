//! Pages of licensors and licensees, which share their shape.

use crate::{
    endpoints::Services,
    error::Error,
    form::{rename, Parser},
    html::{escape, link, page, see_other, status_options, table, Form},
};
use actix_web::{http::StatusCode, web, HttpResponse};
use licensing_auth::authorizer::{Authenticated, Require};
use licensing_common::{
    db::query::Query,
    model::Paginated,
    validation::FieldErrors,
};
use licensing_module_fundamental::{
    common::{address::AddressInput, StatusFilter},
    party::{
        model::{PartyCreate, PartyDetails, PartyUpdate},
        PartyKind,
    },
    Error as ServiceError,
};

fn list_url(kind: PartyKind) -> String {
    format!("/license/{}s/", kind.name())
}

fn url(kind: PartyKind, id: i32, action: &str) -> String {
    format!("/license/{}/{id}/{action}/", kind.name())
}

/// Register the pages of one kind of party.
pub fn configure(svc: &mut web::ServiceConfig, kind: PartyKind) {
    let name = kind.name();
    svc.service(
        web::resource(format!("/{name}s/")).route(web::get().to(
            move |state: web::Data<Services>,
                  web::Query(search): web::Query<Query>,
                  _: Require<Authenticated>| list(state, kind, search),
        )),
    )
    .service(
        web::resource(format!("/{name}/add/"))
            .route(web::get().to(move |_: Require<Authenticated>| async move {
                render_form(
                    kind,
                    None,
                    &PartyForm::default(),
                    &FieldErrors::new(),
                    StatusCode::OK,
                )
            }))
            .route(web::post().to(
                move |state: web::Data<Services>,
                      web::Form(form): web::Form<PartyForm>,
                      _: Require<Authenticated>| create(state, kind, form),
            )),
    )
    .service(
        web::resource(format!("/{name}/{{id}}/edit/"))
            .route(web::get().to(
                move |state: web::Data<Services>, id: web::Path<i32>, _: Require<Authenticated>| {
                    edit_form(state, kind, id.into_inner())
                },
            ))
            .route(web::post().to(
                move |state: web::Data<Services>,
                      id: web::Path<i32>,
                      web::Form(form): web::Form<PartyForm>,
                      _: Require<Authenticated>| update(state, kind, id.into_inner(), form),
            )),
    )
    .service(
        web::resource(format!("/{name}/{{id}}/delete/"))
            .route(web::get().to(
                move |state: web::Data<Services>, id: web::Path<i32>, _: Require<Authenticated>| {
                    confirm_delete(state, kind, id.into_inner())
                },
            ))
            .route(web::post().to(
                move |state: web::Data<Services>, id: web::Path<i32>, _: Require<Authenticated>| {
                    delete(state, kind, id.into_inner())
                },
            )),
    );
}

/// The flat form of a party, the address fields are part of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct PartyForm {
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub organization_name: String,
    pub mobile: String,
    pub email: String,
    pub status: String,
    pub line1: String,
    pub line2: String,
    pub location: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

const ADDRESS_FIELDS: &[(&str, &str)] = &[
    ("address.line1", "line1"),
    ("address.line2", "line2"),
    ("address.city_or_village", "location"),
    ("address.state", "state"),
    ("address.country", "country"),
    ("address.zip_code", "zip"),
];

impl PartyForm {
    fn address(&self, parser: &mut Parser) -> AddressInput {
        AddressInput {
            line1: Parser::optional(&self.line1),
            line2: Parser::optional(&self.line2),
            city_or_village: Parser::optional(&self.location),
            state: Parser::optional(&self.state),
            country: Parser::optional(&self.country),
            zip_code: parser.integer("zip", &self.zip),
        }
    }

    /// Parse and check the form, with messages named after the form fields.
    fn to_create(&self) -> Result<PartyCreate, FieldErrors> {
        let mut parser = Parser::default();
        let mut input = PartyCreate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            designation: Parser::optional(&self.designation),
            organization_name: Parser::optional(&self.organization_name),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            status: parser.status("status", &self.status),
            address: Some(self.address(&mut parser)),
        };

        let mut errors = parser.errors;
        if let Err(err) = input.prepare() {
            if let Some(fields) = err.field_errors() {
                errors.merge(rename(fields, ADDRESS_FIELDS));
            }
        }
        errors.into_result().map(|()| input)
    }

    fn to_update(&self) -> Result<PartyUpdate, FieldErrors> {
        let mut parser = Parser::default();
        let mut input = PartyUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            designation: Some(self.designation.clone()),
            organization_name: Some(self.organization_name.clone()),
            mobile: Some(self.mobile.clone()),
            email: Some(self.email.clone()),
            status: Some(parser.status("status", &self.status)),
            address: Some(self.address(&mut parser)),
        };

        let mut errors = parser.errors;
        if let Err(err) = input.prepare() {
            if let Some(fields) = err.field_errors() {
                errors.merge(rename(fields, ADDRESS_FIELDS));
            }
        }
        errors.into_result().map(|()| input)
    }
}

impl From<PartyDetails> for PartyForm {
    fn from(value: PartyDetails) -> Self {
        let address = value.address;
        let text = |value: Option<String>| value.unwrap_or_default();

        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            designation: text(value.designation),
            organization_name: text(value.organization_name),
            mobile: value.mobile,
            email: value.email,
            status: value.status.to_string(),
            line1: text(address.as_ref().and_then(|a| a.line1.clone())),
            line2: text(address.as_ref().and_then(|a| a.line2.clone())),
            location: text(address.as_ref().map(|a| a.city_or_village.clone())),
            state: text(address.as_ref().map(|a| a.state.clone())),
            country: text(address.as_ref().map(|a| a.country.clone())),
            zip: text(address.as_ref().map(|a| a.zip_code.to_string())),
        }
    }
}

async fn list(state: web::Data<Services>, kind: PartyKind, search: Query) -> Result<HttpResponse, Error> {
    let parties = state
        .parties
        .fetch_parties(kind, search.clone(), Paginated::default(), StatusFilter::default())
        .await?;

    let rows = parties
        .items
        .iter()
        .map(|party| {
            vec![
                escape(&party.full_name),
                escape(party.organization_name.as_deref().unwrap_or_default()),
                escape(&party.mobile),
                escape(&party.email),
                escape(&party.status.to_string()),
                escape(
                    &party
                        .address
                        .as_ref()
                        .map(|a| format!("{}, {}", a.city_or_village, a.country))
                        .unwrap_or_default(),
                ),
                format!(
                    "{} {}",
                    link(&url(kind, party.id, "edit"), "Edit"),
                    link(&url(kind, party.id, "delete"), "Delete")
                ),
            ]
        })
        .collect::<Vec<_>>();

    let content = format!(
        r#"<p>{add}</p>
<form method="get"><input type="search" name="q" value="{q}"> <button type="submit">Search</button></form>
{table}"#,
        add = link(&format!("/license/{}/add/", kind.name()), &format!("Add {}", kind.name())),
        q = escape(&search.q),
        table = table(
            &["Name", "Organization", "Mobile", "Email", "Status", "Address", ""],
            &rows
        ),
    );

    Ok(page(StatusCode::OK, &format!("{}s", kind.title()), &content))
}

fn render_form(
    kind: PartyKind,
    id: Option<i32>,
    form: &PartyForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> HttpResponse {
    let (title, action) = match id {
        Some(id) => (format!("Edit {}", kind.name()), url(kind, id, "edit")),
        None => (format!("Add {}", kind.name()), format!("/license/{}/add/", kind.name())),
    };

    let content = Form::new(&action, errors)
        .text("first_name", "First name", &form.first_name)
        .text("last_name", "Last name", &form.last_name)
        .text("designation", "Designation", &form.designation)
        .text("organization_name", "Organization", &form.organization_name)
        .text("mobile", "Mobile", &form.mobile)
        .input("email", "email", "Email", &form.email)
        .select("status", "Status", &status_options(), &form.status)
        .text("line1", "Address line 1", &form.line1)
        .text("line2", "Address line 2", &form.line2)
        .text("location", "City or village", &form.location)
        .text("state", "State", &form.state)
        .text("country", "Country", &form.country)
        .text("zip", "Zip code", &form.zip)
        .finish("Save");

    page(status, &title, &content)
}

/// Show the messages of validation and uniqueness failures next to the fields.
fn rejected(
    kind: PartyKind,
    id: Option<i32>,
    form: &PartyForm,
    err: ServiceError,
) -> Result<HttpResponse, Error> {
    match err.field_errors() {
        Some(errors) => {
            let errors = rename(errors, ADDRESS_FIELDS);
            Ok(render_form(kind, id, form, &errors, StatusCode::UNPROCESSABLE_ENTITY))
        }
        None => Err(err.into()),
    }
}

async fn create(
    state: web::Data<Services>,
    kind: PartyKind,
    form: PartyForm,
) -> Result<HttpResponse, Error> {
    let input = match form.to_create() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(render_form(kind, None, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY))
        }
    };

    match state.parties.create_party(kind, input).await {
        Ok(party) => {
            log::info!("{} {} added through the UI", kind.name(), party.id);
            Ok(see_other(&list_url(kind)))
        }
        Err(err) => rejected(kind, None, &form, err),
    }
}

async fn edit_form(state: web::Data<Services>, kind: PartyKind, id: i32) -> Result<HttpResponse, Error> {
    let party = state.parties.fetch_party(kind, id).await?;
    Ok(render_form(
        kind,
        Some(id),
        &party.into(),
        &FieldErrors::new(),
        StatusCode::OK,
    ))
}

async fn update(
    state: web::Data<Services>,
    kind: PartyKind,
    id: i32,
    form: PartyForm,
) -> Result<HttpResponse, Error> {
    let input = match form.to_update() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(render_form(
                kind,
                Some(id),
                &form,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            ))
        }
    };

    match state.parties.update_party(kind, id, input).await {
        Ok(_) => Ok(see_other(&list_url(kind))),
        Err(err) => rejected(kind, Some(id), &form, err),
    }
}

async fn confirm_delete(
    state: web::Data<Services>,
    kind: PartyKind,
    id: i32,
) -> Result<HttpResponse, Error> {
    let party = state.parties.fetch_party(kind, id).await?;
    let content = format!(
        r#"<form method="post" action="{action}">
<p>Are you sure you want to delete "{name}"?</p>
<p><button type="submit">Yes, delete</button> {cancel}</p>
</form>"#,
        action = escape(&url(kind, id, "delete")),
        name = escape(&party.full_name),
        cancel = link(&list_url(kind), "Cancel"),
    );

    Ok(page(StatusCode::OK, &format!("Delete {}", kind.name()), &content))
}

async fn delete(state: web::Data<Services>, kind: PartyKind, id: i32) -> Result<HttpResponse, Error> {
    state.parties.delete_party(kind, id).await?;
    Ok(see_other(&list_url(kind)))
}
