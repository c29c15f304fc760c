//! Agreement pages, with the parties and softwares to choose from.

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
    agreement::model::{AgreementCreate, AgreementDetails, AgreementFilter, AgreementUpdate},
    common::StatusFilter,
    party::PartyKind,
    Error as ServiceError,
};
use std::collections::HashMap;

const LIST: &str = "/license/agreements/";

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
pub struct AgreementForm {
    pub effective_date: String,
    pub expiry_date: String,
    pub delivery_date: String,
    pub licensor: String,
    pub licensee: String,
    pub software: String,
    pub valid_ip_addresses: String,
    pub terms_and_conditions: String,
    pub limitation_of_liability: String,
    pub termination: String,
    pub price: String,
    pub payment_plan: String,
    pub no_of_copies: String,
    pub warranty_period: String,
    pub maintenance_agreement: String,
    pub status: String,
}

impl From<AgreementDetails> for AgreementForm {
    fn from(value: AgreementDetails) -> Self {
        Self {
            effective_date: value.effective_date.to_string(),
            expiry_date: value.expiry_date.to_string(),
            delivery_date: value.delivery_date.to_string(),
            licensor: value.licensor.to_string(),
            licensee: value.licensee.to_string(),
            software: value.software.to_string(),
            valid_ip_addresses: value.valid_ip_addresses.unwrap_or_default(),
            terms_and_conditions: value.terms_and_conditions,
            limitation_of_liability: value.limitation_of_liability.unwrap_or_default(),
            termination: value.termination.unwrap_or_default(),
            price: value.price.to_string(),
            payment_plan: value.payment_plan.unwrap_or_default(),
            no_of_copies: value.no_of_copies.to_string(),
            warranty_period: value
                .warranty_period
                .map(|months| months.to_string())
                .unwrap_or_default(),
            maintenance_agreement: value.maintenance_agreement.unwrap_or_default(),
            status: value.status.to_string(),
        }
    }
}

/// Only keep messages of fields which could be parsed, those have a message already.
fn merge_unparsed(mut parsed: FieldErrors, checked: FieldErrors) -> FieldErrors {
    for field in checked.fields() {
        if !parsed.contains(field) {
            for message in checked.get(field) {
                parsed.add(field, message.clone());
            }
        }
    }
    parsed
}

impl AgreementForm {
    fn to_create(&self) -> Result<AgreementCreate, FieldErrors> {
        let mut parser = Parser::default();
        let mut input = AgreementCreate {
            effective_date: parser.date("effective_date", &self.effective_date),
            expiry_date: parser.date("expiry_date", &self.expiry_date),
            delivery_date: parser.date("delivery_date", &self.delivery_date),
            licensor: parser.integer("licensor", &self.licensor),
            licensee: parser.integer("licensee", &self.licensee),
            software: parser.integer("software", &self.software),
            valid_ip_addresses: Parser::optional(&self.valid_ip_addresses),
            terms_and_conditions: Parser::optional(&self.terms_and_conditions),
            limitation_of_liability: Parser::optional(&self.limitation_of_liability),
            termination: Parser::optional(&self.termination),
            price: parser.decimal("price", &self.price).unwrap_or_default(),
            payment_plan: Parser::optional(&self.payment_plan),
            no_of_copies: parser.integer("no_of_copies", &self.no_of_copies),
            warranty_period: parser.integer("warranty_period", &self.warranty_period),
            maintenance_agreement: Parser::optional(&self.maintenance_agreement),
            status: parser.status("status", &self.status),
        };

        let errors = merge_unparsed(parser.errors, input.check());
        errors.into_result().map(|()| input)
    }

    fn to_update(&self) -> Result<AgreementUpdate, FieldErrors> {
        let mut parser = Parser::default();
        let input = AgreementUpdate {
            effective_date: parser.date("effective_date", &self.effective_date),
            expiry_date: parser.date("expiry_date", &self.expiry_date),
            delivery_date: parser.date("delivery_date", &self.delivery_date),
            licensor: parser.integer("licensor", &self.licensor),
            licensee: parser.integer("licensee", &self.licensee),
            software: parser.integer("software", &self.software),
            valid_ip_addresses: Some(self.valid_ip_addresses.clone()),
            terms_and_conditions: Some(self.terms_and_conditions.clone()),
            limitation_of_liability: Some(self.limitation_of_liability.clone()),
            termination: Some(self.termination.clone()),
            price: parser.decimal("price", &self.price),
            payment_plan: Some(self.payment_plan.clone()),
            no_of_copies: parser.integer("no_of_copies", &self.no_of_copies),
            warranty_period: parser.integer("warranty_period", &self.warranty_period),
            maintenance_agreement: Some(self.maintenance_agreement.clone()),
            status: Some(parser.status("status", &self.status)),
        };

        parser.finish().map(|()| input)
    }
}

/// The names of everything an agreement refers to, by ID.
struct Choices {
    licensors: Vec<(String, String)>,
    licensees: Vec<(String, String)>,
    softwares: Vec<(String, String)>,
}

impl Choices {
    async fn load(state: &Services) -> Result<Self, ServiceError> {
        let licensors = state
            .parties
            .fetch_parties(
                PartyKind::Licensor,
                Query::default(),
                Paginated::default(),
                StatusFilter::default(),
            )
            .await?;
        let licensees = state
            .parties
            .fetch_parties(
                PartyKind::Licensee,
                Query::default(),
                Paginated::default(),
                StatusFilter::default(),
            )
            .await?;
        let softwares = state
            .softwares
            .fetch_softwares(Query::default(), Paginated::default(), StatusFilter::default())
            .await?;

        Ok(Self {
            licensors: licensors
                .items
                .into_iter()
                .map(|party| (party.id.to_string(), party.full_name))
                .collect(),
            licensees: licensees
                .items
                .into_iter()
                .map(|party| (party.id.to_string(), party.full_name))
                .collect(),
            softwares: softwares
                .items
                .into_iter()
                .map(|software| (software.id.to_string(), software.name))
                .collect(),
        })
    }

    /// Describe an agreement, deleted references are shown by their ID.
    fn describe(&self, agreement: &AgreementDetails) -> String {
        fn name(choices: &[(String, String)], id: i32) -> String {
            let id = id.to_string();
            choices
                .iter()
                .find(|(value, _)| *value == id)
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| format!("#{id}"))
        }

        format!(
            "Agreement between {} and {} for {}",
            name(&self.licensors, agreement.licensor),
            name(&self.licensees, agreement.licensee),
            name(&self.softwares, agreement.software)
        )
    }
}

async fn render_form(
    state: &Services,
    id: Option<i32>,
    form: &AgreementForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<HttpResponse, Error> {
    let choices = Choices::load(state).await?;
    let (title, action) = match id {
        Some(id) => ("Edit agreement", format!("/license/agreement/{id}/edit/")),
        None => ("Add agreement", "/license/agreement/add/".to_string()),
    };

    let content = Form::new(&action, errors)
        .select("licensor", "Licensor", &choices.licensors, &form.licensor)
        .select("licensee", "Licensee", &choices.licensees, &form.licensee)
        .select("software", "Software", &choices.softwares, &form.software)
        .input("date", "effective_date", "Effective date", &form.effective_date)
        .input("date", "expiry_date", "Expiry date", &form.expiry_date)
        .input("date", "delivery_date", "Delivery date", &form.delivery_date)
        .text("valid_ip_addresses", "Valid IP addresses", &form.valid_ip_addresses)
        .textarea("terms_and_conditions", "Terms and conditions", &form.terms_and_conditions)
        .textarea(
            "limitation_of_liability",
            "Limitation of liability",
            &form.limitation_of_liability,
        )
        .textarea("termination", "Termination", &form.termination)
        .text("price", "Price", &form.price)
        .text("payment_plan", "Payment plan", &form.payment_plan)
        .input("number", "no_of_copies", "Number of copies", &form.no_of_copies)
        .input("number", "warranty_period", "Warranty period (months)", &form.warranty_period)
        .textarea(
            "maintenance_agreement",
            "Maintenance agreement",
            &form.maintenance_agreement,
        )
        .select("status", "Status", &status_options(), &form.status)
        .finish("Save");

    Ok(page(status, title, &content))
}

async fn rejected(
    state: &Services,
    id: Option<i32>,
    form: &AgreementForm,
    err: ServiceError,
) -> Result<HttpResponse, Error> {
    match err.field_errors() {
        Some(errors) => {
            render_form(state, id, form, errors, StatusCode::UNPROCESSABLE_ENTITY).await
        }
        None => Err(err.into()),
    }
}

#[get("/agreements/")]
async fn list(
    state: web::Data<Services>,
    web::Query(search): web::Query<Query>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    let agreements = state
        .agreements
        .fetch_agreements(search.clone(), Paginated::default(), AgreementFilter::default())
        .await?;
    let choices = Choices::load(&state).await?;

    let rows = agreements
        .items
        .iter()
        .map(|agreement| {
            vec![
                escape(&choices.describe(agreement)),
                escape(&agreement.effective_date.to_string()),
                escape(&agreement.expiry_date.to_string()),
                escape(&agreement.price.to_string()),
                escape(&agreement.status.to_string()),
                format!(
                    "{} {}",
                    link(&format!("/license/agreement/{}/edit/", agreement.id), "Edit"),
                    link(&format!("/license/agreement/{}/delete/", agreement.id), "Delete")
                ),
            ]
        })
        .collect::<Vec<_>>();

    let content = format!(
        r#"<p>{add}</p>
<form method="get"><input type="search" name="q" value="{q}"> <button type="submit">Search</button></form>
{table}"#,
        add = link("/license/agreement/add/", "Add agreement"),
        q = escape(&search.q),
        table = table(
            &["Agreement", "Effective", "Expires", "Price", "Status", ""],
            &rows
        ),
    );

    Ok(page(StatusCode::OK, "Agreements", &content))
}

#[get("/agreement/add/")]
async fn add_form(
    state: web::Data<Services>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    render_form(
        &state,
        None,
        &AgreementForm::default(),
        &FieldErrors::new(),
        StatusCode::OK,
    )
    .await
}

#[post("/agreement/add/")]
async fn add(
    state: web::Data<Services>,
    web::Form(form): web::Form<AgreementForm>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let input = match form.to_create() {
        Ok(input) => input,
        Err(errors) => {
            return render_form(&state, None, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY)
                .await
        }
    };

    match state.agreements.create_agreement(input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(&state, None, &form, err).await,
    }
}

#[get("/agreement/{id}/edit/")]
async fn edit_form(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let agreement = state.agreements.fetch_agreement(*id).await?;
    render_form(
        &state,
        Some(*id),
        &agreement.into(),
        &FieldErrors::new(),
        StatusCode::OK,
    )
    .await
}

#[post("/agreement/{id}/edit/")]
async fn edit(
    state: web::Data<Services>,
    id: web::Path<i32>,
    web::Form(form): web::Form<AgreementForm>,
    _: Require<Authenticated>,
) -> Result<HttpResponse, Error> {
    let input = match form.to_update() {
        Ok(input) => input,
        Err(errors) => {
            return render_form(
                &state,
                Some(*id),
                &form,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    };

    match state.agreements.update_agreement(*id, input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(&state, Some(*id), &form, err).await,
    }
}

#[get("/agreement/{id}/delete/")]
async fn confirm_delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    let agreement = state.agreements.fetch_agreement(*id).await?;
    let choices = Choices::load(&state).await?;
    let content = format!(
        r#"<form method="post" action="/license/agreement/{id}/delete/">
<p>Are you sure you want to delete "{name}"?</p>
<p><button type="submit">Yes, delete</button> {cancel}</p>
</form>"#,
        id = *id,
        name = escape(&choices.describe(&agreement)),
        cancel = link(LIST, "Cancel"),
    );

    Ok(page(StatusCode::OK, "Delete agreement", &content))
}

#[post("/agreement/{id}/delete/")]
async fn delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Authenticated>,
) -> Result<impl Responder, Error> {
    state.agreements.delete_agreement(*id).await?;
    Ok(see_other(LIST))
}
