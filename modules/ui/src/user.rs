use crate::{
    endpoints::Services,
    error::Error,
    html::{escape, link, page, see_other, table, Form},
};
use actix_web::{get, http::StatusCode, post, web, HttpResponse, Responder};
use licensing_auth::authorizer::{Require, Staff};
use licensing_common::{db::query::Query, model::Paginated, validation::FieldErrors};
use licensing_module_fundamental::{
    account::model::{AccountCreate, AccountDetails, AccountFilter, AccountUpdate},
    Error as ServiceError,
};

const LIST: &str = "/license/users/";

pub fn configure(svc: &mut web::ServiceConfig) {
    svc.service(list)
        .service(add_form)
        .service(add)
        .service(edit_form)
        .service(edit)
        .service(confirm_delete)
        .service(delete);
}

#[derive(Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Present when the box is checked
    pub is_staff: Option<String>,
}

impl From<AccountDetails> for UserForm {
    fn from(value: AccountDetails) -> Self {
        Self {
            username: value.username,
            email: value.email,
            password: String::new(),
            is_staff: value.is_staff.then(|| "on".to_string()),
        }
    }
}

fn render_form(
    id: Option<i32>,
    form: &UserForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> HttpResponse {
    let (title, action, password) = match id {
        Some(id) => (
            "Edit user",
            format!("/license/user/{id}/edit/"),
            "Password (leave blank to keep the current one)",
        ),
        None => ("Add user", "/license/user/add/".to_string(), "Password"),
    };

    // the password is never sent back
    let content = Form::new(&action, errors)
        .text("username", "Username", &form.username)
        .input("email", "email", "Email", &form.email)
        .input("password", "password", password, "")
        .checkbox("is_staff", "Staff", form.is_staff.is_some())
        .finish("Save");

    page(status, title, &content)
}

fn rejected(id: Option<i32>, form: &UserForm, err: ServiceError) -> Result<HttpResponse, Error> {
    match err.field_errors() {
        Some(errors) => Ok(render_form(id, form, errors, StatusCode::UNPROCESSABLE_ENTITY)),
        None => Err(err.into()),
    }
}

#[get("/users/")]
async fn list(
    state: web::Data<Services>,
    web::Query(search): web::Query<Query>,
    _: Require<Staff>,
) -> Result<impl Responder, Error> {
    let accounts = state
        .accounts
        .fetch_accounts(search.clone(), Paginated::default(), AccountFilter::default())
        .await?;

    let rows = accounts
        .items
        .iter()
        .map(|account| {
            vec![
                escape(&account.username),
                escape(&account.email),
                if account.is_staff { "Yes" } else { "No" }.to_string(),
                format!(
                    "{} {}",
                    link(&format!("/license/user/{}/edit/", account.id), "Edit"),
                    link(&format!("/license/user/{}/delete/", account.id), "Delete")
                ),
            ]
        })
        .collect::<Vec<_>>();

    let content = format!(
        r#"<p>{add}</p>
<form method="get"><input type="search" name="q" value="{q}"> <button type="submit">Search</button></form>
{table}"#,
        add = link("/license/user/add/", "Add user"),
        q = escape(&search.q),
        table = table(&["Username", "Email", "Staff", ""], &rows),
    );

    Ok(page(StatusCode::OK, "Users", &content))
}

#[get("/user/add/")]
async fn add_form(_: Require<Staff>) -> impl Responder {
    render_form(None, &UserForm::default(), &FieldErrors::new(), StatusCode::OK)
}

#[post("/user/add/")]
async fn add(
    state: web::Data<Services>,
    web::Form(form): web::Form<UserForm>,
    _: Require<Staff>,
) -> Result<HttpResponse, Error> {
    let input = AccountCreate {
        username: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
        is_staff: form.is_staff.is_some(),
    };

    match state.accounts.create_account(input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(None, &form, err),
    }
}

#[get("/user/{id}/edit/")]
async fn edit_form(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Staff>,
) -> Result<impl Responder, Error> {
    let account = state.accounts.fetch_account(*id).await?;
    Ok(render_form(
        Some(*id),
        &account.into(),
        &FieldErrors::new(),
        StatusCode::OK,
    ))
}

#[post("/user/{id}/edit/")]
async fn edit(
    state: web::Data<Services>,
    id: web::Path<i32>,
    web::Form(form): web::Form<UserForm>,
    _: Require<Staff>,
) -> Result<HttpResponse, Error> {
    let input = AccountUpdate {
        username: Some(form.username.clone()),
        email: Some(form.email.clone()),
        password: Some(form.password.clone()).filter(|password| !password.is_empty()),
        is_staff: Some(form.is_staff.is_some()),
    };

    match state.accounts.update_account(*id, input).await {
        Ok(_) => Ok(see_other(LIST)),
        Err(err) => rejected(Some(*id), &form, err),
    }
}

#[get("/user/{id}/delete/")]
async fn confirm_delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Staff>,
) -> Result<impl Responder, Error> {
    let account = state.accounts.fetch_account(*id).await?;
    let content = format!(
        r#"<form method="post" action="/license/user/{id}/delete/">
<p>Are you sure you want to delete "{name}"?</p>
<p><button type="submit">Yes, delete</button> {cancel}</p>
</form>"#,
        id = *id,
        name = escape(&account.username),
        cancel = link(LIST, "Cancel"),
    );

    Ok(page(StatusCode::OK, "Delete user", &content))
}

#[post("/user/{id}/delete/")]
async fn delete(
    state: web::Data<Services>,
    id: web::Path<i32>,
    _: Require<Staff>,
) -> Result<impl Responder, Error> {
    state.accounts.delete_account(*id).await?;
    Ok(see_other(LIST))
}
