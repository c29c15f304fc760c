use chrono::{DateTime, Utc};
use licensing_common::validation::FieldErrors;
use licensing_entity::account;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A new account able to log in.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct AccountCreate {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    /// The plain password, only its hash gets stored
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub is_staff: bool,
}

impl AccountCreate {
    pub fn prepare(&mut self) -> Result<(), FieldErrors> {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();

        match self.validate() {
            Ok(()) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// never log passwords
impl std::fmt::Debug for AccountCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_staff", &self.is_staff)
            .finish_non_exhaustive()
    }
}

/// Changes to an account, absent fields stay as they are.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct AccountUpdate {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    /// A new password, the current one is kept when absent
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub is_staff: Option<bool>,
}

impl AccountUpdate {
    pub fn prepare(&mut self) -> Result<(), FieldErrors> {
        for value in [&mut self.username, &mut self.email] {
            if let Some(value) = value {
                *value = value.trim().to_string();
            }
        }

        match self.validate() {
            Ok(()) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl std::fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("is_staff", &self.is_staff)
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct PasswordChange {
    pub old_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange")
    }
}

/// An account, without its credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountDetails {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl From<account::Model> for AccountDetails {
    fn from(value: account::Model) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            is_staff: value.is_staff,
            created_at: value.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
pub struct AccountFilter {
    /// Only the account with exactly this username
    pub username: Option<String>,
    /// Only accounts with exactly this email
    pub email: Option<String>,
    pub is_staff: Option<bool>,
}
