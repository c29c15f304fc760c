use crate::{
    common::address::{AddressDetails, AddressInput},
    Error,
};
use chrono::{DateTime, Utc};
use licensing_common::validation::{non_blank, FieldErrors, MOBILE};
use licensing_entity::status::Status;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A new licensor or licensee.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct PartyCreate {
    #[validate(length(min = 1, max = 128))]
    pub first_name: String,
    #[validate(length(min = 1, max = 128))]
    pub last_name: String,
    #[validate(length(max = 128))]
    pub designation: Option<String>,
    #[validate(length(max = 128))]
    pub organization_name: Option<String>,
    #[validate(regex(path = *MOBILE), length(max = 15))]
    pub mobile: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    pub status: Status,
    #[validate(nested)]
    pub address: Option<AddressInput>,
}

impl PartyCreate {
    /// Trim and validate the input.
    pub fn prepare(&mut self) -> Result<(), Error> {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.mobile = self.mobile.trim().to_string();
        self.email = self.email.trim().to_string();
        self.designation = non_blank(self.designation.take());
        self.organization_name = non_blank(self.organization_name.take());
        if let Some(address) = &mut self.address {
            address.normalize();
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        check_status(Some(self.status), &mut errors);

        Ok(errors.into_result()?)
    }
}

/// Changes to a licensor or licensee, absent fields stay as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct PartyUpdate {
    #[validate(length(min = 1, max = 128))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub last_name: Option<String>,
    /// A blank value clears the designation
    #[validate(length(max = 128))]
    pub designation: Option<String>,
    /// A blank value clears the organization name
    #[validate(length(max = 128))]
    pub organization_name: Option<String>,
    #[validate(regex(path = *MOBILE), length(max = 15))]
    pub mobile: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    pub status: Option<Status>,
    #[validate(nested)]
    pub address: Option<AddressInput>,
}

impl PartyUpdate {
    /// Trim and validate the input.
    pub fn prepare(&mut self) -> Result<(), Error> {
        for value in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.mobile,
            &mut self.email,
            &mut self.designation,
            &mut self.organization_name,
        ] {
            if let Some(value) = value {
                *value = value.trim().to_string();
            }
        }
        if let Some(address) = &mut self.address {
            address.normalize();
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        check_status(self.status, &mut errors);

        Ok(errors.into_result()?)
    }
}

/// Records are deleted through the delete operation only.
fn check_status(status: Option<Status>, errors: &mut FieldErrors) {
    if status == Some(Status::Delete) {
        errors.add("status", "\"Delete\" is not a valid choice.");
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PartyDetails {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// First and last name
    pub full_name: String,
    #[schema(required)]
    pub designation: Option<String>,
    #[schema(required)]
    pub organization_name: Option<String>,
    pub mobile: String,
    pub email: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[schema(required)]
    pub address: Option<AddressDetails>,
}
