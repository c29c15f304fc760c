use chrono::{DateTime, NaiveDate, Utc};
use licensing_common::validation::{non_blank, FieldErrors};
use licensing_entity::{software_license_agreement as agreement, status::Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A new license agreement between a licensor and a licensee, for a software.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct AgreementCreate {
    #[validate(required)]
    pub effective_date: Option<NaiveDate>,
    #[validate(required)]
    pub expiry_date: Option<NaiveDate>,
    #[validate(required)]
    pub delivery_date: Option<NaiveDate>,
    /// ID of the licensor
    #[validate(required)]
    pub licensor: Option<i32>,
    /// ID of the licensee
    #[validate(required)]
    pub licensee: Option<i32>,
    /// ID of the software
    #[validate(required)]
    pub software: Option<i32>,
    /// Comma separated IP addresses
    #[validate(length(max = 512))]
    pub valid_ip_addresses: Option<String>,
    #[validate(required, length(min = 1))]
    pub terms_and_conditions: Option<String>,
    pub limitation_of_liability: Option<String>,
    pub termination: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub payment_plan: Option<String>,
    #[validate(required, range(min = 1))]
    pub no_of_copies: Option<i32>,
    /// In months
    #[validate(range(min = 1))]
    pub warranty_period: Option<i32>,
    pub maintenance_agreement: Option<String>,
    pub status: Status,
}

impl AgreementCreate {
    /// Trim the input and check the values on their own, references are not resolved.
    pub fn check(&mut self) -> FieldErrors {
        for value in [
            &mut self.valid_ip_addresses,
            &mut self.limitation_of_liability,
            &mut self.termination,
            &mut self.payment_plan,
            &mut self.maintenance_agreement,
        ] {
            *value = non_blank(value.take());
        }
        if let Some(terms) = &mut self.terms_and_conditions {
            *terms = terms.trim().to_string();
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        check_price(Some(self.price), &mut errors);
        check_dates(self.effective_date, self.expiry_date, &mut errors);
        check_status(Some(self.status), &mut errors);

        errors
    }
}

/// Changes to an agreement, absent fields stay as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct AgreementUpdate {
    pub effective_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub licensor: Option<i32>,
    pub licensee: Option<i32>,
    pub software: Option<i32>,
    #[validate(length(max = 512))]
    pub valid_ip_addresses: Option<String>,
    #[validate(length(min = 1))]
    pub terms_and_conditions: Option<String>,
    pub limitation_of_liability: Option<String>,
    pub termination: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub payment_plan: Option<String>,
    #[validate(range(min = 1))]
    pub no_of_copies: Option<i32>,
    #[validate(range(min = 1))]
    pub warranty_period: Option<i32>,
    pub maintenance_agreement: Option<String>,
    pub status: Option<Status>,
}

impl AgreementUpdate {
    /// Trim the input and check it, combined with the current state of the agreement.
    pub fn check(&mut self, current: &agreement::Model) -> FieldErrors {
        if let Some(terms) = &mut self.terms_and_conditions {
            *terms = terms.trim().to_string();
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        check_price(self.price, &mut errors);
        check_dates(
            self.effective_date.or(Some(current.effective_date)),
            self.expiry_date.or(Some(current.expiry_date)),
            &mut errors,
        );
        check_status(self.status, &mut errors);

        errors
    }
}

/// The largest price fitting into seven digits, two of them decimal places.
const MAX_PRICE: Decimal = Decimal::from_parts(9_999_999, 0, 0, false, 2);

fn check_price(price: Option<Decimal>, errors: &mut FieldErrors) {
    let Some(price) = price else {
        return;
    };

    if price.is_sign_negative() && !price.is_zero() {
        errors.add("price", "Ensure this value is greater than or equal to 0.");
    } else if price.normalize().scale() > 2 {
        errors.add("price", "Ensure that there are no more than 2 decimal places.");
    } else if price > MAX_PRICE {
        errors.add("price", "Ensure that there are no more than 7 digits in total.");
    }
}

fn check_dates(effective: Option<NaiveDate>, expiry: Option<NaiveDate>, errors: &mut FieldErrors) {
    if let (Some(effective), Some(expiry)) = (effective, expiry) {
        if expiry < effective {
            errors.add(
                "expiry_date",
                "The expiry date must not be before the effective date.",
            );
        }
    }
}

fn check_status(status: Option<Status>, errors: &mut FieldErrors) {
    if status == Some(Status::Delete) {
        errors.add("status", "\"Delete\" is not a valid choice.");
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgreementDetails {
    pub id: i32,
    pub effective_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub licensor: i32,
    pub licensee: i32,
    pub software: i32,
    #[schema(required)]
    pub valid_ip_addresses: Option<String>,
    pub terms_and_conditions: String,
    #[schema(required)]
    pub limitation_of_liability: Option<String>,
    #[schema(required)]
    pub termination: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[schema(required)]
    pub payment_plan: Option<String>,
    pub no_of_copies: i32,
    #[schema(required)]
    pub warranty_period: Option<i32>,
    #[schema(required)]
    pub maintenance_agreement: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl From<agreement::Model> for AgreementDetails {
    fn from(value: agreement::Model) -> Self {
        Self {
            id: value.id,
            effective_date: value.effective_date,
            expiry_date: value.expiry_date,
            delivery_date: value.delivery_date,
            licensor: value.licensor_id,
            licensee: value.licensee_id,
            software: value.software_id,
            valid_ip_addresses: value.valid_ip_addresses,
            terms_and_conditions: value.terms_and_conditions,
            limitation_of_liability: value.limitation_of_liability,
            termination: value.termination,
            price: value.price,
            payment_plan: value.payment_plan,
            no_of_copies: value.no_of_copies,
            warranty_period: value.warranty_period,
            maintenance_agreement: value.maintenance_agreement,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
pub struct AgreementFilter {
    /// Only agreements of this licensor
    pub licensor: Option<i32>,
    /// Only agreements of this licensee
    pub licensee: Option<i32>,
    /// Only agreements for this software
    pub software: Option<i32>,
    /// Only agreements with this status
    #[param(inline)]
    pub status: Option<Status>,
}

/// Whether an agreement is still in effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Validity {
    pub is_valid: bool,
    pub expiry_date: NaiveDate,
}

impl Validity {
    /// Valid up to and including the day of expiry.
    pub fn at(expiry_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            is_valid: today <= expiry_date,
            expiry_date,
        }
    }
}
