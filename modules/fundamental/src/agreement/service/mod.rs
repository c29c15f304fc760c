use crate::{
    agreement::model::{
        AgreementCreate, AgreementDetails, AgreementFilter, AgreementUpdate, Validity,
    },
    Error,
};
use chrono::{NaiveDate, Utc};
use licensing_common::{
    db::{
        limiter::LimiterTrait,
        query::{Columns, Filtering, Query},
        Database,
    },
    model::{Paginated, PaginatedResults},
    validation::FieldErrors,
};
use licensing_entity::{
    licensee, licensor, software, software_license_agreement as agreement, status::Status,
};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set,
};
use tracing::instrument;

pub struct AgreementService {
    db: Database,
}

impl AgreementService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn columns() -> Columns<agreement::Column> {
        Columns::new()
            .search(agreement::Column::TermsAndConditions)
            .search(agreement::Column::LimitationOfLiability)
            .search(agreement::Column::Termination)
            .search(agreement::Column::PaymentPlan)
            .search(agreement::Column::MaintenanceAgreement)
            .sort(agreement::Column::EffectiveDate)
            .sort(agreement::Column::ExpiryDate)
            .sort(agreement::Column::DeliveryDate)
            .sort(agreement::Column::CreatedAt)
            .sort(agreement::Column::NoOfCopies)
            .sort(agreement::Column::Price)
            .sort(agreement::Column::WarrantyPeriod)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_agreements(
        &self,
        search: Query,
        paginated: Paginated,
        filter: AgreementFilter,
    ) -> Result<PaginatedResults<AgreementDetails>, Error> {
        let mut select =
            agreement::Entity::find().filter(agreement::Column::Status.ne(Status::Delete));
        if let Some(licensor) = filter.licensor {
            select = select.filter(agreement::Column::LicensorId.eq(licensor));
        }
        if let Some(licensee) = filter.licensee {
            select = select.filter(agreement::Column::LicenseeId.eq(licensee));
        }
        if let Some(software) = filter.software {
            select = select.filter(agreement::Column::SoftwareId.eq(software));
        }
        if let Some(status) = filter.status {
            select = select.filter(agreement::Column::Status.eq(status));
        }

        let limiter = select.filtering(search, &Self::columns())?.limiting(
            &self.db,
            paginated.offset,
            paginated.limit,
        );

        Ok(PaginatedResults::new(limiter, AgreementDetails::from).await?)
    }

    async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<agreement::Model, Error> {
        agreement::Entity::find_by_id(id)
            .filter(agreement::Column::Status.ne(Status::Delete))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("agreement {id}")))
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_agreement(&self, id: i32) -> Result<AgreementDetails, Error> {
        Ok(Self::find(&self.db, id).await?.into())
    }

    /// The number of agreements not deleted.
    pub async fn count(&self) -> Result<u64, Error> {
        Ok(agreement::Entity::find()
            .filter(agreement::Column::Status.ne(Status::Delete))
            .count(&self.db)
            .await?)
    }

    /// Record an error for each referenced party or software which doesn't exist, or
    /// was deleted.
    async fn check_references(
        &self,
        licensor: Option<i32>,
        licensee: Option<i32>,
        software: Option<i32>,
        errors: &mut FieldErrors,
    ) -> Result<(), Error> {
        fn missing(id: i32) -> String {
            format!("Invalid pk \"{id}\" - object does not exist.")
        }

        if let Some(id) = licensor {
            let found = licensor::Entity::find_by_id(id)
                .filter(licensor::Column::Status.ne(Status::Delete))
                .one(&self.db)
                .await?;
            if found.is_none() {
                errors.add("licensor", missing(id));
            }
        }

        if let Some(id) = licensee {
            let found = licensee::Entity::find_by_id(id)
                .filter(licensee::Column::Status.ne(Status::Delete))
                .one(&self.db)
                .await?;
            if found.is_none() {
                errors.add("licensee", missing(id));
            }
        }

        if let Some(id) = software {
            let found = software::Entity::find_by_id(id)
                .filter(software::Column::Status.ne(Status::Delete))
                .one(&self.db)
                .await?;
            if found.is_none() {
                errors.add("software", missing(id));
            }
        }

        Ok(())
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn create_agreement(
        &self,
        mut input: AgreementCreate,
    ) -> Result<AgreementDetails, Error> {
        let mut errors = input.check();
        self.check_references(input.licensor, input.licensee, input.software, &mut errors)
            .await?;
        errors.into_result()?;

        let (
            Some(effective_date),
            Some(expiry_date),
            Some(delivery_date),
            Some(licensor_id),
            Some(licensee_id),
            Some(software_id),
            Some(terms_and_conditions),
            Some(no_of_copies),
        ) = (
            input.effective_date,
            input.expiry_date,
            input.delivery_date,
            input.licensor,
            input.licensee,
            input.software,
            input.terms_and_conditions,
            input.no_of_copies,
        )
        else {
            // all of them are checked to be present
            return Err(Error::invalid("non_field_errors", "Missing required fields."));
        };

        let model = agreement::ActiveModel {
            effective_date: Set(effective_date),
            licensor_id: Set(licensor_id),
            licensee_id: Set(licensee_id),
            software_id: Set(software_id),
            valid_ip_addresses: Set(input.valid_ip_addresses),
            terms_and_conditions: Set(terms_and_conditions),
            limitation_of_liability: Set(input.limitation_of_liability),
            termination: Set(input.termination),
            expiry_date: Set(expiry_date),
            price: Set(input.price),
            payment_plan: Set(input.payment_plan),
            no_of_copies: Set(no_of_copies),
            delivery_date: Set(delivery_date),
            warranty_period: Set(input.warranty_period),
            maintenance_agreement: Set(input.maintenance_agreement),
            status: Set(input.status),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        log::info!("created agreement {}", model.id);

        Ok(model.into())
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn update_agreement(
        &self,
        id: i32,
        mut input: AgreementUpdate,
    ) -> Result<AgreementDetails, Error> {
        let current = Self::find(&self.db, id).await?;

        let mut errors = input.check(&current);
        self.check_references(input.licensor, input.licensee, input.software, &mut errors)
            .await?;
        errors.into_result()?;

        fn text(value: String) -> Option<String> {
            Some(value).filter(|v| !v.trim().is_empty())
        }

        let mut model = current.into_active_model();
        if let Some(value) = input.effective_date {
            model.effective_date = Set(value);
        }
        if let Some(value) = input.expiry_date {
            model.expiry_date = Set(value);
        }
        if let Some(value) = input.delivery_date {
            model.delivery_date = Set(value);
        }
        if let Some(value) = input.licensor {
            model.licensor_id = Set(value);
        }
        if let Some(value) = input.licensee {
            model.licensee_id = Set(value);
        }
        if let Some(value) = input.software {
            model.software_id = Set(value);
        }
        if let Some(value) = input.valid_ip_addresses {
            model.valid_ip_addresses = Set(text(value));
        }
        if let Some(value) = input.terms_and_conditions {
            model.terms_and_conditions = Set(value);
        }
        if let Some(value) = input.limitation_of_liability {
            model.limitation_of_liability = Set(text(value));
        }
        if let Some(value) = input.termination {
            model.termination = Set(text(value));
        }
        if let Some(value) = input.price {
            model.price = Set(value);
        }
        if let Some(value) = input.payment_plan {
            model.payment_plan = Set(text(value));
        }
        if let Some(value) = input.no_of_copies {
            model.no_of_copies = Set(value);
        }
        if let Some(value) = input.warranty_period {
            model.warranty_period = Set(Some(value));
        }
        if let Some(value) = input.maintenance_agreement {
            model.maintenance_agreement = Set(text(value));
        }
        if let Some(value) = input.status {
            model.status = Set(value);
        }

        let model = if model.is_changed() {
            model.update(&self.db).await?
        } else {
            Self::find(&self.db, id).await?
        };

        log::info!("updated agreement {id}");

        Ok(model.into())
    }

    /// Mark an agreement as deleted, nothing is removed.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn delete_agreement(&self, id: i32) -> Result<(), Error> {
        let result = agreement::Entity::update_many()
            .col_expr(agreement::Column::Status, Expr::value(Status::Delete.to_value()))
            .filter(agreement::Column::Id.eq(id))
            .filter(agreement::Column::Status.ne(Status::Delete))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("agreement {id}")));
        }

        log::info!("deleted agreement {id}");

        Ok(())
    }

    /// Check if an agreement is still valid on the given day.
    ///
    /// Deleted agreements are checked as well.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn check_validity(&self, id: i32, today: NaiveDate) -> Result<Validity, Error> {
        let agreement = agreement::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("agreement {id}")))?;

        Ok(Validity::at(agreement.expiry_date, today))
    }
}
