use crate::{
    model::{SmsDetails, SmsFilter, SmsSend},
    provider::SmsProvider,
    Error,
};
use chrono::Utc;
use licensing_common::{
    db::{
        limiter::LimiterTrait,
        query::{Columns, Filtering, Query},
        Database,
    },
    model::{Paginated, PaginatedResults},
    validation::FieldErrors,
};
use licensing_entity::{sms, status::MessageStatus};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

pub struct SmsService {
    db: Database,
    provider: Arc<dyn SmsProvider>,
}

impl SmsService {
    pub fn new(db: Database, provider: Arc<dyn SmsProvider>) -> Self {
        Self { db, provider }
    }

    fn columns() -> Columns<sms::Column> {
        Columns::new()
            .search(sms::Column::Mobile)
            .search(sms::Column::Message)
            .sort(sms::Column::Mobile)
            .sort(sms::Column::CreatedAt)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_messages(
        &self,
        search: Query,
        paginated: Paginated,
        filter: SmsFilter,
    ) -> Result<PaginatedResults<SmsDetails>, Error> {
        let mut select = sms::Entity::find().filter(sms::Column::Status.ne(MessageStatus::Delete));
        if let Some(status) = filter.status {
            select = select.filter(sms::Column::Status.eq(status));
        }

        let limiter = select.filtering(search, &Self::columns())?.limiting(
            &self.db,
            paginated.offset,
            paginated.limit,
        );

        Ok(PaginatedResults::new(limiter, SmsDetails::from).await?)
    }

    async fn find(&self, id: i32) -> Result<sms::Model, Error> {
        sms::Entity::find_by_id(id)
            .filter(sms::Column::Status.ne(MessageStatus::Delete))
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("sms {id}")))
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_message(&self, id: i32) -> Result<SmsDetails, Error> {
        Ok(self.find(id).await?.into())
    }

    pub async fn count(&self) -> Result<u64, Error> {
        Ok(sms::Entity::find()
            .filter(sms::Column::Status.ne(MessageStatus::Delete))
            .count(&self.db)
            .await?)
    }

    /// Record a message and send it.
    ///
    /// The record is created as pending first, and only marked as sent once the provider
    /// accepted it. If sending fails, the record stays pending, and sending to the same mobile
    /// again retries through that record.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn send(&self, mut input: SmsSend) -> Result<SmsDetails, Error> {
        input.mobile = input.mobile.trim().to_string();
        if let Err(err) = input.validate() {
            return Err(FieldErrors::from(err).into());
        }

        let existing = sms::Entity::find()
            .filter(sms::Column::Mobile.eq(input.mobile.as_str()))
            .one(&self.db)
            .await?;

        let record = match existing {
            Some(existing) if existing.status == MessageStatus::Pending => {
                log::info!("retrying SMS {}", existing.id);
                let mut model = existing.into_active_model();
                model.message = Set(Some(input.message.clone()));
                model.update(&self.db).await?
            }
            Some(_) => {
                return Err(Error::Uniqueness(FieldErrors::single(
                    "mobile",
                    "sms with this mobile already exists.",
                )));
            }
            None => {
                sms::ActiveModel {
                    mobile: Set(input.mobile.clone()),
                    message: Set(Some(input.message.clone())),
                    status: Set(MessageStatus::Pending),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        if let Err(err) = self.provider.send(&input.mobile, &input.message).await {
            log::warn!(
                "failed to send SMS {} (retryable: {}): {err}",
                record.id,
                err.retryable()
            );
            return Err(Error::Provider {
                id: record.id,
                source: err,
            });
        }

        let mut model = record.into_active_model();
        model.status = Set(MessageStatus::Sent);
        let record = model.update(&self.db).await?;

        log::info!("sent SMS {}", record.id);

        Ok(record.into())
    }

    /// Mark a message as deleted.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn delete_message(&self, id: i32) -> Result<(), Error> {
        let result = sms::Entity::update_many()
            .col_expr(
                sms::Column::Status,
                Expr::value(MessageStatus::Delete.to_value()),
            )
            .filter(sms::Column::Id.eq(id))
            .filter(sms::Column::Status.ne(MessageStatus::Delete))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("sms {id}")));
        }

        Ok(())
    }
}
