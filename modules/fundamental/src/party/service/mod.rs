use crate::{
    common::{address::save_address, ensure_unique, StatusFilter},
    party::{
        model::{PartyCreate, PartyDetails, PartyUpdate},
        PartyKind,
    },
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
};
use licensing_entity::{address, licensee, licensor, status::Status};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Related, Set, TransactionTrait,
};
use tracing::instrument;

/// A table of parties, licensors and licensees have the same columns.
pub trait PartyEntity: EntityTrait + Related<address::Entity> + 'static {
    const KIND: PartyKind;
    const ID: Self::Column;
    const STATUS: Self::Column;
    const MOBILE: Self::Column;
    const EMAIL: Self::Column;

    /// The columns to search and sort on.
    fn columns() -> Columns<Self::Column>;

    fn id(model: &Self::Model) -> i32;

    fn address_id(model: &Self::Model) -> Option<i32>;

    fn details(model: Self::Model, address: Option<address::Model>) -> PartyDetails;

    fn new_model(input: PartyCreate, address_id: Option<i32>) -> Self::ActiveModel;

    /// Apply the fields present in `input`.
    fn apply(model: Self::Model, input: PartyUpdate, address_id: Option<i32>)
        -> Self::ActiveModel;
}

macro_rules! party_entity {
    ($entity:ident, $kind:expr) => {
        impl PartyEntity for $entity::Entity {
            const KIND: PartyKind = $kind;
            const ID: $entity::Column = $entity::Column::Id;
            const STATUS: $entity::Column = $entity::Column::Status;
            const MOBILE: $entity::Column = $entity::Column::Mobile;
            const EMAIL: $entity::Column = $entity::Column::Email;

            fn columns() -> Columns<$entity::Column> {
                Columns::new()
                    .search($entity::Column::FirstName)
                    .search($entity::Column::LastName)
                    .search($entity::Column::Mobile)
                    .search($entity::Column::Email)
                    .sort($entity::Column::FirstName)
                    .sort($entity::Column::LastName)
                    .sort($entity::Column::Email)
            }

            fn id(model: &$entity::Model) -> i32 {
                model.id
            }

            fn address_id(model: &$entity::Model) -> Option<i32> {
                model.address_id
            }

            fn details(model: $entity::Model, address: Option<address::Model>) -> PartyDetails {
                PartyDetails {
                    id: model.id,
                    full_name: model.full_name(),
                    first_name: model.first_name,
                    last_name: model.last_name,
                    designation: model.designation,
                    organization_name: model.organization_name,
                    mobile: model.mobile,
                    email: model.email,
                    status: model.status,
                    created_at: model.created_at,
                    address: address.map(Into::into),
                }
            }

            fn new_model(input: PartyCreate, address_id: Option<i32>) -> $entity::ActiveModel {
                $entity::ActiveModel {
                    first_name: Set(input.first_name),
                    last_name: Set(input.last_name),
                    designation: Set(input.designation),
                    organization_name: Set(input.organization_name),
                    address_id: Set(address_id),
                    mobile: Set(input.mobile),
                    email: Set(input.email),
                    status: Set(input.status),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
            }

            fn apply(
                model: $entity::Model,
                input: PartyUpdate,
                address_id: Option<i32>,
            ) -> $entity::ActiveModel {
                let mut model = model.into_active_model();
                if let Some(first_name) = input.first_name {
                    model.first_name = Set(first_name);
                }
                if let Some(last_name) = input.last_name {
                    model.last_name = Set(last_name);
                }
                if let Some(designation) = input.designation {
                    model.designation = Set(Some(designation).filter(|v| !v.is_empty()));
                }
                if let Some(organization_name) = input.organization_name {
                    model.organization_name =
                        Set(Some(organization_name).filter(|v| !v.is_empty()));
                }
                if let Some(mobile) = input.mobile {
                    model.mobile = Set(mobile);
                }
                if let Some(email) = input.email {
                    model.email = Set(email);
                }
                if let Some(status) = input.status {
                    model.status = Set(status);
                }
                model.address_id = Set(address_id);
                model
            }
        }
    };
}

party_entity!(licensor, PartyKind::Licensor);
party_entity!(licensee, PartyKind::Licensee);

/// Run `$call` with `$entity` being the table of `$kind`.
macro_rules! dispatch {
    ($kind:expr, $entity:ident => $call:expr) => {
        match $kind {
            PartyKind::Licensor => {
                type $entity = licensor::Entity;
                $call
            }
            PartyKind::Licensee => {
                type $entity = licensee::Entity;
                $call
            }
        }
    };
}

pub struct PartyService {
    db: Database,
}

impl PartyService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_parties(
        &self,
        kind: PartyKind,
        search: Query,
        paginated: Paginated,
        filter: StatusFilter,
    ) -> Result<PaginatedResults<PartyDetails>, Error> {
        dispatch!(kind, E => self.list::<E>(search, paginated, filter).await)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_party(&self, kind: PartyKind, id: i32) -> Result<PartyDetails, Error> {
        dispatch!(kind, E => Self::find::<E, _>(&self.db, id).await)
    }

    /// The number of parties not deleted.
    pub async fn count(&self, kind: PartyKind) -> Result<u64, Error> {
        dispatch!(kind, E => Ok(E::find()
            .filter(E::STATUS.ne(Status::Delete))
            .count(&self.db)
            .await?))
    }

    /// Create a party, along with its address when that is complete.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn create_party(
        &self,
        kind: PartyKind,
        input: PartyCreate,
    ) -> Result<PartyDetails, Error> {
        dispatch!(kind, E => self.create::<E>(input).await)
    }

    /// Apply the fields present in `input`. The party and its address are written in one
    /// transaction.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn update_party(
        &self,
        kind: PartyKind,
        id: i32,
        input: PartyUpdate,
    ) -> Result<PartyDetails, Error> {
        dispatch!(kind, E => self.update::<E>(id, input).await)
    }

    /// Mark a party as deleted, nothing is removed.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn delete_party(&self, kind: PartyKind, id: i32) -> Result<(), Error> {
        dispatch!(kind, E => self.delete::<E>(id).await)
    }

    async fn list<E>(
        &self,
        search: Query,
        paginated: Paginated,
        filter: StatusFilter,
    ) -> Result<PaginatedResults<PartyDetails>, Error>
    where
        E: PartyEntity,
        E::Model: Sync,
    {
        let mut select = E::find().filter(E::STATUS.ne(Status::Delete));
        if let Some(status) = filter.status {
            select = select.filter(E::STATUS.eq(status));
        }

        let limiter = select
            .filtering(search, &E::columns())?
            .find_also_related(address::Entity)
            .limiting(&self.db, paginated.offset, paginated.limit);

        Ok(PaginatedResults::new(limiter, |(party, address)| E::details(party, address)).await?)
    }

    async fn find<E, C>(db: &C, id: i32) -> Result<PartyDetails, Error>
    where
        E: PartyEntity,
        C: ConnectionTrait,
    {
        E::find()
            .filter(E::ID.eq(id))
            .filter(E::STATUS.ne(Status::Delete))
            .find_also_related(address::Entity)
            .one(db)
            .await?
            .map(|(party, address)| E::details(party, address))
            .ok_or_else(|| Error::NotFound(format!("{} {id}", E::KIND.name())))
    }

    async fn ensure_unique<E, C>(
        db: &C,
        id: Option<i32>,
        mobile: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), Error>
    where
        E: PartyEntity,
        C: ConnectionTrait,
    {
        ensure_unique::<E, _>(
            db,
            E::KIND.name(),
            id.map(|id| (E::ID, id)),
            &[(E::MOBILE, "mobile", mobile), (E::EMAIL, "email", email)],
        )
        .await
    }

    async fn create<E>(&self, mut input: PartyCreate) -> Result<PartyDetails, Error>
    where
        E: PartyEntity,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
    {
        input.prepare()?;

        let tx = self.db.begin().await?;

        Self::ensure_unique::<E, _>(&tx, None, Some(&input.mobile), Some(&input.email)).await?;
        let address_id = save_address(&tx, None, input.address.take()).await?;

        let model = E::new_model(input, address_id).insert(&tx).await?;

        let result = Self::find::<E, _>(&tx, E::id(&model)).await?;
        tx.commit().await?;

        log::info!("created {} {}", E::KIND.name(), result.id);

        Ok(result)
    }

    async fn update<E>(&self, id: i32, mut input: PartyUpdate) -> Result<PartyDetails, Error>
    where
        E: PartyEntity,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
    {
        input.prepare()?;

        let tx = self.db.begin().await?;

        let current = E::find()
            .filter(E::ID.eq(id))
            .filter(E::STATUS.ne(Status::Delete))
            .one(&tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} {id}", E::KIND.name())))?;

        Self::ensure_unique::<E, _>(
            &tx,
            Some(id),
            input.mobile.as_deref(),
            input.email.as_deref(),
        )
        .await?;
        let address_id = save_address(&tx, E::address_id(&current), input.address.take()).await?;

        E::apply(current, input, address_id).update(&tx).await?;

        let result = Self::find::<E, _>(&tx, id).await?;
        tx.commit().await?;

        log::info!("updated {} {id}", E::KIND.name());

        Ok(result)
    }

    async fn delete<E: PartyEntity>(&self, id: i32) -> Result<(), Error> {
        let result = E::update_many()
            .col_expr(E::STATUS, Expr::value(Status::Delete.to_value()))
            .filter(E::ID.eq(id))
            .filter(E::STATUS.ne(Status::Delete))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("{} {id}", E::KIND.name())));
        }

        log::info!("deleted {} {id}", E::KIND.name());

        Ok(())
    }
}

#[cfg(test)]
mod test;
