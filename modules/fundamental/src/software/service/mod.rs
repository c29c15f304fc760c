use crate::{
    common::StatusFilter,
    software::model::{SoftwareCreate, SoftwareDetails, SoftwareUpdate},
    Error,
};
use bytes::Bytes;
use chrono::Utc;
use futures::Stream;
use licensing_common::{
    db::{
        limiter::LimiterTrait,
        query::{Columns, Filtering, Query},
        Database,
    },
    model::{Paginated, PaginatedResults},
};
use licensing_entity::{software, status::Status};
use licensing_module_storage::service::{fs::FileSystemBackend, StorageBackend, StorageKey};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set,
};
use std::fmt::{Debug, Display};
use tracing::instrument;

pub struct SoftwareService {
    db: Database,
    storage: FileSystemBackend,
}

impl SoftwareService {
    pub fn new(db: Database, storage: FileSystemBackend) -> Self {
        Self { db, storage }
    }

    fn columns() -> Columns<software::Column> {
        Columns::new()
            .search(software::Column::Name)
            .sort(software::Column::Name)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_softwares(
        &self,
        search: Query,
        paginated: Paginated,
        filter: StatusFilter,
    ) -> Result<PaginatedResults<SoftwareDetails>, Error> {
        let mut select =
            software::Entity::find().filter(software::Column::Status.ne(Status::Delete));
        if let Some(status) = filter.status {
            select = select.filter(software::Column::Status.eq(status));
        }

        let limiter = select.filtering(search, &Self::columns())?.limiting(
            &self.db,
            paginated.offset,
            paginated.limit,
        );

        Ok(PaginatedResults::new(limiter, SoftwareDetails::from).await?)
    }

    async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<software::Model, Error> {
        software::Entity::find_by_id(id)
            .filter(software::Column::Status.ne(Status::Delete))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("software {id}")))
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_software(&self, id: i32) -> Result<SoftwareDetails, Error> {
        Ok(Self::find(&self.db, id).await?.into())
    }

    /// The number of softwares not deleted.
    pub async fn count(&self) -> Result<u64, Error> {
        Ok(software::Entity::find()
            .filter(software::Column::Status.ne(Status::Delete))
            .count(&self.db)
            .await?)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn create_software(
        &self,
        mut input: SoftwareCreate,
    ) -> Result<SoftwareDetails, Error> {
        input.prepare()?;

        let model = software::ActiveModel {
            name: Set(input.name),
            specification: Set(input.specification),
            user_guide_document: Set(None),
            indemnity: Set(input.indemnity),
            status: Set(input.status),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        log::info!("created software {}", model.id);

        Ok(model.into())
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn update_software(
        &self,
        id: i32,
        mut input: SoftwareUpdate,
    ) -> Result<SoftwareDetails, Error> {
        input.prepare()?;

        let mut model = Self::find(&self.db, id).await?.into_active_model();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(specification) = input.specification {
            model.specification = Set(Some(specification).filter(|v| !v.trim().is_empty()));
        }
        if let Some(indemnity) = input.indemnity {
            model.indemnity = Set(Some(indemnity).filter(|v| !v.trim().is_empty()));
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }

        let model = if model.is_changed() {
            model.update(&self.db).await?
        } else {
            Self::find(&self.db, id).await?
        };

        Ok(model.into())
    }

    /// Mark a software as deleted, its agreements stay untouched.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn delete_software(&self, id: i32) -> Result<(), Error> {
        let result = software::Entity::update_many()
            .col_expr(software::Column::Status, Expr::value(Status::Delete.to_value()))
            .filter(software::Column::Id.eq(id))
            .filter(software::Column::Status.ne(Status::Delete))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("software {id}")));
        }

        log::info!("deleted software {id}");

        Ok(())
    }

    /// Store a new user guide, replacing the current one.
    #[instrument(skip(self, stream), err(level=tracing::Level::INFO))]
    pub async fn upload_user_guide<S, E>(
        &self,
        id: i32,
        filename: &str,
        stream: S,
    ) -> Result<SoftwareDetails, Error>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Debug + Display,
    {
        let current = Self::find(&self.db, id).await?;
        let previous = current.user_guide_document.clone();

        let key = self
            .storage
            .store(filename, stream)
            .await
            .map_err(|err| Error::Storage(anyhow::anyhow!("failed to store user guide: {err}")))?;

        let mut model = current.into_active_model();
        model.user_guide_document = Set(Some(key.0.clone()));

        let model = match model.update(&self.db).await {
            Ok(model) => model,
            Err(err) => {
                self.remove_document(&key).await;
                return Err(err.into());
            }
        };

        if let Some(previous) = previous {
            self.remove_document(&StorageKey(previous)).await;
        }

        log::info!("stored user guide of software {id}: {key}");

        Ok(model.into())
    }

    /// The file name and content of the user guide.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn download_user_guide(
        &self,
        id: i32,
    ) -> Result<
        (
            String,
            impl Stream<Item = Result<Bytes, std::io::Error>> + 'static,
        ),
        Error,
    > {
        let current = Self::find(&self.db, id).await?;
        let not_found = || Error::NotFound(format!("user guide of software {id}"));

        let key = StorageKey(current.user_guide_document.ok_or_else(not_found)?);
        let stream = self
            .storage
            .retrieve(&key)
            .await
            .map_err(|err| Error::Storage(err.into()))?
            .ok_or_else(not_found)?;

        Ok((display_name(&key), stream))
    }

    async fn remove_document(&self, key: &StorageKey) {
        if let Err(err) = self.storage.delete(key).await {
            log::warn!("failed to remove stored document {key}: {err}");
        }
    }
}

/// The file name as uploaded, without the directory and the unique prefix.
fn display_name(key: &StorageKey) -> String {
    const PREFIX_LEN: usize = 37; // uuid and dash

    let name = key.as_str().rsplit('/').next().unwrap_or_default();
    match name.get(PREFIX_LEN..) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod test;
