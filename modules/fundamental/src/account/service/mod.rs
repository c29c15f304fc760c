use crate::{
    account::model::{AccountCreate, AccountDetails, AccountFilter, AccountUpdate, PasswordChange},
    common::ensure_unique,
    Error,
};
use chrono::Utc;
use licensing_auth::{
    authenticator::{user::UserDetails, CredentialStore},
    password::{hash_password, verify_password},
};
use licensing_common::{
    db::{
        limiter::LimiterTrait,
        query::{Columns, Filtering, Query},
        Database,
    },
    model::{Paginated, PaginatedResults},
};
use licensing_entity::account;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::instrument;

pub struct AccountService {
    db: Database,
}

impl AccountService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn columns() -> Columns<account::Column> {
        Columns::new()
            .search(account::Column::Username)
            .search(account::Column::Email)
            .sort(account::Column::Username)
            .sort(account::Column::Email)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_accounts(
        &self,
        search: Query,
        paginated: Paginated,
        filter: AccountFilter,
    ) -> Result<PaginatedResults<AccountDetails>, Error> {
        let mut select = account::Entity::find().filter(account::Column::IsActive.eq(true));
        if let Some(username) = filter.username {
            select = select.filter(account::Column::Username.eq(username));
        }
        if let Some(email) = filter.email {
            select = select.filter(account::Column::Email.eq(email));
        }
        if let Some(is_staff) = filter.is_staff {
            select = select.filter(account::Column::IsStaff.eq(is_staff));
        }

        let limiter = select.filtering(search, &Self::columns())?.limiting(
            &self.db,
            paginated.offset,
            paginated.limit,
        );

        Ok(PaginatedResults::new(limiter, AccountDetails::from).await?)
    }

    async fn find(&self, id: i32) -> Result<account::Model, Error> {
        account::Entity::find_by_id(id)
            .filter(account::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("account {id}")))
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn fetch_account(&self, id: i32) -> Result<AccountDetails, Error> {
        Ok(self.find(id).await?.into())
    }

    /// The number of active accounts.
    pub async fn count(&self) -> Result<u64, Error> {
        Ok(account::Entity::find()
            .filter(account::Column::IsActive.eq(true))
            .count(&self.db)
            .await?)
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn create_account(&self, mut input: AccountCreate) -> Result<AccountDetails, Error> {
        input.prepare()?;

        ensure_unique::<account::Entity, _>(
            &self.db,
            "account",
            None,
            &[(account::Column::Username, "username", Some(input.username.as_str()))],
        )
        .await?;

        let model = account::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(hash_password(&input.password).await?),
            is_staff: Set(input.is_staff),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        log::info!("created account {} ({})", model.id, model.username);

        Ok(model.into())
    }

    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn update_account(
        &self,
        id: i32,
        mut input: AccountUpdate,
    ) -> Result<AccountDetails, Error> {
        input.prepare()?;

        let current = self.find(id).await?;

        ensure_unique::<account::Entity, _>(
            &self.db,
            "account",
            Some((account::Column::Id, id)),
            &[(
                account::Column::Username,
                "username",
                input.username.as_deref(),
            )],
        )
        .await?;

        let mut model = current.into_active_model();
        if let Some(username) = input.username {
            model.username = Set(username);
        }
        if let Some(email) = input.email {
            model.email = Set(email);
        }
        if let Some(password) = input.password {
            model.password_hash = Set(hash_password(&password).await?);
        }
        if let Some(is_staff) = input.is_staff {
            model.is_staff = Set(is_staff);
        }

        let model = if model.is_changed() {
            model.update(&self.db).await?
        } else {
            self.find(id).await?
        };

        Ok(model.into())
    }

    /// Deactivate an account, it can no longer log in.
    #[instrument(skip(self), err(level=tracing::Level::INFO))]
    pub async fn delete_account(&self, id: i32) -> Result<(), Error> {
        let result = account::Entity::update_many()
            .col_expr(account::Column::IsActive, Expr::value(false))
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::IsActive.eq(true))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("account {id}")));
        }

        log::info!("deactivated account {id}");

        Ok(())
    }

    /// Change the password of an account, knowing its current one.
    #[instrument(skip(self, input), err(level=tracing::Level::INFO))]
    pub async fn change_password(&self, id: i32, input: PasswordChange) -> Result<(), Error> {
        let current = self.find(id).await?;

        if !verify_password(&input.old_password, &current.password_hash).await {
            return Err(Error::invalid(
                "old_password",
                "Your old password was entered incorrectly.",
            ));
        }
        validator::Validate::validate(&input)?;

        let mut model = current.into_active_model();
        model.password_hash = Set(hash_password(&input.new_password).await?);
        model.update(&self.db).await?;

        log::info!("changed password of account {id}");

        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for AccountService {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserDetails>, anyhow::Error> {
        let account = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .filter(account::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        let Some(account) = account else {
            return Ok(None);
        };
        if !verify_password(password, &account.password_hash).await {
            return Ok(None);
        }

        Ok(Some(UserDetails {
            id: account.id,
            username: account.username,
            is_staff: account.is_staff,
        }))
    }
}
