use crate::db::limiter::Limiter;
use sea_orm::{ConnectionTrait, DbErr, SelectorTrait};
use utoipa::{IntoParams, ToSchema};

#[derive(
    IntoParams, Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize,
)]
pub struct Paginated {
    /// The first item to return, skipping all that come before it.
    #[serde(default)]
    pub offset: u64,
    /// The maximum number of entries to return.
    ///
    /// Zero means: no limit
    #[serde(default)]
    pub limit: u64,
}

#[derive(ToSchema, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaginatedResults<R> {
    pub items: Vec<R>,
    pub total: u64,
}

impl<R> PaginatedResults<R> {
    /// Fetch one window of a limited query, converting each row.
    pub async fn new<'db, C, S, F>(limiter: Limiter<'db, C, S>, f: F) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
        S: SelectorTrait + 'db,
        F: FnMut(S::Item) -> R,
    {
        let total = limiter.total().await?;
        let items = limiter.fetch().await?.into_iter().map(f).collect();

        Ok(Self { items, total })
    }

    pub fn map<O, F: FnMut(R) -> O>(self, f: F) -> PaginatedResults<O> {
        PaginatedResults {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
