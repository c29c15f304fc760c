use super::{sort::Sort, Columns, Error, Query};
use sea_orm::{EntityTrait, Iterable, PrimaryKeyToColumn, QueryFilter, QueryOrder, Select};

/// Apply a [`Query`] to a select statement, restricted to the allowed [`Columns`].
///
/// Results are always ordered by the primary key last, so that paging through them
/// is stable.
pub trait Filtering<T: EntityTrait> {
    fn filtering(self, search: Query, columns: &Columns<T::Column>) -> Result<Self, Error>
    where
        Self: Sized;
}

impl<T: EntityTrait> Filtering<T> for Select<T> {
    fn filtering(self, search: Query, columns: &Columns<T::Column>) -> Result<Self, Error> {
        let Query { q, sort } = &search;
        log::debug!("filtering with: q='{q}' sort='{sort}'");

        let result = if q.trim().is_empty() {
            self
        } else {
            self.filter(columns.search_condition(q))
        };

        let result = sort
            .split_terminator(',')
            .map(|s| Sort::parse(s, columns))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .fold(result, |select, s| s.order_by(select));

        Ok(T::PrimaryKey::iter().fold(result, |select, pk| {
            select.order_by_asc(pk.into_column())
        }))
    }
}
