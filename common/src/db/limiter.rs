use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, Paginator, PaginatorTrait, QuerySelect,
    Select, SelectModel, SelectTwo, SelectTwoModel, Selector, SelectorTrait,
};

/// A page of a query, along with the query counting all of its rows.
pub struct Limiter<'db, C, S>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    db: &'db C,
    page: Selector<S>,
    counter: Paginator<'db, C, S>,
}

impl<'db, C, S> Limiter<'db, C, S>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    pub async fn fetch(self) -> Result<Vec<S::Item>, DbErr> {
        self.page.all(self.db).await
    }

    /// The number of rows, ignoring offset and limit.
    pub async fn total(&self) -> Result<u64, DbErr> {
        self.counter.num_items().await
    }
}

pub trait LimiterTrait<'db, C>
where
    C: ConnectionTrait,
{
    type Selector: SelectorTrait + 'db;

    /// Apply `offset` and `limit`, a value of zero disables either one.
    fn limiting(self, db: &'db C, offset: u64, limit: u64) -> Limiter<'db, C, Self::Selector>;
}

/// Restrict a query to a window of rows.
fn window<Q: QuerySelect>(query: Q, offset: u64, limit: u64) -> Q {
    query
        .offset((offset > 0).then_some(offset))
        .limit((limit > 0).then_some(limit))
}

impl<'db, C, E, M> LimiterTrait<'db, C> for Select<E>
where
    C: ConnectionTrait,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'db,
{
    type Selector = SelectModel<M>;

    fn limiting(self, db: &'db C, offset: u64, limit: u64) -> Limiter<'db, C, Self::Selector> {
        Limiter {
            db,
            page: window(self.clone(), offset, limit).into_model(),
            counter: self.paginate(db, 1),
        }
    }
}

/// A query joining an optional second entity, like a party and its address. Only rows of the
/// first entity are counted.
impl<'db, C, E1, E2, M1, M2> LimiterTrait<'db, C> for SelectTwo<E1, E2>
where
    C: ConnectionTrait,
    E1: EntityTrait<Model = M1>,
    E2: EntityTrait<Model = M2>,
    M1: FromQueryResult + Sized + Send + Sync + 'db,
    M2: FromQueryResult + Sized + Send + Sync + 'db,
{
    type Selector = SelectTwoModel<M1, M2>;

    fn limiting(self, db: &'db C, offset: u64, limit: u64) -> Limiter<'db, C, Self::Selector> {
        Limiter {
            db,
            page: window(self.clone(), offset, limit).into_model(),
            counter: self.paginate(db, 1),
        }
    }
}
