use super::{Columns, Error};
use sea_orm::{ColumnTrait, Order, QueryOrder};

pub(crate) struct Sort<C: ColumnTrait> {
    field: C,
    order: Order,
}

impl<C: ColumnTrait> Sort<C> {
    pub(crate) fn order_by<T: QueryOrder>(self, stmt: T) -> T {
        stmt.order_by(self.field, self.order)
    }

    pub(crate) fn parse(s: &str, columns: &Columns<C>) -> Result<Self, Error> {
        let s = s.trim().to_lowercase();
        let (field, order) = match s.split(':').collect::<Vec<_>>()[..] {
            [f] => (f, Order::Asc),
            [f, "asc"] => (f, Order::Asc),
            [f, "desc"] => (f, Order::Desc),
            [_, dir] => {
                return Err(Error::SearchSyntax(format!(
                    "'{dir}' is an invalid sort direction. Try [asc, desc]"
                )));
            }
            _ => {
                return Err(Error::SearchSyntax(format!(
                    "'{s}' is invalid sort syntax. Try 'field:dir'"
                )));
            }
        };

        Ok(Self {
            field: columns.for_sort(field)?,
            order,
        })
    }
}
