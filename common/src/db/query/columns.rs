use super::Error;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ColumnTrait, Condition,
};

/// The allow-list of columns a list operation may search and sort on.
#[derive(Clone, Debug)]
pub struct Columns<C: ColumnTrait> {
    search: Vec<C>,
    sort: Vec<C>,
}

impl<C: ColumnTrait> Default for Columns<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColumnTrait> Columns<C> {
    pub fn new() -> Self {
        Self {
            search: vec![],
            sort: vec![],
        }
    }

    /// Include a text column in the free-text search
    pub fn search(mut self, column: C) -> Self {
        self.search.push(column);
        self
    }

    /// Allow sorting by a column, addressed by its column name
    pub fn sort(mut self, column: C) -> Self {
        self.sort.push(column);
        self
    }

    pub(crate) fn search_condition(&self, q: &str) -> Condition {
        let pattern = like_pattern(q);
        self.search.iter().fold(Condition::any(), |cond, column| {
            cond.add(
                Expr::expr(Func::lower(column.into_expr()))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
        })
    }

    pub(crate) fn for_sort(&self, field: &str) -> Result<C, Error> {
        self.sort
            .iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(field))
            .copied()
            .ok_or_else(|| {
                Error::SearchSyntax(format!("Invalid field name for sort: '{field}'"))
            })
    }
}

/// Build a lower case `LIKE` pattern matching `q` anywhere, escaping wildcards.
fn like_pattern(q: &str) -> String {
    format!(
        "%{}%",
        q.trim()
            .to_lowercase()
            .replace('\\', r"\\")
            .replace('%', r"\%")
            .replace('_', r"\_")
    )
}
