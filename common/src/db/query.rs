mod columns;
mod filtering;
mod sort;

pub use columns::Columns;
pub use filtering::Filtering;

use utoipa::IntoParams;

/// Free-text search and sorting, as accepted by list endpoints.
#[derive(
    Clone, Default, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, IntoParams,
)]
pub struct Query {
    /// Case-insensitive text to search for, matched against each searchable field
    #[serde(default)]
    pub q: String,
    /// Comma separated list of `field[:asc|:desc]`
    #[serde(default)]
    pub sort: String,
}

impl Query {
    pub fn q(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn sort(sort: impl Into<String>) -> Self {
        Self {
            sort: sort.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("query syntax error: {0}")]
    SearchSyntax(String),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QuerySelect, QueryTrait};
    use test_log::test;

    pub(crate) mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "widget")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub name: String,
            pub description: String,
            pub color: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    pub(crate) fn columns() -> Columns<widget::Column> {
        Columns::new()
            .search(widget::Column::Name)
            .search(widget::Column::Description)
            .sort(widget::Column::Name)
    }

    fn sql(query: Query) -> Result<String, Error> {
        Ok(widget::Entity::find()
            .select_only()
            .column(widget::Column::Id)
            .filtering(query, &columns())?
            .build(DbBackend::Postgres)
            .to_string())
    }

    #[test]
    fn empty_query_orders_by_primary_key() -> Result<(), anyhow::Error> {
        assert_eq!(
            sql(Query::default())?,
            r#"SELECT "widget"."id" FROM "widget" ORDER BY "widget"."id" ASC"#
        );
        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_over_searchable_columns() -> Result<(), anyhow::Error> {
        let sql = sql(Query::q("Blue"))?;
        assert!(sql.contains(r#"LOWER("widget"."name") LIKE"#), "{sql}");
        assert!(sql.contains(r#"LOWER("widget"."description") LIKE"#), "{sql}");
        assert!(!sql.contains(r#"LOWER("widget"."color")"#), "{sql}");
        assert!(sql.contains("%blue%"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        Ok(())
    }

    #[test]
    fn blank_search_is_ignored() -> Result<(), anyhow::Error> {
        assert!(!sql(Query::q("   "))?.contains("WHERE"));
        Ok(())
    }

    #[test]
    fn sorting() -> Result<(), anyhow::Error> {
        assert_eq!(
            sql(Query::sort("name:desc"))?,
            r#"SELECT "widget"."id" FROM "widget" ORDER BY "widget"."name" DESC, "widget"."id" ASC"#
        );
        Ok(())
    }

    #[test]
    fn sorting_on_unknown_field_fails() {
        assert!(matches!(
            sql(Query::sort("color")),
            Err(Error::SearchSyntax(_))
        ));
    }
}
