pub mod address;

use crate::Error;
use licensing_common::validation::FieldErrors;
use licensing_entity::status::Status;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
pub struct StatusFilter {
    /// Only return entries with this status
    #[param(inline)]
    pub status: Option<Status>,
}

/// Check that no other row holds one of the given values.
///
/// Soft-deleted rows still count, they keep their values. `id` excludes the row being
/// updated.
pub async fn ensure_unique<E, C>(
    db: &C,
    name: &str,
    id: Option<(E::Column, i32)>,
    values: &[(E::Column, &str, Option<&str>)],
) -> Result<(), Error>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut errors = FieldErrors::new();

    for (column, field, value) in values {
        let Some(value) = value else {
            continue;
        };

        let mut select = E::find().filter(column.eq(*value));
        if let Some((id_column, id)) = id {
            select = select.filter(id_column.ne(id));
        }

        if select.one(db).await?.is_some() {
            errors.add(*field, format!("{name} with this {field} already exists."));
        }
    }

    errors.into_result().map_err(Error::Uniqueness)
}
