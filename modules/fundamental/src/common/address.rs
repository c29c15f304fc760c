use licensing_common::validation::non_blank;
use licensing_entity::address;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Address as submitted along with a licensor or licensee.
///
/// A new address is only stored when all of city, state, country and zip code are present,
/// an existing one takes any of the fields given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct AddressInput {
    #[validate(length(max = 128))]
    pub line1: Option<String>,
    #[validate(length(max = 128))]
    pub line2: Option<String>,
    #[serde(alias = "location")]
    #[validate(length(max = 128))]
    pub city_or_village: Option<String>,
    #[validate(length(max = 128))]
    pub state: Option<String>,
    #[validate(length(max = 128))]
    pub country: Option<String>,
    #[validate(range(min = 1))]
    pub zip_code: Option<i32>,
}

impl AddressInput {
    /// Trim all text, blank values become absent.
    pub fn normalize(&mut self) {
        for value in [
            &mut self.line1,
            &mut self.line2,
            &mut self.city_or_village,
            &mut self.state,
            &mut self.country,
        ] {
            *value = non_blank(value.take());
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressDetails {
    pub id: i32,
    #[schema(required)]
    pub line1: Option<String>,
    #[schema(required)]
    pub line2: Option<String>,
    pub city_or_village: String,
    pub state: String,
    pub country: String,
    pub zip_code: i32,
}

impl From<address::Model> for AddressDetails {
    fn from(value: address::Model) -> Self {
        Self {
            id: value.id,
            line1: value.line1,
            line2: value.line2,
            city_or_village: value.city_or_village,
            state: value.state,
            country: value.country,
            zip_code: value.zip_code,
        }
    }
}

/// Store an address for its owner, returning the id the owner links to.
///
/// The fields present in `input` are applied to the currently linked address. Without one, a
/// new address is only created when city, state, country and zip code are all present,
/// otherwise nothing is linked.
pub async fn save_address<C: ConnectionTrait>(
    db: &C,
    current: Option<i32>,
    input: Option<AddressInput>,
) -> Result<Option<i32>, DbErr> {
    let Some(input) = input else {
        return Ok(current);
    };

    let existing = match current {
        Some(id) => address::Entity::find_by_id(id).one(db).await?,
        None => None,
    };

    let model = match existing {
        Some(existing) => {
            let mut model = existing.into_active_model();
            if let Some(line1) = input.line1 {
                model.line1 = Set(Some(line1));
            }
            if let Some(line2) = input.line2 {
                model.line2 = Set(Some(line2));
            }
            if let Some(city_or_village) = input.city_or_village {
                model.city_or_village = Set(city_or_village);
            }
            if let Some(state) = input.state {
                model.state = Set(state);
            }
            if let Some(country) = input.country {
                model.country = Set(country);
            }
            if let Some(zip_code) = input.zip_code {
                model.zip_code = Set(zip_code);
            }
            if !model.is_changed() {
                return Ok(current);
            }
            model.update(db).await?
        }
        None => {
            let (Some(city_or_village), Some(state), Some(country), Some(zip_code)) = (
                input.city_or_village,
                input.state,
                input.country,
                input.zip_code,
            ) else {
                return Ok(current);
            };

            address::ActiveModel {
                line1: Set(input.line1),
                line2: Set(input.line2),
                city_or_village: Set(city_or_village),
                state: Set(state),
                country: Set(country),
                zip_code: Set(zip_code),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    log::debug!("saved address {}", model.id);

    Ok(Some(model.id))
}
