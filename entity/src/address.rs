use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city_or_village: String,
    pub state: String,
    pub country: String,
    pub zip_code: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::licensor::Entity")]
    Licensor,
    #[sea_orm(has_many = "super::licensee::Entity")]
    Licensee,
}

impl Related<super::licensor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Licensor.def()
    }
}

impl Related<super::licensee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Licensee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
