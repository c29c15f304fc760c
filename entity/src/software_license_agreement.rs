use crate::status::Status;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "software_license_agreement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub effective_date: Date,
    pub licensor_id: i32,
    pub licensee_id: i32,
    pub software_id: i32,
    /// Comma separated list of IP addresses
    pub valid_ip_addresses: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub terms_and_conditions: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub limitation_of_liability: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub termination: Option<String>,
    pub expiry_date: Date,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_plan: Option<String>,
    pub no_of_copies: i32,
    pub delivery_date: Date,
    /// In months
    pub warranty_period: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub maintenance_agreement: Option<String>,
    pub status: Status,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::licensor::Entity",
        from = "Column::LicensorId",
        to = "super::licensor::Column::Id",
        on_delete = "Cascade"
    )]
    Licensor,
    #[sea_orm(
        belongs_to = "super::licensee::Entity",
        from = "Column::LicenseeId",
        to = "super::licensee::Column::Id",
        on_delete = "Cascade"
    )]
    Licensee,
    #[sea_orm(
        belongs_to = "super::software::Entity",
        from = "Column::SoftwareId",
        to = "super::software::Column::Id",
        on_delete = "Cascade"
    )]
    Software,
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

impl Related<super::software::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Software.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
