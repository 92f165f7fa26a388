// crates/cityseed-core/src/db/entities/city.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Idempotency key, unique across every country.
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub slug: String,
    pub is_enabled: bool,
    pub is_default: bool,
    pub is_capital: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub population: i64,
    /// JSON array of strings, in dataset order.
    pub postal_codes: Json,
    pub level: i32,
    pub sort_order: i32,
    pub country_id: i32,
    pub region_id: Option<i32>,
    pub zone_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Zone,
    #[sea_orm(has_many = "super::city_translation::Entity")]
    Translations,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::city_translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Translations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Postal codes decoded from the JSON column.
    pub fn postal_codes(&self) -> Vec<String> {
        serde_json::from_value(self.postal_codes.clone()).unwrap_or_default()
    }
}
