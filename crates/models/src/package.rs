use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_record, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "package")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub package_number: i32,
    pub package_name: String,
    #[sea_orm(column_type = "Text")]
    pub package_description: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub package_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceRecord }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRecord => Entity::has_many(service_record::Entity).into(),
        }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceRecord.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(n: &str) -> Result<String, ModelError> {
    validate::bounded("packageName", n, 100)
}

/// Description may be empty; it is only trimmed.
pub fn validate_description(d: &str) -> Result<String, ModelError> {
    Ok(d.trim().to_string())
}

pub fn validate_price(p: Decimal) -> Result<Decimal, ModelError> {
    validate::money("packagePrice", p)
}
