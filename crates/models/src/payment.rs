use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_record, validate};

/// Payment settling one service record. The trailing fields are copied from
/// the service record when the payment is taken so bills and reports keep
/// the price and names in effect at that time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub payment_number: i32,
    #[sea_orm(unique)]
    pub record_number: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub driver_name: String,
    pub package_name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub package_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceRecord }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRecord => Entity::belongs_to(service_record::Entity)
                .from(Column::RecordNumber)
                .to(service_record::Column::RecordNumber)
                .into(),
        }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceRecord.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_amount(a: Decimal) -> Result<Decimal, ModelError> {
    validate::money("amountPaid", a)
}
