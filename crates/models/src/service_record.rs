use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{car, package, payment};

/// One wash/service event. `driver_name`, `car_type`, `package_name` and
/// `package_price` are copied from the car and package at registration and
/// never follow later edits.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_record")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub record_number: i32,
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub package_number: i32,
    pub driver_name: String,
    pub car_type: String,
    pub package_name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub package_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Car, Package, Payment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Car => Entity::belongs_to(car::Entity).from(Column::PlateNumber).to(car::Column::PlateNumber).into(),
            Relation::Package => Entity::belongs_to(package::Entity).from(Column::PackageNumber).to(package::Column::PackageNumber).into(),
            Relation::Payment => Entity::has_one(payment::Entity).into(),
        }
    }
}

impl Related<car::Entity> for Entity {
    fn to() -> RelationDef { Relation::Car.def() }
}

impl Related<package::Entity> for Entity {
    fn to() -> RelationDef { Relation::Package.def() }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payment.def() }
}

impl ActiveModelBehavior for ActiveModel {}
