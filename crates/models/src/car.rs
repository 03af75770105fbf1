use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_record, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plate_number: String,
    pub car_type: String,
    pub car_size: CarSize,
    pub driver_name: String,
    pub phone_number: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CarSize {
    #[sea_orm(string_value = "Small")]
    Small,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Large")]
    Large,
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

pub const PLATE_NUMBER_MAX: usize = 20;

pub fn validate_plate_number(p: &str) -> Result<String, ModelError> {
    validate::bounded("plateNumber", p, PLATE_NUMBER_MAX)
}

pub fn validate_car_type(t: &str) -> Result<String, ModelError> {
    validate::bounded("carType", t, 50)
}

pub fn validate_driver_name(n: &str) -> Result<String, ModelError> {
    validate::bounded("driverName", n, 100)
}

/// Digits with optional leading `+` and spaces or dashes as separators.
pub fn validate_phone_number(p: &str) -> Result<String, ModelError> {
    let v = validate::bounded("phoneNumber", p, 20)?;
    let body = v.strip_prefix('+').unwrap_or(&v);
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return Err(ModelError::Validation("phoneNumber may only contain digits, spaces and dashes".into()));
    }
    if body.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
        return Err(ModelError::Validation("phoneNumber must contain at least 7 digits".into()));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_number_rules() {
        assert_eq!(validate_phone_number(" +250 788-123-456 ").unwrap(), "+250 788-123-456");
        assert!(validate_phone_number("0788123456").is_ok());
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("07881234ab").is_err());
    }

    #[test]
    fn car_size_serializes_as_title_case() {
        assert_eq!(serde_json::to_string(&CarSize::Medium).unwrap(), "\"Medium\"");
        let parsed: CarSize = serde_json::from_str("\"Large\"").unwrap();
        assert_eq!(parsed, CarSize::Large);
        assert!(serde_json::from_str::<CarSize>("\"Huge\"").is_err());
    }

    #[test]
    fn car_json_uses_camel_case() {
        let car = Model {
            plate_number: "RAA111A".into(),
            car_type: "Sedan".into(),
            car_size: CarSize::Small,
            driver_name: "Aline".into(),
            phone_number: "0788123456".into(),
        };
        let v = serde_json::to_value(&car).unwrap();
        assert_eq!(v["plateNumber"], "RAA111A");
        assert_eq!(v["carSize"], "Small");
    }
}
