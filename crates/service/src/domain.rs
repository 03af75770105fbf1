use chrono::NaiveDate;
use models::car::CarSize;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Car registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub plate_number: String,
    pub car_type: String,
    pub car_size: CarSize,
    pub driver_name: String,
    pub phone_number: String,
}

/// Partial car update. `plate_number` is accepted only when it matches the
/// car being updated; plates never change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPatch {
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub car_type: Option<String>,
    #[serde(default)]
    pub car_size: Option<CarSize>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Package creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    pub package_name: String,
    #[serde(default)]
    pub package_description: String,
    pub package_price: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePatch {
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub package_description: Option<String>,
    #[serde(default)]
    pub package_price: Option<Decimal>,
}

/// Service registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub package_number: i32,
}

/// Payment input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub record_number: i32,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
}

/// Service record ready for insertion, snapshot already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRecord {
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub package_number: i32,
    pub driver_name: String,
    pub car_type: String,
    pub package_name: String,
    pub package_price: Decimal,
}

/// Payment ready for insertion, snapshot already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub record_number: i32,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub service_date: NaiveDate,
    pub plate_number: String,
    pub driver_name: String,
    pub package_name: String,
    pub package_price: Decimal,
}

/// Printable bill for one paid service record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    pub payment_number: i32,
    pub record_number: i32,
    pub payment_date: NaiveDate,
    pub service_date: NaiveDate,
    pub amount_paid: Decimal,
    pub plate_number: String,
    pub driver_name: String,
    pub phone_number: String,
    pub car_type: String,
    pub car_size: CarSize,
    pub package_number: i32,
    pub package_name: String,
    pub package_description: String,
    pub package_price: Decimal,
}

/// One payment as listed inside a report group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub payment_number: i32,
    pub record_number: i32,
    pub plate_number: String,
    pub driver_name: String,
    pub service_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub package_price: Decimal,
    pub amount_paid: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    pub service_name: String,
    pub count: u32,
    pub total_amount: Decimal,
    pub records: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_records: u32,
    pub total_amount: Decimal,
    pub services: Vec<ServiceGroup>,
}

/// Per-service totals without the individual lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTotal {
    pub service_name: String,
    pub count: u32,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u32,
    pub total_amount: Decimal,
    pub services: Vec<ServiceTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_records: u32,
    pub total_amount: Decimal,
    pub days: Vec<DayBucket>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_cars: u64,
    pub total_packages: u64,
    pub total_service_records: u64,
    pub unpaid_services: u64,
    pub total_revenue: Decimal,
    pub revenue_by_service: Vec<ServiceTotal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_amount_accepts_number_or_string() {
        let a: PaymentInput =
            serde_json::from_str(r#"{"recordNumber":1,"amountPaid":5000,"paymentDate":"2024-05-02"}"#).unwrap();
        let b: PaymentInput =
            serde_json::from_str(r#"{"recordNumber":1,"amountPaid":"5000.00","paymentDate":"2024-05-02"}"#).unwrap();
        assert_eq!(a.amount_paid, b.amount_paid);
        assert_eq!(a.payment_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let r = serde_json::from_str::<ServiceInput>(r#"{"serviceDate":"02/05/2024","plateNumber":"RAA111A","packageNumber":1}"#);
        assert!(r.is_err());
    }

    #[test]
    fn car_patch_fields_are_optional() {
        let p: CarPatch = serde_json::from_str(r#"{"driverName":"Eric"}"#).unwrap();
        assert_eq!(p.driver_name.as_deref(), Some("Eric"));
        assert!(p.plate_number.is_none() && p.car_size.is_none());
    }
}
