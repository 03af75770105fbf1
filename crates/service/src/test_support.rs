#![cfg(test)]
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use async_trait::async_trait;
use models::{car, package, payment, service_record};

use crate::carwash::CarWashService;
use crate::domain::{CarInput, NewPayment, NewServiceRecord, PackageInput};
use crate::errors::ServiceError;
use crate::storage::{memory::MemoryRepository, CarWashRepository};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn car_input(plate: &str) -> CarInput {
    CarInput {
        plate_number: plate.into(),
        car_type: "Sedan".into(),
        car_size: models::car::CarSize::Small,
        driver_name: "Aline".into(),
        phone_number: "0788123456".into(),
    }
}

pub fn package_input(name: &str, price: &str) -> PackageInput {
    PackageInput { package_name: name.into(), package_description: format!("{name} package"), package_price: money(price) }
}

/// Empty service over a fresh in-memory store.
pub fn memory_service() -> CarWashService {
    CarWashService::new(Arc::new(MemoryRepository::new()))
}

/// Service seeded with car `RAA111A` and package #1 "Basic Wash" at 5000.
pub async fn seeded_service() -> CarWashService {
    let svc = memory_service();
    svc.register_car(car_input("RAA111A")).await.unwrap();
    svc.create_package(package_input("Basic Wash", "5000")).await.unwrap();
    svc
}

/// Memory store whose by-record payment lookup never finds anything, as seen
/// by a second process that read before the first one committed.
#[derive(Default)]
pub struct StalePaymentLookup {
    pub inner: MemoryRepository,
}

#[async_trait]
impl CarWashRepository for StalePaymentLookup {
    async fn list_cars(&self) -> Result<Vec<car::Model>, ServiceError> { self.inner.list_cars().await }
    async fn find_car(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError> { self.inner.find_car(plate_number).await }
    async fn insert_car(&self, car: car::Model) -> Result<car::Model, ServiceError> { self.inner.insert_car(car).await }
    async fn update_car(&self, car: car::Model) -> Result<car::Model, ServiceError> { self.inner.update_car(car).await }
    async fn delete_car(&self, plate_number: &str) -> Result<bool, ServiceError> { self.inner.delete_car(plate_number).await }

    async fn list_packages(&self) -> Result<Vec<package::Model>, ServiceError> { self.inner.list_packages().await }
    async fn find_package(&self, n: i32) -> Result<Option<package::Model>, ServiceError> { self.inner.find_package(n).await }
    async fn insert_package(&self, input: PackageInput) -> Result<package::Model, ServiceError> { self.inner.insert_package(input).await }
    async fn update_package(&self, p: package::Model) -> Result<package::Model, ServiceError> { self.inner.update_package(p).await }
    async fn delete_package(&self, n: i32) -> Result<bool, ServiceError> { self.inner.delete_package(n).await }

    async fn list_service_records(&self) -> Result<Vec<service_record::Model>, ServiceError> { self.inner.list_service_records().await }
    async fn find_service_record(&self, n: i32) -> Result<Option<service_record::Model>, ServiceError> { self.inner.find_service_record(n).await }
    async fn insert_service_record(&self, r: NewServiceRecord) -> Result<service_record::Model, ServiceError> { self.inner.insert_service_record(r).await }
    async fn delete_service_record(&self, n: i32) -> Result<bool, ServiceError> { self.inner.delete_service_record(n).await }
    async fn count_service_records_for_car(&self, plate_number: &str) -> Result<u64, ServiceError> { self.inner.count_service_records_for_car(plate_number).await }
    async fn count_service_records_for_package(&self, n: i32) -> Result<u64, ServiceError> { self.inner.count_service_records_for_package(n).await }

    async fn list_payments(&self) -> Result<Vec<payment::Model>, ServiceError> { self.inner.list_payments().await }
    async fn find_payment(&self, n: i32) -> Result<Option<payment::Model>, ServiceError> { self.inner.find_payment(n).await }
    async fn find_payment_by_record(&self, _record_number: i32) -> Result<Option<payment::Model>, ServiceError> { Ok(None) }
    async fn insert_payment(&self, p: NewPayment) -> Result<payment::Model, ServiceError> { self.inner.insert_payment(p).await }
    async fn delete_payment(&self, n: i32) -> Result<bool, ServiceError> { self.inner.delete_payment(n).await }
}

#[cfg(feature = "seaorm")]
pub use db::get_db;

#[cfg(feature = "seaorm")]
mod db {
    use migration::MigratorTrait;
    use sea_orm::DatabaseConnection;
    use tokio::sync::OnceCell;

    // Ensure migrations run only once across the entire test process
    static MIGRATED: OnceCell<()> = OnceCell::const_new();

    /// Migrated connection, or `None` when no database is configured.
    pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
            return Ok(None);
        }
        MIGRATED
            .get_or_try_init(|| async {
                let db = models::db::connect().await?;
                migration::Migrator::up(&db, None).await?;
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        // fresh connection for the current test's runtime
        Ok(Some(models::db::connect().await?))
    }
}
