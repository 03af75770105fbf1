//! Storage abstractions for the service layer
//!
//! Workflows talk to one [`CarWashRepository`]; the backend is picked once at
//! startup. Lists come back in ascending key order so reports and listings
//! are deterministic on every backend.

use async_trait::async_trait;
use models::{car, package, payment, service_record};

use crate::domain::{NewPayment, NewServiceRecord, PackageInput};
use crate::errors::ServiceError;

pub mod memory;
#[cfg(feature = "seaorm")]
pub mod seaorm;

/// Repository abstraction over the four tables.
///
/// Implementations enforce key uniqueness (`DuplicateKey`) and hand out
/// package, record and payment numbers from sequences that never reuse a
/// value. Referential checks live in the workflows.
#[async_trait]
pub trait CarWashRepository: Send + Sync {
    async fn list_cars(&self) -> Result<Vec<car::Model>, ServiceError>;
    async fn find_car(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError>;
    async fn insert_car(&self, car: car::Model) -> Result<car::Model, ServiceError>;
    async fn update_car(&self, car: car::Model) -> Result<car::Model, ServiceError>;
    async fn delete_car(&self, plate_number: &str) -> Result<bool, ServiceError>;

    async fn list_packages(&self) -> Result<Vec<package::Model>, ServiceError>;
    async fn find_package(&self, package_number: i32) -> Result<Option<package::Model>, ServiceError>;
    async fn insert_package(&self, input: PackageInput) -> Result<package::Model, ServiceError>;
    async fn update_package(&self, package: package::Model) -> Result<package::Model, ServiceError>;
    async fn delete_package(&self, package_number: i32) -> Result<bool, ServiceError>;

    async fn list_service_records(&self) -> Result<Vec<service_record::Model>, ServiceError>;
    async fn find_service_record(&self, record_number: i32) -> Result<Option<service_record::Model>, ServiceError>;
    async fn insert_service_record(&self, record: NewServiceRecord) -> Result<service_record::Model, ServiceError>;
    async fn delete_service_record(&self, record_number: i32) -> Result<bool, ServiceError>;
    async fn count_service_records_for_car(&self, plate_number: &str) -> Result<u64, ServiceError>;
    async fn count_service_records_for_package(&self, package_number: i32) -> Result<u64, ServiceError>;

    async fn list_payments(&self) -> Result<Vec<payment::Model>, ServiceError>;
    async fn find_payment(&self, payment_number: i32) -> Result<Option<payment::Model>, ServiceError>;
    async fn find_payment_by_record(&self, record_number: i32) -> Result<Option<payment::Model>, ServiceError>;
    async fn insert_payment(&self, payment: NewPayment) -> Result<payment::Model, ServiceError>;
    async fn delete_payment(&self, payment_number: i32) -> Result<bool, ServiceError>;
}
