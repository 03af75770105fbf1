//! Service layer for the car wash backend.
//! - Workflows enforce existence, payment and delete rules before any write.
//! - Storage is behind [`storage::CarWashRepository`]; memory or SeaORM.
//! - Reports are pure functions over stored payments.

pub mod errors;
pub mod domain;
pub mod storage;
pub mod carwash;
pub mod catalog;
pub mod service_records;
pub mod payments;
pub mod reports;
#[cfg(test)]
pub mod test_support;

pub use carwash::CarWashService;
pub use errors::{EntityKind, ServiceError};
