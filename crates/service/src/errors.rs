use std::fmt;

use thiserror::Error;

/// The four record types a workflow can fail to find or collide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Car,
    Package,
    ServiceRecord,
    Payment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Car => "car",
            EntityKind::Package => "package",
            EntityKind::ServiceRecord => "service record",
            EntityKind::Payment => "payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} {1} not found")]
    NotFound(EntityKind, String),
    #[error("{0} {1} already exists")]
    DuplicateKey(EntityKind, String),
    #[error("service record {0} is already paid")]
    AlreadyPaid(i32),
    #[error("{0} {1} is still referenced by {2}")]
    HasDependents(EntityKind, String, &'static str),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound(entity, key.to_string())
    }

    /// Machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(..) => "not_found",
            ServiceError::DuplicateKey(..) => "duplicate_key",
            ServiceError::AlreadyPaid(_) => "already_paid",
            ServiceError::HasDependents(..) => "has_dependents",
            ServiceError::Db(_) => "db",
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(..) => 1002,
            ServiceError::DuplicateKey(..) => 1003,
            ServiceError::AlreadyPaid(_) => 1004,
            ServiceError::HasDependents(..) => 1005,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => ServiceError::Validation(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}
