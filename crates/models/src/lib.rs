//! SeaORM entities for the car wash domain plus the field validation shared
//! by every store backend.

pub mod errors;
pub mod db;
pub mod validate;
pub mod car;
pub mod package;
pub mod service_record;
pub mod payment;

#[cfg(test)]
mod tests;
