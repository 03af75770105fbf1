//! Migrator registering the car wash tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_car;
mod m20250101_000002_create_package;
mod m20250101_000003_create_service_record;
mod m20250101_000004_create_payment;
mod m20250101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_car::Migration),
            Box::new(m20250101_000002_create_package::Migration),
            Box::new(m20250101_000003_create_service_record::Migration),
            Box::new(m20250101_000004_create_payment::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000005_add_indexes::Migration),
        ]
    }
}
