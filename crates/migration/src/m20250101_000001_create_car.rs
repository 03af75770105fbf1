//! Create `car` table keyed by plate number.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(string_len(Car::PlateNumber, 20).primary_key())
                    .col(string_len(Car::CarType, 50))
                    .col(string_len(Car::CarSize, 16))
                    .col(string_len(Car::DriverName, 100))
                    .col(string_len(Car::PhoneNumber, 20))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    PlateNumber,
    CarType,
    CarSize,
    DriverName,
    PhoneNumber,
}
