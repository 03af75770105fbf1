//! Create `service_record` table with the snapshot columns captured at
//! registration. Foreign keys restrict deletes while records reference a car
//! or package.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRecord::RecordNumber))
                    .col(date(ServiceRecord::ServiceDate))
                    .col(string_len(ServiceRecord::PlateNumber, 20))
                    .col(integer(ServiceRecord::PackageNumber))
                    .col(string_len(ServiceRecord::DriverName, 100))
                    .col(string_len(ServiceRecord::CarType, 50))
                    .col(string_len(ServiceRecord::PackageName, 100))
                    .col(decimal_len(ServiceRecord::PackagePrice, 12, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_car")
                            .from(ServiceRecord::Table, ServiceRecord::PlateNumber)
                            .to(Car::Table, Car::PlateNumber)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_record_package")
                            .from(ServiceRecord::Table, ServiceRecord::PackageNumber)
                            .to(Package::Table, Package::PackageNumber)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord {
    Table,
    RecordNumber,
    ServiceDate,
    PlateNumber,
    PackageNumber,
    DriverName,
    CarType,
    PackageName,
    PackagePrice,
}

#[derive(DeriveIden)]
enum Car { Table, PlateNumber }

#[derive(DeriveIden)]
enum Package { Table, PackageNumber }
