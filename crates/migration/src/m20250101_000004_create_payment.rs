//! Create `payment` table. At most one payment per service record is
//! enforced by the unique index added in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::PaymentNumber))
                    .col(integer(Payment::RecordNumber))
                    .col(decimal_len(Payment::AmountPaid, 12, 2))
                    .col(date(Payment::PaymentDate))
                    .col(date(Payment::ServiceDate))
                    .col(string_len(Payment::PlateNumber, 20))
                    .col(string_len(Payment::DriverName, 100))
                    .col(string_len(Payment::PackageName, 100))
                    .col(decimal_len(Payment::PackagePrice, 12, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_service_record")
                            .from(Payment::Table, Payment::RecordNumber)
                            .to(ServiceRecord::Table, ServiceRecord::RecordNumber)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment {
    Table,
    PaymentNumber,
    RecordNumber,
    AmountPaid,
    PaymentDate,
    ServiceDate,
    PlateNumber,
    DriverName,
    PackageName,
    PackagePrice,
}

#[derive(DeriveIden)]
enum ServiceRecord { Table, RecordNumber }
