use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ServiceRecord: lookups by car when checking delete dependents
        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_plate")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::PlateNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_record_package")
                    .table(ServiceRecord::Table)
                    .col(ServiceRecord::PackageNumber)
                    .to_owned(),
            )
            .await?;

        // Payment: one payment per service record
        manager
            .create_index(
                Index::create()
                    .name("uniq_payment_record")
                    .table(Payment::Table)
                    .col(Payment::RecordNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Payment: daily/monthly report filters
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_date")
                    .table(Payment::Table)
                    .col(Payment::PaymentDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_record_plate").table(ServiceRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_record_package").table(ServiceRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_payment_record").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_date").table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRecord { Table, PlateNumber, PackageNumber }

#[derive(DeriveIden)]
enum Payment { Table, RecordNumber, PaymentDate }
