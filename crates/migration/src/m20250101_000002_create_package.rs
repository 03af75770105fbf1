//! Create `package` table. `package_number` is an identity column so ids
//! are never handed out twice.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Package::Table)
                    .if_not_exists()
                    .col(pk_auto(Package::PackageNumber))
                    .col(string_len(Package::PackageName, 100))
                    .col(text(Package::PackageDescription))
                    .col(decimal_len(Package::PackagePrice, 12, 2))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Package::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Package {
    Table,
    PackageNumber,
    PackageName,
    PackageDescription,
    PackagePrice,
}
