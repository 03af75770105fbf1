use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use sea_orm::prelude::Decimal;

use crate::db::connect;
use crate::{car, package, payment, service_record};

/// Connect and migrate, or `None` when no database is configured.
async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

fn unique_plate() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("T{:09}", nanos)
}

async fn insert_car(db: &DatabaseConnection, plate: &str) -> Result<car::Model> {
    let am = car::ActiveModel {
        plate_number: Set(plate.to_string()),
        car_type: Set("Sedan".into()),
        car_size: Set(car::CarSize::Medium),
        driver_name: Set("Aline".into()),
        phone_number: Set("0788123456".into()),
    };
    Ok(am.insert(db).await?)
}

async fn insert_package(db: &DatabaseConnection) -> Result<package::Model> {
    let am = package::ActiveModel {
        package_number: NotSet,
        package_name: Set("Basic Wash".into()),
        package_description: Set("Exterior".into()),
        package_price: Set(Decimal::from_str("5000.00")?),
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn test_car_package_record_payment_chain() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let plate = unique_plate();
    let c = insert_car(&db, &plate).await?;
    let p = insert_package(&db).await?;
    assert!(p.package_number > 0);

    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let rec = service_record::ActiveModel {
        record_number: NotSet,
        service_date: Set(day),
        plate_number: Set(c.plate_number.clone()),
        package_number: Set(p.package_number),
        driver_name: Set(c.driver_name.clone()),
        car_type: Set(c.car_type.clone()),
        package_name: Set(p.package_name.clone()),
        package_price: Set(p.package_price),
    }
    .insert(&db)
    .await?;

    let pay = payment::ActiveModel {
        payment_number: NotSet,
        record_number: Set(rec.record_number),
        amount_paid: Set(Decimal::from_str("5000.00")?),
        payment_date: Set(day),
        service_date: Set(day),
        plate_number: Set(rec.plate_number.clone()),
        driver_name: Set(rec.driver_name.clone()),
        package_name: Set(rec.package_name.clone()),
        package_price: Set(rec.package_price),
    };
    let first = pay.clone().insert(&db).await?;
    assert_eq!(first.amount_paid, Decimal::from(5000));

    // unique index on record_number rejects a second payment
    assert!(pay.insert(&db).await.is_err());

    // restrictive foreign keys block deleting a referenced car
    assert!(car::Entity::delete_by_id(plate.clone()).exec(&db).await.is_err());

    payment::Entity::delete_by_id(first.payment_number).exec(&db).await?;
    service_record::Entity::delete_by_id(rec.record_number).exec(&db).await?;
    package::Entity::delete_by_id(p.package_number).exec(&db).await?;
    car::Entity::delete_by_id(plate).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_plate_rejected() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let plate = unique_plate();
    insert_car(&db, &plate).await?;
    assert!(insert_car(&db, &plate).await.is_err());

    car::Entity::delete_by_id(plate).exec(&db).await?;
    Ok(())
}
