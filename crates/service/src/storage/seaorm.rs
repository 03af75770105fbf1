use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use models::{car, package, payment, service_record};

use super::CarWashRepository;
use crate::domain::{NewPayment, NewServiceRecord, PackageInput};
use crate::errors::{EntityKind, ServiceError};

/// PostgreSQL-backed repository. Sequences are identity columns created by
/// `migration::Migrator`.
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Constraint violations become domain errors; everything else is `Db`.
fn map_write_err(e: DbErr, entity: EntityKind, key: impl ToString) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateKey(entity, key.to_string()),
        _ => match e {
            DbErr::RecordNotUpdated => ServiceError::not_found(entity, key.to_string()),
            other => ServiceError::Db(other.to_string()),
        },
    }
}

/// A restrictive foreign key refusing a delete means rows still point here.
fn map_delete_err(e: DbErr, entity: EntityKind, key: impl ToString, dependents: &'static str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!(%entity, %detail, "delete blocked by foreign key");
            ServiceError::HasDependents(entity, key.to_string(), dependents)
        }
        _ => map_write_err(e, entity, key),
    }
}

/// Referenced table of a violated foreign key, read from the constraint name
/// in the database message.
fn fk_target(detail: &str) -> Option<EntityKind> {
    if detail.contains("fk_service_record_car") {
        Some(EntityKind::Car)
    } else if detail.contains("fk_service_record_package") {
        Some(EntityKind::Package)
    } else if detail.contains("fk_payment_service_record") {
        Some(EntityKind::ServiceRecord)
    } else {
        None
    }
}

fn fk_violation(e: &DbErr) -> Option<EntityKind> {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => fk_target(&detail),
        _ => None,
    }
}

#[async_trait::async_trait]
impl CarWashRepository for SeaOrmRepository {
    async fn list_cars(&self) -> Result<Vec<car::Model>, ServiceError> {
        Ok(car::Entity::find().order_by_asc(car::Column::PlateNumber).all(&self.db).await?)
    }

    async fn find_car(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError> {
        Ok(car::Entity::find_by_id(plate_number.to_string()).one(&self.db).await?)
    }

    async fn insert_car(&self, car: car::Model) -> Result<car::Model, ServiceError> {
        let plate = car.plate_number.clone();
        let am = car::ActiveModel {
            plate_number: Set(car.plate_number),
            car_type: Set(car.car_type),
            car_size: Set(car.car_size),
            driver_name: Set(car.driver_name),
            phone_number: Set(car.phone_number),
        };
        am.insert(&self.db).await.map_err(|e| map_write_err(e, EntityKind::Car, plate))
    }

    async fn update_car(&self, car: car::Model) -> Result<car::Model, ServiceError> {
        let plate = car.plate_number.clone();
        let am = car::ActiveModel {
            plate_number: Unchanged(car.plate_number),
            car_type: Set(car.car_type),
            car_size: Set(car.car_size),
            driver_name: Set(car.driver_name),
            phone_number: Set(car.phone_number),
        };
        am.update(&self.db).await.map_err(|e| map_write_err(e, EntityKind::Car, plate))
    }

    async fn delete_car(&self, plate_number: &str) -> Result<bool, ServiceError> {
        let res = car::Entity::delete_by_id(plate_number.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| map_delete_err(e, EntityKind::Car, plate_number, "service records"))?;
        Ok(res.rows_affected > 0)
    }

    async fn list_packages(&self) -> Result<Vec<package::Model>, ServiceError> {
        Ok(package::Entity::find().order_by_asc(package::Column::PackageNumber).all(&self.db).await?)
    }

    async fn find_package(&self, package_number: i32) -> Result<Option<package::Model>, ServiceError> {
        Ok(package::Entity::find_by_id(package_number).one(&self.db).await?)
    }

    async fn insert_package(&self, input: PackageInput) -> Result<package::Model, ServiceError> {
        let am = package::ActiveModel {
            package_number: NotSet,
            package_name: Set(input.package_name.clone()),
            package_description: Set(input.package_description),
            package_price: Set(input.package_price),
        };
        am.insert(&self.db).await.map_err(|e| map_write_err(e, EntityKind::Package, input.package_name))
    }

    async fn update_package(&self, package: package::Model) -> Result<package::Model, ServiceError> {
        let number = package.package_number;
        let am = package::ActiveModel {
            package_number: Unchanged(package.package_number),
            package_name: Set(package.package_name),
            package_description: Set(package.package_description),
            package_price: Set(package.package_price),
        };
        am.update(&self.db).await.map_err(|e| map_write_err(e, EntityKind::Package, number))
    }

    async fn delete_package(&self, package_number: i32) -> Result<bool, ServiceError> {
        let res = package::Entity::delete_by_id(package_number)
            .exec(&self.db)
            .await
            .map_err(|e| map_delete_err(e, EntityKind::Package, package_number, "service records"))?;
        Ok(res.rows_affected > 0)
    }

    async fn list_service_records(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        Ok(service_record::Entity::find()
            .order_by_asc(service_record::Column::RecordNumber)
            .all(&self.db)
            .await?)
    }

    async fn find_service_record(&self, record_number: i32) -> Result<Option<service_record::Model>, ServiceError> {
        Ok(service_record::Entity::find_by_id(record_number).one(&self.db).await?)
    }

    async fn insert_service_record(&self, record: NewServiceRecord) -> Result<service_record::Model, ServiceError> {
        let plate = record.plate_number.clone();
        let package_number = record.package_number;
        let am = service_record::ActiveModel {
            record_number: NotSet,
            service_date: Set(record.service_date),
            plate_number: Set(record.plate_number),
            package_number: Set(record.package_number),
            driver_name: Set(record.driver_name),
            car_type: Set(record.car_type),
            package_name: Set(record.package_name),
            package_price: Set(record.package_price),
        };
        am.insert(&self.db).await.map_err(|e| match fk_violation(&e) {
            // car or package removed by another process after the workflow's lookup
            Some(EntityKind::Package) => ServiceError::not_found(EntityKind::Package, package_number),
            Some(_) => ServiceError::not_found(EntityKind::Car, &plate),
            None => map_write_err(e, EntityKind::ServiceRecord, &plate),
        })
    }

    async fn delete_service_record(&self, record_number: i32) -> Result<bool, ServiceError> {
        let res = service_record::Entity::delete_by_id(record_number)
            .exec(&self.db)
            .await
            .map_err(|e| map_delete_err(e, EntityKind::ServiceRecord, record_number, "a payment"))?;
        Ok(res.rows_affected > 0)
    }

    async fn count_service_records_for_car(&self, plate_number: &str) -> Result<u64, ServiceError> {
        Ok(service_record::Entity::find()
            .filter(service_record::Column::PlateNumber.eq(plate_number))
            .count(&self.db)
            .await?)
    }

    async fn count_service_records_for_package(&self, package_number: i32) -> Result<u64, ServiceError> {
        Ok(service_record::Entity::find()
            .filter(service_record::Column::PackageNumber.eq(package_number))
            .count(&self.db)
            .await?)
    }

    async fn list_payments(&self) -> Result<Vec<payment::Model>, ServiceError> {
        Ok(payment::Entity::find().order_by_asc(payment::Column::PaymentNumber).all(&self.db).await?)
    }

    async fn find_payment(&self, payment_number: i32) -> Result<Option<payment::Model>, ServiceError> {
        Ok(payment::Entity::find_by_id(payment_number).one(&self.db).await?)
    }

    async fn find_payment_by_record(&self, record_number: i32) -> Result<Option<payment::Model>, ServiceError> {
        Ok(payment::Entity::find()
            .filter(payment::Column::RecordNumber.eq(record_number))
            .one(&self.db)
            .await?)
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<payment::Model, ServiceError> {
        let record = payment.record_number;
        let am = payment::ActiveModel {
            payment_number: NotSet,
            record_number: Set(payment.record_number),
            amount_paid: Set(payment.amount_paid),
            payment_date: Set(payment.payment_date),
            service_date: Set(payment.service_date),
            plate_number: Set(payment.plate_number),
            driver_name: Set(payment.driver_name),
            package_name: Set(payment.package_name),
            package_price: Set(payment.package_price),
        };
        am.insert(&self.db).await.map_err(|e| match fk_violation(&e) {
            Some(_) => ServiceError::not_found(EntityKind::ServiceRecord, record),
            None => map_write_err(e, EntityKind::Payment, record),
        })
    }

    async fn delete_payment(&self, payment_number: i32) -> Result<bool, ServiceError> {
        let res = payment::Entity::delete_by_id(payment_number)
            .exec(&self.db)
            .await
            .map_err(|e| map_delete_err(e, EntityKind::Payment, payment_number, "dependent rows"))?;
        Ok(res.rows_affected > 0)
    }
}
