use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use models::{car, package, payment, service_record};

use super::CarWashRepository;
use crate::domain::{NewPayment, NewServiceRecord, PackageInput};
use crate::errors::{EntityKind, ServiceError};

#[derive(Default)]
struct Tables {
    cars: BTreeMap<String, car::Model>,
    packages: BTreeMap<i32, package::Model>,
    records: BTreeMap<i32, service_record::Model>,
    payments: BTreeMap<i32, payment::Model>,
    // last issued numbers; deletes never rewind them
    package_seq: i32,
    record_seq: i32,
    payment_seq: i32,
}

fn next(seq: &mut i32) -> Result<i32, ServiceError> {
    *seq = seq.checked_add(1).ok_or_else(|| ServiceError::Db("sequence exhausted".into()))?;
    Ok(*seq)
}

/// In-memory repository used by tests and the `memory` storage backend.
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self { Self::default() }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
        self.tables.lock().map_err(|_| ServiceError::Db("memory store poisoned".into()))
    }
}

#[async_trait]
impl CarWashRepository for MemoryRepository {
    async fn list_cars(&self) -> Result<Vec<car::Model>, ServiceError> {
        Ok(self.tables()?.cars.values().cloned().collect())
    }

    async fn find_car(&self, plate_number: &str) -> Result<Option<car::Model>, ServiceError> {
        Ok(self.tables()?.cars.get(plate_number).cloned())
    }

    async fn insert_car(&self, car: car::Model) -> Result<car::Model, ServiceError> {
        let mut t = self.tables()?;
        if t.cars.contains_key(&car.plate_number) {
            return Err(ServiceError::DuplicateKey(EntityKind::Car, car.plate_number));
        }
        t.cars.insert(car.plate_number.clone(), car.clone());
        Ok(car)
    }

    async fn update_car(&self, car: car::Model) -> Result<car::Model, ServiceError> {
        let mut t = self.tables()?;
        match t.cars.get_mut(&car.plate_number) {
            Some(slot) => {
                *slot = car.clone();
                Ok(car)
            }
            None => Err(ServiceError::not_found(EntityKind::Car, &car.plate_number)),
        }
    }

    async fn delete_car(&self, plate_number: &str) -> Result<bool, ServiceError> {
        Ok(self.tables()?.cars.remove(plate_number).is_some())
    }

    async fn list_packages(&self) -> Result<Vec<package::Model>, ServiceError> {
        Ok(self.tables()?.packages.values().cloned().collect())
    }

    async fn find_package(&self, package_number: i32) -> Result<Option<package::Model>, ServiceError> {
        Ok(self.tables()?.packages.get(&package_number).cloned())
    }

    async fn insert_package(&self, input: PackageInput) -> Result<package::Model, ServiceError> {
        let mut t = self.tables()?;
        let package_number = next(&mut t.package_seq)?;
        let model = package::Model {
            package_number,
            package_name: input.package_name,
            package_description: input.package_description,
            package_price: input.package_price,
        };
        t.packages.insert(package_number, model.clone());
        Ok(model)
    }

    async fn update_package(&self, package: package::Model) -> Result<package::Model, ServiceError> {
        let mut t = self.tables()?;
        match t.packages.get_mut(&package.package_number) {
            Some(slot) => {
                *slot = package.clone();
                Ok(package)
            }
            None => Err(ServiceError::not_found(EntityKind::Package, package.package_number)),
        }
    }

    async fn delete_package(&self, package_number: i32) -> Result<bool, ServiceError> {
        Ok(self.tables()?.packages.remove(&package_number).is_some())
    }

    async fn list_service_records(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        Ok(self.tables()?.records.values().cloned().collect())
    }

    async fn find_service_record(&self, record_number: i32) -> Result<Option<service_record::Model>, ServiceError> {
        Ok(self.tables()?.records.get(&record_number).cloned())
    }

    async fn insert_service_record(&self, record: NewServiceRecord) -> Result<service_record::Model, ServiceError> {
        let mut t = self.tables()?;
        let record_number = next(&mut t.record_seq)?;
        let model = service_record::Model {
            record_number,
            service_date: record.service_date,
            plate_number: record.plate_number,
            package_number: record.package_number,
            driver_name: record.driver_name,
            car_type: record.car_type,
            package_name: record.package_name,
            package_price: record.package_price,
        };
        t.records.insert(record_number, model.clone());
        Ok(model)
    }

    async fn delete_service_record(&self, record_number: i32) -> Result<bool, ServiceError> {
        Ok(self.tables()?.records.remove(&record_number).is_some())
    }

    async fn count_service_records_for_car(&self, plate_number: &str) -> Result<u64, ServiceError> {
        let t = self.tables()?;
        Ok(t.records.values().filter(|r| r.plate_number == plate_number).count() as u64)
    }

    async fn count_service_records_for_package(&self, package_number: i32) -> Result<u64, ServiceError> {
        let t = self.tables()?;
        Ok(t.records.values().filter(|r| r.package_number == package_number).count() as u64)
    }

    async fn list_payments(&self) -> Result<Vec<payment::Model>, ServiceError> {
        Ok(self.tables()?.payments.values().cloned().collect())
    }

    async fn find_payment(&self, payment_number: i32) -> Result<Option<payment::Model>, ServiceError> {
        Ok(self.tables()?.payments.get(&payment_number).cloned())
    }

    async fn find_payment_by_record(&self, record_number: i32) -> Result<Option<payment::Model>, ServiceError> {
        let t = self.tables()?;
        Ok(t.payments.values().find(|p| p.record_number == record_number).cloned())
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<payment::Model, ServiceError> {
        let mut t = self.tables()?;
        // mirrors the unique index on payment.record_number
        if t.payments.values().any(|p| p.record_number == payment.record_number) {
            return Err(ServiceError::DuplicateKey(EntityKind::Payment, payment.record_number.to_string()));
        }
        let payment_number = next(&mut t.payment_seq)?;
        let model = payment::Model {
            payment_number,
            record_number: payment.record_number,
            amount_paid: payment.amount_paid,
            payment_date: payment.payment_date,
            service_date: payment.service_date,
            plate_number: payment.plate_number,
            driver_name: payment.driver_name,
            package_name: payment.package_name,
            package_price: payment.package_price,
        };
        t.payments.insert(payment_number, model.clone());
        Ok(model)
    }

    async fn delete_payment(&self, payment_number: i32) -> Result<bool, ServiceError> {
        Ok(self.tables()?.payments.remove(&payment_number).is_some())
    }
}
