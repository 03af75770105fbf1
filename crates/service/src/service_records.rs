//! Registering and removing service events.

use std::collections::HashSet;

use models::service_record;
use tracing::{info, instrument, warn};

use crate::carwash::CarWashService;
use crate::domain::{NewServiceRecord, ServiceInput};
use crate::errors::{EntityKind, ServiceError};

impl CarWashService {
    /// Record that a car received a package on `service_date`.
    ///
    /// The driver name, car type, package name and price are copied into the
    /// record so later catalog edits never rewrite history.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::carwash::CarWashService;
    /// use service::domain::ServiceInput;
    /// use service::storage::memory::MemoryRepository;
    ///
    /// let svc = CarWashService::new(Arc::new(MemoryRepository::new()));
    /// let input = ServiceInput {
    ///     service_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    ///     plate_number: "RAA111A".into(),
    ///     package_number: 1,
    /// };
    /// // unknown car
    /// assert!(tokio_test::block_on(svc.register_service(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(plate = %input.plate_number, package_number = input.package_number))]
    pub async fn register_service(&self, input: ServiceInput) -> Result<service_record::Model, ServiceError> {
        let plate = input.plate_number.trim();
        let _g = self.write().await;
        let car = self.repo().find_car(plate).await?.ok_or_else(|| {
            warn!("unknown car");
            ServiceError::not_found(EntityKind::Car, plate)
        })?;
        let package = self.repo().find_package(input.package_number).await?.ok_or_else(|| {
            warn!("unknown package");
            ServiceError::not_found(EntityKind::Package, input.package_number)
        })?;

        let record = self
            .repo()
            .insert_service_record(NewServiceRecord {
                service_date: input.service_date,
                plate_number: car.plate_number,
                package_number: package.package_number,
                driver_name: car.driver_name,
                car_type: car.car_type,
                package_name: package.package_name,
                package_price: package.package_price,
            })
            .await?;
        info!(record_number = record.record_number, "service_registered");
        Ok(record)
    }

    /// Remove an unpaid service record.
    #[instrument(skip(self))]
    pub async fn delete_service(&self, record_number: i32) -> Result<(), ServiceError> {
        let _g = self.write().await;
        if self.repo().find_service_record(record_number).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::ServiceRecord, record_number));
        }
        if self.repo().find_payment_by_record(record_number).await?.is_some() {
            return Err(ServiceError::HasDependents(
                EntityKind::ServiceRecord,
                record_number.to_string(),
                "a payment",
            ));
        }
        self.repo().delete_service_record(record_number).await?;
        info!(record_number, "service_deleted");
        Ok(())
    }

    pub async fn list_service_records(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        let _g = self.read().await;
        self.repo().list_service_records().await
    }

    pub async fn get_service_record(&self, record_number: i32) -> Result<service_record::Model, ServiceError> {
        let _g = self.read().await;
        self.repo()
            .find_service_record(record_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::ServiceRecord, record_number))
    }

    /// Records with no payment, in ascending record number. Computed fresh
    /// from the store on every call.
    pub async fn list_unpaid(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        let _g = self.read().await;
        let paid: HashSet<i32> = self.repo().list_payments().await?.into_iter().map(|p| p.record_number).collect();
        let records = self.repo().list_service_records().await?;
        Ok(records.into_iter().filter(|r| !paid.contains(&r.record_number)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{CarPatch, PackagePatch, PaymentInput, ServiceInput};
    use crate::errors::{EntityKind, ServiceError};
    use crate::test_support::*;

    fn wash(plate: &str, package_number: i32) -> ServiceInput {
        ServiceInput { service_date: day(2024, 5, 2), plate_number: plate.into(), package_number }
    }

    #[tokio::test]
    async fn record_numbers_strictly_increase() {
        let svc = seeded_service().await;
        let mut last = 0;
        for _ in 0..5 {
            let r = svc.register_service(wash("RAA111A", 1)).await.unwrap();
            assert!(r.record_number > last);
            last = r.record_number;
        }
        svc.delete_service(last).await.unwrap();
        let r = svc.register_service(wash("RAA111A", 1)).await.unwrap();
        assert!(r.record_number > last);
    }

    #[tokio::test]
    async fn unknown_car_or_package_changes_nothing() {
        let svc = seeded_service().await;
        let err = svc.register_service(wash("RXX000X", 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Car, _)));
        let err = svc.register_service(wash("RAA111A", 99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Package, _)));
        assert!(svc.list_service_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_survives_catalog_edits() {
        let svc = seeded_service().await;
        let r = svc.register_service(wash("RAA111A", 1)).await.unwrap();
        assert_eq!(r.driver_name, "Aline");
        assert_eq!(r.package_price, money("5000"));

        svc.update_car("RAA111A", CarPatch { driver_name: Some("Eric".into()), ..CarPatch::default() }).await.unwrap();
        svc.update_package(1, PackagePatch { package_price: Some(money("7000")), ..PackagePatch::default() })
            .await
            .unwrap();

        let again = svc.get_service_record(r.record_number).await.unwrap();
        assert_eq!(again.driver_name, "Aline");
        assert_eq!(again.package_price, money("5000"));
    }

    #[tokio::test]
    async fn paid_record_cannot_be_deleted() {
        let svc = seeded_service().await;
        let r = svc.register_service(wash("RAA111A", 1)).await.unwrap();
        svc.record_payment(PaymentInput { record_number: r.record_number, amount_paid: money("5000"), payment_date: day(2024, 5, 2) })
            .await
            .unwrap();
        let err = svc.delete_service(r.record_number).await.unwrap_err();
        assert!(matches!(err, ServiceError::HasDependents(EntityKind::ServiceRecord, ..)));
        assert!(matches!(svc.delete_service(77).await, Err(ServiceError::NotFound(EntityKind::ServiceRecord, _))));
    }

    #[tokio::test]
    async fn unpaid_list_tracks_payments() {
        let svc = seeded_service().await;
        let r1 = svc.register_service(wash("RAA111A", 1)).await.unwrap();
        let r2 = svc.register_service(wash("RAA111A", 1)).await.unwrap();
        svc.record_payment(PaymentInput { record_number: r1.record_number, amount_paid: money("5000"), payment_date: day(2024, 5, 2) })
            .await
            .unwrap();
        let unpaid: Vec<i32> = svc.list_unpaid().await.unwrap().iter().map(|r| r.record_number).collect();
        assert_eq!(unpaid, vec![r2.record_number]);
    }
}
