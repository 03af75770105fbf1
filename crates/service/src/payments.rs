//! Payment recording, reversal and bills.

use models::payment;
use tracing::{info, instrument, warn};

use crate::carwash::CarWashService;
use crate::domain::{BillView, NewPayment, PaymentInput};
use crate::errors::{EntityKind, ServiceError};

impl CarWashService {
    /// Settle one unpaid service record. The amount is free-form and need not
    /// equal the package price.
    #[instrument(skip(self, input), fields(record_number = input.record_number))]
    pub async fn record_payment(&self, input: PaymentInput) -> Result<payment::Model, ServiceError> {
        let amount_paid = payment::validate_amount(input.amount_paid)?;
        let _g = self.write().await;
        let record = self
            .repo()
            .find_service_record(input.record_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::ServiceRecord, input.record_number))?;
        if self.repo().find_payment_by_record(record.record_number).await?.is_some() {
            warn!("record already paid");
            return Err(ServiceError::AlreadyPaid(record.record_number));
        }

        let created = self
            .repo()
            .insert_payment(NewPayment {
                record_number: record.record_number,
                amount_paid,
                payment_date: input.payment_date,
                service_date: record.service_date,
                plate_number: record.plate_number,
                driver_name: record.driver_name,
                package_name: record.package_name,
                package_price: record.package_price,
            })
            .await
            .map_err(|e| match e {
                // another writer settled the record between the check and the insert
                ServiceError::DuplicateKey(EntityKind::Payment, _) => {
                    warn!("record paid concurrently");
                    ServiceError::AlreadyPaid(record.record_number)
                }
                other => other,
            })?;
        info!(payment_number = created.payment_number, amount = %created.amount_paid, "payment_recorded");
        Ok(created)
    }

    /// Reverse a payment; its service record becomes unpaid again.
    #[instrument(skip(self))]
    pub async fn delete_payment(&self, payment_number: i32) -> Result<payment::Model, ServiceError> {
        let _g = self.write().await;
        let existing = self
            .repo()
            .find_payment(payment_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Payment, payment_number))?;
        self.repo().delete_payment(payment_number).await?;
        info!(payment_number, record_number = existing.record_number, "payment_reversed");
        Ok(existing)
    }

    pub async fn list_payments(&self) -> Result<Vec<payment::Model>, ServiceError> {
        let _g = self.read().await;
        self.repo().list_payments().await
    }

    pub async fn get_payment(&self, payment_number: i32) -> Result<payment::Model, ServiceError> {
        let _g = self.read().await;
        self.repo()
            .find_payment(payment_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Payment, payment_number))
    }

    /// Bill for a paid record: the payment and record snapshot joined with the
    /// car's contact details and the package description.
    #[instrument(skip(self))]
    pub async fn build_bill(&self, record_number: i32) -> Result<BillView, ServiceError> {
        let _g = self.read().await;
        let pay = self
            .repo()
            .find_payment_by_record(record_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Payment, format!("for record {record_number}")))?;
        let record = self
            .repo()
            .find_service_record(record_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::ServiceRecord, record_number))?;
        let car = self
            .repo()
            .find_car(&record.plate_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Car, &record.plate_number))?;
        let package = self
            .repo()
            .find_package(record.package_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, record.package_number))?;

        Ok(BillView {
            payment_number: pay.payment_number,
            record_number: record.record_number,
            payment_date: pay.payment_date,
            service_date: record.service_date,
            amount_paid: pay.amount_paid,
            plate_number: record.plate_number,
            driver_name: record.driver_name,
            phone_number: car.phone_number,
            car_type: record.car_type,
            car_size: car.car_size,
            package_number: record.package_number,
            package_name: record.package_name,
            package_description: package.package_description,
            package_price: record.package_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::carwash::CarWashService;
    use crate::domain::{PaymentInput, ServiceInput};
    use crate::storage::CarWashRepository;
    use crate::errors::{EntityKind, ServiceError};
    use crate::test_support::*;

    async fn one_record(svc: &crate::carwash::CarWashService) -> i32 {
        svc.register_service(ServiceInput { service_date: day(2024, 5, 2), plate_number: "RAA111A".into(), package_number: 1 })
            .await
            .unwrap()
            .record_number
    }

    fn pay(record_number: i32, amount: &str) -> PaymentInput {
        PaymentInput { record_number, amount_paid: money(amount), payment_date: day(2024, 5, 2) }
    }

    #[tokio::test]
    async fn second_payment_is_already_paid() {
        let svc = seeded_service().await;
        let rec = one_record(&svc).await;
        let first = svc.record_payment(pay(rec, "5000")).await.unwrap();
        assert_eq!(first.package_name, "Basic Wash");
        assert_eq!(first.service_date, day(2024, 5, 2));

        let err = svc.record_payment(pay(rec, "100")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyPaid(r) if r == rec));
        assert_eq!(svc.list_payments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn amount_is_independent_of_price() {
        let svc = seeded_service().await;
        let rec = one_record(&svc).await;
        let p = svc.record_payment(pay(rec, "4500.50")).await.unwrap();
        assert_eq!(p.amount_paid.to_string(), "4500.50");
        assert_eq!(p.package_price.to_string(), "5000.00");
    }

    #[tokio::test]
    async fn negative_or_unknown_record_is_rejected() {
        let svc = seeded_service().await;
        let rec = one_record(&svc).await;
        assert!(matches!(svc.record_payment(pay(rec, "-5")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            svc.record_payment(pay(rec + 10, "5000")).await,
            Err(ServiceError::NotFound(EntityKind::ServiceRecord, _))
        ));
        assert!(svc.list_payments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reversal_makes_record_payable_again() {
        let svc = seeded_service().await;
        let rec = one_record(&svc).await;
        let p = svc.record_payment(pay(rec, "5000")).await.unwrap();
        svc.delete_payment(p.payment_number).await.unwrap();
        assert_eq!(svc.list_unpaid().await.unwrap().len(), 1);

        let again = svc.record_payment(pay(rec, "5000")).await.unwrap();
        assert!(again.payment_number > p.payment_number);
        assert!(matches!(svc.delete_payment(p.payment_number).await, Err(ServiceError::NotFound(EntityKind::Payment, _))));
    }

    #[tokio::test]
    async fn bill_joins_car_and_package() {
        let svc = seeded_service().await;
        let rec = one_record(&svc).await;
        assert!(matches!(svc.build_bill(rec).await, Err(ServiceError::NotFound(EntityKind::Payment, _))));

        svc.record_payment(pay(rec, "5000")).await.unwrap();
        let bill = svc.build_bill(rec).await.unwrap();
        assert_eq!(bill.phone_number, "0788123456");
        assert_eq!(bill.package_description, "Basic Wash package");
        assert_eq!(bill.amount_paid, money("5000"));
        assert_eq!(bill.plate_number, "RAA111A");
    }

    #[tokio::test]
    async fn unique_payment_violation_reports_already_paid() {
        let repo = Arc::new(StalePaymentLookup::default());
        let svc = CarWashService::new(repo.clone());
        svc.register_car(car_input("RAA111A")).await.unwrap();
        svc.create_package(package_input("Basic Wash", "5000")).await.unwrap();
        let rec = one_record(&svc).await;
        svc.record_payment(pay(rec, "5000")).await.unwrap();

        // the lookup misses the first payment, the store still refuses the second
        let err = svc.record_payment(pay(rec, "5000")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyPaid(r) if r == rec));
        assert_eq!(err.kind(), "already_paid");
        assert_eq!(repo.inner.list_payments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_payments_settle_once() {
        let svc = std::sync::Arc::new(seeded_service().await);
        let rec = one_record(&svc).await;
        let mut handles = Vec::new();
        for _ in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move { svc.record_payment(pay(rec, "5000")).await }));
        }
        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert!(matches!(e, ServiceError::AlreadyPaid(_))),
            }
        }
        assert_eq!(ok, 1);
    }
}
