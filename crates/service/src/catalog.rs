//! Car and package maintenance.

use models::{car, package};
use tracing::{info, instrument};

use crate::carwash::CarWashService;
use crate::domain::{CarInput, CarPatch, PackageInput, PackagePatch};
use crate::errors::{EntityKind, ServiceError};

impl CarWashService {
    pub async fn list_cars(&self) -> Result<Vec<car::Model>, ServiceError> {
        let _g = self.read().await;
        self.repo().list_cars().await
    }

    pub async fn get_car(&self, plate_number: &str) -> Result<car::Model, ServiceError> {
        let _g = self.read().await;
        self.repo()
            .find_car(plate_number.trim())
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Car, plate_number.trim()))
    }

    /// Register a car. Plate numbers are unique and trimmed before storage.
    #[instrument(skip(self, input), fields(plate = %input.plate_number))]
    pub async fn register_car(&self, input: CarInput) -> Result<car::Model, ServiceError> {
        let model = car::Model {
            plate_number: car::validate_plate_number(&input.plate_number)?,
            car_type: car::validate_car_type(&input.car_type)?,
            car_size: input.car_size,
            driver_name: car::validate_driver_name(&input.driver_name)?,
            phone_number: car::validate_phone_number(&input.phone_number)?,
        };
        let _g = self.write().await;
        let created = self.repo().insert_car(model).await?;
        info!(plate = %created.plate_number, "car_registered");
        Ok(created)
    }

    /// Change any field but the plate number.
    #[instrument(skip(self, patch))]
    pub async fn update_car(&self, plate_number: &str, patch: CarPatch) -> Result<car::Model, ServiceError> {
        let plate = plate_number.trim();
        if let Some(p) = patch.plate_number.as_deref() {
            if p.trim() != plate {
                return Err(ServiceError::Validation("plateNumber cannot be changed".into()));
            }
        }
        let _g = self.write().await;
        let mut current = self
            .repo()
            .find_car(plate)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Car, plate))?;
        if let Some(t) = patch.car_type.as_deref() {
            current.car_type = car::validate_car_type(t)?;
        }
        if let Some(size) = patch.car_size {
            current.car_size = size;
        }
        if let Some(n) = patch.driver_name.as_deref() {
            current.driver_name = car::validate_driver_name(n)?;
        }
        if let Some(p) = patch.phone_number.as_deref() {
            current.phone_number = car::validate_phone_number(p)?;
        }
        let updated = self.repo().update_car(current).await?;
        info!(plate = %updated.plate_number, "car_updated");
        Ok(updated)
    }

    /// Delete a car with no service records.
    #[instrument(skip(self))]
    pub async fn delete_car(&self, plate_number: &str) -> Result<(), ServiceError> {
        let plate = plate_number.trim();
        let _g = self.write().await;
        if self.repo().find_car(plate).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Car, plate));
        }
        if self.repo().count_service_records_for_car(plate).await? > 0 {
            return Err(ServiceError::HasDependents(EntityKind::Car, plate.to_string(), "service records"));
        }
        self.repo().delete_car(plate).await?;
        info!(plate, "car_deleted");
        Ok(())
    }

    pub async fn list_packages(&self) -> Result<Vec<package::Model>, ServiceError> {
        let _g = self.read().await;
        self.repo().list_packages().await
    }

    pub async fn get_package(&self, package_number: i32) -> Result<package::Model, ServiceError> {
        let _g = self.read().await;
        self.repo()
            .find_package(package_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, package_number))
    }

    #[instrument(skip(self, input), fields(name = %input.package_name))]
    pub async fn create_package(&self, input: PackageInput) -> Result<package::Model, ServiceError> {
        let input = PackageInput {
            package_name: package::validate_name(&input.package_name)?,
            package_description: package::validate_description(&input.package_description)?,
            package_price: package::validate_price(input.package_price)?,
        };
        let _g = self.write().await;
        let created = self.repo().insert_package(input).await?;
        info!(package_number = created.package_number, price = %created.package_price, "package_created");
        Ok(created)
    }

    /// Existing service records keep the name and price they were registered with.
    #[instrument(skip(self, patch))]
    pub async fn update_package(&self, package_number: i32, patch: PackagePatch) -> Result<package::Model, ServiceError> {
        let _g = self.write().await;
        let mut current = self
            .repo()
            .find_package(package_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Package, package_number))?;
        if let Some(n) = patch.package_name.as_deref() {
            current.package_name = package::validate_name(n)?;
        }
        if let Some(d) = patch.package_description.as_deref() {
            current.package_description = package::validate_description(d)?;
        }
        if let Some(p) = patch.package_price {
            current.package_price = package::validate_price(p)?;
        }
        let updated = self.repo().update_package(current).await?;
        info!(package_number, "package_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_package(&self, package_number: i32) -> Result<(), ServiceError> {
        let _g = self.write().await;
        if self.repo().find_package(package_number).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Package, package_number));
        }
        if self.repo().count_service_records_for_package(package_number).await? > 0 {
            return Err(ServiceError::HasDependents(
                EntityKind::Package,
                package_number.to_string(),
                "service records",
            ));
        }
        self.repo().delete_package(package_number).await?;
        info!(package_number, "package_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{CarPatch, PackagePatch, ServiceInput};
    use crate::errors::{EntityKind, ServiceError};
    use crate::test_support::*;

    #[tokio::test]
    async fn register_trims_and_rejects_duplicate_plate() {
        let svc = memory_service();
        let car = svc.register_car(car_input("  RAB222B ")).await.unwrap();
        assert_eq!(car.plate_number, "RAB222B");
        let err = svc.register_car(car_input("RAB222B")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey(EntityKind::Car, _)));
    }

    #[tokio::test]
    async fn register_rejects_blank_driver() {
        let svc = memory_service();
        let mut input = car_input("RAC333C");
        input.driver_name = "   ".into();
        assert!(matches!(svc.register_car(input).await, Err(ServiceError::Validation(_))));
        assert!(svc.list_cars().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_plate_and_changes_the_rest() {
        let svc = seeded_service().await;
        let patch = CarPatch {
            driver_name: Some("Eric".into()),
            car_size: Some(models::car::CarSize::Large),
            ..CarPatch::default()
        };
        let car = svc.update_car("RAA111A", patch).await.unwrap();
        assert_eq!(car.driver_name, "Eric");
        assert_eq!(car.car_size, models::car::CarSize::Large);
        assert_eq!(car.car_type, "Sedan");

        let rename = CarPatch { plate_number: Some("RZZ999Z".into()), ..CarPatch::default() };
        assert!(matches!(svc.update_car("RAA111A", rename).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            svc.update_car("NOPE", CarPatch::default()).await,
            Err(ServiceError::NotFound(EntityKind::Car, _))
        ));
    }

    #[tokio::test]
    async fn package_price_needs_cents_precision() {
        let svc = memory_service();
        assert!(matches!(
            svc.create_package(package_input("Full", "10.005")).await,
            Err(ServiceError::Validation(_))
        ));
        let pkg = svc.create_package(package_input("Full", "12000")).await.unwrap();
        assert_eq!(pkg.package_price.to_string(), "12000.00");
        let patch = PackagePatch { package_price: Some(money("-1")), ..PackagePatch::default() };
        assert!(matches!(svc.update_package(pkg.package_number, patch).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn referenced_car_and_package_cannot_be_deleted() {
        let svc = seeded_service().await;
        svc.register_service(ServiceInput { service_date: day(2024, 5, 2), plate_number: "RAA111A".into(), package_number: 1 })
            .await
            .unwrap();
        assert!(matches!(svc.delete_car("RAA111A").await, Err(ServiceError::HasDependents(EntityKind::Car, ..))));
        assert!(matches!(svc.delete_package(1).await, Err(ServiceError::HasDependents(EntityKind::Package, ..))));

        svc.register_car(car_input("RAD444D")).await.unwrap();
        svc.delete_car("RAD444D").await.unwrap();
        assert!(matches!(svc.get_car("RAD444D").await, Err(ServiceError::NotFound(..))));
        assert!(matches!(svc.delete_package(42).await, Err(ServiceError::NotFound(EntityKind::Package, _))));
    }
}
