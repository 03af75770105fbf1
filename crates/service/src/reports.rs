//! Daily and monthly revenue reports.
//!
//! Reports are computed from the stored payments on every call. Groups
//! appear in the order their service is first met when the payments are
//! walked by ascending payment number.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use models::payment;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::carwash::CarWashService;
use crate::domain::{Dashboard, DailyReport, DayBucket, MonthlyReport, ReportLine, ServiceGroup, ServiceTotal};
use crate::errors::ServiceError;

fn zero() -> Decimal { Decimal::new(0, 2) }

fn by_payment_number<'a>(payments: impl IntoIterator<Item = &'a payment::Model>) -> Vec<&'a payment::Model> {
    let mut v: Vec<_> = payments.into_iter().collect();
    v.sort_by_key(|p| p.payment_number);
    v
}

/// Per-service groups in the order each service is first met.
struct FirstSeen<G> {
    order: Vec<G>,
    index: HashMap<String, usize>,
}

impl<G> Default for FirstSeen<G> {
    fn default() -> Self { Self { order: Vec::new(), index: HashMap::new() } }
}

impl<G> FirstSeen<G> {
    fn group(&mut self, service_name: &str, new: impl FnOnce() -> G) -> &mut G {
        let i = match self.index.get(service_name) {
            Some(&i) => i,
            None => {
                self.order.push(new());
                self.index.insert(service_name.to_string(), self.order.len() - 1);
                self.order.len() - 1
            }
        };
        &mut self.order[i]
    }
}

impl FirstSeen<ServiceTotal> {
    fn add(&mut self, p: &payment::Model) {
        let t = self.group(&p.package_name, || ServiceTotal {
            service_name: p.package_name.clone(),
            count: 0,
            total_amount: zero(),
        });
        t.count += 1;
        t.total_amount += p.amount_paid;
    }
}

impl FirstSeen<ServiceGroup> {
    fn add(&mut self, p: &payment::Model) {
        let g = self.group(&p.package_name, || ServiceGroup {
            service_name: p.package_name.clone(),
            count: 0,
            total_amount: zero(),
            records: Vec::new(),
        });
        g.count += 1;
        g.total_amount += p.amount_paid;
        g.records.push(ReportLine {
            payment_number: p.payment_number,
            record_number: p.record_number,
            plate_number: p.plate_number.clone(),
            driver_name: p.driver_name.clone(),
            service_date: p.service_date,
            payment_date: p.payment_date,
            package_price: p.package_price,
            amount_paid: p.amount_paid,
        });
    }
}

/// Payments taken on `date`, grouped by service with the individual lines.
pub fn summarize_day(payments: &[payment::Model], date: NaiveDate) -> DailyReport {
    let mut services: FirstSeen<ServiceGroup> = FirstSeen::default();
    let mut total_amount = zero();
    let mut total_records = 0;

    for p in by_payment_number(payments.iter().filter(|p| p.payment_date == date)) {
        services.add(p);
        total_records += 1;
        total_amount += p.amount_paid;
    }

    DailyReport { date, total_records, total_amount, services: services.order }
}

/// Payments taken in `month`/`year`, bucketed by day in ascending date order.
pub fn summarize_month(payments: &[payment::Model], month: u32, year: i32) -> Result<MonthlyReport, ServiceError> {
    if !(1..=12).contains(&month) {
        return Err(ServiceError::Validation(format!("month must be within 1..=12, got {month}")));
    }
    let mut days: BTreeMap<NaiveDate, FirstSeen<ServiceTotal>> = BTreeMap::new();
    let mut total_amount = zero();
    let mut total_records = 0;

    let in_month = payments.iter().filter(|p| p.payment_date.month() == month && p.payment_date.year() == year);
    for p in by_payment_number(in_month) {
        days.entry(p.payment_date).or_default().add(p);
        total_records += 1;
        total_amount += p.amount_paid;
    }

    let days = days
        .into_iter()
        .map(|(date, totals)| DayBucket {
            date,
            count: totals.order.iter().map(|t| t.count).sum(),
            total_amount: totals.order.iter().fold(zero(), |acc, t| acc + t.total_amount),
            services: totals.order,
        })
        .collect();

    Ok(MonthlyReport { month, year, total_records, total_amount, days })
}

impl CarWashService {
    #[instrument(skip(self))]
    pub async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport, ServiceError> {
        let _g = self.read().await;
        let payments = self.repo().list_payments().await?;
        let report = summarize_day(&payments, date);
        debug!(total_records = report.total_records, "daily_report_built");
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn monthly_report(&self, month: u32, year: i32) -> Result<MonthlyReport, ServiceError> {
        let _g = self.read().await;
        let payments = self.repo().list_payments().await?;
        let report = summarize_month(&payments, month, year)?;
        debug!(total_records = report.total_records, days = report.days.len(), "monthly_report_built");
        Ok(report)
    }

    /// Store-wide counts and revenue per service.
    pub async fn dashboard(&self) -> Result<Dashboard, ServiceError> {
        let _g = self.read().await;
        let cars = self.repo().list_cars().await?;
        let packages = self.repo().list_packages().await?;
        let records = self.repo().list_service_records().await?;
        let payments = self.repo().list_payments().await?;

        let paid: HashSet<i32> = payments.iter().map(|p| p.record_number).collect();
        let mut totals: FirstSeen<ServiceTotal> = FirstSeen::default();
        for p in by_payment_number(&payments) {
            totals.add(p);
        }
        Ok(Dashboard {
            total_cars: cars.len() as u64,
            total_packages: packages.len() as u64,
            total_service_records: records.len() as u64,
            unpaid_services: records.iter().filter(|r| !paid.contains(&r.record_number)).count() as u64,
            total_revenue: payments.iter().fold(zero(), |acc, p| acc + p.amount_paid),
            revenue_by_service: totals.order,
        })
    }
}
