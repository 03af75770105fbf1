//! OpenAPI document. Money is a decimal string with two places and dates are
//! `YYYY-MM-DD`; the `*Doc` types describe the wire shape only.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDoc {
    #[schema(example = "RAA111A")]
    pub plate_number: String,
    pub car_type: String,
    #[schema(example = "Small")]
    pub car_size: String,
    pub driver_name: String,
    pub phone_number: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPatchDoc {
    pub car_type: Option<String>,
    pub car_size: Option<String>,
    pub driver_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInputDoc {
    #[schema(example = "Basic Wash")]
    pub package_name: String,
    pub package_description: String,
    #[schema(example = "5000.00")]
    pub package_price: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePatchDoc {
    pub package_name: Option<String>,
    pub package_description: Option<String>,
    pub package_price: Option<String>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDoc {
    pub package_number: i32,
    pub package_name: String,
    pub package_description: String,
    pub package_price: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInputDoc {
    #[schema(example = "2024-05-02")]
    pub service_date: String,
    pub plate_number: String,
    pub package_number: i32,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordDoc {
    pub record_number: i32,
    pub service_date: String,
    pub plate_number: String,
    pub package_number: i32,
    pub driver_name: String,
    pub car_type: String,
    pub package_name: String,
    pub package_price: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInputDoc {
    pub record_number: i32,
    #[schema(example = "5000.00")]
    pub amount_paid: String,
    #[schema(example = "2024-05-02")]
    pub payment_date: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDoc {
    pub payment_number: i32,
    pub record_number: i32,
    pub amount_paid: String,
    pub payment_date: String,
    pub service_date: String,
    pub plate_number: String,
    pub driver_name: String,
    pub package_name: String,
    pub package_price: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDoc {
    pub payment_number: i32,
    pub record_number: i32,
    pub payment_date: String,
    pub service_date: String,
    pub amount_paid: String,
    pub plate_number: String,
    pub driver_name: String,
    pub phone_number: String,
    pub car_type: String,
    pub car_size: String,
    pub package_number: i32,
    pub package_name: String,
    pub package_description: String,
    pub package_price: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLineDoc {
    pub payment_number: i32,
    pub record_number: i32,
    pub plate_number: String,
    pub driver_name: String,
    pub service_date: String,
    pub payment_date: String,
    pub package_price: String,
    pub amount_paid: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroupDoc {
    pub service_name: String,
    pub count: u32,
    pub total_amount: String,
    pub records: Vec<ReportLineDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportDoc {
    pub date: String,
    pub total_records: u32,
    pub total_amount: String,
    pub services: Vec<ServiceGroupDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTotalDoc {
    pub service_name: String,
    pub count: u32,
    pub total_amount: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucketDoc {
    pub date: String,
    pub count: u32,
    pub total_amount: String,
    pub services: Vec<ServiceTotalDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportDoc {
    pub month: u32,
    pub year: i32,
    pub total_records: u32,
    pub total_amount: String,
    pub days: Vec<DayBucketDoc>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDoc {
    pub total_cars: u64,
    pub total_packages: u64,
    pub total_service_records: u64,
    pub unpaid_services: u64,
    pub total_revenue: String,
    pub revenue_by_service: Vec<ServiceTotalDoc>,
}

#[derive(ToSchema, Serialize)]
pub struct ErrorDoc {
    pub error: String,
    pub kind: String,
    pub message: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list,
        crate::routes::cars::create,
        crate::routes::cars::get,
        crate::routes::cars::update,
        crate::routes::cars::delete,
        crate::routes::packages::list,
        crate::routes::packages::create,
        crate::routes::packages::get,
        crate::routes::packages::update,
        crate::routes::packages::delete,
        crate::routes::service_records::list,
        crate::routes::service_records::create,
        crate::routes::service_records::get,
        crate::routes::service_records::delete,
        crate::routes::service_records::unpaid,
        crate::routes::payments::list,
        crate::routes::payments::create,
        crate::routes::payments::get,
        crate::routes::payments::delete,
        crate::routes::payments::bill,
        crate::routes::reports::daily,
        crate::routes::reports::monthly,
        crate::routes::reports::dashboard,
    ),
    components(
        schemas(
            HealthResponse,
            CarDoc,
            CarPatchDoc,
            PackageInputDoc,
            PackagePatchDoc,
            PackageDoc,
            ServiceInputDoc,
            ServiceRecordDoc,
            PaymentInputDoc,
            PaymentDoc,
            BillDoc,
            ReportLineDoc,
            ServiceGroupDoc,
            DailyReportDoc,
            ServiceTotalDoc,
            DayBucketDoc,
            MonthlyReportDoc,
            DashboardDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars"),
        (name = "packages"),
        (name = "services"),
        (name = "payments"),
        (name = "reports")
    )
)]
pub struct ApiDoc;
