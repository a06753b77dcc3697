use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::api::envelope::Envelope;
use crate::auth::auth::AuthUser;
use crate::error::ReportError;
use crate::model::filter::FilterSelection;
use crate::report::options::{self, DropdownOptions};
use crate::report::query;
use crate::report::rows::{
    BranchDetailRow, CustomFieldRow, EmployeeDetailRow, LeaveBalanceRow, LeaveRequestRow,
    PayGradeRow, ReportRow,
};
use crate::report::ReportKind;

async fn run_report<R: ReportRow>(
    kind: ReportKind,
    auth: &AuthUser,
    pool: &MySqlPool,
    selection: &FilterSelection,
) -> Result<HttpResponse, ReportError> {
    auth.require_report(kind)?;
    let rows = query::fetch::<R>(pool, kind, selection).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(rows)))
}

/* =========================
Filter options
========================= */
#[utoipa::path(
    get,
    path = "/api/genarateReport/get_dropdown_options",
    responses(
        (status = 200, description = "Option lists for every report filter", body = Object,
         example = json!({
            "success": true,
            "data": {
                "organization": [{ "id": 1, "name": "Jupiter Apparels", "registrationNo": "PV-00421", "headOffice": "Colombo" }],
                "departments": [{ "id": 3, "name": "Finance" }],
                "titles": [], "employment_statuses": [], "branches": [],
                "pay_grades": [], "cutom_field": []
            }
         })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Unable to load options")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool), fields(user = %auth.username))]
pub async fn get_dropdown_options(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ReportError> {
    let options: DropdownOptions = options::load(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load dropdown options");
        ReportError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(Envelope::ok(options)))
}

/* =========================
Reports
========================= */
#[utoipa::path(
    post,
    path = "/api/genarateReport/get_branch_details",
    request_body(content = FilterSelection, description = "`organization`; 0 means all",
        example = json!({ "organization": 0 })),
    responses(
        (status = 200, description = "Branches with their organization", body = [BranchDetailRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin User / HR Manager only")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_branch_details(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<BranchDetailRow>(ReportKind::BranchDetails, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_employee_detail_by_department",
    request_body(content = FilterSelection, description = "`department`, `title`, `status`; 0 means all",
        example = json!({ "department": 3, "title": 0, "status": 0 })),
    responses(
        (status = 200, description = "Employees of the selected department", body = [EmployeeDetailRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_employee_detail_by_department(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<EmployeeDetailRow>(ReportKind::EmployeesByDepartment, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_employee_detail_by_branch",
    request_body(content = FilterSelection, description = "`branch`, `title`, `status`; 0 means all",
        example = json!({ "branch": 2, "title": 0, "status": 1 })),
    responses(
        (status = 200, description = "Employees of the selected branch", body = [EmployeeDetailRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_employee_detail_by_branch(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<EmployeeDetailRow>(ReportKind::EmployeesByBranch, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_employee_detail_by_pay_grade",
    request_body(content = FilterSelection, description = "`department`, `branch`, `pay_grade`; 0 means all",
        example = json!({ "department": 0, "branch": 0, "pay_grade": 2 })),
    responses(
        (status = 200, description = "Employees in the selected pay grade", body = [PayGradeRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin User / HR Manager only")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_employee_detail_by_pay_grade(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<PayGradeRow>(ReportKind::EmployeesByPayGrade, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_annual_leave_balance",
    request_body(content = FilterSelection, description = "`department`, `branch`; 0 means all",
        example = json!({ "department": 0, "branch": 0 })),
    responses(
        (status = 200, description = "Leave balance per employee and category", body = [LeaveBalanceRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin User / HR Manager only")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_annual_leave_balance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<LeaveBalanceRow>(ReportKind::LeaveBalance, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_leave_request_details",
    request_body(content = FilterSelection,
        description = "`department`, `branch`; 0 means all. The window defaults to 2024-01-01..2024-12-31",
        example = json!({ "department": 3, "branch": 0, "fromDate": "2024-03-01", "toDate": "2024-03-31" })),
    responses(
        (status = 200, description = "Approved leave requests starting inside the window", body = [LeaveRequestRow]),
        (status = 400, description = "Malformed filter or fromDate after toDate"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin User / HR Manager only")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_leave_request_details(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<LeaveRequestRow>(ReportKind::LeaveRequests, &auth, &pool, &payload).await
}

#[utoipa::path(
    post,
    path = "/api/genarateReport/get_custom_field",
    request_body(content = FilterSelection, description = "`department`, `branch`, `custom_field`; 0 means all",
        example = json!({ "department": 0, "branch": 0, "custom_field": 5 })),
    responses(
        (status = 200, description = "One row per employee custom field value", body = [CustomFieldRow]),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin User / HR Manager only")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, payload), fields(user = %auth.username))]
pub async fn get_custom_field(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    run_report::<CustomFieldRow>(ReportKind::CustomField, &auth, &pool, &payload).await
}
