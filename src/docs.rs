use crate::model::filter::FilterSelection;
use crate::model::option::FilterOption;
use crate::model::organization::{Branch, Organization};
use crate::report::options::DropdownOptions;
use crate::report::rows::{
    BranchDetailRow, CustomFieldRow, EmployeeDetailRow, LeaveBalanceRow, LeaveRequestRow,
    PayGradeRow,
};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Report API",
        version = "1.0.0",
        description = r#"
## Human Resource Management (HRM) Reports

Read-only reporting over the HRM database.

### 🔹 Reports
- **Branches of an organization**
- **Employees** by department, by branch or by pay grade
- **Leave balance** per employee and leave category
- **Approved leave requests** inside a date window
- **Custom field values** per employee

Every report takes entity filters where `0` means *all*, and can be exported
as a paginated PDF through `/genarateReport/export/{report}`.

### 🔐 Security
All endpoints require a **JWT Bearer** access token. Employee detail reports
and dropdown options are open to every role; the rest need **Admin User** or
**HR Manager**.

### 📦 Response Format
`{ "success": true, "data": ... }` or `{ "success": false, "message": ... }`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::report::get_dropdown_options,
        crate::api::report::get_branch_details,
        crate::api::report::get_employee_detail_by_department,
        crate::api::report::get_employee_detail_by_branch,
        crate::api::report::get_employee_detail_by_pay_grade,
        crate::api::report::get_annual_leave_balance,
        crate::api::report::get_leave_request_details,
        crate::api::report::get_custom_field,

        crate::api::export::export_report
    ),
    components(
        schemas(
            FilterSelection,
            FilterOption,
            Organization,
            Branch,
            DropdownOptions,
            BranchDetailRow,
            EmployeeDetailRow,
            PayGradeRow,
            LeaveBalanceRow,
            LeaveRequestRow,
            CustomFieldRow
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Report", description = "HR report APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
