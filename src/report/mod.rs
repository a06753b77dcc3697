//! Report catalogue: which filters each report takes, which columns it
//! returns, and how it is laid out when exported.

pub mod options;
pub mod query;
pub mod rows;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::model::filter::{FilterDimension, FilterSelection};
use crate::model::role::Role;

/// One result row: wire column key -> scalar value.
pub type Row = Map<String, Value>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    BranchDetails,
    EmployeesByDepartment,
    EmployeesByBranch,
    EmployeesByPayGrade,
    LeaveBalance,
    LeaveRequests,
    CustomField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// A result column: the stable wire key and the table header shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

const fn col(key: &'static str, header: &'static str) -> Column {
    Column { key, header }
}

const BRANCH_COLUMNS: &[Column] = &[
    col("Organization Name", "Organization Name"),
    col("Registration No", "Registration No"),
    col("Head Office", "Head Office"),
    col("Branch Name", "Branch Name"),
];

const EMPLOYEE_COLUMNS: &[Column] = &[
    col("Full_Name", "Full Name"),
    col("NIC", "NIC"),
    col("Dept_Name", "Department"),
    col("Branch_Name", "Branch"),
    col("Status", "Status"),
    col("Title", "Title"),
];

const PAY_GRADE_COLUMNS: &[Column] = &[
    col("Full_Name", "Full Name"),
    col("NIC", "NIC"),
    col("Dept_Name", "Department"),
    col("Branch_Name", "Branch"),
    col("Pay_Grade", "Pay Grade"),
];

const LEAVE_BALANCE_COLUMNS: &[Column] = &[
    col("Full_Name", "Full Name"),
    col("Employment_Status", "Status"),
    col("Pay_Grade_Level", "Pay Grade"),
    col("Annual_Leave_Balance", "Annual Balance"),
    col("Annual_Leave_Entitlement", "Annual Entitlement"),
    col("Annual_Leave_Remaining", "Annual Remaining"),
    col("Casual_Leave_Balance", "Casual Balance"),
    col("Casual_Leave_Entitlement", "Casual Entitlement"),
    col("Casual_Leave_Remaining", "Casual Remaining"),
    col("Maternity_Leave_Balance", "Maternity Balance"),
    col("Maternity_Leave_Entitlement", "Maternity Entitlement"),
    col("Maternity_Leave_Remaining", "Maternity Remaining"),
    col("No_Pay_Leave_Balance", "No Pay Balance"),
    col("No_Pay_Leave_Entitlement", "No Pay Entitlement"),
    col("No_Pay_Leave_Remaining", "No Pay Remaining"),
    col("Total_Leave_Balance", "Total Balance"),
    col("Total_Leave_Entitlement", "Total Entitlement"),
    col("Total_Leave_Remaining", "Total Remaining"),
];

const LEAVE_REQUEST_COLUMNS: &[Column] = &[
    col("Full_Name", "Full Name"),
    col("Employment_NIC", "NIC"),
    col("Title", "Title"),
    col("Pay_Grade_Level", "Pay Grade"),
    col("Start_Date", "Leave Start Date"),
    col("End_Date", "Leave End Date"),
    col("Reason", "Reason"),
    col("Supervisor_Full_Name", "Supervisor Name"),
    col("Supervisor_NIC", "Supervisor NIC"),
    col("Supervisor_Title", "Supervisor Title"),
];

const CUSTOM_FIELD_COLUMNS: &[Column] = &[
    col("Full_Name", "Full Name"),
    col("NIC", "NIC"),
    col("Field Name", "Field Name"),
];

impl ReportKind {
    /// Path segment under `/genarateReport`.
    pub fn endpoint(self) -> &'static str {
        match self {
            ReportKind::BranchDetails => "get_branch_details",
            ReportKind::EmployeesByDepartment => "get_employee_detail_by_department",
            ReportKind::EmployeesByBranch => "get_employee_detail_by_branch",
            ReportKind::EmployeesByPayGrade => "get_employee_detail_by_pay_grade",
            ReportKind::LeaveBalance => "get_annual_leave_balance",
            ReportKind::LeaveRequests => "get_leave_request_details",
            ReportKind::CustomField => "get_custom_field",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::BranchDetails => "Branches of an Organization",
            ReportKind::EmployeesByDepartment => "Employees by Department",
            ReportKind::EmployeesByBranch => "Employees by Branch",
            ReportKind::EmployeesByPayGrade => "Employees by Pay Grade",
            ReportKind::LeaveBalance => "Leave Balance",
            ReportKind::LeaveRequests => "Approved Leave Requests",
            ReportKind::CustomField => "Custom Field values",
        }
    }

    pub fn filters(self) -> &'static [FilterDimension] {
        use FilterDimension as D;
        match self {
            ReportKind::BranchDetails => &[D::Organization],
            ReportKind::EmployeesByDepartment => &[D::Department, D::Title, D::Status],
            ReportKind::EmployeesByBranch => &[D::Branch, D::Title, D::Status],
            ReportKind::EmployeesByPayGrade => &[D::Department, D::Branch, D::PayGrade],
            ReportKind::LeaveBalance => &[D::Department, D::Branch],
            ReportKind::LeaveRequests => &[D::Department, D::Branch],
            ReportKind::CustomField => &[D::Department, D::Branch, D::CustomField],
        }
    }

    /// Leave requests are additionally bounded by a `[fromDate, toDate]` window.
    pub fn uses_date_window(self) -> bool {
        self == ReportKind::LeaveRequests
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            ReportKind::BranchDetails => BRANCH_COLUMNS,
            ReportKind::EmployeesByDepartment | ReportKind::EmployeesByBranch => EMPLOYEE_COLUMNS,
            ReportKind::EmployeesByPayGrade => PAY_GRADE_COLUMNS,
            ReportKind::LeaveBalance => LEAVE_BALANCE_COLUMNS,
            ReportKind::LeaveRequests => LEAVE_REQUEST_COLUMNS,
            ReportKind::CustomField => CUSTOM_FIELD_COLUMNS,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            ReportKind::LeaveBalance | ReportKind::LeaveRequests => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    pub fn font_size(self) -> f32 {
        match self {
            ReportKind::LeaveBalance => 8.0,
            _ => 10.0,
        }
    }

    /// Dropdown options and the two employee detail reports are open to every
    /// role; everything else is restricted to Admin User and HR Manager.
    pub fn allows(self, role: Role) -> bool {
        match self {
            ReportKind::EmployeesByDepartment | ReportKind::EmployeesByBranch => true,
            _ => role.is_manager(),
        }
    }

    /// JSON body the web forms post for this report: only the report's own
    /// dimensions, "All" as `0`, and the effective window for leave requests.
    pub fn request_body(self, selection: &FilterSelection) -> Value {
        let mut body = Map::new();
        for dimension in self.filters() {
            let id = selection.get(*dimension).id().unwrap_or(0);
            body.insert(dimension.as_ref().to_string(), Value::from(id));
        }
        if self.uses_date_window() {
            let (from, to) = query::effective_window(selection);
            body.insert("fromDate".into(), Value::from(from.to_string()));
            body.insert("toDate".into(), Value::from(to.to_string()));
        }
        Value::Object(body)
    }
}

/// A report's rows, as held by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    pub kind: ReportKind,
    pub rows: Vec<Row>,
}

impl ReportResult {
    pub fn new(kind: ReportKind, rows: Vec<Row>) -> Self {
        Self { kind, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Text shown for one cell. Missing keys and nulls render empty.
pub fn cell_text(row: &Row, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn endpoints_are_unique() {
        let mut seen: Vec<&str> = ReportKind::iter().map(|k| k.endpoint()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn export_path_names_parse() {
        assert_eq!(ReportKind::from_str("leave_requests").unwrap(), ReportKind::LeaveRequests);
        assert_eq!(ReportKind::EmployeesByPayGrade.to_string(), "employees_by_pay_grade");
        assert!(ReportKind::from_str("payroll").is_err());
    }

    #[test]
    fn leave_balance_has_eighteen_columns() {
        let keys: Vec<&str> = ReportKind::LeaveBalance.columns().iter().map(|c| c.key).collect();
        assert_eq!(keys.len(), 18);
        assert_eq!(&keys[..3], &["Full_Name", "Employment_Status", "Pay_Grade_Level"]);
        assert_eq!(
            &keys[15..],
            &["Total_Leave_Balance", "Total_Leave_Entitlement", "Total_Leave_Remaining"]
        );
    }

    #[test]
    fn landscape_only_for_wide_reports() {
        for kind in ReportKind::iter() {
            let wide = matches!(kind, ReportKind::LeaveBalance | ReportKind::LeaveRequests);
            assert_eq!(kind.orientation() == Orientation::Landscape, wide, "{kind}");
        }
    }

    #[test]
    fn role_gates() {
        assert!(ReportKind::EmployeesByBranch.allows(Role::Employee));
        assert!(ReportKind::EmployeesByDepartment.allows(Role::SecondManager));
        assert!(!ReportKind::EmployeesByPayGrade.allows(Role::Employee));
        assert!(!ReportKind::LeaveBalance.allows(Role::SecondManager));
        assert!(ReportKind::CustomField.allows(Role::HrManager));
    }

    #[test]
    fn request_body_matches_form_payloads() {
        let selection = FilterSelection::default()
            .with(FilterDimension::Department, 3)
            .with(FilterDimension::Organization, 9);
        assert_eq!(
            ReportKind::EmployeesByPayGrade.request_body(&selection),
            json!({ "department": 3, "branch": 0, "pay_grade": 0 })
        );
        assert_eq!(
            ReportKind::LeaveRequests.request_body(&selection),
            json!({
                "department": 3,
                "branch": 0,
                "fromDate": "2024-01-01",
                "toDate": "2024-12-31"
            })
        );
    }

    #[test]
    fn cell_text_formats_scalars() {
        let row: Row = serde_json::from_value(json!({
            "NIC": "901234567V",
            "Total_Leave_Remaining": 12,
            "Reason": null
        }))
        .unwrap();
        assert_eq!(cell_text(&row, "NIC"), "901234567V");
        assert_eq!(cell_text(&row, "Total_Leave_Remaining"), "12");
        assert_eq!(cell_text(&row, "Reason"), "");
        assert_eq!(cell_text(&row, "Title"), "");
    }
}
