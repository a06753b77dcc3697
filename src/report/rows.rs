use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::mysql::MySqlRow;
use utoipa::ToSchema;

/// A typed row produced by one of the report queries.
pub trait ReportRow: for<'r> FromRow<'r, MySqlRow> + Serialize + Send + Unpin + 'static {
    /// Describes why the row breaks an invariant the query should guarantee.
    fn inconsistency(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BranchDetailRow {
    #[serde(rename = "Organization Name")]
    #[sqlx(rename = "Organization Name")]
    #[schema(example = "Jupiter Apparels")]
    pub organization_name: String,
    #[serde(rename = "Registration No")]
    #[sqlx(rename = "Registration No")]
    #[schema(example = "PV-00421")]
    pub registration_no: Option<String>,
    #[serde(rename = "Head Office")]
    #[sqlx(rename = "Head Office")]
    #[schema(example = "Colombo")]
    pub head_office: Option<String>,
    #[serde(rename = "Branch Name")]
    #[sqlx(rename = "Branch Name")]
    #[schema(example = "Kandy")]
    pub branch_name: String,
}

/// Shared by the by-department and by-branch reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeDetailRow {
    #[serde(rename = "Full_Name")]
    #[sqlx(rename = "Full_Name")]
    #[schema(example = "Nimal Perera")]
    pub full_name: String,
    #[serde(rename = "NIC")]
    #[sqlx(rename = "NIC")]
    #[schema(example = "901234567V")]
    pub nic: String,
    #[serde(rename = "Dept_Name")]
    #[sqlx(rename = "Dept_Name")]
    pub dept_name: String,
    #[serde(rename = "Branch_Name")]
    #[sqlx(rename = "Branch_Name")]
    pub branch_name: String,
    #[serde(rename = "Status")]
    #[sqlx(rename = "Status")]
    #[schema(example = "Permanent")]
    pub status: String,
    #[serde(rename = "Title")]
    #[sqlx(rename = "Title")]
    #[schema(example = "Software Engineer")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PayGradeRow {
    #[serde(rename = "Full_Name")]
    #[sqlx(rename = "Full_Name")]
    pub full_name: String,
    #[serde(rename = "NIC")]
    #[sqlx(rename = "NIC")]
    pub nic: String,
    #[serde(rename = "Dept_Name")]
    #[sqlx(rename = "Dept_Name")]
    pub dept_name: String,
    #[serde(rename = "Branch_Name")]
    #[sqlx(rename = "Branch_Name")]
    pub branch_name: String,
    #[serde(rename = "Pay_Grade")]
    #[sqlx(rename = "Pay_Grade")]
    #[schema(example = "Level 2")]
    pub pay_grade: String,
}

/// Balance is days taken; remaining is entitlement minus balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveBalanceRow {
    #[serde(rename = "Full_Name")]
    #[sqlx(rename = "Full_Name")]
    pub full_name: String,
    #[serde(rename = "Employment_Status")]
    #[sqlx(rename = "Employment_Status")]
    pub employment_status: String,
    #[serde(rename = "Pay_Grade_Level")]
    #[sqlx(rename = "Pay_Grade_Level")]
    pub pay_grade_level: String,

    #[serde(rename = "Annual_Leave_Balance")]
    #[sqlx(rename = "Annual_Leave_Balance")]
    pub annual_balance: i64,
    #[serde(rename = "Annual_Leave_Entitlement")]
    #[sqlx(rename = "Annual_Leave_Entitlement")]
    pub annual_entitlement: i64,
    #[serde(rename = "Annual_Leave_Remaining")]
    #[sqlx(rename = "Annual_Leave_Remaining")]
    pub annual_remaining: i64,

    #[serde(rename = "Casual_Leave_Balance")]
    #[sqlx(rename = "Casual_Leave_Balance")]
    pub casual_balance: i64,
    #[serde(rename = "Casual_Leave_Entitlement")]
    #[sqlx(rename = "Casual_Leave_Entitlement")]
    pub casual_entitlement: i64,
    #[serde(rename = "Casual_Leave_Remaining")]
    #[sqlx(rename = "Casual_Leave_Remaining")]
    pub casual_remaining: i64,

    #[serde(rename = "Maternity_Leave_Balance")]
    #[sqlx(rename = "Maternity_Leave_Balance")]
    pub maternity_balance: i64,
    #[serde(rename = "Maternity_Leave_Entitlement")]
    #[sqlx(rename = "Maternity_Leave_Entitlement")]
    pub maternity_entitlement: i64,
    #[serde(rename = "Maternity_Leave_Remaining")]
    #[sqlx(rename = "Maternity_Leave_Remaining")]
    pub maternity_remaining: i64,

    #[serde(rename = "No_Pay_Leave_Balance")]
    #[sqlx(rename = "No_Pay_Leave_Balance")]
    pub no_pay_balance: i64,
    #[serde(rename = "No_Pay_Leave_Entitlement")]
    #[sqlx(rename = "No_Pay_Leave_Entitlement")]
    pub no_pay_entitlement: i64,
    #[serde(rename = "No_Pay_Leave_Remaining")]
    #[sqlx(rename = "No_Pay_Leave_Remaining")]
    pub no_pay_remaining: i64,

    #[serde(rename = "Total_Leave_Balance")]
    #[sqlx(rename = "Total_Leave_Balance")]
    pub total_balance: i64,
    #[serde(rename = "Total_Leave_Entitlement")]
    #[sqlx(rename = "Total_Leave_Entitlement")]
    pub total_entitlement: i64,
    #[serde(rename = "Total_Leave_Remaining")]
    #[sqlx(rename = "Total_Leave_Remaining")]
    pub total_remaining: i64,
}

impl LeaveBalanceRow {
    /// `(category, balance, entitlement, remaining)` for each category and the total.
    pub fn categories(&self) -> [(&'static str, i64, i64, i64); 5] {
        [
            ("annual", self.annual_balance, self.annual_entitlement, self.annual_remaining),
            ("casual", self.casual_balance, self.casual_entitlement, self.casual_remaining),
            (
                "maternity",
                self.maternity_balance,
                self.maternity_entitlement,
                self.maternity_remaining,
            ),
            ("no_pay", self.no_pay_balance, self.no_pay_entitlement, self.no_pay_remaining),
            ("total", self.total_balance, self.total_entitlement, self.total_remaining),
        ]
    }
}

impl ReportRow for LeaveBalanceRow {
    fn inconsistency(&self) -> Option<String> {
        let broken: Vec<&str> = self
            .categories()
            .iter()
            .filter(|(_, balance, entitlement, remaining)| *remaining != entitlement - balance)
            .map(|(name, ..)| *name)
            .collect();

        if broken.is_empty() {
            None
        } else {
            Some(format!("remaining != entitlement - balance for {}", broken.join(", ")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequestRow {
    #[serde(rename = "Full_Name")]
    #[sqlx(rename = "Full_Name")]
    pub full_name: String,
    #[serde(rename = "Employment_NIC")]
    #[sqlx(rename = "Employment_NIC")]
    pub employment_nic: String,
    #[serde(rename = "Title")]
    #[sqlx(rename = "Title")]
    pub title: String,
    #[serde(rename = "Pay_Grade_Level")]
    #[sqlx(rename = "Pay_Grade_Level")]
    pub pay_grade_level: String,
    #[serde(rename = "Start_Date")]
    #[sqlx(rename = "Start_Date")]
    #[schema(example = "2024-03-04", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[serde(rename = "End_Date")]
    #[sqlx(rename = "End_Date")]
    #[schema(example = "2024-03-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(rename = "Reason")]
    #[sqlx(rename = "Reason")]
    pub reason: Option<String>,
    #[serde(rename = "Supervisor_Full_Name")]
    #[sqlx(rename = "Supervisor_Full_Name")]
    pub supervisor_full_name: Option<String>,
    #[serde(rename = "Supervisor_NIC")]
    #[sqlx(rename = "Supervisor_NIC")]
    pub supervisor_nic: Option<String>,
    #[serde(rename = "Supervisor_Title")]
    #[sqlx(rename = "Supervisor_Title")]
    pub supervisor_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CustomFieldRow {
    #[serde(rename = "Full_Name")]
    #[sqlx(rename = "Full_Name")]
    pub full_name: String,
    #[serde(rename = "NIC")]
    #[sqlx(rename = "NIC")]
    pub nic: String,
    /// `"<field name>: <value>"`
    #[serde(rename = "Field Name")]
    #[sqlx(rename = "Field Name")]
    #[schema(example = "Blood Group: O+")]
    pub field_name: String,
}

impl ReportRow for BranchDetailRow {}
impl ReportRow for EmployeeDetailRow {}
impl ReportRow for PayGradeRow {}
impl ReportRow for LeaveRequestRow {}
impl ReportRow for CustomFieldRow {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportKind;
    use serde_json::json;

    fn balance_row() -> LeaveBalanceRow {
        LeaveBalanceRow {
            full_name: "Nimal Perera".into(),
            employment_status: "Permanent".into(),
            pay_grade_level: "Level 1".into(),
            annual_balance: 4,
            annual_entitlement: 14,
            annual_remaining: 10,
            casual_balance: 2,
            casual_entitlement: 7,
            casual_remaining: 5,
            maternity_balance: 0,
            maternity_entitlement: 0,
            maternity_remaining: 0,
            no_pay_balance: 1,
            no_pay_entitlement: 10,
            no_pay_remaining: 9,
            total_balance: 7,
            total_entitlement: 31,
            total_remaining: 24,
        }
    }

    #[test]
    fn leave_balance_invariant_holds() {
        let row = balance_row();
        assert_eq!(row.inconsistency(), None);
        for (name, balance, entitlement, remaining) in row.categories() {
            assert_eq!(remaining, entitlement - balance, "{name}");
        }
    }

    #[test]
    fn leave_balance_invariant_violation_is_named() {
        let mut row = balance_row();
        row.casual_remaining = 6;
        row.total_remaining = 25;
        assert_eq!(
            row.inconsistency().as_deref(),
            Some("remaining != entitlement - balance for casual, total")
        );
    }

    #[test]
    fn serialized_keys_match_column_order() {
        let value = serde_json::to_value(balance_row()).unwrap();
        let object = value.as_object().unwrap();
        for column in ReportKind::LeaveBalance.columns() {
            assert!(object.contains_key(column.key), "missing {}", column.key);
        }
        assert_eq!(object.len(), ReportKind::LeaveBalance.columns().len());
    }

    #[test]
    fn leave_request_dates_serialize_as_iso() {
        let row = LeaveRequestRow {
            full_name: "Kamal Silva".into(),
            employment_nic: "881112223V".into(),
            title: "Accountant".into(),
            pay_grade_level: "Level 2".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            reason: Some("Family event".into()),
            supervisor_full_name: None,
            supervisor_nic: None,
            supervisor_title: None,
        };
        let value = serde_json::to_value(row).unwrap();
        assert_eq!(value["Start_Date"], json!("2024-03-04"));
        assert_eq!(value["Supervisor_NIC"], json!(null));
    }
}
