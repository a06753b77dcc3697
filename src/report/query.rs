use chrono::NaiveDate;
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::{debug, error, info, warn};

use super::rows::{
    BranchDetailRow, CustomFieldRow, EmployeeDetailRow, LeaveBalanceRow, LeaveRequestRow, PayGradeRow,
    ReportRow,
};
use super::{ReportKind, Row};
use crate::error::ReportError;
use crate::model::filter::{FilterDimension, FilterSelection};

/// Window used when a leave request report is run without dates.
pub fn default_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MAX),
    )
}

/// The selection's window with missing ends filled from [`default_window`].
pub fn effective_window(selection: &FilterSelection) -> (NaiveDate, NaiveDate) {
    let (default_from, default_to) = default_window();
    (
        selection.from_date.unwrap_or(default_from),
        selection.to_date.unwrap_or(default_to),
    )
}

pub fn leave_window(selection: &FilterSelection) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let (from, to) = effective_window(selection);
    if from > to {
        return Err(ReportError::Validation(format!(
            "fromDate ({from}) must not be after toDate ({to})"
        )));
    }
    Ok((from, to))
}

/// Typed value bound to a `?` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue {
    Id(u64),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub sql: String,
    pub binds: Vec<FilterValue>,
}

struct QueryShape {
    select: &'static str,
    /// Column each filter dimension restricts.
    columns: &'static [(FilterDimension, &'static str)],
    order_by: &'static str,
}

const EMPLOYEE_SELECT: &str = r#"
        SELECT
            CONCAT(e.first_name, ' ', e.last_name) AS Full_Name,
            e.nic AS NIC,
            d.name AS Dept_Name,
            b.name AS Branch_Name,
            es.name AS Status,
            jt.name AS Title
        FROM employee e
        JOIN department d ON d.id = e.department_id
        JOIN branch b ON b.id = e.branch_id
        JOIN employment_status es ON es.id = e.employment_status_id
        JOIN job_title jt ON jt.id = e.job_title_id"#;

const EMPLOYEE_COLUMNS: &[(FilterDimension, &str)] = &[
    (FilterDimension::Department, "e.department_id"),
    (FilterDimension::Branch, "e.branch_id"),
    (FilterDimension::Title, "e.job_title_id"),
    (FilterDimension::Status, "e.employment_status_id"),
    (FilterDimension::PayGrade, "e.pay_grade_id"),
];

fn shape(kind: ReportKind) -> QueryShape {
    match kind {
        ReportKind::BranchDetails => QueryShape {
            select: r#"
        SELECT
            o.name AS `Organization Name`,
            o.registration_no AS `Registration No`,
            o.head_office AS `Head Office`,
            b.name AS `Branch Name`
        FROM organization o
        JOIN branch b ON b.organization_id = o.id"#,
            columns: &[(FilterDimension::Organization, "o.id")],
            order_by: "o.name, b.name",
        },
        ReportKind::EmployeesByDepartment | ReportKind::EmployeesByBranch => QueryShape {
            select: EMPLOYEE_SELECT,
            columns: EMPLOYEE_COLUMNS,
            order_by: "e.first_name, e.last_name, e.nic",
        },
        ReportKind::EmployeesByPayGrade => QueryShape {
            select: r#"
        SELECT
            CONCAT(e.first_name, ' ', e.last_name) AS Full_Name,
            e.nic AS NIC,
            d.name AS Dept_Name,
            b.name AS Branch_Name,
            pg.name AS Pay_Grade
        FROM employee e
        JOIN department d ON d.id = e.department_id
        JOIN branch b ON b.id = e.branch_id
        JOIN pay_grade pg ON pg.id = e.pay_grade_id"#,
            columns: EMPLOYEE_COLUMNS,
            order_by: "e.first_name, e.last_name, e.nic",
        },
        ReportKind::LeaveBalance => QueryShape {
            select: r#"
        SELECT
            CONCAT(e.first_name, ' ', e.last_name) AS Full_Name,
            es.name AS Employment_Status,
            pg.name AS Pay_Grade_Level,
            CAST(COALESCE(lb.annual_taken, 0) AS SIGNED) AS Annual_Leave_Balance,
            CAST(pg.annual_leaves AS SIGNED) AS Annual_Leave_Entitlement,
            CAST(pg.annual_leaves - COALESCE(lb.annual_taken, 0) AS SIGNED) AS Annual_Leave_Remaining,
            CAST(COALESCE(lb.casual_taken, 0) AS SIGNED) AS Casual_Leave_Balance,
            CAST(pg.casual_leaves AS SIGNED) AS Casual_Leave_Entitlement,
            CAST(pg.casual_leaves - COALESCE(lb.casual_taken, 0) AS SIGNED) AS Casual_Leave_Remaining,
            CAST(COALESCE(lb.maternity_taken, 0) AS SIGNED) AS Maternity_Leave_Balance,
            CAST(pg.maternity_leaves AS SIGNED) AS Maternity_Leave_Entitlement,
            CAST(pg.maternity_leaves - COALESCE(lb.maternity_taken, 0) AS SIGNED) AS Maternity_Leave_Remaining,
            CAST(COALESCE(lb.no_pay_taken, 0) AS SIGNED) AS No_Pay_Leave_Balance,
            CAST(pg.no_pay_leaves AS SIGNED) AS No_Pay_Leave_Entitlement,
            CAST(pg.no_pay_leaves - COALESCE(lb.no_pay_taken, 0) AS SIGNED) AS No_Pay_Leave_Remaining,
            CAST(COALESCE(lb.annual_taken, 0) + COALESCE(lb.casual_taken, 0)
                 + COALESCE(lb.maternity_taken, 0) + COALESCE(lb.no_pay_taken, 0) AS SIGNED) AS Total_Leave_Balance,
            CAST(pg.annual_leaves + pg.casual_leaves + pg.maternity_leaves + pg.no_pay_leaves AS SIGNED)
                AS Total_Leave_Entitlement,
            CAST((pg.annual_leaves + pg.casual_leaves + pg.maternity_leaves + pg.no_pay_leaves)
                 - (COALESCE(lb.annual_taken, 0) + COALESCE(lb.casual_taken, 0)
                    + COALESCE(lb.maternity_taken, 0) + COALESCE(lb.no_pay_taken, 0)) AS SIGNED)
                AS Total_Leave_Remaining
        FROM employee e
        JOIN employment_status es ON es.id = e.employment_status_id
        JOIN pay_grade pg ON pg.id = e.pay_grade_id
        LEFT JOIN leave_balance lb ON lb.employee_id = e.id"#,
            columns: EMPLOYEE_COLUMNS,
            order_by: "e.first_name, e.last_name, e.nic",
        },
        ReportKind::LeaveRequests => QueryShape {
            select: r#"
        SELECT
            CONCAT(e.first_name, ' ', e.last_name) AS Full_Name,
            e.nic AS Employment_NIC,
            jt.name AS Title,
            pg.name AS Pay_Grade_Level,
            lr.start_date AS Start_Date,
            lr.end_date AS End_Date,
            lr.reason AS Reason,
            CONCAT(s.first_name, ' ', s.last_name) AS Supervisor_Full_Name,
            s.nic AS Supervisor_NIC,
            sjt.name AS Supervisor_Title
        FROM leave_request lr
        JOIN employee e ON e.id = lr.employee_id
        JOIN job_title jt ON jt.id = e.job_title_id
        JOIN pay_grade pg ON pg.id = e.pay_grade_id
        LEFT JOIN employee s ON s.id = e.supervisor_id
        LEFT JOIN job_title sjt ON sjt.id = s.job_title_id"#,
            columns: EMPLOYEE_COLUMNS,
            order_by: "lr.start_date, e.first_name, e.last_name, lr.id",
        },
        ReportKind::CustomField => QueryShape {
            select: r#"
        SELECT
            CONCAT(e.first_name, ' ', e.last_name) AS Full_Name,
            e.nic AS NIC,
            CONCAT(ca.name, ': ', eca.value) AS `Field Name`
        FROM employee_custom_attribute eca
        JOIN custom_attribute ca ON ca.id = eca.custom_attribute_id
        JOIN employee e ON e.id = eca.employee_id"#,
            columns: &[
                (FilterDimension::Department, "e.department_id"),
                (FilterDimension::Branch, "e.branch_id"),
                (FilterDimension::CustomField, "ca.id"),
            ],
            order_by: "e.first_name, e.last_name, e.nic, ca.name",
        },
    }
}

/// Builds the SQL for `kind`. A dimension set to "All" adds no predicate.
pub fn build(kind: ReportKind, selection: &FilterSelection) -> Result<ReportQuery, ReportError> {
    let shape = shape(kind);
    let mut where_sql = String::from(" WHERE 1=1");
    let mut binds = Vec::new();

    if kind.uses_date_window() {
        let (from, to) = leave_window(selection)?;
        where_sql.push_str(" AND lr.status = 'Approved' AND lr.start_date BETWEEN ? AND ?");
        binds.push(FilterValue::Date(from));
        binds.push(FilterValue::Date(to));
    }

    for dimension in kind.filters() {
        let Some(id) = selection.get(*dimension).id() else {
            continue;
        };
        let Some((_, column)) = shape.columns.iter().find(|(d, _)| d == dimension) else {
            continue;
        };
        where_sql.push_str(&format!(" AND {column} = ?"));
        binds.push(FilterValue::Id(id));
    }

    let sql = format!("{}{}\n        ORDER BY {}", shape.select, where_sql, shape.order_by);
    Ok(ReportQuery { sql, binds })
}

/// Runs one report and returns its typed rows. An empty vector is a
/// successful result.
pub async fn fetch<R: ReportRow>(
    pool: &MySqlPool,
    kind: ReportKind,
    selection: &FilterSelection,
) -> Result<Vec<R>, ReportError> {
    let query = build(kind, selection)?;
    debug!(report = %kind, sql = %query.sql, binds = ?query.binds, "Running report query");

    let mut q = sqlx::query_as::<_, R>(&query.sql);
    for value in &query.binds {
        q = match value {
            FilterValue::Id(v) => q.bind(*v),
            FilterValue::Date(d) => q.bind(*d),
        };
    }

    let rows = q.fetch_all(pool).await.map_err(|e| {
        error!(error = %e, report = %kind, "Report query failed");
        ReportError::from(e)
    })?;

    for row in &rows {
        if let Some(problem) = row.inconsistency() {
            warn!(report = %kind, problem = %problem, "Report row failed consistency check");
        }
    }

    info!(report = %kind, rows = rows.len(), "Report generated");
    Ok(rows)
}

/// Runs `kind` and returns its rows as column maps, for rendering.
pub async fn run(
    pool: &MySqlPool,
    kind: ReportKind,
    selection: &FilterSelection,
) -> Result<Vec<Row>, ReportError> {
    match kind {
        ReportKind::BranchDetails => to_rows(fetch::<BranchDetailRow>(pool, kind, selection).await?),
        ReportKind::EmployeesByDepartment | ReportKind::EmployeesByBranch => {
            to_rows(fetch::<EmployeeDetailRow>(pool, kind, selection).await?)
        }
        ReportKind::EmployeesByPayGrade => to_rows(fetch::<PayGradeRow>(pool, kind, selection).await?),
        ReportKind::LeaveBalance => to_rows(fetch::<LeaveBalanceRow>(pool, kind, selection).await?),
        ReportKind::LeaveRequests => to_rows(fetch::<LeaveRequestRow>(pool, kind, selection).await?),
        ReportKind::CustomField => to_rows(fetch::<CustomFieldRow>(pool, kind, selection).await?),
    }
}

fn to_rows<R: Serialize>(rows: Vec<R>) -> Result<Vec<Row>, ReportError> {
    rows.into_iter()
        .map(|row| match serde_json::to_value(row) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(_) => Err(ReportError::Render("report row is not an object".into())),
            Err(e) => Err(ReportError::Render(e.to_string())),
        })
        .collect()
}
