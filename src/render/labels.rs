use chrono::NaiveDate;

use crate::model::filter::{FilterDimension, FilterSelection};
use crate::report::ReportKind;
use crate::report::options::DropdownOptions;
use crate::report::query::effective_window;

/// Heading line of an exported report, phrased per report from the resolved
/// filter labels. Unset or unknown filters fall back to an "All" label.
pub fn heading(kind: ReportKind, selection: &FilterSelection, options: &DropdownOptions) -> String {
    let label = |dimension: FilterDimension, fallback: &str| -> String {
        options
            .label(dimension, selection.get(dimension))
            .unwrap_or(fallback)
            .to_string()
    };

    use FilterDimension as D;
    match kind {
        ReportKind::BranchDetails => {
            format!("Branches of {}", label(D::Organization, "All Organizations"))
        }
        ReportKind::EmployeesByDepartment => format!(
            "{} {}s of {} department",
            label(D::Status, "All"),
            label(D::Title, "Title"),
            label(D::Department, "All")
        ),
        ReportKind::EmployeesByBranch => format!(
            "{} {}s of {}",
            label(D::Status, "All"),
            label(D::Title, "Title"),
            label(D::Branch, "All Branches")
        ),
        ReportKind::EmployeesByPayGrade => format!(
            "Employees in Pay Grade: {}, {}, {}",
            label(D::PayGrade, "All"),
            label(D::Department, "All Departments"),
            label(D::Branch, "All Branches")
        ),
        ReportKind::LeaveBalance => format!(
            "Annual Leave Balance Report for {}, {}",
            label(D::Department, "All Departments"),
            label(D::Branch, "All Branches")
        ),
        ReportKind::LeaveRequests => {
            let (from, to) = effective_window(selection);
            format!(
                "Approved Leave Requests for {} Department, {} Branch ({} to {})",
                label(D::Department, "All"),
                label(D::Branch, "All"),
                from,
                to
            )
        }
        ReportKind::CustomField => format!(
            "Custom Field Report for {}, {} ({})",
            label(D::Department, "All Departments"),
            label(D::Branch, "All Branches"),
            label(D::CustomField, "All Fields")
        ),
    }
}

/// `"<heading> on <YYYY-MM-DD>.pdf"`, without characters file systems reject.
pub fn filename(heading: &str, today: NaiveDate) -> String {
    let safe: String = heading
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    format!("{} on {}.pdf", safe.trim(), today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::option::FilterOption;

    fn option(id: u64, name: &str) -> FilterOption {
        FilterOption { id, name: name.into() }
    }

    fn options() -> DropdownOptions {
        DropdownOptions {
            departments: vec![option(3, "Finance"), option(4, "Engineering")],
            titles: vec![option(1, "Accountant")],
            employment_statuses: vec![option(2, "Permanent")],
            pay_grades: vec![option(2, "Level 2")],
            custom_fields: vec![option(5, "Blood Group")],
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn department_heading_uses_labels_and_fallbacks() {
        let selection = FilterSelection::default()
            .with(FilterDimension::Department, 3)
            .with(FilterDimension::Status, 2);
        assert_eq!(
            heading(ReportKind::EmployeesByDepartment, &selection, &options()),
            "Permanent Titles of Finance department"
        );
        assert_eq!(
            heading(ReportKind::EmployeesByDepartment, &FilterSelection::default(), &options()),
            "All Titles of All department"
        );
    }

    #[test]
    fn unknown_ids_fall_back_to_all() {
        let selection = FilterSelection::default().with(FilterDimension::Department, 99);
        assert_eq!(
            heading(ReportKind::LeaveBalance, &selection, &options()),
            "Annual Leave Balance Report for All Departments, All Branches"
        );
    }

    #[test]
    fn leave_request_heading_names_department_and_window() {
        let selection = FilterSelection::default()
            .with(FilterDimension::Department, 3)
            .between(date(2024, 3, 1), date(2024, 3, 31));
        let text = heading(ReportKind::LeaveRequests, &selection, &options());
        assert_eq!(
            text,
            "Approved Leave Requests for Finance Department, All Branch (2024-03-01 to 2024-03-31)"
        );
        assert!(text.contains("Department"));
    }

    #[test]
    fn pay_grade_filename_drops_colon() {
        let selection = FilterSelection::default().with(FilterDimension::PayGrade, 2);
        let text = heading(ReportKind::EmployeesByPayGrade, &selection, &options());
        assert_eq!(text, "Employees in Pay Grade: Level 2, All Departments, All Branches");
        assert_eq!(
            filename(&text, date(2026, 10, 19)),
            "Employees in Pay Grade Level 2, All Departments, All Branches on 2026-10-19.pdf"
        );
    }

    #[test]
    fn custom_field_heading() {
        let selection = FilterSelection::default().with(FilterDimension::CustomField, 5);
        assert_eq!(
            heading(ReportKind::CustomField, &selection, &options()),
            "Custom Field Report for All Departments, All Branches (Blood Group)"
        );
    }

    #[test]
    fn same_selection_same_heading_and_filename() {
        let selection = FilterSelection::default().with(FilterDimension::Department, 4);
        let first = heading(ReportKind::EmployeesByPayGrade, &selection, &options());
        let second = heading(ReportKind::EmployeesByPayGrade, &selection, &options());
        assert_eq!(first, second);
        assert_eq!(filename(&first, date(2024, 1, 2)), filename(&second, date(2024, 1, 2)));
    }
}
