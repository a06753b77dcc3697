use std::fmt;

use crate::report::{ReportKind, ReportResult, Row, cell_text};

pub const NO_DATA: &str = "No data available.";

/// One labelled line on a preview card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub lines: Vec<CardLine>,
}

/// The on-screen rendition of a result: a caption, then one card per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub caption: &'static str,
    pub cards: Vec<Card>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

enum Line {
    Field(&'static str, &'static str),
    /// `"<balance> / <entitlement> (Remaining: <remaining>)"` from a key prefix.
    Ratio(&'static str, &'static str),
    Period(&'static str, &'static str, &'static str),
    Supervisor,
}

struct Layout {
    caption: &'static str,
    title_key: &'static str,
    lines: &'static [Line],
}

const EMPLOYEE_LINES: &[Line] = &[
    Line::Field("NIC", "NIC"),
    Line::Field("Department", "Dept_Name"),
    Line::Field("Branch", "Branch_Name"),
    Line::Field("Status", "Status"),
    Line::Field("Title", "Title"),
];

fn layout(kind: ReportKind) -> Layout {
    match kind {
        ReportKind::BranchDetails => Layout {
            caption: "Organization Data",
            title_key: "Organization Name",
            lines: &[
                Line::Field("Registration No", "Registration No"),
                Line::Field("Head Office", "Head Office"),
                Line::Field("Branch", "Branch Name"),
            ],
        },
        ReportKind::EmployeesByDepartment | ReportKind::EmployeesByBranch => Layout {
            caption: "Download request",
            title_key: "Full_Name",
            lines: EMPLOYEE_LINES,
        },
        ReportKind::EmployeesByPayGrade => Layout {
            caption: "Download Pay Grade Report",
            title_key: "Full_Name",
            lines: &[
                Line::Field("NIC", "NIC"),
                Line::Field("Department", "Dept_Name"),
                Line::Field("Branch", "Branch_Name"),
                Line::Field("Pay Grade", "Pay_Grade"),
            ],
        },
        ReportKind::LeaveBalance => Layout {
            caption: "Download Leave Balance Report",
            title_key: "Full_Name",
            lines: &[
                Line::Field("Status", "Employment_Status"),
                Line::Field("Pay Grade", "Pay_Grade_Level"),
                Line::Ratio("Annual", "Annual_Leave"),
                Line::Ratio("Casual", "Casual_Leave"),
                Line::Ratio("Maternity", "Maternity_Leave"),
                Line::Ratio("No Pay", "No_Pay_Leave"),
                Line::Ratio("Total", "Total_Leave"),
            ],
        },
        ReportKind::LeaveRequests => Layout {
            caption: "Download Approved Leave Request Report",
            title_key: "Full_Name",
            lines: &[
                Line::Field("NIC", "Employment_NIC"),
                Line::Field("Title", "Title"),
                Line::Field("Pay Grade", "Pay_Grade_Level"),
                Line::Period("Leave", "Start_Date", "End_Date"),
                Line::Field("Reason", "Reason"),
                Line::Supervisor,
            ],
        },
        ReportKind::CustomField => Layout {
            caption: "Download Custom Field Report",
            title_key: "Full_Name",
            lines: &[Line::Field("NIC", "NIC"), Line::Field("Field", "Field Name")],
        },
    }
}

fn render_line(row: &Row, line: &Line) -> CardLine {
    match line {
        Line::Field(label, key) => CardLine {
            label: *label,
            text: cell_text(row, key),
        },
        Line::Ratio(label, prefix) => {
            let part = |suffix: &str| cell_text(row, &format!("{prefix}_{suffix}"));
            CardLine {
                label: *label,
                text: format!(
                    "{} / {} (Remaining: {})",
                    part("Balance"),
                    part("Entitlement"),
                    part("Remaining")
                ),
            }
        }
        Line::Period(label, start, end) => CardLine {
            label: *label,
            text: format!("{} to {}", cell_text(row, start), cell_text(row, end)),
        },
        Line::Supervisor => {
            let name = cell_text(row, "Supervisor_Full_Name");
            let text = if name.is_empty() {
                "None".to_string()
            } else {
                format!(
                    "{} ({}), NIC: {}",
                    name,
                    cell_text(row, "Supervisor_Title"),
                    cell_text(row, "Supervisor_NIC")
                )
            };
            CardLine {
                label: "Supervisor",
                text,
            }
        }
    }
}

/// Builds the card list for a result, one card per row in row order.
pub fn preview(result: &ReportResult) -> Preview {
    let layout = layout(result.kind);
    let cards = result
        .rows
        .iter()
        .map(|row| Card {
            title: cell_text(row, layout.title_key),
            lines: layout.lines.iter().map(|line| render_line(row, line)).collect(),
        })
        .collect();

    Preview {
        caption: layout.caption,
        cards,
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.caption)?;
        if self.cards.is_empty() {
            return writeln!(f, "{NO_DATA}");
        }
        for (index, card) in self.cards.iter().enumerate() {
            writeln!(f, "[{}] {}", index + 1, card.title)?;
            for line in &card.lines {
                writeln!(f, "    {}: {}", line.label, line.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_result_shows_placeholder() {
        let preview = preview(&ReportResult::new(ReportKind::CustomField, vec![]));
        assert!(preview.is_empty());
        assert_eq!(
            preview.to_string(),
            "== Download Custom Field Report ==\nNo data available.\n"
        );
    }

    #[test]
    fn leave_balance_card_shows_ratios() {
        let result = ReportResult::new(
            ReportKind::LeaveBalance,
            vec![row(json!({
                "Full_Name": "Nimal Perera",
                "Employment_Status": "Permanent",
                "Pay_Grade_Level": "Level 2",
                "Annual_Leave_Balance": 4,
                "Annual_Leave_Entitlement": 14,
                "Annual_Leave_Remaining": 10,
                "Total_Leave_Balance": 6,
                "Total_Leave_Entitlement": 40,
                "Total_Leave_Remaining": 34
            }))],
        );
        let preview = preview(&result);
        let card = &preview.cards[0];
        assert_eq!(card.title, "Nimal Perera");
        assert_eq!(card.lines[2].text, "4 / 14 (Remaining: 10)");
        assert_eq!(card.lines[6].label, "Total");
        assert_eq!(card.lines[6].text, "6 / 40 (Remaining: 34)");
    }

    #[test]
    fn leave_request_card_shows_period_and_supervisor() {
        let result = ReportResult::new(
            ReportKind::LeaveRequests,
            vec![
                row(json!({
                    "Full_Name": "Kamal Silva",
                    "Start_Date": "2024-03-04",
                    "End_Date": "2024-03-06",
                    "Supervisor_Full_Name": "Nimal Perera",
                    "Supervisor_NIC": "901234567V",
                    "Supervisor_Title": "Team Lead"
                })),
                row(json!({ "Full_Name": "Sunil Fernando", "Supervisor_Full_Name": null })),
            ],
        );
        let preview = preview(&result);
        assert_eq!(preview.caption, "Download Approved Leave Request Report");
        assert_eq!(preview.cards[0].lines[3].text, "2024-03-04 to 2024-03-06");
        assert_eq!(
            preview.cards[0].lines[5].text,
            "Nimal Perera (Team Lead), NIC: 901234567V"
        );
        assert_eq!(preview.cards[1].lines[5].text, "None");
    }

    #[test]
    fn cards_keep_row_order() {
        let result = ReportResult::new(
            ReportKind::BranchDetails,
            vec![
                row(json!({ "Organization Name": "Jupiter", "Branch Name": "Kandy" })),
                row(json!({ "Organization Name": "Jupiter", "Branch Name": "Galle" })),
            ],
        );
        let text = preview(&result).to_string();
        assert!(text.starts_with("== Organization Data ==\n[1] Jupiter\n"));
        assert!(text.find("Kandy").unwrap() < text.find("Galle").unwrap());
        assert!(text.contains("    Registration No: \n"));
    }
}
