//! Turns a report result into what the user sees: preview cards and an
//! exportable PDF table.

pub mod labels;
pub mod pdf;
pub mod preview;

use chrono::NaiveDate;
use derive_more::Display;
use tracing::info;

use crate::model::filter::FilterSelection;
use crate::report::ReportResult;
use crate::report::options::DropdownOptions;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[display(fmt = "No data available to export.")]
    NoData,
    #[display(fmt = "{}", _0)]
    Pdf(String),
}

impl std::error::Error for RenderError {}

/// A rendered PDF and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub heading: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Renders `result` as a PDF table. Refuses empty results.
pub fn export(
    result: &ReportResult,
    selection: &FilterSelection,
    options: &DropdownOptions,
    today: NaiveDate,
) -> Result<ExportArtifact, RenderError> {
    if result.is_empty() {
        return Err(RenderError::NoData);
    }

    let heading = labels::heading(result.kind, selection, options);
    let table = pdf::layout(result, &heading);
    let bytes = pdf::write_pdf(&table)?;
    let filename = labels::filename(&heading, today);

    info!(
        report = %result.kind,
        rows = result.rows.len(),
        pages = table.pages.len(),
        filename = %filename,
        "Report exported"
    );

    Ok(ExportArtifact { heading, filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportKind, Row};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn empty_results_never_export() {
        let result = ReportResult::new(ReportKind::LeaveBalance, vec![]);
        let err = export(&result, &FilterSelection::default(), &DropdownOptions::default(), today())
            .unwrap_err();
        assert_eq!(err, RenderError::NoData);
        assert_eq!(err.to_string(), "No data available to export.");
    }

    #[test]
    fn branch_export_for_all_organizations() {
        let row: Row = serde_json::from_value(json!({
            "Organization Name": "Jupiter Apparels",
            "Registration No": "PV-00421",
            "Head Office": "Colombo",
            "Branch Name": "Kandy"
        }))
        .unwrap();
        let result = ReportResult::new(ReportKind::BranchDetails, vec![row]);
        let artifact =
            export(&result, &FilterSelection::default(), &DropdownOptions::default(), today()).unwrap();

        assert_eq!(artifact.heading, "Branches of All Organizations");
        assert_eq!(artifact.filename, "Branches of All Organizations on 2026-10-19.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-1.5"));
    }
}
