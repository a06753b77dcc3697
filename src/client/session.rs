use chrono::NaiveDate;
use derive_more::Display;
use tracing::{debug, warn};

use super::context::{RequestContext, RequestSequence, RequestTicket};
use super::http::{ClientError, ReportClient};
use crate::model::filter::FilterSelection;
use crate::render::preview::{self, Preview};
use crate::render::{self, ExportArtifact, RenderError};
use crate::report::options::DropdownOptions;
use crate::report::{ReportKind, ReportResult, query};

/// User-visible message raised by a session action.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Notice {
    #[display(fmt = "{}", _0)]
    Invalid(String),
    #[display(fmt = "Unable to fetch report data.")]
    UnableToFetch,
    #[display(fmt = "No data available to export.")]
    NoDataToExport,
    #[display(fmt = "Unable to export report: {}", _0)]
    ExportFailed(String),
}

/// An issued request: its ticket and the filters it was sent with.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub selection: FilterSelection,
}

/// State behind one report form: option lists, the displayed result and the
/// filters that produced it, and the current notice.
#[derive(Debug)]
pub struct ReportSession {
    kind: ReportKind,
    options: DropdownOptions,
    shown: Option<(ReportResult, FilterSelection)>,
    notice: Option<Notice>,
    sequence: RequestSequence,
}

impl ReportSession {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            options: DropdownOptions::default(),
            shown: None,
            notice: None,
            sequence: RequestSequence::default(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    pub fn result(&self) -> Option<&ReportResult> {
        self.shown.as_ref().map(|(result, _)| result)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_options(&mut self, options: DropdownOptions) {
        self.options = options;
    }

    /// Fetches the option lists. On failure the forms keep working with empty
    /// lists, so only "All" is selectable.
    pub async fn load_options(&mut self, client: &ReportClient, ctx: &RequestContext) {
        match client.dropdown_options(ctx).await {
            Ok(options) => self.options = options,
            Err(e) => {
                warn!(error = %e, "Dropdown options unavailable");
                self.options = DropdownOptions::default();
            }
        }
    }

    /// Checks the choices a form requires before anything is sent. A missing
    /// date falls back to the server's default window end.
    pub fn validate(&self, selection: &FilterSelection) -> Result<(), Notice> {
        if !self.kind.uses_date_window() {
            return Ok(());
        }
        let (from, to) = query::effective_window(selection);
        if from > to {
            return Err(Notice::Invalid(format!(
                "From date ({from}) must not be after To date ({to})"
            )));
        }
        Ok(())
    }

    /// Validates `selection` and issues a ticket for the request about to be
    /// sent. Any earlier outstanding request becomes stale.
    pub fn begin(&mut self, selection: &FilterSelection) -> Result<PendingRequest, Notice> {
        if let Err(notice) = self.validate(selection) {
            self.notice = Some(notice.clone());
            return Err(notice);
        }
        Ok(PendingRequest {
            ticket: self.sequence.issue(),
            selection: selection.clone(),
        })
    }

    /// Applies a response. Returns `false` when the response was stale and
    /// dropped. A failure keeps whatever was displayed before.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        outcome: Result<ReportResult, ClientError>,
    ) -> bool {
        if !self.sequence.is_latest(pending.ticket) {
            debug!(ticket = ?pending.ticket, report = %self.kind, "Dropped stale response");
            return false;
        }

        match outcome {
            Ok(result) => {
                self.shown = Some((result, pending.selection));
                self.notice = None;
            }
            Err(e) => {
                warn!(error = %e, report = %self.kind, "Report request failed");
                self.notice = Some(Notice::UnableToFetch);
            }
        }
        true
    }

    /// Runs the report end to end: validate, send, apply.
    pub async fn submit(
        &mut self,
        client: &ReportClient,
        ctx: &RequestContext,
        selection: &FilterSelection,
    ) -> Result<(), Notice> {
        let pending = self.begin(selection)?;
        let outcome = client.fetch_report(ctx, self.kind, &pending.selection).await;
        self.complete(pending, outcome);
        match &self.notice {
            Some(notice) => Err(notice.clone()),
            None => Ok(()),
        }
    }

    pub fn preview(&self) -> Option<Preview> {
        self.result().map(preview::preview)
    }

    /// Closes the preview.
    pub fn dismiss(&mut self) {
        self.shown = None;
        self.notice = None;
    }

    /// Renders the displayed result as a PDF, headed with the filters that
    /// produced it.
    pub fn export(&mut self, today: NaiveDate) -> Result<ExportArtifact, Notice> {
        let outcome = match &self.shown {
            Some((result, selection)) => render::export(result, selection, &self.options, today),
            None => Err(RenderError::NoData),
        };
        outcome.map_err(|e| {
            let notice = match e {
                RenderError::NoData => Notice::NoDataToExport,
                RenderError::Pdf(msg) => Notice::ExportFailed(msg),
            };
            self.notice = Some(notice.clone());
            notice
        })
    }
}
