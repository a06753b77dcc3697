//! Runs one HR report against a running report service, prints the preview
//! and optionally saves the PDF export.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use hrm_reports::client::{ReportClient, ReportSession, RequestContext};
use hrm_reports::model::filter::{FilterDimension, FilterSelection};
use hrm_reports::report::ReportKind;

/// Generate an HR report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report to run: branch_details, employees_by_department, employees_by_branch,
    /// employees_by_pay_grade, leave_balance, leave_requests, custom_field
    report: ReportKind,

    /// Report API base URL, including the API prefix
    #[arg(long, env = "HRM_API_URL", default_value = "http://127.0.0.1:8080/api")]
    base_url: String,

    /// Bearer access token
    #[arg(long, env = "HRM_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, value_name = "ID")]
    organization: Option<u64>,
    #[arg(long, value_name = "ID")]
    department: Option<u64>,
    #[arg(long, value_name = "ID")]
    title: Option<u64>,
    #[arg(long, value_name = "ID")]
    status: Option<u64>,
    #[arg(long, value_name = "ID")]
    branch: Option<u64>,
    #[arg(long, value_name = "ID")]
    pay_grade: Option<u64>,
    #[arg(long, value_name = "ID")]
    custom_field: Option<u64>,

    /// Window start for leave requests (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Window end for leave requests (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Also write the PDF export into this directory
    #[arg(long, value_name = "DIR")]
    pdf: Option<PathBuf>,
}

impl Cli {
    fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection {
            from_date: self.from,
            to_date: self.to,
            ..Default::default()
        };
        for (dimension, id) in [
            (FilterDimension::Organization, self.organization),
            (FilterDimension::Department, self.department),
            (FilterDimension::Title, self.title),
            (FilterDimension::Status, self.status),
            (FilterDimension::Branch, self.branch),
            (FilterDimension::PayGrade, self.pay_grade),
            (FilterDimension::CustomField, self.custom_field),
        ] {
            selection.set(dimension, id.into());
        }
        selection
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let client = ReportClient::new(&cli.base_url);
    let ctx = RequestContext::new(cli.token.clone());
    let selection = cli.selection();

    let mut session = ReportSession::new(cli.report);
    session.load_options(&client, &ctx).await;

    if let Err(notice) = session.submit(&client, &ctx, &selection).await {
        bail!("{}: {notice}", cli.report.title());
    }

    if let Some(preview) = session.preview() {
        print!("{preview}");
    }

    if let Some(dir) = &cli.pdf {
        let today = chrono::Local::now().date_naive();
        let artifact = match session.export(today) {
            Ok(artifact) => artifact,
            Err(notice) => bail!("{notice}"),
        };
        let path = dir.join(&artifact.filename);
        std::fs::write(&path, &artifact.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "PDF saved");
    }

    Ok(())
}
