use std::str::FromStr;

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;
use tracing::{instrument, warn};

use crate::auth::auth::AuthUser;
use crate::error::ReportError;
use crate::model::filter::FilterSelection;
use crate::render;
use crate::report::options;
use crate::report::{ReportKind, ReportResult, query};

/* =========================
Export a report as PDF
========================= */
#[utoipa::path(
    post,
    path = "/api/genarateReport/export/{report}",
    params(
        ("report" = String, Path, description = "branch_details, employees_by_department, employees_by_branch, employees_by_pay_grade, leave_balance, leave_requests or custom_field")
    ),
    request_body(content = FilterSelection, description = "Same filters the report endpoint takes"),
    responses(
        (status = 200, description = "The report as a paginated PDF table", body = String, content_type = "application/pdf"),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role may not run this report"),
        (status = 404, description = "Unknown report"),
        (status = 422, description = "No data available to export.")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
#[instrument(skip(auth, pool, path, payload), fields(user = %auth.username, report = %path))]
pub async fn export_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<FilterSelection>,
) -> Result<HttpResponse, ReportError> {
    let kind = ReportKind::from_str(&path)
        .map_err(|_| ReportError::NotFound(format!("Unknown report: {}", path.as_str())))?;
    auth.require_report(kind)?;

    let selection = payload.into_inner();
    let rows = query::run(pool.get_ref(), kind, &selection).await?;
    let result = ReportResult::new(kind, rows);
    if result.is_empty() {
        return Err(ReportError::NoData);
    }

    // Labels only shape the heading; fall back to "All" names without them.
    let options = options::load(pool.get_ref()).await.unwrap_or_else(|e| {
        warn!(error = %e, "Dropdown options unavailable, heading uses fallback labels");
        Default::default()
    });

    let today = chrono::Local::now().date_naive();
    let artifact = render::export(&result, &selection, &options, today)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(artifact.filename)],
        })
        .body(artifact.bytes))
}
