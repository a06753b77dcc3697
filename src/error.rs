use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;

use crate::api::envelope::Envelope;
use crate::render::RenderError;

/// Every failure a report endpoint can return. All of them render as the
/// `{success: false, message}` envelope.
#[derive(Debug, Display)]
pub enum ReportError {
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    Unauthorized(String),
    #[display(fmt = "{}", _0)]
    Forbidden(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "No data available to export.")]
    NoData,
    #[display(fmt = "Unable to fetch report data")]
    Database(sqlx::Error),
    #[display(fmt = "Unable to render report: {}", _0)]
    Render(String),
}

impl std::error::Error for ReportError {}

impl From<sqlx::Error> for ReportError {
    fn from(e: sqlx::Error) -> Self {
        ReportError::Database(e)
    }
}

impl From<RenderError> for ReportError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::NoData => ReportError::NoData,
            RenderError::Pdf(msg) => ReportError::Render(msg),
        }
    }
}

impl ResponseError for ReportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReportError::Validation(_) => StatusCode::BAD_REQUEST,
            ReportError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ReportError::Forbidden(_) => StatusCode::FORBIDDEN,
            ReportError::NotFound(_) => StatusCode::NOT_FOUND,
            ReportError::NoData => StatusCode::UNPROCESSABLE_ENTITY,
            ReportError::Database(_) | ReportError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::<()>::failure(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn failures_render_the_envelope() {
        let resp = ReportError::Forbidden("Admin User/HR Manager only".into()).error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false, "message": "Admin User/HR Manager only" }));
    }

    #[test]
    fn database_details_stay_internal() {
        let err = ReportError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Unable to fetch report data");
    }
}
