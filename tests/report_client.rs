use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use hrm_reports::client::{ClientError, Notice, ReportClient, ReportSession, RequestContext};
use hrm_reports::model::filter::{FilterDimension, FilterSelection};
use hrm_reports::report::ReportKind;

fn authorized(req: &HttpRequest) -> bool {
    req.headers().get("Authorization").and_then(|h| h.to_str().ok()) == Some("Bearer good")
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "success": false, "message": "Invalid or expired token" }))
}

async fn dropdown_options(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "departments": [{ "id": 3, "name": "Finance" }],
            "pay_grades": [{ "id": 2, "name": "Level 2" }],
            "cutom_field": [{ "id": 5, "name": "Blood Group" }]
        }
    }))
}

// Only answers the exact body the pay grade form posts for grade 2.
async fn pay_grade(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    if body.into_inner() != json!({ "department": 0, "branch": 0, "pay_grade": 2 }) {
        return HttpResponse::BadRequest().json(json!({ "success": false, "message": "unexpected body" }));
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": [{
            "Full_Name": "Nimal Perera",
            "NIC": "901234567V",
            "Dept_Name": "Finance",
            "Branch_Name": "Kandy",
            "Pay_Grade": "Level 2"
        }]
    }))
}

async fn throttled() -> HttpResponse {
    HttpResponse::TooManyRequests().body("Too many requests, retry in 1s")
}

fn spawn_backend() -> std::io::Result<String> {
    let server = HttpServer::new(|| {
        App::new().service(
            web::scope("/api/genarateReport")
                .route("/get_dropdown_options", web::get().to(dropdown_options))
                .route("/get_employee_detail_by_pay_grade", web::post().to(pay_grade))
                .route("/get_annual_leave_balance", web::post().to(throttled)),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))?;

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Ok(format!("http://{addr}/api"))
}

#[actix_web::test]
async fn options_decode_with_historic_custom_field_key() {
    let client = ReportClient::new(spawn_backend().unwrap());
    let options = client
        .dropdown_options(&RequestContext::new("good"))
        .await
        .unwrap();

    assert_eq!(options.departments[0].name, "Finance");
    assert_eq!(options.custom_fields[0].id, 5);
    assert!(options.branches.is_empty());
}

#[actix_web::test]
async fn failure_envelope_becomes_rejection() {
    let client = ReportClient::new(spawn_backend().unwrap());
    let err = client
        .dropdown_options(&RequestContext::new("stale"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Invalid or expired token"));
}

#[actix_web::test]
async fn non_envelope_errors_are_rejections_too() {
    let client = ReportClient::new(spawn_backend().unwrap());
    let err = client
        .fetch_report(&RequestContext::new("good"), ReportKind::LeaveBalance, &FilterSelection::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m.contains("429")));
}

#[actix_web::test]
async fn pay_grade_session_previews_and_exports() {
    let client = ReportClient::new(spawn_backend().unwrap());
    let ctx = RequestContext::new("good");
    let selection = FilterSelection::default().with(FilterDimension::PayGrade, 2);

    let mut session = ReportSession::new(ReportKind::EmployeesByPayGrade);
    session.load_options(&client, &ctx).await;
    session.submit(&client, &ctx, &selection).await.unwrap();

    let preview = session.preview().unwrap();
    assert_eq!(preview.caption, "Download Pay Grade Report");
    assert_eq!(preview.cards[0].title, "Nimal Perera");

    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let artifact = session.export(today).unwrap();
    assert_eq!(
        artifact.filename,
        "Employees in Pay Grade Level 2, All Departments, All Branches on 2026-10-19.pdf"
    );

    // A failed refresh keeps the rows on screen.
    let err = session
        .submit(&client, &RequestContext::new("expired"), &selection)
        .await
        .unwrap_err();
    assert_eq!(err, Notice::UnableToFetch);
    assert_eq!(session.result().unwrap().rows.len(), 1);
}

#[actix_web::test]
async fn options_failure_leaves_empty_lists() {
    let client = ReportClient::new(spawn_backend().unwrap());
    let mut session = ReportSession::new(ReportKind::CustomField);
    session.load_options(&client, &RequestContext::new("nope")).await;
    assert!(session.options().custom_fields.is_empty());
}
