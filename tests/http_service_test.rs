use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use loan_admin::application::screen::AdminScreen;
use loan_admin::config::{ScreenConfig, ServiceConfig};
use loan_admin::domain::loan::LoanId;
use loan_admin::domain::ports::LoanService;
use loan_admin::domain::state::FetchState;
use loan_admin::infrastructure::http::HttpLoanService;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Calls = Arc<Mutex<Vec<String>>>;

async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn loan_api(calls: Calls) -> Router {
    async fn pending(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .is_some_and(|value| value == "Bearer secret");
        if !authorized {
            return Err(StatusCode::UNAUTHORIZED);
        }
        Ok(Json(json!([
            {"_id": "l1", "amount": 1500, "applicant": "Ana"},
            {"_id": "l2", "amount": 300}
        ])))
    }

    async fn approve(State(calls): State<Calls>, Path(id): Path<String>) -> StatusCode {
        calls.lock().unwrap().push(format!("approve:{id}"));
        StatusCode::NO_CONTENT
    }

    async fn reject(State(calls): State<Calls>, Path(id): Path<String>) -> StatusCode {
        calls.lock().unwrap().push(format!("reject:{id}"));
        StatusCode::OK
    }

    Router::new()
        .route("/api/loans/pending", get(pending))
        .route("/api/loans/{id}/approve", post(approve))
        .route("/api/loans/{id}/reject", post(reject))
        .with_state(calls)
}

fn client(base_url: &str, token: Option<&str>) -> HttpLoanService {
    let config = ServiceConfig::new(base_url)
        .with_timeout(Duration::from_secs(5))
        .with_api_token(token.map(str::to_string));
    HttpLoanService::new(&config).unwrap()
}

#[tokio::test]
async fn test_lists_pending_loans_with_attributes() {
    let base = spawn_api(loan_api(Calls::default())).await;
    let service = client(&base, Some("secret"));

    let loans = service.list_pending_loans().await.unwrap();

    assert_eq!(loans.len(), 2);
    assert_eq!(loans[0].id.as_str(), "l1");
    assert_eq!(loans[0].attribute("applicant"), Some(&json!("Ana")));
    assert_eq!(loans[1].attribute("amount"), Some(&json!(300)));
}

#[tokio::test]
async fn test_missing_token_surfaces_status() {
    let base = spawn_api(loan_api(Calls::default())).await;
    let service = client(&base, None);

    let error = service.list_pending_loans().await.unwrap_err();
    assert!(error.message().starts_with("HTTP 401"), "{error}");
}

#[tokio::test]
async fn test_decisions_hit_their_endpoints() {
    let calls = Calls::default();
    let base = spawn_api(loan_api(calls.clone())).await;
    let service = client(&base, Some("secret"));

    service.approve_loan(&LoanId::new("l1").unwrap()).await.unwrap();
    service.reject_loan(&LoanId::new("a b").unwrap()).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["approve:l1", "reject:a b"]);
}

#[tokio::test]
async fn test_server_error_body_is_reported() {
    let router = Router::new().route(
        "/api/loans/pending",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_api(router).await;

    let error = client(&base, None).list_pending_loans().await.unwrap_err();
    assert_eq!(error.message(), "HTTP 500 Internal Server Error: boom");
}

#[tokio::test]
async fn test_malformed_payload_is_a_service_error() {
    let router = Router::new().route(
        "/api/loans/pending",
        get(|| async { Json(json!({"loans": []})) }),
    );
    let base = spawn_api(router).await;

    let error = client(&base, None).list_pending_loans().await.unwrap_err();
    assert!(error.message().starts_with("invalid pending loans payload"));
}

#[tokio::test]
async fn test_screen_over_http() {
    let base = spawn_api(loan_api(Calls::default())).await;
    let service = Arc::new(client(&base, Some("secret")));

    let screen = AdminScreen::activate(service, ScreenConfig::default());
    let state = screen.settled().await.unwrap();

    match state {
        FetchState::Loaded(loans) => assert_eq!(loans.len(), 2),
        other => panic!("unexpected state: {other:?}"),
    }
}
