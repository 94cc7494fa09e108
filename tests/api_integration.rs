//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP API flows including:
//! - Login against the users sheet and session tokens
//! - Dashboard, weekly summary and client pages
//! - Visit entry invalidating the cached tables
//! - Action board drafts, saves and ownership checks
//!
//! Every test builds its own data directory of xlsx files.

use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use diario_bordo_api::api::{self, AppState};
use diario_bordo_api::config::AppConfig;
use diario_bordo_api::infrastructure::spreadsheet::cells::Cell;
use diario_bordo_api::infrastructure::spreadsheet::{read_table, write_table};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for oneshot

const R1_ITEM: &str = "6f1c2d3e-4a5b-4c6d-8e7f-901a2b3c4d5e";
const R2_ITEM: &str = "0a1b2c3d-4e5f-4a6b-9c7d-8e9f0a1b2c3d";

fn sheet(path: &Path, headers: &[&str], rows: Vec<Vec<Cell>>) {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_table(path, &headers, &rows).expect("Failed to write fixture sheet");
}

fn text(value: &str) -> Cell {
    Cell::text(value)
}

fn sale(rep: &str, client: &str, collection: &str, amount: f64, date: &str) -> Vec<Cell> {
    vec![
        text(rep),
        text(client),
        text(collection),
        Cell::Number(amount),
        text(date),
    ]
}

/// Setup a data directory with one representative per sheet scenario
fn setup_data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create data dir");
    let root = dir.path();

    sheet(
        &root.join("usuarios.xlsx"),
        &["Email", "Senha", "Nome", "Representante"],
        vec![
            vec![text("ana@example.com"), text("segredo"), text("Ana"), text("R1")],
            vec![text("bia@example.com"), text("outra"), text("Bia"), text("R2")],
        ],
    );
    sheet(
        &root.join("diario_bordo.xlsx"),
        &["Representante", "Cliente", "Coleção", "Valor", "Data"],
        vec![
            sale("R1", "Loja A", "Verão", 1500.0, "2025-01-02"),
            sale("R1", "Loja A", "Verão", 1500.0, "2025-01-07"),
            sale("R1", "Loja B", "Verão", 1000.0, "2025-01-08"),
            sale("R2", "Loja C", "Verão", 9999.0, "2025-01-08"),
            sale("R1", "Loja D", "Inverno", 700.0, "2025-01-08"),
        ],
    );
    sheet(
        &root.join("metas_colecao.xlsx"),
        &["Representante", "Coleção", "Meta", "Meta Clientes"],
        vec![vec![text("R1"), text("Verão"), Cell::Number(10000.0), Cell::Number(50.0)]],
    );
    sheet(
        &root.join("metas_semanais.xlsx"),
        &["Coleção", "Inicio", "Fim", "Percentual"],
        vec![
            vec![text("Verão"), text("2025-01-06"), text("2025-01-12"), text("25%")],
            vec![text("Verão"), text("2024-12-30"), text("2025-01-05"), text("10%")],
        ],
    );
    sheet(
        &root.join("acoes.xlsx"),
        &["id", "Representante", "Cliente", "Ação", "Situação", "Comentário"],
        vec![
            vec![
                text(R1_ITEM),
                text("R1"),
                text("Loja A"),
                text("Apresentar coleção"),
                text("A Fazer"),
                Cell::Empty,
            ],
            vec![
                text(R2_ITEM),
                text("R2"),
                text("Loja C"),
                text("Cobrar pedido"),
                text("Em andamento"),
                Cell::Empty,
            ],
        ],
    );
    sheet(
        &root.join("colecoes.xlsx"),
        &["Coleção", "Ativa"],
        vec![
            vec![text("Inverno"), text("não")],
            vec![text("Verão"), text("sim")],
        ],
    );

    dir
}

/// Setup test application over a data directory
fn setup_app(dir: &TempDir) -> Router {
    let config = AppConfig::for_data_dir(dir.path(), "test-secret");
    api::router(AppState::new(config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, token: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "email": email, "password": password })).unwrap(),
        ))
        .unwrap();

    let (status, json) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_string()
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_login_and_session() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "  ANA@example.com",
                "password": "segredo "
            }))
            .unwrap(),
        ))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["representative_id"], "R1");
    assert_eq!(json["display_name"], "Ana");
    let token = json["token"].as_str().unwrap();

    let (status, json) = send(&app, get("/api/session", token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["identity"]["email"], "ana@example.com");
    assert_eq!(json["current_page"], "dashboard");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "ana@example.com",
                "password": "errada"
            }))
            .unwrap(),
        ))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);

    let request = Request::builder()
        .uri("/api/dashboard")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Missing authorization header");

    let (status, _) = send(&app, get("/api/dashboard", "not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_progress() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    // Default collection is the first active catalog entry
    let (status, json) = send(&app, get("/api/dashboard?as_of=2025-01-08", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let report = &json["report"];
    assert_eq!(report["collection"], "Verão");
    assert_eq!(decimal(&report["totals"]["total_sold"]), Decimal::from(4000));
    assert_eq!(report["totals"]["clients_served"], 2);

    let standing = &report["standing"];
    assert_eq!(standing["state"], "configured");
    assert_eq!(decimal(&standing["attainment"]), Decimal::new(4, 1));
    assert_eq!(decimal(&standing["client_attainment"]), Decimal::new(4, 2));
    assert_eq!(decimal(&standing["remaining_amount"]), Decimal::from(6000));
    assert_eq!(decimal(&standing["remaining_clients"]), Decimal::from(48));

    let weekly = &report["weekly"];
    assert_eq!(weekly["state"], "active");
    assert_eq!(weekly["period_start"], "2025-01-06");
    assert_eq!(decimal(&weekly["target_amount"]), Decimal::from(2500));
    assert_eq!(decimal(&weekly["sold_in_week"]), Decimal::from(2500));
    assert_eq!(decimal(&weekly["remaining_amount"]), Decimal::ZERO);

    assert_eq!(json["display"]["total_sold"], "R$ 4,000.00");
    assert_eq!(json["display"]["attainment"], "40.0%");
}

#[tokio::test]
async fn test_dashboard_without_goal_or_week() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "bia@example.com", "outra").await;

    let (status, json) = send(&app, get("/api/dashboard?as_of=2025-02-01", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["report"]["standing"]["state"], "not_configured");
    assert_eq!(json["report"]["weekly"]["state"], "no_active_week");
    assert_eq!(decimal(&json["report"]["totals"]["total_sold"]), Decimal::from(9999));
}

#[tokio::test]
async fn test_missing_sheet_fails_only_the_pages_that_read_it() {
    let dir = setup_data_dir();
    std::fs::remove_file(dir.path().join("metas_semanais.xlsx")).unwrap();
    let app = setup_app(&dir);

    // Login reads only the users sheet
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, json) = send(&app, get("/api/dashboard?as_of=2025-01-08", &token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("metas_semanais.xlsx"));

    let (status, json) = send(&app, get("/api/clients", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["clients"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, get("/api/kanban", &token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_warnings_belong_to_the_caller() {
    let dir = setup_data_dir();
    sheet(
        &dir.path().join("diario_bordo.xlsx"),
        &["Representante", "Cliente", "Coleção", "Valor", "Data"],
        vec![
            sale("R1", "Loja A", "Verão", 1500.0, "2025-01-07"),
            vec![text("R1"), text("Loja B"), text("Verão"), text("sem valor"), text("2025-01-07")],
            vec![text("R2"), text("Loja C"), text("Verão"), text("n/d"), text("2025-01-07")],
        ],
    );
    sheet(
        &dir.path().join("usuarios.xlsx"),
        &["Email", "Senha", "Nome", "Representante"],
        vec![
            vec![text("ana@example.com"), text("segredo"), text("Ana"), text("R1")],
            vec![text("caixa-da-loja"), text("outra"), text("Caixa"), text("R2")],
        ],
    );
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, json) = send(&app, get("/api/dashboard?as_of=2025-01-08", &token)).await;

    assert_eq!(status, StatusCode::OK);
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["value"], "sem valor");
    assert_eq!(warnings[0]["representative_id"], "R1");
}

#[tokio::test]
async fn test_weekly_summary_and_week_detail() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, json) = send(&app, get("/api/weeks?collection=Ver%C3%A3o", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 2);
    // Newest first
    assert_eq!(weeks[0]["period_start"], "2025-01-06");
    assert_eq!(weeks[0]["sales_count"], 2);
    assert_eq!(weeks[1]["sales_count"], 1);

    let (status, json) = send(&app, get("/api/weeks/2025-01-06/sales", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sales"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, get("/api/weeks/2025-03-03/sales", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_coverage_and_collections() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, json) = send(&app, get("/api/clients", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let clients = json["clients"].as_array().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["client_name"], "Loja A");
    assert_eq!(clients[0]["orders"], 2);

    let (status, json) = send(&app, get("/api/collections", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (_, json) = send(&app, get("/api/session", &token)).await;
    assert_eq!(json["current_page"], "clients");
}

#[tokio::test]
async fn test_new_sale_is_visible_on_next_read() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    // Warm the cache first
    let (status, _) = send(&app, get("/api/dashboard?as_of=2025-01-08", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let payload = json!({
        "client_name": "Loja E",
        "collection": "Verão",
        "amount": "500",
        "date": "2025-01-09"
    });
    let (status, json) = send(&app, with_json("POST", "/api/sales", &token, payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["representative_id"], "R1");

    let (_, json) = send(&app, get("/api/dashboard?as_of=2025-01-08", &token)).await;
    assert_eq!(decimal(&json["report"]["totals"]["total_sold"]), Decimal::from(4500));
    assert_eq!(json["report"]["totals"]["clients_served"], 3);
}

#[tokio::test]
async fn test_invalid_sale_is_rejected() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let payload = json!({
        "client_name": "Loja E",
        "collection": "Verão",
        "amount": "-10"
    });
    let (status, json) = send(&app, with_json("POST", "/api/sales", &token, payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Amount cannot be negative");
}

#[tokio::test]
async fn test_kanban_edit_and_save() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, json) = send(&app, get("/api/kanban", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["to_do"].as_array().unwrap().len(), 1);
    assert_eq!(json["in_progress"].as_array().unwrap().len(), 0);
    assert_eq!(json["unsaved_changes"], false);

    let uri = format!("/api/kanban/items/{}", R1_ITEM);
    let payload = json!({ "status": "in_progress", "comment": "ligar terça" });
    let (status, json) = send(&app, with_json("PATCH", &uri, &token, payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["status_label"], "Em andamento");

    // Another representative's item is not visible
    let uri = format!("/api/kanban/items/{}", R2_ITEM);
    let payload = json!({ "status": "done" });
    let (status, _) = send(&app, with_json("PATCH", &uri, &token, payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, get("/api/kanban", &token)).await;
    assert_eq!(json["unsaved_changes"], true);

    let (status, json) = send(&app, with_json("POST", "/api/kanban/save", &token, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unsaved_changes"], false);
    assert_eq!(json["in_progress"][0]["comment"], "ligar terça");

    let table = read_table(&dir.path().join("acoes.xlsx")).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].1[4], text("Em andamento"));
    assert_eq!(table.rows[1].1[4], text("Em andamento"));
    assert_eq!(table.rows[0].1[5], text("ligar terça"));
}

#[tokio::test]
async fn test_concurrent_drafts_conflict() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let ana = login(&app, "ana@example.com", "segredo").await;
    let bia = login(&app, "bia@example.com", "outra").await;

    // Both sessions take a draft of the same file version
    send(&app, get("/api/kanban", &ana)).await;
    send(&app, get("/api/kanban", &bia)).await;

    let payload = json!({ "client_name": "Loja F", "suggested_action": "Enviar catálogo" });
    let (status, _) = send(&app, with_json("POST", "/api/kanban/items", &ana, payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, with_json("POST", "/api/kanban/save", &ana, json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/kanban/items/{}", R2_ITEM);
    let payload = json!({ "status": "done" });
    let (status, _) = send(&app, with_json("PATCH", &uri, &bia, payload)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = send(&app, with_json("POST", "/api/kanban/save", &bia, json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("acoes.xlsx"));

    // Discarding the stale draft picks up the saved file
    let (status, _) = send(&app, with_json("POST", "/api/kanban/discard", &bia, json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, json) = send(&app, get("/api/kanban", &bia)).await;
    assert_eq!(json["in_progress"].as_array().unwrap().len(), 1);
    assert_eq!(json["unsaved_changes"], false);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let dir = setup_data_dir();
    let app = setup_app(&dir);
    let token = login(&app, "ana@example.com", "segredo").await;

    let (status, _) = send(&app, with_json("POST", "/api/auth/logout", &token, json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, get("/api/session", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Session expired, please log in again");
}
