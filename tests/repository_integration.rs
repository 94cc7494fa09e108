//! Integration tests for repository layer
//!
//! These tests verify that the spreadsheet repositories read and write real
//! xlsx files, including header aliasing, data-quality coercion, the action
//! board round trip and stale-save detection.

use std::path::Path;

use chrono::NaiveDate;
use diario_bordo_api::domain::errors::DiarioError;
use diario_bordo_api::domain::kanban::{ActionBoard, ActionStatus};
use diario_bordo_api::domain::repositories::{
    ActionItemRepository, GoalRepository, SalesRepository, UserRepository,
};
use diario_bordo_api::domain::sales::SaleRecord;
use diario_bordo_api::domain::user::{resolve, RepresentativeId};
use diario_bordo_api::infrastructure::repositories::{
    SpreadsheetActionItemRepository, SpreadsheetGoalRepository, SpreadsheetSalesRepository,
    SpreadsheetUserRepository,
};
use diario_bordo_api::infrastructure::spreadsheet::cells::Cell;
use diario_bordo_api::infrastructure::spreadsheet::{read_table, write_table};
use rust_decimal::Decimal;

/// Write a fixture sheet
fn sheet(path: &Path, headers: &[&str], rows: Vec<Vec<Cell>>) {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_table(path, &headers, &rows).expect("Failed to write fixture sheet");
}

fn text(value: &str) -> Cell {
    Cell::text(value)
}

fn rep(raw: &str) -> RepresentativeId {
    RepresentativeId::new(raw).unwrap()
}

#[tokio::test]
async fn test_users_sheet_with_padded_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuarios.xlsx");
    sheet(
        &path,
        &[" Email ", "Senha", "Nome", "Representante"],
        vec![
            vec![text("Ana@Example.com "), text("segredo"), text("Ana"), text("R1")],
            vec![text("bia@example.com"), Cell::Number(1234.0), Cell::Empty, Cell::Empty],
        ],
    );

    let repo = SpreadsheetUserRepository::new(&path);
    let loaded = repo.load_all().await.expect("Failed to load users");

    assert_eq!(loaded.rows.len(), 2);
    // Blank representative falls back to the login, with a warning
    assert_eq!(loaded.rows[1].representative_id.as_str(), "bia@example.com");
    assert_eq!(loaded.warnings.len(), 1);

    let identity = resolve("ana@example.com", "segredo", &loaded.rows).unwrap();
    assert_eq!(identity.representative_id.as_str(), "R1");
    assert_eq!(identity.display_name, "Ana");

    let identity = resolve("BIA@example.com", "1234", &loaded.rows).unwrap();
    assert_eq!(identity.representative_id.as_str(), "bia@example.com");
}

#[tokio::test]
async fn test_missing_required_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuarios.xlsx");
    sheet(&path, &["login", "nome"], vec![vec![text("ana@x.com"), text("Ana")]]);

    let repo = SpreadsheetUserRepository::new(&path);
    let err = repo.load_all().await.unwrap_err();

    assert!(err.is_configuration());
    match err {
        DiarioError::MissingColumns { missing, found, .. } => {
            assert!(missing.contains(&"password".to_string()));
            assert_eq!(found, vec!["login", "nome"]);
        }
        other => panic!("Expected MissingColumns, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sales_coercion_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diario_bordo.xlsx");
    sheet(
        &path,
        &["Representante", "Cliente", "Coleção", "Valor", "Data", "Observação"],
        vec![
            vec![
                text("R1"),
                text("Loja Azul"),
                text("Verão"),
                Cell::Number(1500.0),
                text("06/01/2025"),
                text("cliente novo"),
            ],
            vec![
                text("R1"),
                text("Loja Verde"),
                text("Verão"),
                text("sem valor"),
                Cell::Empty,
                Cell::Empty,
            ],
        ],
    );

    let repo = SpreadsheetSalesRepository::new(&path);
    let loaded = repo.load_all().await.expect("Failed to load sales");

    assert_eq!(loaded.rows.len(), 2);
    assert_eq!(loaded.rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 6));
    assert_eq!(loaded.rows[1].amount, Decimal::ZERO);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].row, 3);

    let sale = SaleRecord {
        representative_id: rep("R1"),
        client_name: "Loja Rosa".to_string(),
        city: Some("Recife".to_string()),
        collection: "Verão".to_string(),
        brand: None,
        quantity: Decimal::from(3),
        amount: Decimal::new(45050, 2),
        discount: Decimal::ZERO,
        term: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 8),
    };
    repo.append(&sale).await.expect("Failed to append sale");

    let reloaded = repo.load_all().await.unwrap();
    assert_eq!(reloaded.rows.len(), 3);
    assert_eq!(reloaded.rows[2].client_name, "Loja Rosa");
    assert_eq!(reloaded.rows[2].amount, Decimal::new(45050, 2));
    assert_eq!(reloaded.rows[2].date, NaiveDate::from_ymd_opt(2025, 1, 8));

    // Columns outside the schema survive an append
    let table = read_table(&path).unwrap();
    assert_eq!(table.headers[5], "Observação");
    assert_eq!(table.rows[0].1[5], text("cliente novo"));
}

#[tokio::test]
async fn test_goal_sheets_and_optional_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let goals_path = dir.path().join("metas_colecao.xlsx");
    let weeks_path = dir.path().join("metas_semanais.xlsx");
    sheet(
        &goals_path,
        &["REP", "Coleção", "Meta Valor", "Meta Clientes"],
        vec![vec![text("R1"), text("Verão"), Cell::Number(10000.0), Cell::Number(50.0)]],
    );
    sheet(
        &weeks_path,
        &["Coleção", "Semana Início", "Semana Fim", "Percentual"],
        vec![
            vec![text("Verão"), text("2025-01-06"), text("2025-01-12"), text("25%")],
            vec![text("Verão"), text("2025-01-13"), text("2025-01-19"), text("30%")],
        ],
    );

    let repo = SpreadsheetGoalRepository::new(
        &goals_path,
        &weeks_path,
        dir.path().join("colecoes.xlsx"),
    );

    let goals = repo.load_goals().await.unwrap();
    assert_eq!(goals.rows[0].sales_target_amount, Decimal::from(10000));

    let schedule = repo.load_schedule().await.unwrap();
    assert_eq!(schedule.rows[0].percent_of_collection_goal, Decimal::new(25, 2));
    assert_eq!(schedule.rows[1].percent_of_collection_goal, Decimal::new(3, 1));

    let catalog = repo.load_collections().await.unwrap();
    assert!(catalog.rows.is_empty());
}

#[tokio::test]
async fn test_action_status_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acoes.xlsx");
    sheet(
        &path,
        &["Representante", "Cliente", "Ação Sugerida", "Situação", "Comentário"],
        vec![
            vec![text("R1"), text("Loja Azul"), text("Ligar"), text("A Fazer"), Cell::Empty],
            vec![text("R2"), text("Loja Verde"), text("Visitar"), text("talvez"), Cell::Empty],
        ],
    );

    let repo = SpreadsheetActionItemRepository::new(&path);
    let (loaded, version) = repo.load().await.expect("Failed to load actions");
    assert_eq!(loaded.rows.len(), 2);
    // Unknown status reads as To Do with a warning
    assert_eq!(loaded.rows[1].status(), ActionStatus::ToDo);
    assert_eq!(loaded.warnings.len(), 1);

    let mut board = ActionBoard::new(loaded.rows, version);
    let item_id = board.items()[0].id();
    board
        .set_status(&rep("R1"), item_id, ActionStatus::Done)
        .unwrap();
    board.set_comment(&rep("R1"), item_id, "pedido fechado").unwrap();

    let new_version = repo.save_all(board.items(), board.version()).await.unwrap();
    assert_ne!(&new_version, board.version());

    let (reloaded, _) = repo.load().await.unwrap();
    let item = reloaded.rows.iter().find(|i| i.id() == item_id).unwrap();
    assert_eq!(item.status(), ActionStatus::Done);
    assert_eq!(item.comment(), Some("pedido fechado"));
    assert_eq!(reloaded.rows.len(), 2);

    // Known headers keep their spelling; the key column is appended
    let table = read_table(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["Representante", "Cliente", "Ação Sugerida", "Situação", "Comentário", "id"]
    );
    assert_eq!(table.rows[0].1[3], text("Concluído"));
    assert_eq!(table.rows[0].1[5], text(&item_id.to_string()));
}

#[tokio::test]
async fn test_action_save_keeps_unrelated_rows_and_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acoes.xlsx");
    sheet(
        &path,
        &["Representante", "Prioridade", "Cliente", "Ação", "Situação"],
        vec![
            vec![text("R1"), text("alta"), text("Loja Azul"), text("Ligar"), text("A Fazer")],
            vec![Cell::Empty, text("baixa"), text("Loja Sem Dono"), text("Visitar"), text("A Fazer")],
            vec![text("R2"), Cell::Number(3.0), text("Loja Verde"), text("Enviar catálogo"), text("Em Andamento")],
        ],
    );

    let repo = SpreadsheetActionItemRepository::new(&path);
    let (loaded, version) = repo.load().await.unwrap();
    // The row without a representative is not on the board
    assert_eq!(loaded.rows.len(), 2);

    let mut board = ActionBoard::new(loaded.rows, version);
    let item_id = board.items()[0].id();
    board
        .set_status(&rep("R1"), item_id, ActionStatus::InProgress)
        .unwrap();
    board.add_item(rep("R1"), "Loja Rosa", "Apresentar coleção").unwrap();
    let saved = repo.save_all(board.items(), board.version()).await.unwrap();
    board.mark_saved(saved);

    let table = read_table(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["Representante", "Prioridade", "Cliente", "Ação", "Situação", "id", "comment"]
    );
    assert_eq!(table.rows.len(), 4);

    let edited = &table.rows[0].1;
    assert_eq!(edited[1], text("alta"));
    assert_eq!(edited[4], text("Em andamento"));
    assert_eq!(edited[5], text(&item_id.to_string()));

    // Rows the board never held come back untouched
    let orphan = &table.rows[1].1;
    assert!(orphan[0].is_empty());
    assert_eq!(orphan[1], text("baixa"));
    assert_eq!(orphan[2], text("Loja Sem Dono"));

    let other = &table.rows[2].1;
    assert_eq!(other[1], Cell::Number(3.0));
    assert_eq!(other[4], text("Em andamento"));

    let added = &table.rows[3].1;
    assert_eq!(added[2], text("Loja Rosa"));
    assert!(added[1].is_empty());

    // Keys written by the save are the ones the board already used
    let (reloaded, version) = repo.load().await.unwrap();
    assert_eq!(&version, board.version());
    let ids: Vec<_> = reloaded.rows.iter().map(|item| item.id()).collect();
    let board_ids: Vec<_> = board.items().iter().map(|item| item.id()).collect();
    assert_eq!(ids, board_ids);
}

#[tokio::test]
async fn test_stale_save_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acoes.xlsx");
    sheet(
        &path,
        &["Representante", "Cliente", "Ação", "Situação"],
        vec![vec![text("R1"), text("Loja Azul"), text("Ligar"), text("A Fazer")]],
    );

    let repo = SpreadsheetActionItemRepository::new(&path);
    let (first, version) = repo.load().await.unwrap();
    let mut first = ActionBoard::new(first.rows, version);
    let (second, version) = repo.load().await.unwrap();
    let mut second = ActionBoard::new(second.rows, version);

    first
        .add_item(rep("R1"), "Loja Rosa", "Apresentar coleção")
        .unwrap();
    let saved = repo.save_all(first.items(), first.version()).await.unwrap();
    first.mark_saved(saved);

    let item_id = second.items()[0].id();
    second
        .set_status(&rep("R1"), item_id, ActionStatus::InProgress)
        .unwrap();
    let err = repo
        .save_all(second.items(), second.version())
        .await
        .unwrap_err();

    assert!(matches!(err, DiarioError::Conflict { .. }));
    let (reloaded, _) = repo.load().await.unwrap();
    assert_eq!(reloaded.rows.len(), 2);
}

#[tokio::test]
async fn test_actions_file_created_on_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acoes.xlsx");

    let repo = SpreadsheetActionItemRepository::new(&path);
    let (loaded, version) = repo.load().await.unwrap();
    assert!(loaded.rows.is_empty());

    let mut board = ActionBoard::new(loaded.rows, version);
    board.add_item(rep("R1"), "Loja Azul", "Ligar").unwrap();
    repo.save_all(board.items(), board.version()).await.unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["id", "representative_id", "client_name", "suggested_action", "status", "comment"]
    );
    assert_eq!(table.rows.len(), 1);
}
