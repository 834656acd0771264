use oficina_cli::commands::{insight, load_snapshot, render_insight};
use oficina_cli::{build_cli, run, AppConfig};
use oficina_dashboard::InsightView;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn orders_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn insight_without_credential_renders_demo_mode() {
    let snapshot = load_snapshot(None).unwrap();

    let view = insight(&AppConfig::default(), &snapshot).await;

    assert_eq!(view, InsightView::Offline);
    assert!(render_insight(&view, false).unwrap().starts_with("[modo demo]"));
}

#[test]
fn orders_file_is_loaded() {
    let file = orders_file(
        r#"[{"id": 9, "valor": 150, "status": "fechada", "dataAbertura": "2024-05-01", "dataFechamento": "2024-05-02"}]"#,
    );

    let snapshot = load_snapshot(Some(file.path())).unwrap();

    assert_eq!(snapshot.orders.len(), 1);
    assert_eq!(snapshot.metrics.closed, 1);
    assert_eq!(snapshot.metrics.average_ticket, 150.0);
}

#[test]
fn malformed_orders_file_is_reported() {
    let file = orders_file("{not json");

    let err = load_snapshot(Some(file.path())).unwrap_err();

    assert!(format!("{err:#}").contains("invalid order data"));
}

#[test]
fn temporary_orders_file_is_removed_on_drop() {
    let file = orders_file("[]");
    let path = file.path().to_path_buf();
    assert!(load_snapshot(Some(&path)).unwrap().orders.is_empty());

    drop(file);

    assert!(!path.exists());
}

#[tokio::test]
async fn missing_config_file_fails_run() {
    let matches = build_cli()
        .try_get_matches_from(["oficina", "config", "--config", "/nonexistent/oficina.toml"])
        .unwrap();

    let err = run(&matches).await.unwrap_err();

    assert!(err.to_string().contains("failed to read config file"));
}

#[tokio::test]
async fn empty_order_list_has_nothing_to_analyze() {
    let file = orders_file("[]");
    let snapshot = load_snapshot(Some(file.path())).unwrap();

    let view = insight(&AppConfig::default(), &snapshot).await;

    assert_eq!(view, InsightView::Empty);
}
