use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use query_engine_execution::engine::QueryEngine;
use query_engine_execution::error::{Error, TransportError};
use query_engine_execution::transport::{Row, Transport};

/// A transport that answers data queries and count queries with canned rows,
/// recording every SQL string it is sent.
#[derive(Debug)]
struct StubTransport {
    data_rows: Vec<Row>,
    count_rows: Vec<Row>,
    fail_on_offset: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

impl StubTransport {
    fn new(data_rows: Vec<Row>, count: u64) -> (Self, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(vec![]));
        let stub = StubTransport {
            data_rows,
            count_rows: vec![row(json!({"numItems": count}))],
            fail_on_offset: false,
            sent: Arc::clone(&sent),
        };
        (stub, sent)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, sql: &str) -> Result<Vec<Row>, TransportError> {
        self.sent.lock().unwrap().push(sql.to_string());
        if self.fail_on_offset && sql.contains("OFFSET") {
            return Err(TransportError::Channel("connection lost".to_string()));
        }
        if sql.starts_with("SELECT COUNT(*)") {
            Ok(self.count_rows.clone())
        } else {
            Ok(self.data_rows.clone())
        }
    }
}

fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test rows must be objects"),
    }
}

fn rows(count: usize) -> Vec<Row> {
    (0..count).map(|i| row(json!({"id": i}))).collect()
}

#[tokio::test]
async fn build_executes_and_derives_totals() {
    let (stub, sent) = StubTransport::new(rows(100), 250);
    let engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100");
    assert_eq!(engine.page(), 1);
    assert_eq!(engine.pages(), 3);
    assert_eq!(engine.total_results(), 250);
    assert_eq!(engine.results().len(), 100);

    let sent = sent.lock().unwrap();
    assert_eq!(
        *sent,
        vec![
            "SELECT * FROM tracks LIMIT 100".to_string(),
            "SELECT COUNT(*) AS numItems FROM tracks LIMIT 100".to_string(),
        ]
    );
}

#[tokio::test]
async fn build_starts_on_the_requested_page() {
    let (stub, _) = StubTransport::new(rows(3), 21);
    let engine = QueryEngine::build(
        json!({"table": "tracks", "prefix": "", "page": 7, "itemsPerPage": 3}),
        Box::new(stub),
    )
    .await
    .unwrap();

    assert_eq!(engine.page(), 7);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 3 OFFSET 18");
}

#[tokio::test]
async fn build_rejects_a_spec_without_a_table() {
    let (stub, sent) = StubTransport::new(vec![], 0);
    let err = QueryEngine::build(json!({"page": 1}), Box::new(stub))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Spec(_)));
    // config errors happen before anything is sent
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn joins_restore_the_primary_id() {
    let data = vec![row(json!({
        "id": 900,
        "name": "blink-182",
        "_primaryTableRowId": 12
    }))];
    let (stub, _) = StubTransport::new(data, 1);
    let engine = QueryEngine::build(
        json!({
            "table": "tracks",
            "prefix": "",
            "join": {"table": "artists", "on": {"track_artist_id": "id"}}
        }),
        Box::new(stub),
    )
    .await
    .unwrap();

    let result = &engine.results()[0];
    assert_eq!(result["id"], json!(12));
    assert!(!result.contains_key("_primaryTableRowId"));
}

#[tokio::test]
async fn restored_rows_keep_their_column_order() {
    let data = vec![row(json!({
        "id": 900,
        "_primaryTableRowId": 12,
        "name": "blink-182",
        "album": "Dude Ranch"
    }))];
    let (stub, _) = StubTransport::new(data, 1);
    let engine = QueryEngine::build(
        json!({
            "table": "tracks",
            "prefix": "",
            "join": {"table": "artists", "on": {"track_artist_id": "id"}}
        }),
        Box::new(stub),
    )
    .await
    .unwrap();

    let result = &engine.results()[0];
    assert_eq!(result["id"], json!(12));
    assert_eq!(
        result.keys().collect::<Vec<_>>(),
        vec!["id", "name", "album"]
    );
}

#[tokio::test]
async fn go_to_page_rebuilds_and_reexecutes() {
    let (stub, sent) = StubTransport::new(rows(100), 250);
    let mut engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    engine.go_to_page(2).await.unwrap();
    assert_eq!(engine.page(), 2);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100 OFFSET 100");
    // totals are untouched by page navigation
    assert_eq!(engine.pages(), 3);
    assert_eq!(engine.total_results(), 250);
    assert_eq!(sent.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn go_to_page_is_a_noop_on_the_current_page() {
    let (stub, sent) = StubTransport::new(rows(100), 250);
    let mut engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    engine.go_to_page(1).await.unwrap();
    assert_eq!(sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn go_to_page_clamps_to_the_known_bounds() {
    let (stub, _) = StubTransport::new(rows(100), 250);
    let mut engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    engine.go_to_page(99).await.unwrap();
    assert_eq!(engine.page(), 3);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100 OFFSET 200");

    engine.go_to_page(-5).await.unwrap();
    assert_eq!(engine.page(), 1);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100");
}

#[tokio::test]
async fn a_failed_page_turn_leaves_state_intact() {
    let (mut stub, _) = StubTransport::new(rows(100), 250);
    stub.fail_on_offset = true;
    let mut engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    let err = engine.go_to_page(2).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(engine.page(), 1);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100");
    assert_eq!(engine.results().len(), 100);
}

#[tokio::test]
async fn unbounded_specs_have_a_single_page_and_no_count_query() {
    let (stub, sent) = StubTransport::new(rows(42), 0);
    let engine = QueryEngine::build(
        json!({"table": "tracks", "prefix": "", "itemsPerPage": -1}),
        Box::new(stub),
    )
    .await
    .unwrap();

    assert_eq!(engine.sql(), "SELECT * FROM tracks");
    assert_eq!(engine.pages(), 1);
    assert_eq!(engine.total_results(), 42);
    // no derived count query when every row is already in hand
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn zero_results_yield_zero_pages() {
    let (mut stub, _) = StubTransport::new(vec![], 0);
    stub.count_rows = vec![];
    let engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    assert_eq!(engine.total_results(), 0);
    assert_eq!(engine.pages(), 0);
}

#[tokio::test]
async fn navigating_with_zero_pages_lands_on_page_zero() {
    let (mut stub, _) = StubTransport::new(vec![], 0);
    stub.count_rows = vec![];
    let mut engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();
    assert_eq!(engine.pages(), 0);

    // the upper clamp runs after the lower one, so with no known pages a
    // navigation request degenerates to page 0 and a negative offset
    engine.go_to_page(2).await.unwrap();
    assert_eq!(engine.page(), 0);
    assert_eq!(engine.sql(), "SELECT * FROM tracks LIMIT 100 OFFSET -100");
}

#[tokio::test]
async fn count_scalars_may_arrive_as_strings() {
    let (mut stub, _) = StubTransport::new(rows(42), 0);
    stub.count_rows = vec![row(json!({"numItems": "42"}))];
    let engine = QueryEngine::build(json!({"table": "tracks", "prefix": ""}), Box::new(stub))
        .await
        .unwrap();

    assert_eq!(engine.total_results(), 42);
    assert_eq!(engine.pages(), 1);
}
