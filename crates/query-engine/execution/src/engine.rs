//! The query engine: owns one spec, its generated SQL, the latest results,
//! and the pagination totals derived from the count query.

use query_engine_sql::sql::helpers;
use query_engine_translation::translation::query;
use query_engine_translation::translation::spec::QuerySpec;

use crate::error::Error;
use crate::transport::{Row, Transport};

/// A stateful query over one spec, paged through an injected transport.
///
/// One engine instance is a single logical thread of control: operations
/// suspend only at the transport boundary and callers must serialize calls
/// on the same instance.
#[derive(Debug)]
pub struct QueryEngine {
    spec: QuerySpec,
    transport: Box<dyn Transport>,
    sql: String,
    results: Vec<Row>,
    page: i64,
    pages: u64,
    total_results: u64,
}

impl QueryEngine {
    /// Build an engine from a JSON-shaped spec: normalize it, run the query,
    /// and derive the totals. This is the only constructor; it performs the
    /// initial execution, so it is async and fallible by design.
    pub async fn build(
        spec: serde_json::Value,
        transport: Box<dyn Transport>,
    ) -> Result<QueryEngine, Error> {
        let spec = QuerySpec::from_value(spec)?;
        QueryEngine::from_spec(spec, transport).await
    }

    /// Build an engine from an already-normalized spec.
    pub async fn from_spec(
        spec: QuerySpec,
        transport: Box<dyn Transport>,
    ) -> Result<QueryEngine, Error> {
        let sql = render_sql(&spec);

        tracing::info!(generated_sql = %sql, "executing query");
        let rows = transport.send(&sql).await?;
        let results = restore_primary_ids(&spec, rows);

        let mut engine = QueryEngine {
            page: spec.page,
            spec,
            transport,
            sql,
            results,
            pages: 0,
            total_results: 0,
        };
        engine.calculate_totals().await?;
        Ok(engine)
    }

    /// Switch pages: rebuild the SQL for the new page, execute it, and
    /// replace the results.
    ///
    /// The page is clamped into `1..=pages` against the last known totals;
    /// totals are **not** recomputed here, so they go stale until
    /// [`QueryEngine::calculate_totals`] is invoked again. That saves a
    /// count query per page turn.
    ///
    /// A transport failure propagates without touching any engine state.
    pub async fn go_to_page(&mut self, page: i64) -> Result<(), Error> {
        if page == self.page {
            return Ok(());
        }

        let mut page = page;
        if page < 1 {
            page = 1;
        }
        if page > self.pages_as_i64() {
            page = self.pages_as_i64();
        }

        let mut next_spec = self.spec.clone();
        next_spec.page = page;
        let sql = render_sql(&next_spec);

        tracing::info!(generated_sql = %sql, "executing query");
        let rows = self.transport.send(&sql).await?;

        self.results = restore_primary_ids(&next_spec, rows);
        self.spec = next_spec;
        self.sql = sql;
        self.page = page;
        Ok(())
    }

    /// Run the derived count query and recompute `pages` / `total_results`.
    ///
    /// With `itemsPerPage == -1` every row is already in hand, so there is a
    /// single page and no extra query. Zero results yield zero pages; that
    /// degenerate value is intentional.
    pub async fn calculate_totals(&mut self) -> Result<(), Error> {
        if self.spec.items_per_page == -1 {
            self.pages = 1;
            self.total_results = self.results.len() as u64;
            return Ok(());
        }

        let count_select = helpers::count_variant(&query::translate(&self.spec));
        let count_sql = helpers::select_to_sql(&count_select).sql;

        tracing::info!(generated_sql = %count_sql, "executing count query");
        let rows = self.transport.send(&count_sql).await?;

        let total = rows
            .first()
            .and_then(|row| row.get(helpers::COUNT_ALIAS))
            .map_or(0, count_scalar);
        self.total_results = total;
        self.pages = total.div_ceil(self.spec.items_per_page as u64);
        Ok(())
    }

    /// The generated SQL text for the current page.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The latest result rows, replaced wholesale on each execution.
    pub fn results(&self) -> &[Row] {
        &self.results
    }

    /// The current 1-based page.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Total pages, as of the last totals calculation.
    pub fn pages(&self) -> u64 {
        self.pages
    }

    /// Total matching rows, as of the last totals calculation.
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// The normalized spec this engine owns.
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    fn pages_as_i64(&self) -> i64 {
        i64::try_from(self.pages).unwrap_or(i64::MAX)
    }
}

fn render_sql(spec: &QuerySpec) -> String {
    helpers::select_to_sql(&query::translate(spec)).sql
}

/// When joining, the joined table's columns can overwrite same-named primary
/// columns in the row. Every table keys its primary key as `id`, so restore
/// the primary row's `id` from the reserved alias and drop the alias key.
fn restore_primary_ids(spec: &QuerySpec, mut rows: Vec<Row>) -> Vec<Row> {
    if spec.joins.is_empty() {
        return rows;
    }
    for row in &mut rows {
        // shift_remove keeps the remaining columns in their original order
        if let Some(id) = row.shift_remove(helpers::PRIMARY_ID_ALIAS) {
            row.insert("id".to_string(), id);
        }
    }
    rows
}

/// Read the count query's scalar; it may arrive as a number or a numeric
/// string depending on the channel.
fn count_scalar(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}
