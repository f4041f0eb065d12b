//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;
use super::string::SQL;

/// The reserved alias that carries the primary table's `id` across a join.
pub const PRIMARY_ID_ALIAS: &str = "_primaryTableRowId";

/// The column alias the derived count query projects its scalar under.
pub const COUNT_ALIAS: &str = "numItems";

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where {
        compare: ColumnCompare::And,
        predicates: vec![],
    }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy::None
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// Build a `SELECT * FROM <table>` with all other clauses empty.
pub fn star_select(table: TableName) -> Select {
    Select {
        select_list: SelectList::SelectStar,
        from: From { table },
        joins: vec![],
        where_: empty_where(),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Derive the count variant of a select: the projection becomes
/// `COUNT(*) AS numItems` and the OFFSET is dropped so the count spans the
/// whole filtered set rather than one page. The LIMIT is kept; an aggregate
/// over the whole set returns a single row regardless.
pub fn count_variant(select: &Select) -> Select {
    let mut count = select.clone();
    count.select_list = SelectList::SelectCountStar(ColumnAlias(COUNT_ALIAS.to_string()));
    count.limit.offset = None;
    count
}

/// Render a select to its SQL string.
pub fn select_to_sql(select: &Select) -> SQL {
    let mut sql = SQL::new();
    select.to_sql(&mut sql);
    sql
}
