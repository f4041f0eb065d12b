//! Type definitions of a SQL AST representation.

/// A SELECT statement. Clauses are rendered in the order they are declared
/// here: SELECT, FROM, JOIN (zero or more), WHERE, ORDER BY, LIMIT, OFFSET.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub select_list: SelectList,
    pub from: From,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// A select list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    /// `*`
    SelectStar,
    /// `<table>.id AS <alias>, *`
    ///
    /// Used when joining. Column name collisions between the primary and the
    /// joined table would otherwise overwrite the primary row's `id`, so the
    /// primary id is carried under a reserved alias and restored after
    /// execution.
    SelectStarWithPrimaryId {
        table: TableName,
        alias: ColumnAlias,
    },
    /// `COUNT(*) AS <alias>` — the projection of a derived count query.
    SelectCountStar(ColumnAlias),
}

/// A FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub struct From {
    pub table: TableName,
}

/// A JOIN clause. One JOIN may carry several ON conditions; the target
/// database ANDs them together under its multi-ON syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: TableName,
    pub on: Vec<JoinOn>,
}

/// The supported join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    LeftJoin,
    InnerJoin,
    CrossJoin,
}

/// A single ON condition comparing a primary table column to a joined table
/// column.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOn {
    pub left: QualifiedColumn,
    pub operator: EqualityOperator,
    pub right: QualifiedColumn,
}

/// A column qualified with its table name.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedColumn {
    pub table: TableName,
    pub column: ColumnName,
}

/// A WHERE clause: a flat list of predicates joined by a single comparison
/// operator, including across what were separate column groups in the spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub compare: ColumnCompare,
    pub predicates: Vec<Predicate>,
}

/// The operator placed between WHERE predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCompare {
    And,
    Or,
}

/// A single `<column> <operator> <value>` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: ColumnName,
    pub operator: EqualityOperator,
    pub value: Value,
}

/// The operator comparing a column against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOperator {
    Equals,
    Like,
    In,
    NotIn,
}

/// A value interpolated into the SQL text.
///
/// Values are rendered as raw literals, not bound parameters. That is a
/// deliberate property of this engine carried into the output format.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single-quoted string literal.
    String(String),
    /// A bare numeric literal.
    Number(serde_json::Number),
    /// A parenthesized literal set, for `IN` / `NOT IN`.
    List(Vec<ScalarValue>),
}

/// An element of a literal set. Strings are double-quoted inside the set.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    Number(serde_json::Number),
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBy {
    None,
    /// `ORDER BY RANDOM()`
    Random,
    /// Ordering is always case insensitive, otherwise sqlite separates
    /// lowercase and uppercase, putting 'blink-182' after 'Z'.
    Columns(Vec<OrderByElement>),
}

/// A single element in an ORDER BY clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub column: ColumnName,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// LIMIT and OFFSET clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A database table name, already carrying any configured prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(pub String);

/// A database table's column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub String);

/// An alias we give to a synthetic column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAlias(pub String);
