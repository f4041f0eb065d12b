//! The query spec data model: the caller-shaped raw spec and the normalized
//! form the rest of the pipeline consumes.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::translation::error::Error;

/// Default table name prefix.
pub const DEFAULT_PREFIX: &str = "server_";

/// Default page size. `-1` means unbounded, which puts all results on page 1.
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 100;

/// The canonical, normalized description of one query.
///
/// Built once from defaults merged with caller input (caller values win),
/// singular shorthands wrapped into list form, and joins validated. Nothing
/// downstream branches on input shape again.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Primary table name, without the prefix.
    pub table: String,
    /// Prefix applied to every table name in every part of the query.
    pub prefix: String,
    pub columns: Vec<ColumnGroup>,
    /// Operator joining column predicates, within and across groups.
    pub column_compare: ColumnCompare,
    /// Default per-column operator; a group may override it.
    pub equality_operator: EqualityOperator,
    pub order_by: OrderSpec,
    pub joins: Vec<JoinSpec>,
    /// `-1` means no limit per page.
    pub items_per_page: i64,
    /// 1-based.
    pub page: i64,
}

/// One group of `column: value` filters, with an optional operator override
/// consumed out of the group during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub equality_operator: Option<EqualityOperator>,
    pub filters: IndexMap<String, FilterValue>,
}

/// A normalized table join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    /// Table name to join, without the prefix.
    pub table: String,
    /// `primary column -> foreign column` pairs, in insertion order.
    pub on: IndexMap<String, String>,
    pub equality_operator: EqualityOperator,
    pub join_type: JoinType,
}

/// Normalized ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSpec {
    Unordered,
    Random,
    Columns(Vec<(String, SortDirection)>),
}

/// A filter value: a string, a number, or a literal set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Number(serde_json::Number),
    List(Vec<ScalarValue>),
}

/// An element of a literal set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    String(String),
    Number(serde_json::Number),
}

/// Operator used when querying for multiple columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ColumnCompare {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Operator used when checking the value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EqualityOperator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
}

impl std::str::FromStr for EqualityOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "=" => Ok(EqualityOperator::Equals),
            "LIKE" => Ok(EqualityOperator::Like),
            "IN" => Ok(EqualityOperator::In),
            "NOT IN" => Ok(EqualityOperator::NotIn),
            other => Err(Error::UnknownEqualityOperator(other.to_string())),
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum JoinType {
    #[serde(rename = "LEFT JOIN")]
    LeftJoin,
    #[serde(rename = "INNER JOIN")]
    InnerJoin,
    #[serde(rename = "CROSS JOIN")]
    CrossJoin,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// The caller-shaped spec, before defaults and shorthand normalization.
/// Everything is optional here; validation happens in [`QuerySpec::from_raw`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuerySpec {
    pub table: Option<String>,
    pub prefix: Option<String>,
    pub columns: Option<OneOrMany<IndexMap<String, FilterValue>>>,
    pub column_compare: Option<ColumnCompare>,
    pub equality_operator: Option<EqualityOperator>,
    pub order_by: Option<OrderByInput>,
    pub join: Option<OneOrMany<RawJoin>>,
    pub items_per_page: Option<i64>,
    pub page: Option<i64>,
}

/// A caller-shaped join.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJoin {
    pub table: Option<String>,
    pub on: Option<IndexMap<String, String>>,
    pub equality_operator: Option<EqualityOperator>,
    #[serde(rename = "type")]
    pub join_type: Option<JoinType>,
}

/// `orderBy` accepts the literal `"rand"`, an object of `column: direction`
/// pairs, or a list of such objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderByInput {
    Keyword(String),
    Columns(IndexMap<String, SortDirection>),
    ColumnList(Vec<IndexMap<String, SortDirection>>),
}

/// A single value or a list of values; used to accept the singular shorthand
/// for `join` and `columns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl QuerySpec {
    /// Normalize a JSON value into a spec. Fails fast on anything that is
    /// not an object.
    pub fn from_value(value: serde_json::Value) -> Result<QuerySpec, Error> {
        if !value.is_object() {
            return Err(Error::SpecNotAnObject);
        }
        let raw: RawQuerySpec = serde_json::from_value(value)?;
        QuerySpec::from_raw(raw)
    }

    /// Merge a raw spec over the defaults and validate it.
    pub fn from_raw(raw: RawQuerySpec) -> Result<QuerySpec, Error> {
        let table = raw.table.ok_or(Error::MissingTable)?;

        let items_per_page = raw.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);
        if items_per_page != -1 && items_per_page < 1 {
            return Err(Error::InvalidItemsPerPage(items_per_page));
        }

        let columns = raw
            .columns
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(normalize_column_group)
            .collect::<Result<Vec<ColumnGroup>, Error>>()?;

        let joins = raw
            .join
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(normalize_join)
            .collect::<Result<Vec<JoinSpec>, Error>>()?;

        Ok(QuerySpec {
            table,
            prefix: raw.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            columns,
            column_compare: raw.column_compare.unwrap_or(ColumnCompare::And),
            equality_operator: raw.equality_operator.unwrap_or(EqualityOperator::Equals),
            order_by: normalize_order_by(raw.order_by),
            joins,
            items_per_page,
            page: raw.page.unwrap_or(1).max(1),
        })
    }
}

/// Pull the `equalityOperator` key out of a column group. It is metadata,
/// not a column, and must not survive into value iteration.
fn normalize_column_group(
    mut filters: IndexMap<String, FilterValue>,
) -> Result<ColumnGroup, Error> {
    let equality_operator = match filters.shift_remove("equalityOperator") {
        None => None,
        Some(FilterValue::String(op)) => Some(op.parse()?),
        Some(_) => return Err(Error::GroupOperatorNotAString),
    };
    Ok(ColumnGroup {
        equality_operator,
        filters,
    })
}

fn normalize_join(raw: RawJoin) -> Result<JoinSpec, Error> {
    let table = raw.table.ok_or(Error::JoinMissingTable)?;
    let on = raw.on.filter(|on| !on.is_empty()).ok_or(Error::JoinMissingOn)?;
    Ok(JoinSpec {
        table,
        on,
        equality_operator: raw.equality_operator.unwrap_or(EqualityOperator::Equals),
        join_type: raw.join_type.unwrap_or(JoinType::LeftJoin),
    })
}

fn normalize_order_by(order_by: Option<OrderByInput>) -> OrderSpec {
    match order_by {
        None => OrderSpec::Unordered,
        Some(OrderByInput::Keyword(keyword)) => {
            if keyword == "rand" {
                OrderSpec::Random
            } else {
                // any other bare string orders nothing
                OrderSpec::Unordered
            }
        }
        Some(OrderByInput::Columns(columns)) => collect_order_columns(vec![columns]),
        Some(OrderByInput::ColumnList(list)) => collect_order_columns(list),
    }
}

fn collect_order_columns(list: Vec<IndexMap<String, SortDirection>>) -> OrderSpec {
    let columns: Vec<(String, SortDirection)> = list
        .into_iter()
        .flat_map(IndexMap::into_iter)
        .collect();
    if columns.is_empty() {
        OrderSpec::Unordered
    } else {
        OrderSpec::Columns(columns)
    }
}
