//! Translate a normalized query spec into a SQL AST.

use query_engine_sql::sql::ast;
use query_engine_sql::sql::helpers;

use crate::translation::spec::{
    ColumnCompare, EqualityOperator, FilterValue, JoinSpec, JoinType, OrderSpec, QuerySpec,
    ScalarValue, SortDirection,
};

/// Translate a spec to a SELECT. Normalization has already validated the
/// spec, so translation itself cannot fail.
pub fn translate(spec: &QuerySpec) -> ast::Select {
    let primary_table = prefixed_table(spec, &spec.table);

    let select_list = if spec.joins.is_empty() {
        ast::SelectList::SelectStar
    } else {
        // carry the primary id under its reserved alias across the join
        ast::SelectList::SelectStarWithPrimaryId {
            table: primary_table.clone(),
            alias: ast::ColumnAlias(helpers::PRIMARY_ID_ALIAS.to_string()),
        }
    };

    let select = ast::Select {
        select_list,
        joins: spec
            .joins
            .iter()
            .map(|join| translate_join(spec, &primary_table, join))
            .collect(),
        from: ast::From {
            table: primary_table,
        },
        where_: translate_where(spec),
        order_by: translate_order_by(&spec.order_by),
        limit: translate_limit(spec),
    };

    tracing::info!("SQL AST: {:?}", select);

    select
}

fn prefixed_table(spec: &QuerySpec, table: &str) -> ast::TableName {
    ast::TableName(format!("{}{}", spec.prefix, table))
}

fn translate_join(
    spec: &QuerySpec,
    primary_table: &ast::TableName,
    join: &JoinSpec,
) -> ast::Join {
    let joined_table = prefixed_table(spec, &join.table);
    ast::Join {
        join_type: translate_join_type(join.join_type),
        on: join
            .on
            .iter()
            .map(|(primary_column, foreign_column)| ast::JoinOn {
                left: ast::QualifiedColumn {
                    table: primary_table.clone(),
                    column: ast::ColumnName(primary_column.clone()),
                },
                operator: translate_operator(join.equality_operator),
                right: ast::QualifiedColumn {
                    table: joined_table.clone(),
                    column: ast::ColumnName(foreign_column.clone()),
                },
            })
            .collect(),
        table: joined_table,
    }
}

fn translate_where(spec: &QuerySpec) -> ast::Where {
    let mut predicates = vec![];
    for group in &spec.columns {
        let operator = group.equality_operator.unwrap_or(spec.equality_operator);
        for (column, value) in &group.filters {
            // a column name containing a period is already table-qualified;
            // it only needs the prefix, not the primary table name
            let column = if column.contains('.') {
                format!("{}{}", spec.prefix, column)
            } else {
                column.clone()
            };
            predicates.push(ast::Predicate {
                column: ast::ColumnName(column),
                operator: translate_operator(operator),
                value: translate_value(value),
            });
        }
    }
    ast::Where {
        compare: match spec.column_compare {
            ColumnCompare::And => ast::ColumnCompare::And,
            ColumnCompare::Or => ast::ColumnCompare::Or,
        },
        predicates,
    }
}

fn translate_value(value: &FilterValue) -> ast::Value {
    match value {
        FilterValue::String(s) => ast::Value::String(s.clone()),
        FilterValue::Number(n) => ast::Value::Number(n.clone()),
        FilterValue::List(items) => ast::Value::List(
            items
                .iter()
                .map(|item| match item {
                    ScalarValue::String(s) => ast::ScalarValue::String(s.clone()),
                    ScalarValue::Number(n) => ast::ScalarValue::Number(n.clone()),
                })
                .collect(),
        ),
    }
}

fn translate_order_by(order_by: &OrderSpec) -> ast::OrderBy {
    match order_by {
        OrderSpec::Unordered => ast::OrderBy::None,
        OrderSpec::Random => ast::OrderBy::Random,
        OrderSpec::Columns(columns) => ast::OrderBy::Columns(
            columns
                .iter()
                .map(|(column, direction)| ast::OrderByElement {
                    column: ast::ColumnName(column.clone()),
                    direction: match direction {
                        SortDirection::Asc => ast::OrderByDirection::Asc,
                        SortDirection::Desc => ast::OrderByDirection::Desc,
                    },
                })
                .collect(),
        ),
    }
}

fn translate_limit(spec: &QuerySpec) -> ast::Limit {
    if spec.items_per_page == -1 {
        return helpers::empty_limit();
    }
    ast::Limit {
        limit: Some(spec.items_per_page),
        offset: if spec.page == 1 {
            None
        } else {
            Some(calculate_offset(spec))
        },
    }
}

/// `(page * itemsPerPage) - itemsPerPage`, i.e. rows on all previous pages.
/// Saturates so an absurdly large page number cannot overflow.
fn calculate_offset(spec: &QuerySpec) -> i64 {
    spec.page
        .saturating_mul(spec.items_per_page)
        .saturating_sub(spec.items_per_page)
}

fn translate_join_type(join_type: JoinType) -> ast::JoinType {
    match join_type {
        JoinType::LeftJoin => ast::JoinType::LeftJoin,
        JoinType::InnerJoin => ast::JoinType::InnerJoin,
        JoinType::CrossJoin => ast::JoinType::CrossJoin,
    }
}

fn translate_operator(operator: EqualityOperator) -> ast::EqualityOperator {
    match operator {
        EqualityOperator::Equals => ast::EqualityOperator::Equals,
        EqualityOperator::Like => ast::EqualityOperator::Like,
        EqualityOperator::In => ast::EqualityOperator::In,
        EqualityOperator::NotIn => ast::EqualityOperator::NotIn,
    }
}
