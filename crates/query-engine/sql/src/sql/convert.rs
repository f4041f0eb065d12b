//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::string::SQL;

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("SELECT ");

        self.select_list.to_sql(sql);

        sql.append_syntax(" ");

        self.from.to_sql(sql);

        for join in &self.joins {
            join.to_sql(sql);
        }

        self.where_.to_sql(sql);

        self.order_by.to_sql(sql);

        self.limit.to_sql(sql);
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            SelectList::SelectStar => {
                sql.append_syntax("*");
            }
            SelectList::SelectStarWithPrimaryId { table, alias } => {
                table.to_sql(sql);
                sql.append_syntax(".id AS ");
                alias.to_sql(sql);
                sql.append_syntax(", *");
            }
            SelectList::SelectCountStar(alias) => {
                sql.append_syntax("COUNT(*) AS ");
                alias.to_sql(sql);
            }
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("FROM ");
        self.table.to_sql(sql);
    }
}

impl Join {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" ");
        self.join_type.to_sql(sql);
        sql.append_syntax(" ");
        self.table.to_sql(sql);
        for on in &self.on {
            sql.append_syntax(" ON ");
            on.left.to_sql(sql);
            on.operator.to_sql(sql);
            on.right.to_sql(sql);
        }
    }
}

impl JoinType {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            JoinType::LeftJoin => sql.append_syntax("LEFT JOIN"),
            JoinType::InnerJoin => sql.append_syntax("INNER JOIN"),
            JoinType::CrossJoin => sql.append_syntax("CROSS JOIN"),
        }
    }
}

impl QualifiedColumn {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.table.to_sql(sql);
        sql.append_syntax(".");
        self.column.to_sql(sql);
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        if self.predicates.is_empty() {
            return;
        }
        sql.append_syntax(" WHERE ");
        for (index, predicate) in self.predicates.iter().enumerate() {
            predicate.to_sql(sql);
            if index < (self.predicates.len() - 1) {
                self.compare.to_sql(sql);
            }
        }
    }
}

impl ColumnCompare {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ColumnCompare::And => sql.append_syntax(" AND "),
            ColumnCompare::Or => sql.append_syntax(" OR "),
        }
    }
}

impl Predicate {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.column.to_sql(sql);
        self.operator.to_sql(sql);
        self.value.to_sql(sql);
    }
}

impl EqualityOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            EqualityOperator::Equals => sql.append_syntax(" = "),
            EqualityOperator::Like => sql.append_syntax(" LIKE "),
            EqualityOperator::In => sql.append_syntax(" IN "),
            EqualityOperator::NotIn => sql.append_syntax(" NOT IN "),
        }
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Value::String(s) => sql.append_string_literal(s),
            Value::Number(n) => sql.append_syntax(&n.to_string()),
            Value::List(items) => {
                sql.append_syntax("(");
                for (index, item) in items.iter().enumerate() {
                    item.to_sql(sql);
                    if index < (items.len() - 1) {
                        sql.append_syntax(",");
                    }
                }
                sql.append_syntax(")");
            }
        }
    }
}

impl ScalarValue {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ScalarValue::String(s) => sql.append_set_string_literal(s),
            ScalarValue::Number(n) => sql.append_syntax(&n.to_string()),
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderBy::None => {}
            OrderBy::Random => sql.append_syntax(" ORDER BY RANDOM()"),
            OrderBy::Columns(elements) => {
                if elements.is_empty() {
                    return;
                }
                sql.append_syntax(" ORDER BY ");
                for (index, element) in elements.iter().enumerate() {
                    element.to_sql(sql);
                    if index < (elements.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.column.to_sql(sql);
        sql.append_syntax(" COLLATE NOCASE ");
        self.direction.to_sql(sql);
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => sql.append_syntax("ASC"),
            OrderByDirection::Desc => sql.append_syntax("DESC"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(limit) = self.limit {
            sql.append_syntax(" LIMIT ");
            sql.append_syntax(&limit.to_string());
        }
        if let Some(offset) = self.offset {
            sql.append_syntax(" OFFSET ");
            sql.append_syntax(&offset.to_string());
        }
    }
}

impl TableName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}
