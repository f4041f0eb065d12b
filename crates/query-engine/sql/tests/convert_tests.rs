use query_engine_sql::sql::ast::*;
use query_engine_sql::sql::helpers;

fn table(name: &str) -> TableName {
    TableName(name.to_string())
}

fn column(name: &str) -> ColumnName {
    ColumnName(name.to_string())
}

#[test]
fn it_converts_a_star_select() {
    let select = helpers::star_select(table("some_table"));
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table"
    );
}

#[test]
fn it_converts_limit_and_offset() {
    let mut select = helpers::star_select(table("some_table"));
    select.limit = Limit {
        limit: Some(3),
        offset: Some(18),
    };
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table LIMIT 3 OFFSET 18"
    );
}

#[test]
fn it_joins_predicates_with_the_compare_operator() {
    let mut select = helpers::star_select(table("some_table"));
    select.where_ = Where {
        compare: ColumnCompare::Or,
        predicates: vec![
            Predicate {
                column: column("name"),
                operator: EqualityOperator::Equals,
                value: Value::String("blink-182".to_string()),
            },
            Predicate {
                column: column("plays"),
                operator: EqualityOperator::Equals,
                value: Value::Number(5.into()),
            },
        ],
    };
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table WHERE name = 'blink-182' OR plays = 5"
    );
}

#[test]
fn it_renders_literal_sets_in_input_order() {
    let mut select = helpers::star_select(table("some_table"));
    select.where_ = Where {
        compare: ColumnCompare::And,
        predicates: vec![Predicate {
            column: column("artist"),
            operator: EqualityOperator::In,
            value: Value::List(vec![
                ScalarValue::String("item b".to_string()),
                ScalarValue::String("item a".to_string()),
                ScalarValue::Number(3.into()),
            ]),
        }],
    };
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table WHERE artist IN (\"item b\",\"item a\",3)"
    );
}

#[test]
fn it_converts_a_join_with_multiple_on_conditions() {
    let mut select = helpers::star_select(table("some_table"));
    select.select_list = SelectList::SelectStarWithPrimaryId {
        table: table("some_table"),
        alias: ColumnAlias(helpers::PRIMARY_ID_ALIAS.to_string()),
    };
    select.joins = vec![Join {
        join_type: JoinType::LeftJoin,
        table: table("artists"),
        on: vec![
            JoinOn {
                left: QualifiedColumn {
                    table: table("some_table"),
                    column: column("track_artist_id"),
                },
                operator: EqualityOperator::Equals,
                right: QualifiedColumn {
                    table: table("artists"),
                    column: column("id"),
                },
            },
            JoinOn {
                left: QualifiedColumn {
                    table: table("some_table"),
                    column: column("release_id"),
                },
                operator: EqualityOperator::Equals,
                right: QualifiedColumn {
                    table: table("artists"),
                    column: column("release_id"),
                },
            },
        ],
    }];
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT some_table.id AS _primaryTableRowId, * FROM some_table \
         LEFT JOIN artists \
         ON some_table.track_artist_id = artists.id \
         ON some_table.release_id = artists.release_id"
    );
}

#[test]
fn it_orders_case_insensitively() {
    let mut select = helpers::star_select(table("some_table"));
    select.order_by = OrderBy::Columns(vec![
        OrderByElement {
            column: column("name"),
            direction: OrderByDirection::Asc,
        },
        OrderByElement {
            column: column("date"),
            direction: OrderByDirection::Desc,
        },
    ]);
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table ORDER BY name COLLATE NOCASE ASC, date COLLATE NOCASE DESC"
    );
}

#[test]
fn it_converts_random_order() {
    let mut select = helpers::star_select(table("some_table"));
    select.order_by = OrderBy::Random;
    assert_eq!(
        helpers::select_to_sql(&select).sql,
        "SELECT * FROM some_table ORDER BY RANDOM()"
    );
}

#[test]
fn count_variant_replaces_projection_and_drops_offset() {
    let mut select = helpers::star_select(table("some_table"));
    select.limit = Limit {
        limit: Some(100),
        offset: Some(600),
    };
    let count = helpers::count_variant(&select);
    assert_eq!(
        helpers::select_to_sql(&count).sql,
        "SELECT COUNT(*) AS numItems FROM some_table LIMIT 100"
    );
    // the original select is untouched
    assert_eq!(select.limit.offset, Some(600));
}
