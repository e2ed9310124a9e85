use intent_sql::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn t() -> Value {
    Value::from("T")
}

fn assert_translates(query: Query, sql: &str, params: Vec<Value>) {
    let translator = Translator::from_query(&query);
    assert_eq!(translator.statement(), sql);
    assert_eq!(translator.bound_parameters(), params.as_slice());
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn rejects_null_document() {
    assert!(matches!(
        Translator::from_document(serde_json::Value::Null),
        Err(TranslateError::InvalidArgument(_))
    ));
    assert!(matches!(
        Translator::from_json("null"),
        Err(TranslateError::InvalidArgument(_))
    ));
}

#[test]
fn rejects_non_intent_values() {
    for doc in [json!("2016-01-01"), json!(42), json!(true), json!([]), json!({})] {
        assert!(
            matches!(
                Translator::from_document(doc.clone()),
                Err(TranslateError::InvalidArgument(_))
            ),
            "accepted {doc}"
        );
    }
}

#[test]
fn rejects_unknown_action() {
    assert!(matches!(
        Translator::from_document(json!({ "model": "T", "action": "truncate" })),
        Err(TranslateError::UnsupportedAction(a)) if a == "truncate"
    ));
    assert!(matches!(
        Translator::from_syntax("truncate::T"),
        Err(TranslateError::UnsupportedAction(_))
    ));
}

// ========================================================================
// Find / FindOne
// ========================================================================

#[test]
fn find_without_modifiers() {
    assert_translates(Query::new("T").find_all(), "SELECT * FROM ??", vec![t()]);
}

#[test]
fn find_one_empty() {
    assert_translates(
        Query::new("T").find_one(fields! {}),
        "SELECT * FROM ?? LIMIT 0, ?",
        vec![t(), Value::Int(1)],
    );
}

#[test]
fn find_one_with_criteria() {
    assert_translates(
        Query::new("T").find_one(fields! { "name" => "test" }),
        "SELECT * FROM ?? WHERE ? LIMIT 0, ?",
        vec![t(), Value::entry("name", "test"), Value::Int(1)],
    );
}

#[test]
fn find_one_with_criteria_and_offset() {
    assert_translates(
        Query::new("T").find_one(fields! { "name" => "test" }).offset(10),
        "SELECT * FROM ?? WHERE ? LIMIT ?, ?",
        vec![t(), Value::entry("name", "test"), Value::Int(10), Value::Int(1)],
    );
}

#[test]
fn find_with_single_criterion() {
    assert_translates(
        Query::new("T").find(fields! { "name" => "x" }),
        "SELECT * FROM ?? WHERE ?",
        vec![t(), Value::entry("name", "x")],
    );
}

#[test]
fn find_with_multiple_criteria_keeps_insertion_order() {
    assert_translates(
        Query::new("T").find(fields! {
            "lastname" => "j",
            "firstname" => "d",
            "age" => 42,
        }),
        "SELECT * FROM ?? WHERE ? AND ? AND ?",
        vec![
            t(),
            Value::entry("lastname", "j"),
            Value::entry("firstname", "d"),
            Value::entry("age", 42),
        ],
    );
}

#[test]
fn find_sort_desc_and_asc() {
    assert_translates(
        Query::new("T").find_all().sort("age", -1),
        "SELECT * FROM ?? ORDER BY ?? DESC",
        vec![t(), Value::from("age")],
    );
    assert_translates(
        Query::new("T").find_all().sort("age", 1),
        "SELECT * FROM ?? ORDER BY ?? ASC",
        vec![t(), Value::from("age")],
    );
}

#[test]
fn find_sort_mixed_directions() {
    assert_translates(
        Query::new("T").find_all().sort("a", 1).sort("b", -1),
        "SELECT * FROM ?? ORDER BY ?? ASC, ?? DESC",
        vec![t(), Value::from("a"), Value::from("b")],
    );
    assert_translates(
        Query::new("T")
            .find_all()
            .sort("firstname", 1)
            .sort("lastname", 1)
            .sort("age", -1),
        "SELECT * FROM ?? ORDER BY ?? ASC, ?? ASC, ?? DESC",
        vec![t(), Value::from("firstname"), Value::from("lastname"), Value::from("age")],
    );
}

#[test]
fn find_limit_only() {
    assert_translates(
        Query::new("T").find_all().limit(2),
        "SELECT * FROM ?? LIMIT 0, ?",
        vec![t(), Value::Int(2)],
    );
}

#[test]
fn find_limit_and_offset_binds_offset_first() {
    assert_translates(
        Query::new("T").find_all().limit(2).offset(10),
        "SELECT * FROM ?? LIMIT ?, ?",
        vec![t(), Value::Int(10), Value::Int(2)],
    );
}

#[test]
fn find_everything() {
    assert_translates(
        Query::new("T")
            .find(fields! { "name" => "test" })
            .limit(2)
            .offset(10)
            .sort("name", -1),
        "SELECT * FROM ?? WHERE ? ORDER BY ?? DESC LIMIT ?, ?",
        vec![
            t(),
            Value::entry("name", "test"),
            Value::from("name"),
            Value::Int(10),
            Value::Int(2),
        ],
    );
}

// ========================================================================
// Create / Update / Destroy
// ========================================================================

#[test]
fn create_ignores_criteria_and_limit() {
    let from_builder = Query::new("T")
        .create(fields! { "name" => "x" })
        .where_eq("name", "y")
        .limit(5);
    assert_translates(
        from_builder,
        "INSERT INTO ?? SET ?",
        vec![t(), Value::Map(fields! { "name" => "x" })],
    );

    let from_document = Translator::from_document(json!({
        "model": "T",
        "action": "create",
        "values": { "name": "x" },
        "criteria": { "name": "y" },
        "limit": 5
    }))
    .unwrap();
    assert_eq!(from_document.statement(), "INSERT INTO ?? SET ?");
    assert_eq!(from_document.bound_parameters().len(), 2);
}

#[test]
fn update_variants() {
    let base = || Query::new("T").update(fields! { "name" => "test" }, fields! { "name" => "rename" });
    let set = Value::Map(fields! { "name" => "rename" });
    let crit = Value::entry("name", "test");

    assert_translates(base(), "UPDATE ?? SET ? WHERE ?", vec![t(), set.clone(), crit.clone()]);
    assert_translates(
        base().limit(2),
        "UPDATE ?? SET ? WHERE ? LIMIT 0, ?",
        vec![t(), set.clone(), crit.clone(), Value::Int(2)],
    );
    assert_translates(
        base().limit(2).offset(10),
        "UPDATE ?? SET ? WHERE ? LIMIT ?, ?",
        vec![t(), set, crit, Value::Int(10), Value::Int(2)],
    );
}

#[test]
fn destroy_variants() {
    let base = || Query::new("T").destroy(fields! { "name" => "x" });
    let crit = Value::entry("name", "x");

    assert_translates(base(), "DELETE FROM ?? WHERE ?", vec![t(), crit.clone()]);
    assert_translates(
        base().limit(2),
        "DELETE FROM ?? WHERE ? LIMIT 0, ?",
        vec![t(), crit.clone(), Value::Int(2)],
    );
    assert_translates(
        base().limit(2).offset(10),
        "DELETE FROM ?? WHERE ? LIMIT ?, ?",
        vec![t(), crit, Value::Int(10), Value::Int(2)],
    );
}

// ========================================================================
// Properties
// ========================================================================

fn sample_queries() -> Vec<Query> {
    vec![
        Query::new("users").find_all(),
        Query::new("users").find_one(fields! { "id" => 1 }).offset(3),
        Query::new("users").find(fields! { "a" => 1, "b" => "two" }).sort("a", 1).sort("b", 7),
        Query::new("users").create(fields! { "name" => "x", "age" => 3 }).sort("x", -1),
        Query::new("users").update(fields! {}, fields! { "a" => Value::Null }).limit(9),
        Query::new("users").destroy(fields! { "id" => 4 }).limit(1).offset(2),
    ]
}

#[test]
fn first_parameter_is_model_and_counts_match() {
    for query in sample_queries() {
        let stmt = intent_sql::translate(&query);
        assert_eq!(stmt.params()[0], Value::from("users"));
        assert_eq!(stmt.placeholders().len(), stmt.params().len(), "{}", stmt.sql());
        assert_eq!(stmt.placeholders()[0], Placeholder::Identifier);
    }
}

#[test]
fn repeated_access_is_stable() {
    for query in sample_queries() {
        let translator = Translator::from_query(&query);
        let first_params = translator.bound_parameters().to_vec();
        let first_sql = translator.statement().to_string();
        for _ in 0..5 {
            assert_eq!(translator.statement(), first_sql);
            assert_eq!(translator.bound_parameters(), first_params.as_slice());
        }
    }
}

#[test]
fn syntax_document_and_builder_agree() {
    let from_syntax =
        Translator::from_syntax("destroy::T[name='x'][^!age][lim=2][off=10]").unwrap();
    let from_json = Translator::from_json(
        r#"{"model":"T","action":"destroy","criteria":{"name":"x"},"sort":[["age",-1]],"limit":2,"offset":10}"#,
    )
    .unwrap();
    let from_builder = Translator::from_query(
        &Query::new("T")
            .destroy(fields! { "name" => "x" })
            .sort("age", -1)
            .limit(2)
            .offset(10),
    );

    assert_eq!(from_syntax.statement(), from_builder.statement());
    assert_eq!(from_json.statement(), from_builder.statement());
    assert_eq!(from_syntax.bound_parameters(), from_builder.bound_parameters());
    assert_eq!(from_json.bound_parameters(), from_builder.bound_parameters());
}

#[test]
fn toml_document_translates() {
    let translator = Translator::from_toml(
        r#"
        model = "T"
        action = "find"
        sort = [["a", 1], ["b", -1]]
        "#,
    )
    .unwrap();
    assert_eq!(translator.statement(), "SELECT * FROM ?? ORDER BY ?? ASC, ?? DESC");
    assert_eq!(
        translator.bound_parameters(),
        [t(), Value::from("a"), Value::from("b")]
    );
}
