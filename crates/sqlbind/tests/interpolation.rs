//! End-to-end tests for `sql!` templates.

use pretty_assertions::assert_eq;
use sqlbind::prelude::*;
use sqlbind::{Parameters, SqlResult};

fn params(pairs: &[(&str, Value)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn template_without_slots_is_literal() -> SqlResult<()> {
    let q = sql!("SELECT * FROM Orders WHERE Id = 123")?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = 123");
    assert!(q.parameters()?.is_empty());
    assert_eq!(q, SqlQueryBuilder::from("SELECT * FROM Orders WHERE Id = 123"));
    Ok(())
}

#[test]
fn binds_interpolated_value() -> SqlResult<()> {
    let q = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Int(123))]));
    Ok(())
}

#[test]
fn composes_builders() -> SqlResult<()> {
    let inner = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
    let outer = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?;

    assert_eq!(
        outer.query()?,
        "SELECT * FROM (SELECT * FROM Orders WHERE Id = @p1) src WHERE IsValid = @p2"
    );
    assert_eq!(
        outer.parameters()?,
        params(&[("p1", Value::Int(123)), ("p2", Value::Bool(true))])
    );
    Ok(())
}

#[test]
fn composes_recursively() -> SqlResult<()> {
    let inner = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
    let middle = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?;
    let outer = sql!("SELECT * FROM ({middle}) src WHERE Amount > {}", 5)?;

    assert_eq!(
        outer.query()?,
        "SELECT * FROM (\
            SELECT * FROM (\
                SELECT * FROM Orders WHERE Id = @p1) src \
            WHERE IsValid = @p2) src \
        WHERE Amount > @p3"
    );
    assert_eq!(
        outer.parameters()?,
        params(&[
            ("p1", Value::Int(123)),
            ("p2", Value::Bool(true)),
            ("p3", Value::Int(5)),
        ])
    );
    Ok(())
}

#[test]
fn concatenates_templates() -> SqlResult<()> {
    let q = sql!("SELECT * FROM Orders WHERE Id = {}", 123)? + sql!(" OR Id = {}", 234)?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1 OR Id = @p2");
    assert_eq!(
        q.parameters()?,
        params(&[("p1", Value::Int(123)), ("p2", Value::Int(234))])
    );

    let mut assigned = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
    assigned += sql!(" OR Id = {}", 234)?;
    assert_eq!(assigned.query()?, q.query()?);
    assert_eq!(assigned.parameters()?, q.parameters()?);
    Ok(())
}

#[test]
fn binds_strings_and_integers() -> SqlResult<()> {
    let id = 123;
    let name = "abc";
    for q in [
        sql!("SELECT * FROM Orders WHERE Id = {id}")?,
        sql!("SELECT * FROM Orders WHERE Id = {name}")?,
    ] {
        let (query, parameters) = q.render("p")?.into_parts();
        assert_eq!(query, "SELECT * FROM Orders WHERE Id = @p1");
        assert_eq!(parameters.len(), 1);
    }
    assert_eq!(
        sql!("Id = {name}")?.parameters()?,
        params(&[("p1", Value::from("abc"))])
    );
    Ok(())
}

#[test]
fn renders_custom_prefix() -> SqlResult<()> {
    let q = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?;
    let rendered = q.render("param")?;
    assert_eq!(rendered.query, "SELECT * FROM Orders WHERE Id = @param1");
    assert_eq!(rendered.parameters, params(&[("param1", Value::Int(123))]));

    let config = RenderConfig::new().with_parameter_prefix("arg");
    assert_eq!(
        q.render_with(&config)?.query,
        "SELECT * FROM Orders WHERE Id = @arg1"
    );
    Ok(())
}

#[test]
fn reuses_parameters_with_the_same_value() -> SqlResult<()> {
    let q = sql!(
        "SELECT * FROM Orders WHERE Id = {0} AND IsValid = {1} AND Amount = {0}",
        123,
        true
    )?;
    let rendered = q.render("p")?;
    assert_eq!(
        rendered.query,
        "SELECT * FROM Orders WHERE Id = @p1 AND IsValid = @p2 AND Amount = @p1"
    );
    assert_eq!(
        rendered.parameters,
        params(&[("p1", Value::Int(123)), ("p2", Value::Bool(true))])
    );
    Ok(())
}

#[test]
fn reuses_null_parameters() -> SqlResult<()> {
    let missing: Option<bool> = None;
    let q = sql!("SELECT * FROM Orders")?
        + sql!(" WHERE Id = {} AND IsValid = {missing} AND Amount = {}", 123, None::<i64>)?;

    let rendered = q.render("p")?;
    assert_eq!(
        rendered.query,
        "SELECT * FROM Orders WHERE Id = @p1 AND IsValid = @p2 AND Amount = @p2"
    );
    assert_eq!(
        rendered.parameters,
        params(&[("p1", Value::Int(123)), ("p2", Value::Null)])
    );
    Ok(())
}

#[test]
fn inlines_literal_format() -> SqlResult<()> {
    let table_name = "Orders";
    let q = sql!("SELECT * FROM {table_name:l} WHERE Id = {}", 123)?;
    let rendered = q.render("p")?;
    assert_eq!(rendered.query, "SELECT * FROM Orders WHERE Id = @p1");
    assert_eq!(rendered.parameters, params(&[("p1", Value::Int(123))]));
    Ok(())
}

#[test]
fn inlines_literal_wrapper() -> SqlResult<()> {
    let column = String::from("Amount");
    let q = sql!("SELECT {} FROM Orders WHERE {0} > {}", column.as_literal(), 10)?;
    assert_eq!(q.query()?, "SELECT Amount FROM Orders WHERE Amount > @p1");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Int(10))]));
    Ok(())
}

#[test]
fn inlines_nested_literal_builder() -> SqlResult<()> {
    let table = SqlQueryBuilder::from("Orders");
    let q = sql!("SELECT * FROM {table} WHERE Id = {}", 123)?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Int(123))]));
    Ok(())
}

#[test]
fn embeds_single_parameter_builder() -> SqlResult<()> {
    let param = SqlQueryBuilder::from_parameter(123);
    let q = sql!("SELECT * FROM Orders WHERE Id = {param}")?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Int(123))]));
    Ok(())
}

#[test]
fn embeds_missing_builder_as_null() -> SqlResult<()> {
    let filter: Option<SqlQueryBuilder> = None;
    let q = sql!("SELECT {filter}, {}", Some(sql!("x")?))?;
    assert_eq!(q.query()?, "SELECT @p1, x");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Null)]));
    Ok(())
}

#[test]
fn keeps_escaped_braces() -> SqlResult<()> {
    let q = sql!("SELECT '{{}}'::jsonb || {}", "x")?;
    assert_eq!(q.query()?, "SELECT '{}'::jsonb || @p1");
    Ok(())
}

#[test]
fn evaluates_positional_arguments_once() -> SqlResult<()> {
    let mut calls = 0;
    let mut next = || {
        calls += 1;
        calls
    };
    let q = sql!("a = {0} OR b = {0}", next())?;
    assert_eq!(q.query()?, "a = @p1 OR b = @p1");
    assert_eq!(calls, 1);
    Ok(())
}

#[test]
fn carries_metadata() -> SqlResult<()> {
    let q = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?.with_metadata("DbName", "Db1")?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Id = @p1");
    assert_eq!(q.parameters()?, params(&[("p1", Value::Int(123))]));
    assert_eq!(q.metadata().get("DbName"), Some(&Value::from("Db1")));
    Ok(())
}

#[test]
fn propagates_and_merges_metadata() -> SqlResult<()> {
    let inner = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?.with_metadata_all([
        ("a", Value::Int(1)),
        ("b", Value::Int(2)),
        ("c", Value::Null),
    ])?;
    let outer = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}")?
        .with_metadata("a", 1)?
        .with_metadata("c", Value::Null)?;

    assert_eq!(
        outer.query()?,
        "SELECT * FROM (SELECT * FROM Orders WHERE Id = @p1) src WHERE IsValid = @p2"
    );
    assert_eq!(
        outer.metadata(),
        &params(&[("a", Value::Int(1)), ("b", Value::Int(2)), ("c", Value::Null)])
    );
    Ok(())
}

#[test]
fn rejects_inconsistent_metadata_on_composition() -> SqlResult<()> {
    let inner = sql!("SELECT * FROM Orders WHERE Id = {}", 123)?.with_metadata_all([
        ("a", Value::Int(1)),
        ("b", Value::Int(2)),
        ("c", Value::Null),
    ])?;

    let result = sql!("SELECT * FROM ({inner}) src WHERE IsValid = {true}").and_then(|q| {
        q.with_metadata("a", 1)?.with_metadata("c", 3)
    });
    assert!(result.unwrap_err().is_metadata_conflict());

    let db2 = SqlQueryBuilder::from("x").with_metadata("a", 2)?;
    let err = sql!("{inner} UNION {db2}").unwrap_err();
    assert!(err.is_metadata_conflict());
    Ok(())
}

#[test]
fn missing_string_is_rejected() {
    let err = SqlQueryBuilder::try_from(None::<String>).unwrap_err();
    assert!(matches!(err, SqlError::Argument(_)));
}

#[test]
fn equal_templates_compare_equal() -> SqlResult<()> {
    let build = || -> SqlResult<SqlQueryBuilder> {
        Ok(sql!("SELECT * FROM (")?
            + sql!("{}) src ", sql!("SELECT * FROM Orders WHERE Id = {}", 123)?)?
            + sql!("WHERE IsValid = {true}")?)
    };
    let a = build()?;
    let b = build()?;
    assert_eq!(a, b);
    assert!(a == b);
    Ok(())
}

#[test]
fn binds_typed_values() -> SqlResult<()> {
    let id = uuid::Uuid::new_v4();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let doc = serde_json::json!({"k": "v"});
    let q = sql!("{id} {day} {doc} {1.5} {id}")?;

    let rendered = q.render("p")?;
    assert_eq!(rendered.query, "@p1 @p2 @p3 @p4 @p1");
    assert_eq!(rendered.parameters.get("p1"), Some(&Value::Uuid(id)));
    assert_eq!(rendered.parameters.get("p2"), Some(&Value::Date(day)));
    assert_eq!(rendered.parameters.get("p3"), Some(&Value::Json(doc)));
    assert_eq!(rendered.parameters.get("p4"), Some(&Value::Float(1.5)));
    Ok(())
}

#[test]
fn appends_formatted_slots_at_runtime() -> SqlResult<()> {
    let mut q = SqlQueryBuilder::from("SELECT * FROM ");
    q.append_formatted("Orders", Some("l"))?
        .append_literal(" WHERE Name = ")
        .append_formatted("Orders", None)?;
    assert_eq!(q.query()?, "SELECT * FROM Orders WHERE Name = @p1");

    let err = q.append_formatted("Orders", Some("x")).unwrap_err();
    assert!(err.is_format());
    Ok(())
}

#[test]
fn rendered_sql_serializes() -> SqlResult<()> {
    let rendered = sql!("SELECT {}", 1)?.render("p")?;
    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json["query"], "SELECT @p1");
    assert_eq!(json["parameters"]["p1"], serde_json::json!({"Int": 1}));
    assert_eq!(rendered.to_string(), "SELECT @p1");
    Ok(())
}
