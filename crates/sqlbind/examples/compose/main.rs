//! Composing queries with `sql!`, metadata and rendering.
//!
//! Run with:
//!   cargo run --example compose -p sqlbind

use sqlbind::{SqlQueryBuilder, SqlResult, sql};
use tracing_subscriber::filter::LevelFilter;

struct Filters {
    status: Option<&'static str>,
    min_total: Option<i64>,
    table: &'static str,
}

fn list_orders(filters: &Filters) -> SqlResult<SqlQueryBuilder> {
    let table = filters.table;
    let mut q = sql!("SELECT Id, Total, Status FROM {table:l} WHERE 1 = 1")?
        .with_metadata("database", "sales")?;

    if let Some(status) = filters.status {
        q += sql!(" AND Status = {status}")?;
    }
    if let Some(min_total) = filters.min_total {
        q += sql!(" AND Total >= {min_total}")?;
    }
    Ok(q)
}

fn main() -> SqlResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let filters = Filters {
        status: Some("shipped"),
        min_total: Some(100),
        table: "Orders",
    };

    let orders = list_orders(&filters)?;
    let wrapped = sql!(
        "SELECT * FROM ({orders}) o WHERE o.Status = {} OR o.Total IS {}",
        "shipped",
        None::<i64>
    )?;

    let rendered = wrapped.render("p")?;
    println!("{}", rendered.query);
    for (name, value) in &rendered.parameters {
        println!("  @{name} = {value}");
    }
    println!("metadata: {:?}", wrapped.metadata());

    // Conflicting metadata is rejected.
    let other = SqlQueryBuilder::from("SELECT 1").with_metadata("database", "billing")?;
    match orders.concat(&other) {
        Ok(_) => println!("unexpected merge"),
        Err(e) => println!("error: {e}"),
    }

    Ok(())
}
