use sqlbind::{SqlResult, sql};

fn main() -> SqlResult<()> {
    let table = "Orders";
    let inner = sql!("SELECT * FROM {table:l} WHERE Id = {0} OR ParentId = {0}", 123)?;
    let outer = sql!("SELECT * FROM ({inner}) src WHERE Name = {}", "a")?;
    assert_eq!(
        outer.query()?,
        "SELECT * FROM (SELECT * FROM Orders WHERE Id = @p1 OR ParentId = @p1) src WHERE Name = @p2"
    );
    Ok(())
}
