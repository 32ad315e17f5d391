use sqlbind::sql;

fn main() {
    let _ = sql!("{x:q}");
}
