use sqlbind::sql;

fn main() {
    let _ = sql!("a", 1);
}
