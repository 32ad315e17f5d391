use sqlbind::sql;

fn main() {
    let _ = sql!("{3}", 1);
}
