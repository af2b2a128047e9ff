use reldb::{
    error::DbResult,
    record::{Row, Value},
};

mod test_utils;

#[test]
fn test_reopen_restores_tables_schemas_and_rows() -> DbResult<()> {
    let mut db = test_utils::TestDb::new_temp()?;

    db.create_table("users", test_utils::users_schema())?;
    db.table_mut("users")?
        .insert(&[Value::Int(1), Value::Text("Trevor".into())])?;

    db.create_table("products", test_utils::products_schema())?;
    let products = db.table_mut("products")?;
    products.insert(&[Value::Int(1), Value::Float(9.5)])?;
    products.insert(&[Value::Int(2), Value::Float(10.0)])?;

    let db = db.reopen()?;

    assert_eq!(db.tables().count(), 2);
    assert_eq!(db.table("users")?.schema(), &test_utils::users_schema());
    assert_eq!(
        db.table("products")?.schema(),
        &test_utils::products_schema()
    );

    let mut users = Vec::new();
    db.table("users")?.scan(|row| {
        users.push(row);
        true
    })?;
    assert_eq!(users, vec![vec![Value::Int(1), Value::Text("Trevor".into())]]);

    let mut products: Vec<Row> = Vec::new();
    db.table("products")?.scan(|row| {
        products.push(row);
        true
    })?;
    assert_eq!(
        products,
        vec![
            vec![Value::Int(1), Value::Float(9.5)],
            vec![Value::Int(2), Value::Float(10.0)],
        ]
    );

    Ok(())
}

#[test]
fn test_reopened_tables_keep_growing_their_own_ranges() -> DbResult<()> {
    let mut db = test_utils::TestDb::new_temp()?;
    db.create_table("users", test_utils::users_schema())?;
    db.table_mut("users")?
        .insert(&[Value::Int(1), Value::Text("before".into())])?;

    let mut db = db.reopen()?;

    // Inserting after reopen appends to the same heap, and new tables are
    // allocated past it.
    db.table_mut("users")?
        .insert(&[Value::Int(2), Value::Text("after".into())])?;
    db.create_table("products", test_utils::products_schema())?;

    let users_first = db.table("users")?.heap().first_page();
    let products_first = db.table("products")?.heap().first_page();
    assert!(products_first > users_first);

    let mut ids = Vec::new();
    db.table("users")?.scan(|row| {
        ids.push(row[0].clone());
        true
    })?;
    assert_eq!(ids, vec![Value::Int(1), Value::Int(2)]);

    Ok(())
}
