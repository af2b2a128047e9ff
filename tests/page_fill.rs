use reldb::{
    catalog::{column::Column, table_schema::TableSchema, ty::TypeId, Catalog},
    error::DbResult,
    record::Value,
};

mod test_utils;

/// `(id INT, score FLOAT)` encodes to 16 bytes per row, 20 with its slot.
fn fixed_width_schema() -> TableSchema {
    TableSchema {
        columns: vec![
            Column {
                name: "id".into(),
                ty: TypeId::Int,
            },
            Column {
                name: "score".into(),
                ty: TypeId::Float,
            },
        ],
    }
}

#[test]
fn test_second_page_opens_exactly_when_the_first_fills() -> DbResult<()> {
    let mut db = test_utils::TestDb::new_temp()?;
    db.create_table("metrics", fixed_width_schema())?;

    // A 4096-byte page has 4092 usable bytes, fitting 204 of these rows.
    let per_page = 204;

    let table = db.table_mut("metrics")?;
    for i in 0..per_page {
        table.insert(&[Value::Int(i), Value::Float(i as f64)])?;
    }
    assert_eq!(db.table("metrics")?.heap().page_count(), 1);

    db.table_mut("metrics")?
        .insert(&[Value::Int(per_page), Value::Float(0.0)])?;
    assert_eq!(db.table("metrics")?.heap().page_count(), 2);

    let entries = Catalog::new(db.pager().clone()).load()?;
    assert_eq!(entries[0].page_count, 2);

    // The grown page count survives a close-and-reopen, as do the rows.
    let db = db.reopen()?;
    assert_eq!(db.table("metrics")?.heap().page_count(), 2);

    let mut count = 0_i64;
    db.table("metrics")?.scan(|row| {
        assert_eq!(row[0], Value::Int(count));
        count += 1;
        true
    })?;
    assert_eq!(count, per_page + 1);

    Ok(())
}
