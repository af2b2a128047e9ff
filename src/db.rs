use std::{cell::RefCell, collections::HashMap, path::Path, rc::Rc};

use tracing::info;

use crate::{
    catalog::{entry::TableEntry, table_schema::TableSchema, Catalog},
    error::{DbResult, Error},
    heap::Heap,
    pager::{Pager, SharedPager},
    record::{self, Row, Value},
};

/// A `reldb` database instance: a shared pager plus the in-memory map of
/// live tables.
///
/// Table-name uniqueness is enforced on this map, not on disk; the catalog
/// page stores whatever this layer appends.
pub struct Db {
    pager: SharedPager,
    catalog: Catalog,
    tables: HashMap<String, Table>,
}

impl Db {
    /// Opens the database at `path`, bootstrapping the catalog on first
    /// access and rehydrating one heap per cataloged table.
    pub fn open(path: &Path) -> DbResult<Db> {
        let pager: SharedPager = Rc::new(RefCell::new(Pager::open(path)?));
        let catalog = Catalog::new(Rc::clone(&pager));
        catalog.init_if_empty()?;

        let mut tables = HashMap::new();
        for entry in catalog.load()? {
            let mut heap = Heap::new(Rc::clone(&pager), entry.first_page);
            heap.set_page_count(entry.page_count);
            install_growth_notifier(&mut heap, &pager, &entry.name);

            tables.insert(
                entry.name.clone(),
                Table {
                    name: entry.name,
                    schema: entry.schema,
                    heap,
                },
            );
        }
        info!(table_count = tables.len(), "opened database");

        Ok(Db {
            pager,
            catalog,
            tables,
        })
    }

    /// Creates a new table with the given schema.
    ///
    /// The new heap's range starts past every page range already reserved in
    /// the catalog; its first page is only written on first insert.
    pub fn create_table(&mut self, name: &str, schema: TableSchema) -> DbResult<()> {
        if self.tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_owned()));
        }

        let entries = self.catalog.load()?;
        let first_page = Catalog::next_start_page(&entries);

        let entry = TableEntry {
            name: name.to_owned(),
            first_page,
            page_count: 0,
            schema: schema.clone(),
        };
        self.catalog.append(&entry)?;
        info!(name, ?first_page, "created table");

        let mut heap = Heap::new(Rc::clone(&self.pager), first_page);
        install_growth_notifier(&mut heap, &self.pager, name);

        self.tables.insert(
            name.to_owned(),
            Table {
                name: name.to_owned(),
                schema,
                heap,
            },
        );
        Ok(())
    }

    /// Returns the table with the given name.
    pub fn table(&self, name: &str) -> DbResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_owned()))
    }

    /// Returns the table with the given name, for insertion.
    pub fn table_mut(&mut self, name: &str) -> DbResult<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_owned()))
    }

    /// Returns an iterator over the live tables, in no particular order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Returns a reference to the database pager.
    pub fn pager(&self) -> &SharedPager {
        &self.pager
    }
}

/// Installs a notifier that rewrites the table's catalog entry whenever its
/// heap allocates a page.
///
/// The heap stays coupled only to the pager; the catalog reaches it through
/// this callback.
fn install_growth_notifier(heap: &mut Heap, pager: &SharedPager, name: &str) {
    let catalog = Catalog::new(Rc::clone(pager));
    let name = name.to_owned();
    heap.set_growth_notifier(Box::new(move |page_count| {
        catalog.update_page_count(&name, page_count)
    }));
}

/// A live table: its schema plus the heap holding its rows.
pub struct Table {
    name: String,
    schema: TableSchema,
    heap: Heap,
}

impl Table {
    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table schema.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// The heap backing this table.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Encodes `row` and appends it to the table's heap.
    pub fn insert(&mut self, row: &[Value]) -> DbResult<()> {
        self.check_row(row)?;
        self.heap.insert(&record::encode_row(row))
    }

    /// Visits the table's rows in storage order until exhausted or the
    /// visitor returns false.
    pub fn scan<F>(&self, visitor: F) -> DbResult<()>
    where
        F: FnMut(Row) -> bool,
    {
        self.heap.iterate(&self.schema.columns, visitor)
    }

    fn check_row(&self, row: &[Value]) -> DbResult<()> {
        if row.len() != self.schema.columns.len() {
            return Err(Error::SchemaMismatch("wrong number of values"));
        }
        for (value, column) in row.iter().zip(&self.schema.columns) {
            if value.type_id() != column.ty {
                return Err(Error::SchemaMismatch("value type differs from column type"));
            }
        }
        Ok(())
    }
}
