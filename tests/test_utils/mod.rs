use std::{
    ops::{Deref, DerefMut},
    path::PathBuf,
};

use reldb::{
    catalog::{column::Column, table_schema::TableSchema, ty::TypeId},
    error::DbResult,
    Db,
};
use tempfile::TempDir;

/// Sets up tracing subscriber.
#[allow(dead_code)]
pub fn setup_tracing(level: Option<&str>) {
    use tracing_subscriber::{
        fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
    };

    let filter_layer = level
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::try_from_default_env().unwrap_or("warn".into()));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layer())
        .init();
}

/// A database over a temporary directory, removed on drop.
pub struct TestDb {
    db: Db,
    dir: TempDir,
}

impl TestDb {
    /// Creates a new, empty test database.
    pub fn new_temp() -> DbResult<TestDb> {
        let dir = TempDir::new()?;
        let db = Db::open(&dir.path().join("test.db"))?;
        Ok(TestDb { db, dir })
    }

    /// Path of the backing database file.
    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("test.db")
    }

    /// Drops the open handle and reopens the same file.
    #[allow(dead_code)]
    pub fn reopen(self) -> DbResult<TestDb> {
        let TestDb { db, dir } = self;
        drop(db);
        let db = Db::open(&dir.path().join("test.db"))?;
        Ok(TestDb { db, dir })
    }
}

impl Deref for TestDb {
    type Target = Db;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl DerefMut for TestDb {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.db
    }
}

/// `(id INT, name TEXT)`, the schema used by most scenarios.
#[allow(dead_code)]
pub fn users_schema() -> TableSchema {
    TableSchema {
        columns: vec![
            Column {
                name: "id".into(),
                ty: TypeId::Int,
            },
            Column {
                name: "name".into(),
                ty: TypeId::Text,
            },
        ],
    }
}

/// `(id INT, price FLOAT)`.
#[allow(dead_code)]
pub fn products_schema() -> TableSchema {
    TableSchema {
        columns: vec![
            Column {
                name: "id".into(),
                ty: TypeId::Int,
            },
            Column {
                name: "price".into(),
                ty: TypeId::Float,
            },
        ],
    }
}
