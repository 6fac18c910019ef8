use super::{PersistenceError, PersistenceResult, ResultStore};
use crate::results::{TestResult, TestResults};
use rusqlite::{Connection, params};
use std::sync::Mutex;
use tracing::debug;

pub struct SqliteResultStore {
    connection: Mutex<Connection>,
}

impl SqliteResultStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS test_results (
                criterion_id TEXT PRIMARY KEY,
                result_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite connection lock poisoned".into()))
    }
}

impl ResultStore for SqliteResultStore {
    fn save_results(&self, results: &TestResults) -> PersistenceResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM test_results", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO test_results (criterion_id, result_json) VALUES (?1, ?2)")?;
            for (criterion_id, result) in results.iter() {
                let json = serde_json::to_string(result)?;
                stmt.execute(params![criterion_id, json])?;
            }
        }
        tx.commit()?;
        debug!("Saved {} results to sqlite", results.len());
        Ok(())
    }

    fn load_results(&self) -> PersistenceResult<Option<TestResults>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT criterion_id, result_json FROM test_results ORDER BY criterion_id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut results = TestResults::new();
        for row in rows {
            let (criterion_id, json) = row?;
            let result: TestResult = serde_json::from_str(&json)?;
            results.record(criterion_id, result);
        }

        if results.is_empty() {
            return Ok(None);
        }
        Ok(Some(results))
    }
}
