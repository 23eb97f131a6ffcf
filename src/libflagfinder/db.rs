use log::{debug, error, info, warn};
use rusqlite::{params, Connection, DatabaseName, OptionalExtension, Result};
use std::path::Path;
use std::time::Instant;

/// One persisted preference. The store is a plain key-value table, read
/// once at startup by the quiz and written by the `parametres` binary.
#[derive(Debug, Clone)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

impl Setting {
    pub fn get(connection: &Connection, key: &str) -> Result<Option<String>> {
        let mut statement = connection.prepare("SELECT value FROM Setting WHERE key = :key LIMIT 1")?;
        statement
            .query_row(&[(":key", &key)], |row| row.get(0))
            .optional()
    }

    pub fn set(connection: &Connection, key: &str, value: &str) -> Result<()> {
        match connection.execute(
            "INSERT INTO Setting(key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        ) {
            Ok(_) => {
                debug!("[DB] Set '{}' = '{}'", key, value);
                Ok(())
            }
            Err(err) => {
                error!("[DB] Error while setting '{}': {:?}", key, err);
                Err(err)
            }
        }
    }

    pub fn delete(connection: &Connection, key: &str) -> Result<()> {
        match connection.execute("DELETE FROM Setting WHERE key = ?1", params![key]) {
            Ok(_) => {
                debug!("[DB] Deleted '{}'", key);
                Ok(())
            }
            Err(err) => {
                error!("[DB] Error while deleting '{}': {:?}", key, err);
                Err(err)
            }
        }
    }

    pub fn get_all(connection: &Connection) -> Result<Vec<Setting>> {
        let mut statement = connection.prepare("SELECT * FROM Setting ORDER BY key")?;
        let rows = statement.query_map([], |row| {
            Ok(Setting {
                key: row.get(0)?,
                value: row.get(1)?,
            })
        })?;

        rows.collect()
    }
}

pub fn create_or_open(src: &Path) -> Result<Connection> {
    if src.exists() {
        info!("[DB] Opening existing settings database");
        open_db(src)
    } else {
        info!("[DB] Creating new settings database");
        create_db(src)
    }
}

pub fn create_db(dest: &Path) -> Result<Connection> {
    let now = Instant::now();
    let db = init_db(Connection::open_in_memory()?)?;
    match db.backup(DatabaseName::Main, dest, None) {
        Ok(_) => {
            // hand back the on-disk connection, writes on the in-memory
            // one would vanish with it
            close_db(db)?;
            debug!(
                "[DB] Creating and saving took {} ms.",
                now.elapsed().as_millis()
            );
            open_db(dest)
        }
        Err(err) => {
            warn!("Failed to create settings database file: {}", err);
            close_db(db)?;
            Err(err)
        }
    }
}

pub fn open_db(src: &Path) -> Result<Connection> {
    let now = Instant::now();
    let db = Connection::open(src)?;
    debug!("[DB] Opening took {} ms.", now.elapsed().as_millis());
    Ok(db)
}

pub fn close_db(connection: Connection) -> Result<()> {
    info!("[DB] Closing settings database");
    match connection.close() {
        Ok(_) => Ok(()),
        Err((conn, _err)) => {
            error!("[DB] Cannot close connection. Retrying 1/2...");
            match conn.close() {
                Ok(_) => Ok(()),
                Err((conn2, _err)) => {
                    error!("[DB] Cannot close connection. Retrying 2/2...");
                    match conn2.close() {
                        Ok(_) => Ok(()),
                        Err(_) => panic!("[DB] Cannot close connection! Aborting."),
                    }
                }
            }
        }
    }
}

fn init_db(conn: Connection) -> Result<Connection> {
    info!("[DB INIT] Creating tables");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Setting (
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              PRIMARY KEY (key)
            )",
        (),
    )?;
    info!("[DB INIT] Created table Setting");

    Ok(conn)
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Result<Connection> {
    init_db(Connection::open_in_memory()?)
}
