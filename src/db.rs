use std::fs;

use actix_web::web;
use log::info;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub mod users;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no identifier left after {0}")]
    IdOverflow(i64),

    #[error("blocking thread pool is gone")]
    Blocking,
}

/// `IdUsuario` carries no unique constraint: ids come from the caller.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Usuarios (
    IdUsuario INTEGER NOT NULL,
    Nombre    TEXT    NOT NULL,
    Correo    TEXT    NOT NULL
);";

pub fn open_connection(config: &DatabaseConfig) -> Result<Connection, DbError> {
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    if config.create_if_missing {
        flags.insert(OpenFlags::SQLITE_OPEN_CREATE);
    }
    Ok(Connection::open_with_flags(&config.path, flags)?)
}

/// Creates the database file (when allowed) and the `Usuarios` table.
pub fn prepare_schema(config: &DatabaseConfig) -> Result<(), DbError> {
    if config.create_if_missing {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }
    let conn = open_connection(config)?;
    conn.execute_batch(SCHEMA)?;
    info!("Database ready at {}", config.path.display());
    Ok(())
}

/// Opens a connection and runs `query` on actix's blocking pool. The
/// connection is dropped when `query` returns.
pub async fn with_connection<F, T>(config: &DatabaseConfig, query: F) -> Result<T, DbError>
where
    F: FnOnce(&Connection) -> Result<T, DbError> + Send + 'static,
    T: Send + 'static,
{
    let config = config.clone();
    web::block(move || {
        let conn = open_connection(&config)?;
        query(&conn)
    })
    .await
    .map_err(|_| DbError::Blocking)?
}
