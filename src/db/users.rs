use rusqlite::{params, Connection};

use super::DbError;
use crate::{models::User, validator::NewUser};

pub fn insert_user(conn: &Connection, user: &NewUser) -> Result<(), DbError> {
    let query = "INSERT INTO Usuarios (IdUsuario, Nombre, Correo) VALUES (?1, ?2, ?3)";
    conn.execute(query, params![user.id_usuario, user.nombre, user.correo])?;
    Ok(())
}

/// `max(IdUsuario) + 1`, or 1 on an empty table. Nothing reserves the value,
/// so two callers may get the same id.
pub fn next_user_id(conn: &Connection) -> Result<i64, DbError> {
    let query = "SELECT MAX(IdUsuario) AS MaxId FROM Usuarios";
    let max_id: Option<i64> = conn.query_row(query, [], |row| row.get(0))?;
    let max_id = max_id.unwrap_or(0);
    max_id.checked_add(1).ok_or(DbError::IdOverflow(max_id))
}

pub fn get_users_by_id(conn: &Connection, id_usuario: i64) -> Result<Vec<User>, DbError> {
    let query = "SELECT IdUsuario, Nombre, Correo FROM Usuarios WHERE IdUsuario = ?1";
    let mut prepared = conn.prepare(query)?;
    let rows = prepared.query_map(params![id_usuario], |row| {
        Ok(User {
            id_usuario: row.get(0)?,
            nombre: row.get(1)?,
            correo: row.get(2)?,
        })
    })?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SCHEMA;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    fn new_user(id: i64, nombre: &str) -> NewUser {
        NewUser {
            id_usuario: id,
            nombre: nombre.to_owned(),
            correo: format!("{}@x.com", nombre.to_lowercase()),
        }
    }

    #[test]
    fn next_id_starts_at_one() {
        let conn = memory_db();
        assert_eq!(next_user_id(&conn).unwrap(), 1);
    }

    #[test]
    fn next_id_follows_the_maximum_not_the_count() {
        let conn = memory_db();
        for (id, name) in [(1, "Ana"), (7, "Luis"), (3, "Eva")] {
            insert_user(&conn, &new_user(id, name)).unwrap();
        }
        assert_eq!(next_user_id(&conn).unwrap(), 8);
    }

    #[test]
    fn inserted_row_reads_back() {
        let conn = memory_db();
        insert_user(&conn, &new_user(5, "Ana")).unwrap();

        let users = get_users_by_id(&conn, 5).unwrap();
        assert_eq!(
            users,
            vec![User {
                id_usuario: 5,
                nombre: "Ana".to_owned(),
                correo: "ana@x.com".to_owned(),
            }]
        );
        assert!(get_users_by_id(&conn, 6).unwrap().is_empty());
    }

    #[test]
    fn duplicate_ids_are_accepted() {
        let conn = memory_db();
        let id = next_user_id(&conn).unwrap();
        insert_user(&conn, &new_user(id, "Ana")).unwrap();
        insert_user(&conn, &new_user(id, "Luis")).unwrap();

        assert_eq!(get_users_by_id(&conn, id).unwrap().len(), 2);
    }

    #[test]
    fn next_id_reports_overflow() {
        let conn = memory_db();
        insert_user(&conn, &new_user(i64::MAX, "Ana")).unwrap();
        assert!(matches!(
            next_user_id(&conn),
            Err(DbError::IdOverflow(i64::MAX))
        ));
    }

    #[test]
    fn insert_fails_without_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            insert_user(&conn, &new_user(1, "Ana")),
            Err(DbError::Sqlite(_))
        ));
    }
}
