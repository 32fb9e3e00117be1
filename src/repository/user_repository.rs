use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::model::repository::User;

/// creates the user record and returns it with its generated id.
/// Username and email uniqueness is enforced by the schema; callers that
/// want a friendly error should check for an existing account first
pub fn create_user(user: &User, con: &Connection) -> Result<User, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/create_user.sql"))?;
    let id = pst.insert(rusqlite::params![
        user.username,
        user.email,
        user.password_hash,
        user.created_at
    ])? as u32;
    Ok(User {
        id: Some(id),
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        created_at: user.created_at,
    })
}

/// searches for an account whose username or email matches either passed value.
///
/// if `None` is returned, that means there was no match
pub fn get_by_username_or_email(
    username: &str,
    email: &str,
    con: &Connection,
) -> Result<Option<User>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/user/get_user_by_username_or_email.sql"
    ))?;
    match pst.query_row(rusqlite::params![username, email], map_user) {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to look up user by identifier, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

fn map_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}
