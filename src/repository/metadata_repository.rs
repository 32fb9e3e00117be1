use rusqlite::Connection;

/// returns the current version of the database as a String
pub fn get_version(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
}

pub fn set_version(version: u64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut statement = con.prepare(include_str!(
        "../assets/queries/metadata/set_database_version.sql"
    ))?;
    statement.execute([version.to_string()])?;
    Ok(())
}
