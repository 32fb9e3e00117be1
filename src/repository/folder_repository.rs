use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::model::repository::Folder;

/// creates a folder record in the database.
/// Path canonicalization and duplicate checks must be done before this is
/// called; the unique (user, path) constraint is the final backstop
pub fn create_folder(folder: &Folder, con: &Connection) -> Result<Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/create_folder.sql"))?;
    let id = pst.insert(rusqlite::params![
        folder.user_id,
        folder.name,
        folder.path,
        folder.parent_path,
        folder.created_at,
    ])? as u32;
    Ok(Folder {
        id: Some(id),
        user_id: folder.user_id,
        name: folder.name.clone(),
        path: folder.path.clone(),
        parent_path: folder.parent_path.clone(),
        created_at: folder.created_at,
    })
}

/// searches for the owner's folder with the passed canonical path.
///
/// if `None` is returned, that means there was no match
pub fn get_by_path(
    user_id: u32,
    path: &str,
    con: &Connection,
) -> Result<Option<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_path.sql"
    ))?;
    match pst.query_row(rusqlite::params![user_id, path], map_folder) {
        Ok(folder) => Ok(Some(folder)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to get folder by path, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// returns the owner's folders directly under the passed parent, ordered by name
pub fn get_child_folders(
    user_id: u32,
    parent_path: &str,
    con: &Connection,
) -> Result<Vec<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_child_folders.sql"
    ))?;
    let mapped = pst.query_map(rusqlite::params![user_id, parent_path], map_folder)?;
    let mut folders: Vec<Folder> = Vec::new();
    for folder in mapped {
        folders.push(folder?);
    }
    Ok(folders)
}

fn map_folder(row: &rusqlite::Row) -> Result<Folder, rusqlite::Error> {
    Ok(Folder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        path: row.get(3)?,
        parent_path: row.get(4)?,
        created_at: row.get(5)?,
    })
}
