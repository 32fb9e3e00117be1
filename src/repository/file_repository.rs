use rusqlite::Connection;

use crate::model::repository::FileRecord;

/// saves the file record and returns its generated id.
/// The blob this record points at must already be on the disk
pub fn create_file(file: &FileRecord, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/create_file.sql"))?;
    let id = pst.insert(rusqlite::params![
        file.user_id,
        file.filename,
        file.original_name,
        file.file_path,
        file.file_size,
        file.mime_type,
        file.folder_path,
        file.created_at,
    ])? as u32;
    Ok(id)
}

/// retrieves a file scoped to the passed owner. A file owned by somebody
/// else comes back as `QueryReturnedNoRows`, exactly like one that was
/// never created
pub fn get_by_id_and_user(
    id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_file_by_id_and_user.sql"
    ))?;
    pst.query_row([id, user_id], map_file)
}

/// returns the owner's files in the passed folder, newest first
pub fn get_files_for_folder(
    user_id: u32,
    folder_path: &str,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/file/get_files_for_folder.sql"
    ))?;
    let mapped = pst.query_map(rusqlite::params![user_id, folder_path], map_file)?;
    let mut files: Vec<FileRecord> = Vec::new();
    for file in mapped {
        files.push(file?);
    }
    Ok(files)
}

/// removes the file with the passed id from the database.
/// Ownership must be checked before this is called
pub fn delete_by_id(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/file/delete_file_by_id.sql"))?;
    pst.execute([id])?;
    Ok(())
}

pub fn map_file(row: &rusqlite::Row) -> Result<FileRecord, rusqlite::Error> {
    Ok(FileRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        filename: row.get(2)?,
        original_name: row.get(3)?,
        file_path: row.get(4)?,
        file_size: row.get(5)?,
        mime_type: row.get(6)?,
        folder_path: row.get(7)?,
        created_at: row.get(8)?,
    })
}
