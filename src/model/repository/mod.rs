use chrono::NaiveDateTime;

/// a registered account. Password hashes never leave this struct's module tree
#[derive(Debug, PartialEq, Clone)]
pub struct User {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FileRecord {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// the owning user's id; every query against this table filters by it
    pub user_id: u32,
    /// the generated name of the blob on the disk, never shown to clients
    pub filename: String,
    /// the name the client uploaded the file under
    pub original_name: String,
    /// where the blob lives under the storage root
    pub file_path: String,
    pub file_size: u64,
    /// the mime type the client declared at upload time
    pub mime_type: String,
    /// the logical folder the file belongs to, `/` for the root
    pub folder_path: String,
    /// the date the file was uploaded to the server
    pub created_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Folder {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// the owning user's id
    pub user_id: u32,
    pub name: String,
    /// canonical full path; always `parent_path` + `/` + `name`
    pub path: String,
    /// `/` for folders at the top level
    pub parent_path: String,
    pub created_at: NaiveDateTime,
}
