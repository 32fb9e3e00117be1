#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// a folder with that path already exists for the owner
    AlreadyExists,
    /// name is empty or contains a path separator
    InvalidName,
    /// the database failed to save the folder
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetFoldersError {
    DbFailure,
}
