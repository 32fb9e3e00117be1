#[derive(PartialEq, Debug)]
pub enum BlobError {
    /// the generated path already exists; blobs are never overwritten
    AlreadyExists,
    /// the underlying write or remove failed
    Io,
}

#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// missing or unusable client file name; the message says what was wrong
    MissingInfo(String),
    /// the declared size is over the configured cap
    TooLarge,
    /// the extension is not in the allow-list
    TypeNotAllowed,
    /// couldn't write the blob to the disk
    FailWriteDisk,
    /// couldn't record the file in the repository
    FailWriteDb,
}

#[derive(PartialEq, Debug)]
pub enum GetFileError {
    /// no record for that id and owner; a missing blob reports the same
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    // file reference not found in repository
    NotFound,
    // couldn't remove the file reference from the repository
    DbError,
    // couldn't remove the file from the disk
    FileSystemError,
}

#[derive(PartialEq, Debug)]
pub enum GetChildFilesError {
    DbFailure,
}
