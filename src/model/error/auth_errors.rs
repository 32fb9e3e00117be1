#[derive(PartialEq, Debug)]
pub enum TokenError {
    /// the token failed signature or shape checks
    Invalid,
    /// the token was well formed but is past its expiry
    Expired,
}

#[derive(PartialEq, Debug)]
pub enum RegisterError {
    /// username or email is already taken
    DuplicateIdentity,
    /// a field failed basic validation; the message says which
    InvalidInput(String),
    /// the database failed to check or create the account
    DbFailure,
    /// the password could not be hashed; nothing was created
    HashFailure,
    /// the account exists but a token could not be signed for it
    TokenFailure,
}

#[derive(PartialEq, Debug)]
pub enum LoginError {
    /// unknown identifier or wrong password; callers never learn which
    BadCredentials,
    DbFailure,
    TokenFailure,
}
