/// the identity a verified bearer token resolves to.
/// Every storage operation is scoped by the `id` in here
#[derive(Debug, PartialEq, Clone)]
pub struct AuthenticatedUser {
    pub id: u32,
    pub username: String,
    pub email: String,
}

/// used to represent the result of calling `HeaderAuth::validate`
pub enum ValidateResult {
    Ok(AuthenticatedUser),
    /// the token failed signature or shape checks
    Invalid,
    /// the token was well formed but is past its expiry
    Expired,
}
