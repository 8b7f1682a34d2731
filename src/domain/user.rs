use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the authenticator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name; opaque to the auth container (the reference
    /// authenticator derives it from the email local-part)
    pub name: String,
}
