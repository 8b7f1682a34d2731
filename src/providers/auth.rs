use crate::domain::User;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by authenticator implementations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email/password pair was rejected
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Credential-checking contract. Swappable for a real authentication
/// service without touching the auth container.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

/// Reference authenticator: accepts any non-empty email with a password of
/// at least 6 characters and derives the display name from the email
/// local-part.
pub struct LocalAuthenticator;

const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(User {
            id: "1".to_string(),
            email: email.to_string(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_credentials() {
        let user = LocalAuthenticator
            .authenticate("ada@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(user.name, "ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let result = LocalAuthenticator.authenticate("ada@example.com", "12345").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_empty_email_rejected() {
        let result = LocalAuthenticator.authenticate("", "longenough").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_name_without_at_sign_is_whole_email() {
        let user = LocalAuthenticator.authenticate("ada", "longenough").await.unwrap();
        assert_eq!(user.name, "ada");
    }
}
