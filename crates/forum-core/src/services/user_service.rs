use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Sign-up data as received from the client. The password is plain text
/// here and never leaves this service unhashed.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_name: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

/// User registration and login.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        let hashed_password = self
            .passwords
            .hash(&registration.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .create_user(NewUser {
                user_name: registration.user_name,
                hashed_password,
                full_name: registration.full_name,
                email: registration.email,
            })
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Conflict("user name already registered".to_string())
                }
                other => DomainError::Internal(other.to_string()),
            })?;

        tracing::info!(user_name = %user.user_name, "user registered");
        Ok(user)
    }

    pub async fn get(&self, user_name: &str) -> Result<User, DomainError> {
        self.users
            .get_user(user_name)
            .await
            .map_err(|e| DomainError::from_repo(e, "user", user_name))
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<Session, DomainError> {
        let user = self.get(user_name).await?;

        let valid = self
            .passwords
            .verify(password, &user.hashed_password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::warn!(user_name, "login rejected");
            return Err(DomainError::Unauthenticated(
                AuthError::InvalidCredentials.to_string(),
            ));
        }

        let access_token = self
            .tokens
            .generate_token(&user.user_name)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Session {
            access_token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::fixtures;
    use crate::services::testing::{FakePasswords, FakeStore, FakeTokens};

    fn service() -> (UserService, Arc<FakeStore>) {
        let store = Arc::new(FakeStore::default());
        let service = UserService::new(
            store.clone(),
            Arc::new(FakePasswords),
            Arc::new(FakeTokens),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut rng = StdRng::seed_from_u64(11);
        let (service, _) = service();
        let registration = fixtures::random_registration(&mut rng);

        let user = service.register(registration.clone()).await.unwrap();

        assert_eq!(user.user_name, registration.user_name);
        assert_eq!(user.full_name, registration.full_name);
        assert_eq!(user.email, registration.email);
        assert_ne!(user.hashed_password, registration.password);
        assert!(!user.id.is_nil());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let mut rng = StdRng::seed_from_u64(12);
        let (service, _) = service();
        let first = fixtures::random_registration(&mut rng);
        let created = service.register(first.clone()).await.unwrap();

        let mut second = fixtures::random_registration(&mut rng);
        second.user_name = first.user_name.clone();
        let result = service.register(second).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(service.get(&first.user_name).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_login_issues_token() {
        let mut rng = StdRng::seed_from_u64(13);
        let (service, _) = service();
        let registration = fixtures::random_registration(&mut rng);
        service.register(registration.clone()).await.unwrap();

        let session = service
            .login(&registration.user_name, &registration.password)
            .await
            .unwrap();

        assert_eq!(session.access_token, format!("token-for-{}", registration.user_name));
        assert_eq!(session.expires_in, 900);
        assert_eq!(session.user.user_name, registration.user_name);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut rng = StdRng::seed_from_u64(14);
        let (service, _) = service();
        let registration = fixtures::random_registration(&mut rng);
        service.register(registration.clone()).await.unwrap();

        let result = service.login(&registration.user_name, "not-the-password").await;

        assert!(matches!(result, Err(DomainError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, _) = service();
        let result = service.login("nobody", "password123").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
