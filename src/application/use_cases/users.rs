//! Accounts and access tokens.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::application::responses::{TokenResponse, UserResponse};
use crate::domain::entities::{NewUser, Role, User};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::UserRepository;
use crate::domain::unit_of_work::{UnitOfWork, in_unit_of_work};
use crate::infrastructure::security::{PasswordHasher, TokenService};

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

/// Creates an account with a hashed password.
pub struct Register<R: UserRepository, U: UnitOfWork> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    uow: Arc<U>,
}

impl<R: UserRepository, U: UnitOfWork> Register<R, U> {
    pub fn new(users: Arc<R>, hasher: Arc<dyn PasswordHasher>, uow: Arc<U>) -> Self {
        Self { users, hasher, uow }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::UserAlreadyExists`] if the email is taken.
    pub async fn execute(&self, command: RegisterCommand) -> CatalogResult<UserResponse> {
        let new_user = NewUser {
            hashed_password: self.hasher.hash(&command.password)?,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            role: if command.is_admin {
                Role::Admin
            } else {
                Role::User
            },
        };

        let user = in_unit_of_work(self.uow.as_ref(), self.users.create(new_user)).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.into())
    }
}

/// Exchanges email and password for an access token.
pub struct LogIn<R: UserRepository> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<R: UserRepository> LogIn<R> {
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidCredentials`] for an unknown email and for
    /// a wrong password alike.
    pub async fn execute(&self, email: &str, password: &str) -> CatalogResult<TokenResponse> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.hashed_password) {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(CatalogError::InvalidCredentials);
        }

        let token = self.tokens.create_access_token(user.id)?;
        Ok(TokenResponse::bearer(token))
    }
}

/// Resolves a bearer token to the account it was issued for.
pub struct AuthenticateUser<R: UserRepository> {
    users: Arc<R>,
    tokens: Arc<dyn TokenService>,
}

impl<R: UserRepository> AuthenticateUser<R> {
    pub fn new(users: Arc<R>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthorized`] when the token is invalid or
    /// expired, or its subject no longer exists.
    pub async fn execute(&self, token: &str) -> CatalogResult<User> {
        let claims = self
            .tokens
            .decode_access_token(token)
            .ok_or(CatalogError::Unauthorized)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| CatalogError::Unauthorized)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CatalogError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::domain::MockUnitOfWork;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::security::{AccessClaims, MockPasswordHasher, MockTokenService};

    fn reader(id: Uuid) -> User {
        User {
            id,
            email: "reader@example.com".to_string(),
            hashed_password: "$argon2id$stored".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Reader".to_string(),
            role: Role::User,
        }
    }

    fn register_command(is_admin: bool) -> RegisterCommand {
        RegisterCommand {
            email: "reader@example.com".to_string(),
            password: "correct horse".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Reader".to_string(),
            is_admin,
        }
    }

    fn claims_for(sub: &str) -> AccessClaims {
        AccessClaims {
            sub: sub.to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("correct horse"))
            .returning(|_| Ok("$argon2id$fresh".to_string()));

        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|user| user.hashed_password == "$argon2id$fresh" && user.role == Role::User)
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    email: user.email,
                    hashed_password: user.hashed_password,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    role: user.role,
                })
            });

        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(1).returning(|| Ok(()));

        let use_case = Register::new(Arc::new(users), Arc::new(hasher), Arc::new(uow));

        let registered = use_case.execute(register_command(false)).await.unwrap();

        assert_eq!(registered.email, "reader@example.com");
        assert_eq!(registered.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_admin_flag_sets_role() {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hash".to_string()));

        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|user| user.role == Role::Admin)
            .returning(|user| {
                let mut created = reader(Uuid::new_v4());
                created.role = user.role;
                Ok(created)
            });

        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().returning(|| Ok(()));

        let use_case = Register::new(Arc::new(users), Arc::new(hasher), Arc::new(uow));

        let registered = use_case.execute(register_command(true)).await.unwrap();

        assert_eq!(registered.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_register_taken_email() {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hash".to_string()));

        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|_| Err(CatalogError::UserAlreadyExists));

        let mut uow = MockUnitOfWork::new();
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let use_case = Register::new(Arc::new(users), Arc::new(hasher), Arc::new(uow));

        let err = use_case.execute(register_command(false)).await.unwrap_err();

        assert!(matches!(err, CatalogError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_login_issues_bearer_token() {
        let id = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("reader@example.com"))
            .returning(move |_| Ok(Some(reader(id))));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .with(eq("correct horse"), eq("$argon2id$stored"))
            .returning(|_, _| true);

        let mut tokens = MockTokenService::new();
        tokens
            .expect_create_access_token()
            .with(eq(id))
            .returning(|_| Ok("signed.jwt.token".to_string()));

        let use_case = LogIn::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens));

        let token = use_case
            .execute("reader@example.com", "correct horse")
            .await
            .unwrap();

        assert_eq!(token.access_token, "signed.jwt.token");
        assert_eq!(token.token_type, "bearer");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("reader@example.com"))
            .returning(|_| Ok(Some(reader(Uuid::new_v4()))));
        users
            .expect_find_by_email()
            .with(eq("nobody@example.com"))
            .returning(|_| Ok(None));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| false);

        let mut tokens = MockTokenService::new();
        tokens.expect_create_access_token().times(0);

        let use_case = LogIn::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens));

        let wrong_password = use_case
            .execute("reader@example.com", "guess")
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute("nobody@example.com", "guess")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, CatalogError::InvalidCredentials));
        assert!(matches!(unknown_email, CatalogError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_resolves_token_subject() {
        let id = Uuid::new_v4();
        let mut tokens = MockTokenService::new();
        tokens
            .expect_decode_access_token()
            .returning(move |_| Some(claims_for(&id.to_string())));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(reader(id))));

        let use_case = AuthenticateUser::new(Arc::new(users), Arc::new(tokens));

        let user = use_case.execute("token").await.unwrap();

        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_tokens() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_decode_access_token()
            .with(eq("expired"))
            .returning(|_| None);
        tokens
            .expect_decode_access_token()
            .with(eq("garbled-subject"))
            .returning(|_| Some(claims_for("not-a-uuid")));
        tokens
            .expect_decode_access_token()
            .with(eq("deleted-user"))
            .returning(|_| Some(claims_for(&Uuid::new_v4().to_string())));

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let use_case = AuthenticateUser::new(Arc::new(users), Arc::new(tokens));

        for token in ["expired", "garbled-subject", "deleted-user"] {
            let err = use_case.execute(token).await.unwrap_err();
            assert!(matches!(err, CatalogError::Unauthorized), "{token}");
        }
    }
}
