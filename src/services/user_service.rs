use std::sync::Arc;

use crate::api::user::{AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse};
use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, NewUser};
use crate::database::repository::UserStore;

use super::ownership::authorized;
use super::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "invalid email or password";

pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenIssuer>,
    password_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            users,
            tokens,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Unknown email and wrong password are reported identically
    pub async fn login(&self, req: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = match self.users.find_by_email(&req.email).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound(_)) => {
                tracing::warn!("Login rejected: no account for {}", req.email);
                return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(&req.password, &user.password)? {
            tracing::warn!("Login rejected: wrong password for user {}", user.id);
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!("User {} logged in", user.id);
        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            token,
            expires_in: self.tokens.ttl_secs(),
        })
    }

    pub async fn register(&self, req: RegisterRequest) -> ServiceResult<UserResponse> {
        let password = hash_password(&req.password, self.password_cost)?;
        let user = self
            .users
            .create(NewUser {
                name: req.name,
                email: req.email,
                password,
            })
            .await
            .map_err(email_conflict)?;

        tracing::info!("Registered user {}", user.id);
        Ok(UserResponse::private(&user))
    }

    pub async fn find_me(&self, caller: Id) -> ServiceResult<UserResponse> {
        let user = self.users.find_by_id(caller).await?;
        Ok(UserResponse::private(&user))
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;
        Ok(users.iter().map(UserResponse::public).collect())
    }

    pub async fn find_by_id(&self, id: Id) -> ServiceResult<UserResponse> {
        let user = self.users.find_by_id(id).await?;
        Ok(UserResponse::public(&user))
    }

    pub async fn update(&self, id: Id, caller: Id, req: UpdateUserRequest) -> ServiceResult<UserResponse> {
        let mut user = authorized(caller, "account", self.users.find_by_id(id)).await?;

        if let Some(name) = req.name {
            user.name = name;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(password) = req.password {
            user.password = hash_password(&password, self.password_cost)?;
        }

        let user = self.users.update(&user).await.map_err(email_conflict)?;
        Ok(UserResponse::private(&user))
    }

    pub async fn delete(&self, id: Id, caller: Id) -> ServiceResult<()> {
        authorized(caller, "account", self.users.find_by_id(id)).await?;
        self.users.delete(id).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

fn email_conflict(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::UniqueViolation(_) => ServiceError::Conflict("email is already registered".to_string()),
        other => other.into(),
    }
}
