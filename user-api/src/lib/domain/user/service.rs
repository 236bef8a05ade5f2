use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Roles;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        self.password_hasher
            .hash(password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    fn new_user(
        &self,
        name: DisplayName,
        email: EmailAddress,
        password: &Password,
        roles: Roles,
    ) -> Result<User, UserError> {
        let now = Utc::now();
        Ok(User {
            id: UserId::new(),
            name,
            email,
            password_hash: self.hash_password(password)?,
            roles,
            created_at: now,
            updated_at: now,
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let user = self.new_user(
            command.name,
            command.email,
            &command.password,
            Roles::default_user(),
        )?;

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn create_users(&self, commands: Vec<CreateUserCommand>) -> Result<Vec<User>, UserError> {
        if commands.is_empty() {
            return Err(UserError::EmptyBatch);
        }

        let users = commands
            .into_iter()
            .map(|command| {
                self.new_user(command.name, command.email, &command.password, command.roles)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let created_users = self.repository.create_many(users).await?;
        tracing::info!(count = created_users.len(), "Users created");

        Ok(created_users)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn list_users_page(&self, request: &PageRequest) -> Result<Page<User>, UserError> {
        self.repository.find_page(request).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.name = command.name;
        user.email = command.email;

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password)?;
        }

        if let Some(new_roles) = command.roles {
            user.roles = new_roles;
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
