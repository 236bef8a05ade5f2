use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Roles;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Bulk creation. Every entry is validated before anything is stored.
pub async fn create_users<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<Vec<CreateUserRequest>>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let commands = body
        .into_iter()
        .map(CreateUserRequest::try_into_command)
        .collect::<Result<Vec<_>, _>>()?;

    state
        .user_service
        .create_users(commands)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::CREATED, users.iter().map(UserData::from).collect()))
}

/// One entry of the bulk creation body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    roles: Vec<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let roles = if self.roles.is_empty() {
            Roles::default_user()
        } else {
            Roles::new(self.roles)?
        };

        Ok(CreateUserCommand {
            name: DisplayName::new(self.name)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(roles: Vec<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
            roles: roles.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_missing_roles_default_to_user() {
        let command = request(vec![]).try_into_command().unwrap();
        assert_eq!(command.roles, Roles::default_user());
    }

    #[test]
    fn test_explicit_roles_are_kept() {
        let command = request(vec!["ROLE_ADMIN"]).try_into_command().unwrap();
        assert!(command.roles.contains("ROLE_ADMIN"));
        assert!(!command.roles.contains("ROLE_USER"));
    }

    #[test]
    fn test_blank_role_is_rejected() {
        assert!(matches!(
            request(vec![" "]).try_into_command(),
            Err(UserError::InvalidRoles(_))
        ));
    }
}
