use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // Unknown and malformed emails answer exactly like a wrong password,
    // after the same amount of hashing work
    let user = match EmailAddress::new(body.email) {
        Ok(email) => match state.user_service.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => {
                return Err(state.authenticator.reject_unknown(&body.password).into())
            }
            Err(e) => return Err(ApiError::from(e)),
        },
        Err(_) => return Err(state.authenticator.reject_unknown(&body.password).into()),
    };

    let issued = state
        .authenticator
        .authenticate(&body.password, &user.identity(), Utc::now().timestamp())?;

    tracing::info!(user_id = %user.id, "User logged in");

    let expires_at = DateTime::from_timestamp(issued.expires_at, 0).ok_or_else(|| {
        ApiError::InternalServerError(format!("Expiry out of range: {}", issued.expires_at))
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&user).into(),
            token: issued.token,
            expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => ApiError::invalid_credentials(),
            AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            AuthenticationError::TokenError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        }
    }
}
