use std::collections::BTreeSet;

use auth::Authority;
use auth::TokenValidator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Where the bearer token is read from.
#[derive(Debug, Clone)]
pub struct BearerSettings {
    pub header_name: HeaderName,
    pub scheme_prefix: String,
}

impl Default for BearerSettings {
    fn default() -> Self {
        Self {
            header_name: header::AUTHORIZATION,
            scheme_prefix: "Bearer ".to_string(),
        }
    }
}

/// Principal attached to a request whose bearer token checked out.
///
/// Lives in the request extensions for that one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub user_id: UserId,
    pub email: String,
    pub authorities: BTreeSet<Authority>,
}

/// Runs on every request: attaches an [`AuthenticatedContext`] when the
/// request carries a valid bearer token, and always hands the request on.
pub async fn identity_filter<S: UserServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<AuthenticatedContext>().is_none() {
        let now = Utc::now().timestamp();
        let context = resolve_context(
            state.user_service.as_ref(),
            &state.validator,
            &state.bearer,
            req.headers(),
            now,
        )
        .await;

        if let Some(context) = context {
            req.extensions_mut().insert(context);
        }
    }

    next.run(req).await
}

/// Rejects requests the identity filter left anonymous.
pub async fn require_authenticated(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthenticatedContext>().is_none() {
        return ApiError::Unauthorized("Authentication required".to_string()).into_response();
    }

    next.run(req).await
}

/// Resolve the bearer token in `headers` to an authenticated principal.
///
/// Every failure ends in `None`; nothing here is reported to the client.
pub async fn resolve_context<S: UserServicePort + ?Sized>(
    service: &S,
    validator: &TokenValidator,
    bearer: &BearerSettings,
    headers: &HeaderMap,
    now: i64,
) -> Option<AuthenticatedContext> {
    let token = extract_bearer_token(headers, bearer)?;

    let subject = match validator.extract_subject(token, now) {
        Ok(subject) => subject,
        Err(e) => {
            log_rejection(e.kind(), &e);
            return None;
        }
    };

    let email = match EmailAddress::new(subject) {
        Ok(email) => email,
        Err(e) => {
            tracing::debug!(reason = "invalid_subject", error = %e, "Bearer token rejected");
            return None;
        }
    };

    let user = match service.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            tracing::debug!(reason = "identity_not_found", subject = %email, "Bearer token rejected");
            return None;
        }
        Err(e) => {
            tracing::error!(subject = %email, error = %e, "Identity lookup failed");
            return None;
        }
    };

    let identity = user.identity();
    if let Err(e) = validator.validate(token, &identity, now) {
        log_rejection(e.kind(), &e);
        return None;
    }

    let authorities = identity.authorities();
    tracing::debug!(
        user_id = %user.id,
        authorities = ?authorities.iter().map(Authority::as_role).collect::<Vec<_>>(),
        "Request authenticated"
    );

    Some(AuthenticatedContext {
        user_id: user.id,
        email: identity.identifier().to_string(),
        authorities,
    })
}

fn extract_bearer_token<'a>(headers: &'a HeaderMap, bearer: &BearerSettings) -> Option<&'a str> {
    headers
        .get(&bearer.header_name)?
        .to_str()
        .ok()?
        .strip_prefix(bearer.scheme_prefix.as_str())
}

fn log_rejection(reason: &'static str, error: &dyn std::error::Error) {
    match reason {
        "bad_signature" | "subject_mismatch" => {
            tracing::warn!(reason, error = %error, "Bearer token rejected")
        }
        _ => tracing::debug!(reason, error = %error, "Bearer token rejected"),
    }
}
