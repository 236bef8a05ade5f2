use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::TokenValidator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_users::create_users;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::list_users::list_users_page;
use super::handlers::login::login;
use super::handlers::register_user::register_user;
use super::handlers::update_user::update_user;
use super::middleware::identity_filter;
use super::middleware::require_authenticated;
use super::middleware::BearerSettings;
use crate::domain::user::ports::UserServicePort;

pub struct AppState<S: UserServicePort> {
    pub user_service: Arc<S>,
    pub authenticator: Arc<Authenticator>,
    pub validator: Arc<TokenValidator>,
    pub bearer: Arc<BearerSettings>,
}

impl<S: UserServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
            validator: Arc::clone(&self.validator),
            bearer: Arc::clone(&self.bearer),
        }
    }
}

pub fn create_router<S: UserServicePort>(
    user_service: Arc<S>,
    authenticator: Arc<Authenticator>,
    validator: Arc<TokenValidator>,
    bearer: BearerSettings,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        validator,
        bearer: Arc::new(bearer),
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<S>))
        .route("/api/users/register", post(register_user::<S>));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users::<S>).post(create_users::<S>))
        .route("/api/users/page", get(list_users_page::<S>))
        .route(
            "/api/users/:user_id",
            get(get_user::<S>)
                .put(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .route_layer(middleware::from_fn(require_authenticated));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers stay out of the span: they carry bearer tokens
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity_filter::<S>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
