/// Application state and router builder
///
/// Defines the shared state handed to every handler and assembles the Axum
/// router with routes and middleware. The state carries the stores as trait
/// objects, so the same router serves the Postgres backend in production
/// and the in-memory backend in tests.
///
/// # Router layout
///
/// ```text
/// /
/// ├── /health              # liveness (public)
/// ├── /auth/
/// │   ├── POST /register   # public
/// │   └── POST /login      # public
/// ├── /users/              # requires bearer token
/// │   ├── GET /me
/// │   ├── GET /
/// │   └── GET /:id
/// └── /tasks/              # requires bearer token
///     ├── GET    /
///     ├── POST   /
///     ├── PUT    /:id
///     └── DELETE /:id
/// ```
///
/// Authenticated routes sit behind [`auth_layer`], which resolves the
/// bearer token to a [`Principal`] exactly once per request and injects it
/// as a request extension. Handlers receive the principal explicitly and
/// pass it into the services; nothing reads it from ambient state.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use taskbook_shared::auth::principal::resolve_principal;
use taskbook_shared::models::user::User;
use taskbook_shared::store::{TaskStore, UserStore};

use crate::{config::Config, error::ApiError};

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; the `Arc`s keep the
/// clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// User store backend
    pub users: Arc<dyn UserStore>,

    /// Task store backend
    pub tasks: Arc<dyn TaskStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>, config: Config) -> Self {
        Self {
            users,
            tasks,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn token_secret(&self) -> &str {
        &self.config.auth.secret
    }
}

/// The authenticated identity for the current request
///
/// Inserted by [`auth_layer`] after token validation and user lookup;
/// handlers extract it with `Extension<Principal>` and treat it as
/// read-only.
#[derive(Debug, Clone)]
pub struct Principal(pub User);

/// Builds the complete Axum router
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: registration and login
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Everything below requires a resolved principal
    let user_routes = Router::new()
        .route("/me", get(routes::users::me))
        .route("/", get(routes::users::list_users))
        .route("/:id", get(routes::users::get_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    let cors = build_cors(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn build_cors(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}

/// Bearer authentication middleware
///
/// Extracts the `Authorization: Bearer <token>` header, resolves it to a
/// user via the token service and the user store, and injects the result
/// as a [`Principal`] extension. Requests with a missing, malformed,
/// invalid, or expired token are rejected with 401 before any handler
/// runs.
pub async fn auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let user = resolve_principal(state.users.as_ref(), token, state.token_secret()).await?;

    req.extensions_mut().insert(Principal(user));

    Ok(next.run(req).await)
}
