//! Router assembly
//!
//! Wires the shared key-value backend into the session store and the
//! cache-aside repositories, then mounts both domain routers.

use std::sync::Arc;

use auth::domain::entity::User;
use auth::domain::repository::UserRepository;
use auth::middleware::require_bearer;
use auth::{AuthConfig, Authenticator, KvSessionStore, auth_router};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware, routing::get};
use books::domain::repository::BookRepository;
use books::{BookService, books_router};
use cache::{CacheAsideRepository, CacheBackend, CacheConfig};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

type CachedUsers<U> = CacheAsideRepository<User, U, CacheBackend>;
type Sessions = KvSessionStore<CacheBackend>;

/// Build the full application over any pair of source-of-truth repositories.
pub fn build_app<U, B>(
    users: Arc<U>,
    books: Arc<B>,
    kv: Arc<CacheBackend>,
    config: &ServerConfig,
) -> anyhow::Result<Router>
where
    U: UserRepository + Sync + 'static,
    B: BookRepository + Sync + 'static,
{
    let cache_config = CacheConfig {
        entity_ttl: config.cache_ttl,
    };

    let users = Arc::new(CacheAsideRepository::new(users, kv.clone(), &cache_config));
    let books = Arc::new(CacheAsideRepository::new(books, kv.clone(), &cache_config));
    let sessions = Arc::new(KvSessionStore::new(kv));

    let auth_config = AuthConfig {
        session_ttl: config.session_ttl,
        password_pepper: config.password_pepper.clone(),
        ..AuthConfig::default()
    };
    let authenticator = Arc::new(Authenticator::new(users, sessions, auth_config)?);
    let book_service = Arc::new(BookService::new(books));

    let books_api = books_router(book_service).route_layer(middleware::from_fn_with_state(
        authenticator.clone(),
        require_bearer::<CachedUsers<U>, Sessions>,
    ));

    let api = Router::new()
        .nest("/api/auth", auth_router(authenticator))
        .nest("/api/books", books_api)
        .route("/health", get(|| async { "ok" }));

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout);

    Ok(api.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors(&config.frontend_origins))
            .layer(timeout),
    ))
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
