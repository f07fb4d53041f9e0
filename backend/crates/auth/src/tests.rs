//! Scenario tests for the auth crate

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use cache::{CacheAsideRepository, CacheConfig, MemoryStore};
    use platform::password::HashingCost;

    use crate::application::authenticator::Authenticator;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::User;
    use crate::domain::repository::SessionStore;
    use crate::infra::{KvSessionStore, MemoryUserRepository};

    pub type CachedUsers = CacheAsideRepository<User, MemoryUserRepository, MemoryStore>;
    pub type TestAuthenticator = Authenticator<CachedUsers, KvSessionStore<MemoryStore>>;

    pub fn config() -> AuthConfig {
        AuthConfig {
            password_cost: HashingCost {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
            ..AuthConfig::default()
        }
    }

    pub fn cached_users(kv: Arc<MemoryStore>) -> Arc<CachedUsers> {
        Arc::new(CacheAsideRepository::new(
            Arc::new(MemoryUserRepository::new()),
            kv,
            &CacheConfig::default(),
        ))
    }

    pub fn authenticator() -> TestAuthenticator {
        let kv = Arc::new(MemoryStore::new());
        Authenticator::new(
            cached_users(kv.clone()),
            Arc::new(KvSessionStore::new(kv)),
            config(),
        )
        .unwrap()
    }

    pub fn authenticator_with_sessions<S>(sessions: S) -> Authenticator<CachedUsers, S>
    where
        S: SessionStore + Sync,
    {
        let kv = Arc::new(MemoryStore::new());
        Authenticator::new(cached_users(kv), Arc::new(sessions), config()).unwrap()
    }
}

#[cfg(test)]
mod authenticator_tests {
    use super::fixtures::*;
    use crate::error::AuthError;
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_alice_session_lifecycle() {
        let auth = authenticator();

        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let login = auth.login("alice@example.com", "secret1").await.unwrap();
        assert_eq!(login.user.user_id, alice.user_id);

        let token = login.token.as_str().to_string();
        assert_eq!(auth.validate_token(&token).await.unwrap(), alice.user_id);

        let wrong = auth.login("alice@example.com", "wrongpass").await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        assert_ok!(auth.logout(&token).await);
        assert!(matches!(
            auth.validate_token(&token).await,
            Err(AuthError::InvalidSession)
        ));
        // Still invalid on every later attempt
        assert!(matches!(
            auth.validate_token(&token).await,
            Err(AuthError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_register_returns_profile() {
        let auth = authenticator();
        let profile = auth
            .register("  Alice  ", "Alice@Example.com", "secret1")
            .await
            .unwrap();

        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(
            auth.get_user_by_id(&profile.user_id).await.unwrap(),
            profile
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let again = auth
            .register("Other Alice", "ALICE@example.com", "another1")
            .await;
        assert!(matches!(again, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_validation_happens_before_persistence() {
        let auth = authenticator();

        for (name, email, password) in [
            ("A", "a@example.com", "secret1"),
            ("Alice", "not-an-email", "secret1"),
            ("Alice", "alice@example.com", "short"),
        ] {
            let result = auth.register(name, email, password).await;
            assert!(matches!(result, Err(AuthError::Validation(_))));
        }

        // Nothing was stored: the valid registration still succeeds
        assert_ok!(
            auth.register("Alice", "alice@example.com", "secret1")
                .await
        );
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let auth = authenticator();
        let result = auth.login("nobody@example.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let result = auth.login("not an email", "secret1").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        assert_ok!(auth.login(" ALICE@example.com ", "secret1").await);
    }

    #[tokio::test]
    async fn test_each_login_gets_its_own_session() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let first = auth.login("alice@example.com", "secret1").await.unwrap();
        let second = auth.login("alice@example.com", "secret1").await.unwrap();
        assert_ne!(first.token, second.token);

        auth.logout(first.token.as_str()).await.unwrap();
        assert!(auth.validate_token(first.token.as_str()).await.is_err());
        assert!(auth.validate_token(second.token.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_expiry_reported_to_caller() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let login = auth.login("alice@example.com", "secret1").await.unwrap();

        let lifetime = login.expires_at - chrono::Utc::now();
        assert!(lifetime > chrono::Duration::hours(23));
        assert!(lifetime <= chrono::Duration::hours(24));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_ttl() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let token = auth
            .login("alice@example.com", "secret1")
            .await
            .unwrap()
            .token;

        tokio::time::advance(Duration::from_secs(24 * 3600 - 1)).await;
        assert!(auth.validate_token(token.as_str()).await.is_ok());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(matches!(
            auth.validate_token(token.as_str()).await,
            Err(AuthError::InvalidSession)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_does_not_extend_session() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let token = auth
            .login("alice@example.com", "secret1")
            .await
            .unwrap()
            .token;

        for _ in 0..4 {
            tokio::time::advance(Duration::from_secs(6 * 3600 - 60)).await;
            assert!(auth.validate_token(token.as_str()).await.is_ok());
        }

        tokio::time::advance(Duration::from_secs(300)).await;
        assert!(auth.validate_token(token.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_tokens() {
        let auth = authenticator();
        for raw in ["", "abc", "definitely not a token at all but long enough!!"] {
            assert!(matches!(
                auth.validate_token(raw).await,
                Err(AuthError::InvalidSession)
            ));
            // Logout never fails on garbage
            assert_ok!(auth.logout(raw).await);
        }
    }

    #[tokio::test]
    async fn test_unknown_user_id() {
        let auth = authenticator();
        let result = auth.get_user_by_id(&kernel::id::UserId::new()).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}

#[cfg(test)]
mod profile_tests {
    use super::fixtures::*;
    use crate::error::AuthError;
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_update_name_visible_after_cached_read() {
        let auth = authenticator();
        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        // Populate the entity cache
        assert_eq!(
            auth.get_user_by_id(&alice.user_id).await.unwrap().name,
            "Alice"
        );

        let updated = auth
            .update_profile(&alice.user_id, Some("Alicia".into()), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert!(updated.updated_at >= alice.updated_at);

        assert_eq!(
            auth.get_user_by_id(&alice.user_id).await.unwrap().name,
            "Alicia"
        );
    }

    #[tokio::test]
    async fn test_update_email_changes_login() {
        let auth = authenticator();
        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let updated = auth
            .update_profile(&alice.user_id, None, Some("Alice@New.example".into()))
            .await
            .unwrap();
        assert_eq!(updated.email, "alice@new.example");

        assert!(auth.login("alice@new.example", "secret1").await.is_ok());
        assert!(matches!(
            auth.login("alice@example.com", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_duplicate() {
        let auth = authenticator();
        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        auth.register("Bob", "bob@example.com", "secret1")
            .await
            .unwrap();

        let result = auth
            .update_profile(&alice.user_id, None, Some("BOB@example.com".into()))
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));

        // Keeping one's own email is not a conflict
        assert!(
            auth.update_profile(&alice.user_id, None, Some("alice@example.com".into()))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_fields() {
        let auth = authenticator();
        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let result = auth
            .update_profile(&alice.user_id, Some("A".into()), None)
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = auth
            .update_profile(&alice.user_id, None, Some("nope".into()))
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        assert_eq!(
            auth.get_user_by_id(&alice.user_id).await.unwrap().name,
            "Alice"
        );
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let auth = authenticator();
        let result = auth
            .update_profile(&UserId::new(), Some("Nobody".into()), None)
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}

#[cfg(test)]
mod late_duplicate_tests {
    use super::fixtures::config;
    use crate::application::authenticator::Authenticator;
    use crate::domain::entity::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::Email;
    use crate::error::AuthError;
    use crate::infra::{KvSessionStore, MemoryUserRepository};
    use cache::MemoryStore;
    use kernel::error::app_error::AppResult;
    use kernel::id::UserId;
    use kernel::repository::Repository;
    use std::sync::Arc;

    /// Email lookups always miss, as when a concurrent registration commits
    /// between the pre-check and the insert. Writes still hit the real store.
    struct StaleEmailLookup {
        inner: MemoryUserRepository,
    }

    impl Repository<User> for StaleEmailLookup {
        async fn create(&self, user: &User) -> AppResult<()> {
            self.inner.create(user).await
        }

        async fn update(&self, user: &User) -> AppResult<()> {
            self.inner.update(user).await
        }

        async fn delete(&self, user_id: &UserId) -> AppResult<()> {
            self.inner.delete(user_id).await
        }

        async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<User>> {
            self.inner.find_by_id(user_id).await
        }
    }

    impl UserRepository for StaleEmailLookup {
        async fn find_by_email(&self, _email: &Email) -> AppResult<Option<User>> {
            Ok(None)
        }
    }

    fn authenticator() -> Authenticator<StaleEmailLookup, KvSessionStore<MemoryStore>> {
        let users = StaleEmailLookup {
            inner: MemoryUserRepository::new(),
        };
        Authenticator::new(
            Arc::new(users),
            Arc::new(KvSessionStore::new(Arc::new(MemoryStore::new()))),
            config(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_conflict_is_duplicate_identity() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        let again = auth
            .register("Alice Again", "alice@example.com", "another1")
            .await;
        assert!(matches!(again, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_update_conflict_is_duplicate_identity() {
        let auth = authenticator();
        let alice = auth
            .register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        auth.register("Bob", "bob@example.com", "secret1")
            .await
            .unwrap();

        let result = auth
            .update_profile(&alice.user_id, None, Some("bob@example.com".into()))
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));
    }
}

#[cfg(test)]
mod session_failure_tests {
    use super::fixtures::*;
    use crate::domain::entity::Session;
    use crate::domain::repository::SessionStore;
    use crate::domain::value_object::SessionToken;
    use crate::error::{AuthError, AuthResult};
    use cache::MemoryStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Working store whose reads and deletes can be switched off
    struct BrokenStore {
        inner: crate::infra::KvSessionStore<MemoryStore>,
        broken: Arc<AtomicBool>,
    }

    impl BrokenStore {
        fn new() -> (Self, Arc<AtomicBool>) {
            let broken = Arc::new(AtomicBool::new(false));
            let store = Self {
                inner: crate::infra::KvSessionStore::new(Arc::new(MemoryStore::new())),
                broken: broken.clone(),
            };
            (store, broken)
        }

        fn check(&self) -> AuthResult<()> {
            if self.broken.load(Ordering::SeqCst) {
                Err(AuthError::Internal("session backend down".into()))
            } else {
                Ok(())
            }
        }
    }

    impl SessionStore for BrokenStore {
        async fn put(
            &self,
            token: &SessionToken,
            session: &Session,
            ttl: Duration,
        ) -> AuthResult<()> {
            self.check()?;
            self.inner.put(token, session, ttl).await
        }

        async fn get(&self, token: &SessionToken) -> AuthResult<Option<Session>> {
            self.check()?;
            self.inner.get(token).await
        }

        async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
            self.check()?;
            self.inner.delete(token).await
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_closed() {
        let (store, broken) = BrokenStore::new();
        let auth = authenticator_with_sessions(store);
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let token = auth
            .login("alice@example.com", "secret1")
            .await
            .unwrap()
            .token;

        broken.store(true, Ordering::SeqCst);
        assert!(matches!(
            auth.validate_token(token.as_str()).await,
            Err(AuthError::InvalidSession)
        ));

        // Recovers once the backend does
        broken.store(false, Ordering::SeqCst);
        assert!(auth.validate_token(token.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_failure_is_surfaced() {
        let (store, broken) = BrokenStore::new();
        let auth = authenticator_with_sessions(store);
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();
        let token = auth
            .login("alice@example.com", "secret1")
            .await
            .unwrap()
            .token;

        broken.store(true, Ordering::SeqCst);
        assert!(matches!(
            auth.logout(token.as_str()).await,
            Err(AuthError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_login_creates_no_session_when_store_fails() {
        let (store, broken) = BrokenStore::new();
        let auth = authenticator_with_sessions(store);
        auth.register("Alice", "alice@example.com", "secret1")
            .await
            .unwrap();

        broken.store(true, Ordering::SeqCst);
        assert!(matches!(
            auth.login("alice@example.com", "secret1").await,
            Err(AuthError::Internal(_))
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use super::fixtures::*;
    use crate::presentation::router::auth_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        auth_router(Arc::new(authenticator()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn with_bearer(builder: axum::http::request::Builder, token: &str) -> Request<Body> {
        builder
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_http_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = body_json(response).await;
        assert_eq!(user["email"], "alice@example.com");
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());

        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                json!({"email": "alice@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login = body_json(response).await;
        assert_eq!(login["tokenType"], "bearer");
        assert_eq!(login["expiresIn"], 86400);
        assert_eq!(login["user"]["id"], user["id"]);
        let token = login["accessToken"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(with_bearer(Request::get("/me"), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Alice");

        let response = app
            .clone()
            .oneshot(with_bearer(Request::post("/logout"), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(with_bearer(Request::get("/me"), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_me() {
        let app = app();
        app.clone()
            .oneshot(post_json(
                "/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                json!({"email": "alice@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        let token = body_json(response).await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();

        let put = |body: Value| {
            Request::put("/me")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(body.to_string()))
                .unwrap()
        };

        let response = app.clone().oneshot(put(json!({"name": "Alicia"}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Alicia");
        assert_eq!(body["email"], "alice@example.com");

        let response = app
            .clone()
            .oneshot(with_bearer(Request::get("/me"), &token))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["name"], "Alicia");

        let response = app.oneshot(put(json!({"email": "bad"}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_me_requires_bearer() {
        let response = app()
            .oneshot(
                Request::put("/me")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"name": "Mallory"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_requires_bearer() {
        let response = app()
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
        assert_eq!(body_json(response).await["code"], "INVALID_SESSION");
    }

    #[tokio::test]
    async fn test_wrong_password_problem_body() {
        let app = app();
        app.clone()
            .oneshot(post_json(
                "/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "secret1"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json(
                "/login",
                json!({"email": "alice@example.com", "password": "wrongpass"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let app = app();
        let register = || {
            post_json(
                "/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "secret1"}),
            )
        };

        app.clone().oneshot(register()).await.unwrap();
        let response = app.oneshot(register()).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["code"], "DUPLICATE_IDENTITY");
    }
}
