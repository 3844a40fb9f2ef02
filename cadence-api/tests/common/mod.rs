/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation
/// - JWT token generation
/// - Response body helpers

use cadence_api::app::{build_router, AppState};
use cadence_api::config::Config;
use cadence_shared::auth::jwt::{create_token, Claims, TokenType};
use cadence_shared::auth::password;
use cadence_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Password used for every test user
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a migrated database and a
    /// registered user
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (idempotent across tests)
        cadence_shared::db::run_migrations(&db).await?;

        // Create test user with a known password
        let user = User::create(
            &db,
            CreateUser {
                username: unique_username(),
                password_hash: password::hash_password(TEST_PASSWORD)?,
            },
        )
        .await?;

        // Generate JWT token
        let claims = Claims::new(user.id, user.username.clone(), TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Deleting the user cascades to habits and todos
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Generates a username that is unique across concurrent tests and fits
/// the registration length limit
pub fn unique_username() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("test{}", &suffix[..16])
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
