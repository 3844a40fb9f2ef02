/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation (access + refresh)
/// - [`middleware`]: Axum middleware injecting [`middleware::AuthContext`]
///
/// Passwords are hashed with Argon2id (64 MB, 3 iterations); tokens are
/// HS256-signed with issuer and expiry checks. Verification everywhere
/// uses constant-time comparison.

pub mod jwt;
pub mod middleware;
pub mod password;
