use sqlx::FromRow;

/// A user row. The username is the primary key and the canonical identity
/// used everywhere else (token subject, task ownership).
///
/// Never serialized to API responses: the password hash must not leave the
/// server, and the auth endpoints return only a message or a token.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
