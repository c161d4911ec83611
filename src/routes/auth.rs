use crate::{
    auth::{generate_token, hash_password, verify_password, LoginRequest, RegisterRequest, TokenResponse},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Fails with 409 when the username or email is already taken; otherwise
/// stores a salted bcrypt hash of the password and creates the user.
#[post("/registrar")]
pub async fn registrar(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    // Single combined existence check, matching the uniqueness constraints
    // on both columns.
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(&register_data.username)
    .bind(&register_data.email)
    .fetch_one(&**pool)
    .await?;

    if taken {
        return Err(AppError::Conflict("Username or email already in use".into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)")
        .bind(&register_data.username)
        .bind(&register_data.email)
        .bind(&password_hash)
        .execute(&**pool)
        .await;

    match result {
        Ok(_) => {
            log::info!("user registered: {}", register_data.username);
            Ok(HttpResponse::Created().json(json!({
                "message": "User registered successfully"
            })))
        }
        Err(e) => {
            // The existence check races with concurrent registrations; a
            // unique violation at insert time is still a conflict.
            if e.as_database_error()
                .map_or(false, |db| db.is_unique_violation())
            {
                log::warn!("duplicate registration for {}", register_data.username);
                Err(AppError::Conflict("Username or email already in use".into()))
            } else {
                Err(e.into())
            }
        }
    }
}

/// Login user
///
/// Verifies the credentials and returns a signed bearer token. Unknown
/// usernames and wrong passwords produce the same generic 401 so callers
/// cannot probe which usernames exist.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT username, email, password_hash FROM users WHERE username = $1",
    )
    .bind(&login_data.username)
    .fetch_optional(&**pool)
    .await?;

    if let Some(user) = user {
        if verify_password(&login_data.password, &user.password_hash)? {
            let token = generate_token(&user)?;
            return Ok(HttpResponse::Ok().json(TokenResponse { token }));
        }
    }

    Err(AppError::Unauthorized("Invalid credentials".into()))
}
