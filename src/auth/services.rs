use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::RegisterRequest,
        password::{hash_password, verify_password},
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::{ApiError, ApiResult},
};

const DUPLICATE_EMAIL: &str = "User already exists";

lazy_static! {
    /// Verified against when the email is unknown, so both failure paths pay
    /// for one Argon2 verification.
    static ref DUMMY_HASH: Option<String> = hash_password("reservo-timing-equalizer").ok();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stores a new user with a hashed password.
///
/// The duplicate pre-check and the insert are separate statements; the unique
/// index on `email` catches the race between them.
pub async fn register(users: &dyn UserRepo, req: RegisterRequest) -> ApiResult<User> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let password_hash = hash_password(&req.password)?;
    let new = NewUser {
        name: req.name.trim().to_string(),
        email,
        password_hash,
        role: req.role,
    };

    let user = users.insert(new).await?.ok_or_else(|| {
        warn!("email registered concurrently");
        ApiError::Conflict(DUPLICATE_EMAIL.into())
    })?;

    info!(user_id = user.user_id, email = %user.email, "user registered");
    Ok(user)
}

/// Checks credentials. Unknown email and wrong password fail identically.
pub async fn verify(users: &dyn UserRepo, email: &str, password: &str) -> ApiResult<User> {
    let email = normalize_email(email);

    let Some(user) = users.find_by_email(&email).await? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify_password(password, dummy);
        }
        warn!(email = %email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.user_id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}
